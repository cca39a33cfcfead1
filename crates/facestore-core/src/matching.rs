use crate::types::Face;

/// Keep the faces that match at least one reference.
///
/// A face matches when its cosine distance to a reference embedding is
/// strictly below `max_distance`. Input order is preserved. No references
/// means no matches.
pub fn find_similar_faces(faces: &[Face], references: &[Face], max_distance: f32) -> Vec<Face> {
    faces
        .iter()
        .filter(|face| {
            references
                .iter()
                .any(|reference| face.embedding.distance(&reference.embedding) < max_distance)
        })
        .cloned()
        .collect()
}
