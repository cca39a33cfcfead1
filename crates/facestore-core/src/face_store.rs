//! Process-wide face store: static detection caches and reference registries
//! for both slots.

use crate::detector::FaceDetector;
use crate::frame::VisionFrame;
use crate::reference_faces::ReferenceRegistry;
use crate::slot::{Slot, Slotted};
use crate::static_faces::StaticFaceCache;
use crate::types::Face;

#[derive(Debug, Default, Clone)]
pub struct FaceStore {
    static_faces: Slotted<StaticFaceCache>,
    reference_faces: Slotted<ReferenceRegistry>,
}

impl FaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn static_faces(&self, slot: Slot, frame: &VisionFrame) -> Option<&[Face]> {
        self.static_faces[slot].get(frame)
    }

    pub fn set_static_faces(&mut self, slot: Slot, frame: &VisionFrame, faces: Vec<Face>) {
        self.static_faces[slot].put(frame, faces);
    }

    /// Invalidate detection results in both slots.
    pub fn clear_static_faces(&mut self) {
        self.static_faces.for_each_mut(|_, cache| cache.clear());
        tracing::debug!("static faces cleared");
    }

    /// Detect faces in `frame`, consulting the slot's static cache first.
    ///
    /// A detector failure is logged and yields no faces; it is not cached,
    /// so the next call retries.
    pub fn detect_faces(
        &mut self,
        slot: Slot,
        frame: &VisionFrame,
        detector: &mut dyn FaceDetector,
    ) -> Vec<Face> {
        if let Some(faces) = self.static_faces(slot, frame) {
            tracing::trace!(%slot, count = faces.len(), "static face cache hit");
            return faces.to_vec();
        }

        match detector.detect(frame) {
            Ok(faces) => {
                tracing::debug!(%slot, count = faces.len(), "detected faces");
                self.set_static_faces(slot, frame, faces.clone());
                faces
            }
            Err(err) => {
                tracing::warn!(%slot, error = %err, "face detection failed");
                Vec::new()
            }
        }
    }

    pub fn append_reference_face(&mut self, slot: Slot, label: &str, face: Face) {
        self.reference_faces[slot].append(label, face);
    }

    pub fn delete_reference_face(&mut self, slot: Slot, label: &str, face: &Face) -> bool {
        self.reference_faces[slot].delete(label, face)
    }

    /// The slot's registry, or `None` while it holds no faces.
    pub fn reference_faces(&self, slot: Slot) -> Option<&ReferenceRegistry> {
        let registry = &self.reference_faces[slot];
        (!registry.is_empty()).then_some(registry)
    }

    /// Flattened reference faces for one slot.
    pub fn materialize(&self, slot: Slot) -> Vec<Face> {
        self.reference_faces[slot].materialize()
    }

    /// Flattened reference faces for both slots.
    pub fn reference_sets(&self) -> Slotted<Vec<Face>> {
        Slotted::new(self.materialize(Slot::Primary), self.materialize(Slot::Secondary))
    }

    /// Drop every reference face in both slots.
    pub fn clear_reference_faces(&mut self) {
        self.reference_faces.for_each_mut(|_, registry| registry.clear());
        tracing::debug!("reference faces cleared");
    }
}
