use serde::{Deserialize, Serialize};

/// Bounding box for a detected face, with optional facial landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    /// Five-point facial landmarks: [left_eye, right_eye, nose, left_mouth, right_mouth].
    pub landmarks: Option<[(f32, f32); 5]>,
}

impl BoundingBox {
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Face embedding vector produced by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    /// Model version that produced this embedding (e.g., "w600k_r50").
    pub model_version: Option<String>,
}

impl Embedding {
    /// Compute cosine similarity between two embeddings.
    ///
    /// Returns a value in [-1, 1]. Higher = more similar.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;

        for (a, b) in self.values.iter().zip(other.values.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom > 0.0 { dot / denom } else { 0.0 }
    }

    /// Cosine distance in [0, 2]: `1 - similarity`.
    pub fn distance(&self, other: &Embedding) -> f32 {
        1.0 - self.similarity(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    White,
    Black,
    Latino,
    Asian,
    Indian,
    Arabic,
}

/// A detected face as returned by the external detector.
///
/// Opaque to this crate apart from the box (used for gallery crops and
/// ordering), the embedding (used for matching) and the optional attributes
/// (used for filtering). Two faces are the same reference exactly when all
/// of their data compares equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub bounding_box: BoundingBox,
    pub embedding: Embedding,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub race: Option<Race>,
}

impl Face {
    /// Detector confidence for this face.
    pub fn score(&self) -> f32 {
        self.bounding_box.confidence
    }

    /// True when every number in the face is finite.
    ///
    /// JSON has no encoding for NaN or infinity, so only finite faces can be
    /// persisted and read back equal.
    pub fn is_finite(&self) -> bool {
        let b = &self.bounding_box;
        [b.x, b.y, b.width, b.height, b.confidence]
            .iter()
            .chain(b.landmarks.iter().flatten().flat_map(|(x, y)| [x, y]))
            .chain(&self.embedding.values)
            .all(|v| v.is_finite())
    }
}
