//! Shared fixtures for unit tests.

use crate::frame::VisionFrame;
use crate::types::{BoundingBox, Embedding, Face};

/// A 20x20 face at (`x`, 10) whose embedding is derived from `x`, so faces
/// built from different positions never compare equal.
pub fn face(x: f32, confidence: f32) -> Face {
    Face {
        bounding_box: BoundingBox {
            x,
            y: 10.0,
            width: 20.0,
            height: 20.0,
            confidence,
            landmarks: None,
        },
        embedding: Embedding {
            values: vec![x, 1.0, x * 0.5],
            model_version: Some("test".into()),
        },
        gender: None,
        age: None,
        race: None,
    }
}

/// Like [`face`], with an explicit embedding.
pub fn face_with_embedding(x: f32, values: Vec<f32>) -> Face {
    let mut f = face(x, 0.9);
    f.embedding.values = values;
    f
}

pub fn blank_frame(width: u32, height: u32) -> VisionFrame {
    VisionFrame::blank(width, height, 3)
}

/// Non-blank RGB frame whose bytes depend on `seed`.
pub fn patterned_frame(width: u32, height: u32, seed: u8) -> VisionFrame {
    let len = (width * height * 3) as usize;
    let data = (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed) | 1)
        .collect();
    VisionFrame::new(data, width, height, 3).unwrap()
}
