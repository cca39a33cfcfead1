//! Detection memoization keyed by frame content.

use crate::frame::{frame_hash, FrameHash, VisionFrame};
use crate::types::Face;
use std::collections::HashMap;

/// Detection results for one slot, keyed by [`FrameHash`].
///
/// Pure memoization: entries are never merged or versioned, the last `put`
/// for a given frame content wins.
#[derive(Debug, Default, Clone)]
pub struct StaticFaceCache {
    entries: HashMap<FrameHash, Vec<Face>>,
}

impl StaticFaceCache {
    pub fn get(&self, frame: &VisionFrame) -> Option<&[Face]> {
        let hash = frame_hash(frame)?;
        self.entries.get(&hash).map(Vec::as_slice)
    }

    /// Store `faces` for `frame`. Blank frames are silently skipped.
    pub fn put(&mut self, frame: &VisionFrame, faces: Vec<Face>) {
        match frame_hash(frame) {
            Some(hash) => {
                self.entries.insert(hash, faces);
            }
            None => tracing::debug!("static face cache: skipping blank frame"),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
