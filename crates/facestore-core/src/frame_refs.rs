//! Which reference faces were chosen from which frame, persisted per slot.

use crate::slot::Slot;
use crate::state::{get_item, set_item, StateStore};
use crate::types::Face;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frame number → faces chosen from that frame.
///
/// Buckets iterate in ascending frame number, which fixes the order in
/// which [`remove_first`](Self::remove_first) scans them.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameReferenceMap {
    frames: BTreeMap<u32, Vec<Face>>,
}

impl FrameReferenceMap {
    /// Load the slot's map from the state store; absent or malformed → empty.
    pub fn load(state: &dyn StateStore, slot: Slot) -> Self {
        get_item(state, slot.frame_references_key()).unwrap_or_default()
    }

    pub fn save(&self, state: &mut dyn StateStore, slot: Slot) {
        set_item(state, slot.frame_references_key(), self);
    }

    /// Clear the persisted map for `slot` only.
    pub fn reset(state: &mut dyn StateStore, slot: Slot) {
        Self::default().save(state, slot);
    }

    pub fn bucket(&self, frame_number: u32) -> Option<&[Face]> {
        self.frames.get(&frame_number).map(Vec::as_slice)
    }

    /// Add `face` under `frame_number` unless an equal face is already there.
    ///
    /// The bucket is created even when nothing is added. Returns whether the
    /// face was inserted.
    pub fn insert_unique(&mut self, frame_number: u32, face: &Face) -> bool {
        let bucket = self.frames.entry(frame_number).or_default();
        if bucket.iter().any(|existing| existing == face) {
            return false;
        }
        bucket.push(face.clone());
        true
    }

    /// Remove the first face equal to `face`, scanning buckets by ascending
    /// frame number. Only one entry is removed even when other buckets hold
    /// equal faces. Returns the frame number it was removed from.
    pub fn remove_first(&mut self, face: &Face) -> Option<u32> {
        for (&frame_number, bucket) in self.frames.iter_mut() {
            if let Some(pos) = bucket.iter().position(|existing| existing == face) {
                bucket.remove(pos);
                return Some(frame_number);
            }
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Face])> {
        self.frames.iter().map(|(&n, faces)| (n, faces.as_slice()))
    }

    /// Total faces across all buckets.
    pub fn len(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;
    use crate::test_support::face;
    use serde_json::json;

    #[test]
    fn test_insert_unique_dedups_within_bucket() {
        let mut map = FrameReferenceMap::default();
        assert!(map.insert_unique(5, &face(1.0, 0.9)));
        assert!(!map.insert_unique(5, &face(1.0, 0.9)));
        assert_eq!(map.bucket(5).unwrap(), &[face(1.0, 0.9)]);
    }

    #[test]
    fn test_same_face_allowed_in_different_frames() {
        let mut map = FrameReferenceMap::default();
        assert!(map.insert_unique(5, &face(1.0, 0.9)));
        assert!(map.insert_unique(9, &face(1.0, 0.9)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_still_creates_bucket() {
        let mut map = FrameReferenceMap::default();
        map.insert_unique(3, &face(1.0, 0.9));
        map.insert_unique(3, &face(1.0, 0.9));
        assert!(map.bucket(3).is_some());
        assert!(map.bucket(4).is_none());
    }

    #[test]
    fn test_remove_first_scans_ascending_and_stops() {
        let mut map = FrameReferenceMap::default();
        map.insert_unique(9, &face(1.0, 0.9));
        map.insert_unique(2, &face(1.0, 0.9));
        map.insert_unique(2, &face(3.0, 0.9));

        assert_eq!(map.remove_first(&face(1.0, 0.9)), Some(2));
        assert_eq!(map.bucket(2).unwrap(), &[face(3.0, 0.9)]);
        assert_eq!(map.bucket(9).unwrap(), &[face(1.0, 0.9)]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut map = FrameReferenceMap::default();
        map.insert_unique(1, &face(1.0, 0.9));
        assert_eq!(map.remove_first(&face(2.0, 0.9)), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_save_load_per_slot() {
        let mut state = MemoryStateStore::new();
        let mut map = FrameReferenceMap::default();
        map.insert_unique(5, &face(1.0, 0.9));
        map.save(&mut state, Slot::Primary);

        assert_eq!(FrameReferenceMap::load(&state, Slot::Primary), map);
        assert!(FrameReferenceMap::load(&state, Slot::Secondary).is_empty());
    }

    #[test]
    fn test_reset_clears_one_slot_only() {
        let mut state = MemoryStateStore::new();
        let mut map = FrameReferenceMap::default();
        map.insert_unique(5, &face(1.0, 0.9));
        map.save(&mut state, Slot::Primary);
        map.save(&mut state, Slot::Secondary);

        FrameReferenceMap::reset(&mut state, Slot::Primary);

        assert!(FrameReferenceMap::load(&state, Slot::Primary).is_empty());
        assert_eq!(FrameReferenceMap::load(&state, Slot::Secondary).len(), 1);
    }

    #[test]
    fn test_malformed_state_loads_empty() {
        let mut state = MemoryStateStore::new();
        state.set(Slot::Primary.frame_references_key(), json!([1, 2, 3]));
        assert!(FrameReferenceMap::load(&state, Slot::Primary).is_empty());
    }
}
