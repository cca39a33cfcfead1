//! Transient gallery selection state.

use crate::slot::{Slot, Slotted};
use crate::types::Face;

/// Correlates gallery clicks with the in-memory face lists behind each gallery.
///
/// Three cursors exist: one into the candidate (detector) gallery and one per
/// slot into that slot's selection gallery. `None` means nothing selected.
/// Cursors are not validated when set; the galleries they point into can be
/// repopulated at any time, so every consumer bounds-checks before use.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectionTracker {
    candidate_pick: Option<usize>,
    picks: Slotted<Vec<Face>>,
    cursors: Slotted<Option<usize>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click on the candidate gallery.
    pub fn select_candidate(&mut self, index: usize) {
        self.candidate_pick = Some(index);
    }

    /// Record a click on a slot's selection gallery.
    pub fn select_reference(&mut self, slot: Slot, index: usize) {
        self.cursors[slot] = Some(index);
    }

    pub fn candidate_pick(&self) -> Option<usize> {
        self.candidate_pick
    }

    pub fn cursor(&self, slot: Slot) -> Option<usize> {
        self.cursors[slot]
    }

    /// Faces currently shown in the slot's selection gallery, in gallery order.
    pub fn picks(&self, slot: Slot) -> &[Face] {
        &self.picks[slot]
    }

    pub(crate) fn reset_candidate_pick(&mut self) {
        self.candidate_pick = None;
    }

    pub(crate) fn reset_cursor(&mut self, slot: Slot) {
        self.cursors[slot] = None;
    }

    pub(crate) fn push_pick(&mut self, slot: Slot, face: Face) {
        self.picks[slot].push(face);
    }

    pub(crate) fn remove_pick(&mut self, slot: Slot, index: usize) -> Option<Face> {
        let picks = &mut self.picks[slot];
        (index < picks.len()).then(|| picks.remove(index))
    }

    /// Forget both slots' picks and cursors. The candidate pick is kept: it
    /// refers to the detector gallery, which this does not touch.
    pub fn clear_selected(&mut self) {
        self.picks.for_each_mut(|_, picks| picks.clear());
        self.cursors.for_each_mut(|_, cursor| *cursor = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::face;

    #[test]
    fn test_starts_with_nothing_selected() {
        let tracker = SelectionTracker::new();
        assert_eq!(tracker.candidate_pick(), None);
        assert_eq!(tracker.cursor(Slot::Primary), None);
        assert_eq!(tracker.cursor(Slot::Secondary), None);
        assert!(tracker.picks(Slot::Primary).is_empty());
    }

    #[test]
    fn test_cursors_are_independent() {
        let mut tracker = SelectionTracker::new();
        tracker.select_candidate(2);
        tracker.select_reference(Slot::Secondary, 1);

        assert_eq!(tracker.candidate_pick(), Some(2));
        assert_eq!(tracker.cursor(Slot::Primary), None);
        assert_eq!(tracker.cursor(Slot::Secondary), Some(1));
    }

    #[test]
    fn test_remove_pick_out_of_range() {
        let mut tracker = SelectionTracker::new();
        tracker.push_pick(Slot::Primary, face(1.0, 0.9));
        assert_eq!(tracker.remove_pick(Slot::Primary, 3), None);
        assert_eq!(tracker.remove_pick(Slot::Primary, 0), Some(face(1.0, 0.9)));
    }

    #[test]
    fn test_clear_selected_keeps_candidate_pick() {
        let mut tracker = SelectionTracker::new();
        tracker.select_candidate(1);
        tracker.select_reference(Slot::Primary, 0);
        tracker.push_pick(Slot::Primary, face(1.0, 0.9));
        tracker.push_pick(Slot::Secondary, face(2.0, 0.9));

        tracker.clear_selected();

        assert_eq!(tracker.candidate_pick(), Some(1));
        assert_eq!(tracker.cursor(Slot::Primary), None);
        assert!(tracker.picks(Slot::Primary).is_empty());
        assert!(tracker.picks(Slot::Secondary).is_empty());
    }
}
