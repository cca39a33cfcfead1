//! Reference face selection: the add/remove protocol tying the candidate
//! gallery, both slots' selection galleries, the reference registries and the
//! persisted frame reference maps together.
//!
//! Every operation runs to completion under `&mut self`. Nothing here
//! reports an error to the caller: stale cursors, duplicates and missing
//! references all degrade to "no state change" plus a view update telling the
//! front end what (if anything) to redraw.

use crate::config::{FaceSelectorMode, SelectorConfig};
use crate::detector::{FaceDetector, PreviewRenderer};
use crate::face_store::FaceStore;
use crate::filter::sort_and_filter_faces;
use crate::frame::VisionFrame;
use crate::frame_refs::FrameReferenceMap;
use crate::gallery::extract_gallery_frames;
use crate::matching::find_similar_faces;
use crate::selection::SelectionTracker;
use crate::slot::Slot;
use crate::source::FrameSource;
use crate::state::StateStore;
use crate::types::Face;
use std::path::Path;

/// Registry label all selected reference faces are filed under.
pub const REFERENCE_LABEL: &str = "reference_face";

/// What the front end should do with one of its widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    /// Leave the widget as it is.
    Keep,
    /// Replace the widget's contents.
    Set(T),
}

/// View changes produced by a selection operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionUpdate {
    /// The slot's selection gallery.
    pub gallery: Update<Vec<VisionFrame>>,
    pub preview: Update<VisionFrame>,
}

impl SelectionUpdate {
    pub fn unchanged() -> Self {
        Self {
            gallery: Update::Keep,
            preview: Update::Keep,
        }
    }
}

pub struct ReferenceSelector<S: StateStore> {
    faces: FaceStore,
    state: S,
    config: SelectorConfig,
    /// Faces behind the candidate gallery, index-aligned with it.
    candidates: Vec<Face>,
    candidate_gallery: Vec<VisionFrame>,
}

impl<S: StateStore> ReferenceSelector<S> {
    /// Resume from `state`, picking up a previously persisted selector config.
    pub fn new(state: S) -> Self {
        let config = SelectorConfig::from_state(&state).unwrap_or_default();
        Self::with_config(state, config)
    }

    /// Start with `config`, persisting it to `state`.
    pub fn with_config(mut state: S, config: SelectorConfig) -> Self {
        config.save_state(&mut state);
        Self {
            faces: FaceStore::new(),
            state,
            config,
            candidates: Vec::new(),
            candidate_gallery: Vec::new(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Change selector settings and persist them.
    ///
    /// Order and filter changes apply on the next candidate refresh, which
    /// is served from the static cache. Detector changes go through
    /// [`on_detector_changed`](Self::on_detector_changed) instead.
    pub fn update_config(&mut self, change: impl FnOnce(&mut SelectorConfig)) {
        change(&mut self.config);
        self.config.save_state(&mut self.state);
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn face_store(&self) -> &FaceStore {
        &self.faces
    }

    pub fn candidates(&self) -> &[Face] {
        &self.candidates
    }

    pub fn candidate_gallery(&self) -> &[VisionFrame] {
        &self.candidate_gallery
    }

    pub fn frame_references(&self, slot: Slot) -> FrameReferenceMap {
        FrameReferenceMap::load(&self.state, slot)
    }

    /// The slot's reference faces, flattened for identity matching.
    pub fn reference_faces(&self, slot: Slot) -> Vec<Face> {
        self.faces.materialize(slot)
    }

    /// Faces among `faces` targeted by the configured selector mode.
    ///
    /// `many` keeps every face and `one` keeps the face at
    /// `reference_face_position`. `reference` keeps the faces within
    /// `reference_face_distance` of one of the slot's references.
    pub fn matching_faces(&self, slot: Slot, faces: &[Face]) -> Vec<Face> {
        match self.config.mode {
            FaceSelectorMode::Many => faces.to_vec(),
            FaceSelectorMode::One => faces
                .get(self.config.reference_face_position)
                .cloned()
                .into_iter()
                .collect(),
            FaceSelectorMode::Reference => find_similar_faces(
                faces,
                &self.faces.materialize(slot),
                self.config.reference_face_distance,
            ),
        }
    }

    /// Detect, order and filter the faces in `frame` and rebuild the
    /// candidate gallery from them.
    ///
    /// Detections go through the static cache of `slot`, the slot the user
    /// is picking references for.
    pub fn refresh_candidates(
        &mut self,
        slot: Slot,
        frame: &VisionFrame,
        detector: &mut dyn FaceDetector,
    ) -> &[VisionFrame] {
        let detected = self.faces.detect_faces(slot, frame, detector);
        let faces = sort_and_filter_faces(detected, &self.config);
        self.candidate_gallery = extract_gallery_frames(frame, &faces);
        self.candidates = faces;
        tracing::debug!(%slot, candidates = self.candidates.len(), "candidate gallery refreshed");
        &self.candidate_gallery
    }

    /// Read the configured reference frame of `path` and refresh the
    /// candidate gallery from it. An unreadable target empties the gallery.
    pub fn refresh_from_source(
        &mut self,
        slot: Slot,
        source: &mut dyn FrameSource,
        path: &Path,
        detector: &mut dyn FaceDetector,
    ) -> &[VisionFrame] {
        match source.read_frame(path, Some(self.config.reference_frame_number)) {
            Ok(frame) => self.refresh_candidates(slot, &frame, detector),
            Err(err) => {
                tracing::warn!(
                    %slot,
                    path = %path.display(),
                    error = %err,
                    "cannot read reference frame"
                );
                self.clear_candidates();
                &self.candidate_gallery
            }
        }
    }

    /// Add the picked candidate to `slot` as a reference taken from
    /// `frame_number`.
    ///
    /// `displayed` is the slot's selection gallery as currently shown. A
    /// face already recorded for that frame is not added twice. A face with
    /// non-finite values cannot be persisted and is refused.
    pub fn add_reference_face(
        &mut self,
        tracker: &mut SelectionTracker,
        slot: Slot,
        displayed: &[VisionFrame],
        frame_number: u32,
        preview: &mut dyn PreviewRenderer,
    ) -> SelectionUpdate {
        let mut gallery = displayed.to_vec();
        if self.candidate_gallery.is_empty() {
            return SelectionUpdate {
                gallery: Update::Set(gallery),
                preview: Update::Keep,
            };
        }

        let pick = tracker.candidate_pick();
        let in_range = |&i: &usize| i < self.candidate_gallery.len() && i < self.candidates.len();
        let Some(index) = pick.filter(in_range) else {
            tracing::warn!(
                %slot,
                ?pick,
                candidates = self.candidate_gallery.len(),
                "invalid candidate selection; resetting"
            );
            tracker.reset_candidate_pick();
            return SelectionUpdate::unchanged();
        };

        let face = self.candidates[index].clone();
        if !face.is_finite() {
            tracing::warn!(
                %slot,
                candidate = index,
                "candidate face has non-finite values; not recorded"
            );
            return SelectionUpdate::unchanged();
        }

        let mut references = FrameReferenceMap::load(&self.state, slot);

        if references.insert_unique(frame_number, &face) {
            tracker.push_pick(slot, face.clone());
            gallery.push(self.candidate_gallery[index].clone());
            self.faces.append_reference_face(slot, REFERENCE_LABEL, face);
            tracing::info!(%slot, frame_number, candidate = index, "reference face added");
        } else {
            tracing::debug!(
                %slot,
                frame_number,
                candidate = index,
                "reference face already recorded"
            );
        }

        references.save(&mut self.state, slot);

        SelectionUpdate {
            gallery: Update::Set(gallery),
            preview: render(preview, frame_number),
        }
    }

    /// Remove the face under the slot's cursor from the slot's references.
    ///
    /// Frame buckets are scanned by ascending frame number and only the first
    /// equal face found is removed.
    pub fn remove_reference_face(
        &mut self,
        tracker: &mut SelectionTracker,
        slot: Slot,
        displayed: &[VisionFrame],
        frame_number: u32,
        preview: &mut dyn PreviewRenderer,
    ) -> SelectionUpdate {
        let cursor = tracker.cursor(slot);
        let picked = tracker.picks(slot).len();
        let Some(index) = cursor.filter(|&i| i < displayed.len() && i < picked) else {
            tracing::warn!(
                %slot,
                ?cursor,
                displayed = displayed.len(),
                picks = picked,
                "invalid reference selection; resetting"
            );
            tracker.reset_cursor(slot);
            return SelectionUpdate::unchanged();
        };
        let face = tracker.picks(slot)[index].clone();

        let mut references = FrameReferenceMap::load(&self.state, slot);
        match references.remove_first(&face) {
            Some(from_frame) => tracing::info!(%slot, from_frame, "reference face removed"),
            None => tracing::debug!(%slot, "selected face was not recorded for any frame"),
        }
        self.faces.delete_reference_face(slot, REFERENCE_LABEL, &face);
        tracker.remove_pick(slot, index);
        // The gallery shifts under the cursor, so it no longer names anything.
        tracker.reset_cursor(slot);

        references.save(&mut self.state, slot);

        let gallery = displayed
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, item)| item.clone())
            .collect();

        SelectionUpdate {
            gallery: Update::Set(gallery),
            preview: render(preview, frame_number),
        }
    }

    /// Forget every selected reference in both slots: picks, cursors,
    /// registries and persisted frame maps.
    pub fn clear_selected_faces(&mut self, tracker: &mut SelectionTracker) {
        tracker.clear_selected();
        self.faces.clear_reference_faces();
        for slot in Slot::ALL {
            FrameReferenceMap::reset(&mut self.state, slot);
        }
        tracing::info!("selected reference faces cleared");
    }

    /// Clear the persisted frame map of `slot` alone.
    ///
    /// Faces recorded in it are also dropped from the slot's registry and
    /// selection gallery, so nothing is left referring to them.
    pub fn reset_frame_references(
        &mut self,
        tracker: &mut SelectionTracker,
        slot: Slot,
    ) -> SelectionUpdate {
        let references = FrameReferenceMap::load(&self.state, slot);
        for (_, faces) in references.iter() {
            for face in faces {
                self.faces.delete_reference_face(slot, REFERENCE_LABEL, face);
            }
        }
        while tracker.remove_pick(slot, 0).is_some() {}
        tracker.reset_cursor(slot);
        FrameReferenceMap::reset(&mut self.state, slot);
        tracing::info!(%slot, faces = references.len(), "frame references reset");

        SelectionUpdate {
            gallery: Update::Set(Vec::new()),
            preview: Update::Keep,
        }
    }

    /// Detector settings changed: cached detections are stale, and so is
    /// every selection made from them.
    pub fn on_detector_changed(&mut self, tracker: &mut SelectionTracker) {
        self.faces.clear_static_faces();
        self.clear_selected_faces(tracker);
        self.clear_candidates();
    }

    /// A different target was loaded. Cached detections stay valid (they are
    /// keyed by content), selections do not.
    pub fn on_target_changed(&mut self, tracker: &mut SelectionTracker) {
        self.clear_selected_faces(tracker);
        self.clear_candidates();
    }

    fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.candidate_gallery.clear();
    }
}

fn render(preview: &mut dyn PreviewRenderer, frame_number: u32) -> Update<VisionFrame> {
    match preview.render_preview(frame_number) {
        Some(image) => Update::Set(image),
        None => Update::Keep,
    }
}
