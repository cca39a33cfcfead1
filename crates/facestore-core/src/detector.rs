use crate::frame::VisionFrame;
use crate::types::Face;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("detector not loaded: {0}")]
    NotLoaded(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// Interface to the external face detector.
///
/// Expected to be deterministic for a given frame and detector
/// configuration; that is what makes caching by frame content sound.
/// Implementations may be stateful, hence `&mut self`.
pub trait FaceDetector {
    fn detect(&mut self, frame: &VisionFrame) -> Result<Vec<Face>, DetectError>;
}

impl<F> FaceDetector for F
where
    F: FnMut(&VisionFrame) -> Result<Vec<Face>, DetectError>,
{
    fn detect(&mut self, frame: &VisionFrame) -> Result<Vec<Face>, DetectError> {
        self(frame)
    }
}

/// Renders the processed preview image for a frame number.
///
/// Returning `None` leaves whatever preview is currently shown in place.
pub trait PreviewRenderer {
    fn render_preview(&mut self, frame_number: u32) -> Option<VisionFrame>;
}

impl<F> PreviewRenderer for F
where
    F: FnMut(u32) -> Option<VisionFrame>,
{
    fn render_preview(&mut self, frame_number: u32) -> Option<VisionFrame> {
        self(frame_number)
    }
}
