//! Frame sources: where the reference frame for the candidate gallery comes from.

use crate::frame::{FrameError, VisionFrame};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameSourceError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{0} is not a still image; video frames need a video frame source")]
    NotAnImage(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Reads a single frame from an image, or frame `frame_number` of a video.
pub trait FrameSource {
    fn read_frame(
        &mut self,
        path: &Path,
        frame_number: Option<u32>,
    ) -> Result<VisionFrame, FrameSourceError>;
}

/// Still-image reader backed by the `image` crate.
///
/// Decodes to packed RGB. A requested frame number is ignored: a still
/// image is a one-frame source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFrameSource;

impl ImageFrameSource {
    pub fn is_image(path: &Path) -> bool {
        image::ImageFormat::from_path(path).is_ok()
    }
}

impl FrameSource for ImageFrameSource {
    fn read_frame(
        &mut self,
        path: &Path,
        _frame_number: Option<u32>,
    ) -> Result<VisionFrame, FrameSourceError> {
        if !Self::is_image(path) {
            return Err(FrameSourceError::NotAnImage(path.display().to_string()));
        }

        let rgb = image::open(path)
            .map_err(|source| FrameSourceError::Decode {
                path: path.display().to_string(),
                source,
            })?
            .to_rgb8();

        let (width, height) = rgb.dimensions();
        tracing::debug!(path = %path.display(), width, height, "read image frame");
        Ok(VisionFrame::new(rgb.into_raw(), width, height, 3)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_png_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("target.png");
        let img =
            image::RgbImage::from_fn(4, 3, |x, y| image::Rgb([x as u8 * 10, y as u8 * 20, 7]));
        img.save(&path).unwrap();

        let frame = ImageFrameSource.read_frame(&path, None).unwrap();

        assert_eq!((frame.width(), frame.height(), frame.channels()), (4, 3, 3));
        // pixel (1, 2) → offset (2 * 4 + 1) * 3
        assert_eq!(&frame.data()[27..30], &[10, 40, 7]);
    }

    #[test]
    fn test_rejects_non_image_extension() {
        let result = ImageFrameSource.read_frame(Path::new("clip.mp4"), Some(3));
        assert!(matches!(result, Err(FrameSourceError::NotAnImage(_))));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageFrameSource.read_frame(&dir.path().join("missing.png"), None);
        assert!(matches!(result, Err(FrameSourceError::Decode { .. })));
    }
}
