//! Gallery thumbnails for detected faces.

use crate::frame::VisionFrame;
use crate::types::{BoundingBox, Face};

/// Padding added on every side of a face box, as a fraction of its size.
const CROP_PADDING: f32 = 0.25;

/// Crop one padded thumbnail per face, in face order.
///
/// A face whose padded box falls entirely outside the frame yields a 1x1
/// blank thumbnail so gallery indices keep lining up with `faces`.
pub fn extract_gallery_frames(frame: &VisionFrame, faces: &[Face]) -> Vec<VisionFrame> {
    faces
        .iter()
        .map(|face| {
            crop_face(frame, &face.bounding_box)
                .unwrap_or_else(|| VisionFrame::blank(1, 1, frame.channels()))
        })
        .collect()
}

fn crop_face(frame: &VisionFrame, bbox: &BoundingBox) -> Option<VisionFrame> {
    let start_x = bbox.x.trunc();
    let start_y = bbox.y.trunc();
    let end_x = bbox.right().trunc();
    let end_y = bbox.bottom().trunc();

    let pad_x = ((end_x - start_x) * CROP_PADDING).trunc();
    let pad_y = ((end_y - start_y) * CROP_PADDING).trunc();

    // `as u32` saturates: negatives clamp to 0, the far edge clamps in `crop`.
    frame.crop(
        (start_x - pad_x) as u32,
        (start_y - pad_y) as u32,
        (end_x + pad_x) as u32,
        (end_y + pad_y) as u32,
    )
}
