//! Vision frame type, content digests and crop extraction.

use ndarray::{s, ArrayView3};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// An in-memory raster frame: contiguous bytes in row-major
/// `height × width × channels` order.
///
/// The frame carries no identity beyond its bytes; two frames with the
/// same pixels are the same frame as far as the cache is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisionFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl VisionFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, FrameError> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(FrameError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// All-zero frame of the given shape.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize) * (channels as usize)],
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// True when every byte is zero (an empty placeholder frame).
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Borrow the pixels as an `(height, width, channels)` array view.
    pub fn as_ndarray(&self) -> Option<ArrayView3<'_, u8>> {
        ArrayView3::from_shape(self.shape(), &self.data).ok()
    }

    /// Copy out the pixels inside `[x0, x1) × [y0, y1)`, clamped to the frame.
    ///
    /// Returns `None` when the clamped region is empty.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<VisionFrame> {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let view = self.as_ndarray()?;
        let region = view.slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize, ..]);
        let data: Vec<u8> = region.iter().copied().collect();

        Some(VisionFrame {
            data,
            width: x1 - x0,
            height: y1 - y0,
            channels: self.channels,
        })
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

/// Hex-encoded SHA-256 digest of a frame's bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameHash(String);

impl FrameHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest a frame's raw bytes.
///
/// Returns `None` for a blank frame: there is nothing to key on, and blank
/// placeholders must never be cached.
pub fn frame_hash(frame: &VisionFrame) -> Option<FrameHash> {
    if frame.is_blank() {
        return None;
    }
    let digest = Sha256::digest(frame.data());
    Some(FrameHash(format!("{digest:x}")))
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
