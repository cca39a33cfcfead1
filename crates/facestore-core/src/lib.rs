//! facestore-core: static face cache and dual-slot reference face registry.
//!
//! Detections are cached per frame content (SHA-256 of the raw bytes), and
//! reference faces picked by the user are tracked for two independent slots,
//! each with its own registry, selection gallery and persisted frame map.

pub mod config;
pub mod detector;
pub mod face_store;
pub mod filter;
pub mod frame;
pub mod frame_refs;
pub mod gallery;
pub mod matching;
pub mod reference_faces;
pub mod reference_selector;
pub mod selection;
pub mod slot;
pub mod source;
pub mod state;
pub mod static_faces;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{FaceSelectorMode, FaceSelectorOrder, SelectorConfig};
pub use detector::{DetectError, FaceDetector, PreviewRenderer};
pub use face_store::FaceStore;
pub use frame::{frame_hash, FrameHash, VisionFrame};
pub use frame_refs::FrameReferenceMap;
pub use reference_selector::{ReferenceSelector, SelectionUpdate, Update};
pub use selection::SelectionTracker;
pub use slot::{Slot, Slotted};
pub use source::{FrameSource, ImageFrameSource};
pub use state::{MemoryStateStore, StateStore};
pub use types::{BoundingBox, Embedding, Face};
