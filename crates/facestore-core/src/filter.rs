//! Candidate face ordering and attribute filters.

use crate::config::{FaceSelectorOrder, SelectorConfig};
use crate::types::Face;
use std::cmp::Ordering;

/// Order `faces` by the configured order, then drop faces that fail the
/// gender, race or age filters.
///
/// Faces without an attribute are dropped when that attribute is filtered on.
pub fn sort_and_filter_faces(mut faces: Vec<Face>, config: &SelectorConfig) -> Vec<Face> {
    sort_faces(&mut faces, config.order);
    faces.retain(|face| passes_filters(face, config));
    faces
}

pub fn sort_faces(faces: &mut [Face], order: FaceSelectorOrder) {
    let key: fn(&Face) -> f32 = match order {
        FaceSelectorOrder::LeftRight => |f| f.bounding_box.x,
        FaceSelectorOrder::RightLeft => |f| -f.bounding_box.x,
        FaceSelectorOrder::TopBottom => |f| f.bounding_box.y,
        FaceSelectorOrder::BottomTop => |f| -f.bounding_box.y,
        FaceSelectorOrder::SmallLarge => |f| f.bounding_box.area(),
        FaceSelectorOrder::LargeSmall => |f| -f.bounding_box.area(),
        FaceSelectorOrder::BestWorst => |f| -f.score(),
        FaceSelectorOrder::WorstBest => |f| f.score(),
    };
    // Stable, so equal keys keep detector order.
    faces.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
}

fn passes_filters(face: &Face, config: &SelectorConfig) -> bool {
    if config.gender.is_some() && face.gender != config.gender {
        return false;
    }
    if config.race.is_some() && face.race != config.race {
        return false;
    }
    if config.age_start.is_some() || config.age_end.is_some() {
        let Some(age) = face.age else {
            return false;
        };
        let start = config.age_start.unwrap_or(u8::MIN);
        let end = config.age_end.unwrap_or(u8::MAX);
        if age < start || age > end {
            return false;
        }
    }
    true
}
