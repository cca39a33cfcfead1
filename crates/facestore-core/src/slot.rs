use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two parallel reference contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    /// State store key holding this slot's frame reference map.
    pub fn frame_references_key(self) -> &'static str {
        match self {
            Slot::Primary => "reference_faces.primary",
            Slot::Secondary => "reference_faces.secondary",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Primary => write!(f, "primary"),
            Slot::Secondary => write!(f, "secondary"),
        }
    }
}

/// A pair of values, one per [`Slot`], structurally mirrored but never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slotted<T> {
    pub primary: T,
    pub secondary: T,
}

impl<T> Slotted<T> {
    pub fn new(primary: T, secondary: T) -> Self {
        Self { primary, secondary }
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(Slot, &mut T)) {
        f(Slot::Primary, &mut self.primary);
        f(Slot::Secondary, &mut self.secondary);
    }
}

impl<T> Index<Slot> for Slotted<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }
}

impl<T> IndexMut<Slot> for Slotted<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }
}
