//! Content flags for collision filtering.

use serde::{Deserialize, Serialize};

/// What kind of volume a piece of geometry is.
///
/// Queries carry a mask and only see geometry whose contents intersect it,
/// so a character can walk through triggers while its probes still see
/// walls and floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry: walls, floors, ramps, ceilings.
    pub const SOLID: Self = Self(1 << 0);

    /// Blocks characters but not rays fired by other systems.
    pub const CHARACTER_CLIP: Self = Self(1 << 1);

    /// Volume that reports overlap but never blocks.
    pub const TRIGGER: Self = Self(1 << 2);

    /// Mask for character moves and probes.
    pub const MASK_CHARACTER: Self = Self(Self::SOLID.0 | Self::CHARACTER_CLIP.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
