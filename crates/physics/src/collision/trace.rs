//! Sweep and ray results, and the shapes that can be swept.

use glam::Vec3;
use parry3d::shape::SharedShape;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Radius used when a point has to be tested as a solid.
const POINT_PROBE_RADIUS: f32 = 0.001;

/// Outcome of a sweep or raycast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Share of the requested path travelled before contact, in [0, 1].
    pub fraction: f32,

    /// Shape centre (or ray point) where the query stopped.
    pub end_position: Vec3,

    /// Normal of the blocking surface, facing the query. Unset on a clear
    /// path.
    pub hit_normal: Option<Vec3>,

    pub hit_contents: ContentFlags,

    /// The shape already overlapped something where it started.
    pub started_in_solid: bool,

    /// Overlapping at the start and unable to move.
    pub all_solid: bool,
}

impl TraceResult {
    /// Nothing in the way; the query reached `end_position`.
    pub fn clear(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_contents: ContentFlags::EMPTY,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Stopped by `contents` at `fraction` of the path.
    pub fn blocked(fraction: f32, end_position: Vec3, normal: Vec3, contents: ContentFlags) -> Self {
        Self {
            fraction,
            end_position,
            hit_normal: Some(normal),
            hit_contents: contents,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Stuck inside geometry at `position`.
    pub fn wedged(position: Vec3) -> Self {
        Self {
            started_in_solid: true,
            all_solid: true,
            ..Self::blocked(0.0, position, Vec3::Y, ContentFlags::SOLID)
        }
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.fraction < 1.0
    }

    /// Blocking surface normal; up when there was none.
    #[inline]
    pub fn surface_normal(&self) -> Vec3 {
        self.hit_normal.unwrap_or(Vec3::Y)
    }
}

/// Shape swept through the world. Queries take the shape's centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// Upright capsule; `height` runs from the bottom of one cap to the top
    /// of the other.
    Capsule { radius: f32, height: f32 },

    Point,
}

impl TraceShape {
    pub const CHARACTER_STANDING: Self = Self::Capsule {
        radius: 0.4,
        height: 1.8,
    };

    pub const CHARACTER_CROUCHING: Self = Self::Capsule {
        radius: 0.4,
        height: 1.0,
    };

    pub fn radius(&self) -> f32 {
        match *self {
            Self::Capsule { radius, .. } => radius,
            Self::Point => 0.0,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            Self::Capsule { height, .. } => height,
            Self::Point => 0.0,
        }
    }

    /// Distance from the centre down to the lowest point.
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height() / 2.0
    }

    /// Parry shape centred on the origin.
    pub fn to_parry(self) -> SharedShape {
        match self {
            Self::Capsule { radius, height } => {
                // Parry's half height covers the straight section only
                let segment_half = (height - 2.0 * radius).max(0.0) / 2.0;
                SharedShape::capsule_y(segment_half, radius)
            }
            Self::Point => SharedShape::ball(POINT_PROBE_RADIUS),
        }
    }
}
