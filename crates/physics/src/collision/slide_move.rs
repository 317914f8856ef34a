//! Slide move for collision response.
//!
//! Sweeps a shape along a displacement. When it hits something, the rest of
//! the displacement is clipped to slide along the surface and the sweep
//! continues, so walls deflect instead of stopping. Floors are handled
//! differently: the horizontal part of the motion is kept and made to
//! follow the surface, so walkable ramps are climbed by walking into them
//! and pressing down onto one does not creep downhill.

use glam::Vec3;

use super::trace::TraceShape;
use super::world::CollisionWorld;
use super::flags::ContentFlags;

/// Maximum number of surfaces handled in one move.
pub const MAX_CLIP_PLANES: usize = 5;

/// Slight push away from clipped surfaces so the next sweep does not start
/// touching them.
pub const OVERCLIP: f32 = 1.001;

/// Remove the part of `motion` going into a surface.
///
/// `overbounce` above 1 pushes slightly off the surface.
pub fn clip_velocity(motion: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = motion.dot(normal);
    let adjusted = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };
    motion - normal * adjusted
}

/// Outcome of a slide move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideResult {
    /// Final shape centre.
    pub position: Vec3,
    /// Normals of every surface touched, in hit order.
    pub touched: Vec<Vec3>,
    /// The shape was wedged and could not move.
    pub stuck: bool,
}

impl SlideResult {
    /// The most upward-facing surface touched, if any faces up more than
    /// `min_normal_y`.
    pub fn floor_normal(&self, min_normal_y: f32) -> Option<Vec3> {
        self.touched
            .iter()
            .copied()
            .filter(|normal| normal.y > min_normal_y)
            .max_by(|a, b| a.y.total_cmp(&b.y))
    }
}

/// Project `motion` onto a walkable floor, keeping its horizontal part.
pub fn follow_floor(motion: Vec3, normal: Vec3) -> Vec3 {
    let rise = -(normal.x * motion.x + normal.z * motion.z) / normal.y;
    Vec3::new(motion.x, rise, motion.z)
}

/// Sweep `shape` from `start` along `displacement`, sliding along whatever
/// it hits. Surfaces whose normal faces up at least `min_floor_normal_y`
/// count as floors.
pub fn slide_move(
    world: &CollisionWorld,
    start: Vec3,
    displacement: Vec3,
    shape: TraceShape,
    mask: ContentFlags,
    min_floor_normal_y: f32,
) -> SlideResult {
    let mut result = SlideResult {
        position: start,
        ..Default::default()
    };
    let mut remaining = displacement;

    for _ in 0..MAX_CLIP_PLANES {
        if remaining.length_squared() < 1e-10 {
            break;
        }

        let trace = world.trace(result.position, result.position + remaining, shape, mask);
        if trace.all_solid {
            result.stuck = true;
            break;
        }

        result.position = trace.end_position;
        if !trace.is_blocked() {
            break;
        }

        let normal = trace.surface_normal();
        result.touched.push(normal);
        remaining *= 1.0 - trace.fraction;

        match clip_against(remaining, &result.touched, min_floor_normal_y) {
            Some(clipped) => remaining = clipped,
            None => break,
        }
    }

    result
}

/// Clip `motion` so it goes into none of `planes`.
///
/// Tries each plane on its own, then the crease of the first two. Returns
/// `None` when the shape is boxed in.
fn clip_against(motion: Vec3, planes: &[Vec3], min_floor_normal_y: f32) -> Option<Vec3> {
    for (i, plane) in planes.iter().enumerate() {
        let clipped = if plane.y >= min_floor_normal_y {
            follow_floor(motion, *plane)
        } else {
            clip_velocity(motion, *plane, OVERCLIP)
        };
        let valid = planes
            .iter()
            .enumerate()
            .all(|(j, other)| i == j || clipped.dot(*other) >= -0.01);
        if valid {
            return Some(clipped);
        }
    }

    if planes.len() >= 2 {
        let crease = planes[0].cross(planes[1]).normalize_or_zero();
        let along = crease * motion.dot(crease);
        if along.dot(planes[0]) >= -0.01 && along.dot(planes[1]) >= -0.01 {
            return Some(along);
        }
    }

    None
}
