//! Collision world holding the static level geometry.
//!
//! Geometry is a flat list of brushes. Queries test every brush whose
//! contents intersect the query mask; levels are small enough that no
//! broad phase is needed.

use glam::{Quat, Vec3};
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, Ray};
use parry3d::shape::SharedShape;

use super::flags::ContentFlags;
use super::trace::{TraceResult, TraceShape};

/// Gap kept between a pushed-out shape and the surface it was pushed from.
const PENETRATION_SKIN: f32 = 0.001;

/// Bisection steps used to locate the impact along a trace.
const TRACE_ITERATIONS: usize = 12;

/// Half thickness of ramp slabs.
const RAMP_HALF_THICKNESS: f32 = 0.25;

/// A piece of collision geometry.
#[derive(Clone)]
pub struct CollisionBrush {
    pub id: u32,
    pub shape: SharedShape,
    /// World placement.
    pub transform: Isometry<Real>,
    pub contents: ContentFlags,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

/// The collision world.
///
/// Supports axis-aligned boxes, oriented boxes and ramps. Immutable during a
/// tick, so it can be shared by every character being simulated.
#[derive(Debug, Default, Clone)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        self.add_oriented_box(center, half_extents, Quat::IDENTITY, contents)
    }

    /// Add a box rotated by `rotation` about its centre.
    pub fn add_oriented_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        contents: ContentFlags,
    ) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let axis_angle = rotation.to_scaled_axis();
        let transform = Isometry::new(
            Vector::new(center.x, center.y, center.z),
            Vector::new(axis_angle.x, axis_angle.y, axis_angle.z),
        );
        self.push_brush(shape, transform, contents)
    }

    /// Add a ramp slab whose top surface passes through `surface_center`.
    ///
    /// The surface is tilted `angle` degrees from flat and rises toward -Z,
    /// so its normal is `(0, cos(angle), sin(angle))` and things slide off
    /// it toward +Z. `half_width` runs along X, `half_length` along the
    /// slope.
    pub fn add_ramp(
        &mut self,
        surface_center: Vec3,
        half_width: f32,
        half_length: f32,
        angle: f32,
        contents: ContentFlags,
    ) -> u32 {
        let rotation = Quat::from_rotation_x(angle.to_radians());
        let normal = rotation * Vec3::Y;
        let center = surface_center - normal * RAMP_HALF_THICKNESS;
        self.add_oriented_box(
            center,
            Vec3::new(half_width, RAMP_HALF_THICKNESS, half_length),
            rotation,
            contents,
        )
    }

    fn push_brush(&mut self, shape: SharedShape, transform: Isometry<Real>, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
        });
        id
    }

    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Sweep `shape` from `start` to `end` (shape centres).
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: ContentFlags) -> TraceResult {
        let delta = end - start;
        let distance = delta.length();

        // No movement, just check the position
        if distance < 0.0001 {
            return if self.point_in_solid(start, shape, mask) {
                TraceResult::wedged(start)
            } else {
                TraceResult::clear(start)
            };
        }

        self.trace_bisect(start, end, shape, mask, delta / distance)
    }

    /// Cast a ray and return the nearest hit within `max_distance`.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: ContentFlags) -> TraceResult {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance <= 0.0 {
            return TraceResult::clear(origin);
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, &CollisionBrush)> = None;
        for brush in self.brushes.iter().filter(|brush| mask.intersects(brush.contents)) {
            let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) else {
                continue;
            };
            if closest.map_or(true, |(best, _)| toi < best) {
                closest = Some((toi, brush));
            }
        }

        match closest {
            Some((distance, brush)) => TraceResult::blocked(
                distance / max_distance,
                origin + dir * distance,
                ray_hit_normal(&ray, distance, brush),
                brush.contents,
            ),
            None => TraceResult::clear(origin + dir * max_distance),
        }
    }

    /// Whether `shape` centred at `position` overlaps any masked geometry.
    pub fn point_in_solid(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> bool {
        let test_shape = shape.to_parry();
        let test_transform = shape_transform(position);

        self.brushes
            .iter()
            .filter(|brush| mask.intersects(brush.contents))
            .any(|brush| {
                matches!(
                    contact(
                        &test_transform,
                        test_shape.as_ref(),
                        &brush.transform,
                        brush.shape.as_ref(),
                        0.0,
                    ),
                    Ok(Some(_))
                )
            })
    }

    /// Push `shape` out of any geometry it overlaps. Returns the corrected
    /// centre.
    pub fn resolve_penetration(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> Vec3 {
        let test_shape = shape.to_parry();
        let test_transform = shape_transform(position);

        let mut correction = Vec3::ZERO;
        for brush in self.brushes.iter().filter(|brush| mask.intersects(brush.contents)) {
            let Ok(Some(hit)) = contact(
                &test_transform,
                test_shape.as_ref(),
                &brush.transform,
                brush.shape.as_ref(),
                0.0,
            ) else {
                continue;
            };

            // normal2 points out of the brush, toward the shape
            let normal = Vec3::new(hit.normal2.x, hit.normal2.y, hit.normal2.z);
            let depth = -hit.dist;
            if depth > 0.0 {
                correction += normal * (depth + PENETRATION_SKIN);
            }
        }

        position + correction
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    /// Bisect along the path for the last clear position.
    fn trace_bisect(
        &self,
        start: Vec3,
        end: Vec3,
        shape: TraceShape,
        mask: ContentFlags,
        direction: Vec3,
    ) -> TraceResult {
        let started_in_solid = self.point_in_solid(start, shape, mask);

        if !self.point_in_solid(end, shape, mask) {
            return TraceResult {
                started_in_solid,
                ..TraceResult::clear(end)
            };
        }

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        for _ in 0..TRACE_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            if self.point_in_solid(start + (end - start) * mid, shape, mask) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        // The push-out direction at the first blocked sample is the surface normal
        let blocked = start + (end - start) * hi;
        let push = self.resolve_penetration(blocked, shape, mask) - blocked;
        let hit_normal = if push.length_squared() > 1e-10 {
            push.normalize()
        } else {
            let horizontal = Vec3::new(-direction.x, 0.0, -direction.z);
            if horizontal.length_squared() > 0.1 {
                horizontal.normalize()
            } else {
                -direction
            }
        };

        TraceResult {
            started_in_solid,
            all_solid: started_in_solid && lo < 0.001,
            ..TraceResult::blocked(lo, start + (end - start) * lo, hit_normal, ContentFlags::SOLID)
        }
    }
}

fn shape_transform(position: Vec3) -> Isometry<Real> {
    Isometry::translation(position.x, position.y, position.z)
}

fn ray_hit_normal(ray: &Ray, toi: f32, brush: &CollisionBrush) -> Vec3 {
    match brush
        .shape
        .cast_ray_and_get_normal(&brush.transform, ray, toi + 0.01, true)
    {
        Some(intersection) => Vec3::new(intersection.normal.x, intersection.normal.y, intersection.normal.z),
        None => -Vec3::new(ray.dir.x, ray.dir.y, ray.dir.z).normalize_or_zero(),
    }
}

// ============================================================================
// Tests
// ============================================================================
