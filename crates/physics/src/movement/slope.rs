//! Slope sampling.
//!
//! Casts short rays straight down from a handful of points around the
//! character to find ground steeper than walkable. The probes run in the
//! configured order and the first steep hit wins, so the result is
//! reproducible for a given probe layout.

use glam::Vec3;

use super::collaborators::CollisionEngine;
use super::diagnostics::{DiagnosticEvent, DiagnosticsSink};

/// Angle between world up and a surface normal, in degrees.
///
/// A degenerate normal counts as flat ground.
pub fn surface_angle(normal: Vec3) -> f32 {
    if normal.length_squared() < 1e-8 {
        return 0.0;
    }
    Vec3::Y.angle_between(normal).to_degrees()
}

/// Probe the ground below `position` for a slope steeper than
/// `max_walkable_angle`.
///
/// Returns the normal of the first probe whose hit angle is strictly greater
/// than the limit, or `None` when every probe misses or lands on walkable
/// ground. Only meaningful while grounded.
pub fn detect_slope<E, D>(
    engine: &E,
    position: Vec3,
    probe_offsets: &[Vec3],
    probe_distance: f32,
    max_walkable_angle: f32,
    diagnostics: &mut D,
) -> Option<Vec3>
where
    E: CollisionEngine + ?Sized,
    D: DiagnosticsSink + ?Sized,
{
    for offset in probe_offsets {
        let origin = position + *offset;

        let Some(hit) = engine.raycast(origin, Vec3::NEG_Y, probe_distance) else {
            diagnostics.record(DiagnosticEvent::SlopeProbe {
                origin,
                angle: None,
                steep: false,
            });
            continue;
        };

        let angle = surface_angle(hit.normal);
        let steep = angle > max_walkable_angle;
        diagnostics.record(DiagnosticEvent::SlopeProbe {
            origin,
            angle: Some(angle),
            steep,
        });

        if steep {
            return Some(hit.normal);
        }
    }

    None
}
