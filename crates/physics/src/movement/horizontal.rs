//! Horizontal motion resolution.
//!
//! Turns body-relative move input into a horizontal displacement request.
//! On steep ground the input is replaced by a downslope slide with
//! half-strength side steering.

use glam::{Vec2, Vec3};

use super::slope::surface_angle;

/// Fraction of strafe input kept as steering while sliding.
pub const SLIDE_STEER_FACTOR: f32 = 0.5;

/// Slide parameters that do not change per frame.
#[derive(Debug, Clone, Copy)]
pub struct SlideParams {
    pub max_slope_angle: f32,
    pub base_slide_speed: f32,
    pub max_slide_speed: f32,
}

/// Resolved horizontal request for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalMove {
    /// Displacement to hand to the collision engine.
    pub displacement: Vec3,
    /// Slide vectors, present only while sliding.
    pub slide: Option<SlideVectors>,
}

/// Intermediate slide vectors, reported for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVectors {
    pub downslope: Vec3,
    pub steered: Vec3,
    pub speed: f32,
}

/// Slide speed on a slope of `slope_angle` degrees.
///
/// Blends linearly from the base speed at the walkable limit to the max
/// speed on vertical ground.
pub fn slide_speed(slope_angle: f32, params: SlideParams) -> f32 {
    let span = 90.0 - params.max_slope_angle;
    let t = if span > 0.0 {
        ((slope_angle - params.max_slope_angle) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    params.base_slide_speed + (params.max_slide_speed - params.base_slide_speed) * t
}

/// Direction straight down the slope with the given normal.
pub fn downslope_direction(normal: Vec3) -> Vec3 {
    Vec3::NEG_Y.reject_from(normal).normalize_or_zero()
}

/// Resolve this frame's horizontal displacement.
///
/// `slope_normal` is only consulted when `sliding` is set; a sliding frame
/// without a normal falls back to regular movement.
#[allow(clippy::too_many_arguments)]
pub fn resolve_horizontal(
    forward: Vec3,
    right: Vec3,
    move_input: Vec2,
    speed: f32,
    sliding: bool,
    slope_normal: Option<Vec3>,
    delta_time: f32,
    params: SlideParams,
) -> HorizontalMove {
    let base_direction = right * move_input.x + forward * move_input.y;

    let normal = match (sliding, slope_normal) {
        (true, Some(normal)) => normal,
        _ => {
            return HorizontalMove {
                displacement: base_direction * speed * delta_time,
                slide: None,
            };
        }
    };

    let speed = slide_speed(surface_angle(normal), params);
    let downslope = downslope_direction(normal);
    let steering = right * move_input.x * SLIDE_STEER_FACTOR;
    let steered = (downslope + steering).normalize_or_zero();

    HorizontalMove {
        displacement: steered * speed * delta_time,
        slide: Some(SlideVectors {
            downslope,
            steered,
            speed,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::test_support::slope_normal;

    const PARAMS: SlideParams = SlideParams {
        max_slope_angle: 35.0,
        base_slide_speed: 12.0,
        max_slide_speed: 18.0,
    };

    #[test]
    fn test_slide_speed_blend() {
        let speed = slide_speed(60.0, PARAMS);
        let expected = 12.0 + 6.0 * (25.0 / 55.0);
        assert!((speed - expected).abs() < 1e-3, "got {}", speed);
        assert!((speed - 14.7273).abs() < 1e-3);
    }

    #[test]
    fn test_slide_speed_clamped() {
        assert_eq!(slide_speed(35.0, PARAMS), 12.0);
        assert_eq!(slide_speed(20.0, PARAMS), 12.0);
        assert_eq!(slide_speed(90.0, PARAMS), 18.0);
        assert_eq!(slide_speed(120.0, PARAMS), 18.0);
    }

    #[test]
    fn test_walk_displacement_is_body_relative() {
        let forward = Vec3::X;
        let right = Vec3::Z;

        let result = resolve_horizontal(forward, right, Vec2::new(0.0, 1.0), 4.0, false, None, 0.5, PARAMS);

        assert!((result.displacement - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!(result.slide.is_none());
    }

    #[test]
    fn test_walk_ignores_slope_when_not_sliding() {
        let result = resolve_horizontal(
            Vec3::NEG_Z,
            Vec3::X,
            Vec2::new(1.0, 0.0),
            4.5,
            false,
            Some(slope_normal(60.0)),
            1.0,
            PARAMS,
        );
        assert!((result.displacement - Vec3::new(4.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_downslope_direction() {
        let direction = downslope_direction(slope_normal(60.0));
        // Normal faces +Z so the slope falls toward +Z
        assert!(direction.y < 0.0);
        assert!(direction.z > 0.0);
        assert!(direction.x.abs() < 1e-6);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.dot(slope_normal(60.0)).abs() < 1e-5, "must lie in the slope plane");
    }

    #[test]
    fn test_slide_overrides_input() {
        let normal = slope_normal(60.0);
        let result = resolve_horizontal(Vec3::NEG_Z, Vec3::X, Vec2::new(0.0, 1.0), 4.5, true, Some(normal), 0.1, PARAMS);

        let slide = result.slide.expect("sliding frame must report slide vectors");
        assert!((slide.speed - 14.7273).abs() < 1e-3);
        // Forward input does not fight the slide
        assert!((slide.steered - slide.downslope).length() < 1e-5);
        assert!((result.displacement.length() - slide.speed * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_slide_side_steering() {
        let normal = slope_normal(60.0);
        let result = resolve_horizontal(Vec3::NEG_Z, Vec3::X, Vec2::new(1.0, 0.0), 4.5, true, Some(normal), 1.0, PARAMS);

        let slide = result.slide.expect("sliding");
        let expected = (slide.downslope + Vec3::X * SLIDE_STEER_FACTOR).normalize();
        assert!((slide.steered - expected).length() < 1e-5);
        assert!(slide.steered.x > 0.0, "strafe right steers right");
        assert!((result.displacement.length() - slide.speed).abs() < 1e-3);
    }

    #[test]
    fn test_sliding_without_normal_walks() {
        let result = resolve_horizontal(Vec3::NEG_Z, Vec3::X, Vec2::new(0.0, 1.0), 2.0, true, None, 1.0, PARAMS);
        assert!(result.slide.is_none());
        assert!((result.displacement - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }
}
