//! Vertical motion integration.
//!
//! Owns the vertical velocity: ground bias, jump impulse, gravity and the
//! terminal fall speed. A jump request while sliding is dropped, not queued.

/// Downward velocity held while grounded so contact stays stable.
pub const GROUND_BIAS: f32 = -2.0;

/// Take-off speed that peaks at `height` under constant `gravity`.
#[inline]
pub fn jump_velocity(height: f32, gravity: f32) -> f32 {
    (2.0 * height * gravity).sqrt()
}

/// Vertical integration parameters that do not change per frame.
#[derive(Debug, Clone, Copy)]
pub struct VerticalParams {
    pub jump_height: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
}

/// Integrate vertical velocity for one frame.
///
/// - Grounded and sliding: ground bias, jump ignored.
/// - Grounded: jump impulse if requested, otherwise ground bias.
/// - Airborne: gravity, clamped to the terminal fall speed.
pub fn integrate_vertical(
    velocity_y: f32,
    delta_time: f32,
    grounded: bool,
    sliding: bool,
    jump_requested: bool,
    params: VerticalParams,
) -> f32 {
    if grounded {
        if jump_requested && !sliding {
            jump_velocity(params.jump_height, params.gravity)
        } else {
            GROUND_BIAS
        }
    } else {
        (velocity_y - params.gravity * delta_time).max(-params.max_fall_speed)
    }
}
