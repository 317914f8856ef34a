//! Camera presentation smoothing.
//!
//! Capsule height, camera offset and field of view each chase their target
//! with `lerp(current, target, dt * rate)`. The blend factor is clamped to
//! [0, 1] so a long frame lands on the target instead of overshooting.

use glam::Vec3;

use super::config::LocomotionConfig;
use super::state::LocomotionState;

/// Blend factor for one frame at the given rate.
#[inline]
pub fn blend_factor(delta_time: f32, rate: f32) -> f32 {
    (delta_time * rate).clamp(0.0, 1.0)
}

/// Scalar linear interpolation. A full blend returns the target exactly.
#[inline]
pub fn lerp(current: f32, target: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return target;
    }
    current + (target - current) * t
}

/// Vector counterpart of [`lerp`].
#[inline]
pub fn lerp_vec3(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 {
        return target;
    }
    current + (target - current) * t
}

/// Advance the three presentation quantities by one frame.
///
/// Selects the target FOV from the current flags first. The FOV follows
/// the sprint button even while crouched; only speed gives way to crouch.
pub fn update_presentation(state: &mut LocomotionState, config: &LocomotionConfig, delta_time: f32) {
    state.target_fov = config.target_fov(state.sliding(), state.flags.sprint_held(), state.crouching());

    let crouch_t = blend_factor(delta_time, config.crouch_transition_rate);
    let fov_t = blend_factor(delta_time, config.fov_transition_rate);

    state.capsule_height = lerp(state.capsule_height, state.target_height, crouch_t);
    state.camera_offset = lerp_vec3(state.camera_offset, state.target_camera_offset, crouch_t);
    state.fov = lerp(state.fov, state.target_fov, fov_t);
}
