//! Configuration errors.

use thiserror::Error;

/// Reasons a [`LocomotionConfig`](crate::LocomotionConfig) is rejected.
///
/// Any of these makes crouch or slide geometry incoherent, so the controller
/// refuses to start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("crouching height {crouching} must be lower than standing height {standing}")]
    CrouchNotLowerThanStanding { crouching: f32, standing: f32 },

    #[error("`{field}` range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("max walkable slope angle must be within [0, 90) degrees, got {0}")]
    SlopeAngleOutOfRange(f32),

    #[error("at least one slope probe offset is required")]
    NoSlopeProbes,
}
