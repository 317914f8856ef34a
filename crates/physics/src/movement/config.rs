//! Locomotion configuration constants.
//!
//! All tuning parameters are grouped here. Defaults reproduce the feel of a
//! classic first-person character controller in metric units.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Horizontal spacing of the default slope probes around the base (meters).
pub const DEFAULT_PROBE_SPACING: f32 = 0.1;

/// Configuration for the locomotion controller.
///
/// Distances are meters, speeds meters/second, angles degrees.
/// Validate with [`LocomotionConfig::validate`] before use; the controller
/// does this on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Movement Speeds
    // ========================================================================
    /// Base walking speed.
    pub walk_speed: f32,

    /// Speed while crouched. Overrides sprint.
    pub crouch_speed: f32,

    /// Speed while sprint is held and standing.
    pub sprint_speed: f32,

    // ========================================================================
    // Capsule Heights
    // ========================================================================
    /// Standing capsule height.
    pub standing_height: f32,

    /// Crouching capsule height.
    pub crouching_height: f32,

    /// Interpolation rate for capsule height and camera offset (1/s).
    pub crouch_transition_rate: f32,

    // ========================================================================
    // Look
    // ========================================================================
    /// Look sensitivity (degrees per unit of look input per second).
    pub mouse_sensitivity: f32,

    /// Lowest camera pitch (looking up).
    pub min_look_angle: f32,

    /// Highest camera pitch (looking down).
    pub max_look_angle: f32,

    // ========================================================================
    // Camera
    // ========================================================================
    /// Field of view when walking.
    pub default_fov: f32,

    /// Field of view when sprinting or sliding.
    pub sprint_fov: f32,

    /// Field of view when crouched.
    pub crouch_fov: f32,

    /// Field of view interpolation rate (1/s).
    pub fov_transition_rate: f32,

    /// Rest local offset of the camera. Only x and z are kept; y follows the
    /// capsule height.
    pub camera_offset: Vec3,

    // ========================================================================
    // Gravity
    // ========================================================================
    /// Peak height of a jump.
    pub jump_height: f32,

    /// Gravity magnitude (m/s²).
    pub gravity: f32,

    /// Terminal fall speed.
    pub max_fall_speed: f32,

    // ========================================================================
    // Slopes
    // ========================================================================
    /// Steepest walkable ground; anything steeper slides.
    pub max_slope_angle: f32,

    /// Slide speed at the walkable limit.
    pub base_slide_speed: f32,

    /// Slide speed on vertical ground.
    pub max_slide_speed: f32,

    /// Offsets from the character position that the slope probes start at.
    /// Probed in order; the first steep hit wins.
    pub slope_probe_offsets: Vec<Vec3>,

    /// Length of each downward slope probe.
    pub slope_probe_distance: f32,

    // ========================================================================
    // Frame
    // ========================================================================
    /// Longest frame delta integrated in one tick (seconds).
    pub max_frame_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.5,
            crouch_speed: 2.0,
            sprint_speed: 8.5,

            standing_height: 1.8,
            crouching_height: 1.0,
            crouch_transition_rate: 15.0,

            mouse_sensitivity: 25.0,
            min_look_angle: -90.0,
            max_look_angle: 90.0,

            default_fov: 65.0,
            sprint_fov: 75.0,
            crouch_fov: 65.0,
            fov_transition_rate: 15.0,
            camera_offset: Vec3::new(0.0, 0.9, 0.0),

            jump_height: 1.5,
            gravity: 35.0,
            max_fall_speed: 90.0,

            max_slope_angle: 35.0,
            base_slide_speed: 12.0,
            max_slide_speed: 18.0,
            slope_probe_offsets: default_probe_offsets(),
            slope_probe_distance: 1.5,

            max_frame_time: 0.1,
        }
    }
}

/// Centre probe, then right, left, forward, back. Forward is -Z. The order
/// matters: the first probe over a steep surface decides the slide.
pub fn default_probe_offsets() -> Vec<Vec3> {
    vec![
        Vec3::ZERO,
        Vec3::X * DEFAULT_PROBE_SPACING,
        Vec3::NEG_X * DEFAULT_PROBE_SPACING,
        Vec3::NEG_Z * DEFAULT_PROBE_SPACING,
        Vec3::Z * DEFAULT_PROBE_SPACING,
    ]
}

impl LocomotionConfig {
    /// Create a "fast arcade" config: quicker, floatier, wider FOV kick.
    pub fn arcade() -> Self {
        Self {
            walk_speed: 7.0,
            crouch_speed: 3.5,
            sprint_speed: 12.0,
            sprint_fov: 85.0,
            jump_height: 2.0,
            gravity: 28.0,
            base_slide_speed: 15.0,
            max_slide_speed: 24.0,
            ..Default::default()
        }
    }

    /// Create a "tactical" config: slower, heavier, no FOV kick.
    pub fn tactical() -> Self {
        Self {
            walk_speed: 3.5,
            crouch_speed: 1.5,
            sprint_speed: 5.5,
            sprint_fov: 65.0,
            jump_height: 0.9,
            gravity: 20.0,
            max_slope_angle: 40.0,
            base_slide_speed: 6.0,
            max_slide_speed: 10.0,
            crouch_transition_rate: 8.0,
            ..Default::default()
        }
    }

    /// Check that the configuration describes coherent geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("walk_speed", self.walk_speed),
            ("crouch_speed", self.crouch_speed),
            ("sprint_speed", self.sprint_speed),
            ("standing_height", self.standing_height),
            ("crouching_height", self.crouching_height),
            ("crouch_transition_rate", self.crouch_transition_rate),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("min_look_angle", self.min_look_angle),
            ("max_look_angle", self.max_look_angle),
            ("default_fov", self.default_fov),
            ("sprint_fov", self.sprint_fov),
            ("crouch_fov", self.crouch_fov),
            ("fov_transition_rate", self.fov_transition_rate),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("max_slope_angle", self.max_slope_angle),
            ("base_slide_speed", self.base_slide_speed),
            ("max_slide_speed", self.max_slide_speed),
            ("slope_probe_distance", self.slope_probe_distance),
            ("max_frame_time", self.max_frame_time),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if !self.camera_offset.is_finite() {
            return Err(ConfigError::NonFinite { field: "camera_offset" });
        }
        if self.slope_probe_offsets.iter().any(|offset| !offset.is_finite()) {
            return Err(ConfigError::NonFinite { field: "slope_probe_offsets" });
        }

        for (field, value) in [
            ("walk_speed", self.walk_speed),
            ("crouch_speed", self.crouch_speed),
            ("sprint_speed", self.sprint_speed),
            ("base_slide_speed", self.base_slide_speed),
            ("max_slide_speed", self.max_slide_speed),
            ("jump_height", self.jump_height),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("crouch_transition_rate", self.crouch_transition_rate),
            ("fov_transition_rate", self.fov_transition_rate),
        ] {
            require_non_negative(field, value)?;
        }

        for (field, value) in [
            ("standing_height", self.standing_height),
            ("crouching_height", self.crouching_height),
            ("default_fov", self.default_fov),
            ("sprint_fov", self.sprint_fov),
            ("crouch_fov", self.crouch_fov),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("slope_probe_distance", self.slope_probe_distance),
            ("max_frame_time", self.max_frame_time),
        ] {
            require_positive(field, value)?;
        }

        if self.crouching_height >= self.standing_height {
            return Err(ConfigError::CrouchNotLowerThanStanding {
                crouching: self.crouching_height,
                standing: self.standing_height,
            });
        }

        if self.min_look_angle > self.max_look_angle {
            return Err(ConfigError::InvertedRange {
                field: "look_angle",
                min: self.min_look_angle,
                max: self.max_look_angle,
            });
        }

        if self.base_slide_speed > self.max_slide_speed {
            return Err(ConfigError::InvertedRange {
                field: "slide_speed",
                min: self.base_slide_speed,
                max: self.max_slide_speed,
            });
        }

        // The slide blend divides by (90 - max_slope_angle)
        if !(0.0..90.0).contains(&self.max_slope_angle) {
            return Err(ConfigError::SlopeAngleOutOfRange(self.max_slope_angle));
        }

        if self.slope_probe_offsets.is_empty() {
            return Err(ConfigError::NoSlopeProbes);
        }

        Ok(())
    }

    /// Locomotion speed for the current stance and sprint input.
    ///
    /// Crouching wins over sprinting.
    pub fn speed_for(&self, is_crouching: bool, sprint_held: bool) -> f32 {
        if is_crouching {
            self.crouch_speed
        } else if sprint_held {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }

    /// Capsule height for the stance.
    pub fn height(&self, is_crouching: bool) -> f32 {
        if is_crouching {
            self.crouching_height
        } else {
            self.standing_height
        }
    }

    /// Camera local offset for a capsule of the given height.
    pub fn camera_target(&self, height: f32) -> Vec3 {
        Vec3::new(self.camera_offset.x, height / 2.0, self.camera_offset.z)
    }

    /// Field of view for the current movement flags.
    ///
    /// Sliding or sprinting beats crouching.
    pub fn target_fov(&self, is_sliding: bool, is_sprinting: bool, is_crouching: bool) -> f32 {
        if is_sliding || is_sprinting {
            self.sprint_fov
        } else if is_crouching {
            self.crouch_fov
        } else {
            self.default_fov
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LocomotionConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.slope_probe_offsets.len(), 5);
        assert_eq!(config.slope_probe_offsets[0], Vec3::ZERO);
        // Right, left, forward (-Z), back
        let spacing = DEFAULT_PROBE_SPACING;
        assert_eq!(
            config.slope_probe_offsets[1..],
            [Vec3::X * spacing, Vec3::NEG_X * spacing, Vec3::NEG_Z * spacing, Vec3::Z * spacing]
        );
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(LocomotionConfig::arcade().validate(), Ok(()));
        assert_eq!(LocomotionConfig::tactical().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_crouch_not_lower() {
        let config = LocomotionConfig {
            crouching_height: 1.8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchNotLowerThanStanding { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = LocomotionConfig {
            sprint_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "sprint_speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = LocomotionConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "gravity" })
        );
    }

    #[test]
    fn test_rejects_zero_gravity() {
        let config = LocomotionConfig {
            gravity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let look = LocomotionConfig {
            min_look_angle: 10.0,
            max_look_angle: -10.0,
            ..Default::default()
        };
        assert!(matches!(look.validate(), Err(ConfigError::InvertedRange { .. })));

        let slope = LocomotionConfig {
            max_slope_angle: 90.0,
            ..Default::default()
        };
        assert_eq!(slope.validate(), Err(ConfigError::SlopeAngleOutOfRange(90.0)));

        let probes = LocomotionConfig {
            slope_probe_offsets: Vec::new(),
            ..Default::default()
        };
        assert_eq!(probes.validate(), Err(ConfigError::NoSlopeProbes));
    }

    #[test]
    fn test_speed_for() {
        let config = LocomotionConfig::default();

        assert_eq!(config.speed_for(false, false), config.walk_speed);
        assert_eq!(config.speed_for(false, true), config.sprint_speed);
        assert_eq!(config.speed_for(true, false), config.crouch_speed);
        // Crouching overrides sprinting
        assert_eq!(config.speed_for(true, true), config.crouch_speed);
    }

    #[test]
    fn test_target_fov_priority() {
        let config = LocomotionConfig {
            crouch_fov: 60.0,
            ..Default::default()
        };

        assert_eq!(config.target_fov(true, false, true), config.sprint_fov);
        assert_eq!(config.target_fov(false, true, false), config.sprint_fov);
        assert_eq!(config.target_fov(false, false, true), 60.0);
        assert_eq!(config.target_fov(false, false, false), config.default_fov);
    }

    #[test]
    fn test_camera_target_keeps_horizontal_offset() {
        let config = LocomotionConfig {
            camera_offset: Vec3::new(0.1, 5.0, -0.2),
            ..Default::default()
        };
        let target = config.camera_target(1.0);
        assert_eq!(target, Vec3::new(0.1, 0.5, -0.2));
    }
}
