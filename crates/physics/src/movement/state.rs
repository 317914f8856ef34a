//! Locomotion state and per-frame input structures.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::LocomotionConfig;
use super::crouch::Stance;

/// Flags describing the character's current locomotion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags(pub u16);

impl MovementFlags {
    /// Character is touching walkable ground.
    pub const ON_GROUND: u16 = 1 << 0;

    /// Character is being carried down a slope steeper than walkable.
    pub const SLIDING: u16 = 1 << 1;

    /// Character is crouching.
    pub const CROUCHING: u16 = 1 << 2;

    /// Character is sprinting (sprint held while standing).
    pub const SPRINTING: u16 = 1 << 3;

    /// Character left the ground through a jump and has not landed yet.
    pub const JUMPING: u16 = 1 << 4;

    /// Sprint button is down, whatever the stance.
    pub const SPRINT_HELD: u16 = 1 << 5;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u16, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    /// Check if the character is on the ground.
    #[inline]
    pub fn on_ground(self) -> bool {
        self.has(Self::ON_GROUND)
    }

    /// Check if the character is sliding.
    #[inline]
    pub fn sliding(self) -> bool {
        self.has(Self::SLIDING)
    }

    /// Check if the character is crouching.
    #[inline]
    pub fn crouching(self) -> bool {
        self.has(Self::CROUCHING)
    }

    /// Check if the character is sprinting.
    #[inline]
    pub fn sprinting(self) -> bool {
        self.has(Self::SPRINTING)
    }

    /// Check if sprint is held. Crouching does not clear this.
    #[inline]
    pub fn sprint_held(self) -> bool {
        self.has(Self::SPRINT_HELD)
    }

    /// Check if the character is mid-jump.
    #[inline]
    pub fn jumping(self) -> bool {
        self.has(Self::JUMPING)
    }
}

/// Complete locomotion state for one character.
///
/// Created at spawn, mutated only by
/// [`LocomotionController`](super::LocomotionController), dropped with the
/// character. Angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Velocity in world space. Horizontal components are the last frame's
    /// horizontal displacement over its delta.
    pub velocity: Vec3,

    /// Locomotion flags.
    pub flags: MovementFlags,

    /// Crouch state machine position.
    pub stance: Stance,

    /// Currently selected locomotion speed.
    pub move_speed: f32,

    /// Interpolated capsule height.
    pub capsule_height: f32,

    /// Capsule height the interpolation is heading to.
    pub target_height: f32,

    /// Interpolated camera local offset.
    pub camera_offset: Vec3,

    /// Camera local offset the interpolation is heading to.
    pub target_camera_offset: Vec3,

    /// Interpolated field of view.
    pub fov: f32,

    /// Field of view the interpolation is heading to.
    pub target_fov: f32,

    /// Camera pitch, clamped to the configured look range.
    pub pitch: f32,

    /// Accumulated body yaw (unbounded).
    pub yaw: f32,

    /// Normal of the slope being slid on. `None` unless sliding.
    pub slope_normal: Option<Vec3>,

    /// Angle of the slope being slid on. Zero unless sliding.
    pub slope_angle: f32,
}

impl LocomotionState {
    /// Create the spawn state: standing, at rest, camera at its rest offset.
    pub fn spawn(config: &LocomotionConfig) -> Self {
        Self {
            velocity: Vec3::ZERO,
            flags: MovementFlags::default(),
            stance: Stance::Standing,
            move_speed: config.walk_speed,
            capsule_height: config.standing_height,
            target_height: config.standing_height,
            camera_offset: config.camera_offset,
            target_camera_offset: config.camera_target(config.standing_height),
            fov: config.default_fov,
            target_fov: config.default_fov,
            pitch: 0.0,
            yaw: 0.0,
            slope_normal: None,
            slope_angle: 0.0,
        }
    }

    /// Check if the character is grounded.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.flags.on_ground()
    }

    /// Check if the character is sliding.
    #[inline]
    pub fn sliding(&self) -> bool {
        self.flags.sliding()
    }

    /// Check if the character is crouching.
    #[inline]
    pub fn crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }

    /// Body forward axis (horizontal). Yaw 0 faces -Z; positive yaw turns right.
    pub fn forward_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(sin_yaw, 0.0, -cos_yaw)
    }

    /// Body right axis (horizontal).
    pub fn right_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Full look direction including pitch (positive pitch looks down).
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        self.forward_direction() * cos_pitch - Vec3::Y * sin_pitch
    }

    /// Current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Input snapshot for a single frame.
///
/// Axis values are already sampled by the input-binding layer. Edge inputs
/// are true only on the frame the action fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Movement axis: x = strafe right, y = forward.
    pub move_axis: Vec2,

    /// Look axis: x = turn right, y = look up.
    pub look_axis: Vec2,

    /// Jump fired this frame.
    pub jump_triggered: bool,

    /// Sprint is held.
    pub sprint_held: bool,

    /// Crouch toggle fired this frame.
    pub crouch_triggered: bool,
}

impl FrameInput {
    /// Check if any movement input is active.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.move_axis.x.abs() > 0.01 || self.move_axis.y.abs() > 0.01
    }
}
