//! Interfaces the controller drives each frame.
//!
//! The controller never discovers its collaborators; they are passed into
//! every tick. Anything that implements these traits can host a character:
//! the bundled [`KinematicBody`](crate::KinematicBody), an engine binding,
//! or a scripted fake in tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::FrameInput;

/// Result of asking the collision engine to move the capsule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Displacement actually achieved after overlap resolution.
    pub displacement: Vec3,
    /// Whether the capsule ended the move on walkable ground.
    pub grounded: bool,
}

/// Nearest hit of a raycast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the hit.
    pub distance: f32,
    /// Surface normal at the hit, pointing away from the surface.
    pub normal: Vec3,
}

/// Produces one input snapshot per frame.
pub trait InputSource {
    fn sample(&mut self) -> FrameInput;
}

impl InputSource for FrameInput {
    fn sample(&mut self) -> FrameInput {
        *self
    }
}

/// The physics side of the character: a capsule that can be moved and a
/// world that can be raycast.
pub trait CollisionEngine {
    /// Character transform origin (capsule centre).
    fn position(&self) -> Vec3;

    /// Move the capsule by `displacement`, resolving overlaps.
    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome;

    /// Cast a ray and return the nearest hit within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Current capsule height.
    fn capsule_height(&self) -> f32;

    /// Resize the capsule.
    fn set_capsule_height(&mut self, height: f32);

    /// Rotate the character transform about world up (degrees).
    fn rotate_body(&mut self, yaw_delta: f32);
}

/// Receives camera framing each frame.
pub trait CameraSink {
    /// Camera position relative to the character transform.
    fn set_local_offset(&mut self, offset: Vec3);

    /// Camera pitch relative to the body (degrees, positive looks down).
    fn set_local_pitch(&mut self, pitch: f32);

    /// Vertical field of view (degrees).
    fn set_field_of_view(&mut self, fov: f32);
}
