//! Kinematic capsule body.
//!
//! [`KinematicBody`] is the character's physical presence in a
//! [`CollisionWorld`]: an upright capsule that only moves when asked to.
//! Bind it to a world with [`KinematicBody::in_world`] to get a
//! [`CollisionEngine`] the locomotion controller can drive.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::movement::{CollisionEngine, MoveOutcome, RayHit};

use super::flags::ContentFlags;
use super::slide_move::slide_move;
use super::trace::TraceShape;
use super::world::CollisionWorld;

/// A touched surface counts as ground when its normal points at least this
/// far up. Steep ramps still qualify so the character can slide on them.
pub const GROUND_CONTACT_MIN_Y: f32 = 0.05;

/// Default floor threshold (about 45 degrees). Steeper surfaces deflect
/// moves like walls do.
pub const DEFAULT_MIN_FLOOR_NORMAL_Y: f32 = 0.7;

/// Gap left between the feet and the ground when placing a body.
const GROUND_SKIN: f32 = 0.001;

/// An upright capsule moved by explicit displacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Capsule centre.
    pub position: Vec3,
    /// Total capsule height.
    pub height: f32,
    pub radius: f32,
    /// Facing in degrees; 0 faces -Z, positive turns right.
    pub yaw: f32,
    /// Whether the last move ended touching ground.
    pub grounded: bool,
    /// Normal of the ground touched by the last move.
    pub ground_normal: Option<Vec3>,
    /// Surfaces facing up at least this much are floors the body can
    /// stand on without creeping.
    pub min_floor_normal_y: f32,
    /// What the body collides with.
    pub mask: ContentFlags,
}

impl KinematicBody {
    /// Create a body standing with its feet at `feet`.
    pub fn new(feet: Vec3, height: f32, radius: f32) -> Self {
        Self {
            position: feet + Vec3::Y * (height / 2.0),
            height,
            radius,
            yaw: 0.0,
            grounded: false,
            ground_normal: None,
            min_floor_normal_y: DEFAULT_MIN_FLOOR_NORMAL_Y,
            mask: ContentFlags::MASK_CHARACTER,
        }
    }

    /// Bottom of the capsule.
    pub fn feet_position(&self) -> Vec3 {
        self.position - Vec3::Y * (self.height / 2.0)
    }

    pub fn shape(&self) -> TraceShape {
        TraceShape::Capsule {
            radius: self.radius,
            height: self.height,
        }
    }

    /// Body orientation from its yaw.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Resize the capsule, keeping the feet where they are.
    pub fn resize(&mut self, height: f32) {
        let height = height.max(self.radius * 2.0);
        self.position.y += (height - self.height) / 2.0;
        self.height = height;
    }

    /// Drop the body straight down onto the ground below it, if there is
    /// any within `max_drop`. Returns whether ground was found.
    pub fn snap_to_ground(&mut self, world: &CollisionWorld, max_drop: f32) -> bool {
        let half_height = self.height / 2.0;
        let hit = world.raycast(self.position, Vec3::NEG_Y, half_height + max_drop, self.mask);
        if !hit.is_blocked() {
            return false;
        }

        self.position.y = hit.end_position.y + half_height + GROUND_SKIN;
        if world.point_in_solid(self.position, self.shape(), self.mask) {
            self.position = world.resolve_penetration(self.position, self.shape(), self.mask);
        }
        self.grounded = true;
        self.ground_normal = hit.hit_normal;
        true
    }

    /// Bind to a world for one tick.
    pub fn in_world<'a>(&'a mut self, world: &'a CollisionWorld) -> WorldBody<'a> {
        WorldBody { body: self, world }
    }
}

/// A [`KinematicBody`] bound to the world it moves through.
pub struct WorldBody<'a> {
    body: &'a mut KinematicBody,
    world: &'a CollisionWorld,
}

impl WorldBody<'_> {
    pub fn body(&self) -> &KinematicBody {
        self.body
    }
}

impl CollisionEngine for WorldBody<'_> {
    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn move_by(&mut self, displacement: Vec3) -> MoveOutcome {
        let start = self.body.position;
        let shape = self.body.shape();

        // A resize can leave the capsule overlapping; get clear first
        let mut position = start;
        if self.world.point_in_solid(position, shape, self.body.mask) {
            position = self.world.resolve_penetration(position, shape, self.body.mask);
        }

        let result = slide_move(
            self.world,
            position,
            displacement,
            shape,
            self.body.mask,
            self.body.min_floor_normal_y,
        );
        if result.stuck {
            log::debug!("body wedged at {:?}", position);
        }

        let ground_normal = result.floor_normal(GROUND_CONTACT_MIN_Y);
        self.body.position = result.position;
        self.body.grounded = ground_normal.is_some();
        self.body.ground_normal = ground_normal;

        MoveOutcome {
            displacement: result.position - start,
            grounded: self.body.grounded,
        }
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let trace = self.world.raycast(origin, direction, max_distance, self.body.mask);
        let normal = trace.hit_normal?;
        Some(RayHit {
            distance: trace.fraction * max_distance,
            normal,
        })
    }

    fn capsule_height(&self) -> f32 {
        self.body.height
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.body.resize(height);
    }

    fn rotate_body(&mut self, yaw_delta: f32) {
        self.body.yaw += yaw_delta;
    }
}
