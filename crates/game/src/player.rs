//! Player entity: a locomotion controller driving a capsule body and a
//! first-person camera.

use glam::Vec3;
use stride_physics::{
    CollisionWorld, ConfigError, FrameReport, KinematicBody, LocomotionConfig, LocomotionController,
    LocomotionState,
};

use crate::camera::FirstPersonCamera;
use crate::input::{InputLatches, PlayerInput};
use crate::level::SpawnPoint;

/// Unique identifier for entities.
pub type EntityId = u32;

/// Capsule radius shared by every player.
pub const PLAYER_RADIUS: f32 = 0.4;

/// How far below a spawn point the ground is searched for.
const SPAWN_DROP: f32 = 10.0;

/// A player in the game.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Physical capsule.
    pub body: KinematicBody,

    /// Eye camera, following the body.
    pub camera: FirstPersonCamera,

    controller: LocomotionController,
    latches: InputLatches,
}

impl Player {
    /// Create a player standing on the ground below `spawn`.
    pub fn new(
        id: EntityId,
        name: String,
        config: LocomotionConfig,
        spawn: &SpawnPoint,
        world: &CollisionWorld,
    ) -> Result<Self, ConfigError> {
        let controller = LocomotionController::new(config)?;
        let body = KinematicBody::new(spawn.position, controller.config().standing_height, PLAYER_RADIUS);

        let mut player = Self {
            id,
            name,
            body,
            camera: FirstPersonCamera::default(),
            controller,
            latches: InputLatches::default(),
        };
        player.respawn(spawn, world);
        Ok(player)
    }

    /// Advance one tick.
    pub fn tick(
        &mut self,
        input: &PlayerInput,
        world: &CollisionWorld,
        mouse_scale: f32,
        delta_time: f32,
    ) -> FrameReport {
        let frame = self.latches.frame_input(input, mouse_scale);

        let mut engine = self.body.in_world(world);
        let report = self.controller.update(&frame, &mut engine, &mut self.camera, delta_time);

        self.camera.follow(self.body.position, self.body.yaw);
        report
    }

    /// Put the player back at a spawn point in the spawn stance.
    pub fn respawn(&mut self, spawn: &SpawnPoint, world: &CollisionWorld) {
        self.controller.respawn_facing(spawn.facing);
        self.latches = InputLatches::default();

        self.body = KinematicBody::new(
            spawn.position,
            self.controller.config().standing_height,
            PLAYER_RADIUS,
        );
        self.body.yaw = spawn.facing;
        if !self.body.snap_to_ground(world, SPAWN_DROP) {
            log::warn!("no ground below spawn '{}', player {} starts airborne", spawn.label, self.id);
        }

        let mut engine = self.body.in_world(world);
        self.controller.sync_collaborators(&mut engine, &mut self.camera);
        self.camera.follow(self.body.position, self.body.yaw);
    }

    pub fn state(&self) -> &LocomotionState {
        self.controller.state()
    }

    pub fn config(&self) -> &LocomotionConfig {
        self.controller.config()
    }

    /// Capsule centre.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn feet_position(&self) -> Vec3 {
        self.body.feet_position()
    }

    /// Eye position (for the camera).
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.camera.position
    }

    #[inline]
    pub fn look_direction(&self) -> Vec3 {
        self.state().look_direction()
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.state().grounded()
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.state().crouching()
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.state().sliding()
    }
}
