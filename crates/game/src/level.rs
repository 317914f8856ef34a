//! Levels: collision geometry plus named spawn points.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_physics::{CollisionWorld, ContentFlags};

/// A game level.
#[derive(Debug, Clone)]
pub struct Level {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a player enters the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub label: String,

    /// Feet position in world space. Players are dropped onto the ground
    /// below it.
    pub position: Vec3,

    /// Initial facing (yaw in degrees).
    pub facing: f32,
}

impl SpawnPoint {
    pub fn new(label: &str, position: Vec3, facing: f32) -> Self {
        Self {
            label: label.to_string(),
            position,
            facing,
        }
    }
}

impl Level {
    /// Proving ground ramp angles, in degrees.
    pub const WALKABLE_RAMP_ANGLE: f32 = 20.0;
    pub const STEEP_RAMP_ANGLE: f32 = 55.0;

    /// Clearance under the crawlspace ceiling.
    pub const CRAWLSPACE_CLEARANCE: f32 = 1.3;

    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A test course for the locomotion controller:
    ///
    /// - Flat floor at y=0
    /// - Walkable ramp at x=-10 rising toward -Z
    /// - Steep ramp at x=10 rising toward -Z, which slides back toward +Z
    /// - Low crawlspace at x=0 spanning z=7..13
    pub fn proving_ground() -> Self {
        let mut level = Self::new("proving_ground", "Proving Ground");
        let solid = ContentFlags::SOLID;

        // Floor
        level
            .collision
            .add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(40.0, 0.5, 40.0), solid);

        // Ramps meet the floor at their low (+Z) end
        let half_length = 4.0;
        for (x, angle) in [(-10.0, Self::WALKABLE_RAMP_ANGLE), (10.0, Self::STEEP_RAMP_ANGLE)] {
            let rise = half_length * angle.to_radians().sin();
            level
                .collision
                .add_ramp(Vec3::new(x, rise, -10.0), 2.5, half_length, angle, solid);
        }

        // Crawlspace ceiling
        let thickness = 0.25;
        level.collision.add_box(
            Vec3::new(0.0, Self::CRAWLSPACE_CLEARANCE + thickness, 10.0),
            Vec3::new(2.0, thickness, 3.0),
            solid,
        );

        level.spawn_points = vec![
            SpawnPoint::new("origin", Vec3::ZERO, 0.0),
            SpawnPoint::new("walkable_ramp", Vec3::new(-10.0, 2.0, -10.0), 0.0),
            SpawnPoint::new("steep_ramp", Vec3::new(10.0, 4.0, -10.0), 0.0),
            SpawnPoint::new("crawlspace_entrance", Vec3::new(0.0, 0.0, 15.0), 0.0),
        ];

        level
    }

    /// Get the nth spawn point, wrapping around.
    pub fn get_player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        if self.spawn_points.is_empty() {
            return None;
        }
        self.spawn_points.get(index % self.spawn_points.len())
    }

    /// Find a spawn point by label.
    pub fn spawn(&self, label: &str) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|spawn| spawn.label == label)
    }

    pub fn player_spawn_count(&self) -> usize {
        self.spawn_points.len()
    }
}
