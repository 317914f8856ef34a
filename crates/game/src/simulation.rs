//! Game simulation: the fixed-rate loop that ticks every player.
//!
//! The simulation is deterministic: the same settings, level and input
//! sequence always produce the same player states.

use stride_physics::ConfigError;

use crate::input::PlayerInput;
use crate::level::{Level, SpawnPoint};
use crate::player::{EntityId, Player};
use crate::settings::Settings;

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    pub settings: Settings,

    /// Current level.
    pub level: Level,

    /// All players in the game.
    pub players: Vec<Player>,

    /// Next entity ID to assign.
    next_entity_id: EntityId,
}

impl Simulation {
    pub fn new(settings: Settings, level: Level) -> Self {
        Self {
            frame: 0,
            settings,
            level,
            players: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Default settings on the proving ground.
    pub fn proving_ground() -> Self {
        Self::new(Settings::default(), Level::proving_ground())
    }

    /// Add a player at the next spawn point in rotation.
    pub fn add_player(&mut self, name: &str) -> Result<EntityId, ConfigError> {
        let spawn = self
            .level
            .get_player_spawn(self.players.len())
            .cloned()
            .unwrap_or_else(|| SpawnPoint::new("fallback", glam::Vec3::ZERO, 0.0));
        self.add_player_at(name, &spawn)
    }

    /// Add a player at a specific spawn point.
    pub fn add_player_at(&mut self, name: &str, spawn: &SpawnPoint) -> Result<EntityId, ConfigError> {
        let id = self.next_entity_id;
        let player = Player::new(
            id,
            name.to_string(),
            self.settings.locomotion.clone(),
            spawn,
            &self.level.collision,
        )?;
        self.next_entity_id += 1;

        log::info!("player {} '{}' joined at spawn '{}'", id, name, spawn.label);
        self.players.push(player);
        Ok(id)
    }

    pub fn remove_player(&mut self, player_id: EntityId) {
        self.players.retain(|p| p.id != player_id);
    }

    pub fn get_player(&self, player_id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn get_player_mut(&mut self, player_id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Advance the simulation by one tick.
    ///
    /// `inputs` is indexed by position in `players`; missing entries are
    /// treated as no input.
    pub fn tick(&mut self, inputs: &[PlayerInput]) {
        let delta_time = self.settings.delta_time();
        let idle = PlayerInput::default();

        for (i, player) in self.players.iter_mut().enumerate() {
            let input = inputs.get(i).unwrap_or(&idle);
            let report = player.tick(input, &self.level.collision, self.settings.mouse_scale, delta_time);

            if let Some(change) = report.stance_change {
                log::debug!("player {} stance: {:?}", player.id, change);
            }
            if report.landed {
                log::debug!("player {} landed at {:?}", player.id, player.feet_position());
            }
        }

        self.frame += 1;
    }

    pub fn delta_time(&self) -> f32 {
        self.settings.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
