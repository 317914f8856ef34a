//! Crouch toggle state machine.
//!
//! Two stances. Crouching is always allowed; standing back up needs a clear
//! headroom probe of standing height above the character. The toggle runs
//! once per crouch input edge, never continuously.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collaborators::CollisionEngine;
use super::config::LocomotionConfig;
use super::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use super::state::{LocomotionState, MovementFlags};

/// Character stance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    /// The stance a toggle asks for.
    pub fn toggled(self) -> Stance {
        match self {
            Stance::Standing => Stance::Crouching,
            Stance::Crouching => Stance::Standing,
        }
    }
}

/// Outcome of a crouch toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StanceChange {
    /// Went from standing to crouching.
    Crouched,
    /// Went from crouching to standing.
    StoodUp,
    /// Stand-up refused; something is `clearance` meters overhead.
    Blocked { clearance: f32 },
}

/// Check the space above the character for a full standing capsule.
///
/// Returns the distance to the obstruction, or `None` when clear.
pub fn headroom_obstruction<E>(engine: &E, standing_height: f32) -> Option<f32>
where
    E: CollisionEngine + ?Sized,
{
    engine
        .raycast(engine.position(), Vec3::Y, standing_height)
        .map(|hit| hit.distance)
}

/// Handle one crouch toggle edge.
pub fn toggle_crouch<E, D>(
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    engine: &E,
    sprint_held: bool,
    diagnostics: &mut D,
) -> StanceChange
where
    E: CollisionEngine + ?Sized,
    D: DiagnosticsSink + ?Sized,
{
    match state.stance {
        Stance::Standing => {
            enter_stance(state, config, Stance::Crouching, sprint_held);
            diagnostics.record(DiagnosticEvent::StanceChanged {
                from: Stance::Standing,
                to: Stance::Crouching,
            });
            StanceChange::Crouched
        }
        Stance::Crouching => {
            if let Some(clearance) = headroom_obstruction(engine, config.standing_height) {
                diagnostics.record(DiagnosticEvent::StandUpBlocked {
                    position: engine.position(),
                    clearance,
                });
                return StanceChange::Blocked { clearance };
            }
            enter_stance(state, config, Stance::Standing, sprint_held);
            diagnostics.record(DiagnosticEvent::StanceChanged {
                from: Stance::Crouching,
                to: Stance::Standing,
            });
            StanceChange::StoodUp
        }
    }
}

/// Apply the targets of a stance: capsule height, camera height and speed.
pub fn enter_stance(
    state: &mut LocomotionState,
    config: &LocomotionConfig,
    stance: Stance,
    sprint_held: bool,
) {
    let crouching = stance == Stance::Crouching;

    state.stance = stance;
    state.flags.set(MovementFlags::CROUCHING, crouching);
    state.target_height = config.height(crouching);
    state.target_camera_offset = config.camera_target(state.target_height);
    state.move_speed = config.speed_for(crouching, sprint_held);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::diagnostics::DiagnosticLog;
    use crate::movement::test_support::ScriptedEngine;

    fn crouched_state(config: &LocomotionConfig) -> LocomotionState {
        let mut state = LocomotionState::spawn(config);
        enter_stance(&mut state, config, Stance::Crouching, false);
        state
    }

    #[test]
    fn test_stance_toggled() {
        assert_eq!(Stance::Standing.toggled(), Stance::Crouching);
        assert_eq!(Stance::Crouching.toggled(), Stance::Standing);
    }

    #[test]
    fn test_crouch_always_allowed() {
        let config = LocomotionConfig::default();
        let mut state = LocomotionState::spawn(&config);
        // Even with a ceiling right above
        let engine = ScriptedEngine::new().with_ceiling(0.1);
        let mut log = DiagnosticLog::new();

        let change = toggle_crouch(&mut state, &config, &engine, true, &mut log);

        assert_eq!(change, StanceChange::Crouched);
        assert_eq!(state.stance, Stance::Crouching);
        assert!(state.flags.crouching());
        assert_eq!(state.target_height, config.crouching_height);
        assert_eq!(state.target_camera_offset.y, config.crouching_height / 2.0);
        // Crouch speed wins even with sprint held
        assert_eq!(state.move_speed, config.crouch_speed);
    }

    #[test]
    fn test_stand_up_blocked() {
        let config = LocomotionConfig::default();
        let mut state = crouched_state(&config);
        let engine = ScriptedEngine::new().with_ceiling(1.2);
        let mut log = DiagnosticLog::new();

        let change = toggle_crouch(&mut state, &config, &engine, false, &mut log);

        assert_eq!(change, StanceChange::Blocked { clearance: 1.2 });
        assert_eq!(state.stance, Stance::Crouching);
        assert_eq!(state.target_height, config.crouching_height);
        assert_eq!(state.move_speed, config.crouch_speed);
        assert_eq!(log.blocked_stand_ups(), 1);
    }

    #[test]
    fn test_obstruction_beyond_standing_height_is_ignored() {
        let config = LocomotionConfig::default();
        let mut state = crouched_state(&config);
        let engine = ScriptedEngine::new().with_ceiling(config.standing_height + 0.5);
        let mut log = DiagnosticLog::new();

        let change = toggle_crouch(&mut state, &config, &engine, false, &mut log);
        assert_eq!(change, StanceChange::StoodUp);
    }

    #[test]
    fn test_stand_up_speed_follows_sprint() {
        let config = LocomotionConfig::default();
        let engine = ScriptedEngine::new();
        let mut log = DiagnosticLog::new();

        let mut walking = crouched_state(&config);
        assert_eq!(
            toggle_crouch(&mut walking, &config, &engine, false, &mut log),
            StanceChange::StoodUp
        );
        assert_eq!(walking.stance, Stance::Standing);
        assert_eq!(walking.move_speed, config.walk_speed);
        assert_eq!(walking.target_height, config.standing_height);
        assert_eq!(walking.target_camera_offset.y, config.standing_height / 2.0);

        let mut sprinting = crouched_state(&config);
        toggle_crouch(&mut sprinting, &config, &engine, true, &mut log);
        assert_eq!(sprinting.stance, Stance::Standing);
        assert_eq!(sprinting.move_speed, config.sprint_speed);
        assert!(!sprinting.flags.crouching());
    }
}
