//! Stride - Headless Driver
//!
//! Runs a scripted tour of the proving ground and logs what the player does
//! at each stage. Pass a TOML settings file as the first argument to try
//! different tuning.
//!
//! ```text
//! RUST_LOG=info stride [settings.toml]
//! ```

use std::process::ExitCode;

use stride_game::{EntityId, Level, PlayerInput, Settings, SettingsError, Simulation};

/// One leg of the scripted tour.
struct Stage {
    name: &'static str,
    spawn: &'static str,
    steps: &'static [(Script, u32)],
}

/// Held-key pattern for a number of ticks.
#[derive(Debug, Clone, Copy)]
enum Script {
    Idle,
    Forward,
    SprintForward,
    Jump,
    Crouch,
    Backward,
    Turn,
}

impl Script {
    fn to_player_input(self) -> PlayerInput {
        let mut input = PlayerInput::default();
        match self {
            Script::Idle => {}
            Script::Forward => input.movement.forward = true,
            Script::SprintForward => {
                input.movement.forward = true;
                input.actions.sprint = true;
            }
            Script::Jump => input.actions.jump = true,
            Script::Crouch => input.actions.crouch = true,
            Script::Backward => input.movement.backward = true,
            Script::Turn => input.mouse_delta = (15.0, 0.0),
        }
        input
    }
}

const TOUR: &[Stage] = &[
    Stage {
        name: "walk and jump",
        spawn: "origin",
        steps: &[
            (Script::Idle, 10),
            (Script::Forward, 60),
            (Script::SprintForward, 60),
            (Script::Jump, 1),
            (Script::Idle, 60),
            (Script::Turn, 30),
        ],
    },
    Stage {
        name: "rest on walkable ramp",
        spawn: "walkable_ramp",
        steps: &[(Script::Idle, 90)],
    },
    Stage {
        name: "slide down steep ramp",
        spawn: "steep_ramp",
        steps: &[(Script::Idle, 5), (Script::Jump, 1), (Script::Idle, 180)],
    },
    Stage {
        name: "crawlspace",
        spawn: "crawlspace_entrance",
        steps: &[
            (Script::Crouch, 30),
            (Script::Idle, 1),
            (Script::Forward, 150),
            (Script::Crouch, 1),
            (Script::Idle, 30),
            (Script::Backward, 180),
            (Script::Crouch, 1),
            (Script::Idle, 30),
        ],
    },
];

fn main() -> ExitCode {
    env_logger::init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut simulation = Simulation::new(settings, Level::proving_ground());
    log::info!(
        "proving ground ready: {} spawn points, {} Hz",
        simulation.level.player_spawn_count(),
        simulation.settings.tick_rate
    );

    for stage in TOUR {
        if let Err(e) = run_stage(&mut simulation, stage) {
            log::error!("stage '{}' failed: {}", stage.name, e);
            return ExitCode::FAILURE;
        }
    }

    log::info!("tour finished after {} ticks", simulation.frame);
    ExitCode::SUCCESS
}

fn load_settings() -> Result<Settings, SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            let settings = Settings::default();
            settings.validate()?;
            Ok(settings)
        }
    }
}

fn run_stage(simulation: &mut Simulation, stage: &Stage) -> Result<(), String> {
    let spawn = simulation
        .level
        .spawn(stage.spawn)
        .cloned()
        .ok_or_else(|| format!("no spawn point '{}'", stage.spawn))?;
    let id = simulation
        .add_player_at(stage.name, &spawn)
        .map_err(|e| e.to_string())?;

    log::info!("== {} ==", stage.name);
    for &(script, ticks) in stage.steps {
        let input = script.to_player_input();
        for _ in 0..ticks {
            simulation.tick(std::slice::from_ref(&input));
        }
        report(simulation, id, script);
    }

    simulation.remove_player(id);
    Ok(())
}

fn report(simulation: &Simulation, id: EntityId, script: Script) {
    let Some(player) = simulation.get_player(id) else {
        return;
    };
    let state = player.state();
    log::info!(
        "{:?}: feet {:.2?} speed {:.2} stance {:?} grounded {} sliding {} eye {:.2?}",
        script,
        player.feet_position(),
        state.velocity.length(),
        state.stance,
        player.on_ground(),
        player.is_sliding(),
        player.eye_position(),
    );
}
