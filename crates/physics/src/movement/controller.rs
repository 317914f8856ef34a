//! Locomotion controller.
//!
//! This is the main entry point for character movement. It owns the
//! character's [`LocomotionState`] and runs the per-frame pipeline against
//! the collaborators handed to each tick.

use glam::Vec3;

use crate::error::ConfigError;

use super::collaborators::{CameraSink, CollisionEngine, InputSource, MoveOutcome};
use super::config::LocomotionConfig;
use super::crouch::{toggle_crouch, StanceChange};
use super::diagnostics::{DiagnosticEvent, DiagnosticsSink, LogDiagnostics};
use super::horizontal::{resolve_horizontal, SlideParams};
use super::look::{apply_look, LookParams};
use super::presentation::update_presentation;
use super::slope::{detect_slope, surface_angle};
use super::state::{FrameInput, LocomotionState, MovementFlags};
use super::vertical::{integrate_vertical, VerticalParams};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Delta time actually integrated (after clamping).
    pub delta_time: f32,
    /// Result of the crouch toggle, if one fired.
    pub stance_change: Option<StanceChange>,
    /// Result of the horizontal move.
    pub horizontal: Option<MoveOutcome>,
    /// Result of the vertical move.
    pub vertical: Option<MoveOutcome>,
    /// A jump impulse was applied.
    pub jumped: bool,
    /// The character touched down this frame.
    pub landed: bool,
}

/// First-person locomotion controller.
///
/// Handles, in a fixed order every frame:
/// - Crouch toggle with headroom check
/// - Ground and slope sampling
/// - Horizontal move (walk, sprint, crouch or slide)
/// - Vertical move (ground bias, jump, gravity)
/// - Look (body yaw, camera pitch)
/// - Presentation smoothing (capsule height, camera offset, FOV)
///
/// # Example
///
/// ```ignore
/// let mut controller = LocomotionController::new(LocomotionConfig::default())?;
///
/// // Each frame:
/// controller.tick(&mut input, &mut body, &mut camera, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController<D: DiagnosticsSink = LogDiagnostics> {
    config: LocomotionConfig,
    state: LocomotionState,
    diagnostics: D,
}

impl LocomotionController<LogDiagnostics> {
    /// Create a controller that logs its diagnostics.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        Self::with_diagnostics(config, LogDiagnostics)
    }

    /// Create a controller with the default configuration.
    pub fn with_default_config() -> Self {
        let config = LocomotionConfig::default();
        Self {
            state: LocomotionState::spawn(&config),
            config,
            diagnostics: LogDiagnostics,
        }
    }
}

impl<D: DiagnosticsSink> LocomotionController<D> {
    /// Create a controller reporting to the given diagnostics sink.
    ///
    /// Fails if the configuration is incoherent.
    pub fn with_diagnostics(config: LocomotionConfig, diagnostics: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: LocomotionState::spawn(&config),
            config,
            diagnostics,
        })
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// The character's current locomotion state.
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    /// Reset to the spawn state (standing, at rest).
    pub fn respawn(&mut self) {
        self.state = LocomotionState::spawn(&self.config);
    }

    /// Reset to the spawn state facing `yaw` degrees. The body transform
    /// must be turned to the same yaw by the caller.
    pub fn respawn_facing(&mut self, yaw: f32) {
        self.respawn();
        self.state.yaw = yaw;
    }

    /// Push the current capsule height and camera framing to the
    /// collaborators. Call once after spawning.
    pub fn sync_collaborators<E, C>(&self, engine: &mut E, camera: &mut C)
    where
        E: CollisionEngine + ?Sized,
        C: CameraSink + ?Sized,
    {
        engine.set_capsule_height(self.state.capsule_height);
        camera.set_local_offset(self.state.camera_offset);
        camera.set_local_pitch(self.state.pitch);
        camera.set_field_of_view(self.state.fov);
    }

    /// Sample the input source and run one frame.
    pub fn tick<I, E, C>(
        &mut self,
        input: &mut I,
        engine: &mut E,
        camera: &mut C,
        delta_time: f32,
    ) -> FrameReport
    where
        I: InputSource + ?Sized,
        E: CollisionEngine + ?Sized,
        C: CameraSink + ?Sized,
    {
        let input = input.sample();
        self.update(&input, engine, camera, delta_time)
    }

    /// Run one frame for an already sampled input.
    ///
    /// A non-finite or non-positive delta leaves everything untouched.
    pub fn update<E, C>(
        &mut self,
        input: &FrameInput,
        engine: &mut E,
        camera: &mut C,
        delta_time: f32,
    ) -> FrameReport
    where
        E: CollisionEngine + ?Sized,
        C: CameraSink + ?Sized,
    {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return FrameReport::default();
        }
        let delta_time = delta_time.min(self.config.max_frame_time);

        let mut report = FrameReport {
            delta_time,
            ..Default::default()
        };

        // Crouch toggle, once per edge
        if input.crouch_triggered {
            report.stance_change = Some(toggle_crouch(
                &mut self.state,
                &self.config,
                engine,
                input.sprint_held,
                &mut self.diagnostics,
            ));
        }
        self.select_speed(input);

        // Ground and slope
        let grounded = self.state.grounded();
        self.sample_slope(engine, grounded);
        let sliding = self.state.sliding();

        // Horizontal first, so vertical resolves against the shifted position
        report.horizontal = Some(self.move_horizontal(input, engine, sliding, delta_time));

        // Vertical
        report.jumped = grounded && !sliding && input.jump_triggered;
        let vertical = self.move_vertical(input, engine, grounded, sliding, delta_time);
        report.vertical = Some(vertical);
        report.landed = self.settle_ground(grounded, report.jumped, vertical);

        self.update_look(input, engine, camera, delta_time);

        update_presentation(&mut self.state, &self.config, delta_time);
        engine.set_capsule_height(self.state.capsule_height);
        camera.set_local_offset(self.state.camera_offset);
        camera.set_field_of_view(self.state.fov);

        report
    }

    // ========================================================================
    // Pipeline steps
    // ========================================================================

    fn select_speed(&mut self, input: &FrameInput) {
        let crouching = self.state.crouching();
        self.state.flags.set(MovementFlags::SPRINT_HELD, input.sprint_held);
        self.state
            .flags
            .set(MovementFlags::SPRINTING, input.sprint_held && !crouching);
        self.state.move_speed = self.config.speed_for(crouching, input.sprint_held);
    }

    fn sample_slope<E>(&mut self, engine: &E, grounded: bool)
    where
        E: CollisionEngine + ?Sized,
    {
        let slope = if grounded {
            detect_slope(
                engine,
                engine.position(),
                &self.config.slope_probe_offsets,
                self.config.slope_probe_distance,
                self.config.max_slope_angle,
                &mut self.diagnostics,
            )
        } else {
            None
        };

        self.state.slope_normal = slope;
        self.state.slope_angle = slope.map(surface_angle).unwrap_or(0.0);
        self.state.flags.set(MovementFlags::SLIDING, slope.is_some());
    }

    fn move_horizontal<E>(
        &mut self,
        input: &FrameInput,
        engine: &mut E,
        sliding: bool,
        delta_time: f32,
    ) -> MoveOutcome
    where
        E: CollisionEngine + ?Sized,
    {
        let request = resolve_horizontal(
            self.state.forward_direction(),
            self.state.right_direction(),
            input.move_axis,
            self.state.move_speed,
            sliding,
            self.state.slope_normal,
            delta_time,
            SlideParams {
                max_slope_angle: self.config.max_slope_angle,
                base_slide_speed: self.config.base_slide_speed,
                max_slide_speed: self.config.max_slide_speed,
            },
        );

        if let Some(slide) = request.slide {
            self.diagnostics.record(DiagnosticEvent::SlideDirection {
                downslope: slide.downslope,
                steered: slide.steered,
                speed: slide.speed,
            });
        }

        let outcome = engine.move_by(request.displacement);
        self.state.velocity.x = outcome.displacement.x / delta_time;
        self.state.velocity.z = outcome.displacement.z / delta_time;
        outcome
    }

    fn move_vertical<E>(
        &mut self,
        input: &FrameInput,
        engine: &mut E,
        grounded: bool,
        sliding: bool,
        delta_time: f32,
    ) -> MoveOutcome
    where
        E: CollisionEngine + ?Sized,
    {
        self.state.velocity.y = integrate_vertical(
            self.state.velocity.y,
            delta_time,
            grounded,
            sliding,
            input.jump_triggered,
            VerticalParams {
                jump_height: self.config.jump_height,
                gravity: self.config.gravity,
                max_fall_speed: self.config.max_fall_speed,
            },
        );

        engine.move_by(Vec3::new(0.0, self.state.velocity.y * delta_time, 0.0))
    }

    /// Store the grounded flag reported by the last move. Returns whether
    /// the character landed this frame.
    fn settle_ground(&mut self, was_grounded: bool, jumped: bool, vertical: MoveOutcome) -> bool {
        let grounded = vertical.grounded;
        self.state.flags.set(MovementFlags::ON_GROUND, grounded);

        if jumped {
            self.state.flags.set(MovementFlags::JUMPING, true);
        } else if grounded {
            self.state.flags.set(MovementFlags::JUMPING, false);
        }

        if !grounded {
            // Sliding needs contact
            self.state.flags.set(MovementFlags::SLIDING, false);
            self.state.slope_normal = None;
            self.state.slope_angle = 0.0;
        }

        let landed = grounded && !was_grounded;
        if landed {
            self.diagnostics.record(DiagnosticEvent::Landed {
                impact_speed: self.state.velocity.y,
            });
        }
        landed
    }

    fn update_look<E, C>(&mut self, input: &FrameInput, engine: &mut E, camera: &mut C, delta_time: f32)
    where
        E: CollisionEngine + ?Sized,
        C: CameraSink + ?Sized,
    {
        let (pitch, yaw_delta) = apply_look(
            input.look_axis,
            delta_time,
            self.state.pitch,
            LookParams {
                sensitivity: self.config.mouse_sensitivity,
                min_pitch: self.config.min_look_angle,
                max_pitch: self.config.max_look_angle,
            },
        );

        self.state.pitch = pitch;
        self.state.yaw += yaw_delta;
        engine.rotate_body(yaw_delta);
        camera.set_local_pitch(pitch);
    }
}

// ============================================================================
// Tests
// ============================================================================
