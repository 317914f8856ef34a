//! Stride Physics
//!
//! A first-person locomotion controller and the capsule collision world it is
//! exercised against. The controller turns per-frame input into capsule
//! displacement, crouch and slope-slide behaviour, and camera framing.
//!
//! # Architecture
//!
//! The crate is split into two systems:
//!
//! - **Movement**: The locomotion core. It talks to the outside world only
//!   through the collaborator traits in [`movement`] (input source, collision
//!   engine, camera sink, diagnostics sink).
//! - **Collision**: A parry3d-backed world plus [`KinematicBody`], a
//!   ready-made [`CollisionEngine`] implementation.
//!
//! # Frame order
//!
//! Every tick runs the same sequence: sample input, crouch toggle, ground and
//! slope sampling, horizontal move, vertical move, look, presentation.

pub mod collision;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionWorld, ContentFlags, KinematicBody, TraceResult, TraceShape, WorldBody};
pub use error::ConfigError;
pub use movement::{
    CameraSink, CollisionEngine, DiagnosticEvent, DiagnosticLog, DiagnosticsSink, FrameInput,
    FrameReport, InputSource, LocomotionConfig, LocomotionController, LocomotionState, LogDiagnostics,
    MoveOutcome, MovementFlags, NullDiagnostics, RayHit, Stance, StanceChange,
};
