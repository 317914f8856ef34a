//! First-person locomotion.
//!
//! This module implements a capsule character controller with:
//!
//! - Walk, sprint and crouch speeds
//! - Slope detection and downhill sliding with side steering
//! - Jumping with a fixed apex height and a terminal fall speed
//! - A crouch toggle that refuses to stand up under an obstruction
//! - Mouse look with clamped pitch
//! - Smoothed capsule height, camera offset and field of view
//!
//! # Design
//!
//! Movement is driven by the [`LocomotionController`], which samples an
//! [`InputSource`] and updates its [`LocomotionState`] through a
//! [`CollisionEngine`] and a [`CameraSink`]. The pure per-step functions
//! live in their own modules and can be used on their own.
//!
//! Given the same inputs and collaborator answers, every frame produces the
//! same outputs.

mod collaborators;
mod config;
mod controller;
pub mod crouch;
mod diagnostics;
pub mod horizontal;
pub mod look;
pub mod presentation;
pub mod slope;
mod state;
pub mod vertical;

#[cfg(test)]
pub(crate) mod test_support;

pub use collaborators::{CameraSink, CollisionEngine, InputSource, MoveOutcome, RayHit};
pub use config::{default_probe_offsets, LocomotionConfig, DEFAULT_PROBE_SPACING};
pub use controller::{FrameReport, LocomotionController};
pub use crouch::{Stance, StanceChange};
pub use diagnostics::{DiagnosticEvent, DiagnosticLog, DiagnosticsSink, LogDiagnostics, NullDiagnostics};
pub use state::{FrameInput, LocomotionState, MovementFlags};
