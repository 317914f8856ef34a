//! Stride Game Logic
//!
//! Everything around the locomotion controller that a running game needs:
//!
//! - Player input and edge latching for jump and crouch
//! - Players pairing a controller with a capsule body and a camera
//! - The proving-ground level with its ramps and crawlspace
//! - TOML settings and the fixed-rate simulation loop
//!
//! # Architecture
//!
//! The simulation is deterministic. Each tick turns raw input into a
//! [`stride_physics::FrameInput`] per player and lets the controller drive
//! that player's body and camera.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  ┌─────────┐    ┌──────────────┐    ┌─────────────────────┐  │
//! │  │ Player  │───►│ Locomotion   │───►│ KinematicBody       │  │
//! │  │ Input   │    │ Controller   │    │ FirstPersonCamera   │  │
//! │  └─────────┘    └──────────────┘    └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod camera;
pub mod input;
pub mod level;
pub mod player;
pub mod settings;
pub mod simulation;

// Re-export main types
pub use camera::FirstPersonCamera;
pub use input::{ButtonLatch, InputLatches, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use player::{EntityId, Player};
pub use settings::{Settings, SettingsError};
pub use simulation::Simulation;

// Re-export physics types for convenience
pub use stride_physics::{
    CollisionWorld, ContentFlags, FrameReport, KinematicBody, LocomotionConfig, LocomotionController,
    LocomotionState, Stance,
};
