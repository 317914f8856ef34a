//! Collision detection for the character capsule.
//!
//! This module provides world collision testing with parry3d shapes and a
//! kinematic capsule that implements [`CollisionEngine`](crate::CollisionEngine).
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The static geometry (boxes, oriented boxes, ramps)
//! - [`TraceResult`]: Output from a sweep or ray query
//! - [`TraceShape`]: Shape used for sweeps (capsule or point)
//! - [`KinematicBody`]: The character capsule, bound to a world per tick
//!
//! # Tracing Algorithm
//!
//! Sweeps bisect the path for the last overlap-free position, then read the
//! surface normal from the penetration direction at the first blocked
//! sample.

mod body;
mod flags;
mod slide_move;
mod trace;
mod world;

pub use body::{KinematicBody, WorldBody, DEFAULT_MIN_FLOOR_NORMAL_Y, GROUND_CONTACT_MIN_Y};
pub use flags::ContentFlags;
pub use slide_move::{clip_velocity, follow_floor, slide_move, SlideResult};
pub use trace::{TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
