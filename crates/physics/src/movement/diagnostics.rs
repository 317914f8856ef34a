//! Diagnostics tracepoints.
//!
//! The controller reports what it probed and decided through a
//! [`DiagnosticsSink`]. The default sink forwards to the `log` facade;
//! [`DiagnosticLog`] keeps events in memory for tests and debug overlays.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::crouch::Stance;

/// A single tracepoint emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DiagnosticEvent {
    /// A downward slope probe was cast.
    SlopeProbe {
        /// Ray origin.
        origin: Vec3,
        /// Surface angle in degrees, `None` on a miss.
        angle: Option<f32>,
        /// The hit is steeper than walkable.
        steep: bool,
    },

    /// Slide vectors for a sliding frame.
    SlideDirection {
        /// Pure downslope direction.
        downslope: Vec3,
        /// Direction after side steering.
        steered: Vec3,
        /// Slide speed used.
        speed: f32,
    },

    /// Stand-up refused because the headroom probe hit something.
    StandUpBlocked {
        /// Probe origin.
        position: Vec3,
        /// Distance to the obstruction.
        clearance: f32,
    },

    /// The crouch state machine changed state.
    StanceChanged { from: Stance, to: Stance },

    /// The character touched ground after being airborne.
    Landed {
        /// Vertical velocity just before landing.
        impact_speed: f32,
    },
}

/// Receives diagnostics tracepoints.
pub trait DiagnosticsSink {
    fn record(&mut self, event: DiagnosticEvent);
}

/// Forwards tracepoints to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn record(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::SlopeProbe { origin, angle: Some(angle), steep } => {
                log::trace!("slope probe at {:?}: {:.1} deg steep={}", origin, angle, steep);
            }
            DiagnosticEvent::SlopeProbe { origin, angle: None, .. } => {
                log::trace!("slope probe at {:?}: miss", origin);
            }
            DiagnosticEvent::SlideDirection { downslope, steered, speed } => {
                log::trace!(
                    "sliding: downslope={:?} steered={:?} speed={:.2}",
                    downslope, steered, speed
                );
            }
            DiagnosticEvent::StandUpBlocked { position, clearance } => {
                log::debug!(
                    "cannot stand up, obstacle {:.2}m above {:?}",
                    clearance, position
                );
            }
            DiagnosticEvent::StanceChanged { from, to } => {
                log::debug!("stance {:?} -> {:?}", from, to);
            }
            DiagnosticEvent::Landed { impact_speed } => {
                log::debug!("landed at {:.2} m/s", impact_speed);
            }
        }
    }
}

/// Discards every tracepoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl DiagnosticsSink for NullDiagnostics {
    fn record(&mut self, _event: DiagnosticEvent) {}
}

/// Keeps tracepoints in memory.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    pub events: Vec<DiagnosticEvent>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refused stand-ups recorded.
    pub fn blocked_stand_ups(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DiagnosticEvent::StandUpBlocked { .. }))
            .count()
    }

    /// Number of slope probes recorded.
    pub fn slope_probes(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DiagnosticEvent::SlopeProbe { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn record(&mut self, event: DiagnosticEvent) {
        self.events.push(event);
    }
}
