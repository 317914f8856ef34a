//! Simulation settings loaded from TOML.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes:
//!
//! ```toml
//! tick_rate = 120
//!
//! [locomotion]
//! sprint_speed = 10.0
//! max_slope_angle = 40.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stride_physics::{ConfigError, LocomotionConfig};
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid locomotion config: {0}")]
    Config(#[from] ConfigError),

    #[error("tick rate must be at least 1")]
    ZeroTickRate,

    #[error("mouse scale must be a finite number, got {0}")]
    InvalidMouseScale(f32),
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Mouse pixels to look-axis units.
    pub mouse_scale: f32,

    /// Locomotion tuning shared by every player.
    pub locomotion: LocomotionConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            mouse_scale: 0.1,
            locomotion: LocomotionConfig::default(),
        }
    }
}

impl Settings {
    /// Time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        if !self.mouse_scale.is_finite() {
            return Err(SettingsError::InvalidMouseScale(self.mouse_scale));
        }
        self.locomotion.validate()?;
        Ok(())
    }
}
