//! On-disk configuration
//!
//! Loads the overlay configuration from a TOML file at startup. Loading is
//! fail-safe: a missing or corrupted file degrades to defaults with a
//! warning instead of preventing startup, and unrecognized keys are
//! ignored so older binaries tolerate newer files. Nothing is ever written
//! back; the file is purely an input.
//!
//! Colors are stored as `(r, g, b)` tuples of 0-255 values for direct
//! compatibility with the surface color type.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::joystick::{ControllerOptions, Position};
use crate::surface::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerSection,
}

/// `[controller]` section of the config file. Every key is optional and
/// falls back to the built-in default.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct ControllerSection {
    pub enabled: bool,
    pub joystick_size: f32,
    pub handle_size: f32,
    pub position: Position,
    pub opacity: f32,
    pub base_color: (u8, u8, u8),
    pub left_color: (u8, u8, u8),
    pub right_color: (u8, u8, u8),
}

impl Default for ControllerSection {
    fn default() -> Self {
        let options = ControllerOptions::default();
        Self {
            enabled: options.enabled,
            joystick_size: options.joystick_size,
            handle_size: options.handle_size,
            position: options.position,
            opacity: options.opacity,
            base_color: rgb_tuple(options.base_color),
            left_color: rgb_tuple(options.left_color),
            right_color: rgb_tuple(options.right_color),
        }
    }
}

impl ControllerSection {
    /// Converts the file section into validated construction options,
    /// clamping values a hand-edited file could push out of range.
    pub fn into_options(self) -> ControllerOptions {
        ControllerOptions {
            enabled: self.enabled,
            joystick_size: self.joystick_size.max(1.0),
            handle_size: self.handle_size.max(0.0),
            position: self.position,
            opacity: self.opacity.clamp(0.0, 1.0),
            base_color: from_tuple(self.base_color),
            left_color: from_tuple(self.left_color),
            right_color: from_tuple(self.right_color),
        }
    }
}

fn rgb_tuple(color: Color) -> (u8, u8, u8) {
    (color.r, color.g, color.b)
}

fn from_tuple((r, g, b): (u8, u8, u8)) -> Color {
    Color::rgb(r, g, b)
}

/// Location of the user config file, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("touchstick").join("config.toml"))
}

/// Loads the user config, degrading to defaults on any failure.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        warn!("No config directory on this platform, using defaults");
        return Config::default();
    };
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Config::default();
    }
    match load_from(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{e}; using defaults");
            Config::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}
