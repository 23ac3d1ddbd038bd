//! Configuration management for RythmX
//!
//! This module handles loading application configuration from a TOML file
//! and environment variables. Configuration is read-only at runtime.

use crate::player::PlayerConfig;
use crate::utils::error::{IntoPlayerError, Result, RythmxError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Playback behavior
    pub playback: PlayerConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width
    pub width: u32,

    /// Initial window height
    pub height: u32,

    /// Start in fullscreen mode
    pub fullscreen: bool,

    /// Window title
    pub title: String,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            fullscreen: false,
            title: "RythmX".to_string(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the user config file
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/rythmx/config.toml on Linux)
    /// 3. Environment variables (RYTHMX_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit file instead of the user config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RythmxError::NotFound(format!(
                "config file {}",
                path.display()
            )));
        }

        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML file; missing keys keep their defaults
    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).config_err("Failed to read config file")?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).config_err("Failed to parse config file")
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("RYTHMX_WINDOW_WIDTH") {
            self.window.width = width
                .parse()
                .map_err(|_| RythmxError::Config("Invalid RYTHMX_WINDOW_WIDTH".to_string()))?;
        }

        if let Ok(height) = std::env::var("RYTHMX_WINDOW_HEIGHT") {
            self.window.height = height
                .parse()
                .map_err(|_| RythmxError::Config("Invalid RYTHMX_WINDOW_HEIGHT".to_string()))?;
        }

        if let Ok(volume) = std::env::var("RYTHMX_VOLUME") {
            self.playback.default_volume = volume
                .parse()
                .map_err(|_| RythmxError::Config("Invalid RYTHMX_VOLUME".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("RYTHMX_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(RythmxError::Config(
                "Window dimensions must be non-zero".to_string(),
            ));
        }

        let playback = &self.playback;
        if !(0.0..=100.0).contains(&playback.default_volume) {
            return Err(RythmxError::Config(
                "Default volume must be between 0 and 100".to_string(),
            ));
        }

        if !(playback.min_speed > 0.0 && playback.min_speed <= playback.max_speed) {
            return Err(RythmxError::Config(format!(
                "Invalid speed range {}..={}",
                playback.min_speed, playback.max_speed
            )));
        }

        if playback.speed_step <= 0.0 {
            return Err(RythmxError::Config("Speed step must be positive".to_string()));
        }

        if playback.seek_step == 0 {
            return Err(RythmxError::Config("Seek step must be non-zero".to_string()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(RythmxError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rythmx").join("config.toml"))
    }
}
