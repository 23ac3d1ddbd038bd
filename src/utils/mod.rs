//! Utility module for RythmX
//!
//! This module provides common utilities used throughout the application:
//! - Error handling with custom error types
//! - Configuration management
//! - Time formatting for the progress labels

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, GeneralConfig, WindowConfig};
pub use error::{Result, RythmxError};

use std::time::Duration;

/// Initialize the application configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. User configuration file, or `path` when given
/// 3. Environment variables
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Format a playback time for the progress labels
///
/// Always `MM:SS`; minutes keep counting past an hour ("61:40"), matching
/// what the time labels have room for.
pub fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}", minutes, seconds)
}

/// Convert a slider value in seconds into a `Duration`
///
/// Negative and non-finite values map to zero.
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}
