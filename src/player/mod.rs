//! Player controller module for RythmX
//!
//! This module owns the playback session and the state the window mirrors:
//! transport status, mute bookkeeping, slider positions and toolbar
//! visibility. All decoding happens behind [`crate::media::MediaBackend`].

mod controller;
mod session;
mod state;

pub use controller::PlayerController;
pub use session::PlayerSession;
pub use state::{ControlsView, MuteState, PlayIcon};

use serde::{Deserialize, Serialize};

/// Playback state as seen by the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No media loaded
    NoMedia,

    /// Media loaded but not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Auto-play when media is loaded
    pub auto_play: bool,

    /// Initial volume slider position (0 to 100)
    pub default_volume: f64,

    /// Rewind/forward step in seconds
    pub seek_step: u64,

    /// Slowest selectable playback speed
    pub min_speed: f64,

    /// Fastest selectable playback speed
    pub max_speed: f64,

    /// Speed slider increment
    pub speed_step: f64,

    /// Fullscreen control bar hide delay in milliseconds
    pub controls_hide_delay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            auto_play: true,
            default_volume: 50.0,
            seek_step: 10,
            min_speed: 0.5,
            max_speed: 2.0,
            speed_step: 0.25,
            controls_hide_delay_ms: 5000,
        }
    }
}

impl PlayerConfig {
    /// Clamp a speed multiplier into the configured range
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        if speed.is_nan() {
            return 1.0_f64.clamp(self.min_speed, self.max_speed);
        }
        speed.clamp(self.min_speed, self.max_speed)
    }
}
