//! Player state for RythmX
//!
//! Mute bookkeeping and the UI mirror. Neither holds authority over
//! playback: the session is the source of truth and the mirror is
//! recomputed from its notifications.

use crate::utils::format_time;
use std::time::Duration;

/// Mute flag plus the volume to restore on unmute
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MuteState {
    muted: bool,

    /// Session volume (0.0 to 1.0) captured when muting
    saved_volume: f64,
}

impl MuteState {
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume that unmute will restore
    pub fn saved_volume(&self) -> f64 {
        self.saved_volume
    }

    /// Remember `current` and return the level to apply (silence)
    pub fn mute(&mut self, current: f64) -> f64 {
        self.saved_volume = current;
        self.muted = true;
        0.0
    }

    /// Return the level saved by the last mute
    pub fn unmute(&mut self) -> f64 {
        self.muted = false;
        self.saved_volume
    }

    /// Flip the mute flag; returns the level the session should use
    pub fn toggle(&mut self, current: f64) -> f64 {
        if self.muted {
            self.unmute()
        } else {
            self.mute(current)
        }
    }

    /// Forget the mute without restoring anything
    pub fn clear(&mut self) {
        self.muted = false;
    }
}

/// Glyph on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    /// Pressing the button starts playback
    Play,

    /// Pressing the button pauses playback
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

/// Everything the window draws that depends on playback
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    /// Progress slider value in seconds
    pub progress_value: f64,

    /// Progress slider maximum in seconds
    pub progress_max: f64,

    /// Current time label
    pub current_time: String,

    /// Total time label
    pub total_time: String,

    /// Play/pause glyph
    pub play_icon: PlayIcon,

    /// Volume slider position (0 to 100)
    pub volume: f64,

    /// Speed slider position
    pub speed: f64,

    /// Mute button shows "Unmute" while muted
    pub muted: bool,

    /// Top toolbar visibility
    pub top_bar_visible: bool,

    /// Bottom control bar visibility
    pub control_bar_visible: bool,

    /// Window title
    pub title: String,
}

impl ControlsView {
    pub fn new(title: &str, volume: f64, speed: f64) -> Self {
        Self {
            progress_value: 0.0,
            progress_max: 0.0,
            current_time: format_time(Duration::ZERO),
            total_time: format_time(Duration::ZERO),
            play_icon: PlayIcon::Play,
            volume,
            speed,
            muted: false,
            top_bar_visible: true,
            control_bar_visible: true,
            title: title.to_string(),
        }
    }

    /// Zero the progress slider and both time labels
    pub fn reset_progress(&mut self) {
        self.progress_value = 0.0;
        self.progress_max = 0.0;
        self.current_time = format_time(Duration::ZERO);
        self.total_time = format_time(Duration::ZERO);
    }

    /// Mirror a new position into the slider and current-time label
    pub fn show_position(&mut self, position: Duration) {
        self.progress_value = position.as_secs_f64();
        self.current_time = format_time(position);
    }

    /// Mirror a known duration into the slider range and total-time label
    pub fn show_duration(&mut self, duration: Duration) {
        self.progress_max = duration.as_secs_f64();
        self.total_time = format_time(duration);
    }

    /// Show or hide both toolbars together
    pub fn set_bars_visible(&mut self, visible: bool) {
        self.top_bar_visible = visible;
        self.control_bar_visible = visible;
    }
}
