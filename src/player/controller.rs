//! Player controller implementation for RythmX
//!
//! This module provides the PlayerController that binds the window's
//! controls to the current playback session and keeps the UI mirror in step
//! with session notifications.

use crate::media::{path_to_uri, MediaEvent, MediaService, VideoFrame};
use crate::player::{ControlsView, MuteState, PlayIcon, PlaybackState, PlayerConfig, PlayerSession};
use crate::utils::error::Result;
use crate::utils::secs_to_duration;
use crate::window::{AutoHideTimer, FileDialog, UiAction, WindowHost};

use log::{debug, error, info, warn};
use std::path::Path;
use std::time::{Duration, Instant};

/// How often the position label needs refreshing while playing
const POSITION_REFRESH: Duration = Duration::from_millis(250);

/// Owns the playback session and everything the window mirrors from it
pub struct PlayerController {
    service: Box<dyn MediaService>,
    config: PlayerConfig,

    /// At most one live session
    session: Option<PlayerSession>,
    state: PlaybackState,
    mute: MuteState,

    fullscreen: bool,

    /// Progress slider is held; position notifications must not move it
    dragging: bool,

    /// The engine reported end of media and nothing has moved the playhead since
    ended: bool,
    auto_hide: AutoHideTimer,

    view: ControlsView,
    base_title: String,
}

impl PlayerController {
    /// Create a controller with no media loaded
    pub fn new(service: Box<dyn MediaService>, config: PlayerConfig, title: &str) -> Self {
        let volume = config.default_volume.clamp(0.0, 100.0);
        let speed = config.clamp_speed(1.0);
        let auto_hide = AutoHideTimer::new(Duration::from_millis(config.controls_hide_delay_ms));

        Self {
            service,
            config,
            session: None,
            state: PlaybackState::NoMedia,
            mute: MuteState::default(),
            fullscreen: false,
            dragging: false,
            ended: false,
            auto_hide,
            view: ControlsView::new(title, volume, speed),
            base_title: title.to_string(),
        }
    }

    pub fn view(&self) -> &ControlsView {
        &self.view
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn session(&self) -> Option<&PlayerSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_muted(&self) -> bool {
        self.mute.is_muted()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Dispatch one user action
    pub fn handle_action(
        &mut self,
        action: UiAction,
        window: &mut dyn WindowHost,
        dialog: &mut dyn FileDialog,
        now: Instant,
    ) -> Result<()> {
        let title_before = self.view.title.clone();

        let result = match action {
            UiAction::OpenFile => self.open_file(dialog).map(|_| ()),
            UiAction::OpenPath(path) => self.open_path(&path),
            UiAction::TogglePlayPause => self.toggle_play_pause(),
            UiAction::Rewind => self.rewind(),
            UiAction::Forward => self.forward(),
            UiAction::ProgressDragStarted => self.begin_progress_drag(),
            UiAction::ProgressDragged(value) => {
                self.preview_progress_drag(value);
                Ok(())
            }
            UiAction::ProgressDragEnded(value) => self.end_progress_drag(value),
            UiAction::SetSpeed(value) => self.set_speed(value),
            UiAction::SetVolume(value) => self.set_volume(value),
            UiAction::ToggleMute => self.toggle_mute(),
            UiAction::ToggleFullscreen => self.toggle_fullscreen(window),
            UiAction::ExitFullscreen => {
                if self.fullscreen {
                    self.toggle_fullscreen(window)
                } else {
                    Ok(())
                }
            }
            UiAction::PointerMoved => {
                self.pointer_moved(now);
                Ok(())
            }
            UiAction::Quit => {
                window.close();
                Ok(())
            }
        };

        if self.view.title != title_before {
            window.set_title(&self.view.title);
        }

        result
    }

    /// Ask for a file and open it; `Ok(false)` when the dialog was cancelled
    pub fn open_file(&mut self, dialog: &mut dyn FileDialog) -> Result<bool> {
        let Some(path) = dialog.pick_file() else {
            debug!("File dialog cancelled");
            return Ok(false);
        };

        self.open_path(&path)?;
        Ok(true)
    }

    /// Replace the current session with one playing `path`
    ///
    /// The previous session is released before the new one is created. If
    /// the media service fails, the controller is left with no media.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        self.release_session();

        info!("Opening {:?}", path);
        let uri = path_to_uri(path)?;
        let backend = self.service.load(&uri)?;
        let mut session = PlayerSession::new(backend, path);

        let level = if self.mute.is_muted() {
            0.0
        } else {
            self.view.volume / 100.0
        };
        session.set_volume(level)?;
        if (self.view.speed - 1.0).abs() > f64::EPSILON {
            session.set_rate(self.view.speed)?;
        }

        self.view.reset_progress();
        self.view.title = match path.file_name() {
            Some(name) => format!("{} - {}", self.base_title, name.to_string_lossy()),
            None => self.base_title.clone(),
        };
        self.session = Some(session);
        self.state = PlaybackState::Paused;
        self.view.play_icon = PlayIcon::Play;

        if self.config.auto_play {
            self.resume()?;
        }

        Ok(())
    }

    /// Release the current session, if any
    fn release_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.state = PlaybackState::NoMedia;
        self.dragging = false;
        self.ended = false;
        self.view.play_icon = PlayIcon::Play;
        self.view.reset_progress();
        self.view.title = self.base_title.clone();

        if let Err(e) = session.release() {
            warn!("Session release reported an error: {}", e);
        }
    }

    fn resume(&mut self) -> Result<()> {
        if let Some(session) = self.session.as_mut() {
            session.play()?;
            self.state = PlaybackState::Playing;
            self.view.play_icon = PlayIcon::Pause;
        }
        Ok(())
    }

    /// Pause if playing, otherwise play
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if session.is_playing() {
            session.pause()?;
            self.state = PlaybackState::Paused;
            self.view.play_icon = PlayIcon::Play;
            return Ok(());
        }

        if self.ended || session.at_end() {
            session.seek(Duration::ZERO)?;
            self.ended = false;
        }
        self.resume()
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.seek_relative(-(self.config.seek_step as f64))
    }

    pub fn forward(&mut self) -> Result<()> {
        self.seek_relative(self.config.seek_step as f64)
    }

    /// Seek by `delta` seconds; the session clamps to the media bounds
    pub fn seek_relative(&mut self, delta: f64) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let landed = session.seek_relative(delta)?;
        self.ended = false;
        if !self.dragging {
            self.view.show_position(landed);
        }
        Ok(())
    }

    /// The progress slider was grabbed: pause so playback does not fight the drag
    pub fn begin_progress_drag(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        session.pause()?;
        self.state = PlaybackState::Paused;
        self.dragging = true;
        Ok(())
    }

    /// Track the slider while held without seeking
    pub fn preview_progress_drag(&mut self, value: f64) {
        if self.dragging {
            self.view.show_position(secs_to_duration(value));
        }
    }

    /// The progress slider was released at `value` seconds: seek, then resume
    pub fn end_progress_drag(&mut self, value: f64) -> Result<()> {
        self.dragging = false;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let landed = session.seek(secs_to_duration(value))?;
        self.ended = false;
        self.view.show_position(landed);
        self.resume()
    }

    /// Apply a speed multiplier, clamped to the configured range
    pub fn set_speed(&mut self, value: f64) -> Result<()> {
        let speed = self.config.clamp_speed(value);
        self.view.speed = speed;

        match self.session.as_mut() {
            Some(session) => session.set_rate(speed),
            None => Ok(()),
        }
    }

    /// Apply a volume slider position (0 to 100)
    ///
    /// Raising the slider while muted ends the mute.
    pub fn set_volume(&mut self, value: f64) -> Result<()> {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        self.view.volume = value;

        if value > 0.0 && self.mute.is_muted() {
            self.mute.clear();
            self.view.muted = false;
        }

        match self.session.as_mut() {
            Some(session) => session.set_volume(value / 100.0),
            None => Ok(()),
        }
    }

    /// Mute saving the current level, or restore the saved level
    pub fn toggle_mute(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let level = self.mute.toggle(session.volume());
        session.set_volume(level)?;
        self.view.volume = level * 100.0;
        self.view.muted = self.mute.is_muted();
        debug!("Muted: {}", self.view.muted);
        Ok(())
    }

    /// Ask the window to enter or leave fullscreen
    pub fn toggle_fullscreen(&mut self, window: &mut dyn WindowHost) -> Result<()> {
        let target = !self.fullscreen;
        window.set_fullscreen(target);
        self.on_fullscreen_changed(target)
    }

    /// Apply a fullscreen transition, whoever started it
    pub fn on_fullscreen_changed(&mut self, fullscreen: bool) -> Result<()> {
        if self.fullscreen == fullscreen {
            return Ok(());
        }

        info!("Fullscreen: {}", fullscreen);
        self.fullscreen = fullscreen;

        if fullscreen {
            self.view.set_bars_visible(false);
            if self.session.as_ref().is_some_and(|s| !s.is_playing()) {
                self.resume()?;
            }
        } else {
            self.auto_hide.cancel();
            self.view.set_bars_visible(true);
        }

        Ok(())
    }

    /// Pointer activity; only matters in fullscreen
    pub fn pointer_moved(&mut self, now: Instant) {
        if self.fullscreen {
            self.show_temporary_controls(now);
        }
    }

    /// Show the control bar and (re)start the hide timer
    pub fn show_temporary_controls(&mut self, now: Instant) {
        self.view.control_bar_visible = true;
        self.auto_hide.restart(now);
    }

    /// Per-frame housekeeping: the hide timer and session notifications
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        if self.auto_hide.poll(now) && self.fullscreen {
            debug!("Hiding controls after inactivity");
            self.view.control_bar_visible = false;
        }

        let events = match self.session.as_mut() {
            Some(session) => session.poll_events(),
            None => return Ok(()),
        };

        for event in events {
            self.on_media_event(event)?;
        }

        Ok(())
    }

    fn on_media_event(&mut self, event: MediaEvent) -> Result<()> {
        match event {
            MediaEvent::Ready { duration } => {
                debug!("Media ready, duration {:?}", duration);
                self.view.show_duration(duration);
            }
            MediaEvent::PositionChanged { position } => {
                if !self.dragging {
                    self.view.show_position(position);
                }
            }
            MediaEvent::EndOfMedia => {
                info!("End of media");
                if let Some(session) = self.session.as_mut() {
                    session.pause()?;
                }
                self.ended = true;
                self.state = PlaybackState::Paused;
                self.view.play_icon = PlayIcon::Play;
            }
            MediaEvent::Error { message } => {
                error!("Playback error: {}", message);
            }
        }

        Ok(())
    }

    /// Newest decoded frame from the session
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        self.session.as_mut().and_then(|s| s.take_frame())
    }

    /// How long the window may sleep before the next `tick` matters
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let refresh = (self.state == PlaybackState::Playing).then_some(POSITION_REFRESH);
        match (refresh, self.auto_hide.remaining(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Release everything; the window is closing
    pub fn close(&mut self) {
        self.auto_hide.cancel();
        self.release_session();
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.close();
    }
}
