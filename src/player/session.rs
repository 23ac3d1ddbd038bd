//! Player session: one opened file bound to one playback handle

use crate::media::{BackendStatus, MediaBackend, MediaEvent, VideoFrame};
use crate::utils::error::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The live binding between an opened file and the playback engine
///
/// Dropping a session releases the engine; [`PlayerSession::release`] does
/// the same and reports failures.
pub struct PlayerSession {
    backend: Box<dyn MediaBackend>,
    source: PathBuf,
    duration: Option<Duration>,
    released: bool,
}

impl PlayerSession {
    pub fn new(backend: Box<dyn MediaBackend>, source: &Path) -> Self {
        Self {
            backend,
            source: source.to_path_buf(),
            duration: None,
            released: false,
        }
    }

    /// File this session plays
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn play(&mut self) -> Result<()> {
        self.backend.play()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.backend.pause()
    }

    pub fn is_playing(&self) -> bool {
        self.backend.status() == BackendStatus::Playing
    }

    pub fn position(&self) -> Duration {
        self.backend.position()
    }

    /// Total duration, once known
    pub fn duration(&self) -> Option<Duration> {
        self.duration.or_else(|| self.backend.duration())
    }

    /// Whether the position has reached the known duration
    pub fn at_end(&self) -> bool {
        match self.duration() {
            Some(duration) => duration > Duration::ZERO && self.position() >= duration,
            None => false,
        }
    }

    /// Seek to `position`, clamped to `[0, duration]` when the duration is known
    pub fn seek(&mut self, position: Duration) -> Result<Duration> {
        let target = match self.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };

        debug!("Seeking to {:?}", target);
        self.backend.seek(target)?;
        Ok(target)
    }

    /// Seek by `delta` seconds from the current position (negative seeks back)
    pub fn seek_relative(&mut self, delta: f64) -> Result<Duration> {
        let current = self.position().as_secs_f64();
        self.seek(crate::utils::secs_to_duration(current + delta))
    }

    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        debug!("Playback rate {:.2}x", rate);
        self.backend.set_rate(rate)
    }

    /// Set the output volume (0.0 to 1.0)
    pub fn set_volume(&mut self, level: f64) -> Result<()> {
        self.backend.set_volume(level.clamp(0.0, 1.0))
    }

    pub fn volume(&self) -> f64 {
        self.backend.volume()
    }

    /// Drain engine notifications, caching the duration as it becomes known
    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        let events = self.backend.poll_events();
        for event in &events {
            if let MediaEvent::Ready { duration } = event {
                self.duration = Some(*duration);
            }
        }
        events
    }

    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        self.backend.take_frame()
    }

    /// Release the engine now
    pub fn release(mut self) -> Result<()> {
        info!("Releasing session for {:?}", self.source);
        self.released = true;
        self.backend.dispose()
    }
}

impl Drop for PlayerSession {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.backend.dispose() {
            warn!("Failed to release session for {:?}: {}", self.source, e);
        }
    }
}
