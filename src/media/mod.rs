//! Media playback service for RythmX
//!
//! Decoding, buffering, audio output and frame timing all happen inside an
//! external playback engine. This module defines the seam the player talks
//! to and the GStreamer implementation behind it.

mod gst_pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use gst_pipeline::{path_to_uri, FrameNotify, GstBackend, GstMediaService};

use crate::utils::error::Result;
use std::time::Duration;

/// Factory for playback handles, one per opened media file
pub trait MediaService {
    /// Open `uri` and return a handle that has not started playing yet
    fn load(&self, uri: &str) -> Result<Box<dyn MediaBackend>>;
}

/// A single playback handle bound to one media file
///
/// Implementations are driven from the UI thread only.
pub trait MediaBackend {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to an absolute position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set the playback rate multiplier (1.0 = normal)
    fn set_rate(&mut self, rate: f64) -> Result<()>;

    /// Set the output volume (0.0 to 1.0)
    fn set_volume(&mut self, level: f64) -> Result<()>;

    /// Current output volume (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Current transport status
    fn status(&self) -> BackendStatus;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, once the engine knows it
    fn duration(&self) -> Option<Duration>;

    /// Drain notifications produced since the last call
    fn poll_events(&mut self) -> Vec<MediaEvent>;

    /// Take the newest decoded frame, if one arrived since the last call
    fn take_frame(&mut self) -> Option<VideoFrame>;

    /// Release every resource held by the engine
    fn dispose(&mut self) -> Result<()>;
}

/// Transport status reported by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// Loaded, not started yet
    Ready,

    /// Currently playing
    Playing,

    /// Paused
    Paused,

    /// Resources released
    Disposed,
}

/// Notifications produced by the playback engine
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Media is ready and its duration is known
    Ready { duration: Duration },

    /// Playback position moved
    PositionChanged { position: Duration },

    /// Playback reached the end of the media
    EndOfMedia,

    /// The engine reported an error
    Error { message: String },
}

/// A decoded video frame in tightly packed RGBA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl VideoFrame {
    /// Bytes per RGBA pixel
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Copy a frame out of a buffer whose rows may be padded to `stride` bytes
    ///
    /// Returns `None` when the buffer is too short for the given geometry.
    pub fn from_strided(width: u32, height: u32, stride: usize, data: &[u8]) -> Option<Self> {
        let row_len = width as usize * Self::BYTES_PER_PIXEL;
        if stride < row_len || height == 0 || width == 0 {
            return None;
        }

        let needed = stride * (height as usize - 1) + row_len;
        if data.len() < needed {
            return None;
        }

        let pixels = if stride == row_len {
            data[..row_len * height as usize].to_vec()
        } else {
            let mut pixels = Vec::with_capacity(row_len * height as usize);
            for row in data.chunks(stride).take(height as usize) {
                pixels.extend_from_slice(&row[..row_len]);
            }
            pixels
        };

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Frame size as `[width, height]`
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}
