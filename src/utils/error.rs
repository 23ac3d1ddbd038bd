//! Error types for RythmX
//!
//! This module defines custom error types used throughout the application.
//! We use thiserror for convenient error type definitions and anyhow for
//! application-level error handling.

use gstreamer as gst;
use thiserror::Error;

/// Main error type for RythmX
#[derive(Error, Debug)]
pub enum RythmxError {
    /// Window-related errors
    #[error("Window error: {0}")]
    Window(String),

    /// Media playback service errors
    #[error("Media error: {0}")]
    Media(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<gst::glib::Error> for RythmxError {
    fn from(err: gst::glib::Error) -> Self {
        RythmxError::Media(format!("GLib error: {}", err))
    }
}

impl From<gst::glib::BoolError> for RythmxError {
    fn from(err: gst::glib::BoolError) -> Self {
        RythmxError::Media(format!("GStreamer call failed: {}", err))
    }
}

impl From<gst::StateChangeError> for RythmxError {
    fn from(err: gst::StateChangeError) -> Self {
        RythmxError::Media(format!("State change failed: {}", err))
    }
}

impl RythmxError {
    /// Create a media error from string
    pub fn media_error<S: Into<String>>(msg: S) -> Self {
        RythmxError::Media(msg.into())
    }
}

/// Convenience type alias for Results in RythmX
pub type Result<T> = std::result::Result<T, RythmxError>;

/// Extension trait for converting other errors to RythmxError
pub trait IntoPlayerError<T> {
    /// Convert this error into a RythmxError with the given context
    fn window_err(self, context: &str) -> Result<T>;
    fn media_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn window_err(self, context: &str) -> Result<T> {
        self.map_err(|e| RythmxError::Window(format!("{}: {}", context, e)))
    }

    fn media_err(self, context: &str) -> Result<T> {
        self.map_err(|e| RythmxError::Media(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| RythmxError::Config(format!("{}: {}", context, e)))
    }
}
