//! RythmX - a small desktop video player
//!
//! The window is egui/eframe, decoding and output go through GStreamer, and
//! [`player::PlayerController`] sits between them holding the one live
//! playback session.

pub mod media;
pub mod player;
pub mod renderer;
pub mod utils;
pub mod window;

pub use media::{GstMediaService, MediaBackend, MediaEvent, MediaService};
pub use player::{PlaybackState, PlayerConfig, PlayerController};
pub use utils::{Config, Result, RythmxError};
