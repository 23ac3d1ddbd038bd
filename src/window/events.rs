//! Input handling for the RythmX window
//!
//! This module converts egui input (keys, pointer motion, dropped files) and
//! widget interactions into [`UiAction`]s for the controller.

use eframe::egui;
use std::path::PathBuf;

/// Something the user asked the player to do
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Show the file dialog
    OpenFile,

    /// Open a file without the dialog (dropped onto the window)
    OpenPath(PathBuf),

    TogglePlayPause,

    /// Seek back by the configured step
    Rewind,

    /// Seek forward by the configured step
    Forward,

    /// The progress slider was grabbed
    ProgressDragStarted,

    /// The progress slider moved while held (seconds)
    ProgressDragged(f64),

    /// The progress slider was let go at a value (seconds)
    ProgressDragEnded(f64),

    /// Speed slider moved
    SetSpeed(f64),

    /// Volume slider moved (0 to 100)
    SetVolume(f64),

    ToggleMute,

    ToggleFullscreen,

    /// Leave fullscreen if active
    ExitFullscreen,

    /// Pointer moved over the window
    PointerMoved,

    Quit,
}

/// Map a key press to an action
pub fn action_for_key(key: egui::Key, modifiers: egui::Modifiers, fullscreen: bool) -> Option<UiAction> {
    if modifiers.command {
        return match key {
            egui::Key::O => Some(UiAction::OpenFile),
            egui::Key::Q => Some(UiAction::Quit),
            _ => None,
        };
    }

    match key {
        egui::Key::Enter | egui::Key::Space => Some(UiAction::TogglePlayPause),
        egui::Key::ArrowLeft => Some(UiAction::Rewind),
        egui::Key::ArrowRight => Some(UiAction::Forward),
        egui::Key::F => Some(UiAction::ToggleFullscreen),
        egui::Key::M => Some(UiAction::ToggleMute),
        egui::Key::Escape if fullscreen => Some(UiAction::ExitFullscreen),
        _ => None,
    }
}

/// Collect actions from this frame's raw input
pub fn collect_input_actions(ctx: &egui::Context, fullscreen: bool) -> Vec<UiAction> {
    ctx.input(|input| {
        let mut actions = Vec::new();

        for event in &input.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } = event
            {
                if let Some(action) = action_for_key(*key, *modifiers, fullscreen) {
                    actions.push(action);
                }
            }
        }

        if input.pointer.delta() != egui::Vec2::ZERO {
            actions.push(UiAction::PointerMoved);
        }

        // Only the first dropped file is opened; there is no playlist
        if let Some(path) = input.raw.dropped_files.iter().find_map(|f| f.path.clone()) {
            actions.push(UiAction::OpenPath(path));
        }

        actions
    })
}
