//! Window management module for RythmX
//!
//! This module handles the application window, its toolbars, input mapping
//! and the fullscreen auto-hide behaviour. The controller only sees the
//! window through the [`WindowHost`] and [`FileDialog`] traits.

pub mod app;
pub mod auto_hide;
pub mod controls;
pub mod events;

pub use app::RythmxApp;
pub use auto_hide::AutoHideTimer;
pub use events::UiAction;

use eframe::egui;
use std::path::PathBuf;

/// Window operations the controller needs
#[cfg_attr(test, mockall::automock)]
pub trait WindowHost {
    /// Enter or leave fullscreen
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Set the window title
    fn set_title(&mut self, title: &str);

    /// Close the window
    fn close(&mut self);
}

/// File selection dialog
#[cfg_attr(test, mockall::automock)]
pub trait FileDialog {
    /// Ask the user for a file; `None` when cancelled
    fn pick_file(&mut self) -> Option<PathBuf>;
}

/// [`WindowHost`] over an egui viewport
pub struct EguiWindowHost<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiWindowHost<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl WindowHost for EguiWindowHost<'_> {
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }

    fn set_title(&mut self, title: &str) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }

    fn close(&mut self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

/// Native file dialog that reopens in the last used directory
#[derive(Debug, Default)]
pub struct RfdFileDialog {
    last_dir: Option<PathBuf>,
}

impl FileDialog for RfdFileDialog {
    fn pick_file(&mut self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title("Open media file");
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file()?;
        self.last_dir = picked.parent().map(|p| p.to_path_buf());
        Some(picked)
    }
}
