//! The eframe application hosting the player
//!
//! Each frame: sync fullscreen from the viewport, draw the bars, paint the
//! video, apply the actions the user produced, then let the controller
//! drain session notifications.

use super::controls;
use super::events::{collect_input_actions, UiAction};
use super::{EguiWindowHost, RfdFileDialog};
use crate::player::{PlaybackState, PlayerController};
use crate::renderer::VideoSurface;
use eframe::egui;
use log::error;
use std::path::PathBuf;
use std::time::Instant;

pub struct RythmxApp {
    controller: PlayerController,
    dialog: RfdFileDialog,
    surface: VideoSurface,

    /// Fullscreen flag last reported by the viewport
    observed_fullscreen: Option<bool>,

    /// Source the surface's frame came from
    shown_source: Option<PathBuf>,
}

impl RythmxApp {
    /// Build the app and open `initial` if given
    pub fn new(ctx: &egui::Context, controller: PlayerController, initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            controller,
            dialog: RfdFileDialog::default(),
            surface: VideoSurface::new(),
            observed_fullscreen: None,
            shown_source: None,
        };

        if let Some(path) = initial {
            let mut window = EguiWindowHost::new(ctx);
            app.apply(UiAction::OpenPath(path), &mut window, Instant::now());
        }

        app
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    fn apply(&mut self, action: UiAction, window: &mut EguiWindowHost<'_>, now: Instant) {
        if let Err(e) = self
            .controller
            .handle_action(action, window, &mut self.dialog, now)
        {
            error!("{}", e);
        }
    }

    fn sync_fullscreen(&mut self, ctx: &egui::Context) {
        let Some(fullscreen) = ctx.input(|i| i.viewport().fullscreen) else {
            return;
        };
        if self.observed_fullscreen == Some(fullscreen) {
            return;
        }

        self.observed_fullscreen = Some(fullscreen);
        if let Err(e) = self.controller.on_fullscreen_changed(fullscreen) {
            error!("{}", e);
        }
    }

    fn refresh_surface(&mut self, ctx: &egui::Context) {
        let source = self.controller.session().map(|s| s.source().to_path_buf());
        if source != self.shown_source {
            self.surface.clear();
            self.shown_source = source;
        }

        if let Some(frame) = self.controller.take_frame() {
            self.surface.upload(ctx, &frame);
        }
    }
}

impl eframe::App for RythmxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sync_fullscreen(ctx);

        let fullscreen = self.controller.is_fullscreen();
        let mut actions = collect_input_actions(ctx, fullscreen);
        let view = self.controller.view().clone();

        if view.top_bar_visible {
            controls::top_bar(ctx, &view, &mut actions);
        }
        if view.control_bar_visible {
            controls::control_bar(ctx, &view, self.controller.config(), fullscreen, &mut actions);
        }

        let no_media = self.controller.state() == PlaybackState::NoMedia;
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                self.surface.paint(ui, area);

                if no_media {
                    ui.painter().text(
                        area.center(),
                        egui::Align2::CENTER_CENTER,
                        "Open a file to start playing",
                        egui::FontId::proportional(18.0),
                        egui::Color32::GRAY,
                    );
                }
            });

        let had_actions = !actions.is_empty();
        let mut window = EguiWindowHost::new(ctx);
        for action in actions {
            self.apply(action, &mut window, now);
        }

        if let Err(e) = self.controller.tick(now) {
            error!("{}", e);
        }
        self.refresh_surface(ctx);

        if had_actions {
            ctx.request_repaint();
        } else if let Some(wait) = self.controller.next_wakeup(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
