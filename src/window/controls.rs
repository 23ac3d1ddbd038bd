//! Toolbars for the RythmX window
//!
//! Both bars are drawn from a [`ControlsView`] snapshot and report what the
//! user did as [`UiAction`]s. They never touch the session directly.

use super::events::UiAction;
use crate::player::{ControlsView, PlayerConfig};
use eframe::egui;

const BAR_MARGIN: f32 = 10.0;

/// Top toolbar: open, fullscreen, mute
pub fn top_bar(ctx: &egui::Context, view: &ControlsView, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("top_bar")
        .frame(egui::Frame::default().fill(egui::Color32::from_gray(40)).inner_margin(BAR_MARGIN))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button("Open File")
                    .on_hover_text("Open a media file (Ctrl+O)")
                    .clicked()
                {
                    actions.push(UiAction::OpenFile);
                }
                if ui
                    .button("Fullscreen")
                    .on_hover_text("Toggle fullscreen (F)")
                    .clicked()
                {
                    actions.push(UiAction::ToggleFullscreen);
                }
                if ui.button(mute_label(view)).on_hover_text("M").clicked() {
                    actions.push(UiAction::ToggleMute);
                }
            });
        });
}

fn mute_label(view: &ControlsView) -> &'static str {
    if view.muted {
        "Unmute"
    } else {
        "Mute"
    }
}

/// Bottom control bar: progress row, then transport, speed and volume
pub fn control_bar(
    ctx: &egui::Context,
    view: &ControlsView,
    config: &PlayerConfig,
    fullscreen: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::TopBottomPanel::bottom("control_bar")
        .frame(egui::Frame::default().fill(egui::Color32::from_gray(40)).inner_margin(BAR_MARGIN))
        .show(ctx, |ui| {
            progress_row(ui, view, actions);
            ui.add_space(4.0);
            buttons_row(ui, view, config, fullscreen, actions);
        });
}

fn progress_row(ui: &mut egui::Ui, view: &ControlsView, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label(&view.current_time);

        // Leave room for the total time label on the right
        let label_width = 48.0;
        ui.spacing_mut().slider_width = (ui.available_width() - label_width).max(50.0);

        let mut value = view.progress_value;
        let max = view.progress_max.max(0.0);
        let response = ui.add(egui::Slider::new(&mut value, 0.0..=max).show_value(false));

        if response.drag_started() {
            actions.push(UiAction::ProgressDragStarted);
        }
        if response.dragged() && response.changed() {
            actions.push(UiAction::ProgressDragged(value));
        }
        if response.drag_stopped() {
            actions.push(UiAction::ProgressDragEnded(value));
        } else if response.clicked() {
            // A plain click jumps there: same pause, seek, resume sequence
            actions.push(UiAction::ProgressDragStarted);
            actions.push(UiAction::ProgressDragEnded(value));
        }

        ui.label(&view.total_time);
    });
}

fn buttons_row(
    ui: &mut egui::Ui,
    view: &ControlsView,
    config: &PlayerConfig,
    fullscreen: bool,
    actions: &mut Vec<UiAction>,
) {
    let step = config.seek_step;

    ui.horizontal(|ui| {
        if ui
            .button("⏪")
            .on_hover_text(format!("Rewind {} seconds", step))
            .clicked()
        {
            actions.push(UiAction::Rewind);
        }
        if ui.button(view.play_icon.glyph()).clicked() {
            actions.push(UiAction::TogglePlayPause);
        }
        if ui
            .button("⏩")
            .on_hover_text(format!("Forward {} seconds", step))
            .clicked()
        {
            actions.push(UiAction::Forward);
        }

        ui.separator();

        ui.label("Speed");
        ui.spacing_mut().slider_width = 120.0;
        let mut speed = view.speed;
        let speed_slider = egui::Slider::new(&mut speed, config.min_speed..=config.max_speed)
            .step_by(config.speed_step)
            .suffix("x")
            .fixed_decimals(2);
        if ui.add(speed_slider).changed() {
            actions.push(UiAction::SetSpeed(speed));
        }

        ui.separator();

        ui.label("Volume");
        let mut volume = view.volume;
        let volume_slider = egui::Slider::new(&mut volume, 0.0..=100.0).show_value(false);
        if ui.add(volume_slider).changed() {
            actions.push(UiAction::SetVolume(volume));
        }

        // The top bar stays hidden in fullscreen, so the way out lives here
        if fullscreen {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Exit Fullscreen").on_hover_text("Esc").clicked() {
                    actions.push(UiAction::ExitFullscreen);
                }
                if ui.button(mute_label(view)).clicked() {
                    actions.push(UiAction::ToggleMute);
                }
            });
        }
    });
}
