//! Renderer module for RythmX
//!
//! Decoded frames are uploaded into an egui texture and painted into the
//! central area, scaled to fit while keeping the video's aspect ratio.

pub mod surface;

pub use surface::VideoSurface;

use eframe::egui;

/// Largest rectangle with the frame's aspect ratio that fits in `area`,
/// centered on it
///
/// Degenerate frame sizes fill the whole area.
pub fn fit_rect(area: egui::Rect, frame_size: [usize; 2]) -> egui::Rect {
    let [width, height] = frame_size;
    if width == 0 || height == 0 || area.width() <= 0.0 || area.height() <= 0.0 {
        return area;
    }

    let frame_aspect = width as f32 / height as f32;
    let area_aspect = area.width() / area.height();

    let size = if frame_aspect > area_aspect {
        // Wider than the area: bars above and below
        egui::vec2(area.width(), area.width() / frame_aspect)
    } else {
        egui::vec2(area.height() * frame_aspect, area.height())
    };

    egui::Rect::from_center_size(area.center(), size)
}
