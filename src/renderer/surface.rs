//! Video surface: the texture holding the latest decoded frame

use super::fit_rect;
use crate::media::VideoFrame;
use eframe::egui;
use log::debug;

/// Keeps one GPU texture and replaces its contents as frames arrive
#[derive(Default)]
pub struct VideoSurface {
    texture: Option<egui::TextureHandle>,
    frame_size: [usize; 2],
}

impl VideoSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame has been uploaded since the last clear
    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    /// Upload a frame, reusing the existing texture when possible
    pub fn upload(&mut self, ctx: &egui::Context, frame: &VideoFrame) {
        let size = frame.size();
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
        let options = egui::TextureOptions::LINEAR;

        match self.texture.as_mut() {
            Some(texture) => texture.set(image, options),
            None => {
                debug!("Creating video texture {}x{}", size[0], size[1]);
                self.texture = Some(ctx.load_texture("rythmx_video_frame", image, options));
            }
        }
        self.frame_size = size;
    }

    /// Drop the texture; the next session starts from black
    pub fn clear(&mut self) {
        self.texture = None;
        self.frame_size = [0, 0];
    }

    /// Fill `area` black and paint the frame letterboxed inside it
    pub fn paint(&self, ui: &egui::Ui, area: egui::Rect) {
        let painter = ui.painter_at(area);
        painter.rect_filled(area, 0.0, egui::Color32::BLACK);

        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(
                texture.id(),
                fit_rect(area, self.frame_size),
                uv,
                egui::Color32::WHITE,
            );
        }
    }
}
