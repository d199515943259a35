//! egui front-end for the topology editor (feature = "egui").
//!
//! The editor core draws into a [`RetainedSurface`]; each frame this module
//! feeds egui input into [`EditorState::handle`], paints the retained shapes
//! and the legend, and mirrors [`EditorState::status_line`] into the window
//! title.

#![cfg(feature = "egui")]

mod input;
mod render;

use eframe::egui;

use crate::config::EditorConfig;
use crate::editor::EditorState;
use crate::surface::RetainedSurface;

pub use input::translate_events;
pub use render::{paint_legend, paint_surface, to_color32};

/// The running editor window.
pub struct TopologyApp {
    pub editor: EditorState<RetainedSurface>,
    title: String,
}

impl TopologyApp {
    pub fn new(config: EditorConfig) -> Self {
        Self { editor: EditorState::new(config, RetainedSurface::new()), title: String::new() }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_rect_before_wrap();
        let response = ui.interact(avail, ui.id().with("canvas"), egui::Sense::click_and_drag());
        let events = ui.input(|i| translate_events(i, avail.min, response.hovered()));
        for event in events {
            self.editor.handle(event);
        }
        if self.editor.gesture().is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }

        let painter = ui.painter_at(avail);
        let palette = &self.editor.config.palette;
        painter.rect_filled(avail, 0.0, to_color32(palette.background));
        paint_surface(&painter, self.editor.surface(), avail.min);
        paint_legend(&painter, self.editor.legend(), palette, self.editor.mode(), avail.min);
    }
}

impl eframe::App for TopologyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().frame(egui::Frame::NONE).show(ctx, |ui| {
            self.canvas(ui);
        });

        let title = format!("topodraw | {}", self.editor.status_line());
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}
