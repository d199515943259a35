#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke};

use crate::config::{Color, Palette};
use crate::editor::{EditMode, Legend};
use crate::geometry::{Point, Rect};
use crate::surface::{Layer, RetainedSurface, Shape, ShapeGeometry, ShapeKind};

pub fn to_color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

fn to_pos(p: Point, origin: Pos2) -> Pos2 {
    Pos2::new(origin.x + p.x, origin.y + p.y)
}

fn to_rect(r: Rect, origin: Pos2) -> egui::Rect {
    egui::Rect::from_min_max(to_pos(r.min, origin), to_pos(r.max, origin))
}

fn paint_shape(painter: &egui::Painter, shape: &Shape, origin: Pos2) {
    let stroke = shape
        .style
        .stroke
        .map(|c| Stroke::new(shape.style.stroke_width, to_color32(c)))
        .unwrap_or(Stroke::NONE);
    let fill = shape.style.fill.map(to_color32);
    match (shape.kind, shape.geometry) {
        (ShapeKind::Line, ShapeGeometry::Segment(a, b)) => {
            painter.line_segment([to_pos(a, origin), to_pos(b, origin)], stroke);
        }
        (ShapeKind::Oval, geometry) => {
            let r = to_rect(geometry.bounds(), origin);
            let radius = r.width().min(r.height()) / 2.0;
            if let Some(fill) = fill {
                painter.circle_filled(r.center(), radius, fill);
            }
            if stroke != Stroke::NONE {
                painter.circle_stroke(r.center(), radius, stroke);
            }
        }
        (_, geometry) => {
            let r = to_rect(geometry.bounds(), origin);
            if let Some(fill) = fill {
                painter.rect_filled(r, 0.0, fill);
            }
            if stroke != Stroke::NONE {
                painter.rect_stroke(r, 0.0, stroke, egui::StrokeKind::Inside);
            }
        }
    }
}

/// Paint every retained shape, diagram first, then previews, then overlays.
pub fn paint_surface(painter: &egui::Painter, surface: &RetainedSurface, origin: Pos2) {
    for layer in [Layer::Diagram, Layer::Preview, Layer::Overlay] {
        for (_, shape) in surface.iter().filter(|(_, s)| s.layer == layer) {
            paint_shape(painter, shape, origin);
        }
    }
}

/// Legend text over the overlay swatches. The active mode's entry is drawn
/// in the highlight color.
pub fn paint_legend(painter: &egui::Painter, legend: &Legend, palette: &Palette, mode: EditMode, origin: Pos2) {
    for label in legend.labels() {
        let color = if label.warning {
            palette.legend_warning
        } else if label.mode == Some(mode) {
            palette.highlight
        } else {
            palette.legend_text
        };
        let font = if label.heading { FontId::proportional(15.0) } else { FontId::proportional(13.0) };
        painter.text(to_pos(label.anchor, origin), Align2::CENTER_CENTER, label.text, font, to_color32(color));
    }
}
