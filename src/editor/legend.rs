//! Legend / controls panel drawn on the fixed overlay layer.
//!
//! The panel and its swatches (router oval, switch square, link line) are
//! retained shapes on [`Layer::Overlay`], so zoom and pan never
//! touch them. Text is left to the front-end: each [`LegendLabel`] carries the
//! anchor point its text is centered on.

use crate::config::Palette;
use crate::geometry::{Point, Rect};
use crate::surface::{DrawingSurface, Layer, ShapeGeometry, ShapeId, ShapeKind, ShapeStyle};

use super::state::EditMode;

/// One line of legend text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLabel {
    pub text: &'static str,
    /// Center of the text.
    pub anchor: Point,
    /// The mode this entry selects. `None` for the title and the clear command.
    pub mode: Option<EditMode>,
    /// Drawn in the warning color.
    pub warning: bool,
    pub heading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Legend {
    shapes: Vec<ShapeId>,
    labels: Vec<LegendLabel>,
}

const PANEL: (f32, f32, f32, f32) = (10.0, 10.0, 260.0, 170.0);

fn label(text: &'static str, x: f32, y: f32, mode: Option<EditMode>) -> LegendLabel {
    LegendLabel { text, anchor: Point::new(x, y), mode, warning: false, heading: false }
}

impl Legend {
    /// Draw the panel and its swatches onto `surface`.
    pub fn draw(surface: &mut dyn DrawingSurface, palette: &Palette) -> Self {
        let (x0, y0, x1, y1) = PANEL;
        let rect = |ax, ay, bx, by| Rect::from_corners(Point::new(ax, ay), Point::new(bx, by));
        let mut shapes = Vec::with_capacity(4);
        shapes.push(surface.create_shape(
            ShapeKind::Rect,
            ShapeGeometry::Bounds(rect(x0, y0, x1, y1)),
            ShapeStyle::filled(palette.legend_panel).with_outline(palette.legend_outline, 1.0),
            Layer::Overlay,
        ));
        shapes.push(surface.create_shape(
            ShapeKind::Oval,
            ShapeGeometry::Bounds(rect(30.0, 45.0, 60.0, 75.0)),
            ShapeStyle::filled(palette.router),
            Layer::Overlay,
        ));
        shapes.push(surface.create_shape(
            ShapeKind::Rect,
            ShapeGeometry::Bounds(rect(30.0, 80.0, 60.0, 110.0)),
            ShapeStyle::filled(palette.switch),
            Layer::Overlay,
        ));
        shapes.push(surface.create_shape(
            ShapeKind::Line,
            ShapeGeometry::Segment(Point::new(30.0, 130.0), Point::new(60.0, 130.0)),
            ShapeStyle::stroked(palette.edge, 2.0),
            Layer::Overlay,
        ));

        let labels = vec![
            LegendLabel { heading: true, ..label("LEGEND / CONTROLS", 130.0, 25.0, None) },
            label("Router (R)", 160.0, 60.0, Some(EditMode::PlaceRouter)),
            label("Switch (S)", 160.0, 95.0, Some(EditMode::PlaceSwitch)),
            label("Connect Mode (N)", 160.0, 130.0, Some(EditMode::Neutral)),
            LegendLabel { warning: true, ..label("Clear Topology (C)", 130.0, 155.0, None) },
        ];
        Self { shapes, labels }
    }

    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    pub fn labels(&self) -> &[LegendLabel] {
        &self.labels
    }

    pub fn bounds(&self) -> Rect {
        let (x0, y0, x1, y1) = PANEL;
        Rect::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }
}
