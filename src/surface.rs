//! Drawing surface contract consumed by the editor core.
//!
//! The core never paints. It creates, moves, restyles and deletes retained
//! primitives through [`DrawingSurface`] and reads geometry back from it: the
//! surface is the single source of truth for where a node is.
//!
//! [`RetainedSurface`] is an in-memory implementation. It backs the headless
//! tests and is also what the egui front-end paints from every frame.

use std::collections::HashMap;

use crate::config::Color;
use crate::geometry::{Point, Rect, Vec2};

/// Handle of a drawing primitive. Not a model identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Oval,
    Rect,
    Line,
}

/// Where a primitive lives. Only [`Layer::Diagram`] is panned and zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Nodes and edges.
    Diagram,
    /// Interaction feedback (link preview, selection box). Screen-fixed.
    Preview,
    /// Fixed chrome such as the legend.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    /// Bounding box of an oval or rectangle.
    Bounds(Rect),
    /// End points of a line.
    Segment(Point, Point),
}

impl ShapeGeometry {
    pub fn bounds(&self) -> Rect {
        match *self {
            ShapeGeometry::Bounds(r) => r,
            ShapeGeometry::Segment(a, b) => Rect::from_corners(a, b),
        }
    }

    fn translated(&self, v: Vec2) -> Self {
        match *self {
            ShapeGeometry::Bounds(r) => ShapeGeometry::Bounds(r.translate(v)),
            ShapeGeometry::Segment(a, b) => ShapeGeometry::Segment(a.offset(v), b.offset(v)),
        }
    }

    fn scaled_about(&self, pivot: Point, factor: f32) -> Self {
        match *self {
            ShapeGeometry::Bounds(r) => ShapeGeometry::Bounds(r.scaled_about(pivot, factor)),
            ShapeGeometry::Segment(a, b) => {
                ShapeGeometry::Segment(a.scaled_about(pivot, factor), b.scaled_about(pivot, factor))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl ShapeStyle {
    pub fn filled(fill: Color) -> Self {
        Self { fill: Some(fill), stroke: None, stroke_width: 0.0 }
    }

    pub fn stroked(stroke: Color, width: f32) -> Self {
        Self { fill: None, stroke: Some(stroke), stroke_width: width }
    }

    pub fn with_outline(mut self, stroke: Color, width: f32) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }
}

/// Retained-mode drawing primitives as seen by the editor core.
pub trait DrawingSurface {
    fn create_shape(
        &mut self,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
        layer: Layer,
    ) -> ShapeId;

    fn move_shape(&mut self, id: ShapeId, delta: Vec2);

    fn set_geometry(&mut self, id: ShapeId, geometry: ShapeGeometry);

    fn set_style(&mut self, id: ShapeId, style: ShapeStyle);

    fn delete_shape(&mut self, id: ShapeId);

    /// Move a primitive beneath everything else in draw order.
    fn lower_to_bottom(&mut self, id: ShapeId);

    fn geometry(&self, id: ShapeId) -> Option<ShapeGeometry>;

    fn bounds(&self, id: ShapeId) -> Option<Rect> {
        self.geometry(id).map(|g| g.bounds())
    }

    /// Primitives overlapping `area`, bottom-most first. Lines are tested
    /// against their actual segment, not their bounding box.
    fn query_overlapping(&self, area: Rect) -> Vec<ShapeId>;

    /// Scale every primitive of `layer` about `pivot`.
    fn scale_layer(&mut self, layer: Layer, pivot: Point, factor: f32);

    fn translate_layer(&mut self, layer: Layer, delta: Vec2);

    fn clear_layer(&mut self, layer: Layer);
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    pub style: ShapeStyle,
    pub layer: Layer,
}

/// A retained list of shapes kept in draw order.
#[derive(Debug, Clone, Default)]
pub struct RetainedSurface {
    shapes: HashMap<ShapeId, Shape>,
    /// Draw order, bottom-most first.
    order: Vec<ShapeId>,
    next_id: u64,
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// All shapes in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.order.iter().filter_map(|id| self.shapes.get(id).map(|s| (*id, s)))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn layer_len(&self, layer: Layer) -> usize {
        self.shapes.values().filter(|s| s.layer == layer).count()
    }
}

impl DrawingSurface for RetainedSurface {
    fn create_shape(
        &mut self,
        kind: ShapeKind,
        geometry: ShapeGeometry,
        style: ShapeStyle,
        layer: Layer,
    ) -> ShapeId {
        self.next_id += 1;
        let id = ShapeId(self.next_id);
        self.shapes.insert(id, Shape { kind, geometry, style, layer });
        self.order.push(id);
        id
    }

    fn move_shape(&mut self, id: ShapeId, delta: Vec2) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.geometry = s.geometry.translated(delta);
        }
    }

    fn set_geometry(&mut self, id: ShapeId, geometry: ShapeGeometry) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.geometry = geometry;
        }
    }

    fn set_style(&mut self, id: ShapeId, style: ShapeStyle) {
        if let Some(s) = self.shapes.get_mut(&id) {
            s.style = style;
        }
    }

    fn delete_shape(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_some() {
            self.order.retain(|o| *o != id);
        }
    }

    fn lower_to_bottom(&mut self, id: ShapeId) {
        if let Some(pos) = self.order.iter().position(|o| *o == id) {
            let id = self.order.remove(pos);
            self.order.insert(0, id);
        }
    }

    fn geometry(&self, id: ShapeId) -> Option<ShapeGeometry> {
        self.shapes.get(&id).map(|s| s.geometry)
    }

    fn query_overlapping(&self, area: Rect) -> Vec<ShapeId> {
        self.iter()
            .filter(|(_, s)| match s.geometry {
                ShapeGeometry::Segment(a, b) => area.intersects_segment(a, b),
                ShapeGeometry::Bounds(r) => r.overlaps(&area),
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn scale_layer(&mut self, layer: Layer, pivot: Point, factor: f32) {
        for s in self.shapes.values_mut().filter(|s| s.layer == layer) {
            s.geometry = s.geometry.scaled_about(pivot, factor);
        }
    }

    fn translate_layer(&mut self, layer: Layer, delta: Vec2) {
        for s in self.shapes.values_mut().filter(|s| s.layer == layer) {
            s.geometry = s.geometry.translated(delta);
        }
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.shapes.retain(|_, s| s.layer != layer);
        let shapes = &self.shapes;
        self.order.retain(|id| shapes.contains_key(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(surface: &mut RetainedSurface, x: f32, y: f32, layer: Layer) -> ShapeId {
        surface.create_shape(
            ShapeKind::Oval,
            ShapeGeometry::Bounds(Rect::from_center(Point::new(x, y), 5.0)),
            ShapeStyle::filled(Color::rgb(1, 2, 3)),
            layer,
        )
    }

    #[test]
    fn test_query_reports_draw_order() {
        let mut s = RetainedSurface::new();
        let a = dot(&mut s, 10.0, 10.0, Layer::Diagram);
        let b = dot(&mut s, 12.0, 10.0, Layer::Diagram);
        let hit = Rect::from_center(Point::new(11.0, 10.0), 0.0);
        assert_eq!(s.query_overlapping(hit), vec![a, b]);
        s.lower_to_bottom(b);
        assert_eq!(s.query_overlapping(hit), vec![b, a]);
    }

    #[test]
    fn test_query_tests_lines_by_segment() {
        let mut s = RetainedSurface::new();
        let line = s.create_shape(
            ShapeKind::Line,
            ShapeGeometry::Segment(Point::new(100.0, 100.0), Point::new(300.0, 300.0)),
            ShapeStyle::stroked(Color::rgb(1, 2, 3), 2.0),
            Layer::Diagram,
        );
        assert!(s.query_overlapping(Rect::from_center(Point::new(280.0, 120.0), 6.0)).is_empty());
        assert_eq!(s.query_overlapping(Rect::from_center(Point::new(203.0, 200.0), 6.0)), vec![line]);
    }

    #[test]
    fn test_scale_only_touches_layer() {
        let mut s = RetainedSurface::new();
        let d = dot(&mut s, 20.0, 0.0, Layer::Diagram);
        let o = dot(&mut s, 20.0, 0.0, Layer::Overlay);
        s.scale_layer(Layer::Diagram, Point::new(0.0, 0.0), 2.0);
        assert_eq!(s.bounds(d).unwrap().center(), Point::new(40.0, 0.0));
        assert_eq!(s.bounds(o).unwrap().center(), Point::new(20.0, 0.0));
    }

    #[test]
    fn test_clear_layer_and_delete() {
        let mut s = RetainedSurface::new();
        let d = dot(&mut s, 0.0, 0.0, Layer::Diagram);
        dot(&mut s, 0.0, 0.0, Layer::Overlay);
        s.delete_shape(d);
        assert!(s.geometry(d).is_none());
        dot(&mut s, 0.0, 0.0, Layer::Diagram);
        s.clear_layer(Layer::Diagram);
        assert_eq!(s.len(), 1);
        assert_eq!(s.layer_len(Layer::Overlay), 1);
    }
}
