//! Pan and zoom of the diagram layer.
//!
//! The diagram lives directly in screen coordinates: zooming scales the
//! diagram primitives about the cursor and panning translates them, the same
//! way a retained canvas would. [`ViewTransform`] keeps the bookkeeping (zoom
//! factor and where the world origin ended up) so screen points can still be
//! mapped back to world coordinates.

use tracing::debug;

use crate::geometry::{Point, Vec2};
use crate::surface::{DrawingSurface, Layer};

/// Factors this close to 1.0 are treated as no-ops.
const FACTOR_EPS: f32 = 1e-6;

/// Normalized wheel direction, one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    /// Screen position of world (0, 0).
    origin: Point,
    zoom_min: f32,
    zoom_max: f32,
    zoom_step: f32,
}

impl ViewTransform {
    pub fn new(zoom_min: f32, zoom_max: f32, zoom_step: f32) -> Self {
        Self {
            zoom: 1.0,
            origin: Point::default(),
            zoom_min,
            zoom_max,
            zoom_step,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Accumulated pan, i.e. the screen position of the world origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.origin.x) / self.zoom, (screen.y - self.origin.y) / self.zoom)
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.zoom + self.origin.x, world.y * self.zoom + self.origin.y)
    }

    /// Scale factor and resulting zoom of one tick in `direction`.
    ///
    /// Near a bound the factor is shortened so the zoom lands exactly on it.
    fn tick(&self, direction: WheelDirection) -> (f32, f32) {
        let nominal = match direction {
            WheelDirection::In => self.zoom_step,
            WheelDirection::Out => 1.0 / self.zoom_step,
        };
        let target = self.zoom * nominal;
        if target > self.zoom_max {
            (self.zoom_max / self.zoom, self.zoom_max)
        } else if target < self.zoom_min {
            (self.zoom_min / self.zoom, self.zoom_min)
        } else {
            (nominal, target)
        }
    }

    /// Apply one wheel tick about `pivot`. Returns the factor applied, or
    /// `None` when the zoom is already pinned at the bound.
    pub fn zoom_tick(
        &mut self,
        surface: &mut dyn DrawingSurface,
        direction: WheelDirection,
        pivot: Point,
    ) -> Option<f32> {
        let (factor, next) = self.tick(direction);
        if (factor - 1.0).abs() <= FACTOR_EPS {
            return None;
        }
        surface.scale_layer(Layer::Diagram, pivot, factor);
        self.zoom = next;
        self.origin = self.origin.scaled_about(pivot, factor);
        debug!(zoom = self.zoom, factor, "zoom");
        Some(factor)
    }

    pub fn pan_by(&mut self, surface: &mut dyn DrawingSurface, delta: Vec2) {
        if delta.is_degenerate() {
            return;
        }
        surface.translate_layer(Layer::Diagram, delta);
        self.origin = self.origin.offset(delta);
    }

    /// Back to zoom 1.0 with no pan. Does not touch the surface.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.origin = Point::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::geometry::Rect;
    use crate::surface::{RetainedSurface, ShapeGeometry, ShapeKind, ShapeStyle};

    #[test]
    fn test_zoom_tick_shortens_at_bound() {
        let mut v = ViewTransform::new(0.5, 2.0, 1.5);
        let mut s = RetainedSurface::new();
        assert_eq!(v.zoom_tick(&mut s, WheelDirection::In, Point::default()), Some(1.5));
        let f = v.zoom_tick(&mut s, WheelDirection::In, Point::default()).unwrap();
        assert!((f - 2.0 / 1.5).abs() < 1e-6);
        assert_eq!(v.zoom(), 2.0);
        assert_eq!(v.zoom_tick(&mut s, WheelDirection::In, Point::default()), None);
    }

    #[test]
    fn test_pivot_stays_fixed() {
        let mut v = ViewTransform::new(0.25, 4.0, 1.1);
        let mut s = RetainedSurface::new();
        let pivot = Point::new(120.0, 80.0);
        let id = s.create_shape(
            ShapeKind::Oval,
            ShapeGeometry::Bounds(Rect::from_center(pivot, 10.0)),
            ShapeStyle::filled(Color::rgb(0, 0, 0)),
            Layer::Diagram,
        );
        v.zoom_tick(&mut s, WheelDirection::In, pivot);
        let c = s.bounds(id).unwrap().center();
        assert!((c.x - pivot.x).abs() < 1e-4 && (c.y - pivot.y).abs() < 1e-4);
        assert!((s.bounds(id).unwrap().width() - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_world_mapping_tracks_pan_and_zoom() {
        let mut v = ViewTransform::new(0.25, 4.0, 2.0);
        let mut s = RetainedSurface::new();
        let world = Point::new(10.0, 20.0);
        let pivot = Point::new(50.0, 50.0);
        v.pan_by(&mut s, Vec2::new(5.0, -5.0));
        v.zoom_tick(&mut s, WheelDirection::In, pivot);
        let screen = v.to_screen(world);
        let back = v.to_world(screen);
        assert!((back.x - world.x).abs() < 1e-4 && (back.y - world.y).abs() < 1e-4);
        // World (10,20) was at (15,15) before the zoom; doubled about (50,50).
        assert!((screen.x - (-20.0)).abs() < 1e-4 && (screen.y - (-20.0)).abs() < 1e-4);
    }
}
