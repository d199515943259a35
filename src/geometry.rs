//! Plain 2-D geometry used by the editor core.
//!
//! All coordinates live in a single screen space (pixels). The core never
//! depends on a GUI toolkit for its math so it can be driven headless.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `self` to `other`.
    pub fn to(self, other: Point) -> Vec2 {
        Vec2::new(other.x - self.x, other.y - self.y)
    }

    pub fn offset(self, v: Vec2) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        self.to(other).length()
    }

    /// Scale this point about `pivot`.
    pub fn scaled_about(self, pivot: Point, factor: f32) -> Point {
        Point::new(
            pivot.x + (self.x - pivot.x) * factor,
            pivot.y + (self.y - pivot.y) * factor,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product.
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn is_degenerate(self) -> bool {
        self.length_sq() <= f32::EPSILON
    }

    /// Unsigned angle in radians between two vectors, in `[0, π]`.
    pub fn angle_to(self, other: Vec2) -> f32 {
        self.cross(other).atan2(self.dot(other)).abs()
    }
}

/// Axis-aligned rectangle. `min` is always the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from two arbitrary corners (order-independent).
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Point, half_extent: f32) -> Self {
        Self {
            min: Point::new(center.x - half_extent, center.y - half_extent),
            max: Point::new(center.x + half_extent, center.y + half_extent),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive overlap test, so touching edges and zero-area rects count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Inclusive test of whether the segment `a`–`b` passes through this rect.
    ///
    /// Liang–Barsky clipping: the segment is parameterised on `[0, 1]` and
    /// narrowed against each slab in turn.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let d = a.to(b);
        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        for (p, q) in [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ] {
            if p == 0.0 {
                // Parallel to this slab: either fully outside or unconstrained.
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }
        t0 <= t1
    }

    pub fn expand(&self, amount: f32) -> Rect {
        Rect {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        }
    }

    pub fn translate(&self, v: Vec2) -> Rect {
        Rect {
            min: self.min.offset(v),
            max: self.max.offset(v),
        }
    }

    pub fn scaled_about(&self, pivot: Point, factor: f32) -> Rect {
        Rect::from_corners(
            self.min.scaled_about(pivot, factor),
            self.max.scaled_about(pivot, factor),
        )
    }
}

/// Distance from `p` to the segment `a`–`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to that endpoint.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let ab = a.to(b);
    let ab_len2 = ab.length_sq();
    if ab_len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (a.to(p).dot(ab) / ab_len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}
