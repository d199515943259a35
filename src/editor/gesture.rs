//! The gesture currently in progress.
//!
//! One variant per possible outcome of a press, so that a drag can never be a
//! placement at the same time and a box-select can never also be a pan.
//!
//! ```text
//! Idle -> NodePress    (primary press on a node)
//! Idle -> EdgePress    (primary press on an edge)
//! Idle -> BoxSelect    (primary press on empty canvas, neutral mode)
//! Idle -> Placement    (primary press on empty canvas, placement mode)
//! Idle -> Pan          (secondary/middle press on empty canvas, nothing pending)
//! Placement -> BoxSelect (moved beyond the drag threshold)
//!
//! Any -> Idle          (release of the button that started it)
//! ```

use crate::geometry::Point;
use crate::model::{EdgeId, NodeId, NodeKind};
use crate::surface::ShapeId;

use super::input::PointerButton;
use super::selection::SelectionRect;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Pressed on a node: a click (select / connect) until it moves far,
    /// then a drag.
    NodePress {
        node: NodeId,
        origin: Point,
        /// Cursor position of the last applied drag step.
        last: Point,
        moved_far: bool,
        /// The node was part of a multi-selection: drag them all.
        group: bool,
        /// Walk position before this press.
        prior_focus: Option<NodeId>,
    },
    /// Pressed on an edge. Edges cannot be dragged.
    EdgePress { edge: EdgeId },
    /// Rubber-band selection.
    BoxSelect {
        rect: SelectionRect,
        moved_far: bool,
        /// Primitive drawing the band.
        shape: ShapeId,
    },
    /// Tentative node placement at `origin`.
    Placement { kind: NodeKind, origin: Point },
    /// Panning the diagram.
    Pan { last: Point, button: PointerButton },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Button whose release ends this gesture.
    pub fn button(&self) -> Option<PointerButton> {
        match self {
            Gesture::Idle => None,
            Gesture::Pan { button, .. } => Some(*button),
            _ => Some(PointerButton::Primary),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            Gesture::NodePress { moved_far: true, .. } | Gesture::BoxSelect { moved_far: true, .. } | Gesture::Pan { .. }
        )
    }
}

/// True once `pos` is more than `threshold` pixels from `origin` on either axis.
pub fn moved_beyond(origin: Point, pos: Point, threshold: f32) -> bool {
    (pos.x - origin.x).abs() > threshold || (pos.y - origin.y).abs() > threshold
}
