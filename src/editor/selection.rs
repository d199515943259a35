//! Selection management for the editor.
//!
//! A selection is either a non-empty set of nodes or exactly one edge, never
//! both. [`SelectionRect`] is the rubber band used for box-selection.
//!
//! # Usage
//!
//! ```rust
//! use topodraw::editor::selection::{Selection, SelectionRect};
//! use topodraw::geometry::Point;
//! use topodraw::model::{EdgeId, NodeId};
//!
//! let mut sel = Selection::default();
//! sel.select_node(NodeId(1));
//! sel.select_edge(EdgeId(4));
//! assert!(!sel.contains_node(NodeId(1)));
//!
//! let mut rect = SelectionRect::new(Point::new(100.0, 200.0));
//! rect.update(Point::new(50.0, 150.0));
//! assert!(rect.contains(Point::new(75.0, 175.0)));
//! ```

use std::collections::BTreeSet;

use crate::geometry::{Point, Rect};
use crate::model::{EdgeId, NodeId};

/// A rubber-band rectangle anchored where the drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    /// Create a new selection rectangle starting at the given point.
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    /// Update the end point of the selection rectangle.
    pub fn update(&mut self, end: Point) {
        self.end = end;
    }

    /// Get the normalized (min-max) rectangle bounds.
    pub fn normalized(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    /// Check if a point is inside the selection rectangle.
    pub fn contains(&self, p: Point) -> bool {
        self.normalized().contains(p)
    }

    /// Width of the selection rectangle (absolute).
    pub fn width(&self) -> f32 {
        (self.end.x - self.start.x).abs()
    }

    /// Height of the selection rectangle (absolute).
    pub fn height(&self) -> f32 {
        (self.end.y - self.start.y).abs()
    }
}

/// Current node-or-edge selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    /// Always non-empty.
    Nodes(BTreeSet<NodeId>),
    Edge(EdgeId),
}

impl Selection {
    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    /// Select a single node, dropping any previous selection.
    pub fn select_node(&mut self, id: NodeId) {
        *self = Selection::Nodes(BTreeSet::from([id]));
    }

    /// Replace the selection with `ids`; an empty set clears it.
    pub fn select_nodes(&mut self, ids: BTreeSet<NodeId>) {
        *self = if ids.is_empty() { Selection::None } else { Selection::Nodes(ids) };
    }

    /// Select a single edge, dropping any node selection.
    pub fn select_edge(&mut self, id: EdgeId) {
        *self = Selection::Edge(id);
    }

    pub fn nodes(&self) -> BTreeSet<NodeId> {
        match self {
            Selection::Nodes(ids) => ids.clone(),
            _ => BTreeSet::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Selection::Nodes(ids) => ids.len(),
            _ => 0,
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            Selection::Edge(id) => Some(*id),
            _ => None,
        }
    }

    /// The selected node when exactly one is selected.
    pub fn single_node(&self) -> Option<NodeId> {
        match self {
            Selection::Nodes(ids) if ids.len() == 1 => ids.first().copied(),
            _ => None,
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        matches!(self, Selection::Nodes(ids) if ids.contains(&id))
    }

    /// Drop references to deleted entities.
    pub fn purge(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        match self {
            Selection::Nodes(ids) => {
                ids.retain(|id| !nodes.contains(id));
                if ids.is_empty() {
                    *self = Selection::None;
                }
            }
            Selection::Edge(id) if edges.contains(id) => *self = Selection::None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rect_normalized() {
        let mut rect = SelectionRect::new(Point::new(100.0, 200.0));
        rect.update(Point::new(50.0, 150.0));
        let r = rect.normalized();
        assert_eq!(r.min, Point::new(50.0, 150.0));
        assert_eq!(r.max, Point::new(100.0, 200.0));
    }

    #[test]
    fn test_selection_rect_contains() {
        let mut rect = SelectionRect::new(Point::new(10.0, 10.0));
        rect.update(Point::new(100.0, 100.0));
        assert!(rect.contains(Point::new(50.0, 50.0)));
        assert!(!rect.contains(Point::new(150.0, 50.0)));
    }

    #[test]
    fn test_selection_width_height() {
        let rect = SelectionRect { start: Point::new(10.0, 20.0), end: Point::new(110.0, 80.0) };
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 60.0);
    }

    #[test]
    fn test_node_and_edge_are_exclusive() {
        let mut sel = Selection::default();
        sel.select_nodes(BTreeSet::from([NodeId(1), NodeId(2)]));
        assert_eq!(sel.node_count(), 2);
        sel.select_edge(EdgeId(9));
        assert_eq!(sel.node_count(), 0);
        assert_eq!(sel.edge(), Some(EdgeId(9)));
        sel.select_node(NodeId(3));
        assert_eq!(sel.edge(), None);
        assert_eq!(sel.single_node(), Some(NodeId(3)));
    }

    #[test]
    fn test_empty_set_clears() {
        let mut sel = Selection::default();
        sel.select_node(NodeId(1));
        sel.select_nodes(BTreeSet::new());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_purge() {
        let mut sel = Selection::default();
        sel.select_nodes(BTreeSet::from([NodeId(1), NodeId(2)]));
        sel.purge(&[NodeId(1)], &[]);
        assert_eq!(sel.single_node(), Some(NodeId(2)));
        sel.purge(&[NodeId(2)], &[]);
        assert!(sel.is_empty());

        sel.select_edge(EdgeId(5));
        sel.purge(&[], &[EdgeId(5)]);
        assert!(sel.is_empty());
    }
}
