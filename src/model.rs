use serde::{Deserialize, Serialize};
use std::fmt;

use crate::surface::ShapeId;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Stable model identity of a node.
///
/// Distinct from the [`ShapeId`] of the primitive that draws it, so the graph
/// can be reasoned about without looking at the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Stable model identity of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Either kind of graph entity, as resolved from a drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Node(NodeId),
    Edge(EdgeId),
}

// ────────────────────────────────────────────────────────────────────────────
// Node
// ────────────────────────────────────────────────────────────────────────────

/// Device type of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Drawn as an oval.
    Router,
    /// Drawn as a square.
    Switch,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Router => "router",
            NodeKind::Switch => "switch",
        }
    }
}

/// A placed node. Its position is not stored here: it is whatever the bounds
/// of `shape` currently say.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Monotonic creation order, reset on clear.
    pub sequence: u64,
    pub shape: ShapeId,
}

// ────────────────────────────────────────────────────────────────────────────
// Edge
// ────────────────────────────────────────────────────────────────────────────

/// An undirected link between two distinct nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub shape: ShapeId,
}

impl Edge {
    /// True if this edge joins `x` and `y`, in either order.
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn touches(&self, n: NodeId) -> bool {
        self.a == n || self.b == n
    }

    /// The endpoint opposite to `n`, if `n` is an endpoint.
    pub fn other(&self, n: NodeId) -> Option<NodeId> {
        if self.a == n {
            Some(self.b)
        } else if self.b == n {
            Some(self.a)
        } else {
            None
        }
    }
}
