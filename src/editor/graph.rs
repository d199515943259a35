//! Spatial graph store.
//!
//! [`TopologyGraph`] holds the nodes and edges of the topology and the mapping
//! between model identities and drawing primitives. Positions are never cached
//! here: [`TopologyGraph::center`] asks the surface for the current bounds of
//! the node's shape.
//!
//! # Invariants
//!
//! - every node maps to exactly one live shape, and so does every edge
//! - no two edges join the same unordered pair of nodes
//! - no edge references a node that is not in the store; deleting a node
//!   removes its edges in the same call

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use tracing::debug;

use crate::geometry::{Point, Rect, Vec2};
use crate::model::{Edge, EdgeId, Entity, Node, NodeId, NodeKind};
use crate::surface::{DrawingSurface, Layer, ShapeGeometry, ShapeId, ShapeKind, ShapeStyle};

/// What a cascading node deletion removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removed {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

/// Nodes and edges of the topology, in creation order.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    /// Primitive → entity lookup used by hit-testing.
    by_shape: HashMap<ShapeId, Entity>,
    next_node: u64,
    next_edge: u64,
    next_sequence: u64,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── queries ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(id, e)| (*id, e))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The edge joining `a` and `b` in either direction.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edges.iter().find(|(_, e)| e.connects(a, b)).map(|(id, _)| *id)
    }

    pub fn edge_exists(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_between(a, b).is_some()
    }

    pub fn entity_for_shape(&self, shape: ShapeId) -> Option<Entity> {
        self.by_shape.get(&shape).copied()
    }

    /// Current center of a node, derived from its shape's bounds.
    pub fn center(&self, surface: &dyn DrawingSurface, id: NodeId) -> Option<Point> {
        let node = self.nodes.get(&id)?;
        surface.bounds(node.shape).map(|r| r.center())
    }

    pub fn node_bounds(&self, surface: &dyn DrawingSurface, id: NodeId) -> Option<Rect> {
        surface.bounds(self.nodes.get(&id)?.shape)
    }

    /// Adjacency lists for every node, rebuilt from the edge list on each call.
    ///
    /// Neighbors appear in edge creation order.
    pub fn adjacency(&self) -> IndexMap<NodeId, Vec<NodeId>> {
        let mut adj: IndexMap<NodeId, Vec<NodeId>> =
            self.nodes.keys().map(|id| (*id, Vec::new())).collect();
        for e in self.edges.values() {
            if let Some(list) = adj.get_mut(&e.a) {
                list.push(e.b);
            }
            if let Some(list) = adj.get_mut(&e.b) {
                list.push(e.a);
            }
        }
        adj
    }

    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges.values().filter_map(|e| e.other(id)).collect()
    }

    // ── mutation ───────────────────────────────────────────────────────────

    /// Place a node of `kind` centered on `center`.
    pub fn create_node(
        &mut self,
        surface: &mut dyn DrawingSurface,
        kind: NodeKind,
        center: Point,
        radius: f32,
        style: ShapeStyle,
    ) -> NodeId {
        let shape_kind = match kind {
            NodeKind::Router => ShapeKind::Oval,
            NodeKind::Switch => ShapeKind::Rect,
        };
        let shape = surface.create_shape(
            shape_kind,
            ShapeGeometry::Bounds(Rect::from_center(center, radius)),
            style,
            Layer::Diagram,
        );
        self.next_node += 1;
        let id = NodeId(self.next_node);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.nodes.insert(id, Node { kind, sequence, shape });
        self.by_shape.insert(shape, Entity::Node(id));
        debug!(node = %id, kind = kind.label(), x = center.x, y = center.y, "node created");
        id
    }

    /// Connect `a` and `b` with a line drawn beneath all nodes.
    ///
    /// Returns `None` without touching the surface for a self-loop, an unknown
    /// endpoint, or a pair that is already connected.
    pub fn create_edge(
        &mut self,
        surface: &mut dyn DrawingSurface,
        a: NodeId,
        b: NodeId,
        style: ShapeStyle,
    ) -> Option<EdgeId> {
        if a == b || self.edge_exists(a, b) {
            return None;
        }
        let pa = self.center(&*surface, a)?;
        let pb = self.center(&*surface, b)?;
        let shape = surface.create_shape(
            ShapeKind::Line,
            ShapeGeometry::Segment(pa, pb),
            style,
            Layer::Diagram,
        );
        surface.lower_to_bottom(shape);
        self.next_edge += 1;
        let id = EdgeId(self.next_edge);
        self.edges.insert(id, Edge { a, b, shape });
        self.by_shape.insert(shape, Entity::Edge(id));
        debug!(edge = %id, %a, %b, "edge created");
        Some(id)
    }

    pub fn delete_edge(&mut self, surface: &mut dyn DrawingSurface, id: EdgeId) -> bool {
        let Some(edge) = self.edges.shift_remove(&id) else {
            return false;
        };
        self.by_shape.remove(&edge.shape);
        surface.delete_shape(edge.shape);
        debug!(edge = %id, "edge deleted");
        true
    }

    /// Delete `ids` and every edge touching any of them.
    ///
    /// Edges go first so no edge ever points at a missing node.
    pub fn delete_nodes(
        &mut self,
        surface: &mut dyn DrawingSurface,
        ids: &BTreeSet<NodeId>,
    ) -> Removed {
        let mut removed = Removed::default();
        let doomed: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, e)| ids.contains(&e.a) || ids.contains(&e.b))
            .map(|(id, _)| *id)
            .collect();
        for id in doomed {
            if self.delete_edge(surface, id) {
                removed.edges.push(id);
            }
        }
        for id in ids {
            if let Some(node) = self.nodes.shift_remove(id) {
                self.by_shape.remove(&node.shape);
                surface.delete_shape(node.shape);
                removed.nodes.push(*id);
            }
        }
        debug!(nodes = removed.nodes.len(), edges = removed.edges.len(), "nodes deleted");
        removed
    }

    /// Move nodes by `delta` and pull their edges along.
    pub fn move_nodes(&mut self, surface: &mut dyn DrawingSurface, ids: &BTreeSet<NodeId>, delta: Vec2) {
        for id in ids {
            if let Some(node) = self.nodes.get(id) {
                surface.move_shape(node.shape, delta);
            }
        }
        self.sync_edges(surface, ids);
    }

    /// Re-attach the endpoints of every edge touching `ids` to the node centers.
    pub fn sync_edges(&self, surface: &mut dyn DrawingSurface, ids: &BTreeSet<NodeId>) {
        for e in self.edges.values() {
            if !(ids.contains(&e.a) || ids.contains(&e.b)) {
                continue;
            }
            if let (Some(pa), Some(pb)) = (self.center(&*surface, e.a), self.center(&*surface, e.b)) {
                surface.set_geometry(e.shape, ShapeGeometry::Segment(pa, pb));
            }
        }
    }

    /// Remove everything and restart the id and sequence counters.
    pub fn clear(&mut self, surface: &mut dyn DrawingSurface) {
        for shape in self.by_shape.keys() {
            surface.delete_shape(*shape);
        }
        *self = Self::default();
    }
}
