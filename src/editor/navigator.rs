//! Keyboard neighbor-walk.
//!
//! Every arrow key advances the walk the same way: from the current node to
//! the neighbor that best continues the direction of the last step. The very
//! first hop has no direction yet and prefers the neighbor furthest to the
//! right.

use std::cmp::Ordering;
use std::f32::consts::PI;

use crate::geometry::{Point, Vec2};
use crate::model::NodeId;

/// Values closer than this compare equal when ranking candidates.
const TIE_EPS: f32 = 1e-4;

/// The last walk step: where it came from and where it is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkAnchor {
    pub previous: Option<NodeId>,
    pub current: NodeId,
}

impl WalkAnchor {
    pub fn references(&self, id: NodeId) -> bool {
        self.current == id || self.previous == Some(id)
    }
}

/// A neighbor as seen by the walk: identity, position and creation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: NodeId,
    pub pos: Point,
    pub sequence: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    anchor: Option<WalkAnchor>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<WalkAnchor> {
        self.anchor
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Start a fresh walk at `node` with no direction.
    pub fn focus(&mut self, node: NodeId) {
        self.anchor = Some(WalkAnchor { previous: None, current: node });
    }

    /// Record a directed step `previous → current`.
    pub fn set(&mut self, previous: Option<NodeId>, current: NodeId) {
        self.anchor = Some(WalkAnchor { previous, current });
    }

    /// Shift the walk one step forward onto `next`.
    pub fn advance(&mut self, next: NodeId) {
        let previous = self.anchor.map(|a| a.current);
        self.anchor = Some(WalkAnchor { previous, current: next });
    }

    /// Forget the walk if it mentions any deleted node.
    pub fn invalidate(&mut self, removed: &[NodeId]) {
        if let Some(anchor) = self.anchor {
            if removed.iter().any(|id| anchor.references(*id)) {
                self.anchor = None;
            }
        }
    }
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    if (a - b).abs() <= TIE_EPS {
        Ordering::Equal
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

/// First-hop rule: largest rightward displacement, then smallest vertical one.
fn first_hop(here: Point, candidates: &[Candidate]) -> Option<NodeId> {
    candidates
        .iter()
        .min_by(|a, b| {
            let da = here.to(a.pos);
            let db = here.to(b.pos);
            cmp_f32(db.x, da.x)
                .then(cmp_f32(da.y.abs(), db.y.abs()))
                .then(a.sequence.cmp(&b.sequence))
        })
        .map(|c| c.id)
}

/// Straightest continuation of `incoming` among `candidates`.
fn straightest(here: Point, incoming: Vec2, candidates: &[Candidate]) -> Option<NodeId> {
    let rank = |c: &Candidate| {
        let out = here.to(c.pos);
        if out.is_degenerate() {
            (PI, 0.0, 0.0)
        } else {
            (incoming.angle_to(out), incoming.dot(out), out.x)
        }
    };
    candidates
        .iter()
        .min_by(|a, b| {
            let (angle_a, dot_a, dx_a) = rank(a);
            let (angle_b, dot_b, dx_b) = rank(b);
            cmp_f32(angle_a, angle_b)
                .then(cmp_f32(dot_b, dot_a))
                .then(cmp_f32(dx_b, dx_a))
                .then(a.sequence.cmp(&b.sequence))
        })
        .map(|c| c.id)
}

/// Pick the next node of a walk standing at `here`.
///
/// `from` is the previous node and its position, if the walk has a direction.
/// Returns `None` only when there are no neighbors at all. A previous node
/// that is no longer adjacent is ignored; when it is the only neighbor the
/// walk bounces back to it.
pub fn choose_next(here: Point, from: Option<(NodeId, Point)>, neighbors: &[Candidate]) -> Option<NodeId> {
    if neighbors.is_empty() {
        return None;
    }
    let Some((prev, prev_pos)) = from.filter(|(p, _)| neighbors.iter().any(|c| c.id == *p)) else {
        return first_hop(here, neighbors);
    };
    let rest: Vec<Candidate> = neighbors.iter().copied().filter(|c| c.id != prev).collect();
    if rest.is_empty() {
        return Some(prev);
    }
    let incoming = prev_pos.to(here);
    if incoming.is_degenerate() {
        return first_hop(here, &rest);
    }
    straightest(here, incoming, &rest)
}
