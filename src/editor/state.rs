//! Editor state and the gesture state machine.
//!
//! [`EditorState`] owns the graph, the selection, the pending link source
//! ("sprout"), the walk anchor, the view transform and the drawing surface.
//! Every input event is processed to completion, surface updates included,
//! before the next one is accepted.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::geometry::{Point, Rect};
use crate::model::{EdgeId, NodeId, NodeKind};
use crate::surface::{DrawingSurface, Layer, RetainedSurface, ShapeGeometry, ShapeId, ShapeKind, ShapeStyle};

use super::gesture::{Gesture, moved_beyond};
use super::graph::{Removed, TopologyGraph};
use super::hit_test::{Hit, hit};
use super::input::{EditorKey, InputEvent, PointerButton};
use super::legend::Legend;
use super::navigator::{Candidate, Navigator, WalkAnchor, choose_next};
use super::selection::{Selection, SelectionRect};
use super::view::{ViewTransform, WheelDirection};

// ────────────────────────────────────────────────────────────────────────────
// Mode
// ────────────────────────────────────────────────────────────────────────────

/// What a press on empty canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Select, drag, connect and box-select.
    #[default]
    Neutral,
    PlaceRouter,
    PlaceSwitch,
}

impl EditMode {
    pub fn label(self) -> &'static str {
        match self {
            EditMode::Neutral => "neutral",
            EditMode::PlaceRouter => "router",
            EditMode::PlaceSwitch => "switch",
        }
    }

    pub fn placement_kind(self) -> Option<NodeKind> {
        match self {
            EditMode::Neutral => None,
            EditMode::PlaceRouter => Some(NodeKind::Router),
            EditMode::PlaceSwitch => Some(NodeKind::Switch),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// EditorState
// ────────────────────────────────────────────────────────────────────────────

/// The complete interactive state of the topology editor.
///
/// # Example
///
/// ```rust
/// use topodraw::editor::{EditMode, EditorState, InputEvent, PointerButton};
/// use topodraw::geometry::Point;
///
/// let mut editor = EditorState::headless();
/// editor.set_mode(EditMode::PlaceRouter);
/// for (x, y) in [(100.0, 100.0), (300.0, 100.0)] {
///     let pos = Point::new(x, y);
///     editor.handle(InputEvent::Press { pos, button: PointerButton::Primary });
///     editor.handle(InputEvent::Release { pos, button: PointerButton::Primary });
/// }
/// assert_eq!(editor.graph().node_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EditorState<S: DrawingSurface = RetainedSurface> {
    pub config: EditorConfig,
    surface: S,
    graph: TopologyGraph,
    selection: Selection,
    /// Node the next click draws a link from.
    sprout: Option<NodeId>,
    navigator: Navigator,
    view: ViewTransform,
    mode: EditMode,
    gesture: Gesture,
    /// Rubber line from the sprout source to the cursor.
    preview: Option<ShapeId>,
    pointer: Option<Point>,
    legend: Legend,
}

impl EditorState<RetainedSurface> {
    /// An editor with default config drawing into an in-memory surface.
    pub fn headless() -> Self {
        Self::new(EditorConfig::default(), RetainedSurface::new())
    }
}

impl<S: DrawingSurface> EditorState<S> {
    pub fn new(config: EditorConfig, mut surface: S) -> Self {
        let view = ViewTransform::new(config.zoom_min, config.zoom_max, config.zoom_step);
        let legend = Legend::draw(&mut surface, &config.palette);
        Self {
            config,
            surface,
            graph: TopologyGraph::new(),
            selection: Selection::None,
            sprout: None,
            navigator: Navigator::new(),
            view,
            mode: EditMode::Neutral,
            gesture: Gesture::Idle,
            preview: None,
            pointer: None,
            legend,
        }
    }

    // ── accessors ──────────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn sprout(&self) -> Option<NodeId> {
        self.sprout
    }

    pub fn walk_anchor(&self) -> Option<WalkAnchor> {
        self.navigator.anchor()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn zoom(&self) -> f32 {
        self.view.zoom()
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn preview_shape(&self) -> Option<ShapeId> {
        self.preview
    }

    /// Current center of a node on screen.
    pub fn center(&self, id: NodeId) -> Option<Point> {
        self.graph.center(&self.surface, id)
    }

    /// One-line summary for a title bar.
    pub fn status_line(&self) -> String {
        format!(
            "Mode: {} | {} nodes, {} links | zoom {:.0}%",
            self.mode.label().to_uppercase(),
            self.graph.node_count(),
            self.graph.edge_count(),
            self.view.zoom() * 100.0
        )
    }

    // ── event entry point ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press { pos, button } => self.press(pos, button),
            InputEvent::Move { pos } => self.motion(pos),
            InputEvent::Release { pos, button } => self.release(pos, button),
            InputEvent::Key(key) => self.key(key),
            InputEvent::Wheel { pos, direction } => self.wheel(pos, direction),
        }
        self.refresh_preview();
    }

    fn key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Router => self.set_mode(EditMode::PlaceRouter),
            EditorKey::Switch => self.set_mode(EditMode::PlaceSwitch),
            EditorKey::Neutral => self.set_mode(EditMode::Neutral),
            EditorKey::Clear => self.clear_topology(),
            EditorKey::Escape => self.escape(),
            EditorKey::Delete => self.delete_selection(),
            k if k.is_arrow() => {
                self.walk();
            }
            _ => {}
        }
    }

    // ── pointer handling ───────────────────────────────────────────────────

    fn press(&mut self, pos: Point, button: PointerButton) {
        self.pointer = Some(pos);
        if !self.gesture.is_idle() {
            return;
        }
        let target = hit(&self.graph, &self.surface, pos, self.config.edge_hit_tolerance);
        if button != PointerButton::Primary {
            if target == Hit::Empty && self.can_pan() {
                debug!(x = pos.x, y = pos.y, "pan started");
                self.sprout = None;
                self.gesture = Gesture::Pan { last: pos, button };
            }
            return;
        }
        match target {
            Hit::Node(node) => {
                let group = self.selection.contains_node(node) && self.selection.node_count() > 1;
                if !group {
                    self.set_selection(Selection::Nodes(BTreeSet::from([node])));
                }
                if self.sprout.is_none() {
                    self.sprout = Some(node);
                }
                let prior_focus = self.navigator.anchor().map(|a| a.current);
                self.navigator.focus(node);
                debug!(%node, group, "node pressed");
                self.gesture = Gesture::NodePress {
                    node,
                    origin: pos,
                    last: pos,
                    moved_far: false,
                    group,
                    prior_focus,
                };
            }
            Hit::Edge(edge) => {
                debug!(%edge, "edge pressed");
                self.set_selection(Selection::Edge(edge));
                self.sprout = None;
                self.navigator.reset();
                self.gesture = Gesture::EdgePress { edge };
            }
            Hit::Empty => match self.mode.placement_kind() {
                None => self.begin_box(pos, pos),
                Some(kind) => self.gesture = Gesture::Placement { kind, origin: pos },
            },
        }
    }

    fn motion(&mut self, pos: Point) {
        self.pointer = Some(pos);
        let threshold = self.config.drag_threshold;
        let mut gesture = std::mem::take(&mut self.gesture);
        let mut abandon_placement = None;
        match &mut gesture {
            Gesture::Idle | Gesture::EdgePress { .. } => {}
            Gesture::NodePress { node, origin, last, moved_far, group, .. } => {
                if !*moved_far && moved_beyond(*origin, pos, threshold) {
                    *moved_far = true;
                    self.sprout = None;
                    debug!(node = %*node, "drag started");
                }
                if *moved_far {
                    let ids = if *group && self.selection.node_count() > 1 {
                        self.selection.nodes()
                    } else {
                        BTreeSet::from([*node])
                    };
                    self.graph.move_nodes(&mut self.surface, &ids, last.to(pos));
                    *last = pos;
                }
            }
            Gesture::BoxSelect { rect, moved_far, shape } => {
                rect.update(pos);
                if !*moved_far && moved_beyond(rect.start, pos, threshold) {
                    *moved_far = true;
                }
                self.surface.set_geometry(*shape, ShapeGeometry::Bounds(rect.normalized()));
                if *moved_far {
                    self.select_in_rect(rect.normalized());
                }
            }
            Gesture::Placement { origin, .. } => {
                if moved_beyond(*origin, pos, threshold) {
                    abandon_placement = Some(*origin);
                }
            }
            Gesture::Pan { last, .. } => {
                self.view.pan_by(&mut self.surface, last.to(pos));
                *last = pos;
            }
        }
        self.gesture = gesture;
        if let Some(origin) = abandon_placement {
            debug!("placement abandoned for box selection");
            self.gesture = Gesture::Idle;
            self.begin_box(origin, pos);
        }
    }

    fn release(&mut self, pos: Point, button: PointerButton) {
        self.pointer = Some(pos);
        if self.gesture.button() != Some(button) {
            return;
        }
        // The release point may be the only sample of a fast drag.
        self.motion(pos);
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::EdgePress { .. } | Gesture::Pan { .. } => {}
            Gesture::NodePress { node, moved_far, prior_focus, .. } => {
                if !moved_far {
                    self.click_node(node, prior_focus);
                }
            }
            Gesture::BoxSelect { moved_far, shape, .. } => {
                self.surface.delete_shape(shape);
                if !moved_far {
                    self.set_selection(Selection::None);
                }
                self.navigator.reset();
            }
            Gesture::Placement { kind, origin } => {
                self.place_node(kind, origin);
            }
        }
    }

    fn wheel(&mut self, pos: Point, direction: WheelDirection) {
        self.pointer = Some(pos);
        if self.view.zoom_tick(&mut self.surface, direction, pos).is_some() {
            self.drop_preview();
        }
    }

    /// Panning never competes with an editing gesture.
    fn can_pan(&self) -> bool {
        self.mode == EditMode::Neutral
            && self.selection.is_empty()
            && self.sprout.is_none()
            && self.gesture.is_idle()
    }

    fn begin_box(&mut self, origin: Point, pos: Point) {
        self.sprout = None;
        let mut rect = SelectionRect::new(origin);
        rect.update(pos);
        let palette = &self.config.palette;
        let shape = self.surface.create_shape(
            ShapeKind::Rect,
            ShapeGeometry::Bounds(rect.normalized()),
            ShapeStyle::stroked(palette.selection_box, 1.0),
            Layer::Preview,
        );
        let moved_far = moved_beyond(origin, pos, self.config.drag_threshold);
        if moved_far {
            self.select_in_rect(rect.normalized());
        }
        self.gesture = Gesture::BoxSelect { rect, moved_far, shape };
    }

    fn select_in_rect(&mut self, area: Rect) {
        let inside: BTreeSet<NodeId> = self
            .graph
            .nodes()
            .filter(|(id, _)| self.graph.center(&self.surface, *id).is_some_and(|c| area.contains(c)))
            .map(|(id, _)| id)
            .collect();
        let mut next = Selection::None;
        next.select_nodes(inside);
        self.set_selection(next);
    }

    /// A press and release on `node` without moving far.
    fn click_node(&mut self, node: NodeId, prior_focus: Option<NodeId>) {
        if let Some(source) = self.sprout {
            if source != node && !self.graph.edge_exists(source, node) {
                let style = self.edge_style(false);
                self.graph.create_edge(&mut self.surface, source, node, style);
            }
        }
        let previous = prior_focus.filter(|p| *p != node && self.graph.edge_exists(*p, node));
        self.focus(node);
        self.navigator.set(previous, node);
    }

    fn place_node(&mut self, kind: NodeKind, at: Point) -> NodeId {
        let radius = self.config.node_radius * self.view.zoom();
        let style = self.node_style(kind, false);
        let node = self.graph.create_node(&mut self.surface, kind, at, radius, style);
        self.focus(node);
        self.navigator.focus(node);
        node
    }

    /// Make `node` the sole selection and the next link source.
    fn focus(&mut self, node: NodeId) {
        self.set_selection(Selection::Nodes(BTreeSet::from([node])));
        self.sprout = Some(node);
    }

    // ── commands ───────────────────────────────────────────────────────────

    /// Switch mode. Cancels transients but keeps the node selection.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.cancel_transients(true);
        self.mode = mode;
        info!(mode = mode.label(), "mode changed");
        self.refresh_preview();
    }

    /// Back to neutral mode with nothing pending and nothing selected.
    pub fn escape(&mut self) {
        self.cancel_transients(false);
        self.mode = EditMode::Neutral;
        debug!("escape to neutral");
        self.refresh_preview();
    }

    fn cancel_transients(&mut self, keep_nodes: bool) {
        if let Gesture::BoxSelect { shape, .. } = std::mem::take(&mut self.gesture) {
            self.surface.delete_shape(shape);
        }
        self.sprout = None;
        self.navigator.reset();
        if !(keep_nodes && matches!(self.selection, Selection::Nodes(_))) {
            self.set_selection(Selection::None);
        }
    }

    /// Delete the selected edge, or else the selected nodes with their edges.
    pub fn delete_selection(&mut self) {
        let removed = match self.selection.clone() {
            Selection::None => return,
            Selection::Edge(edge) => {
                self.graph.delete_edge(&mut self.surface, edge);
                Removed { nodes: Vec::new(), edges: vec![edge] }
            }
            Selection::Nodes(ids) => self.graph.delete_nodes(&mut self.surface, &ids),
        };
        self.purge(&removed);
        self.refresh_preview();
    }

    /// Drop every reference to deleted entities in the same step.
    fn purge(&mut self, removed: &Removed) {
        self.selection.purge(&removed.nodes, &removed.edges);
        if self.sprout.is_some_and(|s| removed.nodes.contains(&s)) {
            self.sprout = None;
        }
        self.navigator.invalidate(&removed.nodes);
        let stale = match &self.gesture {
            Gesture::NodePress { node, .. } => removed.nodes.contains(node),
            Gesture::EdgePress { edge } => removed.edges.contains(edge),
            _ => false,
        };
        if stale {
            self.gesture = Gesture::Idle;
        }
    }

    /// Drop the whole topology and every piece of interaction state.
    pub fn clear_topology(&mut self) {
        self.graph.clear(&mut self.surface);
        self.surface.clear_layer(Layer::Preview);
        self.preview = None;
        self.gesture = Gesture::Idle;
        self.selection = Selection::None;
        self.sprout = None;
        self.navigator.reset();
        self.view.reset();
        info!("topology cleared");
    }

    /// Advance the neighbor-walk one step. Returns the newly focused node.
    pub fn walk(&mut self) -> Option<NodeId> {
        if !self.gesture.is_idle() {
            return None;
        }
        let anchor = self.resolve_walk_anchor()?;
        let here = self.center(anchor.current)?;
        let neighbors: Vec<Candidate> = self
            .graph
            .neighbors(anchor.current)
            .into_iter()
            .filter_map(|id| {
                Some(Candidate {
                    id,
                    pos: self.center(id)?,
                    sequence: self.graph.node(id)?.sequence,
                })
            })
            .collect();
        let from = anchor.previous.and_then(|p| Some((p, self.center(p)?)));
        let next = choose_next(here, from, &neighbors)?;
        debug!(from = %anchor.current, to = %next, "walk");
        self.navigator.set(anchor.previous, anchor.current);
        self.navigator.advance(next);
        self.focus(next);
        self.refresh_preview();
        Some(next)
    }

    /// Walk anchor, else sprout source, else a lone selected node.
    fn resolve_walk_anchor(&self) -> Option<WalkAnchor> {
        if let Some(anchor) = self.navigator.anchor() {
            if self.graph.contains_node(anchor.current) {
                let previous = anchor.previous.filter(|p| self.graph.contains_node(*p));
                return Some(WalkAnchor { previous, current: anchor.current });
            }
        }
        self.sprout
            .or_else(|| self.selection.single_node())
            .filter(|id| self.graph.contains_node(*id))
            .map(|current| WalkAnchor { previous: None, current })
    }

    /// Apply one wheel tick at `pivot`, as from the input layer.
    pub fn zoom_at(&mut self, pivot: Point, direction: WheelDirection) {
        self.handle(InputEvent::Wheel { pos: pivot, direction });
    }

    // ── styling ────────────────────────────────────────────────────────────

    fn node_style(&self, kind: NodeKind, selected: bool) -> ShapeStyle {
        let palette = &self.config.palette;
        let fill = match kind {
            NodeKind::Router => palette.router,
            NodeKind::Switch => palette.switch,
        };
        let style = ShapeStyle::filled(fill);
        if selected {
            style.with_outline(palette.highlight, self.config.outline_width)
        } else {
            style
        }
    }

    fn edge_style(&self, selected: bool) -> ShapeStyle {
        let palette = &self.config.palette;
        if selected {
            ShapeStyle::stroked(palette.highlight, self.config.selected_edge_width)
        } else {
            ShapeStyle::stroked(palette.edge, self.config.edge_width)
        }
    }

    /// Replace the selection and restyle whatever changed highlight.
    fn set_selection(&mut self, next: Selection) {
        let previous = std::mem::replace(&mut self.selection, next);
        let mut nodes = previous.nodes();
        nodes.extend(self.selection.nodes());
        for id in nodes {
            self.restyle_node(id);
        }
        for edge in [previous.edge(), self.selection.edge()].into_iter().flatten() {
            self.restyle_edge(edge);
        }
    }

    fn restyle_node(&mut self, id: NodeId) {
        let Some(node) = self.graph.node(id) else { return };
        let (kind, shape) = (node.kind, node.shape);
        let style = self.node_style(kind, self.selection.contains_node(id));
        self.surface.set_style(shape, style);
    }

    fn restyle_edge(&mut self, id: EdgeId) {
        let Some(edge) = self.graph.edge(id) else { return };
        let shape = edge.shape;
        let style = self.edge_style(self.selection.edge() == Some(id));
        self.surface.set_style(shape, style);
    }

    // ── link preview ───────────────────────────────────────────────────────

    fn drop_preview(&mut self) {
        if let Some(shape) = self.preview.take() {
            self.surface.delete_shape(shape);
        }
    }

    /// Show the preview line exactly when a link source is pending and no
    /// button is held.
    fn refresh_preview(&mut self) {
        let endpoints = match (self.gesture.is_idle(), self.sprout, self.pointer) {
            (true, Some(source), Some(cursor)) => self.center(source).map(|c| (c, cursor)),
            _ => None,
        };
        let Some((from, to)) = endpoints else {
            self.drop_preview();
            return;
        };
        let geometry = ShapeGeometry::Segment(from, to);
        match self.preview {
            Some(shape) => self.surface.set_geometry(shape, geometry),
            None => {
                let style = ShapeStyle::stroked(self.config.palette.preview, 1.5);
                self.preview = Some(self.surface.create_shape(ShapeKind::Line, geometry, style, Layer::Preview));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PointerButton = PointerButton::Primary;

    fn click(ed: &mut EditorState, x: f32, y: f32) {
        let pos = Point::new(x, y);
        ed.handle(InputEvent::Press { pos, button: P });
        ed.handle(InputEvent::Release { pos, button: P });
    }

    fn drag(ed: &mut EditorState, from: (f32, f32), to: (f32, f32)) {
        let (a, b) = (Point::new(from.0, from.1), Point::new(to.0, to.1));
        ed.handle(InputEvent::Press { pos: a, button: P });
        ed.handle(InputEvent::Move { pos: Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0) });
        ed.handle(InputEvent::Move { pos: b });
        ed.handle(InputEvent::Release { pos: b, button: P });
    }

    fn place(ed: &mut EditorState, mode: EditMode, x: f32, y: f32) -> NodeId {
        ed.set_mode(mode);
        click(ed, x, y);
        ed.selection().single_node().unwrap()
    }

    #[test]
    fn test_editor_state_new() {
        let ed = EditorState::headless();
        assert_eq!(ed.mode(), EditMode::Neutral);
        assert!(ed.selection().is_empty());
        assert!(ed.gesture().is_idle());
        assert_eq!(ed.zoom(), 1.0);
    }

    #[test]
    fn test_placement_focuses_new_node() {
        let mut ed = EditorState::headless();
        let n = place(&mut ed, EditMode::PlaceSwitch, 50.0, 60.0);
        assert_eq!(ed.graph().node(n).unwrap().kind, NodeKind::Switch);
        assert_eq!(ed.center(n), Some(Point::new(50.0, 60.0)));
        assert_eq!(ed.sprout(), Some(n));
        assert_eq!(ed.walk_anchor(), Some(WalkAnchor { previous: None, current: n }));
    }

    #[test]
    fn test_placement_drag_becomes_box_select() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        drag(&mut ed, (50.0, 50.0), (150.0, 150.0));
        assert_eq!(ed.graph().node_count(), 1);
        assert_eq!(ed.selection().single_node(), Some(a));
        assert_eq!(ed.sprout(), None);
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);
    }

    #[test]
    fn test_node_drag_moves_without_connecting() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        let b = place(&mut ed, EditMode::PlaceRouter, 300.0, 100.0);
        assert_eq!(ed.sprout(), Some(b));
        // b is pending as link source; dragging a must not connect them.
        drag(&mut ed, (100.0, 100.0), (100.0, 200.0));
        assert_eq!(ed.graph().edge_count(), 0);
        assert_eq!(ed.center(a), Some(Point::new(100.0, 200.0)));
        assert_eq!(ed.center(b), Some(Point::new(300.0, 100.0)));
        assert_eq!(ed.sprout(), None);
    }

    #[test]
    fn test_set_mode_keeps_node_selection() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.set_mode(EditMode::PlaceSwitch);
        assert_eq!(ed.selection().single_node(), Some(a));
        assert_eq!(ed.sprout(), None);
        assert_eq!(ed.walk_anchor(), None);
    }

    #[test]
    fn test_escape_clears_everything() {
        let mut ed = EditorState::headless();
        place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.handle(InputEvent::Move { pos: Point::new(200.0, 200.0) });
        assert!(ed.preview_shape().is_some());
        ed.handle(InputEvent::Key(EditorKey::Escape));
        assert_eq!(ed.mode(), EditMode::Neutral);
        assert!(ed.selection().is_empty());
        assert_eq!(ed.sprout(), None);
        assert!(ed.preview_shape().is_none());
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);
    }

    #[test]
    fn test_selected_node_is_highlighted() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        let b = place(&mut ed, EditMode::PlaceRouter, 300.0, 100.0);
        let shape_a = ed.graph().node(a).unwrap().shape;
        let shape_b = ed.graph().node(b).unwrap().shape;
        assert!(ed.surface().shape(shape_a).unwrap().style.stroke.is_none());
        assert_eq!(
            ed.surface().shape(shape_b).unwrap().style.stroke,
            Some(ed.config.palette.highlight)
        );
    }

    #[test]
    fn test_pan_requires_idle_editor() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.set_mode(EditMode::Neutral);
        let press = |pos| InputEvent::Press { pos, button: PointerButton::Secondary };
        ed.handle(press(Point::new(400.0, 400.0)));
        assert!(ed.gesture().is_idle(), "a selection blocks panning");

        ed.handle(InputEvent::Key(EditorKey::Escape));
        ed.handle(press(Point::new(400.0, 400.0)));
        ed.handle(InputEvent::Move { pos: Point::new(420.0, 390.0) });
        ed.handle(InputEvent::Release { pos: Point::new(420.0, 390.0), button: PointerButton::Secondary });
        assert_eq!(ed.center(a), Some(Point::new(120.0, 90.0)));
        assert_eq!(ed.view().origin(), Point::new(20.0, -10.0));
        assert!(ed.gesture().is_idle());
    }

    #[test]
    fn test_release_of_other_button_is_ignored() {
        let mut ed = EditorState::headless();
        ed.handle(InputEvent::Press { pos: Point::new(10.0, 10.0), button: P });
        ed.handle(InputEvent::Release { pos: Point::new(10.0, 10.0), button: PointerButton::Middle });
        assert!(matches!(ed.gesture(), Gesture::BoxSelect { .. }));
        ed.handle(InputEvent::Release { pos: Point::new(10.0, 10.0), button: P });
        assert!(ed.gesture().is_idle());
    }

    #[test]
    fn test_placement_scales_with_zoom() {
        let mut ed = EditorState::headless();
        ed.zoom_at(Point::new(0.0, 0.0), WheelDirection::In);
        let n = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        let width = ed.graph().node_bounds(ed.surface(), n).unwrap().width();
        assert!((width - 2.0 * ed.config.node_radius * ed.config.zoom_step).abs() < 1e-3);
    }

    #[test]
    fn test_status_line() {
        let mut ed = EditorState::headless();
        place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        assert_eq!(ed.status_line(), "Mode: ROUTER | 1 nodes, 0 links | zoom 100%");
    }

    #[test]
    fn test_release_far_from_press_without_moves_is_a_drag() {
        let mut ed = EditorState::headless();
        place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.handle(InputEvent::Press { pos: Point::new(400.0, 400.0), button: P });
        ed.handle(InputEvent::Release { pos: Point::new(600.0, 600.0), button: P });
        assert_eq!(ed.graph().node_count(), 1, "a jump between press and release is not a click");
        assert!(ed.gesture().is_idle());
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);
    }

    #[test]
    fn test_node_release_far_away_moves_node() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        place(&mut ed, EditMode::PlaceRouter, 300.0, 100.0);
        ed.handle(InputEvent::Press { pos: Point::new(100.0, 100.0), button: P });
        ed.handle(InputEvent::Release { pos: Point::new(100.0, 250.0), button: P });
        assert_eq!(ed.center(a), Some(Point::new(100.0, 250.0)));
        assert_eq!(ed.graph().edge_count(), 0);
    }

    #[test]
    fn test_escape_cancels_box_select() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.handle(InputEvent::Key(EditorKey::Escape));
        ed.handle(InputEvent::Press { pos: Point::new(50.0, 50.0), button: P });
        ed.handle(InputEvent::Move { pos: Point::new(150.0, 150.0) });
        assert_eq!(ed.selection().single_node(), Some(a));
        assert_eq!(ed.surface().layer_len(Layer::Preview), 1);

        ed.handle(InputEvent::Key(EditorKey::Escape));
        assert!(ed.gesture().is_idle());
        assert!(ed.selection().is_empty());
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);

        ed.handle(InputEvent::Move { pos: Point::new(400.0, 400.0) });
        ed.handle(InputEvent::Release { pos: Point::new(400.0, 400.0), button: P });
        assert!(ed.selection().is_empty());
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);
    }

    #[test]
    fn test_mode_switch_cancels_box_select() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.handle(InputEvent::Key(EditorKey::Escape));
        ed.handle(InputEvent::Press { pos: Point::new(50.0, 50.0), button: P });
        ed.handle(InputEvent::Move { pos: Point::new(150.0, 150.0) });

        ed.handle(InputEvent::Key(EditorKey::Router));
        assert!(ed.gesture().is_idle());
        assert_eq!(ed.surface().layer_len(Layer::Preview), 0);
        assert_eq!(ed.selection().single_node(), Some(a));

        // The abandoned box no longer tracks the pointer, and its release
        // does not place a node.
        ed.handle(InputEvent::Move { pos: Point::new(10.0, 10.0) });
        ed.handle(InputEvent::Release { pos: Point::new(10.0, 10.0), button: P });
        assert_eq!(ed.selection().single_node(), Some(a));
        assert_eq!(ed.graph().node_count(), 1);
    }

    #[test]
    fn test_delete_during_node_press_resets_gesture() {
        let mut ed = EditorState::headless();
        let a = place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        let b = place(&mut ed, EditMode::PlaceRouter, 300.0, 100.0);
        ed.set_mode(EditMode::Neutral);
        ed.handle(InputEvent::Press { pos: Point::new(100.0, 100.0), button: P });
        assert!(matches!(ed.gesture(), Gesture::NodePress { node, .. } if *node == a));

        ed.handle(InputEvent::Key(EditorKey::Delete));
        assert!(!ed.graph().contains_node(a));
        assert!(ed.gesture().is_idle());

        ed.handle(InputEvent::Move { pos: Point::new(200.0, 200.0) });
        ed.handle(InputEvent::Release { pos: Point::new(200.0, 200.0), button: P });
        assert_eq!(ed.graph().node_count(), 1);
        assert_eq!(ed.center(b), Some(Point::new(300.0, 100.0)));
        assert_eq!(ed.graph().edge_count(), 0);
    }

    #[test]
    fn test_clear_keeps_legend() {
        let mut ed = EditorState::headless();
        assert_eq!(ed.surface().layer_len(Layer::Overlay), ed.legend().shapes().len());
        place(&mut ed, EditMode::PlaceRouter, 100.0, 100.0);
        ed.zoom_at(Point::new(0.0, 0.0), WheelDirection::In);
        ed.handle(InputEvent::Key(EditorKey::Clear));
        assert_eq!(ed.surface().layer_len(Layer::Overlay), ed.legend().shapes().len());
        for id in ed.legend().shapes() {
            assert!(ed.legend().bounds().overlaps(&ed.surface().bounds(*id).unwrap()));
        }
    }
}
