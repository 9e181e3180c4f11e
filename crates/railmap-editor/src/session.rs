//! The pointer-driven editing session.
//!
//! `EditorSession` owns the diagram graph and its history, consumes
//! normalized input events, and is the only writer to the graph. Every
//! completed gesture (node placement, line drawing, drag) ends in exactly
//! one history commit; a gesture that changes nothing commits nothing.
//!
//! The host shell supplies, with each pointer event, the ID of the
//! topmost hit-tested element under the cursor (see `hit`).

use crate::hit;
use crate::input::{InputEvent, Modifiers};
use crate::reclass::{ColorCountReclassifier, StationReclassifier};
use crate::snap::{SnapTracker, candidate_lines};
use railmap_core::{
    Color, ElementId, History, MapGraph, MapLine, MapNode, MiscAttrs, NodeKind, PathAttrs,
    PathKind, Point, Rect, StyleAttrs, next_parallel_index,
};
use std::collections::HashSet;

/// Grid step for tool-placed nodes.
pub const PLACEMENT_GRID: f64 = 5.0;
/// Drag rounding step when snapping is off.
pub const COARSE_STEP: f64 = 100.0;
/// Drag rounding step with the precise modifier held.
pub const FINE_STEP: f64 = 0.01;

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Select, drag, rectangle-select.
    Select,
    PlaceStation,
    PlaceVirtual,
    PlaceText,
    /// Draw a line of the given path family between connectable nodes.
    DrawLine(PathKind),
}

/// Transient gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    /// Moving the current selection. `starts` holds each member's
    /// position at pointer-down; one shared delta is applied to all.
    DragMove {
        cursor_origin: Point,
        anchor_start: Point,
        starts: Vec<(ElementId, Point)>,
    },
    /// Drawing a line outward from `source`.
    DrawingLine { source: ElementId },
    /// Rubber-band selection from `start`.
    RectSelect { start: Point, rect: Rect },
}

pub struct EditorSession {
    graph: MapGraph,
    history: History,
    selection: HashSet<ElementId>,
    tool: Tool,
    gesture: Gesture,
    viewport: Rect,
    snap_enabled: bool,
    auto_parallel: bool,
    theme_color: Color,
    tracker: Option<SnapTracker>,
    reclassifier: Box<dyn StationReclassifier>,
}

impl EditorSession {
    pub fn new(viewport: Rect) -> Self {
        let graph = MapGraph::new();
        let history = History::new(graph.export());
        Self {
            graph,
            history,
            selection: HashSet::new(),
            tool: Tool::Select,
            gesture: Gesture::Idle,
            viewport,
            snap_enabled: true,
            auto_parallel: true,
            theme_color: Color::rgb(228, 0, 43),
            tracker: None,
            reclassifier: Box::new(ColorCountReclassifier),
        }
    }

    /// Start from an existing graph (e.g. a loaded document).
    pub fn with_graph(graph: MapGraph, viewport: Rect) -> Self {
        let history = History::new(graph.export());
        Self {
            graph,
            history,
            ..Self::new(viewport)
        }
    }

    // ─── Configuration ───────────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) {
        log::debug!("tool -> {tool:?}");
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_snap_enabled(&mut self, on: bool) {
        self.snap_enabled = on;
    }

    pub fn set_auto_parallel(&mut self, on: bool) {
        self.auto_parallel = on;
    }

    pub fn set_theme_color(&mut self, color: Color) {
        self.theme_color = color;
    }

    /// Replace the reclassification collaborator.
    pub fn set_reclassifier(&mut self, r: Box<dyn StationReclassifier>) {
        self.reclassifier = r;
    }

    /// Update the visible area. Mid-drag, the snap candidate cache is
    /// rebuilt here (and only here) rather than per pointer move.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        if let Gesture::DragMove { starts, .. } = &self.gesture {
            let exclude: Vec<ElementId> = starts.iter().map(|(id, _)| *id).collect();
            self.tracker = Some(SnapTracker::new(candidate_lines(
                self.graph.nodes(),
                viewport,
                &exclude,
            )));
        }
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn graph(&self) -> &MapGraph {
        &self.graph
    }

    pub fn selection(&self) -> &HashSet<ElementId> {
        &self.selection
    }

    /// Current rubber-band rectangle, while one is being dragged out.
    pub fn marquee(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::RectSelect { rect, .. } => Some(*rect),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Event entry point ───────────────────────────────────────────────

    /// Feed one input event. `hit` is the topmost hit-tested element's ID,
    /// or `None` over empty canvas.
    pub fn handle(&mut self, event: &InputEvent, hit: Option<&str>) {
        match event {
            InputEvent::PointerDown { pos, modifiers } => {
                self.pointer_down(*pos, *modifiers, hit)
            }
            InputEvent::PointerMove { pos, modifiers } => self.pointer_move(*pos, *modifiers),
            InputEvent::PointerUp { pos, modifiers } => self.pointer_up(*pos, *modifiers, hit),
        }
    }

    // ─── Pointer down ────────────────────────────────────────────────────

    fn pointer_down(&mut self, pos: Point, modifiers: Modifiers, hit: Option<&str>) {
        let hit_node = hit
            .and_then(hit::hit_node)
            .filter(|id| self.graph.contains_node(*id));

        match self.tool {
            Tool::PlaceStation | Tool::PlaceVirtual | Tool::PlaceText if hit_node.is_none() => {
                self.place_node(grid_snap(pos, PLACEMENT_GRID));
            }
            Tool::DrawLine(_) => {
                if let Some(source) = hit
                    .and_then(hit::connectable_target)
                    .filter(|id| self.graph.contains_node(*id))
                {
                    log::debug!("drawing line from {source}");
                    self.gesture = Gesture::DrawingLine { source };
                }
            }
            _ => match hit_node {
                Some(node_id) => {
                    if modifiers.shift {
                        // Toggle membership; a just-removed node is not dragged
                        if !self.selection.remove(&node_id) {
                            self.selection.insert(node_id);
                        }
                    } else if !self.selection.contains(&node_id) {
                        // Pressing an already-selected node keeps the
                        // multi-selection so it can be dragged whole
                        self.selection.clear();
                        self.selection.insert(node_id);
                    }
                    if self.selection.contains(&node_id) {
                        self.begin_drag(pos, node_id);
                    }
                }
                None => {
                    if !modifiers.shift {
                        self.selection.clear();
                    }
                    self.gesture = Gesture::RectSelect {
                        start: pos,
                        rect: Rect::from_corners(pos, pos),
                    };
                }
            },
        }
    }

    fn place_node(&mut self, pos: Point) {
        let node = match self.tool {
            Tool::PlaceStation => MapNode::station(ElementId::station(), pos, "Station"),
            Tool::PlaceVirtual => MapNode::virtual_node(ElementId::misc_node(), pos),
            Tool::PlaceText => MapNode::new(
                ElementId::misc_node(),
                pos,
                NodeKind::Misc(MiscAttrs::Text {
                    content: String::new(),
                    size: 16.0,
                }),
            ),
            _ => return,
        };
        let id = node.id;
        if self.graph.add_node(node).is_ok() {
            log::debug!("placed {id} at {pos:?}");
            self.selection.clear();
            self.selection.insert(id);
            self.tool = Tool::Select;
            self.commit();
        }
    }

    fn begin_drag(&mut self, cursor: Point, anchor: ElementId) {
        let starts: Vec<(ElementId, Point)> = self
            .selection
            .iter()
            .filter_map(|id| self.graph.node(*id).map(|n| (*id, n.pos)))
            .collect();
        let Some(&(_, anchor_start)) = starts.iter().find(|(id, _)| *id == anchor) else {
            return;
        };
        if self.snap_enabled {
            let exclude: Vec<ElementId> = starts.iter().map(|(id, _)| *id).collect();
            self.tracker = Some(SnapTracker::new(candidate_lines(
                self.graph.nodes(),
                self.viewport,
                &exclude,
            )));
        }
        self.gesture = Gesture::DragMove {
            cursor_origin: cursor,
            anchor_start,
            starts,
        };
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    fn pointer_move(&mut self, pos: Point, modifiers: Modifiers) {
        match &mut self.gesture {
            Gesture::DragMove {
                cursor_origin,
                anchor_start,
                starts,
            } => {
                let raw_dx = pos.x - cursor_origin.x;
                let raw_dy = pos.y - cursor_origin.y;

                let (dx, dy) = if self.snap_enabled && !modifiers.precise() {
                    match &mut self.tracker {
                        Some(tracker) => {
                            let tentative =
                                Point::new(anchor_start.x + raw_dx, anchor_start.y + raw_dy);
                            let resolved = tracker.update(tentative);
                            log::trace!("snap {tentative:?} -> {resolved:?}");
                            (resolved.x - anchor_start.x, resolved.y - anchor_start.y)
                        }
                        None => (raw_dx, raw_dy),
                    }
                } else {
                    let step = if modifiers.precise() { FINE_STEP } else { COARSE_STEP };
                    (round_step(raw_dx, step), round_step(raw_dy, step))
                };

                // One identical delta for every member of the selection
                let moves: Vec<(ElementId, Point)> = starts
                    .iter()
                    .map(|(id, start)| (*id, Point::new(start.x + dx, start.y + dy)))
                    .collect();
                for (id, new_pos) in moves {
                    let _ = self.graph.set_node_pos(id, new_pos);
                }
            }
            Gesture::RectSelect { start, rect } => {
                *rect = Rect::from_corners(*start, pos);
            }
            Gesture::DrawingLine { .. } | Gesture::Idle => {}
        }
    }

    // ─── Pointer up ──────────────────────────────────────────────────────

    fn pointer_up(&mut self, _pos: Point, modifiers: Modifiers, hit: Option<&str>) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DragMove { starts, .. } => {
                self.tracker = None;
                // Zero net displacement is a completed click: selection was
                // already applied on pointer-down, nothing to commit.
                let displaced = starts.iter().any(|(id, start)| {
                    self.graph.node(*id).is_some_and(|n| n.pos != *start)
                });
                if displaced {
                    self.commit();
                }
            }
            Gesture::DrawingLine { source } => {
                let target = hit
                    .and_then(hit::connectable_target)
                    .filter(|id| self.graph.contains_node(*id));
                match target {
                    // A line back into its own source is silently dropped
                    Some(target) if target != source => self.create_line(source, target),
                    _ => {}
                }
            }
            Gesture::RectSelect { rect, .. } => {
                let hits = self.graph.nodes_in_rect(rect).map(|n| n.id);
                if modifiers.shift {
                    self.selection.extend(hits);
                } else {
                    self.selection = hits.collect();
                }
            }
            Gesture::Idle => {}
        }
    }

    fn create_line(&mut self, source: ElementId, target: ElementId) {
        let Tool::DrawLine(kind) = self.tool else { return };
        // Fresh attribute bags per line; defaults are never shared
        let path = PathAttrs::default_for(kind);
        let mut line = MapLine::new(
            ElementId::line(),
            source,
            target,
            path,
            StyleAttrs::single(self.theme_color),
        );
        if self.auto_parallel {
            line.parallel_index =
                next_parallel_index(&self.graph, kind, source, target, line.path.direction());
        }
        let id = line.id;
        if self.graph.add_line(line).is_ok() {
            log::debug!("drew {id}: {source} -> {target}");
            self.reclassifier.reclassify(&mut self.graph, source);
            self.reclassifier.reclassify(&mut self.graph, target);
            self.commit();
        }
    }

    // ─── Commands from the surrounding chrome ────────────────────────────

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo()
            && let Err(e) = self.graph.import(snapshot)
        {
            log::error!("undo reload failed: {e}");
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo()
            && let Err(e) = self.graph.import(snapshot)
        {
            log::error!("redo reload failed: {e}");
        }
    }

    /// Remove every selected element (nodes cascade to their lines) and
    /// commit once. Stations that lost a line are reclassified.
    pub fn delete_selection(&mut self) {
        let ids: Vec<ElementId> = self.selection.drain().collect();
        let mut touched: HashSet<ElementId> = HashSet::new();
        let mut changed = false;
        for id in ids {
            if let Some((_, lines)) = self.graph.drop_node(id) {
                changed = true;
                for line in lines {
                    touched.insert(line.source);
                    touched.insert(line.target);
                }
            } else if let Some(line) = self.graph.drop_line(id) {
                changed = true;
                touched.insert(line.source);
                touched.insert(line.target);
            }
        }
        for id in touched {
            if self.graph.contains_node(id) {
                self.reclassifier.reclassify(&mut self.graph, id);
            }
        }
        if changed {
            self.commit();
        }
    }

    /// Abort the gesture in flight (pointer capture lost, focus change).
    /// Positions already applied stay and are committed, so the graph is
    /// never left un-snapshotted between gestures.
    pub fn cancel_drag(&mut self) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        self.tracker = None;
        if let Gesture::DragMove { starts, .. } = gesture {
            let displaced = starts.iter().any(|(id, start)| {
                self.graph.node(*id).is_some_and(|n| n.pos != *start)
            });
            if displaced {
                self.commit();
            }
        }
    }

    fn commit(&mut self) {
        self.history.commit(self.graph.export());
    }
}

fn grid_snap(p: Point, step: f64) -> Point {
    Point::new(round_step(p.x, step), round_step(p.y, step))
}

fn round_step(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use railmap_core::StationAttrs;

    fn viewport() -> Rect {
        Rect::from_corners(Point::new(-1000.0, -1000.0), Point::new(1000.0, 1000.0))
    }

    fn session_with_stations(coords: &[(f64, f64)]) -> (EditorSession, Vec<ElementId>) {
        let mut g = MapGraph::new();
        let ids: Vec<ElementId> = coords
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let id = ElementId::station();
                g.add_node(MapNode::station(id, Point::new(*x, *y), &format!("S{i}")))
                    .unwrap();
                id
            })
            .collect();
        (EditorSession::with_graph(g, viewport()), ids)
    }

    fn core_hit(id: ElementId) -> String {
        format!("stn_core_{id}")
    }

    #[test]
    fn placement_tool_snaps_to_grid_and_selects() {
        let mut s = EditorSession::new(viewport());
        s.set_tool(Tool::PlaceStation);
        s.handle(&InputEvent::down(13.0, -7.0), None);

        assert_eq!(s.graph().node_count(), 1);
        let node = s.graph().nodes().next().unwrap();
        assert_eq!(node.pos, Point::new(15.0, -5.0));
        assert_eq!(s.selection().len(), 1);
        assert!(s.selection().contains(&node.id));
        // Placement is one-shot; the tool falls back to select
        assert_eq!(s.tool(), Tool::Select);
        assert!(s.can_undo());
    }

    #[test]
    fn click_replaces_selection_without_committing() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(0.0, 0.0), Some(&core_hit(ids[0])));

        assert_eq!(s.selection().len(), 1);
        assert!(s.selection().contains(&ids[0]));
        // A pure click never commits
        assert!(!s.can_undo());
    }

    #[test]
    fn shift_click_toggles_membership() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        let shift = Modifiers::SHIFT;
        for id in &ids {
            s.handle(
                &InputEvent::down(0.0, 0.0).with_modifiers(shift),
                Some(&core_hit(*id)),
            );
            s.handle(&InputEvent::up(0.0, 0.0).with_modifiers(shift), None);
        }
        assert_eq!(s.selection().len(), 2);

        s.handle(
            &InputEvent::down(0.0, 0.0).with_modifiers(shift),
            Some(&core_hit(ids[0])),
        );
        s.handle(&InputEvent::up(0.0, 0.0).with_modifiers(shift), None);
        assert_eq!(s.selection().len(), 1);
        assert!(!s.selection().contains(&ids[0]));
    }

    #[test]
    fn pressing_a_selected_node_keeps_the_multi_selection() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        let shift = Modifiers::SHIFT;
        for id in &ids {
            s.handle(
                &InputEvent::down(0.0, 0.0).with_modifiers(shift),
                Some(&core_hit(*id)),
            );
            s.handle(&InputEvent::up(0.0, 0.0).with_modifiers(shift), None);
        }

        // Plain press on a member must not collapse the selection
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        assert_eq!(s.selection().len(), 2);
        s.handle(&InputEvent::up(0.0, 0.0), None);
    }

    #[test]
    fn drag_applies_identical_delta_to_all_selected() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        s.set_snap_enabled(false);
        let shift = Modifiers::SHIFT;
        for id in &ids {
            s.handle(
                &InputEvent::down(0.0, 0.0).with_modifiers(shift),
                Some(&core_hit(*id)),
            );
            s.handle(&InputEvent::up(0.0, 0.0).with_modifiers(shift), None);
        }

        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::moved(130.0, 60.0), None);
        s.handle(&InputEvent::up(130.0, 60.0), None);

        // Coarse rounding: (130, 60) -> (100, 100)
        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(100.0, 100.0));
        assert_eq!(s.graph().node(ids[1]).unwrap().pos, Point::new(150.0, 100.0));
        assert!(s.can_undo());
    }

    #[test]
    fn precise_modifier_moves_in_fine_steps() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0)]);
        let precise = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::moved(0.123, 0.0).with_modifiers(precise), None);
        s.handle(&InputEvent::up(0.123, 0.0).with_modifiers(precise), None);

        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(0.12, 0.0));
    }

    #[test]
    fn drag_snaps_to_peer_alignment() {
        // Dragging the third station near the line y=0 through the others
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (10.0, 0.0), (30.0, 14.0)]);
        s.handle(&InputEvent::down(30.0, 14.0), Some(&core_hit(ids[2])));
        s.handle(&InputEvent::moved(25.0, 0.5), None);
        s.handle(&InputEvent::up(25.0, 0.5), None);

        let pos = s.graph().node(ids[2]).unwrap().pos;
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.x, 25.0);
    }

    #[test]
    fn drawing_a_line_assigns_lane_color_and_reclassifies() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        s.set_theme_color(Color::rgb(0, 98, 65));
        s.set_tool(Tool::DrawLine(PathKind::Diagonal));

        for _ in 0..2 {
            s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
            s.handle(&InputEvent::up(50.0, 0.0), Some(&core_hit(ids[1])));
        }

        assert_eq!(s.graph().line_count(), 2);
        let mut lanes: Vec<i32> = s.graph().lines().map(|l| l.parallel_index).collect();
        lanes.sort();
        assert_eq!(lanes, vec![0, 1]);
        for line in s.graph().lines() {
            assert_eq!(line.style, StyleAttrs::single(Color::rgb(0, 98, 65)));
        }
        // One commit per drawn line
        s.undo();
        assert_eq!(s.graph().line_count(), 1);
    }

    #[test]
    fn line_back_to_its_source_is_silently_rejected() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0)]);
        s.set_tool(Tool::DrawLine(PathKind::Simple));
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(2.0, 2.0), Some(&core_hit(ids[0])));

        assert_eq!(s.graph().line_count(), 0);
        assert!(!s.can_undo());
    }

    #[test]
    fn drawing_onto_background_creates_nothing() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0)]);
        s.set_tool(Tool::DrawLine(PathKind::Simple));
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(80.0, 80.0), Some("background"));
        assert_eq!(s.graph().line_count(), 0);
    }

    #[test]
    fn two_colors_meeting_promote_an_interchange() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0), (0.0, 50.0)]);
        s.set_tool(Tool::DrawLine(PathKind::Simple));
        s.set_theme_color(Color::rgb(228, 0, 43));
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(50.0, 0.0), Some(&core_hit(ids[1])));

        s.set_tool(Tool::DrawLine(PathKind::Simple));
        s.set_theme_color(Color::rgb(0, 98, 65));
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(0.0, 50.0), Some(&core_hit(ids[2])));

        assert!(matches!(
            s.graph().node(ids[0]).unwrap().kind,
            NodeKind::Station(StationAttrs::Interchange { .. })
        ));
    }

    #[test]
    fn rect_select_collects_contained_nodes() {
        let (mut s, ids) = session_with_stations(&[(10.0, 10.0), (20.0, 20.0), (500.0, 500.0)]);
        s.handle(&InputEvent::down(0.0, 0.0), None);
        s.handle(&InputEvent::moved(30.0, 30.0), None);
        assert!(s.marquee().is_some());
        s.handle(&InputEvent::up(30.0, 30.0), None);

        assert_eq!(s.selection().len(), 2);
        assert!(s.selection().contains(&ids[0]));
        assert!(s.selection().contains(&ids[1]));
        assert!(s.marquee().is_none());
    }

    #[test]
    fn undo_redo_restore_drag_positions() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0)]);
        s.set_snap_enabled(false);
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::moved(100.0, 0.0), None);
        s.handle(&InputEvent::up(100.0, 0.0), None);
        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(100.0, 0.0));

        s.undo();
        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(0.0, 0.0));
        s.redo();
        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(100.0, 0.0));
    }

    #[test]
    fn delete_selection_cascades_and_commits_once() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0), (50.0, 0.0)]);
        s.set_tool(Tool::DrawLine(PathKind::Simple));
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(50.0, 0.0), Some(&core_hit(ids[1])));

        s.set_tool(Tool::Select);
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::up(0.0, 0.0), None);
        s.delete_selection();

        assert_eq!(s.graph().node_count(), 1);
        assert_eq!(s.graph().line_count(), 0);
        s.undo();
        assert_eq!(s.graph().node_count(), 2);
        assert_eq!(s.graph().line_count(), 1);
    }

    #[test]
    fn interrupted_drag_commits_the_last_position() {
        let (mut s, ids) = session_with_stations(&[(0.0, 0.0)]);
        s.set_snap_enabled(false);
        s.handle(&InputEvent::down(0.0, 0.0), Some(&core_hit(ids[0])));
        s.handle(&InputEvent::moved(200.0, 0.0), None);
        s.cancel_drag();

        assert_eq!(s.graph().node(ids[0]).unwrap().pos, Point::new(200.0, 0.0));
        assert!(s.can_undo());
    }
}
