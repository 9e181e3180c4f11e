//! Core data model for rail-map diagrams.
//!
//! The diagram is a directed multigraph: nodes are stations and decorative
//! or structural "misc" elements, edges are styled line segments. Several
//! lines may connect the same node pair (in either order); an integer
//! parallel-lane index keeps them visually separated.
//!
//! Node and line attributes are tagged unions — one variant per known type
//! tag, each carrying exactly the fields that type uses.

use crate::error::GraphError;
use crate::id::ElementId;
use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two points.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Reflection of `a` through `b`.
    pub fn mirror(a: Point, b: Point) -> Point {
        Point::new(2.0 * b.x - a.x, 2.0 * b.y - a.y)
    }
}

/// An axis-aligned rectangle in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGB line color. Stored as 3 × u8 so colors are hashable and can be
/// counted when deciding interchange promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string: `#RGB` or `#RRGGBB`, `#` optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ─── Node attributes ─────────────────────────────────────────────────────

/// Station visual variants with their type-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StationAttrs {
    /// A plain stop on a single line.
    Basic { name: String, rotation: i16 },
    /// A station serving several lines; `transfers` lists the distinct
    /// line colors meeting here (populated by reclassification).
    Interchange {
        name: String,
        transfers: SmallVec<[Color; 2]>,
    },
    /// An end-of-line station with a direction the terminus mark faces.
    Terminal { name: String, facing: Facing },
}

impl StationAttrs {
    pub fn name(&self) -> &str {
        match self {
            Self::Basic { name, .. } | Self::Interchange { name, .. } | Self::Terminal { name, .. } => {
                name
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

/// Non-station node variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiscAttrs {
    /// An invisible junction point lines can connect through.
    Virtual,
    /// A decorative text label. Not connectable.
    Text { content: String, size: f64 },
}

/// What a node is — selects one attribute variant from a closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Station(StationAttrs),
    Misc(MiscAttrs),
}

/// A positioned node in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: ElementId,
    pub pos: Point,
    pub kind: NodeKind,
    pub zorder: i32,
    pub visible: bool,
}

impl MapNode {
    pub fn new(id: ElementId, pos: Point, kind: NodeKind) -> Self {
        Self {
            id,
            pos,
            kind,
            zorder: 0,
            visible: true,
        }
    }

    /// Shorthand for a basic station.
    pub fn station(id: ElementId, pos: Point, name: &str) -> Self {
        Self::new(
            id,
            pos,
            NodeKind::Station(StationAttrs::Basic {
                name: name.to_string(),
                rotation: 0,
            }),
        )
    }

    /// Shorthand for a virtual junction node.
    pub fn virtual_node(id: ElementId, pos: Point) -> Self {
        Self::new(id, pos, NodeKind::Misc(MiscAttrs::Virtual))
    }

    /// Whether lines may start or end at this node.
    pub fn is_connectable(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Station(_) | NodeKind::Misc(MiscAttrs::Virtual)
        )
    }

    /// Whether this node contributes snap-assist lines while dragging.
    /// Same set as connectable nodes, but also gated on visibility.
    pub fn is_snap_source(&self) -> bool {
        self.visible && self.is_connectable()
    }
}

// ─── Line attributes ─────────────────────────────────────────────────────

/// Which endpoint a bent path leaves axis-aligned first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathDirection {
    #[default]
    From,
    To,
}

impl PathDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::From,
        }
    }
}

/// Geometric path families. Used (with the unordered endpoint pair and the
/// direction flag) as the grouping key for parallel-lane assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    Diagonal,
    Perpendicular,
    Simple,
}

/// Geometric path attributes, one variant per path family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathAttrs {
    /// 45°-bend path: axis-aligned near one endpoint, diagonal elsewhere.
    Diagonal {
        start_from: PathDirection,
        offset_from: f64,
        offset_to: f64,
        round_corner: bool,
    },
    /// 90°-bend path.
    Perpendicular {
        start_from: PathDirection,
        offset_from: f64,
        offset_to: f64,
    },
    /// Straight segment.
    Simple,
}

impl PathAttrs {
    pub fn kind(&self) -> PathKind {
        match self {
            Self::Diagonal { .. } => PathKind::Diagonal,
            Self::Perpendicular { .. } => PathKind::Perpendicular,
            Self::Simple => PathKind::Simple,
        }
    }

    /// The direction flag. Straight paths have no bend, so the flag
    /// defaults to `From`.
    pub fn direction(&self) -> PathDirection {
        match self {
            Self::Diagonal { start_from, .. } | Self::Perpendicular { start_from, .. } => *start_from,
            Self::Simple => PathDirection::From,
        }
    }

    /// Flip the direction flag in place. No-op for straight paths.
    pub fn flip_direction(&mut self) {
        match self {
            Self::Diagonal { start_from, .. } | Self::Perpendicular { start_from, .. } => {
                *start_from = start_from.flipped();
            }
            Self::Simple => {}
        }
    }

    /// Default attribute bag for a path family. Always a fresh value, so
    /// two lines never share attribute storage.
    pub fn default_for(kind: PathKind) -> Self {
        match kind {
            PathKind::Diagonal => Self::Diagonal {
                start_from: PathDirection::From,
                offset_from: 0.0,
                offset_to: 0.0,
                round_corner: false,
            },
            PathKind::Perpendicular => Self::Perpendicular {
                start_from: PathDirection::From,
                offset_from: 0.0,
                offset_to: 0.0,
            },
            PathKind::Simple => Self::Simple,
        }
    }
}

/// Visual style families for lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleAttrs {
    /// Ordinary single-color line.
    SingleColor { color: Color, width: f64 },
    /// Two interleaved colors (shared-track services).
    DualColor { colors: [Color; 2], width: f64 },
    /// Wide decorative river band; carries no service color.
    River { width: f64 },
}

impl StyleAttrs {
    pub fn single(color: Color) -> Self {
        Self::SingleColor { color, width: 5.0 }
    }

    /// Service colors this style contributes to interchange detection.
    pub fn colors(&self) -> SmallVec<[Color; 2]> {
        match self {
            Self::SingleColor { color, .. } => SmallVec::from_slice(&[*color]),
            Self::DualColor { colors, .. } => SmallVec::from_slice(colors),
            Self::River { .. } => SmallVec::new(),
        }
    }
}

/// Lane index meaning "managed by hand, skip auto-assignment".
pub const PARALLEL_INDEX_MANUAL: i32 = -1;

/// A directed line segment between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLine {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
    pub path: PathAttrs,
    pub style: StyleAttrs,
    /// Lane offset among parallel lines; `-1` disables auto-assignment.
    pub parallel_index: i32,
    /// Matches attribute updates against an existing line on import.
    pub reconcile_id: Option<String>,
}

impl MapLine {
    pub fn new(
        id: ElementId,
        source: ElementId,
        target: ElementId,
        path: PathAttrs,
        style: StyleAttrs,
    ) -> Self {
        Self {
            id,
            source,
            target,
            path,
            style,
            parallel_index: PARALLEL_INDEX_MANUAL,
            reconcile_id: None,
        }
    }

    /// Whether this line connects `a` and `b` in either order.
    pub fn joins(&self, a: ElementId, b: ElementId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// A partial patch merged onto an existing line's attributes.
#[derive(Debug, Clone, Default)]
pub struct LinePatch {
    pub path: Option<PathAttrs>,
    pub style: Option<StyleAttrs>,
    pub parallel_index: Option<i32>,
    pub reconcile_id: Option<Option<String>>,
}

// ─── Graph store ─────────────────────────────────────────────────────────

/// The canonical diagram graph.
///
/// Backed by a `StableDiGraph` so indices survive removals, with id→index
/// side tables for O(1) lookup by element ID. Removing a node cascades to
/// its incident lines.
#[derive(Debug, Clone, Default)]
pub struct MapGraph {
    graph: StableDiGraph<MapNode, MapLine>,
    node_index: HashMap<ElementId, NodeIndex>,
    line_index: HashMap<ElementId, EdgeIndex>,
}

impl MapGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn line_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node. Fails without touching the store if the ID is taken.
    pub fn add_node(&mut self, node: MapNode) -> Result<NodeIndex, GraphError> {
        if self.node_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateId(node.id));
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        Ok(idx)
    }

    /// Add a line. Fails without touching the store on a missing endpoint,
    /// a self-loop, or a duplicate line ID.
    pub fn add_line(&mut self, line: MapLine) -> Result<EdgeIndex, GraphError> {
        if self.line_index.contains_key(&line.id) {
            return Err(GraphError::DuplicateId(line.id));
        }
        if line.source == line.target {
            return Err(GraphError::SelfLoop(line.source));
        }
        let from = *self
            .node_index
            .get(&line.source)
            .ok_or(GraphError::MissingEndpoint(line.source))?;
        let to = *self
            .node_index
            .get(&line.target)
            .ok_or(GraphError::MissingEndpoint(line.target))?;
        let id = line.id;
        let eidx = self.graph.add_edge(from, to, line);
        self.line_index.insert(id, eidx);
        Ok(eidx)
    }

    pub fn node(&self, id: ElementId) -> Option<&MapNode> {
        self.node_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn node_mut(&mut self, id: ElementId) -> Option<&mut MapNode> {
        self.node_index.get(&id).copied().map(|idx| &mut self.graph[idx])
    }

    pub fn line(&self, id: ElementId) -> Option<&MapLine> {
        self.line_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn line_mut(&mut self, id: ElementId) -> Option<&mut MapLine> {
        self.line_index.get(&id).copied().map(|idx| &mut self.graph[idx])
    }

    pub fn contains_node(&self, id: ElementId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    /// Move a node to a new position.
    pub fn set_node_pos(&mut self, id: ElementId, pos: Point) -> Result<(), GraphError> {
        let node = self.node_mut(id).ok_or(GraphError::UnknownId(id))?;
        node.pos = pos;
        Ok(())
    }

    /// Replace a node's attribute variant, keeping position and z-order.
    pub fn set_node_kind(&mut self, id: ElementId, kind: NodeKind) -> Result<(), GraphError> {
        let node = self.node_mut(id).ok_or(GraphError::UnknownId(id))?;
        node.kind = kind;
        Ok(())
    }

    /// Merge a partial patch onto a line's attributes.
    pub fn merge_line_attrs(&mut self, id: ElementId, patch: LinePatch) -> Result<(), GraphError> {
        let line = self.line_mut(id).ok_or(GraphError::UnknownId(id))?;
        if let Some(path) = patch.path {
            line.path = path;
        }
        if let Some(style) = patch.style {
            line.style = style;
        }
        if let Some(pi) = patch.parallel_index {
            line.parallel_index = pi;
        }
        if let Some(rid) = patch.reconcile_id {
            line.reconcile_id = rid;
        }
        Ok(())
    }

    /// Remove a node and every line incident to it. Returns the removed
    /// node and lines, or `None` if the ID is unknown.
    pub fn drop_node(&mut self, id: ElementId) -> Option<(MapNode, Vec<MapLine>)> {
        let idx = self.node_index.remove(&id)?;
        let incident: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        let mut removed_lines = Vec::with_capacity(incident.len());
        for eidx in incident {
            if let Some(line) = self.graph.remove_edge(eidx) {
                self.line_index.remove(&line.id);
                removed_lines.push(line);
            }
        }
        let node = self.graph.remove_node(idx)?;
        Some((node, removed_lines))
    }

    /// Remove a line by ID.
    pub fn drop_line(&mut self, id: ElementId) -> Option<MapLine> {
        let eidx = self.line_index.remove(&id)?;
        self.graph.remove_edge(eidx)
    }

    // ─── Iteration ───────────────────────────────────────────────────────

    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.graph.node_weights()
    }

    pub fn lines(&self) -> impl Iterator<Item = &MapLine> {
        self.graph.edge_weights()
    }

    /// Nodes whose position falls inside an axis-aligned rectangle.
    pub fn nodes_in_rect(&self, rect: Rect) -> impl Iterator<Item = &MapNode> {
        self.nodes().filter(move |n| rect.contains(n.pos))
    }

    /// Lines with both endpoints in `set`.
    pub fn lines_within<'a>(
        &'a self,
        set: &'a HashSet<ElementId>,
    ) -> impl Iterator<Item = &'a MapLine> {
        self.lines()
            .filter(move |l| set.contains(&l.source) && set.contains(&l.target))
    }

    /// Lines joining `a` and `b` in either order.
    pub fn lines_between(&self, a: ElementId, b: ElementId) -> impl Iterator<Item = &MapLine> {
        self.lines().filter(move |l| l.joins(a, b))
    }

    /// Lines incident to a node, in either direction.
    pub fn lines_at(&self, id: ElementId) -> Vec<&MapLine> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.weight())
            .collect()
    }

    /// Outgoing lines of a node, with their target IDs.
    pub fn outgoing(&self, id: ElementId) -> Vec<(&MapLine, ElementId)> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.weight(), self.graph[e.target()].id))
            .collect()
    }
}
