//! Geometric snap assist for dragging.
//!
//! Every snap-capable node in the viewport contributes four candidate
//! lines — vertical, horizontal, and both 45° diagonals — in implicit
//! form `a·x + b·y + c = 0`. The candidate set is computed once when a
//! drag starts (and on viewport change), never per pointer move.
//!
//! While dragging, a tracker keeps up to two active lines and at most one
//! active point (midpoint or mirror point of two nodes on the same line),
//! and resolves the cursor position against them: projection onto a
//! single line, the active point when one exists, or the intersection of
//! two lines.

use railmap_core::{ElementId, MapNode, Point, Rect};
use smallvec::SmallVec;

/// Distance at which an already-active line or point is dropped.
pub const KEEP_DISTANCE: f64 = 6.0;
/// Distance at which a candidate line becomes active.
pub const ACTIVATE_DISTANCE: f64 = 3.0;
/// Distance at which a derived point becomes active.
pub const POINT_ACTIVATE_DISTANCE: f64 = 3.0;
/// Perpendicular tolerance for "node lies exactly on the line".
pub const ON_LINE_EPSILON: f64 = 0.01;

/// The four canonical snap-line directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAxis {
    Vertical,
    Horizontal,
    /// Slope +1 in diagram coordinates: `x - y + c = 0`.
    DiagonalRise,
    /// Slope −1: `x + y + c = 0`.
    DiagonalFall,
}

impl SnapAxis {
    pub const ALL: [SnapAxis; 4] = [
        SnapAxis::Vertical,
        SnapAxis::Horizontal,
        SnapAxis::DiagonalRise,
        SnapAxis::DiagonalFall,
    ];

    /// Implicit-form `(a, b)` coefficients.
    pub fn coeffs(self) -> (f64, f64) {
        match self {
            SnapAxis::Vertical => (1.0, 0.0),
            SnapAxis::Horizontal => (0.0, 1.0),
            SnapAxis::DiagonalRise => (1.0, -1.0),
            SnapAxis::DiagonalFall => (1.0, 1.0),
        }
    }
}

/// An implicit alignment line derived from a node's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapLine {
    pub axis: SnapAxis,
    /// The `c` in `a·x + b·y + c = 0`, solved from the origin position.
    pub c: f64,
    /// The node that produced this line.
    pub origin: ElementId,
    /// That node's position when the candidate set was built.
    pub origin_pos: Point,
}

impl SnapLine {
    pub fn through(axis: SnapAxis, node: &MapNode) -> Self {
        let (a, b) = axis.coeffs();
        Self {
            axis,
            c: -(a * node.pos.x + b * node.pos.y),
            origin: node.id,
            origin_pos: node.pos,
        }
    }

    /// Perpendicular distance from a point.
    pub fn distance_to(&self, p: Point) -> f64 {
        let (a, b) = self.axis.coeffs();
        (a * p.x + b * p.y + self.c).abs() / (a * a + b * b).sqrt()
    }

    /// Orthogonal projection of a point onto the line.
    pub fn project(&self, p: Point) -> Point {
        let (a, b) = self.axis.coeffs();
        let norm = a * a + b * b;
        let d = (a * p.x + b * p.y + self.c) / norm;
        Point::new(p.x - a * d, p.y - b * d)
    }

    /// Intersection with another line, `None` when parallel.
    pub fn intersect(&self, other: &SnapLine) -> Option<Point> {
        let (a1, b1) = self.axis.coeffs();
        let (a2, b2) = other.axis.coeffs();
        let det = a1 * b2 - a2 * b1;
        if det == 0.0 {
            return None;
        }
        let x = (-self.c * b2 + other.c * b1) / det;
        let y = (-other.c * a1 + self.c * a2) / det;
        Some(Point::new(x, y))
    }
}

/// A discrete snap candidate derived from two co-linear nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub pos: Point,
    /// The two node positions the point was derived from.
    pub sources: [Point; 2],
}

/// Build the candidate line set from the snap-capable nodes inside the
/// viewport, skipping the nodes being dragged (they would otherwise snap
/// against themselves).
pub fn candidate_lines<'a>(
    nodes: impl Iterator<Item = &'a MapNode>,
    viewport: Rect,
    exclude: &[ElementId],
) -> Vec<SnapLine> {
    let mut out = Vec::new();
    for node in nodes {
        if !node.is_snap_source() || !viewport.contains(node.pos) || exclude.contains(&node.id) {
            continue;
        }
        for axis in SnapAxis::ALL {
            out.push(SnapLine::through(axis, node));
        }
    }
    out
}

/// Per-drag snap state: the cached candidate set plus the currently
/// active lines and point.
#[derive(Debug, Clone)]
pub struct SnapTracker {
    candidates: Vec<SnapLine>,
    active_lines: SmallVec<[SnapLine; 2]>,
    active_point: Option<SnapPoint>,
}

impl SnapTracker {
    pub fn new(candidates: Vec<SnapLine>) -> Self {
        Self {
            candidates,
            active_lines: SmallVec::new(),
            active_point: None,
        }
    }

    pub fn active_lines(&self) -> &[SnapLine] {
        &self.active_lines
    }

    pub fn active_point(&self) -> Option<&SnapPoint> {
        self.active_point.as_ref()
    }

    /// Advance the tracker with a tentative cursor position and resolve
    /// the snapped position.
    pub fn update(&mut self, cursor: Point) -> Point {
        // 1. Drop active lines the cursor has strayed from.
        self.active_lines.retain(|l| l.distance_to(cursor) <= KEEP_DISTANCE);

        // 2. The active point needs a supporting line and proximity.
        if let Some(point) = self.active_point
            && (self.active_lines.is_empty() || point.pos.distance_to(cursor) > KEEP_DISTANCE)
        {
            self.active_point = None;
        }

        // 3. One line, no point: look for a midpoint or mirror point among
        //    nodes sitting exactly on that line.
        if self.active_lines.len() == 1 && self.active_point.is_none() {
            self.active_point = self.nearest_derived_point(self.active_lines[0], cursor);
        }

        // 4. Room for another line: activate the nearest candidate, never
        //    duplicating an active direction (two parallel constraints add
        //    nothing).
        if self.active_lines.len() < 2
            && let Some(line) = self.nearest_candidate(cursor)
        {
            self.active_lines.push(line);
        }

        self.resolve(cursor)
    }

    fn nearest_candidate(&self, cursor: Point) -> Option<SnapLine> {
        self.candidates
            .iter()
            .filter(|c| !self.active_lines.iter().any(|a| a.axis == c.axis))
            .map(|c| (c, c.distance_to(cursor)))
            .filter(|(_, d)| *d <= ACTIVATE_DISTANCE)
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
            .map(|(c, _)| *c)
    }

    /// Positions of candidate nodes lying on `line`, deduplicated through
    /// the candidate set itself (each node contributed one line per axis).
    fn nodes_on_line(&self, line: SnapLine) -> Vec<Point> {
        self.candidates
            .iter()
            .filter(|c| c.axis == line.axis)
            .map(|c| c.origin_pos)
            .filter(|p| line.distance_to(*p) <= ON_LINE_EPSILON)
            .collect()
    }

    fn nearest_derived_point(&self, line: SnapLine, cursor: Point) -> Option<SnapPoint> {
        let on_line = self.nodes_on_line(line);
        let mut best: Option<(SnapPoint, f64)> = None;
        let mut consider = |pos: Point, sources: [Point; 2]| {
            let d = pos.distance_to(cursor);
            if d <= POINT_ACTIVATE_DISTANCE && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((SnapPoint { pos, sources }, d));
            }
        };
        for (i, &p) in on_line.iter().enumerate() {
            for &q in &on_line[i + 1..] {
                consider(Point::midpoint(p, q), [p, q]);
                consider(Point::mirror(p, q), [p, q]);
                consider(Point::mirror(q, p), [q, p]);
            }
        }
        best.map(|(point, _)| point)
    }

    /// Resolve the final position from the active constraints.
    fn resolve(&self, cursor: Point) -> Point {
        match self.active_lines.as_slice() {
            [] => cursor,
            [line] => match &self.active_point {
                Some(point) => point.pos,
                None => line.project(cursor),
            },
            [first, second, ..] => first.intersect(second).unwrap_or(cursor),
        }
    }
}
