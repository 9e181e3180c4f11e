//! Bounded shortest-cycle search, used for loop-line detection.
//!
//! Breadth-first search from a start node following only outgoing lines.
//! Whenever an expansion edge returns to the start, the candidate cycle is
//! reconstructed through parent pointers; the shortest candidate wins.
//! Expansion stops once a reconstructed cycle would exceed the node cap.

use crate::id::ElementId;
use crate::model::MapGraph;
use std::collections::{HashMap, VecDeque};

/// Nodes a cycle may contain before the search gives up.
pub const DEFAULT_NODE_CAP: usize = 100;

/// An ordered closed path: `nodes[0]` is the start node, and the last
/// entry of `lines` leads back to it. `nodes.len() == lines.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPath {
    pub nodes: Vec<ElementId>,
    pub lines: Vec<ElementId>,
}

impl ClosedPath {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Find the shortest directed cycle through `start`, visiting at most
/// `cap` nodes. Returns `None` when `start` is absent from the graph or
/// no such cycle exists.
pub fn find_shortest_closed_path(
    graph: &MapGraph,
    start: ElementId,
    cap: usize,
) -> Option<ClosedPath> {
    if !graph.contains_node(start) {
        return None;
    }

    // (parent node, line taken into this node), set on first visit.
    let mut parents: HashMap<ElementId, (ElementId, ElementId)> = HashMap::new();
    let mut depth: HashMap<ElementId, usize> = HashMap::new();
    let mut queue: VecDeque<ElementId> = VecDeque::new();
    depth.insert(start, 0);
    queue.push_back(start);

    let mut best: Option<ClosedPath> = None;

    while let Some(current) = queue.pop_front() {
        let d = depth[&current];
        // A cycle closing here spans d + 1 nodes; past the cap the whole
        // frontier is too deep, since BFS grows depth monotonically.
        if d + 1 > cap {
            break;
        }
        for (line, next) in graph.outgoing(current) {
            if next == start {
                let candidate = reconstruct(&parents, start, current, line.id);
                if best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
                    best = Some(candidate);
                }
                continue;
            }
            if !depth.contains_key(&next) {
                depth.insert(next, d + 1);
                parents.insert(next, (current, line.id));
                queue.push_back(next);
            }
        }
    }

    best
}

/// Walk parent pointers from `last` back to `start`, then reverse.
fn reconstruct(
    parents: &HashMap<ElementId, (ElementId, ElementId)>,
    start: ElementId,
    last: ElementId,
    closing_line: ElementId,
) -> ClosedPath {
    let mut nodes = vec![last];
    let mut lines = vec![closing_line];
    let mut cursor = last;
    while cursor != start {
        let (parent, line) = parents[&cursor];
        nodes.push(parent);
        lines.push(line);
        cursor = parent;
    }
    nodes.reverse();
    // Reversing puts the closing line last, after the lines walked
    // forward from the start.
    lines.reverse();
    ClosedPath { nodes, lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, MapLine, MapNode, PathAttrs, Point, StyleAttrs};

    fn ring(names: &[&str]) -> (MapGraph, Vec<ElementId>) {
        let mut g = MapGraph::new();
        let ids: Vec<ElementId> = names
            .iter()
            .map(|n| ElementId::intern(&format!("stn_cyc_{n}")))
            .collect();
        for (i, id) in ids.iter().enumerate() {
            g.add_node(MapNode::station(*id, Point::new(i as f64 * 10.0, 0.0), names[i]))
                .unwrap();
        }
        for i in 0..ids.len() {
            let j = (i + 1) % ids.len();
            g.add_line(MapLine::new(
                ElementId::intern(&format!("line_cyc_{}_{}", names[i], names[j])),
                ids[i],
                ids[j],
                PathAttrs::Simple,
                StyleAttrs::single(Color::rgb(0, 0, 0)),
            ))
            .unwrap();
        }
        (g, ids)
    }

    #[test]
    fn four_node_ring_found_in_order() {
        let (g, ids) = ring(&["a", "b", "c", "d"]);
        let path = find_shortest_closed_path(&g, ids[0], DEFAULT_NODE_CAP).unwrap();
        assert_eq!(path.nodes, ids);
        assert_eq!(path.lines.len(), 4);
        assert_eq!(path.lines[0].as_str(), "line_cyc_a_b");
        assert_eq!(path.lines[3].as_str(), "line_cyc_d_a");
    }

    #[test]
    fn no_outgoing_lines_means_not_found() {
        let mut g = MapGraph::new();
        let a = ElementId::intern("stn_cyc_lone");
        g.add_node(MapNode::station(a, Point::new(0.0, 0.0), "Lone")).unwrap();
        assert_eq!(find_shortest_closed_path(&g, a, DEFAULT_NODE_CAP), None);
    }

    #[test]
    fn missing_start_means_not_found() {
        let (g, _) = ring(&["a", "b", "c"]);
        let ghost = ElementId::intern("stn_cyc_ghost");
        assert_eq!(find_shortest_closed_path(&g, ghost, DEFAULT_NODE_CAP), None);
    }

    #[test]
    fn shortest_of_two_cycles_wins() {
        let (mut g, ids) = ring(&["p", "q", "r", "s", "t"]);
        // Shortcut q -> p gives a 2-cycle beating the 5-ring
        g.add_line(MapLine::new(
            ElementId::intern("line_cyc_shortcut"),
            ids[1],
            ids[0],
            PathAttrs::Simple,
            StyleAttrs::single(Color::rgb(0, 0, 0)),
        ))
        .unwrap();
        let path = find_shortest_closed_path(&g, ids[0], DEFAULT_NODE_CAP).unwrap();
        assert_eq!(path.nodes, vec![ids[0], ids[1]]);
        assert_eq!(path.lines.len(), 2);
    }

    #[test]
    fn cap_prunes_long_cycles() {
        let (g, ids) = ring(&["a", "b", "c", "d", "e", "f"]);
        assert!(find_shortest_closed_path(&g, ids[0], 5).is_none());
        assert!(find_shortest_closed_path(&g, ids[0], 6).is_some());
    }

    #[test]
    fn direction_matters() {
        // b -> a only; no a -> ... -> a cycle exists
        let mut g = MapGraph::new();
        let a = ElementId::intern("stn_cyc_dir_a");
        let b = ElementId::intern("stn_cyc_dir_b");
        g.add_node(MapNode::station(a, Point::new(0.0, 0.0), "A")).unwrap();
        g.add_node(MapNode::station(b, Point::new(10.0, 0.0), "B")).unwrap();
        g.add_line(MapLine::new(
            ElementId::intern("line_cyc_dir_ba"),
            b,
            a,
            PathAttrs::Simple,
            StyleAttrs::single(Color::rgb(0, 0, 0)),
        ))
        .unwrap();
        assert_eq!(find_shortest_closed_path(&g, a, DEFAULT_NODE_CAP), None);
    }
}
