//! Station type reclassification seam.
//!
//! After a line is created or removed, the session offers both endpoints
//! to a reclassifier, which may promote a basic station to an interchange
//! or demote one back. The promotion rules live outside this engine; the
//! session only depends on the trait. A color-counting default ships so
//! the engine is usable (and testable) stand-alone.

use railmap_core::{Color, ElementId, MapGraph, NodeKind, StationAttrs};
use smallvec::SmallVec;
use std::collections::HashSet;

pub trait StationReclassifier {
    /// Re-derive the station variant of `node` from its incident lines.
    /// Non-station nodes and unknown IDs are left alone.
    fn reclassify(&self, graph: &mut MapGraph, node: ElementId);
}

/// Leaves every station as it is.
pub struct NoReclassify;

impl StationReclassifier for NoReclassify {
    fn reclassify(&self, _graph: &mut MapGraph, _node: ElementId) {}
}

/// Default rule: a station touched by two or more distinct service colors
/// becomes an interchange carrying those colors as its transfer set; with
/// fewer it reverts to a basic station. Terminal stations keep their
/// variant.
pub struct ColorCountReclassifier;

impl StationReclassifier for ColorCountReclassifier {
    fn reclassify(&self, graph: &mut MapGraph, node: ElementId) {
        let colors: HashSet<Color> = graph
            .lines_at(node)
            .iter()
            .flat_map(|l| l.style.colors())
            .collect();

        let Some(n) = graph.node(node) else { return };
        let name = match &n.kind {
            NodeKind::Station(StationAttrs::Basic { name, .. })
            | NodeKind::Station(StationAttrs::Interchange { name, .. }) => name.clone(),
            _ => return,
        };

        let kind = if colors.len() >= 2 {
            let mut transfers: SmallVec<[Color; 2]> = colors.into_iter().collect();
            transfers.sort_by_key(|c| (c.r, c.g, c.b));
            NodeKind::Station(StationAttrs::Interchange { name, transfers })
        } else {
            NodeKind::Station(StationAttrs::Basic { name, rotation: 0 })
        };

        log::debug!("reclassify {node}: {kind:?}");
        let _ = graph.set_node_kind(node, kind);
    }
}
