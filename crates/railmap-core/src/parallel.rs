//! Lane-offset assignment for parallel lines.
//!
//! Lines of the same path family joining the same unordered node pair,
//! drawn with the same direction flag, form a lane group. Auto-managed
//! members of a group hold the contiguous indices `{0..k-1}`; index `-1`
//! marks a line as manually managed and invisible to the assigner.

use crate::error::GraphError;
use crate::id::ElementId;
use crate::model::{MapGraph, PARALLEL_INDEX_MANUAL, PathDirection, PathKind};
use std::collections::HashSet;

/// The lowest non-negative index not yet used in the lane group.
pub fn next_parallel_index(
    graph: &MapGraph,
    kind: PathKind,
    a: ElementId,
    b: ElementId,
    direction: PathDirection,
) -> i32 {
    let used: HashSet<i32> = graph
        .lines_between(a, b)
        .filter(|l| {
            l.path.kind() == kind
                && l.path.direction() == direction
                && l.parallel_index > PARALLEL_INDEX_MANUAL
        })
        .map(|l| l.parallel_index)
        .collect();
    let mut lane = 0;
    while used.contains(&lane) {
        lane += 1;
    }
    lane
}

/// Reassign the whole lane group to `{0..k-1}` in stable ID order.
/// Manually managed lines (`-1`) keep their sentinel and occupy no lane.
pub fn reindex_group(
    graph: &mut MapGraph,
    kind: PathKind,
    a: ElementId,
    b: ElementId,
    direction: PathDirection,
) {
    let mut members: Vec<ElementId> = graph
        .lines_between(a, b)
        .filter(|l| {
            l.path.kind() == kind
                && l.path.direction() == direction
                && l.parallel_index > PARALLEL_INDEX_MANUAL
        })
        .map(|l| l.id)
        .collect();
    members.sort_by(|x, y| x.as_str().cmp(y.as_str()));

    for (lane, id) in members.into_iter().enumerate() {
        if let Some(line) = graph.line_mut(id) {
            line.parallel_index = lane as i32;
        }
    }
}

/// Flip a line's direction flag and repair both affected lane groups.
///
/// The line leaves one (kind, pair, direction) group and joins the
/// opposite one; both are reindexed so neither ends up with a collision
/// or a gap.
pub fn flip_line_direction(graph: &mut MapGraph, id: ElementId) -> Result<(), GraphError> {
    let (kind, old_dir, a, b) = {
        let line = graph.line(id).ok_or(GraphError::UnknownId(id))?;
        (line.path.kind(), line.path.direction(), line.source, line.target)
    };
    if let Some(line) = graph.line_mut(id) {
        line.path.flip_direction();
    }
    reindex_group(graph, kind, a, b, old_dir);
    reindex_group(graph, kind, a, b, old_dir.flipped());
    Ok(())
}
