//! Store + history working together: the reload cycle a session runs on
//! every undo/redo.

use pretty_assertions::assert_eq;
use railmap_core::{
    Color, ElementId, History, MapGraph, MapLine, MapNode, PathAttrs, PathKind, Point, StyleAttrs,
    next_parallel_index,
};

fn station(g: &mut MapGraph, id: &str, x: f64, y: f64) -> ElementId {
    let id = ElementId::intern(id);
    g.add_node(MapNode::station(id, Point::new(x, y), id.as_str()))
        .unwrap();
    id
}

fn line(g: &mut MapGraph, id: &str, a: ElementId, b: ElementId) -> ElementId {
    let id = ElementId::intern(id);
    let kind = PathKind::Diagonal;
    let mut l = MapLine::new(
        id,
        a,
        b,
        PathAttrs::default_for(kind),
        StyleAttrs::single(Color::rgb(0, 25, 168)),
    );
    l.parallel_index = next_parallel_index(g, kind, a, b, l.path.direction());
    g.add_line(l).unwrap();
    id
}

#[test]
fn undo_reload_redo_reload_restores_the_graph() {
    let mut g = MapGraph::new();
    let a = station(&mut g, "stn_it_a", 0.0, 0.0);
    let b = station(&mut g, "stn_it_b", 100.0, 0.0);
    let mut history = History::new(g.export());

    line(&mut g, "line_it_ab", a, b);
    history.commit(g.export());
    let with_line = g.export();

    // Undo: reload the store from the handed-back snapshot
    let snapshot = history.undo().unwrap().clone();
    g.import(&snapshot).unwrap();
    assert_eq!(g.line_count(), 0);
    assert_eq!(g.node_count(), 2);

    // Redo brings the line back, structurally equal
    let snapshot = history.redo().unwrap().clone();
    g.import(&snapshot).unwrap();
    assert_eq!(g.export(), with_line);
}

#[test]
fn parallel_lanes_survive_the_snapshot_boundary() {
    let mut g = MapGraph::new();
    let a = station(&mut g, "stn_it_p1", 0.0, 0.0);
    let b = station(&mut g, "stn_it_p2", 50.0, 50.0);
    for i in 0..3 {
        line(&mut g, &format!("line_it_par_{i}"), a, b);
    }

    let mut restored = MapGraph::new();
    restored.import(&g.export()).unwrap();
    let mut lanes: Vec<i32> = restored.lines_between(a, b).map(|l| l.parallel_index).collect();
    lanes.sort();
    assert_eq!(lanes, vec![0, 1, 2]);
    // The next lane continues after the restored group
    assert_eq!(
        next_parallel_index(&restored, PathKind::Diagonal, a, b, Default::default()),
        3
    );
}

#[test]
fn cascading_drop_then_undo_revives_everything() {
    let mut g = MapGraph::new();
    let a = station(&mut g, "stn_it_c1", 0.0, 0.0);
    let b = station(&mut g, "stn_it_c2", 10.0, 0.0);
    let c = station(&mut g, "stn_it_c3", 20.0, 0.0);
    line(&mut g, "line_it_c_ab", a, b);
    line(&mut g, "line_it_c_bc", b, c);
    let mut history = History::new(g.export());

    g.drop_node(b).unwrap();
    history.commit(g.export());
    assert_eq!(g.line_count(), 0);
    assert!(g.lines().all(|l| l.source != b && l.target != b));

    let snapshot = history.undo().unwrap().clone();
    g.import(&snapshot).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.line_count(), 2);
}
