//! Deep-copied, serializable snapshots of the diagram graph.
//!
//! A snapshot owns plain vectors of nodes and lines, sorted by ID so two
//! snapshots of the same diagram compare equal regardless of mutation
//! order. It shares no structure with the live graph: exporting clones,
//! importing clones back. The JSON form is the persistence boundary for
//! save/load, history entries, and copy/paste.

use crate::error::GraphError;
use crate::model::{MapGraph, MapLine, MapNode};
use serde::{Deserialize, Serialize};

/// An immutable deep copy of the graph contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<MapNode>,
    pub lines: Vec<MapLine>,
}

impl Snapshot {
    /// Snapshot of an empty diagram.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl MapGraph {
    /// Deep-copy the live contents into a snapshot.
    pub fn export(&self) -> Snapshot {
        let mut nodes: Vec<MapNode> = self.nodes().cloned().collect();
        let mut lines: Vec<MapLine> = self.lines().cloned().collect();
        nodes.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        lines.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Snapshot { nodes, lines }
    }

    /// Replace the live contents with a deep copy of `snapshot`.
    ///
    /// The replacement is all-or-nothing: an invalid snapshot (duplicate
    /// IDs, dangling line endpoints) leaves the current contents in place.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<(), GraphError> {
        let mut fresh = MapGraph::new();
        for node in &snapshot.nodes {
            fresh.add_node(node.clone())?;
        }
        for line in &snapshot.lines {
            fresh.add_line(line.clone())?;
        }
        *self = fresh;
        Ok(())
    }
}
