pub mod cycle;
pub mod error;
pub mod history;
pub mod id;
pub mod model;
pub mod parallel;
pub mod snapshot;

pub use cycle::{ClosedPath, DEFAULT_NODE_CAP, find_shortest_closed_path};
pub use error::GraphError;
pub use history::History;
pub use id::ElementId;
pub use model::*;
pub use parallel::{flip_line_direction, next_parallel_index, reindex_group};
pub use snapshot::Snapshot;

// Re-export petgraph index types so downstream crates don't need a direct dependency
pub use petgraph::graph::{EdgeIndex, NodeIndex};
