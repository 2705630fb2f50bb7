use serde::{Deserialize, Serialize};

use crate::core::error::GraphError;

/// Caller-visible integer handle identifying a server-resident graph object.
pub type GraphId = i32;

/// The graph implicitly addressed when a caller omits a graph id. It is
/// materialized lazily on first access and never allocated by the id counter.
pub const DEFAULT_GRAPH_ID: GraphId = 0;

/// CSV header placement, decoded from the wire convention: `-1` means "infer
/// the header row from the first line", `-2` means "no header row present",
/// and any non-negative value is a zero-based header row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Infer,
    None,
    Row(u32),
}

impl HeaderMode {
    pub fn from_wire(value: i32) -> Result<Self, GraphError> {
        match value {
            -1 => Ok(HeaderMode::Infer),
            -2 => Ok(HeaderMode::None),
            n if n >= 0 => Ok(HeaderMode::Row(n as u32)),
            n => Err(GraphError::InvalidInput(format!(
                "invalid header value {n}, expected -1, -2 or a row index"
            ))),
        }
    }
}

/// Result of a node2vec walk. `vertex_paths` holds every walk concatenated,
/// `path_sizes` the length of each walk, and `edge_weights` the weight of each
/// traversed edge (one fewer per walk than its vertex count).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node2vecResult {
    pub vertex_paths: Vec<i32>,
    pub edge_weights: Vec<f64>,
    pub path_sizes: Vec<i32>,
}
