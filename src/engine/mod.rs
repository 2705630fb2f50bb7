//! The graph/dataframe engine seam.
//!
//! The service layer consumes the engine exclusively through the
//! [`GraphEngine`] trait: graph construction, CSV ingestion, subgraph
//! extraction and algorithms. The handle types ([`PropertyGraph`], [`Graph`])
//! are concrete so that registries and extensions can store and return them,
//! but their computation is owned by the engine implementation. The crate
//! ships [`memory::MemoryEngine`] as the reference backend.

pub mod graph;
pub mod memory;
pub mod property_graph;
pub mod table;

pub use graph::Graph;
pub use memory::MemoryEngine;
pub use property_graph::PropertyGraph;
pub use table::{Cell, CsvOptions, DType, DataTable};

use crate::core::error::EngineError;
use crate::core::types::Node2vecResult;

pub type EngineResult<T> = Result<T, EngineError>;

/// A server-resident graph object. Property-carrying graphs store per-vertex
/// and per-edge attribute columns; plain graphs are topology plus edge
/// weights only. The split makes the capability checks in the service layer
/// exhaustive matches instead of runtime type inspection.
#[derive(Debug)]
pub enum GraphHandle {
    Property(PropertyGraph),
    Plain(Graph),
}

impl GraphHandle {
    pub fn is_property(&self) -> bool {
        matches!(self, GraphHandle::Property(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GraphHandle::Property(_) => "property graph",
            GraphHandle::Plain(_) => "graph",
        }
    }
}

/// How a table should be attached as vertex data.
#[derive(Debug, Clone)]
pub struct VertexDataOptions {
    /// Column holding the vertex id.
    pub vertex_col_name: String,
    /// Vertex type label, empty for untyped.
    pub type_name: String,
    /// Property columns to keep; empty keeps every non-id column.
    pub property_columns: Vec<String>,
}

/// How a table should be attached as edge data.
#[derive(Debug, Clone)]
pub struct EdgeDataOptions {
    /// Source and destination columns, in that order.
    pub vertex_col_names: Vec<String>,
    /// Edge type label, empty for untyped.
    pub type_name: String,
    /// Property columns to keep; empty keeps every non-endpoint column.
    pub property_columns: Vec<String>,
}

/// Formatting and selection options for subgraph extraction.
#[derive(Debug, Clone)]
pub struct SubgraphOptions {
    /// Result graph kind: "" or "Graph" for undirected, "DiGraph" for directed.
    pub create_using: String,
    /// Edge type to select; empty selects every edge.
    pub selection: String,
    /// Edge property to read weights from; empty applies the default weight
    /// to every edge.
    pub edge_weight_property: String,
    /// Weight used when the property is empty or missing on an edge.
    pub default_edge_weight: f64,
    /// When false, edges with duplicate endpoints are coalesced.
    pub allow_multi_edges: bool,
}

/// Capability consumed by the service layer: constructs graph objects,
/// ingests tabular data, extracts subgraphs and runs algorithms.
pub trait GraphEngine: Send + Sync + 'static {
    fn empty_property_graph(&self) -> PropertyGraph;

    fn read_csv(&self, options: &CsvOptions) -> EngineResult<DataTable>;

    fn add_vertex_data(
        &self,
        graph: &mut PropertyGraph,
        table: DataTable,
        options: &VertexDataOptions,
    ) -> EngineResult<()>;

    fn add_edge_data(
        &self,
        graph: &mut PropertyGraph,
        table: DataTable,
        options: &EdgeDataOptions,
    ) -> EngineResult<()>;

    fn num_edges(&self, handle: &GraphHandle) -> EngineResult<usize>;

    fn extract_subgraph(
        &self,
        graph: &PropertyGraph,
        options: &SubgraphOptions,
    ) -> EngineResult<Graph>;

    fn node2vec(
        &self,
        graph: &Graph,
        start_vertices: &[i32],
        max_depth: i32,
    ) -> EngineResult<Node2vecResult>;
}
