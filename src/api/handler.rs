//! The RPC-facing service façade.
//!
//! `GraphServiceHandler` exposes the complete operation set (graph lifecycle,
//! data loading, algorithm invocation, extension management) by composing the
//! graph registry, the extension registry and the engine. Every internal
//! failure is translated at this boundary into the single external
//! [`ServiceError`] kind.
//!
//! The registries are owned state behind one mutex each: id allocation,
//! extension load/unload and lazy default-graph creation are all
//! read-modify-write on shared state. Locks are held for the duration of an
//! operation, so concurrent mutations serialize; `uptime()` takes no lock.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::error::{GraphError, GraphResult, ServiceError};
use crate::core::types::{GraphId, HeaderMode, Node2vecResult};
use crate::engine::table::{CsvOptions, DType};
use crate::engine::{
    EdgeDataOptions, GraphEngine, GraphHandle, SubgraphOptions, VertexDataOptions,
};
use crate::extensions::{ExtensionRegistry, ModuleLoader};
use crate::graph::GraphRegistry;

/// Parameters for attaching a CSV file as vertex data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexDataRequest {
    pub csv_file_name: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    pub dtypes: Vec<String>,
    #[serde(default = "default_header")]
    pub header: i32,
    pub vertex_col_name: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub property_columns: Vec<String>,
    #[serde(default)]
    pub graph_id: GraphId,
}

/// Parameters for attaching a CSV file as edge data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDataRequest {
    pub csv_file_name: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    pub dtypes: Vec<String>,
    #[serde(default = "default_header")]
    pub header: i32,
    /// Source and destination column names, in that order.
    pub vertex_col_names: Vec<String>,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub property_columns: Vec<String>,
    #[serde(default)]
    pub graph_id: GraphId,
}

/// Parameters for subgraph extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSubgraphRequest {
    #[serde(default)]
    pub create_using: String,
    #[serde(default)]
    pub selection: String,
    #[serde(default)]
    pub edge_weight_property: String,
    #[serde(default = "default_edge_weight")]
    pub default_edge_weight: f64,
    #[serde(default)]
    pub allow_multi_edges: bool,
    #[serde(default)]
    pub graph_id: GraphId,
}

fn default_delimiter() -> String {
    " ".to_string()
}

fn default_header() -> i32 {
    -1
}

fn default_edge_weight() -> f64 {
    1.0
}

pub struct GraphServiceHandler<E: GraphEngine> {
    engine: Arc<E>,
    graphs: Mutex<GraphRegistry<E>>,
    extensions: Mutex<ExtensionRegistry>,
    start_time: Instant,
}

impl<E: GraphEngine> GraphServiceHandler<E> {
    pub fn new(engine: Arc<E>, loader: Box<dyn ModuleLoader>) -> Self {
        Self {
            graphs: Mutex::new(GraphRegistry::new(engine.clone())),
            extensions: Mutex::new(ExtensionRegistry::new(loader)),
            engine,
            start_time: Instant::now(),
        }
    }

    /// Seconds since handler start. Often used as a ping; never fails and
    /// never takes a registry lock.
    pub fn uptime(&self) -> i32 {
        self.start_time.elapsed().as_secs() as i32
    }

    /// Create a new empty graph and return its id.
    pub fn create_graph(&self) -> Result<GraphId, ServiceError> {
        let id = self.graphs.lock().create();
        info!("created graph {id}");
        Ok(id)
    }

    /// Remove the graph identified by `graph_id` from the server.
    pub fn delete_graph(&self, graph_id: GraphId) -> Result<(), ServiceError> {
        self.graphs.lock().remove(graph_id)?;
        info!("deleted graph {graph_id}");
        Ok(())
    }

    /// Ids of every graph currently registered.
    pub fn get_graph_ids(&self) -> Result<Vec<GraphId>, ServiceError> {
        Ok(self.graphs.lock().ids())
    }

    /// Read a server-local CSV file and attach it as vertex data to the
    /// addressed graph (the default graph when the id is omitted).
    pub fn load_csv_as_vertex_data(&self, request: &VertexDataRequest) -> Result<(), ServiceError> {
        let csv = csv_options(
            &request.csv_file_name,
            &request.delimiter,
            &request.dtypes,
            request.header,
        )?;
        let options = VertexDataOptions {
            vertex_col_name: request.vertex_col_name.clone(),
            type_name: request.type_name.clone(),
            property_columns: request.property_columns.clone(),
        };

        let mut graphs = self.graphs.lock();
        let handle = graphs.get_mut(request.graph_id)?;
        let table = self.engine.read_csv(&csv)?;
        match handle {
            GraphHandle::Property(pg) => self.engine.add_vertex_data(pg, table, &options)?,
            GraphHandle::Plain(_) => return Err(no_properties_error("load_csv_as_vertex_data")),
        }
        info!(
            "loaded vertex data from {} into graph {}",
            request.csv_file_name, request.graph_id
        );
        Ok(())
    }

    /// Read a server-local CSV file and attach it as edge data to the
    /// addressed graph (the default graph when the id is omitted).
    pub fn load_csv_as_edge_data(&self, request: &EdgeDataRequest) -> Result<(), ServiceError> {
        let csv = csv_options(
            &request.csv_file_name,
            &request.delimiter,
            &request.dtypes,
            request.header,
        )?;
        let options = EdgeDataOptions {
            vertex_col_names: request.vertex_col_names.clone(),
            type_name: request.type_name.clone(),
            property_columns: request.property_columns.clone(),
        };

        let mut graphs = self.graphs.lock();
        let handle = graphs.get_mut(request.graph_id)?;
        let table = self.engine.read_csv(&csv)?;
        match handle {
            GraphHandle::Property(pg) => self.engine.add_edge_data(pg, table, &options)?,
            GraphHandle::Plain(_) => return Err(no_properties_error("load_csv_as_edge_data")),
        }
        info!(
            "loaded edge data from {} into graph {}",
            request.csv_file_name, request.graph_id
        );
        Ok(())
    }

    /// Number of edges in the addressed graph.
    pub fn get_num_edges(&self, graph_id: GraphId) -> Result<i32, ServiceError> {
        let mut graphs = self.graphs.lock();
        let handle = graphs.get_mut(graph_id)?;
        let count = self.engine.num_edges(handle)?;
        i32::try_from(count)
            .map_err(|_| ServiceError::new(format!("edge count {count} exceeds i32 range")))
    }

    /// Extract a plain graph from a property-carrying graph and register it
    /// under a fresh id.
    pub fn extract_subgraph(
        &self,
        request: &ExtractSubgraphRequest,
    ) -> Result<GraphId, ServiceError> {
        let options = SubgraphOptions {
            create_using: request.create_using.clone(),
            selection: request.selection.clone(),
            edge_weight_property: request.edge_weight_property.clone(),
            default_edge_weight: request.default_edge_weight,
            allow_multi_edges: request.allow_multi_edges,
        };

        let mut graphs = self.graphs.lock();
        let extracted = {
            let handle = graphs.get_mut(request.graph_id)?;
            match handle {
                GraphHandle::Property(pg) => self.engine.extract_subgraph(pg, &options)?,
                GraphHandle::Plain(_) => {
                    return Err(GraphError::CapabilityMismatch(
                        "extract_subgraph() can only be called on a graph with properties"
                            .to_string(),
                    )
                    .into())
                }
            }
        };
        let id = graphs.add(GraphHandle::Plain(extracted));
        info!("extracted subgraph {} from graph {}", id, request.graph_id);
        Ok(id)
    }

    /// Run a node2vec walk on a plain (extracted) graph.
    pub fn node2vec(
        &self,
        start_vertices: &[i32],
        max_depth: i32,
        graph_id: GraphId,
    ) -> Result<Node2vecResult, ServiceError> {
        let mut graphs = self.graphs.lock();
        let handle = graphs.get_mut(graph_id)?;
        match handle {
            GraphHandle::Plain(g) => Ok(self.engine.node2vec(g, start_vertices, max_depth)?),
            GraphHandle::Property(_) => Err(GraphError::CapabilityMismatch(
                "node2vec() cannot operate directly on a graph with properties, call \
                 extract_subgraph() then call node2vec() on the extracted subgraph instead"
                    .to_string(),
            )
            .into()),
        }
    }

    pub fn pagerank(&self, _graph_id: GraphId) -> Result<(), ServiceError> {
        Err(GraphError::NotImplemented("pagerank").into())
    }

    /// Load every extension module found in the directory; returns how many
    /// were loaded.
    pub fn load_graph_creation_extensions(&self, dir_path: &str) -> Result<i32, ServiceError> {
        let count = self.extensions.lock().load_dir(Path::new(dir_path))?;
        Ok(count as i32)
    }

    /// Remove all loaded extension modules. Never fails.
    pub fn unload_graph_creation_extensions(&self) {
        self.extensions.lock().unload();
    }

    /// Invoke a graph creation extension function by name and register the
    /// graph it returns under a fresh id.
    pub fn call_graph_creation_extension(
        &self,
        func_name: &str,
        func_args_repr: &str,
        func_kwargs_repr: &str,
    ) -> Result<GraphId, ServiceError> {
        let handle = self
            .extensions
            .lock()
            .invoke(func_name, func_args_repr, func_kwargs_repr)?;
        let id = self.graphs.lock().add(handle);
        info!("extension '{func_name}' created graph {id}");
        Ok(id)
    }
}

fn no_properties_error(operation: &str) -> ServiceError {
    GraphError::CapabilityMismatch(format!(
        "{operation}() can only be called on a graph with properties"
    ))
    .into()
}

fn csv_options(
    path: &str,
    delimiter: &str,
    dtypes: &[String],
    header: i32,
) -> GraphResult<CsvOptions> {
    let delimiter = match delimiter.as_bytes() {
        [b] => *b,
        _ => {
            return Err(GraphError::InvalidInput(format!(
                "delimiter must be a single byte, got '{delimiter}'"
            )))
        }
    };
    let dtypes = dtypes
        .iter()
        .map(|name| DType::parse(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CsvOptions {
        path: path.into(),
        delimiter,
        dtypes,
        header: HeaderMode::from_wire(header)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DEFAULT_GRAPH_ID;
    use crate::engine::MemoryEngine;
    use crate::extensions::StaticTableLoader;

    fn handler() -> GraphServiceHandler<MemoryEngine> {
        GraphServiceHandler::new(
            Arc::new(MemoryEngine::new()),
            Box::new(StaticTableLoader::new()),
        )
    }

    #[test]
    fn test_uptime_is_non_negative() {
        assert!(handler().uptime() >= 0);
    }

    #[test]
    fn test_create_and_list_graphs() {
        let handler = handler();
        let a = handler.create_graph().unwrap();
        let b = handler.create_graph().unwrap();
        assert!(b > a);
        let mut ids = handler.get_graph_ids().unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_delete_unknown_graph_is_service_error() {
        let handler = handler();
        let err = handler.delete_graph(9999).unwrap_err();
        assert_eq!(err.message, "invalid graph_id 9999");
    }

    #[test]
    fn test_num_edges_materializes_default_graph() {
        let handler = handler();
        assert_eq!(handler.get_num_edges(DEFAULT_GRAPH_ID).unwrap(), 0);
        assert_eq!(handler.get_graph_ids().unwrap(), vec![DEFAULT_GRAPH_ID]);
    }

    #[test]
    fn test_pagerank_not_implemented() {
        let handler = handler();
        let err = handler.pagerank(DEFAULT_GRAPH_ID).unwrap_err();
        assert!(err.message.contains("not implemented"));
    }

    #[test]
    fn test_node2vec_rejects_property_graph() {
        let handler = handler();
        let id = handler.create_graph().unwrap();
        let err = handler.node2vec(&[0], 2, id).unwrap_err();
        assert!(err.message.contains("extract_subgraph()"));
    }

    #[test]
    fn test_extract_subgraph_rejects_unknown_graph() {
        let handler = handler();
        let request = ExtractSubgraphRequest {
            create_using: String::new(),
            selection: String::new(),
            edge_weight_property: String::new(),
            default_edge_weight: 1.0,
            allow_multi_edges: false,
            graph_id: 4242,
        };
        let err = handler.extract_subgraph(&request).unwrap_err();
        assert_eq!(err.message, "invalid graph_id 4242");
    }

    #[test]
    fn test_load_edge_data_rejects_multibyte_delimiter() {
        let handler = handler();
        let request = EdgeDataRequest {
            csv_file_name: "unused.csv".to_string(),
            delimiter: ", ".to_string(),
            dtypes: vec!["int32".to_string(), "int32".to_string()],
            header: -1,
            vertex_col_names: vec!["0".to_string(), "1".to_string()],
            type_name: String::new(),
            property_columns: Vec::new(),
            graph_id: DEFAULT_GRAPH_ID,
        };
        let err = handler.load_csv_as_edge_data(&request).unwrap_err();
        assert!(err.message.contains("delimiter"));
    }

    #[test]
    fn test_call_extension_unknown_function() {
        let handler = handler();
        let err = handler
            .call_graph_creation_extension("missing", "", "")
            .unwrap_err();
        assert!(err.message.contains("missing is not a graph creation extension"));
    }

    #[test]
    fn test_unload_extensions_never_fails() {
        let handler = handler();
        handler.unload_graph_creation_extensions();
        handler.unload_graph_creation_extensions();
    }
}
