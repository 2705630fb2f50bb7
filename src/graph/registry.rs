//! Mapping from integer graph id to graph object handle.
//!
//! The registry owns id allocation and the default-object policy; it never
//! inspects handle internals. It is process-lifetime state with no
//! persistence, held by the service handler behind a mutex.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::core::error::{GraphError, GraphResult};
use crate::core::types::{GraphId, DEFAULT_GRAPH_ID};
use crate::engine::{GraphEngine, GraphHandle};

pub struct GraphRegistry<E: GraphEngine> {
    engine: Arc<E>,
    // Seeded past the default id so the counter never allocates it.
    next_id: GraphId,
    graphs: HashMap<GraphId, GraphHandle>,
}

impl<E: GraphEngine> GraphRegistry<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            next_id: DEFAULT_GRAPH_ID + 1,
            graphs: HashMap::new(),
        }
    }

    /// Construct an empty property graph and register it under a fresh id.
    pub fn create(&mut self) -> GraphId {
        let graph = self.engine.empty_property_graph();
        self.add(GraphHandle::Property(graph))
    }

    /// Register an externally constructed handle under a fresh id. Always
    /// succeeds; used by extension invocation and subgraph extraction.
    pub fn add(&mut self, handle: GraphHandle) -> GraphId {
        let id = self.next_id;
        self.next_id += 1;
        self.graphs.insert(id, handle);
        debug!("registered {} as graph {id}", self.graphs[&id].kind());
        id
    }

    /// Remove the entry for `id`. The engine object is dropped with it.
    pub fn remove(&mut self, id: GraphId) -> GraphResult<()> {
        self.graphs
            .remove(&id)
            .map(|_| ())
            .ok_or(GraphError::GraphNotFound(id))
    }

    /// Look up the handle stored under `id`. The default graph is
    /// materialized lazily on first access; any other absent id fails.
    pub fn get_mut(&mut self, id: GraphId) -> GraphResult<&mut GraphHandle> {
        if !self.graphs.contains_key(&id) {
            if id != DEFAULT_GRAPH_ID {
                return Err(GraphError::GraphNotFound(id));
            }
            let graph = self.engine.empty_property_graph();
            self.graphs.insert(id, GraphHandle::Property(graph));
            debug!("materialized default graph {DEFAULT_GRAPH_ID}");
        }
        // Presence was just ensured.
        self.graphs
            .get_mut(&id)
            .ok_or(GraphError::GraphNotFound(id))
    }

    /// All currently registered ids, in no particular order.
    pub fn ids(&self) -> Vec<GraphId> {
        self.graphs.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
