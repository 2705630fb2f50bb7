//! Shared types and the error taxonomy used across the service.

pub mod error;
pub mod types;

pub use error::{EngineError, ExtensionError, GraphError, GraphResult, ServiceError};
pub use types::{GraphId, HeaderMode, Node2vecResult, DEFAULT_GRAPH_ID};
