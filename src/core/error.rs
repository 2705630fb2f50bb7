//! Error taxonomy for graphserve.
//!
//! Internal errors are layered: `EngineError` for the graph/dataframe engine,
//! `ExtensionError` for the extension loading/invocation subsystem, and
//! `GraphError` as the unified internal type with `#[from]` conversions.
//! The service boundary collapses all of them into the single externally
//! visible `ServiceError`, which carries only a human-readable message.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::GraphId;

/// Unified internal error type.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("invalid graph_id {0}")]
    GraphNotFound(GraphId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    CapabilityMismatch(String),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// Unified internal result type.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors reported by a graph engine implementation.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("schema mismatch: {0}")]
    Schema(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown vertex {0}")]
    UnknownVertex(i64),
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Csv(err.to_string())
    }
}

/// Errors reported by the extension loading and invocation subsystem.
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("bad directory: {}", .0.display())]
    BadDirectory(PathBuf),

    #[error("failed to load extension module '{module}': {reason}")]
    Load { module: String, reason: String },

    #[error("{0} is not a graph creation extension")]
    UnknownFunction(String),

    #[error("error running {function}: {detail}")]
    Runtime { function: String, detail: String },

    #[error("bad extension call arguments: {0}")]
    BadArguments(String),
}

/// The single error kind visible to clients. Every internal failure is
/// re-raised across the RPC boundary as one of these; clients can only read
/// the message text, never distinguish kinds programmatically.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<GraphError> for ServiceError {
    fn from(err: GraphError) -> Self {
        ServiceError::new(err.to_string())
    }
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        GraphError::from(err).into()
    }
}

impl From<ExtensionError> for ServiceError {
    fn from(err: ExtensionError) -> Self {
        GraphError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_carries_internal_message() {
        let err: ServiceError = GraphError::GraphNotFound(9999).into();
        assert_eq!(err.message, "invalid graph_id 9999");
    }

    #[test]
    fn test_extension_error_converts() {
        let err: GraphError = ExtensionError::UnknownFunction("foo".into()).into();
        let msg = err.to_string();
        assert!(msg.contains("foo is not a graph creation extension"));
    }
}
