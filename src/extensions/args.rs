//! Structured extension call arguments.
//!
//! Clients pass positional and keyword arguments as JSON text (an array and
//! an object) which deserializes into the [`ArgValue`] tagged union. Nothing
//! is ever evaluated as code on the server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::ExtensionError;

/// An argument value: primitives, lists and string-keyed maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// Deserialized positional and keyword arguments for one extension call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub args: Vec<ArgValue>,
    pub kwargs: BTreeMap<String, ArgValue>,
}

impl CallArgs {
    /// Parse the wire representations. Empty strings mean "no arguments".
    pub fn parse(args_repr: &str, kwargs_repr: &str) -> Result<Self, ExtensionError> {
        let args = if args_repr.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(args_repr)
                .map_err(|e| ExtensionError::BadArguments(format!("args: {e}")))?
        };
        let kwargs = if kwargs_repr.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(kwargs_repr)
                .map_err(|e| ExtensionError::BadArguments(format!("kwargs: {e}")))?
        };
        Ok(Self { args, kwargs })
    }

    /// Positional string argument accessor for extension implementations.
    pub fn str_arg(&self, index: usize) -> Result<&str, String> {
        self.args
            .get(index)
            .and_then(ArgValue::as_str)
            .ok_or_else(|| format!("expected a string at positional argument {index}"))
    }
}
