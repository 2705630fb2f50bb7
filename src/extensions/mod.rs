//! Graph creation extensions.
//!
//! An extension is a server-local loadable unit exposing named functions that
//! construct and return a graph object. Loading is expressed as the
//! [`ModuleLoader`] capability: [`loader::LibraryLoader`] imports shared
//! objects found in a directory, while [`loader::StaticTableLoader`] restricts
//! loading to pre-registered function tables for deployments that must not
//! import arbitrary files.

pub mod args;
pub mod loader;
pub mod registry;

pub use args::{ArgValue, CallArgs};
pub use loader::{LibraryLoader, ModuleLoader, StaticTableLoader};
pub use registry::ExtensionRegistry;

use std::sync::Arc;

use libloading::Library;

use crate::engine::GraphHandle;

/// A named function exported by an extension module. Errors are reported as
/// plain text; the registry wraps them with the function name.
pub type ExtensionFn = Arc<dyn Fn(&CallArgs) -> Result<GraphHandle, String> + Send + Sync>;

/// One loaded extension module: a name (the file stem) and its function
/// table, in export order.
pub struct ExtensionModule {
    name: String,
    functions: Vec<(String, ExtensionFn)>,
    // Keeps the backing shared object mapped while its functions are alive.
    _library: Option<Library>,
}

impl ExtensionModule {
    pub fn new(name: impl Into<String>, functions: Vec<(String, ExtensionFn)>) -> Self {
        Self {
            name: name.into(),
            functions,
            _library: None,
        }
    }

    pub fn with_library(
        name: impl Into<String>,
        functions: Vec<(String, ExtensionFn)>,
        library: Library,
    ) -> Self {
        Self {
            name: name.into(),
            functions,
            _library: Some(library),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, func_name: &str) -> Option<&ExtensionFn> {
        self.functions
            .iter()
            .find(|(name, _)| name == func_name)
            .map(|(_, func)| func)
    }
}

impl std::fmt::Debug for ExtensionModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionModule")
            .field("name", &self.name)
            .field(
                "functions",
                &self
                    .functions
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
