//! Module loaders: turn a file path into a named set of invocable functions.

use std::collections::HashMap;
use std::path::Path;

use libloading::{Library, Symbol};
use log::info;

use crate::core::error::ExtensionError;
use crate::extensions::{ExtensionFn, ExtensionModule};

/// File stems must end with this suffix to be considered extension modules.
pub const EXTENSION_STEM_SUFFIX: &str = "_extension";

/// Entry point every extension shared object must export under
/// [`ENTRY_SYMBOL`]: returns the module's function table. Plain Rust ABI, so
/// extensions must be built with the same toolchain as the server.
pub type ExtensionEntry = fn() -> Vec<(String, ExtensionFn)>;

pub const ENTRY_SYMBOL: &[u8] = b"graph_creation_extension_entry";

/// Capability that loads one extension module from a path.
pub trait ModuleLoader: Send + Sync {
    /// Whether this loader can handle the given file at all. The registry
    /// applies the `*_extension` stem pattern before asking.
    fn matches(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> Result<ExtensionModule, ExtensionError>;
}

/// Loads extension modules from shared objects via `libloading`.
///
/// This imports and runs code from the scanned directory; deployments that
/// cannot accept that trust boundary should use [`StaticTableLoader`].
#[derive(Debug, Default)]
pub struct LibraryLoader;

impl LibraryLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for LibraryLoader {
    fn matches(&self, path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("so") | Some("dylib") | Some("dll")
        )
    }

    fn load(&self, path: &Path) -> Result<ExtensionModule, ExtensionError> {
        let module = module_stem(path);
        let load_err = |reason: String| ExtensionError::Load {
            module: module.clone(),
            reason,
        };

        let library = unsafe { Library::new(path) }.map_err(|e| load_err(e.to_string()))?;
        let functions = {
            let entry: Symbol<ExtensionEntry> = unsafe { library.get(ENTRY_SYMBOL) }
                .map_err(|e| load_err(format!("missing entry symbol: {e}")))?;
            entry()
        };
        info!(
            "loaded extension module '{module}' with {} functions",
            functions.len()
        );
        Ok(ExtensionModule::with_library(module, functions, library))
    }
}

/// Pre-registered function tables selected by file stem: the restricted
/// alternative to dynamic loading. A scanned `*_extension` file loads only if
/// a table was registered under its stem; anything else is a load failure.
#[derive(Default)]
pub struct StaticTableLoader {
    tables: HashMap<String, Vec<(String, ExtensionFn)>>,
}

impl StaticTableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module_stem: impl Into<String>, functions: Vec<(String, ExtensionFn)>) {
        self.tables.insert(module_stem.into(), functions);
    }
}

impl ModuleLoader for StaticTableLoader {
    fn matches(&self, _path: &Path) -> bool {
        true
    }

    fn load(&self, path: &Path) -> Result<ExtensionModule, ExtensionError> {
        let module = module_stem(path);
        let functions = self
            .tables
            .get(&module)
            .cloned()
            .ok_or_else(|| ExtensionError::Load {
                module: module.clone(),
                reason: "no function table registered for this module".to_string(),
            })?;
        Ok(ExtensionModule::new(module, functions))
    }
}

fn module_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
