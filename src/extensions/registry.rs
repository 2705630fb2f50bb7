//! Extension module table: directory loading, name resolution, invocation.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::core::error::ExtensionError;
use crate::engine::GraphHandle;
use crate::extensions::loader::{ModuleLoader, EXTENSION_STEM_SUFFIX};
use crate::extensions::{CallArgs, ExtensionFn, ExtensionModule};

/// Names starting with this prefix are private and never resolvable.
const RESERVED_PRIVATE_PREFIX: &str = "__";

pub struct ExtensionRegistry {
    loader: Box<dyn ModuleLoader>,
    modules: Vec<ExtensionModule>,
}

impl ExtensionRegistry {
    pub fn new(loader: Box<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            modules: Vec::new(),
        }
    }

    /// Load every extension module found in `dir` and return how many were
    /// loaded. Scanning is additive across calls; within one call loading is
    /// all-or-nothing: the first failing module aborts the call and none of
    /// the scanned files are registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ExtensionError> {
        if !dir.is_dir() {
            return Err(ExtensionError::BadDirectory(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|_| ExtensionError::BadDirectory(dir.to_path_buf()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.is_extension_file(path))
            .collect();
        // Deterministic load order regardless of directory iteration order.
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in &paths {
            loaded.push(self.loader.load(path)?);
        }

        let count = loaded.len();
        self.modules.extend(loaded);
        info!(
            "loaded {count} extension modules from {} ({} total)",
            dir.display(),
            self.modules.len()
        );
        Ok(count)
    }

    /// Remove every loaded module.
    pub fn unload(&mut self) {
        info!("unloading {} extension modules", self.modules.len());
        self.modules.clear();
    }

    pub fn num_modules(&self) -> usize {
        self.modules.len()
    }

    /// Find `func_name` in module load order. Private names never resolve.
    pub fn resolve(&self, func_name: &str) -> Result<&ExtensionFn, ExtensionError> {
        if !func_name.starts_with(RESERVED_PRIVATE_PREFIX) {
            for module in &self.modules {
                if let Some(func) = module.get(func_name) {
                    return Ok(func);
                }
            }
        }
        Err(ExtensionError::UnknownFunction(func_name.to_string()))
    }

    /// Resolve and invoke `func_name` with deserialized arguments. Errors and
    /// panics raised by the function surface as runtime extension errors;
    /// registering the produced handle is the caller's job.
    pub fn invoke(
        &self,
        func_name: &str,
        args_repr: &str,
        kwargs_repr: &str,
    ) -> Result<GraphHandle, ExtensionError> {
        let args = CallArgs::parse(args_repr, kwargs_repr)?;
        let func = self.resolve(func_name)?;

        match panic::catch_unwind(AssertUnwindSafe(|| func(&args))) {
            Ok(Ok(handle)) => Ok(handle),
            Ok(Err(detail)) => Err(ExtensionError::Runtime {
                function: func_name.to_string(),
                detail,
            }),
            Err(payload) => {
                let detail = panic_message(&*payload);
                warn!("extension function '{func_name}' panicked: {detail}");
                Err(ExtensionError::Runtime {
                    function: func_name.to_string(),
                    detail,
                })
            }
        }
    }

    fn is_extension_file(&self, path: &Path) -> bool {
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(EXTENSION_STEM_SUFFIX));
        stem_matches && self.loader.matches(path)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
