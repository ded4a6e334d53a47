//! # ITK Module Lookup
//!
//! Finds the toolkit module a filter belongs to by locating its header in an
//! ITK source tree and reading the `\ingroup ITK<Module>` doc tag. The tree
//! is indexed once per run; headers are only read on lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Module name used when the header or its tag cannot be found.
pub const NO_MODULE: &str = "NoModule";

const INGROUP_TAG: &str = "\\ingroup";
const MODULE_PREFIX: &str = "ITK";

/// Header file name → first path it was found at.
#[derive(Debug, Clone, Default)]
pub struct ModuleLocator {
    headers: HashMap<String, PathBuf>,
}

impl ModuleLocator {
    /// A locator that knows no headers and always answers [`NO_MODULE`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index every file under `root`. Directories are visited in sorted order
    /// so that duplicate header names resolve the same way on every run.
    pub fn scan(root: &Path) -> Self {
        let mut headers = HashMap::new();
        index_headers(root, &mut headers);
        tracing::info!(root = %root.display(), headers = headers.len(), "indexed ITK source tree");
        Self { headers }
    }

    /// Module for the header named `header` (for example `itkAbsImageFilter.h`).
    pub fn module_for(&self, header: &str) -> String {
        let Some(path) = self.headers.get(header) else {
            tracing::debug!(header, "header not found in ITK source tree");
            return NO_MODULE.to_string();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => ingroup_module(&content).unwrap_or_else(|| NO_MODULE.to_string()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read ITK header");
                NO_MODULE.to_string()
            }
        }
    }
}

fn index_headers(dir: &Path, acc: &mut HashMap<String, PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory during header scan");
            return;
        }
    };
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            index_headers(&path, acc);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            acc.entry(name.to_string()).or_insert(path);
        }
    }
}

/// Module named by the first `\ingroup ITK<Module>` line.
fn ingroup_module(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (_, rest) = line.split_once(INGROUP_TAG)?;
        let rest = rest.trim();
        rest.strip_prefix(MODULE_PREFIX)
            .map(|module| module.split_whitespace().next().unwrap_or_default().to_string())
    })
}
