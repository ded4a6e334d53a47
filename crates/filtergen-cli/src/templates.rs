//! Template loading.

use std::path::{Path, PathBuf};

use crate::config::TemplatePaths;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {path}")]
    Missing { path: PathBuf },

    #[error("reading template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Contents of the four templates for one generator variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub header: String,
    pub source: String,
    pub test: String,
    pub documentation: String,
}

impl TemplateSet {
    /// Read all four templates. Fails on the first one missing.
    pub fn load(paths: &TemplatePaths) -> Result<Self, TemplateError> {
        Ok(Self {
            header: read_template(&paths.header)?,
            source: read_template(&paths.source)?,
            test: read_template(&paths.test)?,
            documentation: read_template(&paths.documentation)?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    if !path.is_file() {
        return Err(TemplateError::Missing {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}
