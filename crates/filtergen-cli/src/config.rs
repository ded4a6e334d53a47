//! # Generator Configuration
//!
//! Optional YAML file selecting where generated files go and where templates
//! are read from. Every path is relative to the root directory given on the
//! command line unless it is absolute.
//!
//! ```yaml
//! layout:
//!   filters_dir: ITKImageProcessingFilters
//!   test_dir: Test
//!   documentation_dir: Documentation/ITKImageProcessingFilters
//!   template_dir: Utilities/SimpleITKJSONDream3DFilterCreationTemplates
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub layout: Layout,
}

/// Output and template directories, as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub filters_dir: PathBuf,
    pub test_dir: PathBuf,
    pub documentation_dir: PathBuf,
    pub template_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            filters_dir: PathBuf::from("ITKImageProcessingFilters"),
            test_dir: PathBuf::from("Test"),
            documentation_dir: PathBuf::from("Documentation/ITKImageProcessingFilters"),
            template_dir: PathBuf::from("Utilities/SimpleITKJSONDream3DFilterCreationTemplates"),
        }
    }
}

impl Layout {
    /// Anchor every relative directory at `root`.
    pub fn resolve(&self, root: &Path) -> OutputLayout {
        OutputLayout {
            filters_dir: root.join(&self.filters_dir),
            test_dir: root.join(&self.test_dir),
            documentation_dir: root.join(&self.documentation_dir),
            template_dir: root.join(&self.template_dir),
        }
    }
}

/// Directories after resolution against the root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub filters_dir: PathBuf,
    pub test_dir: PathBuf,
    pub documentation_dir: PathBuf,
    pub template_dir: PathBuf,
}

/// The four files generated for one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
    pub test: PathBuf,
    pub documentation: PathBuf,
}

impl OutputPaths {
    /// Files subject to the overwrite policy. Documentation is always rewritten.
    pub fn guarded(&self) -> [&Path; 3] {
        [&self.header, &self.source, &self.test]
    }
}

/// The four templates one filter is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub header: PathBuf,
    pub source: PathBuf,
    pub test: PathBuf,
    pub documentation: PathBuf,
}

impl OutputLayout {
    pub fn output_paths(&self, filter_name: &str) -> OutputPaths {
        OutputPaths {
            header: self.filters_dir.join(format!("{filter_name}.h")),
            source: self.filters_dir.join(format!("{filter_name}.cpp")),
            test: self.test_dir.join(format!("{filter_name}Test.cpp")),
            documentation: self.documentation_dir.join(format!("{filter_name}.md")),
        }
    }

    pub fn template_paths(&self, template_code_filename: &str) -> TemplatePaths {
        let base = |suffix: &str| {
            self.template_dir
                .join(format!("{template_code_filename}Template{suffix}"))
        };
        TemplatePaths {
            header: base(".h"),
            source: base(".cpp"),
            test: base("Test.cpp"),
            documentation: self.template_dir.join("Template.md"),
        }
    }
}

/// Load the configuration at `path`, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }
    let config: GeneratorConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), ?config, "loaded configuration");
    Ok(config)
}
