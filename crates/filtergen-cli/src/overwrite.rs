//! # Overwrite Policy
//!
//! Decides whether a document may write over the files a previous run left
//! behind. Only the header, source and test files are inspected.
//!
//! | Existing files | `--overwrite` off | `--overwrite` on |
//! |---|---|---|
//! | none | write | write |
//! | all generated | skip | write |
//! | any hand-authored | skip | skip |
//! | generated and absent mixed | skip | skip |

use std::path::{Path, PathBuf};

use filtergen_core::{is_generated, ErrorCategory};

/// What is on disk at one output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// No file, or an empty one.
    Absent,
    /// Starts with the generated-file marker.
    Generated,
    /// Anything else, including files that cannot be read.
    HandAuthored,
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Absent => "absent",
            Self::Generated => "generated",
            Self::HandAuthored => "hand-authored",
        })
    }
}

/// Outcome of a passed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Nothing exists yet.
    Fresh,
    /// Previously generated files will be replaced.
    Replace,
}

#[derive(Debug, thiserror::Error)]
pub enum OverwriteError {
    #[error("{path} was not generated by this tool and will not be overwritten")]
    HandAuthored { path: PathBuf },

    #[error("output files disagree: {path} is {state} while {other_path} is {other_state}")]
    Inconsistent {
        path: PathBuf,
        state: FileState,
        other_path: PathBuf,
        other_state: FileState,
    },

    #[error("{path} already exists; pass --overwrite to regenerate it")]
    ExistsWithoutOverwrite { path: PathBuf },
}

impl OverwriteError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::OverwritePolicy
    }
}

/// Inspect one path.
pub fn inspect(path: &Path) -> FileState {
    let Ok(metadata) = std::fs::metadata(path) else {
        return FileState::Absent;
    };
    if !metadata.is_file() {
        return FileState::HandAuthored;
    }
    if metadata.len() == 0 {
        return FileState::Absent;
    }
    match std::fs::read(path) {
        Ok(bytes) if is_generated(&String::from_utf8_lossy(&bytes)) => FileState::Generated,
        Ok(_) => FileState::HandAuthored,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read existing output file");
            FileState::HandAuthored
        }
    }
}

/// Apply the policy to the guarded outputs of one document.
pub fn check_existing(paths: &[&Path], overwrite: bool) -> Result<OverwriteDecision, OverwriteError> {
    let states: Vec<(&Path, FileState)> = paths.iter().map(|p| (*p, inspect(p))).collect();

    if let Some((path, _)) = states.iter().find(|(_, s)| *s == FileState::HandAuthored) {
        return Err(OverwriteError::HandAuthored {
            path: path.to_path_buf(),
        });
    }
    let Some(&(first_path, first_state)) = states.first() else {
        return Ok(OverwriteDecision::Fresh);
    };
    if let Some(&(other_path, other_state)) = states.iter().find(|(_, s)| *s != first_state) {
        return Err(OverwriteError::Inconsistent {
            path: first_path.to_path_buf(),
            state: first_state,
            other_path: other_path.to_path_buf(),
            other_state,
        });
    }
    match first_state {
        FileState::Absent => Ok(OverwriteDecision::Fresh),
        FileState::Generated if overwrite => Ok(OverwriteDecision::Replace),
        _ => Err(OverwriteError::ExistsWithoutOverwrite {
            path: first_path.to_path_buf(),
        }),
    }
}
