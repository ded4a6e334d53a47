//! # Error Taxonomy
//!
//! Every reason a descriptor document is abandoned falls into one of five
//! categories. Each crate keeps its own structured error type; the category
//! is how the orchestrator groups them in its end-of-run report.
//!
//! All five resolve at the granularity of one document: the document is
//! skipped and the batch continues.

use serde::Serialize;

/// Category of a per-document failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing required field, unrecognized field, or a document that is not
    /// an object.
    SchemaViolation,
    /// A value outside its declared numeric or length bounds.
    LimitationViolation,
    /// No known conversion for a `(type, arity)` pair, or a vector member
    /// without a usable accessor type.
    TypeMappingMiss,
    /// Existing output files are hand-authored, inconsistent, or generated
    /// without the overwrite flag.
    OverwritePolicy,
    /// Tests, settings and measurement results do not pair up.
    CountMismatch,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SchemaViolation => "schema violation",
            Self::LimitationViolation => "limitation violation",
            Self::TypeMappingMiss => "type-mapping miss",
            Self::OverwritePolicy => "overwrite-policy violation",
            Self::CountMismatch => "count mismatch",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
