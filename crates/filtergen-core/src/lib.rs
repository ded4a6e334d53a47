//! # filtergen-core — Foundational Types for filtergen
//!
//! Every other crate in the workspace depends on `filtergen-core`; it depends
//! on nothing internal.
//!
//! ## Key Types
//!
//! 1. **[`Description`]** — the normalized view of one descriptor document
//!    (or one item of a nested list) produced by the extractor. Keys are
//!    canonical field names only; values are raw JSON so that loosely typed
//!    documents survive extraction untouched.
//!
//! 2. **[`ValueKind`]** — the declared kind of a field. It decides the zero
//!    value inserted for absent optional fields and nothing else.
//!
//! 3. **Naming rules** ([`naming`]) — how a descriptor name becomes the
//!    generated filter name, its documentation variants and its test names.
//!
//! 4. **[`GENERATED_FILE_MARKER`]** — the sentinel first line that separates
//!    machine-written files from hand-edited ones.
//!
//! 5. **[`ErrorCategory`]** — the five ways a document can be abandoned.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `filtergen-*` crates (this is the leaf of the DAG).
//! - No I/O.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod description;
pub mod error;
pub mod marker;
pub mod naming;

pub use description::{render_scalar, Description, ValueKind};
pub use error::ErrorCategory;
pub use marker::{ensure_marker, is_generated, GENERATED_FILE_MARKER};
