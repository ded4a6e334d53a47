//! # filtergen-schema — Descriptor Field Schemas
//!
//! Validates raw descriptor documents and normalizes them into
//! [`filtergen_core::Description`]s.
//!
//! ## Pipeline Position
//!
//! ```text
//! raw JSON ──▶ extract ──▶ check_limits ──▶ filter_fields ──▶ codegen
//! ```
//!
//! - [`field`]: `FieldSpec`, `FieldSchema` and the alias-uniqueness check.
//! - [`catalog`]: the five standard schemas and template default members.
//! - [`extract`]: the generic Extractor.
//! - [`limits`]: the Limitation Checker.
//! - [`filter`]: the List Filter.
//!
//! All functions here are pure. Diagnostics go through `tracing` at debug
//! level.

pub mod catalog;
pub mod error;
pub mod extract;
pub mod field;
pub mod filter;
pub mod limits;

pub use catalog::{default_members, SchemaCatalog};
pub use error::{ExtractError, LimitViolation, SchemaDefinitionError};
pub use extract::{extract, extract_list, ExtractOptions};
pub use field::{FieldSchema, FieldSpec, Limitation, Section};
pub use filter::{filter_fields, filter_fields_nested};
pub use limits::{check_limits, check_limits_nested};
