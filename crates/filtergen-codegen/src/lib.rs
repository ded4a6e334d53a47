//! # filtergen-codegen — Code Assembly
//!
//! Turns a type-checked [`FilterDocument`] into rendered file contents.
//!
//! ## Flow
//!
//! ```text
//! FilterDocument ──▶ check_document ──▶ assemble_tokens ──▶ render_text (× 4 templates)
//!                    (TypeMapper)       (fragments, tests)
//! ```
//!
//! ## Modules
//!
//! - [`typemap`]: static `(type, arity)` tables and vector accessor paths.
//! - [`typecheck`]: member, measurement and test-setting type checks.
//! - [`fragments`]: per-member and per-filter C++ snippets.
//! - [`testcase`]: generated unit-test functions and their registration.
//! - [`tokens`]: the token map for one document.
//! - [`template`]: single-pass `${token}` substitution.
//!
//! Nothing in this crate performs I/O. The same document and tables always
//! produce byte-identical output.

pub mod error;
pub mod fragments;
pub mod model;
pub mod template;
pub mod testcase;
pub mod tokens;
pub mod typecheck;
pub mod typemap;

pub use error::CodegenError;
pub use model::{FilterDocument, TestCase};
pub use template::{render, render_line, render_text};
pub use tokens::{assemble_tokens, TokenMap, TOKEN_NAMES};
pub use typecheck::check_document;
pub use typemap::{Arity, TypeMapper};
