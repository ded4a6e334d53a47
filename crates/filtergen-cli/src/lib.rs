//! # filtergen-cli — Filter Generator Command Line
//!
//! Batch front end that turns a directory of ITK filter descriptor documents
//! into DREAM3D filter plugins.
//!
//! ## Subcommands
//!
//! - `filtergen generate` — render headers, sources, unit tests and
//!   documentation for every descriptor under a plugin root.
//! - `filtergen validate` — check every descriptor through type checking and
//!   report failures without writing.
//!
//! ## Modules
//!
//! - [`pipeline`]: per-document stage machine and batch loop.
//! - [`overwrite`]: existing-file policy.
//! - [`config`]: YAML output layout.
//! - [`discover`], [`module`], [`templates`]: filesystem inputs.

pub mod config;
pub mod discover;
pub mod generate;
pub mod module;
pub mod overwrite;
pub mod pipeline;
pub mod templates;
pub mod validate;
