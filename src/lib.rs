//! codeuw - Mirrors program-labelled GitHub issues into a task hub
//!
//! This library provides the loader that keeps the hub repository's task
//! issues in step with labelled issues in participating repositories, the
//! task issue form model, and the state snapshot that makes scheduled runs
//! idempotent.

// Deny all clippy warnings in this crate
#![deny(clippy::all, clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, unused_import_braces)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata,
    clippy::format_push_string
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
