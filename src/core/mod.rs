//! Core domain logic for codeuw
//!
//! This module contains the business logic with no direct I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`IssueForm`, `TaskIssue`, `State`, `Level`)
//! - `services/` - Loader orchestration and mirror rendering
//! - `ports/` - Trait definitions for the issue tracker and state store

pub mod models;
pub mod ports;
pub mod services;
