//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `github/` - GitHub REST API issue tracker
//! - `state_file/` - MessagePack state snapshot file

pub mod github;
pub mod state_file;
