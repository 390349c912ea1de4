//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (the issue tracker, the state file).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations, so the loader can be exercised against in-memory
//! trackers and stores.

mod state_store;
mod tracker;

pub use state_store::StateStore;
pub use tracker::IssueTracker;
