//! State store port
//!
//! Defines the interface for loading and persisting the state snapshot.

use super::super::models::State;

/// Persistence for the state snapshot
pub trait StateStore: Send + Sync {
    /// Load the snapshot, or a fresh one if none has been saved yet
    fn load(&self) -> anyhow::Result<State>;

    /// Replace the persisted snapshot
    fn save(&self, state: &State) -> anyhow::Result<()>;
}
