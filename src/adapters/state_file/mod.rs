//! File-based state storage
//!
//! Implements `StateStore` with a MessagePack file.

mod store;

pub use store::{MsgpackStateStore, StateError};
