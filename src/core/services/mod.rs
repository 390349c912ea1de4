//! Business logic services
//!
//! - [`loader`] - Mirror labelled source issues into the hub and keep the
//!   state snapshot in step
//! - [`mirror`] - Render the hub issue for a source issue

pub mod loader;
pub mod mirror;

pub use loader::{
    CreatedMirror, LoadOptions, LoadReport, Loader, Malformed, MirrorRef, PlannedMirror,
};
pub use mirror::{NO_DESCRIPTION, mirror_issue, mirror_values};
