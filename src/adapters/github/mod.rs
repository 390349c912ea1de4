//! GitHub issue tracker
//!
//! Implements the `IssueTracker` port over the GitHub REST API.
//!
//! - [`client`] - HTTP client and port implementation
//! - [`models`] - API request/response payloads
//! - [`error`] - API error classification

pub mod client;
pub mod error;
pub mod models;

pub use client::{API_URL_ENV, GITHUB_API_BASE, GitHubClient, TOKEN_ENV};
pub use error::TrackerError;
