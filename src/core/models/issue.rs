//! Tracker issue models
//!
//! Tracker-agnostic views of issues as read from and written to the
//! issue tracker.

use serde::{Deserialize, Serialize};

/// Login used when an issue's author account no longer exists
pub const GHOST_LOGIN: &str = "ghost";

/// An issue as read from the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIssue {
    /// Issue number within its repository
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body (absent when the author left it empty)
    pub body: Option<String>,
    /// URL of the issue in the web UI
    pub html_url: String,
    /// Login of the issue author
    pub author: String,
    /// Names of the labels applied to the issue
    pub labels: Vec<String>,
    /// Whether this item is a pull request rather than an issue
    pub is_pull_request: bool,
}

impl SourceIssue {
    /// Whether the issue carries a label (case-insensitive, like the tracker)
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}

/// An issue to be created in the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Markdown body
    pub body: String,
    /// Labels to apply
    pub labels: Vec<String>,
}

/// Result of creating an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Number assigned by the tracker
    pub number: u64,
    /// URL of the new issue
    pub html_url: String,
}
