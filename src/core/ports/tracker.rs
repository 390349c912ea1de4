//! Issue tracker port
//!
//! Defines the interface for reading and creating issues.

use async_trait::async_trait;

use super::super::models::{CreatedIssue, NewIssue, RepoSlug, SourceIssue};

/// Issue tracker abstraction
///
/// Implementations talk to a hosted tracker (GitHub) or keep issues in
/// memory for tests. Every method is a single logical request; pagination
/// is handled inside the implementation.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Web URL of a repository (also confirms the repository exists)
    async fn repository_url(&self, repo: &RepoSlug) -> anyhow::Result<String>;

    /// Text content of a file on the repository's default branch
    async fn file_contents(&self, repo: &RepoSlug, path: &str) -> anyhow::Result<String>;

    /// Open issues carrying `label`, pull requests excluded
    async fn labelled_issues(&self, repo: &RepoSlug, label: &str)
    -> anyhow::Result<Vec<SourceIssue>>;

    /// Every issue in the repository, open and closed, pull requests excluded
    async fn all_issues(&self, repo: &RepoSlug) -> anyhow::Result<Vec<SourceIssue>>;

    /// Create an issue
    async fn create_issue(&self, repo: &RepoSlug, issue: &NewIssue)
    -> anyhow::Result<CreatedIssue>;
}
