//! GitHub REST API request and response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They stay
//! inside the adapter; the loader only sees the domain types they convert to.

use serde::{Deserialize, Serialize};

use crate::core::models::{CreatedIssue, GHOST_LOGIN, NewIssue, SourceIssue};

/// An issue returned by the GitHub API.
///
/// Issues and pull requests share the same endpoint. Pull requests carry a
/// non-null `pull_request` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Sequential number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body (absent or null when empty).
    #[serde(default)]
    pub body: Option<String>,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
    /// Author; null for deleted accounts.
    #[serde(default)]
    pub user: Option<GitHubUser>,
    /// Labels applied to the issue.
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// Present when this item is a pull request.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
}

/// An issue author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    /// Account login.
    pub login: String,
}

/// A label applied to an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    /// Label name.
    pub name: String,
}

/// Reference object present on pull requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    #[serde(default)]
    pub url: Option<String>,
}

/// A repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepository {
    /// URL to view the repository in the GitHub UI.
    pub html_url: String,
}

/// Request body for creating an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub body: String,
    /// Labels to apply.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Response from the create-issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueResponse {
    /// Issue number within the repository.
    pub number: u64,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
}

impl From<GitHubIssue> for SourceIssue {
    fn from(issue: GitHubIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body,
            html_url: issue.html_url,
            author: issue
                .user
                .map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}

impl From<&NewIssue> for GitHubCreateIssueRequest {
    fn from(issue: &NewIssue) -> Self {
        Self {
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
        }
    }
}

impl From<GitHubCreateIssueResponse> for CreatedIssue {
    fn from(resp: GitHubCreateIssueResponse) -> Self {
        Self {
            number: resp.number,
            html_url: resp.html_url,
        }
    }
}
