//! Repository references
//!
//! A [`RepoSlug`] names a repository as `owner/name`. Source repositories
//! additionally carry the project name used in mirrored issue titles.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)(?:/|$)")
        .expect("repository URL pattern compiles")
});

static ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/issues/(\d+)/?(?:[?#].*)?$")
        .expect("issue URL pattern compiles")
});

/// Errors produced when parsing repository references
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// Not of the form `owner/name`
    #[error("invalid repository '{0}': expected owner/name")]
    Invalid(String),
    /// URL does not point at a repository or issue
    #[error("not a repository URL: {0}")]
    NotAUrl(String),
}

/// A repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    /// Owning user or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Build a slug from its parts, rejecting empty parts and embedded slashes
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, SlugError> {
        let owner = owner.into();
        let name = name.into();
        let valid = |part: &str| !part.trim().is_empty() && !part.contains('/');
        if !valid(&owner) || !valid(&name) {
            return Err(SlugError::Invalid(format!("{owner}/{name}")));
        }
        Ok(Self {
            owner: owner.trim().to_string(),
            name: name.trim().to_string(),
        })
    }

    /// Full name as used by the API and as the state key (`owner/name`)
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse the repository out of a repository or issue URL
    pub fn from_url(url: &str) -> Result<Self, SlugError> {
        let caps = REPO_URL
            .captures(url.trim())
            .ok_or_else(|| SlugError::NotAUrl(url.to_string()))?;
        Self::new(&caps[1], &caps[2])
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(SlugError::Invalid(s.to_string())),
        }
    }
}

/// Split an issue URL into its repository and issue number
///
/// Returns `None` for anything that is not `https://<host>/<owner>/<name>/issues/<n>`.
#[must_use]
pub fn parse_issue_url(url: &str) -> Option<(RepoSlug, u64)> {
    let caps = ISSUE_URL.captures(url.trim())?;
    let slug = RepoSlug::new(&caps[1], &caps[2]).ok()?;
    let number = caps[3].parse().ok()?;
    Some((slug, number))
}

/// Whether a string looks like an http(s) URL with a host
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    // The parser would percent-encode inner spaces; a typed URL has none
    if value.contains(char::is_whitespace) {
        return false;
    }
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// A participating repository whose labelled issues are mirrored into the hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRepo {
    /// Repository to read issues from
    pub slug: RepoSlug,
    /// Project name used in mirrored issue titles
    pub project_name: String,
}
