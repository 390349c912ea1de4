//! GitHub adapter errors

use thiserror::Error;

/// Errors talking to the GitHub API
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No credential in the environment
    #[error("GITHUB_TOKEN environment variable is not set")]
    MissingToken,

    /// The credential was rejected or lacks permission
    #[error("GitHub rejected the request ({status}): {body}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The API rate limit is exhausted
    #[error("GitHub rate limit exceeded, resets at {reset}")]
    RateLimited {
        /// When the limit resets (RFC 3339, or "unknown")
        reset: String,
    },

    /// The repository, file or issue does not exist (or is not visible)
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other unsuccessful status
    #[error("GitHub returned {status} for {url}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Response body
        body: String,
    },

    /// Connection, TLS or timeout failure
    #[error("request to GitHub failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response did not have the expected shape
    #[error("unexpected response from {url}: {message}")]
    Decode {
        /// Requested URL
        url: String,
        /// Parser message
        message: String,
    },

    /// The configured API base URL is unusable
    #[error("invalid GitHub API URL '{0}'")]
    InvalidUrl(String),
}

impl TrackerError {
    /// Whether the error is an authentication or permission failure
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Unauthorized { .. })
    }
}
