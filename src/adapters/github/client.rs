//! GitHub HTTP client.
//!
//! Wraps the GitHub REST API v3 with typed methods for the handful of
//! operations the loader needs, and implements the [`IssueTracker`] port on
//! top of them. Requests are sent one at a time; failures are returned to
//! the caller without retrying.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::core::models::{CreatedIssue, NewIssue, RepoSlug, SourceIssue};
use crate::core::ports::IssueTracker;

use super::error::TrackerError;
use super::models::{
    GitHubCreateIssueRequest, GitHubCreateIssueResponse, GitHubIssue, GitHubRepository,
};

/// Base URL for the public GitHub REST API v3.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the API credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API base URL (GitHub Enterprise).
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Page size for list endpoints (the API maximum).
const PER_PAGE: usize = 100;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Media type asking the contents API for the file itself.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    /// Create a client for the given token and API base URL.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, TrackerError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| TrackerError::InvalidUrl(base_url.clone()))?;

        let http = Client::builder()
            .user_agent(concat!("codeuw/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            token: token.into(),
            base_url,
        })
    }

    /// Create a client from `GITHUB_TOKEN` and, if set, `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self, TrackerError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(TrackerError::MissingToken)?;
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| GITHUB_API_BASE.to_string());
        Self::new(token, base_url)
    }

    /// API base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, TrackerError> {
        let raw = format!("{}{path}", self.base_url);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        parsed.map_err(|_| TrackerError::InvalidUrl(raw))
    }

    fn request(&self, method: Method, url: Url, accept: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Send a request and turn unsuccessful statuses into errors.
    async fn send(&self, req: RequestBuilder, url: &Url) -> Result<Response, TrackerError> {
        debug!("GitHub request: {url}");
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN
                && resp
                    .headers()
                    .get("x-ratelimit-remaining")
                    .is_some_and(|v| v.as_bytes() == b"0"));
        if rate_limited {
            let reset = resp
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok())
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map_or_else(|| "unknown".to_string(), |t| t.to_rfc3339());
            return Err(TrackerError::RateLimited { reset });
        }

        let body = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TrackerError::Unauthorized {
                status: status.as_u16(),
                body,
            },
            StatusCode::NOT_FOUND => TrackerError::NotFound(url.to_string()),
            _ => TrackerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(resp: Response, url: &Url) -> Result<T, TrackerError> {
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| TrackerError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch repository metadata.
    pub async fn get_repository(&self, repo: &RepoSlug) -> Result<GitHubRepository, TrackerError> {
        let url = self.url(&format!("/repos/{}/{}", repo.owner, repo.name), &[])?;
        let req = self.request(Method::GET, url.clone(), JSON_MEDIA_TYPE);
        let resp = self.send(req, &url).await?;
        Self::decode(resp, &url).await
    }

    /// Fetch the raw content of a file on the default branch.
    pub async fn get_file(&self, repo: &RepoSlug, path: &str) -> Result<String, TrackerError> {
        let path = path.trim_start_matches('/');
        let url = self.url(&format!("/repos/{}/{}/contents/{path}", repo.owner, repo.name), &[])?;
        let req = self.request(Method::GET, url.clone(), RAW_MEDIA_TYPE);
        let resp = self.send(req, &url).await?;
        Ok(resp.text().await?)
    }

    /// List issues, following pagination until the last page.
    ///
    /// `state` is `"open"`, `"closed"` or `"all"`. The endpoint also returns
    /// pull requests; callers filter them out.
    pub async fn list_issues(
        &self,
        repo: &RepoSlug,
        state: &str,
        label: Option<&str>,
    ) -> Result<Vec<GitHubIssue>, TrackerError> {
        let path = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let mut issues = Vec::new();

        for page in 1.. {
            let mut query = vec![
                ("state", state.to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(label) = label {
                query.push(("labels", label.to_string()));
            }

            let url = self.url(&path, &query)?;
            let req = self.request(Method::GET, url.clone(), JSON_MEDIA_TYPE);
            let resp = self.send(req, &url).await?;
            let batch: Vec<GitHubIssue> = Self::decode(resp, &url).await?;
            let last = batch.len() < PER_PAGE;
            issues.extend(batch);
            if last {
                break;
            }
        }

        debug!("Listed {} issues from {repo}", issues.len());
        Ok(issues)
    }

    /// Create an issue.
    pub async fn post_issue(
        &self,
        repo: &RepoSlug,
        body: &GitHubCreateIssueRequest,
    ) -> Result<GitHubCreateIssueResponse, TrackerError> {
        let url = self.url(&format!("/repos/{}/{}/issues", repo.owner, repo.name), &[])?;
        let req = self.request(Method::POST, url.clone(), JSON_MEDIA_TYPE).json(body);
        let resp = self.send(req, &url).await?;
        Self::decode(resp, &url).await
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn repository_url(&self, repo: &RepoSlug) -> anyhow::Result<String> {
        Ok(self.get_repository(repo).await?.html_url)
    }

    async fn file_contents(&self, repo: &RepoSlug, path: &str) -> anyhow::Result<String> {
        Ok(self.get_file(repo, path).await?)
    }

    async fn labelled_issues(
        &self,
        repo: &RepoSlug,
        label: &str,
    ) -> anyhow::Result<Vec<SourceIssue>> {
        let issues = self.list_issues(repo, "open", Some(label)).await?;
        Ok(issues
            .into_iter()
            .map(SourceIssue::from)
            .filter(|i| !i.is_pull_request)
            .collect())
    }

    async fn all_issues(&self, repo: &RepoSlug) -> anyhow::Result<Vec<SourceIssue>> {
        let issues = self.list_issues(repo, "all", None).await?;
        Ok(issues
            .into_iter()
            .map(SourceIssue::from)
            .filter(|i| !i.is_pull_request)
            .collect())
    }

    async fn create_issue(&self, repo: &RepoSlug, issue: &NewIssue) -> anyhow::Result<CreatedIssue> {
        let created = self.post_issue(repo, &GitHubCreateIssueRequest::from(issue)).await?;
        Ok(created.into())
    }
}
