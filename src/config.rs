//! Loader configuration
//!
//! Read from `.codeuw-config.yml` at the repository root. Every key has a
//! default, so a config file only needs to list the participating
//! repositories:
//!
//! ```yaml
//! owner: uw-ssec
//! repo: codeuw
//! repos:
//!   - org: some-org
//!     repo: some-repo
//!     name: Some Project
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{RepoSlug, SourceRepo};
use crate::paths;

/// Errors loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid YAML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A repository entry is unusable
    #[error("invalid repository in config: {0}")]
    InvalidRepo(String),
}

/// Loader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Owner of the hub repository
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Name of the hub repository
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Label marking source issues for the program
    #[serde(default = "default_label")]
    pub label: String,
    /// Path of the task issue form inside the hub repository
    #[serde(default = "default_template_path")]
    pub template_path: String,
    /// Participating repositories
    #[serde(default)]
    pub repos: Vec<RepoEntry>,
}

/// A participating repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Owning organization or user
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Project name shown in mirrored issue titles (defaults to `repo`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_owner() -> String {
    "uw-ssec".to_string()
}

fn default_repo() -> String {
    "codeuw".to_string()
}

fn default_label() -> String {
    "codeuw".to_string()
}

fn default_template_path() -> String {
    paths::DEFAULT_TEMPLATE_PATH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            label: default_label(),
            template_path: default_template_path(),
            repos: Vec::new(),
        }
    }
}

impl Config {
    /// Load and validate the config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate config from YAML text
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.hub()?;
        config.sources()?;
        Ok(config)
    }

    /// The hub repository
    pub fn hub(&self) -> Result<RepoSlug, ConfigError> {
        RepoSlug::new(&self.owner, &self.repo).map_err(|e| ConfigError::InvalidRepo(e.to_string()))
    }

    /// The participating repositories, in config order, without duplicates
    pub fn sources(&self) -> Result<Vec<SourceRepo>, ConfigError> {
        let mut sources: Vec<SourceRepo> = Vec::with_capacity(self.repos.len());
        for entry in &self.repos {
            let slug = RepoSlug::new(&entry.org, &entry.repo)
                .map_err(|e| ConfigError::InvalidRepo(e.to_string()))?;
            if sources
                .iter()
                .any(|s| s.slug.full_name().eq_ignore_ascii_case(&slug.full_name()))
            {
                return Err(ConfigError::InvalidRepo(format!("{slug} is listed twice")));
            }
            let project_name = entry
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(&slug.name)
                .to_string();
            sources.push(SourceRepo { slug, project_name });
        }
        Ok(sources)
    }
}
