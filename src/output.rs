//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::core::models::{FieldError, RepoCount, State, TaskIssue};
use crate::core::services::LoadReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Result of a load run
#[derive(Debug, Serialize)]
pub struct LoadResult<'a> {
    /// The loader's report
    #[serde(flatten)]
    pub report: &'a LoadReport,
}

impl<'a> LoadResult<'a> {
    /// Wrap a report for rendering
    #[must_use]
    pub const fn new(report: &'a LoadReport) -> Self {
        Self { report }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) -> serde_json::Result<()> {
        match mode {
            OutputMode::Human => {
                println!("{}", self.human());
                Ok(())
            },
            OutputMode::Json => print_json(self),
        }
    }

    /// Human-readable summary
    #[must_use]
    pub fn human(&self) -> String {
        let r = self.report;
        let mut lines = Vec::new();

        if r.dry_run {
            lines.push("Dry run: no issues created, state file not written.".to_string());
        }
        for c in &r.created {
            lines.push(format!("Created #{} for {}#{}: {}", c.hub, c.repo, c.source, c.url));
        }
        for p in &r.planned {
            lines.push(format!("Would create for {}#{}: {}", p.repo, p.source, p.title));
        }
        for a in &r.adopted {
            lines.push(format!("Adopted #{} for {}#{}", a.hub, a.repo, a.source));
        }
        for o in &r.orphaned {
            lines.push(format!("Dropped #{} for {}#{} (no longer exists)", o.hub, o.repo, o.source));
        }
        for m in &r.malformed {
            lines.push(format!("Warning: #{}: {}", m.hub, m.reason));
        }

        lines.push("Issues creation summary:".to_string());
        if r.summary.is_empty() {
            lines.push("  (no repositories configured)".to_string());
        }
        for RepoCount { repo, issues } in &r.summary {
            lines.push(format!("  {repo}: {issues} issues"));
        }
        lines.push(format!(
            "{} created, {} planned, {} adopted, {} dropped, {} already mirrored",
            r.created.len(),
            r.planned.len(),
            r.adopted.len(),
            r.orphaned.len(),
            r.skipped
        ));

        lines.join("\n")
    }
}

/// Result of a status query
#[derive(Debug, Serialize)]
pub struct StatusResult {
    /// Path of the state file
    pub path: String,
    /// Whether the state file exists
    pub exists: bool,
    /// Snapshot format version
    pub version: String,
    /// Creation time (RFC 3339)
    pub created: String,
    /// Last modification time (RFC 3339)
    pub last_modified: String,
    /// Total mirrored issues
    pub total: usize,
    /// Mirrored issues per source repository
    pub repos: Vec<RepoCount>,
}

fn rfc3339(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0).map_or_else(|| secs.to_string(), |t| t.to_rfc3339())
}

impl StatusResult {
    /// Build from a snapshot
    #[must_use]
    pub fn from_state(path: &str, exists: bool, state: &State) -> Self {
        Self {
            path: path.to_string(),
            exists,
            version: state.version.clone(),
            created: rfc3339(state.created_time),
            last_modified: rfc3339(state.last_modified),
            total: state.total(),
            repos: state.summary(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) -> serde_json::Result<()> {
        match mode {
            OutputMode::Human => {
                self.render_human();
                Ok(())
            },
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if !self.exists {
            println!("No state file at {} (nothing loaded yet).", self.path);
            return;
        }

        println!("State file: {} (version {})", self.path, self.version);
        println!("Created:       {}", self.created);
        println!("Last modified: {}", self.last_modified);
        println!("\n{} mirrored issue(s)", self.total);
        for r in &self.repos {
            println!("  {}: {} issues", r.repo, r.issues);
        }
    }
}

/// Result of validating a task issue body
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    /// Whether the body is a valid task submission
    pub valid: bool,
    /// The parsed task, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskIssue>,
    /// Field problems, when invalid
    pub errors: Vec<FieldProblem>,
}

/// A field problem in serializable form
#[derive(Debug, Serialize)]
pub struct FieldProblem {
    /// Field id
    pub field: String,
    /// What is wrong
    pub message: String,
}

impl From<&FieldError> for FieldProblem {
    fn from(err: &FieldError) -> Self {
        Self {
            field: err.id().to_string(),
            message: err.to_string(),
        }
    }
}

impl ValidationResult {
    /// Build from the outcome of [`TaskIssue::from_submission`]
    #[must_use]
    pub fn from_outcome(outcome: Result<TaskIssue, Vec<FieldError>>) -> Self {
        match outcome {
            Ok(task) => Self {
                valid: true,
                task: Some(task),
                errors: Vec::new(),
            },
            Err(errors) => Self {
                valid: false,
                task: None,
                errors: errors.iter().map(FieldProblem::from).collect(),
            },
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) -> serde_json::Result<()> {
        match mode {
            OutputMode::Human => {
                self.render_human();
                Ok(())
            },
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if let Some(task) = &self.task {
            println!("Valid task: {}", task.title);
            println!("  Level:     {}", task.level);
            println!("  Languages: {}", task.languages.join(", "));
            println!("  Repo:      {}", task.repo_url);
            return;
        }

        println!("Invalid task submission:");
        for e in &self.errors {
            println!("  - {}", e.message);
        }
    }
}
