//! Validate command - check a task issue body against the issue form

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, bail};

use codeuw::core::models::{IssueForm, TaskIssue};
use codeuw::output::{OutputMode, ValidationResult};

/// Validate a task issue body, failing if any field is invalid
pub fn validate(
    template: &Path,
    body: &Path,
    title: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let yaml = fs::read_to_string(template)
        .with_context(|| format!("failed to read issue form {}", template.display()))?;
    let form = IssueForm::from_yaml(&yaml)?;

    let text = if body == Path::new("-") {
        io::read_to_string(io::stdin()).context("failed to read body from stdin")?
    } else {
        fs::read_to_string(body).with_context(|| format!("failed to read {}", body.display()))?
    };

    let values = form.parse_submission(&text);
    let title = title.unwrap_or_else(|| form.title.trim());
    let result = ValidationResult::from_outcome(TaskIssue::from_submission(&form, title, &values));
    result.render(mode)?;

    if !result.valid {
        bail!("{} field(s) failed validation", result.errors.len());
    }
    Ok(())
}
