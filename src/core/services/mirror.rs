//! Mirror rendering
//!
//! Turns a labelled source issue into the hub issue that advertises it,
//! laid out like a task form submission so maintainers can finish filling
//! it in.

use crate::core::models::{IssueForm, NO_RESPONSE_EMPHASIS, NewIssue, SourceIssue, Submission};

/// Body text used when the source issue has no description
pub const NO_DESCRIPTION: &str = "*No description provided.*";

/// Field values pre-filled from a source issue
///
/// Fields the source cannot provide ask the issue author to fill them in.
#[must_use]
pub fn mirror_values(repo_url: &str, issue: &SourceIssue) -> Submission {
    let author = &issue.author;
    let description = issue
        .body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION);

    [
        ("contact", format!("@{author}")),
        ("description", description.to_string()),
        ("repo", repo_url.to_string()),
        ("issue", issue.html_url.clone()),
        ("level", format!("*@{author}: Please provide the level of the task here.*")),
        (
            "language",
            format!("*@{author}: Please provide the programming language of the task here.*"),
        ),
        ("dependencies", NO_RESPONSE_EMPHASIS.to_string()),
    ]
    .into_iter()
    .map(|(id, value)| (id.to_string(), value))
    .collect()
}

/// Hub issue mirroring a source issue
#[must_use]
pub fn mirror_issue(
    form: &IssueForm,
    project_name: &str,
    repo_url: &str,
    issue: &SourceIssue,
) -> NewIssue {
    NewIssue {
        title: form.render_title(project_name, &issue.title),
        body: form.render_body(&mirror_values(repo_url, issue)),
        labels: form.labels.clone(),
    }
}
