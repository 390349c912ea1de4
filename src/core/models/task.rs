//! Task issue model
//!
//! A task is one unit of contributable work offered to students, as filed
//! through the task issue form.

use serde::{Deserialize, Serialize};

use super::form::{FieldError, IssueForm, Submission};
use super::level::Level;

/// A validated task issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIssue {
    /// Issue title
    pub title: String,
    /// Who to contact about the task
    pub contact: String,
    /// What the task is about
    pub description: String,
    /// Repository the work happens in
    pub repo_url: String,
    /// Related issue, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    /// Task level
    pub level: Level,
    /// Primary languages
    pub languages: Vec<String>,
    /// Notes on prerequisites or dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,
}

impl TaskIssue {
    /// Build a task from a form submission
    ///
    /// The submission is validated against `form` first; all field problems
    /// are returned together.
    pub fn from_submission(
        form: &IssueForm,
        title: &str,
        values: &Submission,
    ) -> Result<Self, Vec<FieldError>> {
        let mut errors = form.validate(values);

        let get = |id: &str| values.get(id).map(|v| v.trim().to_string()).unwrap_or_default();
        let optional = |id: &str| Some(get(id)).filter(|v| !v.is_empty());

        let level = match get("level").parse::<Level>() {
            Ok(level) => Some(level),
            Err(_) => {
                // Forms without a dropdown still need a usable level
                if !errors.iter().any(|e| e.id() == "level") {
                    errors.push(FieldError::InvalidOption {
                        id: "level".to_string(),
                        label: form
                            .field("level")
                            .map_or("Level", |f| f.heading())
                            .to_string(),
                        value: get("level"),
                    });
                }
                None
            },
        };

        match level {
            Some(level) if errors.is_empty() => Ok(Self {
                title: title.trim().to_string(),
                contact: get("contact"),
                description: get("description"),
                repo_url: get("repo"),
                issue_url: optional("issue"),
                level,
                languages: get("language")
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect(),
                dependencies: optional("dependencies"),
            }),
            _ => Err(errors),
        }
    }
}
