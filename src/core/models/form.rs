//! Issue form schema
//!
//! Models the GitHub issue-form YAML used to file task issues, renders
//! mirrored issue bodies in the same `### Label` layout GitHub produces for
//! form submissions, and parses and validates such bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::repo::is_http_url;

/// Placeholder GitHub writes for optional fields left empty
pub const NO_RESPONSE: &str = "_No response_";

/// Placeholder the loader writes for fields it cannot fill in
pub const NO_RESPONSE_EMPHASIS: &str = "*No response*";

/// Field ids whose values must be http(s) URLs
pub const URL_FIELDS: [&str; 2] = ["repo", "issue"];

/// Field values of a submitted form, keyed by element id
pub type Submission = BTreeMap<String, String>;

/// Errors loading an issue form
#[derive(Debug, Error)]
pub enum FormError {
    /// The YAML could not be parsed as an issue form
    #[error("invalid issue form: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The form has no input elements
    #[error("issue form '{0}' has no fields")]
    NoFields(String),
}

/// A problem with one field of a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field is missing or empty
    #[error("'{label}' is required")]
    Missing {
        /// Element id
        id: String,
        /// Human-readable label
        label: String,
    },
    /// A dropdown value is not one of the declared options
    #[error("'{value}' is not a valid choice for '{label}'")]
    InvalidOption {
        /// Element id
        id: String,
        /// Human-readable label
        label: String,
        /// Offending value
        value: String,
    },
    /// A URL field does not hold an http(s) URL
    #[error("'{label}' must be an http(s) URL, got '{value}'")]
    InvalidUrl {
        /// Element id
        id: String,
        /// Human-readable label
        label: String,
        /// Offending value
        value: String,
    },
}

impl FieldError {
    /// Id of the field this error refers to
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Missing { id, .. }
            | Self::InvalidOption { id, .. }
            | Self::InvalidUrl { id, .. } => id,
        }
    }
}

/// Kind of form element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Static Markdown, not a field
    Markdown,
    /// Single-line text
    Input,
    /// Multi-line text
    Textarea,
    /// Choice among options
    Dropdown,
    /// Tick boxes
    Checkboxes,
}

/// A dropdown option (plain string) or checkbox option (object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormOption {
    /// Dropdown option
    Plain(String),
    /// Checkbox option
    Checkbox {
        /// Option text
        label: String,
        /// Whether the box must be ticked
        #[serde(default)]
        required: bool,
    },
}

impl FormOption {
    /// Display text of the option
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) | Self::Checkbox { label, .. } => label,
        }
    }
}

/// Element attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Field label, rendered as the section heading
    #[serde(default)]
    pub label: Option<String>,
    /// Help text
    #[serde(default)]
    pub description: Option<String>,
    /// Placeholder text
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Markdown content of `markdown` elements
    #[serde(default)]
    pub value: Option<String>,
    /// Dropdown or checkbox options
    #[serde(default)]
    pub options: Vec<FormOption>,
    /// Whether a dropdown accepts several options
    #[serde(default)]
    pub multiple: bool,
}

/// Element validations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validations {
    /// Whether a value must be provided
    #[serde(default)]
    pub required: bool,
}

/// One element of the form body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    /// Element kind
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Field id (absent on markdown elements)
    #[serde(default)]
    pub id: Option<String>,
    /// Element attributes
    #[serde(default)]
    pub attributes: Attributes,
    /// Element validations
    #[serde(default)]
    pub validations: Validations,
}

impl FormElement {
    /// Label shown as the section heading, falling back to the id
    #[must_use]
    pub fn heading(&self) -> &str {
        self.attributes
            .label
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

/// Labels may be written as a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn labels_from_yaml<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(label)) => label
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
        Some(OneOrMany::Many(labels)) => labels,
    })
}

/// A GitHub issue form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueForm {
    /// Form name
    pub name: String,
    /// Form description
    #[serde(default)]
    pub description: Option<String>,
    /// Title prefix for issues filed with this form
    #[serde(default)]
    pub title: String,
    /// Labels applied to issues filed with this form
    #[serde(default, deserialize_with = "labels_from_yaml")]
    pub labels: Vec<String>,
    /// Form elements in display order
    #[serde(default)]
    pub body: Vec<FormElement>,
}

impl IssueForm {
    /// Parse an issue form from YAML
    pub fn from_yaml(content: &str) -> Result<Self, FormError> {
        let form: Self = serde_yaml::from_str(content)?;
        if form.fields().next().is_none() {
            return Err(FormError::NoFields(form.name));
        }
        Ok(form)
    }

    /// Elements that carry an id, in form order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FormElement)> {
        self.body
            .iter()
            .filter_map(|e| e.id.as_deref().map(|id| (id, e)))
    }

    /// Look up a field by id
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FormElement> {
        self.fields().find(|(fid, _)| *fid == id).map(|(_, e)| e)
    }

    /// Title of a mirrored issue: form prefix, then `{project} - {title}`
    #[must_use]
    pub fn render_title(&self, project: &str, title: &str) -> String {
        format!("{}{project} - {title}", self.title)
    }

    /// Render a body with one `### Label` section per field
    ///
    /// Fields missing from `values` are rendered as [`NO_RESPONSE_EMPHASIS`].
    #[must_use]
    pub fn render_body(&self, values: &Submission) -> String {
        let mut body = String::new();
        for (id, element) in self.fields() {
            let value = values
                .get(id)
                .map_or(NO_RESPONSE_EMPHASIS, String::as_str);
            body.push_str(&format!("### {}\n\n{value}\n\n", element.heading()));
        }
        body
    }

    /// Split a submitted body back into field values
    ///
    /// Headings that do not match a field label are kept as part of the
    /// previous field's value. Empty placeholders map to empty strings.
    #[must_use]
    pub fn parse_submission(&self, body: &str) -> Submission {
        let by_heading: BTreeMap<&str, &str> =
            self.fields().map(|(id, e)| (e.heading(), id)).collect();

        let mut sections: Vec<(&str, Vec<&str>)> = Vec::new();
        for line in body.lines() {
            let heading = line.trim().strip_prefix("### ").map(str::trim);
            if let Some(id) = heading.and_then(|h| by_heading.get(h)) {
                sections.push((*id, Vec::new()));
            } else if let Some((_, lines)) = sections.last_mut() {
                lines.push(line);
            }
        }

        sections
            .into_iter()
            .map(|(id, lines)| {
                let value = lines.join("\n").trim().to_string();
                let value = if value == NO_RESPONSE || value == NO_RESPONSE_EMPHASIS {
                    String::new()
                } else {
                    value
                };
                (id.to_string(), value)
            })
            .collect()
    }

    /// Check a submission against the form
    ///
    /// Returns every problem found, in form order. An empty list means the
    /// submission is valid.
    #[must_use]
    pub fn validate(&self, values: &Submission) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for (id, element) in self.fields() {
            let label = element.heading().to_string();
            let value = values.get(id).map_or("", |v| v.trim());

            if value.is_empty() {
                if element.validations.required {
                    errors.push(FieldError::Missing {
                        id: id.to_string(),
                        label,
                    });
                }
                continue;
            }

            if element.kind == ElementKind::Dropdown && !element.attributes.options.is_empty() {
                let chosen: Vec<&str> = if element.attributes.multiple {
                    value.split(',').map(str::trim).filter(|v| !v.is_empty()).collect()
                } else {
                    vec![value]
                };
                for choice in chosen {
                    let known = element.attributes.options.iter().any(|o| o.label() == choice);
                    if !known {
                        errors.push(FieldError::InvalidOption {
                            id: id.to_string(),
                            label: label.clone(),
                            value: choice.to_string(),
                        });
                    }
                }
            }

            if URL_FIELDS.contains(&id) && !is_http_url(value) {
                errors.push(FieldError::InvalidUrl {
                    id: id.to_string(),
                    label,
                    value: value.to_string(),
                });
            }
        }

        errors
    }
}
