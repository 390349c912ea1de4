//! Domain models for codeuw
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`IssueForm`] - The task issue form and its `### Label` body layout
//! - [`TaskIssue`] - A validated task filed through the form
//! - [`Level`] - Task complexity classification
//! - [`State`] - Snapshot of mirrored issues
//! - [`SourceIssue`], [`NewIssue`], [`CreatedIssue`] - Tracker issue views
//! - [`RepoSlug`], [`SourceRepo`] - Repository references

mod form;
mod issue;
mod level;
mod repo;
mod state;
mod task;

pub use form::{
    Attributes, ElementKind, FieldError, FormElement, FormError, FormOption, IssueForm,
    NO_RESPONSE, NO_RESPONSE_EMPHASIS, Submission, URL_FIELDS, Validations,
};
pub use issue::{CreatedIssue, GHOST_LOGIN, NewIssue, SourceIssue};
pub use level::Level;
pub use repo::{RepoSlug, SlugError, SourceRepo, is_http_url, parse_issue_url};
pub use state::{IssueMap, RepoCount, STATE_VERSION, State};
pub use task::TaskIssue;
