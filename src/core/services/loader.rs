//! Issue loader
//!
//! Mirrors labelled issues from participating repositories into the hub
//! repository and keeps the state snapshot in step with the hub.
//!
//! A run goes through four phases:
//!
//! 1. load the snapshot and fetch the task issue form from the hub
//! 2. reconcile the snapshot with the hub's issues: drop entries whose hub
//!    issue no longer exists and adopt hub issues that already link to a
//!    source issue the snapshot does not know about
//! 3. mirror every labelled source issue that has no hub issue yet
//! 4. persist the snapshot (skipped on dry runs)

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use log::{debug, info, warn};
use serde::Serialize;

use crate::core::models::{
    IssueForm, RepoCount, RepoSlug, SourceIssue, SourceRepo, State, parse_issue_url,
};
use crate::core::ports::{IssueTracker, StateStore};

use super::mirror::mirror_issue;

/// What to load and where
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Hub repository that receives mirrored issues
    pub hub: RepoSlug,
    /// Label marking source issues for the program
    pub label: String,
    /// Path of the task issue form in the hub repository
    pub template_path: String,
    /// Repositories to read labelled issues from
    pub sources: Vec<SourceRepo>,
    /// Report what would be created without creating or saving anything
    pub dry_run: bool,
}

/// A source issue and the hub issue mirroring it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorRef {
    /// Source repository full name
    pub repo: String,
    /// Source issue number
    pub source: u64,
    /// Hub issue number
    pub hub: u64,
}

/// A hub issue created during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedMirror {
    /// Source repository full name
    pub repo: String,
    /// Source issue number
    pub source: u64,
    /// Hub issue number
    pub hub: u64,
    /// Title of the hub issue
    pub title: String,
    /// URL of the hub issue
    pub url: String,
}

/// A hub issue a dry run would have created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMirror {
    /// Source repository full name
    pub repo: String,
    /// Source issue number
    pub source: u64,
    /// Title of the issue that would be created
    pub title: String,
    /// Body of the issue that would be created
    pub body: String,
    /// Labels of the issue that would be created
    pub labels: Vec<String>,
}

/// Hub data that could not be reconciled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Malformed {
    /// Hub issue number
    pub hub: u64,
    /// What is wrong with it
    pub reason: String,
}

/// Outcome of a load run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Hub issues created
    pub created: Vec<CreatedMirror>,
    /// Hub issues a dry run would have created
    pub planned: Vec<PlannedMirror>,
    /// Existing hub issues recorded in the snapshot
    pub adopted: Vec<MirrorRef>,
    /// Snapshot entries dropped because their hub issue is gone
    pub orphaned: Vec<MirrorRef>,
    /// Hub issues that could not be reconciled
    pub malformed: Vec<Malformed>,
    /// Source issues already mirrored
    pub skipped: usize,
    /// Whether the snapshot was saved
    pub state_written: bool,
    /// Known issues per source repository after the run
    pub summary: Vec<RepoCount>,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Orchestrates a load run against a tracker and a state store
pub struct Loader<'a> {
    tracker: &'a dyn IssueTracker,
    store: &'a dyn StateStore,
}

impl std::fmt::Debug for Loader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").finish_non_exhaustive()
    }
}

impl<'a> Loader<'a> {
    /// Create a loader
    #[must_use]
    pub fn new(tracker: &'a dyn IssueTracker, store: &'a dyn StateStore) -> Self {
        Self { tracker, store }
    }

    /// Run the loader
    ///
    /// Tracker failures abort the run before the snapshot is saved.
    pub async fn run(&self, options: &LoadOptions) -> anyhow::Result<LoadReport> {
        let mut report = LoadReport {
            dry_run: options.dry_run,
            ..LoadReport::default()
        };

        let mut state = self.store.load().context("failed to load state")?;

        let template = self
            .tracker
            .file_contents(&options.hub, &options.template_path)
            .await
            .with_context(|| {
                format!("failed to fetch issue form {} from {}", options.template_path, options.hub)
            })?;
        let form = IssueForm::from_yaml(&template)
            .with_context(|| format!("failed to parse issue form {}", options.template_path))?;

        self.reconcile(options, &form, &mut state, &mut report).await?;

        for source in &options.sources {
            self.load_repo(options, source, &form, &mut state, &mut report)
                .await?;
        }

        if options.dry_run {
            info!("Dry run, not writing state file");
        } else {
            info!("Writing state file to disk");
            self.store.save(&state).context("failed to save state")?;
            report.state_written = true;
        }

        report.summary = state.summary();
        Ok(report)
    }

    /// Bring the snapshot in line with the issues present in the hub
    async fn reconcile(
        &self,
        options: &LoadOptions,
        form: &IssueForm,
        state: &mut State,
        report: &mut LoadReport,
    ) -> anyhow::Result<()> {
        let hub_issues = self
            .tracker
            .all_issues(&options.hub)
            .await
            .with_context(|| format!("failed to list issues of {}", options.hub))?;
        debug!("Found {} issues in {}", hub_issues.len(), options.hub);

        let present: BTreeSet<u64> = hub_issues.iter().map(|i| i.number).collect();
        for (repo, source, hub) in state.retain_hub_issues(&present, now()) {
            warn!("Issue {}#{hub} mirroring {repo}#{source} no longer exists; dropping it", options.hub);
            report.orphaned.push(MirrorRef { repo, source, hub });
        }

        // Snapshot keys follow the config spelling; URLs may differ in case
        let configured: BTreeMap<String, String> = options
            .sources
            .iter()
            .map(|s| (s.slug.full_name().to_lowercase(), s.slug.full_name()))
            .collect();

        // Oldest first, so the original mirror wins over later duplicates
        let mut hub_issues = hub_issues;
        hub_issues.sort_by_key(|i| i.number);

        for issue in &hub_issues {
            let Some(link) = linked_source(form, issue) else {
                continue;
            };
            let Some(repo) = RepoSlug::from_url(&link)
                .ok()
                .and_then(|slug| configured.get(&slug.full_name().to_lowercase()))
            else {
                continue;
            };

            let Some((_, source)) = parse_issue_url(&link) else {
                warn!("Issue {}#{} links to {link}, which is not an issue URL", options.hub, issue.number);
                report.malformed.push(Malformed {
                    hub: issue.number,
                    reason: format!("related issue link is not an issue URL: {link}"),
                });
                continue;
            };

            match state.mirror_of(repo, source) {
                None => {
                    info!("Adopting {}#{} as the mirror of {repo}#{source}", options.hub, issue.number);
                    state.record(repo, source, issue.number, now());
                    report.adopted.push(MirrorRef {
                        repo: repo.clone(),
                        source,
                        hub: issue.number,
                    });
                },
                Some(existing) if existing != issue.number => {
                    warn!(
                        "Issue {}#{} duplicates {}#{existing} for {repo}#{source}",
                        options.hub, issue.number, options.hub
                    );
                    report.malformed.push(Malformed {
                        hub: issue.number,
                        reason: format!("duplicates #{existing} as the mirror of {repo}#{source}"),
                    });
                },
                Some(_) => {},
            }
        }

        Ok(())
    }

    /// Mirror the labelled issues of one source repository
    async fn load_repo(
        &self,
        options: &LoadOptions,
        source: &SourceRepo,
        form: &IssueForm,
        state: &mut State,
        report: &mut LoadReport,
    ) -> anyhow::Result<()> {
        let repo = source.slug.full_name();
        state.track_repo(&repo);

        let repo_url = self
            .tracker
            .repository_url(&source.slug)
            .await
            .with_context(|| format!("failed to look up repository {repo}"))?;
        let issues = self
            .tracker
            .labelled_issues(&source.slug, &options.label)
            .await
            .with_context(|| format!("failed to list issues of {repo}"))?;

        let labelled = issues
            .iter()
            .filter(|i| !i.is_pull_request && i.has_label(&options.label));

        for issue in labelled {
            if let Some(hub) = state.mirror_of(&repo, issue.number) {
                info!(
                    "Issue ({repo}#{}) already exists in repo: {}#{hub}",
                    issue.number, options.hub
                );
                report.skipped += 1;
                continue;
            }

            let new_issue = mirror_issue(form, &source.project_name, &repo_url, issue);
            info!("Creating issue: {}", new_issue.title);
            info!("Labels: {:?}", new_issue.labels);

            if options.dry_run {
                info!("Dry run, not creating issue. Here is the issue body:\n\n{}", new_issue.body);
                report.planned.push(PlannedMirror {
                    repo: repo.clone(),
                    source: issue.number,
                    title: new_issue.title,
                    body: new_issue.body,
                    labels: new_issue.labels,
                });
                continue;
            }

            let created = self
                .tracker
                .create_issue(&options.hub, &new_issue)
                .await
                .with_context(|| format!("failed to create mirror of {repo}#{}", issue.number))?;
            info!("Issue successfully created: {}", created.html_url);

            state.record(&repo, issue.number, created.number, now());
            report.created.push(CreatedMirror {
                repo: repo.clone(),
                source: issue.number,
                hub: created.number,
                title: new_issue.title,
                url: created.html_url,
            });
        }

        Ok(())
    }
}

/// The source issue URL a hub issue links to, if any
fn linked_source(form: &IssueForm, issue: &SourceIssue) -> Option<String> {
    let body = issue.body.as_deref()?;
    form.parse_submission(body)
        .remove("issue")
        .filter(|link| !link.is_empty())
}
