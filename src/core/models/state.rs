//! State snapshot
//!
//! Records which source issues have been mirrored into the hub and under
//! which hub issue number. The snapshot is rewritten in full on every
//! successful run and committed alongside the repository.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Current snapshot format version
pub const STATE_VERSION: &str = "1.0";

/// Source issue number to hub issue number
pub type IssueMap = BTreeMap<u64, u64>;

/// Snapshot of mirrored issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Snapshot format version
    pub version: String,
    /// When the snapshot was first created (unix seconds)
    pub created_time: i64,
    /// When a mapping was last added or removed (unix seconds)
    pub last_modified: i64,
    /// Mirrored issues keyed by source repository full name
    #[serde(default)]
    pub issues: BTreeMap<String, IssueMap>,
}

/// Count of known issues for one source repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoCount {
    /// Source repository full name
    pub repo: String,
    /// Number of mirrored issues
    pub issues: usize,
}

impl State {
    /// Create an empty snapshot stamped with the given time
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            created_time: now,
            last_modified: now,
            issues: BTreeMap::new(),
        }
    }

    /// Create an empty snapshot stamped with the current time
    #[must_use]
    pub fn fresh() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }

    /// Ensure a source repository has an entry, even if it has no issues yet
    pub fn track_repo(&mut self, repo: &str) {
        self.issues.entry(repo.to_string()).or_default();
    }

    /// Hub issue mirroring a source issue, if any
    #[must_use]
    pub fn mirror_of(&self, repo: &str, source: u64) -> Option<u64> {
        self.issues.get(repo).and_then(|m| m.get(&source)).copied()
    }

    /// Record a mirror and bump `last_modified`
    ///
    /// A source issue maps to exactly one hub issue; recording again replaces
    /// the previous mapping.
    pub fn record(&mut self, repo: &str, source: u64, hub: u64, now: i64) {
        self.issues.entry(repo.to_string()).or_default().insert(source, hub);
        self.last_modified = now;
    }

    /// Remove every mapping whose hub issue is not in `present`
    ///
    /// Returns the removed `(repo, source, hub)` triples.
    pub fn retain_hub_issues(
        &mut self,
        present: &BTreeSet<u64>,
        now: i64,
    ) -> Vec<(String, u64, u64)> {
        let mut removed = Vec::new();
        for (repo, map) in &mut self.issues {
            map.retain(|&source, &mut hub| {
                let keep = present.contains(&hub);
                if !keep {
                    removed.push((repo.clone(), source, hub));
                }
                keep
            });
        }
        if !removed.is_empty() {
            self.last_modified = now;
        }
        removed
    }

    /// Total number of mirrored issues across all repositories
    #[must_use]
    pub fn total(&self) -> usize {
        self.issues.values().map(BTreeMap::len).sum()
    }

    /// Per-repository counts, ordered by repository name
    #[must_use]
    pub fn summary(&self) -> Vec<RepoCount> {
        self.issues
            .iter()
            .map(|(repo, map)| RepoCount {
                repo: repo.clone(),
                issues: map.len(),
            })
            .collect()
    }
}
