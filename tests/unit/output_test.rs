//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use codeuw::core::models::{FieldError, RepoCount, State};
use codeuw::core::services::{CreatedMirror, LoadReport, Malformed, PlannedMirror};
use codeuw::output::{LoadResult, OutputMode, StatusResult, ValidationResult};

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// LoadResult Tests
// =============================================================================

fn report() -> LoadReport {
    LoadReport {
        created: vec![CreatedMirror {
            repo: "org/proj".to_string(),
            source: 3,
            hub: 41,
            title: "[Task]: Project - Fix parser".to_string(),
            url: "https://github.com/uw-ssec/codeuw/issues/41".to_string(),
        }],
        malformed: vec![Malformed {
            hub: 12,
            reason: "duplicates #10 as the mirror of org/proj#1".to_string(),
        }],
        skipped: 2,
        state_written: true,
        summary: vec![
            RepoCount {
                repo: "org/proj".to_string(),
                issues: 3,
            },
            RepoCount {
                repo: "org/quiet".to_string(),
                issues: 0,
            },
        ],
        ..LoadReport::default()
    }
}

#[test]
fn load_result_human_summary() {
    let report = report();
    let text = LoadResult::new(&report).human();

    assert!(text.contains("Created #41 for org/proj#3"));
    assert!(text.contains("Warning: #12: duplicates #10"));
    assert!(text.contains("Issues creation summary:\n  org/proj: 3 issues\n  org/quiet: 0 issues"));
    assert!(text.ends_with("1 created, 0 planned, 0 adopted, 0 dropped, 2 already mirrored"));
    assert!(!text.contains("Dry run"));
}

#[test]
fn load_result_human_dry_run() {
    let report = LoadReport {
        dry_run: true,
        planned: vec![PlannedMirror {
            repo: "org/proj".to_string(),
            source: 5,
            title: "[Task]: Project - Add docs".to_string(),
            body: "### Contact\n\n@maintainer\n\n".to_string(),
            labels: vec!["task".to_string()],
        }],
        ..LoadReport::default()
    };
    let text = LoadResult::new(&report).human();

    assert!(text.starts_with("Dry run"));
    assert!(text.contains("Would create for org/proj#5: [Task]: Project - Add docs"));
    assert!(text.contains("(no repositories configured)"));
}

#[test]
fn load_result_json_is_flat() {
    let report = report();
    let json = serde_json::to_value(LoadResult::new(&report)).unwrap();

    assert_eq!(json["dry_run"], false);
    assert_eq!(json["state_written"], true);
    assert_eq!(json["created"][0]["hub"], 41);
    assert_eq!(json["summary"][1]["repo"], "org/quiet");
    assert_eq!(json["skipped"], 2);
}

// =============================================================================
// StatusResult Tests
// =============================================================================

#[test]
fn status_result_from_state() {
    let mut state = State::new(0);
    state.record("org/proj", 1, 10, 60);
    state.record("org/proj", 2, 11, 120);
    state.record("org/other", 5, 12, 180);

    let status = StatusResult::from_state(".codeuw-state.mpk", true, &state);

    assert_eq!(status.version, "1.0");
    assert_eq!(status.total, 3);
    assert_eq!(status.created, "1970-01-01T00:00:00+00:00");
    assert_eq!(status.last_modified, "1970-01-01T00:03:00+00:00");
    assert_eq!(status.repos[0].repo, "org/other");
    assert_eq!(status.repos[1].issues, 2);
}

// =============================================================================
// ValidationResult Tests
// =============================================================================

#[test]
fn validation_result_collects_field_problems() {
    let result = ValidationResult::from_outcome(Err(vec![
        FieldError::Missing {
            id: "contact".to_string(),
            label: "Contact".to_string(),
        },
        FieldError::InvalidOption {
            id: "level".to_string(),
            label: "Level".to_string(),
            value: "L9".to_string(),
        },
    ]));

    assert!(!result.valid);
    assert!(result.task.is_none());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["errors"][0]["field"], "contact");
    assert_eq!(json["errors"][1]["message"], "'L9' is not a valid choice for 'Level'");
    assert!(json.get("task").is_none());
}
