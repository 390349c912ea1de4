//! Centralized path definitions for codeuw
//!
//! ## Repository Layout
//!
//! ```text
//! hub/                                   # Hub repository root
//! ├── .codeuw-config.yml                 # Participating repositories
//! ├── .codeuw-state.mpk                  # Mirrored issues (committed by CI)
//! └── .github/
//!     ├── ISSUE_TEMPLATE/task.yml        # Task issue form
//!     └── workflows/load-issues.yml      # Hourly loader job
//! ```
//!
//! Paths are relative to the working directory the loader runs in; the
//! scheduled job runs it from the checkout root.

use std::path::PathBuf;

/// Default configuration filename
pub const DEFAULT_CONFIG_FILE: &str = ".codeuw-config.yml";

/// Default state snapshot filename
pub const DEFAULT_STATE_FILE: &str = ".codeuw-state.mpk";

/// Location of the task issue form inside the hub repository
pub const DEFAULT_TEMPLATE_PATH: &str = ".github/ISSUE_TEMPLATE/task.yml";

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "CODEUW_CONFIG";

/// Environment variable overriding the state path
pub const STATE_ENV: &str = "CODEUW_STATE";

/// Path of the config file in the working directory
#[must_use]
pub fn config_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Path of the state file in the working directory
#[must_use]
pub fn state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

/// Path of the task issue form in a local checkout
#[must_use]
pub fn template_file() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_PATH)
}
