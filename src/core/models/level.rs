//! Task levels
//!
//! Classifies a task by complexity and expected duration.

use serde::{Deserialize, Serialize};

/// Task level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Small, self-contained task (a few hours)
    L1,
    /// Medium task touching several parts of a codebase
    L2,
    /// Large task spanning weeks
    L3,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L3 => write!(f, "L3"),
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    /// Accepts `L1`, `l2`, and dropdown labels such as `L3 (multi-week)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.split_whitespace().next().unwrap_or_default();
        match token.to_uppercase().as_str() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L3" => Ok(Self::L3),
            _ => Err(format!("Invalid level: {s}. Use: L1, L2, L3")),
        }
    }
}
