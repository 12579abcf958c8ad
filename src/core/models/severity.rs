//! Violation severity levels
//!
//! The tag says how serious a form problem is. How much a severity costs in
//! the score lives in the scoring service; how severities order against each
//! other lives in [`Severity::rank`].

use serde::{Deserialize, Serialize};

/// Violation severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor cue, shown but never spoken over a more serious one
    Info,
    /// Form fault worth correcting
    #[default]
    Warning,
    /// Risk of injury
    Critical,
}

/// Priority of each severity; higher wins when only one cue can be given
const RANKS: [(Severity, u8); 3] =
    [(Severity::Info, 1), (Severity::Warning, 2), (Severity::Critical, 3)];

impl Severity {
    /// Priority rank (Critical > Warning > Info)
    #[must_use]
    pub fn rank(self) -> u8 {
        RANKS.iter().find(|(s, _)| *s == self).map_or(0, |(_, r)| *r)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Invalid severity: {s}. Use: info, warning, critical")),
        }
    }
}
