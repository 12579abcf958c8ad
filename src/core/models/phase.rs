//! Movement phases

use serde::{Deserialize, Serialize};

/// Where the body is within one repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// At or near the highest tracked position
    #[default]
    Top,
    /// At or near the lowest tracked position
    Bottom,
    /// Lowering
    Eccentric,
    /// Lifting
    Concentric,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Eccentric => write!(f, "eccentric"),
            Self::Concentric => write!(f, "concentric"),
        }
    }
}

/// Which phases a rule applies in
///
/// Kept apart from [`Phase`] so the `all` wildcard can never become engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseFilter {
    /// Every phase
    #[default]
    All,
    /// A single phase
    Only(Phase),
}

impl PhaseFilter {
    /// Whether a rule with this filter is active in `phase`
    #[must_use]
    pub fn matches(self, phase: Phase) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => p == phase,
        }
    }
}

impl std::fmt::Display for PhaseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(p) => write!(f, "{p}"),
        }
    }
}

impl std::str::FromStr for PhaseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "top" => Ok(Self::Only(Phase::Top)),
            "bottom" => Ok(Self::Only(Phase::Bottom)),
            "eccentric" => Ok(Self::Only(Phase::Eccentric)),
            "concentric" => Ok(Self::Only(Phase::Concentric)),
            _ => Err(format!(
                "Invalid phase: {s}. Use: all, top, bottom, eccentric, concentric"
            )),
        }
    }
}
