//! Per-frame feedback and per-rep results

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::joint::JointId;
use super::pose::PoseSnapshot;
use super::severity::Severity;

/// One rule failure in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormViolation {
    /// Violation type tag, e.g. `KNEE_CAVE`
    pub violation_type: String,
    /// What was measured
    pub description: String,
    /// What the user should do about it
    pub correction: String,
    /// How serious it is
    pub severity: Severity,
    /// Joint the cue is about
    pub affected_joint: JointId,
    /// Frame timestamp
    pub timestamp: DateTime<Utc>,
}

/// Form score, 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FormScore(u8);

impl FormScore {
    /// Highest score
    pub const MAX: Self = Self(100);

    /// Clamp a raw score into range
    #[must_use]
    pub fn clamped(raw: i32) -> Self {
        Self(u8::try_from(raw.clamp(0, 100)).unwrap_or(0))
    }

    /// Score as an integer
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for FormScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Feedback for one analyzed frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFeedback {
    /// Frame score
    pub score: FormScore,
    /// Everything that failed this frame
    pub violations: Vec<FormViolation>,
    /// Up to three on-screen cues, most urgent first
    pub text_instructions: Vec<String>,
    /// Single spoken cue, if any survived the cooldown
    pub audio_message: Option<String>,
    /// Frame timestamp
    pub timestamp: DateTime<Utc>,
}

impl FormFeedback {
    /// Whether any violation of the given type is present
    #[must_use]
    pub fn has_violation(&self, violation_type: &str) -> bool {
        self.violations.iter().any(|v| v.violation_type == violation_type)
    }
}

/// Summary of one completed repetition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepAnalysis {
    /// 1-based rep number within the session
    pub rep_number: u32,
    /// Mean frame score over the rep's lookback window
    pub form_score: f32,
    /// Time since the previous rep (or session start)
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Violations seen during the rep, one per type
    pub violations: Vec<FormViolation>,
    /// Completion time
    pub timestamp: DateTime<Utc>,
}

/// Event published when a rep completes
#[derive(Debug, Clone, PartialEq)]
pub struct RepCompleted {
    /// The rep summary
    pub analysis: RepAnalysis,
    /// Pose that completed the rep
    pub pose: PoseSnapshot,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
