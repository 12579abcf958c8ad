//! Repetition summaries

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::models::{FormFeedback, FormViolation, RepAnalysis};

/// How many recent frames a rep summary looks at
pub const REP_LOOKBACK: usize = 10;

/// Build the summary for a completed rep from recent frame feedback
///
/// The score is the mean over `recent`. Violations are deduplicated by type,
/// and a later instance replaces an earlier one of the same type.
#[must_use]
pub fn summarize_rep<'a>(
    rep_number: u32,
    recent: impl IntoIterator<Item = &'a FormFeedback>,
    duration: Duration,
    timestamp: DateTime<Utc>,
) -> RepAnalysis {
    let mut score_sum = 0.0_f32;
    let mut frames = 0_u32;
    let mut violations: Vec<FormViolation> = Vec::new();

    for feedback in recent {
        score_sum += f32::from(feedback.score.value());
        frames += 1;

        for violation in &feedback.violations {
            match violations.iter_mut().find(|v| v.violation_type == violation.violation_type) {
                Some(existing) => *existing = violation.clone(),
                None => violations.push(violation.clone()),
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let form_score = if frames == 0 { 0.0 } else { score_sum / frames as f32 };

    RepAnalysis {
        rep_number,
        form_score,
        duration,
        violations,
        timestamp,
    }
}
