//! Feedback synthesis - score, on-screen cues and the single spoken cue
//!
//! Deductions are looked up per severity here; ordering between severities
//! comes from [`Severity::rank`]. The two tables are deliberately separate.

use chrono::{DateTime, Utc};

use crate::core::models::{FormFeedback, FormScore, FormViolation, Severity};

/// Score before deductions
pub const BASE_SCORE: i32 = 100;

/// Bonus for a clearly visible pose
pub const CONFIDENCE_BONUS: i32 = 5;

/// Overall confidence above which the bonus applies
pub const CONFIDENCE_BONUS_THRESHOLD: f32 = 0.8;

/// Maximum number of on-screen instructions
pub const MAX_TEXT_INSTRUCTIONS: usize = 3;

/// Prefix marking critical instructions
pub const CRITICAL_PREFIX: &str = "Important: ";

/// Shown when nothing is wrong
pub const AFFIRMATION: &str = "Great form! Keep it up.";

/// Shown when the pose is too uncertain to analyze
pub const LOW_CONFIDENCE_MESSAGE: &str =
    "Can't see you clearly. Reposition yourself so your whole body is in frame.";

/// Points deducted per violation of each severity
const DEDUCTIONS: [(Severity, i32); 3] =
    [(Severity::Critical, 20), (Severity::Warning, 10), (Severity::Info, 5)];

/// Score deduction for one violation of the given severity
#[must_use]
pub fn deduction(severity: Severity) -> i32 {
    DEDUCTIONS.iter().find(|(s, _)| *s == severity).map_or(0, |(_, d)| *d)
}

/// Frame score from its violations and pose confidence
#[must_use]
pub fn compute_score(violations: &[FormViolation], overall_confidence: f32) -> FormScore {
    let deducted: i32 = violations.iter().map(|v| deduction(v.severity)).sum();
    let bonus = if overall_confidence > CONFIDENCE_BONUS_THRESHOLD { CONFIDENCE_BONUS } else { 0 };
    FormScore::clamped(BASE_SCORE - deducted + bonus)
}

/// Up to three cues: criticals first (prefixed), then warnings
///
/// Info violations are never shown as text. With no violations at all a
/// single affirmation is returned.
#[must_use]
pub fn text_instructions(violations: &[FormViolation]) -> Vec<String> {
    if violations.is_empty() {
        return vec![AFFIRMATION.to_string()];
    }

    let critical = violations
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .map(|v| format!("{CRITICAL_PREFIX}{}", v.correction));
    let warnings = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .map(|v| v.correction.clone());

    critical.chain(warnings).take(MAX_TEXT_INSTRUCTIONS).collect()
}

/// The one violation worth saying out loud
///
/// Highest rank wins; among equals the first one encountered is kept.
#[must_use]
pub fn audio_priority(violations: &[FormViolation]) -> Option<&FormViolation> {
    violations.iter().fold(None, |best: Option<&FormViolation>, v| match best {
        Some(b) if b.severity.rank() >= v.severity.rank() => Some(b),
        _ => Some(v),
    })
}

/// Build the feedback for one analyzed frame (before the audio cooldown)
#[must_use]
pub fn synthesize(
    violations: Vec<FormViolation>,
    overall_confidence: f32,
    timestamp: DateTime<Utc>,
) -> FormFeedback {
    let score = compute_score(&violations, overall_confidence);
    let text_instructions = text_instructions(&violations);
    let audio_message = audio_priority(&violations).map(|v| v.correction.clone());

    FormFeedback {
        score,
        violations,
        text_instructions,
        audio_message,
        timestamp,
    }
}

/// Feedback for a frame too uncertain to analyze
#[must_use]
pub fn low_confidence_feedback(timestamp: DateTime<Utc>) -> FormFeedback {
    FormFeedback {
        score: FormScore::clamped(0),
        violations: Vec::new(),
        text_instructions: vec![LOW_CONFIDENCE_MESSAGE.to_string()],
        audio_message: None,
        timestamp,
    }
}

/// Debounce for the audio channel
///
/// Only the spoken cue is rate limited; score and text still go out every
/// frame. The window restarts only when a cue is actually let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCooldown {
    cooldown_ms: u64,
    last_emitted: Option<DateTime<Utc>>,
}

impl AudioCooldown {
    /// Create a cooldown of the given length
    #[must_use]
    pub const fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_emitted: None,
        }
    }

    /// Null the feedback's audio if it arrives inside the cooldown window
    pub fn apply(&mut self, feedback: &mut FormFeedback) {
        if feedback.audio_message.is_none() {
            return;
        }

        let cooling = self.last_emitted.is_some_and(|last| {
            let elapsed = (feedback.timestamp - last).num_milliseconds();
            elapsed < i64::try_from(self.cooldown_ms).unwrap_or(i64::MAX)
        });

        if cooling {
            feedback.audio_message = None;
        } else {
            self.last_emitted = Some(feedback.timestamp);
        }
    }

    /// Forget the last emission
    pub fn reset(&mut self) {
        self.last_emitted = None;
    }
}
