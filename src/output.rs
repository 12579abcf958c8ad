//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::models::{ExerciseFormRules, RepAnalysis, Severity};
use crate::core::ports::ExerciseSummary;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of replaying a recorded session
#[derive(Debug, Serialize)]
pub struct SessionReport {
    /// Exercise id
    pub exercise_id: String,
    /// Exercise display name
    pub display_name: String,
    /// Frames read from the session
    pub frames: usize,
    /// Frames rejected for low confidence
    pub low_confidence_frames: usize,
    /// Spoken cues that survived the cooldown
    pub audio_cues: Vec<String>,
    /// Completed reps, oldest first
    pub reps: Vec<RepAnalysis>,
    /// Mean rep score
    pub average_score: Option<f32>,
    /// Number of reps showing each violation type
    pub violation_frequency: BTreeMap<String, usize>,
}

/// Result of listing exercises
#[derive(Debug, Serialize)]
pub struct RulesListResult {
    /// File the rules came from
    pub source: String,
    /// Available exercises
    pub exercises: Vec<ExerciseSummary>,
}

/// Full rule set of one exercise
#[derive(Debug, Serialize)]
pub struct RuleDetail {
    /// File the rules came from
    pub source: String,
    /// The rules
    pub rules: ExerciseFormRules,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn paint_score(score: f32) -> ColoredString {
    let text = format!("{score:.0}");
    if score >= 80.0 {
        text.green()
    } else if score >= 60.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn paint_severity(severity: Severity) -> ColoredString {
    let text = severity.to_string().to_uppercase();
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.blue(),
    }
}

impl SessionReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        println!("{} ({})", self.display_name.bold(), self.exercise_id);
        println!(
            "  {} frame(s), {} skipped for low confidence, {} spoken cue(s)\n",
            self.frames,
            self.low_confidence_frames,
            self.audio_cues.len()
        );

        if self.reps.is_empty() {
            println!("No reps detected.");
            return;
        }

        println!("Reps:");
        for rep in &self.reps {
            println!(
                "  #{:<3} score {:>3}  {:>6} ms",
                rep.rep_number,
                paint_score(rep.form_score),
                rep.duration.as_millis()
            );
            for v in &rep.violations {
                println!("        [{}] {}", paint_severity(v.severity), v.correction);
            }
        }

        if let Some(avg) = self.average_score {
            println!("\nAverage score: {}", paint_score(avg));
        }

        if !self.violation_frequency.is_empty() {
            println!("\nMost common issues:");
            let mut by_count: Vec<_> = self.violation_frequency.iter().collect();
            by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (violation_type, count) in by_count {
                println!("  {violation_type}: {count} rep(s)");
            }
        }
    }
}

impl RulesListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.exercises.is_empty() {
            println!("No exercises found in {}.", self.source);
            return;
        }

        println!("Exercises ({}):\n", self.source);
        for e in &self.exercises {
            println!("  {} - {}", e.exercise_id.bold(), e.display_name);
            println!(
                "      {} angle rule(s), {} alignment rule(s)",
                e.angle_rules, e.alignment_rules
            );
        }
    }
}

impl RuleDetail {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        let rules = &self.rules;
        let detection = &rules.rep_detection;
        println!("{} ({})", rules.display_name.bold(), rules.exercise_id);
        println!(
            "  Reps: {} along {:?}, range {}, hold {} ms",
            detection.key_joint, detection.axis, detection.threshold, detection.hold_time_ms
        );

        if !rules.angle_rules.is_empty() {
            println!("\nAngle rules:");
            for r in &rules.angle_rules {
                let [a, vertex, c] = r.joints;
                println!(
                    "  [{}] {}: {a}-{vertex}-{c} in {}°-{}° ({})",
                    paint_severity(r.severity),
                    r.name,
                    r.min_degrees,
                    r.max_degrees,
                    r.phase
                );
                println!("      {}: {}", r.violation_type, r.message);
            }
        }

        if !rules.alignment_rules.is_empty() {
            println!("\nAlignment rules:");
            for r in &rules.alignment_rules {
                let points: Vec<String> = r.points.iter().map(ToString::to_string).collect();
                println!(
                    "  [{}] {}: {} {} within {}",
                    paint_severity(r.severity),
                    r.name,
                    r.alignment_type,
                    points.join("-"),
                    r.max_deviation
                );
                println!("      {}: {}", r.violation_type, r.message);
            }
        }
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => render_json(self),
        }
    }
}
