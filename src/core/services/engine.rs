//! Per-session form analysis engine
//!
//! [`FormAnalyzer`] owns every piece of mutable session state. Frames go in
//! through [`FormAnalyzer::analyze`]; feedback comes back as the return value
//! and is also broadcast, together with rep completions, to subscribers.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use tokio::sync::broadcast;

use crate::config::EngineConfig;
use crate::core::models::{
    ExerciseFormRules, FormFeedback, Phase, PoseSnapshot, RepAnalysis, RepCompleted, Side,
};

use super::evaluator::{check_knee_cave, evaluate, select_side};
use super::events::EventChannel;
use super::history::{RollingBuffer, average_score, violation_frequency};
use super::phase::PhaseTracker;
use super::reps::{REP_LOOKBACK, summarize_rep};
use super::scoring::{AudioCooldown, low_confidence_feedback, synthesize};

/// Real-time form analyzer for one exercise session
#[derive(Debug)]
pub struct FormAnalyzer {
    rules: ExerciseFormRules,
    config: EngineConfig,
    tracker: PhaseTracker,
    cooldown: AudioCooldown,
    side: Side,
    rep_count: u32,
    rep_started_at: Option<DateTime<Utc>>,
    poses: RollingBuffer<PoseSnapshot>,
    feedback: RollingBuffer<FormFeedback>,
    reps: RollingBuffer<RepAnalysis>,
    feedback_events: EventChannel<FormFeedback>,
    rep_events: EventChannel<RepCompleted>,
}

impl FormAnalyzer {
    /// Create an analyzer for the given exercise
    ///
    /// Rules are expected to have passed [`ExerciseFormRules::validate`].
    #[must_use]
    pub fn new(rules: ExerciseFormRules, config: EngineConfig) -> Self {
        Self {
            rules,
            config,
            tracker: PhaseTracker::new(),
            cooldown: AudioCooldown::new(config.feedback_cooldown_ms),
            side: Side::default(),
            rep_count: 0,
            rep_started_at: None,
            poses: RollingBuffer::new(config.history_capacity),
            feedback: RollingBuffer::new(config.history_capacity),
            reps: RollingBuffer::new(config.history_capacity),
            feedback_events: EventChannel::new(config.channel_capacity),
            rep_events: EventChannel::new(config.channel_capacity),
        }
    }

    /// Analyze one frame
    ///
    /// Never fails. A pose whose overall confidence is below the configured
    /// minimum yields a reposition prompt and leaves the session untouched.
    pub fn analyze(&mut self, pose: &PoseSnapshot) -> FormFeedback {
        let at = pose.timestamp();

        if pose.overall_confidence() < self.config.min_confidence {
            trace!(
                "frame at {at} skipped: confidence {:.2} below {:.2}",
                pose.overall_confidence(),
                self.config.min_confidence
            );
            let feedback = low_confidence_feedback(at);
            self.feedback_events.publish(feedback.clone());
            return feedback;
        }

        self.side = select_side(pose, self.side);

        let mut violations = evaluate(
            pose,
            &self.rules,
            self.tracker.phase(),
            self.side,
            self.config.min_confidence,
        );
        if self.config.knee_cave_check
            && let Some(violation) = check_knee_cave(pose, self.config.min_confidence)
        {
            violations.push(violation);
        }

        let mut feedback = synthesize(violations, pose.overall_confidence(), at);

        if let Some(position) = self.key_position(pose) {
            let detection = self.rules.rep_detection;
            self.rep_started_at.get_or_insert(at);
            self.tracker.update(position, at, detection.threshold);

            if self.tracker.is_rep_complete(at, &detection) {
                self.complete_rep(pose, &feedback, position);
            }
        }

        self.cooldown.apply(&mut feedback);

        self.poses.push(pose.clone());
        self.feedback.push(feedback.clone());
        self.feedback_events.publish(feedback.clone());

        feedback
    }

    /// Key joint position oriented for the phase tracker, if confidently visible
    fn key_position(&self, pose: &PoseSnapshot) -> Option<f32> {
        let detection = &self.rules.rep_detection;
        let joint = detection.key_joint.resolve(self.side);
        pose.get_confident(joint, self.config.min_confidence)
            .map(|landmark| detection.position(landmark))
    }

    fn complete_rep(&mut self, pose: &PoseSnapshot, current: &FormFeedback, position: f32) {
        let at = pose.timestamp();
        self.rep_count += 1;

        let duration = self
            .rep_started_at
            .and_then(|start| (at - start).to_std().ok())
            .unwrap_or(Duration::ZERO);

        let analysis = if self.feedback.is_empty() {
            summarize_rep(self.rep_count, [current], duration, at)
        } else {
            summarize_rep(self.rep_count, self.feedback.latest(REP_LOOKBACK), duration, at)
        };

        debug!(
            "rep {} of {} complete: score {:.1}, {} violation(s), {} ms",
            analysis.rep_number,
            self.rules.exercise_id,
            analysis.form_score,
            analysis.violations.len(),
            duration.as_millis()
        );

        self.reps.push(analysis.clone());
        self.rep_events.publish(RepCompleted {
            analysis,
            pose: pose.clone(),
        });

        self.tracker.seed(position);
        self.rep_started_at = Some(at);
    }

    /// Receive every feedback published from now on
    #[must_use]
    pub fn subscribe_feedback(&self) -> broadcast::Receiver<FormFeedback> {
        self.feedback_events.subscribe()
    }

    /// Receive every rep completion published from now on
    #[must_use]
    pub fn subscribe_reps(&self) -> broadcast::Receiver<RepCompleted> {
        self.rep_events.subscribe()
    }

    /// Reps completed since the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Current movement phase
    #[must_use]
    pub const fn current_phase(&self) -> Phase {
        self.tracker.phase()
    }

    /// Body side used for the last analyzed frame
    #[must_use]
    pub const fn preferred_side(&self) -> Side {
        self.side
    }

    /// Rules in use
    #[must_use]
    pub const fn rules(&self) -> &ExerciseFormRules {
        &self.rules
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Buffered rep summaries, oldest first
    #[must_use]
    pub fn rep_history(&self) -> Vec<RepAnalysis> {
        self.reps.to_vec()
    }

    /// Buffered frame feedback, oldest first
    #[must_use]
    pub fn feedback_history(&self) -> Vec<FormFeedback> {
        self.feedback.to_vec()
    }

    /// Buffered analyzed poses, oldest first
    #[must_use]
    pub fn pose_history(&self) -> Vec<PoseSnapshot> {
        self.poses.to_vec()
    }

    /// Mean score over buffered reps
    #[must_use]
    pub fn average_score(&self) -> Option<f32> {
        average_score(self.reps.iter())
    }

    /// How many buffered reps showed each violation type
    #[must_use]
    pub fn violation_frequency(&self) -> BTreeMap<String, usize> {
        violation_frequency(self.reps.iter())
    }

    /// Start a fresh session with the same rules
    ///
    /// Subscribers stay connected.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.cooldown.reset();
        self.side = Side::default();
        self.rep_count = 0;
        self.rep_started_at = None;
        self.poses.clear();
        self.feedback.clear();
        self.reps.clear();
    }

    /// Switch to another exercise and start a fresh session
    pub fn load_rules(&mut self, rules: ExerciseFormRules) {
        debug!("switching from {} to {}", self.rules.exercise_id, rules.exercise_id);
        self.rules = rules;
        self.reset();
    }
}
