//! Movement phase tracking
//!
//! The tracker follows one scalar position (the key joint as oriented by
//! [`RepDetectionRule::position`]) and re-classifies the phase every frame from the running extremes.
//! There is no transition table: the phase may revisit `Top` or `Bottom` as
//! often as the signal does, and no phase is terminal.

use chrono::{DateTime, Utc};

use crate::core::models::{Phase, RepDetectionRule};

/// Fraction of the rep threshold that counts as "at" the top or bottom.
/// Uncalibrated; tune against recorded reps.
pub const PHASE_PROXIMITY_FACTOR: f32 = 0.5;

/// Reference positions for phase classification
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Markers {
    /// No frame seen since the last reset
    #[default]
    Unseeded,
    /// Running extremes since the last seed
    Seeded {
        /// Position when the current rep started
        start: f32,
        /// Highest position seen
        top: f32,
        /// Lowest position seen
        bottom: f32,
    },
}

impl Markers {
    /// Distance between the extremes
    #[must_use]
    pub fn range(&self) -> f32 {
        match *self {
            Self::Unseeded => 0.0,
            Self::Seeded { top, bottom, .. } => (top - bottom).abs(),
        }
    }
}

/// Phase state machine for one session
#[allow(missing_copy_implementations)]
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    markers: Markers,
    phase: Phase,
    phase_entered_at: Option<DateTime<Utc>>,
}

impl PhaseTracker {
    /// Create an unseeded tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current markers
    #[must_use]
    pub const fn markers(&self) -> Markers {
        self.markers
    }

    /// When the current phase began
    #[must_use]
    pub const fn phase_entered_at(&self) -> Option<DateTime<Utc>> {
        self.phase_entered_at
    }

    /// Feed one position and return the resulting phase
    ///
    /// The first position only seeds the markers; the phase stays at its
    /// default until the next frame.
    pub fn update(&mut self, position: f32, at: DateTime<Utc>, threshold: f32) -> Phase {
        let Markers::Seeded { start, top, bottom } = &mut self.markers else {
            self.seed(position);
            self.phase_entered_at = Some(at);
            return self.phase;
        };

        *bottom = bottom.min(position);
        *top = top.max(position);

        let proximity = threshold * PHASE_PROXIMITY_FACTOR;
        let dist_from_top = (position - *top).abs();
        let dist_from_bottom = (position - *bottom).abs();

        let next = if dist_from_bottom < proximity {
            Phase::Bottom
        } else if dist_from_top < proximity {
            Phase::Top
        } else if position < *start {
            Phase::Eccentric
        } else {
            Phase::Concentric
        };

        if next != self.phase {
            self.phase = next;
            self.phase_entered_at = Some(at);
        }
        self.phase
    }

    /// Whether the current frame completes a repetition
    ///
    /// Requires the phase to have been `Top` for at least the hold time and
    /// the observed range of motion to reach the threshold.
    #[must_use]
    pub fn is_rep_complete(&self, at: DateTime<Utc>, rule: &RepDetectionRule) -> bool {
        if self.phase != Phase::Top {
            return false;
        }
        let Some(entered) = self.phase_entered_at else {
            return false;
        };
        let held_ms = (at - entered).num_milliseconds();
        let hold_ms = i64::try_from(rule.hold_time_ms).unwrap_or(i64::MAX);

        held_ms >= hold_ms && self.markers.range() >= rule.threshold
    }

    /// Restart all markers at `position`, keeping the phase
    pub fn seed(&mut self, position: f32) {
        self.markers = Markers::Seeded {
            start: position,
            top: position,
            bottom: position,
        };
    }

    /// Forget everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
