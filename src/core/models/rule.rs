//! Exercise form rules
//!
//! - [`AngleRule`] - a joint-triple angle must stay inside a range
//! - [`AlignmentRule`] - joints must line up vertically, horizontally or straight
//! - [`RepDetectionRule`] - which joint and axis drive rep counting
//!
//! Rules are validated once when loaded ([`ExerciseFormRules::validate`]);
//! the per-frame evaluator trusts them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::joint::{JointParseError, JointRef};
use super::phase::PhaseFilter;
use super::pose::Landmark;
use super::severity::Severity;

/// Errors found while loading or validating rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// A joint name could not be parsed
    #[error("rule '{rule}': {source}")]
    UnknownJoint {
        /// Rule name
        rule: String,
        /// Underlying parse error
        source: JointParseError,
    },

    /// An angle rule does not have exactly three joints
    #[error("rule '{rule}': angle rules need exactly 3 joints, found {found}")]
    AngleJointCount {
        /// Rule name
        rule: String,
        /// Number of joints given
        found: usize,
    },

    /// `min_degrees` is above `max_degrees`
    #[error("rule '{rule}': min_degrees {min} is greater than max_degrees {max}")]
    InvertedRange {
        /// Rule name
        rule: String,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },

    /// An alignment rule has too few points for its type
    #[error("rule '{rule}': {alignment} alignment needs at least {needed} points, found {found}")]
    AlignmentPointCount {
        /// Rule name
        rule: String,
        /// Alignment type
        alignment: AlignmentType,
        /// Minimum number of points
        needed: usize,
        /// Number of points given
        found: usize,
    },

    /// A numeric field is negative, zero or not finite where that is not allowed
    #[error("rule '{rule}': invalid {field}: {value}")]
    InvalidNumber {
        /// Rule name
        rule: String,
        /// Field name
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// A text field holds an unknown value (severity, phase, ...)
    #[error("rule '{rule}': {message}")]
    InvalidValue {
        /// Rule name
        rule: String,
        /// What was wrong
        message: String,
    },
}

/// Constraint on the angle at the middle of three joints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleRule {
    /// Rule name, used in logs and errors
    pub name: String,
    /// Point, vertex, point
    pub joints: [JointRef; 3],
    /// Smallest allowed angle in degrees
    pub min_degrees: f32,
    /// Largest allowed angle in degrees
    pub max_degrees: f32,
    /// Phases the rule is checked in
    #[serde(serialize_with = "serialize_display")]
    pub phase: PhaseFilter,
    /// Violation type tag, e.g. `SHALLOW_SQUAT`
    pub violation_type: String,
    /// Correction cue shown to the user
    pub message: String,
    /// How serious a violation is
    pub severity: Severity,
}

/// Kind of alignment check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentType {
    /// Points share an x coordinate (stacked on top of each other)
    Vertical,
    /// Points share a y coordinate (level)
    Horizontal,
    /// Three points lie on one line
    Straight,
    /// Reserved; never reports a violation
    Parallel,
}

impl AlignmentType {
    /// Number of points the check reads
    #[must_use]
    pub const fn required_points(self) -> usize {
        match self {
            Self::Vertical | Self::Horizontal => 2,
            Self::Straight => 3,
            Self::Parallel => 0,
        }
    }
}

impl std::fmt::Display for AlignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
            Self::Straight => write!(f, "straight"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Constraint on the relative position of joints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentRule {
    /// Rule name, used in logs and errors
    pub name: String,
    /// Joints taking part, in order
    pub points: Vec<JointRef>,
    /// Which check to run
    pub alignment_type: AlignmentType,
    /// Largest allowed deviation in normalized coordinates
    pub max_deviation: f32,
    /// Violation type tag
    pub violation_type: String,
    /// Correction cue shown to the user
    pub message: String,
    /// How serious a violation is
    pub severity: Severity,
}

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
    /// Depth
    Z,
}

impl Axis {
    /// The landmark coordinate along this axis, larger meaning higher
    ///
    /// Image-space Y grows downward, so it is negated. X and Z are taken
    /// as they come from the pose estimator.
    #[must_use]
    pub const fn upward(self, landmark: &Landmark) -> f32 {
        match self {
            Self::X => landmark.x,
            Self::Y => -landmark.y,
            Self::Z => landmark.z,
        }
    }
}

/// Movement pattern of one repetition
///
/// Decides the sign of the tracked position (see
/// [`RepDetectionRule::position`]); the phase tracker itself does not look
/// at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Lower first, then rise (squat, push-up)
    #[default]
    DownThenUp,
    /// Rise first, then lower (pull-up, overhead press)
    UpThenDown,
}

/// How repetitions are detected for an exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepDetectionRule {
    /// Joint whose position drives the phase tracker
    pub key_joint: JointRef,
    /// Axis the joint is tracked along
    pub axis: Axis,
    /// Minimum range of motion for a rep
    pub threshold: f32,
    /// Movement pattern
    pub direction: Direction,
    /// How long the top position must be held, in milliseconds
    pub hold_time_ms: u64,
}

impl RepDetectionRule {
    /// Key joint position as seen by the phase tracker
    ///
    /// Oriented so the resting position is the high end and the first half
    /// of a rep moves toward lower values: a squatter's hips and a pull-up's
    /// shoulders both start at `Top` and turn around at `Bottom`.
    #[must_use]
    pub const fn position(&self, landmark: &Landmark) -> f32 {
        let upward = self.axis.upward(landmark);
        match self.direction {
            Direction::DownThenUp => upward,
            Direction::UpThenDown => -upward,
        }
    }
}

/// Everything the engine needs to coach one exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseFormRules {
    /// Stable identifier, e.g. `squat`
    pub exercise_id: String,
    /// Human-readable name
    pub display_name: String,
    /// Angle constraints
    pub angle_rules: Vec<AngleRule>,
    /// Alignment constraints
    pub alignment_rules: Vec<AlignmentRule>,
    /// Rep detection settings
    pub rep_detection: RepDetectionRule,
}

impl ExerciseFormRules {
    /// Check rule invariants
    ///
    /// Called once at load time so that `analyze` never has to.
    pub fn validate(&self) -> Result<(), RuleError> {
        for rule in &self.angle_rules {
            check_finite(&rule.name, "min_degrees", rule.min_degrees)?;
            check_finite(&rule.name, "max_degrees", rule.max_degrees)?;
            if rule.min_degrees > rule.max_degrees {
                return Err(RuleError::InvertedRange {
                    rule: rule.name.clone(),
                    min: rule.min_degrees,
                    max: rule.max_degrees,
                });
            }
        }

        for rule in &self.alignment_rules {
            let needed = rule.alignment_type.required_points();
            if rule.points.len() < needed {
                return Err(RuleError::AlignmentPointCount {
                    rule: rule.name.clone(),
                    alignment: rule.alignment_type,
                    needed,
                    found: rule.points.len(),
                });
            }
            check_finite(&rule.name, "max_deviation", rule.max_deviation)?;
            if rule.max_deviation < 0.0 {
                return Err(RuleError::InvalidNumber {
                    rule: rule.name.clone(),
                    field: "max_deviation",
                    value: rule.max_deviation,
                });
            }
        }

        let threshold = self.rep_detection.threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(RuleError::InvalidNumber {
                rule: format!("{}.rep_detection", self.exercise_id),
                field: "threshold",
                value: threshold,
            });
        }

        Ok(())
    }
}

fn check_finite(rule: &str, field: &'static str, value: f32) -> Result<(), RuleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RuleError::InvalidNumber {
            rule: rule.to_string(),
            field,
            value,
        })
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
