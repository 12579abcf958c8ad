//! TOML parser for .repcoach.toml files
//!
//! Entries keep joint names, severities and phases as plain strings so a
//! bad value can be reported against the rule it belongs to; conversion to
//! domain rules happens in [`ExerciseEntry::to_rules`].

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::core::models::{
    AlignmentRule, AlignmentType, AngleRule, Axis, Direction, ExerciseFormRules, JointRef,
    PhaseFilter, RepDetectionRule, RuleError, Severity,
};

/// A .repcoach.toml file structure
#[derive(Debug, Default, Deserialize)]
pub struct RulesFile {
    /// Exercises in this file
    #[serde(default, rename = "exercise")]
    pub exercises: Vec<ExerciseEntry>,
}

/// An `[[exercise]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseEntry {
    /// Stable identifier
    pub id: String,

    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,

    /// Other names the exercise can be looked up by
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Rep detection settings
    pub rep_detection: RepDetectionEntry,

    /// Angle rules
    #[serde(default, rename = "angle")]
    pub angles: Vec<AngleEntry>,

    /// Alignment rules
    #[serde(default, rename = "alignment")]
    pub alignments: Vec<AlignmentEntry>,
}

/// An `[exercise.rep_detection]` table
#[derive(Debug, Clone, Deserialize)]
pub struct RepDetectionEntry {
    /// Joint name, e.g. `LEFT_HIP`
    pub key_joint: String,

    /// Tracking axis
    #[serde(default = "default_axis")]
    pub axis: Axis,

    /// Minimum range of motion
    pub threshold: f32,

    /// Movement pattern
    #[serde(default)]
    pub direction: Direction,

    /// Hold time at the top, in milliseconds
    #[serde(default)]
    pub hold_time_ms: u64,
}

/// An `[[exercise.angle]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct AngleEntry {
    /// Rule name
    pub name: String,
    /// Point, vertex, point
    pub joints: Vec<String>,
    /// Smallest allowed angle
    pub min_degrees: f32,
    /// Largest allowed angle
    pub max_degrees: f32,
    /// `all`, `top`, `bottom`, `eccentric` or `concentric`
    #[serde(default = "default_phase")]
    pub phase: String,
    /// Violation type tag
    pub violation_type: String,
    /// Correction cue
    pub message: String,
    /// `info`, `warning` or `critical`
    #[serde(default = "default_severity")]
    pub severity: String,
}

/// An `[[exercise.alignment]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct AlignmentEntry {
    /// Rule name
    pub name: String,
    /// Joint names, in order
    pub points: Vec<String>,
    /// Which check to run
    #[serde(rename = "type")]
    pub alignment_type: AlignmentType,
    /// Largest allowed deviation
    pub max_deviation: f32,
    /// Violation type tag
    pub violation_type: String,
    /// Correction cue
    pub message: String,
    /// `info`, `warning` or `critical`
    #[serde(default = "default_severity")]
    pub severity: String,
}

const fn default_axis() -> Axis {
    Axis::Y
}

fn default_phase() -> String {
    "all".to_string()
}

fn default_severity() -> String {
    "warning".to_string()
}

impl ExerciseEntry {
    /// Display name, falling back to the id
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Convert to validated domain rules
    pub fn to_rules(&self) -> Result<ExerciseFormRules, RuleError> {
        let angle_rules = self.angles.iter().map(AngleEntry::to_rule).collect::<Result<_, _>>()?;
        let alignment_rules =
            self.alignments.iter().map(AlignmentEntry::to_rule).collect::<Result<_, _>>()?;

        let detection = &self.rep_detection;
        let rules = ExerciseFormRules {
            exercise_id: self.id.clone(),
            display_name: self.display_name().to_string(),
            angle_rules,
            alignment_rules,
            rep_detection: RepDetectionRule {
                key_joint: parse_joint(&self.id, &detection.key_joint)?,
                axis: detection.axis,
                threshold: detection.threshold,
                direction: detection.direction,
                hold_time_ms: detection.hold_time_ms,
            },
        };
        rules.validate()?;
        Ok(rules)
    }
}

impl AngleEntry {
    fn to_rule(&self) -> Result<AngleRule, RuleError> {
        let joints: Vec<JointRef> =
            self.joints.iter().map(|j| parse_joint(&self.name, j)).collect::<Result<_, _>>()?;
        let found = joints.len();
        let joints: [JointRef; 3] = joints.try_into().map_err(|_| RuleError::AngleJointCount {
            rule: self.name.clone(),
            found,
        })?;

        Ok(AngleRule {
            name: self.name.clone(),
            joints,
            min_degrees: self.min_degrees,
            max_degrees: self.max_degrees,
            phase: parse_phase(&self.name, &self.phase)?,
            violation_type: self.violation_type.clone(),
            message: self.message.clone(),
            severity: parse_severity(&self.name, &self.severity)?,
        })
    }
}

impl AlignmentEntry {
    fn to_rule(&self) -> Result<AlignmentRule, RuleError> {
        Ok(AlignmentRule {
            name: self.name.clone(),
            points: self.points.iter().map(|p| parse_joint(&self.name, p)).collect::<Result<_, _>>()?,
            alignment_type: self.alignment_type,
            max_deviation: self.max_deviation,
            violation_type: self.violation_type.clone(),
            message: self.message.clone(),
            severity: parse_severity(&self.name, &self.severity)?,
        })
    }
}

fn parse_joint(rule: &str, raw: &str) -> Result<JointRef, RuleError> {
    raw.parse().map_err(|source| RuleError::UnknownJoint {
        rule: rule.to_string(),
        source,
    })
}

fn parse_phase(rule: &str, raw: &str) -> Result<PhaseFilter, RuleError> {
    raw.parse().map_err(|message| RuleError::InvalidValue {
        rule: rule.to_string(),
        message,
    })
}

fn parse_severity(rule: &str, raw: &str) -> Result<Severity, RuleError> {
    raw.parse().map_err(|message| RuleError::InvalidValue {
        rule: rule.to_string(),
        message,
    })
}

/// Parse rules file content
pub fn parse_rules(content: &str) -> anyhow::Result<RulesFile> {
    let file: RulesFile = toml::from_str(content)?;
    Ok(file)
}

/// Load a .repcoach.toml file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> anyhow::Result<RulesFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading rules {}", path.display()))?;
    parse_rules(&content).with_context(|| format!("parsing rules {}", path.display()))
}
