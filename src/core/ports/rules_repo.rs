//! Rules repository port
//!
//! Defines the interface for looking up exercise rule sets.

use serde::Serialize;

use super::super::models::ExerciseFormRules;

/// Short description of one available exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseSummary {
    /// Stable identifier
    pub exercise_id: String,
    /// Human-readable name
    pub display_name: String,
    /// Number of angle rules
    pub angle_rules: usize,
    /// Number of alignment rules
    pub alignment_rules: usize,
}

impl From<&ExerciseFormRules> for ExerciseSummary {
    fn from(rules: &ExerciseFormRules) -> Self {
        Self {
            exercise_id: rules.exercise_id.clone(),
            display_name: rules.display_name.clone(),
            angle_rules: rules.angle_rules.len(),
            alignment_rules: rules.alignment_rules.len(),
        }
    }
}

/// Repository of exercise rule sets
///
/// Implementations handle loading and validating rules from various sources
/// (TOML files, built-in tables, etc.). Everything returned has passed
/// [`ExerciseFormRules::validate`].
pub trait RulesRepository: Send + Sync {
    /// Find the rules for an exercise by id or name
    ///
    /// Returns `Ok(None)` when nothing matches.
    fn find(&self, exercise: &str) -> anyhow::Result<Option<ExerciseFormRules>>;

    /// List all available exercises
    fn list(&self) -> anyhow::Result<Vec<ExerciseSummary>>;

    /// Find the rules for an exercise, failing when nothing matches
    fn get(&self, exercise: &str) -> anyhow::Result<ExerciseFormRules> {
        self.find(exercise)?
            .ok_or_else(|| anyhow::anyhow!("Unknown exercise: {exercise}"))
    }
}
