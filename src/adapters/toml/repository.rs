//! TOML-based rules repository
//!
//! Implements the `RulesRepository` port trait using a .repcoach.toml file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};

use crate::core::models::ExerciseFormRules;
use crate::core::ports::{ExerciseSummary, RulesRepository};

use super::parser::{ExerciseEntry, load_file};

/// Rules repository backed by one .repcoach.toml file
#[derive(Debug, Clone)]
pub struct TomlRulesRepository {
    path: PathBuf,
}

impl TomlRulesRepository {
    /// Create a repository reading the given file
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The rules file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RulesRepository for TomlRulesRepository {
    fn find(&self, exercise: &str) -> anyhow::Result<Option<ExerciseFormRules>> {
        let file = load_file(&self.path)?;
        let Some(entry) = match_exercise(&file.exercises, exercise) else {
            return Ok(None);
        };

        let rules = entry
            .to_rules()
            .with_context(|| format!("exercise '{}' in {}", entry.id, self.path.display()))?;
        debug!(
            "loaded {} ({} angle, {} alignment rules) from {}",
            rules.exercise_id,
            rules.angle_rules.len(),
            rules.alignment_rules.len(),
            self.path.display()
        );
        Ok(Some(rules))
    }

    fn list(&self) -> anyhow::Result<Vec<ExerciseSummary>> {
        let file = load_file(&self.path)?;
        let mut summaries = Vec::new();

        for entry in &file.exercises {
            match entry.to_rules() {
                Ok(rules) => summaries.push(ExerciseSummary::from(&rules)),
                Err(e) => warn!("skipping exercise '{}': {e}", entry.id),
            }
        }

        Ok(summaries)
    }
}

/// Lowercase and drop spaces, `-` and `_`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pick the entry a user-supplied exercise name refers to
///
/// Tries, in order: exact id; normalized id, name or alias; a unique entry
/// whose normalized names start with or contain the query.
#[must_use]
pub fn match_exercise<'a>(entries: &'a [ExerciseEntry], query: &str) -> Option<&'a ExerciseEntry> {
    if let Some(entry) = entries.iter().find(|e| e.id == query) {
        return Some(entry);
    }

    let wanted = normalize(query);
    if wanted.is_empty() {
        return None;
    }

    let names = |e: &ExerciseEntry| -> Vec<String> {
        std::iter::once(e.id.as_str())
            .chain(e.name.as_deref())
            .chain(e.aliases.iter().map(String::as_str))
            .map(normalize)
            .collect()
    };

    if let Some(entry) = entries.iter().find(|e| names(e).contains(&wanted)) {
        return Some(entry);
    }

    let partial: Vec<&ExerciseEntry> =
        entries.iter().filter(|e| names(e).iter().any(|n| n.contains(&wanted))).collect();
    match partial.as_slice() {
        [only] => Some(*only),
        [] => None,
        _ => {
            debug!("'{query}' is ambiguous between {} exercises", partial.len());
            None
        },
    }
}
