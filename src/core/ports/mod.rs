//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the analysis engine and the
//! systems that feed it: where exercise rules are stored and where pose
//! frames come from.
//!
//! Implementations live in the `adapters` module.

mod pose_source;
mod rules_repo;

pub use pose_source::PoseSource;
pub use rules_repo::{ExerciseSummary, RulesRepository};
