//! Domain models for repcoach
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`PoseSnapshot`] - one frame of landmarks
//! - [`JointRef`] - a rule's joint reference, resolved per side
//! - [`ExerciseFormRules`] - angle, alignment and rep-detection rules
//! - [`FormFeedback`] / [`RepAnalysis`] - what the engine produces
//! - [`Severity`] / [`Phase`] - classification tags

mod feedback;
mod joint;
mod phase;
mod pose;
mod rule;
mod severity;

pub use feedback::{FormFeedback, FormScore, FormViolation, RepAnalysis, RepCompleted};
pub use joint::{BodyPart, JointId, JointParseError, JointRef, Side};
pub use phase::{Phase, PhaseFilter};
pub use pose::{Landmark, PoseSnapshot};
pub use rule::{
    AlignmentRule, AlignmentType, AngleRule, Axis, Direction, ExerciseFormRules, RepDetectionRule,
    RuleError,
};
pub use severity::Severity;
