//! Business logic services
//!
//! Pure logic that operates on domain models. Apart from the broadcast
//! channels owned by the engine, these services have no I/O: they take
//! data in and return results.
//!
//! - [`geometry`] - Angles and distances on normalized coordinates
//! - [`evaluator`] - Rule evaluation, side selection, knee-cave check
//! - [`phase`] - Movement phase tracking
//! - [`scoring`] - Frame score, text and audio cues, audio cooldown
//! - [`reps`] - Rep summaries
//! - [`history`] - Bounded buffers and rep aggregates
//! - [`events`] - Broadcast channels
//! - [`engine`] - The per-session [`FormAnalyzer`]

pub mod engine;
pub mod evaluator;
pub mod events;
pub mod geometry;
pub mod history;
pub mod phase;
pub mod reps;
pub mod scoring;

pub use engine::FormAnalyzer;
pub use evaluator::{check_alignment, check_angle, check_knee_cave, evaluate, select_side};
pub use events::EventChannel;
pub use history::{RollingBuffer, average_score, violation_frequency};
pub use phase::{Markers, PhaseTracker};
pub use reps::summarize_rep;
pub use scoring::{AudioCooldown, compute_score, synthesize};
