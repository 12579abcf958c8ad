//! TOML-based rules repository
//!
//! Implements `RulesRepository` using `.repcoach.toml` files.
//!
//! - [`parser`] - Read and deserialize .repcoach.toml files
//! - [`writer`] - Starter rules for `repcoach init`
//! - [`repository`] - `RulesRepository` implementation

pub mod parser;
pub mod repository;
pub mod writer;

pub use parser::{
    AlignmentEntry, AngleEntry, ExerciseEntry, RepDetectionEntry, RulesFile, load_file,
    parse_rules,
};
pub use repository::{TomlRulesRepository, match_exercise};
pub use writer::{STARTER_RULES, write_starter};
