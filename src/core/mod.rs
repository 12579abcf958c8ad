//! Core domain logic for repcoach
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (poses, rules, feedback, severity, phase)
//! - `services/` - Geometry, rule evaluation, phase tracking, scoring, history,
//!   and the [`FormAnalyzer`](services::FormAnalyzer) that runs them per frame
//! - `ports/` - Trait definitions for the pose source and rules repository

pub mod models;
pub mod ports;
pub mod services;
