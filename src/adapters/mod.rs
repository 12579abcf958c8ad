//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `toml/` - `.repcoach.toml` rules parsing and lookup
//! - `replay/` - JSON-lines recorded session replay

pub mod replay;
pub mod toml;
