//! Tests for configuration management

use std::fs;

use repcoach::config::{Config, EngineConfig};
use tempfile::TempDir;

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_engine_defaults() {
    let config = EngineConfig::default();
    assert!((config.min_confidence - 0.5).abs() < f32::EPSILON);
    assert_eq!(config.feedback_cooldown_ms, 3000);
    assert_eq!(config.history_capacity, 100);
    assert_eq!(config.channel_capacity, 64);
    assert!(config.knee_cave_check);
}

// =============================================================================
// FILE LOADING
// =============================================================================

#[test]
fn test_partial_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[engine]\nfeedback_cooldown_ms = 1500\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.engine.feedback_cooldown_ms, 1500);
    assert_eq!(config.engine.history_capacity, 100);
    assert!(config.rules.path.is_none());
}

#[test]
fn test_empty_file_is_all_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.engine, EngineConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[engine]\nmin_confidence = \"high\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"));
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/config.toml");

    let mut config = Config::default();
    config.engine.knee_cave_check = false;
    config.engine.min_confidence = 0.65;
    config.rules.path = Some("rules/gym.toml".into());
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.engine, config.engine);
    assert_eq!(loaded.rules.path, config.rules.path);
}
