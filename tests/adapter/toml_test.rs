//! Tests for the TOML rules repository

use std::fs;
use std::path::PathBuf;

use repcoach::adapters::toml::{STARTER_RULES, TomlRulesRepository, load_file, write_starter};
use repcoach::core::models::{AlignmentType, PhaseFilter, Phase, Severity};
use repcoach::core::ports::RulesRepository;
use tempfile::TempDir;

fn write_rules(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join(".repcoach.toml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// FILE PARSING
// =============================================================================

#[test]
fn test_parse_empty_file() {
    let temp = TempDir::new().unwrap();
    let path = write_rules(&temp, "# no exercises yet\n");

    let file = load_file(&path).unwrap();
    assert!(file.exercises.is_empty());
    assert!(TomlRulesRepository::new(path).list().unwrap().is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let repo = TomlRulesRepository::new(temp.path().join("missing.toml"));
    let err = repo.list().unwrap_err();
    assert!(format!("{err:#}").contains("missing.toml"));
}

#[test]
fn test_starter_rules_load() {
    let temp = TempDir::new().unwrap();
    let path = write_rules(&temp, STARTER_RULES);
    let repo = TomlRulesRepository::new(path);

    let exercises = repo.list().unwrap();
    let ids: Vec<_> = exercises.iter().map(|e| e.exercise_id.as_str()).collect();
    assert_eq!(ids, vec!["squat", "push_up"]);

    let squat = repo.get("squat").unwrap();
    assert_eq!(squat.angle_rules[0].phase, PhaseFilter::Only(Phase::Bottom));
    assert_eq!(squat.rep_detection.hold_time_ms, 200);

    let push_up = repo.get("Push Up").unwrap();
    assert_eq!(push_up.alignment_rules[0].alignment_type, AlignmentType::Straight);
    assert_eq!(push_up.alignment_rules[0].severity, Severity::Critical);
}

#[test]
fn test_unknown_exercise() {
    let temp = TempDir::new().unwrap();
    let repo = TomlRulesRepository::new(write_rules(&temp, STARTER_RULES));
    assert!(repo.find("deadlift").unwrap().is_none());
    assert!(repo.get("deadlift").unwrap_err().to_string().contains("deadlift"));
}

// =============================================================================
// INVALID ENTRIES
// =============================================================================

const BROKEN: &str = r#"
[[exercise]]
id = "lunge"
[exercise.rep_detection]
key_joint = "LEFT_HIP"
threshold = 0.1

[[exercise.angle]]
name = "front_knee"
joints = ["LEFT_HIP", "LEFT_KNEE", "LEFT_ANKLE"]
min_degrees = 110
max_degrees = 80
violation_type = "KNEE"
message = "Bend the front knee"

[[exercise]]
id = "plank"
[exercise.rep_detection]
key_joint = "LEFT_SHOULDER"
threshold = 0.05
"#;

#[test]
fn test_invalid_entry_is_skipped_in_list() {
    let temp = TempDir::new().unwrap();
    let repo = TomlRulesRepository::new(write_rules(&temp, BROKEN));

    let exercises = repo.list().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].exercise_id, "plank");
    assert_eq!(exercises[0].display_name, "plank");
}

#[test]
fn test_invalid_entry_is_an_error_on_lookup() {
    let temp = TempDir::new().unwrap();
    let repo = TomlRulesRepository::new(write_rules(&temp, BROKEN));

    let err = repo.find("lunge").unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("lunge"));
    assert!(message.contains("min_degrees"));
}

#[test]
fn test_unknown_joint_reports_rule() {
    let temp = TempDir::new().unwrap();
    let content = BROKEN.replace("min_degrees = 110", "min_degrees = 10").replace(
        r#"["LEFT_HIP", "LEFT_KNEE", "LEFT_ANKLE"]"#,
        r#"["LEFT_HIP", "LEFT_KNEES", "LEFT_ANKLE"]"#,
    );
    let repo = TomlRulesRepository::new(write_rules(&temp, &content));

    let message = format!("{:#}", repo.find("lunge").unwrap_err());
    assert!(message.contains("front_knee"));
    assert!(message.contains("LEFT_KNEES"));
}

// =============================================================================
// STARTER FILE
// =============================================================================

#[test]
fn test_write_starter_respects_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = write_rules(&temp, "# mine\n");

    assert!(!write_starter(&path, false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    assert!(write_starter(&path, true).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), STARTER_RULES);
}
