//! Tests for JSON-lines session replay

use std::fs;
use std::io::Cursor;

use repcoach::adapters::replay::JsonlPoseSource;
use repcoach::core::models::JointId;
use repcoach::core::ports::PoseSource;
use tempfile::TempDir;

const SESSION: &str = r#"{"timestamp":"2024-05-01T10:00:00Z","landmarks":[{"name":"LEFT_HIP","x":0.4,"y":0.5,"z":0.0,"confidence":0.9},{"name":"RIGHT_HIP","x":0.6,"y":0.5,"z":0.0,"confidence":0.7}]}
{"timestamp":"2024-05-01T10:00:00.033Z","landmarks":[{"name":"LEFT_HIP","x":0.4,"y":0.52,"confidence":0.9}]}
"#;

#[test]
fn test_open_and_collect() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.jsonl");
    fs::write(&path, SESSION).unwrap();

    let mut source = JsonlPoseSource::open(&path).unwrap();
    let poses = source.collect_poses().unwrap();
    assert_eq!(poses.len(), 2);
    assert!((poses[0].overall_confidence() - 0.8).abs() < 1e-6);
    assert!((poses[1].get(JointId::LeftHip).unwrap().y - 0.52).abs() < 1e-6);
    assert!(poses[0].timestamp() < poses[1].timestamp());
}

#[test]
fn test_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = JsonlPoseSource::open(&temp.path().join("nope.jsonl")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.jsonl"));
}

#[test]
fn test_unknown_joint_fails_with_line_number() {
    let data = format!(
        "{SESSION}{}\n",
        r#"{"timestamp":"2024-05-01T10:00:00.066Z","landmarks":[{"name":"TAIL","x":0.1,"y":0.1,"confidence":0.9}]}"#
    );
    let mut source = JsonlPoseSource::from_reader(Cursor::new(data), "session.jsonl");
    let err = source.collect_poses().unwrap_err();
    assert!(err.to_string().contains("session.jsonl:3"));
}
