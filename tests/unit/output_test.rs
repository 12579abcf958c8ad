//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;
use std::time::Duration;

use repcoach::core::models::{RepAnalysis, Severity};
use repcoach::core::ports::ExerciseSummary;
use repcoach::output::{OperationResult, OutputMode, RuleDetail, RulesListResult, SessionReport};

use super::common::{at, squat_rules, violation};

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// Serialization Tests
// =============================================================================

fn report() -> SessionReport {
    SessionReport {
        exercise_id: "squat".to_string(),
        display_name: "Squat".to_string(),
        frames: 40,
        low_confidence_frames: 2,
        audio_cues: vec!["Squat deeper".to_string()],
        reps: vec![RepAnalysis {
            rep_number: 1,
            form_score: 92.5,
            duration: Duration::from_millis(1800),
            violations: vec![violation("SHALLOW_SQUAT", Severity::Warning)],
            timestamp: at(1800),
        }],
        average_score: Some(92.5),
        violation_frequency: BTreeMap::from([("SHALLOW_SQUAT".to_string(), 1)]),
    }
}

#[test]
fn session_report_serialization() {
    let json = serde_json::to_value(report()).unwrap();
    assert_eq!(json["frames"], 40);
    assert_eq!(json["reps"][0]["duration_ms"], 1800);
    assert_eq!(json["reps"][0]["violations"][0]["severity"], "warning");
    assert_eq!(json["reps"][0]["violations"][0]["affected_joint"], "LEFT_KNEE");
    assert_eq!(json["violation_frequency"]["SHALLOW_SQUAT"], 1);
}

#[test]
fn rule_detail_serialization() {
    let detail = RuleDetail {
        source: ".repcoach.toml".to_string(),
        rules: squat_rules(),
    };
    let json = serde_json::to_value(&detail).unwrap();
    let angle = &json["rules"]["angle_rules"][0];
    assert_eq!(angle["joints"][1], "LEFT_KNEE");
    assert_eq!(angle["phase"], "bottom");
    assert_eq!(json["rules"]["rep_detection"]["axis"], "y");
    assert_eq!(json["rules"]["rep_detection"]["direction"], "down_then_up");
}

#[test]
fn rules_list_serialization() {
    let result = RulesListResult {
        source: ".repcoach.toml".to_string(),
        exercises: vec![ExerciseSummary::from(&squat_rules())],
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"exercise_id\":\"squat\""));
    assert!(json.contains("\"angle_rules\":1"));
}

#[test]
fn operation_result_serialization() {
    let result = OperationResult {
        success: true,
        message: "Created .repcoach.toml".to_string(),
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"success\":true"));
}

#[test]
fn render_does_not_panic() {
    report().render(OutputMode::Human);
    report().render(OutputMode::Json);
}
