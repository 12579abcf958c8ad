//! Tests for rule evaluation and the knee-cave check

use repcoach::core::models::{
    AlignmentRule, AlignmentType, BodyPart, JointId, JointRef, Phase, PoseSnapshot, Severity,
    Side,
};
use repcoach::core::services::{check_alignment, check_knee_cave, evaluate, select_side};
use test_case::test_case;

use super::common::{PoseBuilder, knee_pose, squat_rules};

// =============================================================================
// SQUAT KNEE DEPTH
// =============================================================================

#[test]
fn test_knee_in_range_has_no_violation() {
    let violations = evaluate(&knee_pose(0, 95.0), &squat_rules(), Phase::Bottom, Side::Left, 0.5);
    assert!(violations.iter().all(|v| v.violation_type != "SHALLOW_SQUAT"));
}

#[test]
fn test_shallow_knee_is_flagged() {
    let violations =
        evaluate(&knee_pose(0, 110.0), &squat_rules(), Phase::Bottom, Side::Left, 0.5);
    let shallow = violations.iter().find(|v| v.violation_type == "SHALLOW_SQUAT").unwrap();
    assert_eq!(shallow.severity, Severity::Warning);
    assert_eq!(shallow.correction, "Squat deeper");
    assert_eq!(shallow.affected_joint, JointId::LeftKnee);
    assert!(shallow.description.contains("110"));
}

#[test]
fn test_phase_filter_skips_rule() {
    let violations = evaluate(&knee_pose(0, 110.0), &squat_rules(), Phase::Top, Side::Left, 0.5);
    assert!(violations.is_empty());
}

#[test]
fn test_low_confidence_joint_skips_rule() {
    let pose = PoseBuilder::new(0)
        .joint(JointId::LeftKnee, 0.5, 0.6)
        .joint(JointId::LeftAnkle, 0.5, 0.85)
        .joint_with(JointId::LeftHip, 0.75, 0.6, 0.2)
        .build();
    let violations = evaluate(&pose, &squat_rules(), Phase::Bottom, Side::Left, 0.5);
    assert!(violations.is_empty());
}

#[test]
fn test_rules_follow_the_selected_side() {
    // Only the right leg is visible, and it is bent too little
    let pose = PoseBuilder::new(0)
        .joint(JointId::RightKnee, 0.5, 0.6)
        .joint(JointId::RightAnkle, 0.5, 0.85)
        .joint(JointId::RightHip, 0.5, 0.35)
        .build();
    let side = select_side(&pose, Side::Left);
    assert_eq!(side, Side::Right);
    let violations = evaluate(&pose, &squat_rules(), Phase::Bottom, side, 0.5);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].affected_joint, JointId::RightKnee);
}

#[test]
fn test_vertical_alignment_violation() {
    let pose = PoseBuilder::new(0)
        .joint(JointId::LeftKnee, 0.7, 0.6)
        .joint(JointId::LeftAnkle, 0.5, 0.85)
        .build();
    let violations = evaluate(&pose, &squat_rules(), Phase::Top, Side::Left, 0.5);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].violation_type, "KNEES_PAST_TOES");
    assert_eq!(violations[0].severity, Severity::Info);
}

fn alignment(
    alignment_type: AlignmentType,
    points: Vec<JointRef>,
    max_deviation: f32,
) -> AlignmentRule {
    AlignmentRule {
        name: "line".to_string(),
        points,
        alignment_type,
        max_deviation,
        violation_type: "OUT_OF_LINE".to_string(),
        message: "Line it up".to_string(),
        severity: Severity::Warning,
    }
}

/// Plank seen side-on with the hips `sag` below the shoulder-ankle line
fn plank(sag: f32) -> PoseSnapshot {
    PoseBuilder::new(0)
        .joint(JointId::LeftShoulder, 0.2, 0.5)
        .joint(JointId::LeftHip, 0.5, 0.5 + sag)
        .joint(JointId::LeftAnkle, 0.8, 0.5)
        .build()
}

// A sag of 0.02 bends the body about 7.6 degrees, 0.05 about 18.9 degrees
#[test_case(0.02, 0.1, false ; "slight sag within ten degrees")]
#[test_case(0.02, 0.05, true ; "slight sag past five degrees")]
#[test_case(0.05, 0.15, true ; "deep sag past fifteen degrees")]
#[test_case(0.0, 0.01, false ; "flat body")]
fn test_straight_alignment(sag: f32, max_deviation: f32, violated: bool) {
    let rule = alignment(
        AlignmentType::Straight,
        vec![
            JointRef::Sided(BodyPart::Shoulder),
            JointRef::Sided(BodyPart::Hip),
            JointRef::Sided(BodyPart::Ankle),
        ],
        max_deviation,
    );
    let violation = check_alignment(&plank(sag), &rule, Side::Left, 0.5);
    assert_eq!(violation.is_some(), violated);
    if let Some(v) = violation {
        assert_eq!(v.affected_joint, JointId::LeftHip);
        assert_eq!(v.correction, "Line it up");
    }
}

#[test_case(0.08, true ; "tilted shoulders")]
#[test_case(0.03, false ; "nearly level shoulders")]
fn test_horizontal_alignment(drop: f32, violated: bool) {
    let pose = PoseBuilder::new(0)
        .joint(JointId::LeftShoulder, 0.4, 0.3)
        .joint(JointId::RightShoulder, 0.6, 0.3 + drop)
        .build();
    let rule = alignment(
        AlignmentType::Horizontal,
        vec![JointRef::Sided(BodyPart::Shoulder), JointRef::Fixed(JointId::RightShoulder)],
        0.05,
    );
    let violation = check_alignment(&pose, &rule, Side::Left, 0.5);
    assert_eq!(violation.is_some(), violated);
    if let Some(v) = violation {
        assert_eq!(v.affected_joint, JointId::LeftShoulder);
    }
}

// =============================================================================
// SIDE SELECTION
// =============================================================================

#[test]
fn test_side_tie_keeps_previous() {
    let pose = PoseBuilder::new(0)
        .joint(JointId::LeftHip, 0.4, 0.5)
        .joint(JointId::RightHip, 0.6, 0.5)
        .build();
    assert_eq!(select_side(&pose, Side::Left), Side::Left);
    assert_eq!(select_side(&pose, Side::Right), Side::Right);
}

// =============================================================================
// KNEE CAVE
// =============================================================================

fn legs(left_knee_x: f32, right_knee_x: f32) -> PoseBuilder {
    PoseBuilder::new(0)
        .joint(JointId::LeftHip, 0.4, 0.5)
        .joint(JointId::RightHip, 0.6, 0.5)
        .joint(JointId::LeftKnee, left_knee_x, 0.7)
        .joint(JointId::RightKnee, right_knee_x, 0.7)
        .joint(JointId::LeftAnkle, 0.4, 0.9)
        .joint(JointId::RightAnkle, 0.6, 0.9)
}

#[test]
fn test_straight_legs_do_not_cave() {
    assert!(check_knee_cave(&legs(0.4, 0.6).build(), 0.5).is_none());
}

#[test]
fn test_knee_cave_is_critical() {
    // Left knee 0.06 toward the midline on a 0.2 hip width
    let violation = check_knee_cave(&legs(0.46, 0.6).build(), 0.5).unwrap();
    assert_eq!(violation.violation_type, "KNEE_CAVE");
    assert_eq!(violation.severity, Severity::Critical);
    assert_eq!(violation.affected_joint, JointId::LeftKnee);
}

#[test]
fn test_knee_cave_skipped_side_on() {
    let pose = PoseBuilder::new(0)
        .joint(JointId::LeftHip, 0.5, 0.5)
        .joint(JointId::RightHip, 0.52, 0.5)
        .joint(JointId::LeftKnee, 0.6, 0.7)
        .joint(JointId::RightKnee, 0.6, 0.7)
        .joint(JointId::LeftAnkle, 0.5, 0.9)
        .joint(JointId::RightAnkle, 0.52, 0.9)
        .build();
    assert!(check_knee_cave(&pose, 0.5).is_none());
}

#[test]
fn test_knee_cave_needs_all_six_joints() {
    assert!(check_knee_cave(&legs(0.5, 0.5).build(), 0.5).is_some());

    let without_ankle = PoseBuilder::new(0)
        .joint(JointId::LeftHip, 0.4, 0.5)
        .joint(JointId::RightHip, 0.6, 0.5)
        .joint(JointId::LeftKnee, 0.5, 0.7)
        .joint(JointId::RightKnee, 0.5, 0.7)
        .joint(JointId::RightAnkle, 0.6, 0.9)
        .build();
    assert!(check_knee_cave(&without_ankle, 0.5).is_none());
}
