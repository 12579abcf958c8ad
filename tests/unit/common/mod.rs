//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing repcoach components.

use chrono::{DateTime, Utc};
use repcoach::core::models::{
    AlignmentRule, AlignmentType, AngleRule, Axis, BodyPart, Direction, ExerciseFormRules,
    FormViolation, JointId, JointRef, Landmark, Phase, PhaseFilter, PoseSnapshot,
    RepDetectionRule, Severity,
};

/// Timestamp `ms` milliseconds after the epoch
pub fn at(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

/// Builder for pose snapshots
pub struct PoseBuilder {
    timestamp: DateTime<Utc>,
    landmarks: Vec<Landmark>,
}

impl PoseBuilder {
    pub fn new(ms: i64) -> Self {
        Self {
            timestamp: at(ms),
            landmarks: Vec::new(),
        }
    }

    /// Add a joint with confidence 0.9
    pub fn joint(self, joint: JointId, x: f32, y: f32) -> Self {
        self.joint_with(joint, x, y, 0.9)
    }

    /// Add a joint with explicit confidence
    pub fn joint_with(mut self, joint: JointId, x: f32, y: f32, confidence: f32) -> Self {
        self.landmarks.push(Landmark::new(joint, x, y, 0.0, confidence));
        self
    }

    pub fn build(self) -> PoseSnapshot {
        PoseSnapshot::new(self.timestamp, self.landmarks)
    }
}

/// Left leg with the knee bent to `degrees` (hip-knee-ankle)
pub fn knee_pose(ms: i64, degrees: f32) -> PoseSnapshot {
    let (knee_x, knee_y) = (0.5_f32, 0.6_f32);
    let len = 0.25_f32;
    let theta = degrees.to_radians();
    // Ankle straight below the knee, hip rotated by `degrees` from it
    PoseBuilder::new(ms)
        .joint(JointId::LeftKnee, knee_x, knee_y)
        .joint(JointId::LeftAnkle, knee_x, knee_y + len)
        .joint(JointId::LeftHip, len.mul_add(theta.sin(), knee_x), len.mul_add(theta.cos(), knee_y))
        .build()
}

/// Figure facing the camera, both sides visible, hips at `hip_y`
///
/// Image y grows downward, so a larger `hip_y` means lower hips.
pub fn standing_pose(ms: i64, hip_y: f32) -> PoseSnapshot {
    let mut builder = PoseBuilder::new(ms);
    for (side_x, [shoulder, hip, knee, ankle]) in [
        (
            0.4,
            [JointId::LeftShoulder, JointId::LeftHip, JointId::LeftKnee, JointId::LeftAnkle],
        ),
        (
            0.6,
            [JointId::RightShoulder, JointId::RightHip, JointId::RightKnee, JointId::RightAnkle],
        ),
    ] {
        builder = builder
            .joint(shoulder, side_x + 0.05, hip_y - 0.3)
            .joint(hip, side_x, hip_y)
            .joint(knee, side_x, 0.8)
            .joint(ankle, side_x, 0.95);
    }
    builder.build()
}

/// Squat rules: knee depth at the bottom, knee over ankle
pub fn squat_rules() -> ExerciseFormRules {
    ExerciseFormRules {
        exercise_id: "squat".to_string(),
        display_name: "Squat".to_string(),
        angle_rules: vec![AngleRule {
            name: "knee_depth".to_string(),
            joints: [
                JointRef::Sided(BodyPart::Hip),
                JointRef::Sided(BodyPart::Knee),
                JointRef::Sided(BodyPart::Ankle),
            ],
            min_degrees: 70.0,
            max_degrees: 100.0,
            phase: PhaseFilter::Only(Phase::Bottom),
            violation_type: "SHALLOW_SQUAT".to_string(),
            message: "Squat deeper".to_string(),
            severity: Severity::Warning,
        }],
        alignment_rules: vec![AlignmentRule {
            name: "knee_over_ankle".to_string(),
            points: vec![JointRef::Sided(BodyPart::Knee), JointRef::Sided(BodyPart::Ankle)],
            alignment_type: AlignmentType::Vertical,
            max_deviation: 0.1,
            violation_type: "KNEES_PAST_TOES".to_string(),
            message: "Keep your knees over your ankles".to_string(),
            severity: Severity::Info,
        }],
        rep_detection: RepDetectionRule {
            key_joint: JointRef::Sided(BodyPart::Hip),
            axis: Axis::Y,
            threshold: 0.15,
            direction: Direction::DownThenUp,
            hold_time_ms: 200,
        },
    }
}

/// A bare violation of the given severity
pub fn violation(violation_type: &str, severity: Severity) -> FormViolation {
    FormViolation {
        violation_type: violation_type.to_string(),
        description: String::new(),
        correction: format!("fix {violation_type}"),
        severity,
        affected_joint: JointId::LeftKnee,
        timestamp: at(0),
    }
}
