//! Rule evaluation - checks one pose against an exercise's rules
//!
//! Every check degrades silently: a rule whose landmarks are missing, too
//! uncertain, or geometrically degenerate is skipped for the frame instead of
//! reporting an error.

use log::trace;

use crate::core::models::{
    AlignmentRule, AlignmentType, AngleRule, BodyPart, ExerciseFormRules, FormViolation, JointId,
    Phase, PoseSnapshot, Severity, Side,
};

use super::geometry::{
    Point, angle_degrees, bend_degrees, confident_point, horizontal_distance, is_collinear,
    vertical_distance, x_on_line_at,
};

/// Degrees of allowed bend per unit of normalized `max_deviation` in
/// `straight` alignment rules. Uncalibrated; tune against recorded reps.
pub const STRAIGHTNESS_DEGREES_PER_UNIT: f32 = 100.0;

/// Violation type raised by the knee-cave check
pub const KNEE_CAVE: &str = "KNEE_CAVE";

/// Inward knee drift, as a fraction of hip width, that counts as caving
pub const KNEE_CAVE_RATIO: f32 = 0.2;

/// Below this hip width the camera is side-on and knee cave can't be judged
pub const MIN_HIP_WIDTH: f32 = 0.05;

/// Confidence sums closer than this are a tie
const SIDE_TIE_EPSILON: f32 = 1e-6;

/// Pick the better-visible body side
///
/// Sums limb confidences per side. A tie keeps `previous` so the choice does
/// not flip back and forth between frames.
#[must_use]
pub fn select_side(pose: &PoseSnapshot, previous: Side) -> Side {
    let total = |side: Side| -> f32 {
        BodyPart::LIMBS
            .iter()
            .filter_map(|part| pose.get(part.on(side)))
            .map(|l| l.confidence)
            .sum()
    };

    let left = total(Side::Left);
    let right = total(Side::Right);
    if (left - right).abs() <= SIDE_TIE_EPSILON {
        previous
    } else if left > right {
        Side::Left
    } else {
        Side::Right
    }
}

/// Evaluate all angle and alignment rules for one frame
#[must_use]
pub fn evaluate(
    pose: &PoseSnapshot,
    rules: &ExerciseFormRules,
    phase: Phase,
    side: Side,
    min_confidence: f32,
) -> Vec<FormViolation> {
    let angle = rules
        .angle_rules
        .iter()
        .filter(|rule| rule.phase.matches(phase))
        .filter_map(|rule| check_angle(pose, rule, side, min_confidence));

    let alignment = rules
        .alignment_rules
        .iter()
        .filter_map(|rule| check_alignment(pose, rule, side, min_confidence));

    angle.chain(alignment).collect()
}

/// Evaluate a single angle rule
#[must_use]
pub fn check_angle(
    pose: &PoseSnapshot,
    rule: &AngleRule,
    side: Side,
    min_confidence: f32,
) -> Option<FormViolation> {
    let [a, vertex, c] = rule.joints.map(|j| j.resolve(side));
    let Some(points) = resolve_points(pose, &[a, vertex, c], min_confidence) else {
        trace!("angle rule '{}' skipped: landmarks unavailable", rule.name);
        return None;
    };

    let Some(angle) = angle_degrees(points[0], points[1], points[2]) else {
        trace!("angle rule '{}' skipped: degenerate geometry", rule.name);
        return None;
    };

    if (rule.min_degrees..=rule.max_degrees).contains(&angle) {
        return None;
    }

    Some(FormViolation {
        violation_type: rule.violation_type.clone(),
        description: format!(
            "{} angle {angle:.0}° outside {:.0}°-{:.0}°",
            rule.name, rule.min_degrees, rule.max_degrees
        ),
        correction: rule.message.clone(),
        severity: rule.severity,
        affected_joint: vertex,
        timestamp: pose.timestamp(),
    })
}

/// Evaluate a single alignment rule
#[must_use]
pub fn check_alignment(
    pose: &PoseSnapshot,
    rule: &AlignmentRule,
    side: Side,
    min_confidence: f32,
) -> Option<FormViolation> {
    let needed = rule.alignment_type.required_points();
    if needed == 0 || rule.points.len() < needed {
        return None;
    }

    let joints: Vec<JointId> = rule.points[..needed].iter().map(|j| j.resolve(side)).collect();
    let Some(points) = resolve_points(pose, &joints, min_confidence) else {
        trace!("alignment rule '{}' skipped: landmarks unavailable", rule.name);
        return None;
    };

    let (deviation, limit, affected) = match rule.alignment_type {
        AlignmentType::Vertical => {
            (horizontal_distance(points[0], points[1]), rule.max_deviation, joints[0])
        },
        AlignmentType::Horizontal => {
            (vertical_distance(points[0], points[1]), rule.max_deviation, joints[0])
        },
        AlignmentType::Straight => {
            let limit = rule.max_deviation * STRAIGHTNESS_DEGREES_PER_UNIT;
            if is_collinear(points[0], points[1], points[2], limit)? {
                return None;
            }
            let bend = bend_degrees(points[0], points[1], points[2])?;
            (bend, limit, joints[1])
        },
        AlignmentType::Parallel => return None,
    };

    if deviation <= limit {
        return None;
    }

    Some(FormViolation {
        violation_type: rule.violation_type.clone(),
        description: format!(
            "{} {} deviation {deviation:.2} exceeds {limit:.2}",
            rule.name, rule.alignment_type
        ),
        correction: rule.message.clone(),
        severity: rule.severity,
        affected_joint: affected,
        timestamp: pose.timestamp(),
    })
}

/// Exercise-agnostic safety check for knees collapsing inward
///
/// No fixed angle range expresses this during a moving lift, so it runs on
/// top of the rule set. For each leg the knee is compared with where it would
/// sit on the hip→ankle line; drifting toward the hip midline by more than
/// [`KNEE_CAVE_RATIO`] of hip width is a `Critical` violation.
#[must_use]
pub fn check_knee_cave(pose: &PoseSnapshot, min_confidence: f32) -> Option<FormViolation> {
    let hip = |side| confident_point(pose, BodyPart::Hip.on(side), min_confidence);
    let (left_hip, right_hip) = (hip(Side::Left)?, hip(Side::Right)?);

    let hip_width = horizontal_distance(left_hip, right_hip);
    if hip_width < MIN_HIP_WIDTH {
        return None;
    }
    let mid_x = (left_hip.0 + right_hip.0) / 2.0;

    let inward_ratio = |side: Side, hip: Point| -> Option<f32> {
        let knee = confident_point(pose, BodyPart::Knee.on(side), min_confidence)?;
        let ankle = confident_point(pose, BodyPart::Ankle.on(side), min_confidence)?;
        let expected_x = x_on_line_at(hip, ankle, knee.1)?;
        let inward = (expected_x - mid_x).abs() - (knee.0 - mid_x).abs();
        Some(inward / hip_width)
    };

    let left = inward_ratio(Side::Left, left_hip)?;
    let right = inward_ratio(Side::Right, right_hip)?;
    let (worst_side, worst) = if left >= right { (Side::Left, left) } else { (Side::Right, right) };

    if worst <= KNEE_CAVE_RATIO {
        return None;
    }

    Some(FormViolation {
        violation_type: KNEE_CAVE.to_string(),
        description: format!(
            "{worst_side} knee drifts inward by {:.0}% of hip width",
            worst * 100.0
        ),
        correction: "Push your knees out over your toes".to_string(),
        severity: Severity::Critical,
        affected_joint: BodyPart::Knee.on(worst_side),
        timestamp: pose.timestamp(),
    })
}

/// Positions of all joints, or `None` if any is missing or uncertain
fn resolve_points(pose: &PoseSnapshot, joints: &[JointId], min_confidence: f32) -> Option<Vec<Point>> {
    joints.iter().map(|&j| confident_point(pose, j, min_confidence)).collect()
}
