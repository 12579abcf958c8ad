//! 2-D geometry on normalized landmark coordinates
//!
//! Degenerate input (coincident points, zero-length vectors) yields `None`
//! rather than a made-up value, so callers can skip the measurement.

use crate::core::models::{JointId, PoseSnapshot};

/// A point in normalized image space
pub type Point = (f32, f32);

/// Vectors shorter than this are treated as zero-length
pub const MIN_VECTOR_LENGTH: f32 = 0.0001;

/// Position of a joint if present and confident enough
#[must_use]
pub fn confident_point(pose: &PoseSnapshot, joint: JointId, min_confidence: f32) -> Option<Point> {
    pose.get_confident(joint, min_confidence).map(|l| l.point())
}

/// Included angle at `vertex` between `vertex→a` and `vertex→c`, in degrees
///
/// Uses cos(θ) = (v1 · v2) / (|v1| × |v2|). Returns `None` when either
/// vector is shorter than [`MIN_VECTOR_LENGTH`].
#[must_use]
pub fn angle_degrees(a: Point, vertex: Point, c: Point) -> Option<f32> {
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (c.0 - vertex.0, c.1 - vertex.1);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if mag1 < MIN_VECTOR_LENGTH || mag2 < MIN_VECTOR_LENGTH {
        return None;
    }

    let dot = v1.0.mul_add(v2.0, v1.1 * v2.1);
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Distance along x between two points
#[must_use]
pub fn horizontal_distance(a: Point, b: Point) -> f32 {
    (a.0 - b.0).abs()
}

/// Distance along y between two points
#[must_use]
pub fn vertical_distance(a: Point, b: Point) -> f32 {
    (a.1 - b.1).abs()
}

/// How far three points bend away from a straight line, in degrees
///
/// 0° means `b` lies exactly between `a` and `c`.
#[must_use]
pub fn bend_degrees(a: Point, b: Point, c: Point) -> Option<f32> {
    angle_degrees(a, b, c).map(|angle| 180.0 - angle)
}

/// Whether three points are collinear within `tolerance_degrees`
#[must_use]
pub fn is_collinear(a: Point, b: Point, c: Point, tolerance_degrees: f32) -> Option<bool> {
    bend_degrees(a, b, c).map(|bend| bend <= tolerance_degrees)
}

/// X coordinate on the line through `from` and `to` at height `y`
///
/// `None` if the line has no vertical extent.
#[must_use]
pub fn x_on_line_at(from: Point, to: Point, y: f32) -> Option<f32> {
    let dy = to.1 - from.1;
    if dy.abs() < MIN_VECTOR_LENGTH {
        return None;
    }
    let t = (y - from.1) / dy;
    Some(t.mul_add(to.0 - from.0, from.0))
}
