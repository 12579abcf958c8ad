//! Pose snapshots
//!
//! A [`PoseSnapshot`] is one frame of landmarks as delivered by the pose
//! estimator. It is immutable once built; lookups go through a per-joint
//! index table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::joint::JointId;

/// A single detected joint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Which joint this is
    pub name: JointId,
    /// Normalized X coordinate (0.0 - 1.0)
    pub x: f32,
    /// Normalized Y coordinate (0.0 - 1.0, grows downward)
    pub y: f32,
    /// Relative depth
    #[serde(default)]
    pub z: f32,
    /// Detection confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl Landmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(name: JointId, x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self {
            name,
            x,
            y,
            z,
            confidence,
        }
    }

    /// Whether the confidence reaches the threshold
    #[must_use]
    pub fn is_valid(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }

    /// 2-D position
    #[must_use]
    pub const fn point(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Serialized form of a snapshot; the lookup table is rebuilt on load
#[derive(Deserialize)]
struct SnapshotRecord {
    timestamp: DateTime<Utc>,
    landmarks: Vec<Landmark>,
}

impl From<SnapshotRecord> for PoseSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        Self::new(record.timestamp, record.landmarks)
    }
}

/// One frame of body landmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRecord")]
pub struct PoseSnapshot {
    timestamp: DateTime<Utc>,
    landmarks: Vec<Landmark>,
    overall_confidence: f32,
    #[serde(skip)]
    index: [Option<usize>; JointId::COUNT],
}

impl PoseSnapshot {
    /// Build a snapshot; the first occurrence of a joint wins on duplicates
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, landmarks: Vec<Landmark>) -> Self {
        let mut index = [None; JointId::COUNT];
        for (pos, landmark) in landmarks.iter().enumerate() {
            let slot = &mut index[landmark.name.index()];
            if slot.is_none() {
                *slot = Some(pos);
            }
        }

        let overall_confidence = if landmarks.is_empty() {
            0.0
        } else {
            let sum: f32 = landmarks.iter().map(|l| l.confidence).sum();
            #[allow(clippy::cast_precision_loss)]
            let count = landmarks.len() as f32;
            sum / count
        };

        Self {
            timestamp,
            landmarks,
            overall_confidence,
            index,
        }
    }

    /// Capture time
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Landmarks in delivery order
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Mean landmark confidence
    #[must_use]
    pub const fn overall_confidence(&self) -> f32 {
        self.overall_confidence
    }

    /// Look up a joint
    #[must_use]
    pub fn get(&self, joint: JointId) -> Option<&Landmark> {
        self.index[joint.index()].and_then(|pos| self.landmarks.get(pos))
    }

    /// Look up a joint, treating low confidence as absent
    #[must_use]
    pub fn get_confident(&self, joint: JointId, threshold: f32) -> Option<&Landmark> {
        self.get(joint).filter(|l| l.is_valid(threshold))
    }
}
