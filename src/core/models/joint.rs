//! Joint identifiers and side-parameterized joint references
//!
//! Rule files name joints the way pose models do (`LEFT_KNEE`, `NOSE`).
//! A `LEFT_*` name inside a rule is a placeholder for "the preferred side",
//! which is resolved per frame with [`JointRef::resolve`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a joint name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown joint: {0}")]
pub struct JointParseError(pub String);

/// Body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Subject's left
    #[default]
    Left,
    /// Subject's right
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A body part that exists once per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    /// Inner eye corner
    EyeInner,
    /// Eye center
    Eye,
    /// Outer eye corner
    EyeOuter,
    /// Ear
    Ear,
    /// Mouth corner
    Mouth,
    /// Shoulder
    Shoulder,
    /// Elbow
    Elbow,
    /// Wrist
    Wrist,
    /// Pinky knuckle
    Pinky,
    /// Index knuckle
    Index,
    /// Thumb tip
    Thumb,
    /// Hip
    Hip,
    /// Knee
    Knee,
    /// Ankle
    Ankle,
    /// Heel
    Heel,
    /// Foot index (toe)
    FootIndex,
}

impl BodyPart {
    /// Limb parts used to judge which side of the body is better visible
    pub const LIMBS: [Self; 6] =
        [Self::Shoulder, Self::Elbow, Self::Wrist, Self::Hip, Self::Knee, Self::Ankle];

    /// The concrete joint for this part on the given side
    #[must_use]
    pub const fn on(self, side: Side) -> JointId {
        use JointId as J;
        match (self, side) {
            (Self::EyeInner, Side::Left) => J::LeftEyeInner,
            (Self::EyeInner, Side::Right) => J::RightEyeInner,
            (Self::Eye, Side::Left) => J::LeftEye,
            (Self::Eye, Side::Right) => J::RightEye,
            (Self::EyeOuter, Side::Left) => J::LeftEyeOuter,
            (Self::EyeOuter, Side::Right) => J::RightEyeOuter,
            (Self::Ear, Side::Left) => J::LeftEar,
            (Self::Ear, Side::Right) => J::RightEar,
            (Self::Mouth, Side::Left) => J::MouthLeft,
            (Self::Mouth, Side::Right) => J::MouthRight,
            (Self::Shoulder, Side::Left) => J::LeftShoulder,
            (Self::Shoulder, Side::Right) => J::RightShoulder,
            (Self::Elbow, Side::Left) => J::LeftElbow,
            (Self::Elbow, Side::Right) => J::RightElbow,
            (Self::Wrist, Side::Left) => J::LeftWrist,
            (Self::Wrist, Side::Right) => J::RightWrist,
            (Self::Pinky, Side::Left) => J::LeftPinky,
            (Self::Pinky, Side::Right) => J::RightPinky,
            (Self::Index, Side::Left) => J::LeftIndex,
            (Self::Index, Side::Right) => J::RightIndex,
            (Self::Thumb, Side::Left) => J::LeftThumb,
            (Self::Thumb, Side::Right) => J::RightThumb,
            (Self::Hip, Side::Left) => J::LeftHip,
            (Self::Hip, Side::Right) => J::RightHip,
            (Self::Knee, Side::Left) => J::LeftKnee,
            (Self::Knee, Side::Right) => J::RightKnee,
            (Self::Ankle, Side::Left) => J::LeftAnkle,
            (Self::Ankle, Side::Right) => J::RightAnkle,
            (Self::Heel, Side::Left) => J::LeftHeel,
            (Self::Heel, Side::Right) => J::RightHeel,
            (Self::FootIndex, Side::Left) => J::LeftFootIndex,
            (Self::FootIndex, Side::Right) => J::RightFootIndex,
        }
    }
}

/// The 33 landmarks produced by BlazePose-style models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(usize)]
#[allow(missing_docs)]
pub enum JointId {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl JointId {
    /// Number of joints
    pub const COUNT: usize = 33;

    /// All joints in model index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Model index of this joint
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Joint for a model index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical name, e.g. `LEFT_KNEE`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftEyeInner => "LEFT_EYE_INNER",
            Self::LeftEye => "LEFT_EYE",
            Self::LeftEyeOuter => "LEFT_EYE_OUTER",
            Self::RightEyeInner => "RIGHT_EYE_INNER",
            Self::RightEye => "RIGHT_EYE",
            Self::RightEyeOuter => "RIGHT_EYE_OUTER",
            Self::LeftEar => "LEFT_EAR",
            Self::RightEar => "RIGHT_EAR",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftPinky => "LEFT_PINKY",
            Self::RightPinky => "RIGHT_PINKY",
            Self::LeftIndex => "LEFT_INDEX",
            Self::RightIndex => "RIGHT_INDEX",
            Self::LeftThumb => "LEFT_THUMB",
            Self::RightThumb => "RIGHT_THUMB",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
            Self::LeftKnee => "LEFT_KNEE",
            Self::RightKnee => "RIGHT_KNEE",
            Self::LeftAnkle => "LEFT_ANKLE",
            Self::RightAnkle => "RIGHT_ANKLE",
            Self::LeftHeel => "LEFT_HEEL",
            Self::RightHeel => "RIGHT_HEEL",
            Self::LeftFootIndex => "LEFT_FOOT_INDEX",
            Self::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }

    /// Side and part of a sided joint; `None` for the nose
    #[must_use]
    pub fn sided(self) -> Option<(Side, BodyPart)> {
        const PARTS: [BodyPart; 16] = [
            BodyPart::EyeInner,
            BodyPart::Eye,
            BodyPart::EyeOuter,
            BodyPart::Ear,
            BodyPart::Mouth,
            BodyPart::Shoulder,
            BodyPart::Elbow,
            BodyPart::Wrist,
            BodyPart::Pinky,
            BodyPart::Index,
            BodyPart::Thumb,
            BodyPart::Hip,
            BodyPart::Knee,
            BodyPart::Ankle,
            BodyPart::Heel,
            BodyPart::FootIndex,
        ];
        PARTS.iter().find_map(|&part| {
            if part.on(Side::Left) == self {
                Some((Side::Left, part))
            } else if part.on(Side::Right) == self {
                Some((Side::Right, part))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointId {
    type Err = JointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|j| j.as_str() == wanted)
            .ok_or_else(|| JointParseError(s.to_string()))
    }
}

/// A joint as referenced by a rule
///
/// `Sided` follows whichever side the engine picked for the current frame;
/// `Fixed` always names the same landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointRef {
    /// Part on the preferred side (written as `LEFT_*` in rule files)
    Sided(BodyPart),
    /// One specific landmark
    Fixed(JointId),
}

impl JointRef {
    /// Resolve to a concrete joint for the given side
    #[must_use]
    pub const fn resolve(self, side: Side) -> JointId {
        match self {
            Self::Sided(part) => part.on(side),
            Self::Fixed(joint) => joint,
        }
    }
}

impl FromStr for JointRef {
    type Err = JointParseError;

    /// Parse a rule-file joint name
    ///
    /// Left-side names become placeholders, everything else is fixed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let joint: JointId = s.parse()?;
        Ok(match joint.sided() {
            Some((Side::Left, part)) => Self::Sided(part),
            _ => Self::Fixed(joint),
        })
    }
}

impl fmt::Display for JointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve(Side::Left).as_str())
    }
}

impl Serialize for JointRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JointRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
