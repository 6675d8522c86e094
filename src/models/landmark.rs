//! Landmark models for per-frame pose data
//!
//! The pose estimator is a black box that hands us one `PoseFrame` per
//! captured image. Classifiers read a fixed subset of joints by name and
//! must treat absent or low-visibility joints as a recoverable miss.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{MissingLandmark, MissingReason};

/// A single 2D body-joint coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPoint {
    /// X coordinate, normalized 0-1 relative to frame width
    pub x: f32,
    /// Y coordinate, normalized 0-1 relative to frame height (grows downward)
    pub y: f32,
    /// Detection visibility (0-1)
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

fn default_visibility() -> f32 {
    1.0
}

impl JointPoint {
    /// Create a fully visible point
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            visibility: 1.0,
        }
    }

    /// Create a point with an explicit visibility score
    pub fn with_visibility(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

impl Default for JointPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Joint names in COCO order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    /// Get joint name as written in landmark streams
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Get all joints
    pub fn all() -> [Self; 17] {
        [
            Self::Nose,
            Self::LeftEye,
            Self::RightEye,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }
}

impl std::fmt::Display for JointName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for JointName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|joint| joint.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown joint: {}", s))
    }
}

/// Landmark snapshot for one captured frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture timestamp in milliseconds since the stream started
    pub timestamp_ms: u64,
    /// Detected joints
    pub landmarks: HashMap<JointName, JointPoint>,
}

impl PoseFrame {
    /// Create an empty frame
    pub fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            landmarks: HashMap::new(),
        }
    }

    /// Builder-style joint insertion
    pub fn with_joint(mut self, joint: JointName, point: JointPoint) -> Self {
        self.landmarks.insert(joint, point);
        self
    }

    /// Insert or replace a joint
    pub fn insert(&mut self, joint: JointName, point: JointPoint) {
        self.landmarks.insert(joint, point);
    }

    /// Get a joint regardless of visibility
    pub fn get(&self, joint: JointName) -> Option<&JointPoint> {
        self.landmarks.get(&joint)
    }

    /// Resolve a joint that must be present and visible enough to trust
    pub fn require(&self, joint: JointName, min_visibility: f32) -> Result<JointPoint, MissingLandmark> {
        let point = self.landmarks.get(&joint).ok_or(MissingLandmark {
            joint,
            reason: MissingReason::NotDetected,
        })?;

        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(MissingLandmark {
                joint,
                reason: MissingReason::NotDetected,
            });
        }

        if point.visibility < min_visibility {
            return Err(MissingLandmark {
                joint,
                reason: MissingReason::LowVisibility(point.visibility),
            });
        }

        Ok(*point)
    }

    /// Resolve a fixed set of joints, failing on the first miss
    pub fn require_all<const N: usize>(
        &self,
        joints: [JointName; N],
        min_visibility: f32,
    ) -> Result<[JointPoint; N], MissingLandmark> {
        let mut points = [JointPoint::default(); N];
        for (slot, joint) in points.iter_mut().zip(joints) {
            *slot = self.require(joint, min_visibility)?;
        }
        Ok(points)
    }
}
