// Shared helpers for integration tests

#![allow(dead_code)]

use rep_coach::models::{JointName, JointPoint, PoseFrame};

/// Points whose angle at the middle joint is `degrees`
pub fn bent_chain(degrees: f64) -> (JointPoint, JointPoint, JointPoint) {
    let heading = (-90.0f64 + degrees).to_radians();
    let a = JointPoint::new(0.5, 0.3);
    let b = JointPoint::new(0.5, 0.5);
    let c = JointPoint::new((0.5 + 0.2 * heading.cos()) as f32, (0.5 + 0.2 * heading.sin()) as f32);
    (a, b, c)
}

pub fn arm_frame(timestamp_ms: u64, degrees: f64) -> PoseFrame {
    let (shoulder, elbow, wrist) = bent_chain(degrees);
    PoseFrame::new(timestamp_ms)
        .with_joint(JointName::LeftShoulder, shoulder)
        .with_joint(JointName::LeftElbow, elbow)
        .with_joint(JointName::LeftWrist, wrist)
}

pub fn leg_frame(timestamp_ms: u64, degrees: f64) -> PoseFrame {
    let (hip, knee, ankle) = bent_chain(degrees);
    PoseFrame::new(timestamp_ms)
        .with_joint(JointName::LeftHip, hip)
        .with_joint(JointName::LeftKnee, knee)
        .with_joint(JointName::LeftAnkle, ankle)
}

/// Frames at ~30 fps through the given arm angles
pub fn arm_sequence(angles: &[f64]) -> Vec<PoseFrame> {
    angles
        .iter()
        .enumerate()
        .map(|(i, deg)| arm_frame(i as u64 * 33, *deg))
        .collect()
}

/// Straight horizontal body: a valid plank
pub fn plank_frame(timestamp_ms: u64) -> PoseFrame {
    PoseFrame::new(timestamp_ms)
        .with_joint(JointName::LeftShoulder, JointPoint::new(0.2, 0.6))
        .with_joint(JointName::LeftHip, JointPoint::new(0.5, 0.6))
        .with_joint(JointName::LeftAnkle, JointPoint::new(0.8, 0.62))
}

/// Render frames as a JSON Lines recording
pub fn to_jsonl(frames: &[PoseFrame]) -> String {
    frames
        .iter()
        .map(|f| serde_json::to_string(f).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}
