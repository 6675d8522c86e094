use crate::error::MissingLandmark;
use crate::models::{ExerciseKind, JointName, PoseFrame};
use crate::services::geometry;

use super::{ClassifierState, ClassifierUpdate, RepClassifier, RepEvent, Stage};

const MIN_FEET_SPREAD: f64 = 0.2;

const JOINTS: [JointName; 6] = [
    JointName::LeftShoulder,
    JointName::RightShoulder,
    JointName::LeftWrist,
    JointName::RightWrist,
    JointName::LeftAnkle,
    JointName::RightAnkle,
];

/// Counts jumping jacks from hand height and foot spread predicates
#[derive(Debug, Clone)]
pub struct JumpingJackClassifier {
    min_visibility: f32,
}

impl JumpingJackClassifier {
    pub fn new(min_visibility: f32) -> Self {
        Self { min_visibility }
    }
}

impl RepClassifier for JumpingJackClassifier {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::JumpingJack
    }

    fn required_joints(&self) -> &[JointName] {
        &JOINTS
    }

    fn step(&self, state: &ClassifierState, frame: &PoseFrame) -> Result<ClassifierUpdate, MissingLandmark> {
        let [l_shoulder, r_shoulder, l_wrist, r_wrist, l_ankle, r_ankle] =
            frame.require_all(JOINTS, self.min_visibility)?;

        // Image y grows downward, so "above" means a smaller y
        let hands_up = l_wrist.y < l_shoulder.y && r_wrist.y < r_shoulder.y;
        let spread = geometry::horizontal_spread(l_ankle, r_ankle);
        let feet_apart = spread > MIN_FEET_SPREAD;

        let mut next = state.clone();
        let mut event = RepEvent::Idle;

        if !hands_up && !feet_apart {
            next.stage = Some(Stage::Down);
        }

        if hands_up && feet_apart && next.stage == Some(Stage::Down) {
            next.stage = Some(Stage::Up);
            next.counter += 1.0;
            event = RepEvent::Rep { count: next.reps() };
        }

        Ok(ClassifierUpdate {
            state: next,
            event,
            overlay: vec![format!("Ankle Dist: {:.2}", spread)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JointPoint;
    use assert_matches::assert_matches;

    fn jack_frame(timestamp_ms: u64, hands_up: bool, spread: f32) -> PoseFrame {
        let wrist_y = if hands_up { 0.1 } else { 0.6 };
        PoseFrame::new(timestamp_ms)
            .with_joint(JointName::LeftShoulder, JointPoint::new(0.45, 0.3))
            .with_joint(JointName::RightShoulder, JointPoint::new(0.55, 0.3))
            .with_joint(JointName::LeftWrist, JointPoint::new(0.4, wrist_y))
            .with_joint(JointName::RightWrist, JointPoint::new(0.6, wrist_y))
            .with_joint(JointName::LeftAnkle, JointPoint::new(0.5 - spread / 2.0, 0.9))
            .with_joint(JointName::RightAnkle, JointPoint::new(0.5 + spread / 2.0, 0.9))
    }

    #[test]
    fn test_full_cycle_counts() {
        let classifier = JumpingJackClassifier::new(0.5);
        let closed = classifier.update(&ClassifierState::new(), &jack_frame(0, false, 0.1));
        assert_eq!(closed.state.stage, Some(Stage::Down));

        let open = classifier.update(&closed.state, &jack_frame(33, true, 0.4));
        assert_matches!(open.event, RepEvent::Rep { count: 1 });
        assert_eq!(open.state.stage, Some(Stage::Up));
    }

    #[test]
    fn test_half_open_does_not_reset_or_count() {
        let classifier = JumpingJackClassifier::new(0.5);
        let mut state = classifier.update(&ClassifierState::new(), &jack_frame(0, false, 0.1)).state;
        state = classifier.update(&state, &jack_frame(33, true, 0.4)).state;

        // Hands down but feet still apart: stays up, no new rep
        let half = classifier.update(&state, &jack_frame(66, false, 0.4));
        assert_eq!(half.state.stage, Some(Stage::Up));

        let reopen = classifier.update(&half.state, &jack_frame(99, true, 0.4));
        assert_eq!(reopen.state.counter, 1.0);
    }

    #[test]
    fn test_open_without_closing_first_is_ignored() {
        let classifier = JumpingJackClassifier::new(0.5);
        let update = classifier.update(&ClassifierState::new(), &jack_frame(0, true, 0.4));
        assert_matches!(update.event, RepEvent::Idle);
        assert_eq!(update.state.counter, 0.0);
    }
}
