use crate::error::MissingLandmark;
use crate::models::{ExerciseKind, JointName, PoseFrame};
use crate::services::geometry;

use super::{angle_label, ClassifierState, ClassifierUpdate, FormWarning, RepClassifier, RepEvent, Stage};

const STANDING_KNEE_DEG: f64 = 140.0;
const LUNGE_KNEE_DEG: f64 = 110.0;
const MIN_ANKLE_SPREAD: f64 = 0.15;

const JOINTS: [JointName; 6] = [
    JointName::LeftHip,
    JointName::LeftKnee,
    JointName::LeftAnkle,
    JointName::RightHip,
    JointName::RightKnee,
    JointName::RightAnkle,
];

/// Counts lunges from both knee angles, gated on a wide enough stance
#[derive(Debug, Clone)]
pub struct LungeClassifier {
    min_visibility: f32,
}

impl LungeClassifier {
    pub fn new(min_visibility: f32) -> Self {
        Self { min_visibility }
    }
}

impl RepClassifier for LungeClassifier {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Lunge
    }

    fn required_joints(&self) -> &[JointName] {
        &JOINTS
    }

    fn step(&self, state: &ClassifierState, frame: &PoseFrame) -> Result<ClassifierUpdate, MissingLandmark> {
        let [l_hip, l_knee, l_ankle, r_hip, r_knee, r_ankle] = frame.require_all(JOINTS, self.min_visibility)?;

        let left = geometry::angle(l_hip, l_knee, l_ankle);
        let right = geometry::angle(r_hip, r_knee, r_ankle);
        let spread = geometry::horizontal_spread(l_ankle, r_ankle);

        let mut next = state.clone();
        let mut event = RepEvent::Idle;

        if left > STANDING_KNEE_DEG && right > STANDING_KNEE_DEG {
            next.stage = Some(Stage::Up);
        }

        if next.stage == Some(Stage::Up) && (left < LUNGE_KNEE_DEG || right < LUNGE_KNEE_DEG) {
            if spread > MIN_ANKLE_SPREAD {
                next.stage = Some(Stage::Down);
                next.counter += 1.0;
                event = RepEvent::Rep { count: next.reps() };
            } else {
                event = RepEvent::Warning(FormWarning::SpreadLegs);
            }
        }

        let mut overlay = vec![angle_label(left), format!("Spread: {:.2}", spread)];
        if let RepEvent::Warning(warning) = &event {
            overlay.push(warning.message().to_string());
        }

        Ok(ClassifierUpdate {
            state: next,
            event,
            overlay,
        })
    }
}
