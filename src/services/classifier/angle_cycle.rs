use crate::error::MissingLandmark;
use crate::models::{ExerciseKind, JointName, PoseFrame};
use crate::services::geometry;

use super::{angle_label, ClassifierState, ClassifierUpdate, RepClassifier, RepEvent, Stage};

/// Comparison of a joint angle against a fixed bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Above(f64),
    Below(f64),
    AtOrBelow(f64),
}

impl Threshold {
    pub fn holds(&self, degrees: f64) -> bool {
        match *self {
            Threshold::Above(bound) => degrees > bound,
            Threshold::Below(bound) => degrees < bound,
            Threshold::AtOrBelow(bound) => degrees <= bound,
        }
    }
}

/// A two-phase cycle driven by one joint angle
///
/// `reset` arms the cycle; `count` fires only while armed and is the
/// transition that counts the rep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSpec {
    pub kind: ExerciseKind,
    /// Outer joint, vertex joint, outer joint
    pub joints: [JointName; 3],
    pub reset: (Threshold, Stage),
    pub count: (Threshold, Stage),
}

impl CycleSpec {
    pub const CURL: CycleSpec = CycleSpec {
        kind: ExerciseKind::Curl,
        joints: [JointName::LeftShoulder, JointName::LeftElbow, JointName::LeftWrist],
        reset: (Threshold::Above(160.0), Stage::Down),
        count: (Threshold::Below(30.0), Stage::Up),
    };

    pub const SQUAT: CycleSpec = CycleSpec {
        kind: ExerciseKind::Squat,
        joints: [JointName::LeftHip, JointName::LeftKnee, JointName::LeftAnkle],
        reset: (Threshold::Above(170.0), Stage::Up),
        count: (Threshold::Below(90.0), Stage::Down),
    };

    pub const PUSHUP: CycleSpec = CycleSpec {
        kind: ExerciseKind::Pushup,
        joints: [JointName::LeftShoulder, JointName::LeftElbow, JointName::LeftWrist],
        reset: (Threshold::AtOrBelow(80.0), Stage::Down),
        count: (Threshold::Above(160.0), Stage::Up),
    };

    pub const SHOULDER_PRESS: CycleSpec = CycleSpec {
        kind: ExerciseKind::ShoulderPress,
        joints: [JointName::LeftShoulder, JointName::LeftElbow, JointName::LeftWrist],
        reset: (Threshold::Below(90.0), Stage::Down),
        count: (Threshold::Above(140.0), Stage::Up),
    };
}

/// Classifier for curl, squat, pushup and shoulder press
#[derive(Debug, Clone)]
pub struct AngleCycleClassifier {
    cycle: CycleSpec,
    min_visibility: f32,
}

impl AngleCycleClassifier {
    pub fn new(cycle: CycleSpec, min_visibility: f32) -> Self {
        Self {
            cycle,
            min_visibility,
        }
    }
}

impl RepClassifier for AngleCycleClassifier {
    fn kind(&self) -> ExerciseKind {
        self.cycle.kind
    }

    fn required_joints(&self) -> &[JointName] {
        &self.cycle.joints
    }

    fn step(&self, state: &ClassifierState, frame: &PoseFrame) -> Result<ClassifierUpdate, MissingLandmark> {
        let [a, b, c] = frame.require_all(self.cycle.joints, self.min_visibility)?;
        let degrees = geometry::angle(a, b, c);

        let (reset_when, reset_stage) = self.cycle.reset;
        let (count_when, count_stage) = self.cycle.count;

        let mut next = state.clone();
        let mut event = RepEvent::Idle;

        if reset_when.holds(degrees) {
            next.stage = Some(reset_stage);
        }

        if count_when.holds(degrees) && next.stage == Some(reset_stage) {
            next.stage = Some(count_stage);
            next.counter += 1.0;
            event = RepEvent::Rep { count: next.reps() };
        }

        Ok(ClassifierUpdate {
            state: next,
            event,
            overlay: vec![angle_label(degrees)],
        })
    }
}
