//! Exercise classifiers
//!
//! Each classifier is a pure state machine over landmark snapshots:
//! `update(state, frame)` returns the next state plus the event it produced.
//! Joint angles are compared against an "extended" and a "contracted"
//! threshold; the gap between the two is the hysteresis that keeps jitter
//! around a single boundary from double counting. A rep is counted once, on
//! the transition into the terminal phase of the cycle.

mod angle_cycle;
mod jumping_jack;
mod lunge;
mod plank;

pub use angle_cycle::{AngleCycleClassifier, CycleSpec, Threshold};
pub use jumping_jack::JumpingJackClassifier;
pub use lunge::LungeClassifier;
pub use plank::PlankClassifier;

use serde::{Deserialize, Serialize};

use crate::config::CaptureConfig;
use crate::error::MissingLandmark;
use crate::models::{ExerciseKind, JointName, PoseFrame};

/// Discrete phase within a rep cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Up,
    Down,
    Holding,
    NotHolding,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Up => write!(f, "up"),
            Stage::Down => write!(f, "down"),
            Stage::Holding => write!(f, "holding"),
            Stage::NotHolding => write!(f, "not holding"),
        }
    }
}

/// Per-session classifier state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierState {
    /// Current phase; unset until the first qualifying frame
    pub stage: Option<Stage>,
    /// Reps, or held seconds for timed exercises. Never decreases.
    pub counter: f64,
    /// Timestamp of the last frame that updated this state
    pub last_timestamp_ms: Option<u64>,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter as a whole rep count
    pub fn reps(&self) -> u32 {
        self.counter.max(0.0).floor() as u32
    }
}

/// Form problems a classifier can flag instead of counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormWarning {
    SpreadLegs,
    GetOnFloor,
    StraightenBack,
}

impl FormWarning {
    /// Overlay text for the warning
    pub fn message(&self) -> &'static str {
        match self {
            FormWarning::SpreadLegs => "SPREAD LEGS!",
            FormWarning::GetOnFloor => "GET ON FLOOR!",
            FormWarning::StraightenBack => "STRAIGHTEN BACK!",
        }
    }
}

/// What a single update produced
#[derive(Debug, Clone, PartialEq)]
pub enum RepEvent {
    /// State may have changed but nothing was counted
    Idle,
    /// A rep cycle completed; `count` is the total after this rep
    Rep { count: u32 },
    /// Hold time accumulated this frame
    Hold { seconds: f64 },
    /// Form problem; nothing was counted
    Warning(FormWarning),
    /// Required landmarks were unavailable; state was left untouched
    Skipped(MissingLandmark),
}

/// Result of one classifier update
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierUpdate {
    pub state: ClassifierState,
    pub event: RepEvent,
    /// Annotation lines derived from the measurements and state
    pub overlay: Vec<String>,
}

/// Converts landmark snapshots into rep/hold events for one exercise
pub trait RepClassifier: Send {
    /// Exercise this classifier counts
    fn kind(&self) -> ExerciseKind;

    /// Joints read on every frame
    fn required_joints(&self) -> &[JointName];

    /// Advance the state machine. Fails only when a required joint is missing.
    fn step(&self, state: &ClassifierState, frame: &PoseFrame) -> Result<ClassifierUpdate, MissingLandmark>;

    /// Advance the state machine, keeping the prior state on missing landmarks
    fn update(&self, state: &ClassifierState, frame: &PoseFrame) -> ClassifierUpdate {
        match self.step(state, frame) {
            Ok(mut update) => {
                update.state.last_timestamp_ms = Some(frame.timestamp_ms);
                update
            }
            Err(missing) => {
                tracing::trace!("Skipping frame {}: {}", frame.timestamp_ms, missing);
                ClassifierUpdate {
                    state: state.clone(),
                    event: RepEvent::Skipped(missing),
                    overlay: Vec::new(),
                }
            }
        }
    }
}

/// Select the classifier for an exercise
pub fn classifier_for(kind: ExerciseKind, capture: &CaptureConfig) -> Box<dyn RepClassifier> {
    let min_visibility = capture.min_visibility;
    match kind {
        ExerciseKind::Curl => Box::new(AngleCycleClassifier::new(CycleSpec::CURL, min_visibility)),
        ExerciseKind::Squat => Box::new(AngleCycleClassifier::new(CycleSpec::SQUAT, min_visibility)),
        ExerciseKind::Pushup => Box::new(AngleCycleClassifier::new(CycleSpec::PUSHUP, min_visibility)),
        ExerciseKind::ShoulderPress => {
            Box::new(AngleCycleClassifier::new(CycleSpec::SHOULDER_PRESS, min_visibility))
        }
        ExerciseKind::Lunge => Box::new(LungeClassifier::new(min_visibility)),
        ExerciseKind::JumpingJack => Box::new(JumpingJackClassifier::new(min_visibility)),
        ExerciseKind::Plank => Box::new(PlankClassifier::from_config(capture)),
    }
}

/// Overlay text for an angle, truncated to whole degrees
pub(crate) fn angle_label(degrees: f64) -> String {
    format!("Angle: {}", degrees.trunc() as i64)
}
