use thiserror::Error;

use crate::models::{JointName, WorkoutRecord};

/// Why a joint could not be used this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingReason {
    NotDetected,
    LowVisibility(f32),
}

/// A required joint was absent or untrustworthy; the frame is skipped
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Landmark {joint} unavailable: {reason:?}")]
pub struct MissingLandmark {
    pub joint: JointName,
    pub reason: MissingReason,
}

/// Frame capture errors, fatal to a session
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture device unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed frame at line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("Capture I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rep cue errors; callers log and move on
#[derive(Error, Debug)]
pub enum CueError {
    #[error("Cue device unavailable")]
    Unavailable,
    #[error("Cue I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced at the session boundary
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown exercise '{0}' (expected one of: curl, squat, pushup, shoulder_press, lunge, jumping_jack, plank)")]
    InvalidModeSelector(String),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("Failed to save workout: {source}")]
    Persistence {
        record: Box<WorkoutRecord>,
        #[source]
        source: anyhow::Error,
    },
}
