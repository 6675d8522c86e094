// Data models

pub mod exercise;
pub mod landmark;
pub mod profile;
pub mod workout;

pub use exercise::ExerciseKind;
pub use landmark::{JointName, JointPoint, PoseFrame};
pub use profile::{effective_goal, UserProfile, DEFAULT_CALORIE_GOAL};
pub use workout::{WorkoutFilter, WorkoutRecord, WorkoutStats};
