use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// The exercises a session can track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Curl,
    Squat,
    Pushup,
    ShoulderPress,
    Lunge,
    JumpingJack,
    Plank,
}

impl ExerciseKind {
    /// Canonical mode selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curl => "curl",
            Self::Squat => "squat",
            Self::Pushup => "pushup",
            Self::ShoulderPress => "shoulder_press",
            Self::Lunge => "lunge",
            Self::JumpingJack => "jumping_jack",
            Self::Plank => "plank",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Curl => "Bicep Curl",
            Self::Squat => "Squat",
            Self::Pushup => "Pushup",
            Self::ShoulderPress => "Shoulder Press",
            Self::Lunge => "Lunge",
            Self::JumpingJack => "Jumping Jack",
            Self::Plank => "Plank",
        }
    }

    pub fn all() -> [Self; 7] {
        [
            Self::Curl,
            Self::Squat,
            Self::Pushup,
            Self::ShoulderPress,
            Self::Lunge,
            Self::JumpingJack,
            Self::Plank,
        ]
    }

    /// Calories burned per rep (or per held second for plank)
    pub fn calorie_factor(&self) -> f64 {
        match self {
            Self::Curl => 0.15,
            Self::Squat => 0.50,
            Self::Pushup => 0.40,
            Self::ShoulderPress => 0.35,
            Self::Lunge => 0.45,
            Self::JumpingJack => 0.20,
            Self::Plank => 0.06,
        }
    }

    /// Whether the counter measures held seconds instead of reps
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Plank)
    }

    /// Unit word for the counter
    pub fn unit(&self) -> &'static str {
        if self.is_timed() {
            "seconds"
        } else {
            "reps"
        }
    }

    /// Form tip shown before a session starts
    pub fn tip(&self) -> &'static str {
        match self {
            Self::Curl => "Keep elbows locked at your sides.",
            Self::Squat => "Thighs should be parallel to the ground.",
            Self::Pushup => "Keep your body straight like a plank.",
            Self::ShoulderPress => "Avoid arching your back. Push straight up.",
            Self::Lunge => "Keep your front knee above your ankle and lower your hips.",
            Self::JumpingJack => "Land softly on the balls of your feet.",
            Self::Plank => "Keep your body in a straight line from head to heels.",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExerciseKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| SessionError::InvalidModeSelector(s.to_string()))
    }
}
