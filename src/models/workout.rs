use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExerciseKind;

/// Completed session entry stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub exercise_type: ExerciseKind,
    /// Counter at session end (reps, or held seconds for plank)
    pub reps: f64,
    pub calories: f64,
}

impl WorkoutRecord {
    /// Create a record stamped with the current time
    pub fn new(exercise_type: ExerciseKind, reps: f64, calories: f64) -> Self {
        Self::at(Utc::now(), exercise_type, reps, calories)
    }

    /// Create a record with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, exercise_type: ExerciseKind, reps: f64, calories: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            exercise_type,
            reps,
            calories,
        }
    }

    /// Calendar date of the record in local time
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

/// Filter criteria for listing workouts
#[derive(Debug, Default)]
pub struct WorkoutFilter {
    pub exercise_type: Option<ExerciseKind>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl WorkoutFilter {
    pub fn matches(&self, workout: &WorkoutRecord) -> bool {
        if let Some(kind) = self.exercise_type {
            if workout.exercise_type != kind {
                return false;
            }
        }

        let date = workout.local_date();

        if let Some(from) = self.from_date {
            if date < from {
                return false;
            }
        }

        if let Some(to) = self.to_date {
            if date > to {
                return false;
            }
        }

        true
    }
}

/// Lifetime totals across the workout log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStats {
    /// Sum of every record's counter, plank seconds included
    pub total_reps: f64,
    pub workouts_completed: usize,
    /// Most frequently logged exercise; ties go to the lowest selector name
    pub favorite: Option<ExerciseKind>,
    /// Counter totals per exercise, in exercise order, logged ones only
    pub reps_by_exercise: Vec<(ExerciseKind, f64)>,
}

impl WorkoutStats {
    pub fn from_workouts(workouts: &[WorkoutRecord]) -> Self {
        let mut reps_by_exercise = Vec::new();
        let mut favorite: Option<(ExerciseKind, usize)> = None;

        for kind in ExerciseKind::all() {
            let matching: Vec<_> = workouts.iter().filter(|w| w.exercise_type == kind).collect();
            if matching.is_empty() {
                continue;
            }

            reps_by_exercise.push((kind, matching.iter().map(|w| w.reps).sum()));

            let count = matching.len();
            favorite = match favorite {
                Some((best, best_count))
                    if best_count > count || (best_count == count && best.as_str() < kind.as_str()) =>
                {
                    Some((best, best_count))
                }
                _ => Some((kind, count)),
            };
        }

        Self {
            total_reps: workouts.iter().map(|w| w.reps).sum(),
            workouts_completed: workouts.len(),
            favorite: favorite.map(|(kind, _)| kind),
            reps_by_exercise,
        }
    }
}
