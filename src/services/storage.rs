// Local storage using the sled embedded database

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sled::Db;
use std::path::Path;

use crate::models::{ExerciseKind, UserProfile, WorkoutRecord, WorkoutStats};

const WORKOUTS_TREE: &str = "workouts";
const PROFILE_TREE: &str = "profile";
const PROFILE_KEY: &str = "current";

/// Append-only workout log
#[cfg_attr(test, mockall::automock)]
pub trait WorkoutStore {
    /// Append a completed session
    fn save_workout(&self, record: &WorkoutRecord) -> Result<()>;

    /// All workouts, most recent first
    fn list_workouts(&self) -> Result<Vec<WorkoutRecord>>;

    /// Total calories burned on a local calendar date
    fn calories_on(&self, date: NaiveDate) -> Result<f64> {
        Ok(self
            .list_workouts()?
            .iter()
            .filter(|w| w.local_date() == date)
            .map(|w| w.calories)
            .sum())
    }

    /// The `limit` most recent workouts
    fn recent_workouts(&self, limit: usize) -> Result<Vec<WorkoutRecord>> {
        let mut workouts = self.list_workouts()?;
        workouts.truncate(limit);
        Ok(workouts)
    }

    /// Calories per exercise across all workouts, in exercise order
    fn totals_by_exercise(&self) -> Result<Vec<(ExerciseKind, f64)>> {
        let workouts = self.list_workouts()?;
        Ok(ExerciseKind::all()
            .into_iter()
            .filter_map(|kind| {
                let matching: Vec<_> = workouts.iter().filter(|w| w.exercise_type == kind).collect();
                (!matching.is_empty()).then(|| (kind, matching.iter().map(|w| w.calories).sum()))
            })
            .collect())
    }

    /// Rep totals, workout count and favorite exercise across all workouts
    fn workout_stats(&self) -> Result<WorkoutStats> {
        Ok(WorkoutStats::from_workouts(&self.list_workouts()?))
    }
}

/// Singleton user profile
#[cfg_attr(test, mockall::automock)]
pub trait ProfileStore {
    /// Store the profile, replacing any previous one
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;

    fn load_profile(&self) -> Result<Option<UserProfile>>;
}

/// Storage manager for the local embedded database
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Opening sled database at {:?}", path);

        let db = sled::open(path).with_context(|| format!("Failed to open sled database at {:?}", path))?;

        Ok(Self { db })
    }

    fn tree(&self, name: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(name)
            .with_context(|| format!("Failed to open {} tree", name))
    }
}

impl WorkoutStore for Storage {
    fn save_workout(&self, record: &WorkoutRecord) -> Result<()> {
        let tree = self.tree(WORKOUTS_TREE)?;

        let value = bincode::serialize(record).context("Failed to serialize workout")?;
        tree.insert(record.id.as_bytes(), value)
            .context("Failed to insert workout")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved workout {}", record.id);
        Ok(())
    }

    fn list_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        let tree = self.tree(WORKOUTS_TREE)?;

        let mut workouts = Vec::new();
        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate workouts")?;
            let workout: WorkoutRecord =
                bincode::deserialize(&value).context("Failed to deserialize workout")?;
            workouts.push(workout);
        }

        workouts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(workouts)
    }
}

impl ProfileStore for Storage {
    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let tree = self.tree(PROFILE_TREE)?;

        let value = bincode::serialize(profile).context("Failed to serialize profile")?;
        tree.insert(PROFILE_KEY, value)
            .context("Failed to insert profile")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved profile for {}", profile.name);
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<UserProfile>> {
        let tree = self.tree(PROFILE_TREE)?;

        match tree.get(PROFILE_KEY).context("Failed to get profile")? {
            Some(value) => {
                let profile = bincode::deserialize(&value).context("Failed to deserialize profile")?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
