use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use rep_coach::config::Config;
use rep_coach::models::{ExerciseKind, WorkoutFilter};
use rep_coach::services::session::display_score;
use rep_coach::services::storage::WorkoutStore;

#[derive(Args)]
pub struct HistoryCommand {
    /// Filter by exercise type
    #[arg(short, long)]
    r#type: Option<String>,

    /// Filter from date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Filter to date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Number of workouts to show
    #[arg(short, long, default_value = "10")]
    limit: usize,
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

impl HistoryCommand {
    fn filter(&self) -> Result<WorkoutFilter> {
        Ok(WorkoutFilter {
            exercise_type: self.r#type.as_deref().map(str::parse::<ExerciseKind>).transpose()?,
            from_date: self.from.as_deref().map(parse_date).transpose()?,
            to_date: self.to.as_deref().map(parse_date).transpose()?,
        })
    }

    pub async fn execute(self, config: &Config) -> Result<()> {
        let filter = self.filter()?;
        let storage = super::open_storage(config)?;

        let workouts: Vec<_> = storage
            .list_workouts()?
            .into_iter()
            .filter(|w| filter.matches(w))
            .take(self.limit)
            .collect();

        if workouts.is_empty() {
            println!("No workout history found yet.");
            return Ok(());
        }

        println!("{}", "Workout History".bold());
        println!("────────────────────────────────────────────────────");
        println!("{:<17} {:<16} {:>10} {:>10}", "Date", "Exercise", "Score", "Calories");

        for workout in &workouts {
            let kind = workout.exercise_type;
            println!(
                "{:<17} {:<16} {:>10} {:>10.2}",
                workout.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string(),
                kind.label(),
                display_score(kind, workout.reps),
                workout.calories
            );
        }

        let total: f64 = workouts.iter().map(|w| w.calories).sum();
        println!();
        println!("{} workouts, {:.2} calories", workouts.len(), total);

        Ok(())
    }
}
