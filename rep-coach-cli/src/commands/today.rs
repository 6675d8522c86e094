use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use rep_coach::config::Config;
use rep_coach::models::{effective_goal, ExerciseKind, WorkoutStats};
use rep_coach::services::session::display_score;
use rep_coach::services::storage::{ProfileStore, WorkoutStore};

/// Share of the goal reached, capped at 1.0
pub fn progress(calories: f64, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (calories / f64::from(goal)).clamp(0.0, 1.0)
}

/// Encouragement for the highest milestone reached
pub fn milestone(progress: f64) -> Option<&'static str> {
    match progress {
        p if p >= 1.0 => Some("🎉 GOAL CRUSHED! Amazing work!"),
        p if p >= 0.5 => Some("Halfway there! Keep pushing! 🚀"),
        _ => None,
    }
}

/// One breakdown row: whole reps, or plank seconds to one decimal
pub fn breakdown_line(kind: ExerciseKind, reps: f64) -> String {
    format!("{}: {} {}", kind.label(), display_score(kind, reps), kind.unit())
}

fn print_stats(stats: &WorkoutStats) {
    let favorite = stats.favorite.map(|kind| kind.label()).unwrap_or("None");

    println!("⚡ Total Reps: {}", stats.total_reps.trunc() as i64);
    println!("📅 Workouts Completed: {}", stats.workouts_completed);
    println!("🏆 Favorite Move: {}", favorite);

    for (kind, reps) in &stats.reps_by_exercise {
        println!("   {}", breakdown_line(*kind, *reps));
    }
}

/// Text progress bar, `width` cells wide
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub async fn show_today(config: &Config) -> Result<()> {
    let storage = super::open_storage(config)?;
    let profile = storage.load_profile()?;
    let goal = effective_goal(profile.as_ref());
    let calories = storage.calories_on(Local::now().date_naive())?;
    let done = progress(calories, goal);

    if let Some(profile) = &profile {
        println!("Welcome back, {}!", profile.name.bold());
    }
    println!("🔥 Daily Calorie Goal: {:.2} / {} kcal", calories, goal);
    println!("{} {:.0}%", progress_bar(done, 30), done * 100.0);

    if let Some(message) = milestone(done) {
        println!();
        println!("{}", message.green());
    }

    println!();
    print_stats(&storage.workout_stats()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_capped() {
        assert_eq!(progress(1000.0, 2000), 0.5);
        assert_eq!(progress(2500.0, 2000), 1.0);
        assert_eq!(progress(10.0, 0), 0.0);
    }

    #[test]
    fn test_milestones() {
        assert_eq!(milestone(0.1), None);
        assert_eq!(milestone(0.3), None);
        assert_eq!(milestone(0.5), Some("Halfway there! Keep pushing! 🚀"));
        assert_eq!(milestone(0.8), Some("Halfway there! Keep pushing! 🚀"));
        assert_eq!(milestone(1.0), Some("🎉 GOAL CRUSHED! Amazing work!"));
    }

    #[test]
    fn test_breakdown_line_units() {
        assert_eq!(breakdown_line(ExerciseKind::Squat, 25.0), "Squat: 25 reps");
        assert_eq!(breakdown_line(ExerciseKind::Curl, 7.9), "Bicep Curl: 7 reps");
        assert_eq!(breakdown_line(ExerciseKind::Plank, 12.46), "Plank: 12.5 seconds");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(1.0, 3), "[███]");
    }
}
