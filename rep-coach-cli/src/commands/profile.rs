use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use rep_coach::config::Config;
use rep_coach::models::{UserProfile, DEFAULT_CALORIE_GOAL};
use rep_coach::services::storage::ProfileStore;

#[derive(Args)]
pub struct ProfileSetCommand {
    /// Your name
    #[arg(long)]
    name: Option<String>,

    /// Age in years (5-120)
    #[arg(long)]
    age: Option<u32>,

    /// Daily calorie goal in kcal (500-10000)
    #[arg(long)]
    goal: Option<u32>,
}

impl ProfileSetCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let storage = super::open_storage(config)?;
        let current = storage.load_profile()?;

        let name = match self.name {
            Some(name) => name,
            None => Input::new()
                .with_prompt("Name")
                .with_initial_text(current.as_ref().map(|p| p.name.clone()).unwrap_or_default())
                .interact_text()
                .context("Failed to read name")?,
        };

        let age = match self.age {
            Some(age) => age,
            None => Input::new()
                .with_prompt("Age")
                .default(current.as_ref().map(|p| p.age).unwrap_or(25))
                .interact_text()
                .context("Failed to read age")?,
        };

        let goal = match self.goal {
            Some(goal) => goal,
            None => Input::new()
                .with_prompt("Daily calorie goal (kcal)")
                .default(
                    current
                        .as_ref()
                        .map(|p| p.daily_calorie_goal)
                        .unwrap_or(DEFAULT_CALORIE_GOAL),
                )
                .interact_text()
                .context("Failed to read calorie goal")?,
        };

        let profile = UserProfile::new(name, age, goal)?;
        storage.save_profile(&profile)?;

        println!("{} Profile saved!", "✓".green());
        Ok(())
    }
}

pub async fn show_profile(config: &Config) -> Result<()> {
    let storage = super::open_storage(config)?;

    match storage.load_profile()? {
        Some(profile) => {
            println!("{}", "Profile".bold());
            println!("────────────────────────────────");
            println!("Name:               {}", profile.name);
            println!("Age:                {}", profile.age);
            println!("Daily calorie goal: {} kcal", profile.daily_calorie_goal);
        }
        None => {
            println!("No profile yet. Create one with: rep-coach profile set");
        }
    }

    Ok(())
}
