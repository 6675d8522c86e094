use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Goal used when no profile exists or the stored goal is unusable
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

/// Single local user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub daily_calorie_goal: u32,
}

impl UserProfile {
    /// Create a validated profile
    pub fn new(name: impl Into<String>, age: u32, daily_calorie_goal: u32) -> Result<Self> {
        let profile = Self {
            name: name.into().trim().to_string(),
            age,
            daily_calorie_goal,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the ranges the profile form accepts
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("Name must not be empty");
        }
        if !(5..=120).contains(&self.age) {
            bail!("Age must be between 5 and 120, got {}", self.age);
        }
        if !(500..=10_000).contains(&self.daily_calorie_goal) {
            bail!(
                "Daily calorie goal must be between 500 and 10000, got {}",
                self.daily_calorie_goal
            );
        }
        Ok(())
    }
}

/// Daily goal for an optional profile
pub fn effective_goal(profile: Option<&UserProfile>) -> u32 {
    match profile {
        Some(p) if p.daily_calorie_goal > 0 => p.daily_calorie_goal,
        _ => DEFAULT_CALORIE_GOAL,
    }
}
