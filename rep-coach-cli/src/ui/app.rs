use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;

use rep_coach::models::{effective_goal, ExerciseKind, WorkoutRecord};
use rep_coach::services::storage::{ProfileStore, WorkoutStore};

const RECENT_LIMIT: usize = 10;

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Currently selected panel
    pub selected_panel: Panel,
    /// Selected index in the current panel
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Greeting name, if a profile exists
    pub user_name: Option<String>,
    pub calories_today: f64,
    pub daily_goal: u32,
    pub recent_workouts: Vec<WorkoutRecord>,
    /// Calories per exercise across all history
    pub totals: Vec<(ExerciseKind, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    RecentWorkouts,
    ExerciseTotals,
}

impl App {
    /// Create new app instance and load data
    pub fn load<S: WorkoutStore + ProfileStore>(store: &S) -> Result<Self> {
        let mut app = Self {
            should_quit: false,
            selected_panel: Panel::RecentWorkouts,
            selected_index: 0,
            show_help: false,
            user_name: None,
            calories_today: 0.0,
            daily_goal: effective_goal(None),
            recent_workouts: Vec::new(),
            totals: Vec::new(),
        };
        app.refresh(store)?;
        Ok(app)
    }

    /// Reload everything from storage
    pub fn refresh<S: WorkoutStore + ProfileStore>(&mut self, store: &S) -> Result<()> {
        let profile = store.load_profile()?;
        self.daily_goal = effective_goal(profile.as_ref());
        self.user_name = profile.map(|p| p.name);
        self.calories_today = store.calories_on(Local::now().date_naive())?;
        self.recent_workouts = store.recent_workouts(RECENT_LIMIT)?;
        self.totals = store.totals_by_exercise()?;

        let max_index = self.max_index();
        self.selected_index = self.selected_index.min(max_index);

        tracing::debug!(
            "Dashboard refreshed: {} recent workouts, {:.2} kcal today",
            self.recent_workouts.len(),
            self.calories_today
        );
        Ok(())
    }

    /// Progress towards today's goal, capped at 1.0
    pub fn goal_ratio(&self) -> f64 {
        if self.daily_goal == 0 {
            return 0.0;
        }
        (self.calories_today / f64::from(self.daily_goal)).clamp(0.0, 1.0)
    }

    /// Handle keyboard input; `true` means data should be reloaded
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return false;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') | KeyCode::Char('R') => return true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => self.toggle_panel(),
            KeyCode::Up | KeyCode::Char('k') => self.selected_index = self.selected_index.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index < self.max_index() {
                    self.selected_index += 1;
                }
            }
            _ => {}
        }
        false
    }

    fn toggle_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::RecentWorkouts => Panel::ExerciseTotals,
            Panel::ExerciseTotals => Panel::RecentWorkouts,
        };
        self.selected_index = 0;
    }

    fn max_index(&self) -> usize {
        match self.selected_panel {
            Panel::RecentWorkouts => self.recent_workouts.len().saturating_sub(1),
            Panel::ExerciseTotals => self.totals.len().saturating_sub(1),
        }
    }
}
