use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use rep_coach::services::storage::Storage;

use super::app::{App, Panel};
use super::widgets;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    storage: Storage,
    app: App,
}

impl Dashboard {
    /// Load data, then take over the terminal
    pub fn new(storage: Storage) -> Result<Self> {
        let app = App::load(&storage).context("Failed to load dashboard data")?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal, storage, app })
    }

    /// Run the dashboard event loop
    pub fn run(&mut self) -> Result<()> {
        while !self.app.should_quit {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.app.handle_key(key.code) {
                        self.app.refresh(&self.storage)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Gauge on top, panels in the middle, status bar at the bottom
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    widgets::render_calorie_gauge(rows[0], f.buffer_mut(), app);

    widgets::render_recent_workouts(
        columns[0],
        f.buffer_mut(),
        &app.recent_workouts,
        app.selected_index,
        app.selected_panel == Panel::RecentWorkouts,
    );

    widgets::render_exercise_chart(
        columns[1],
        f.buffer_mut(),
        app,
        app.selected_panel == Panel::ExerciseTotals,
    );

    widgets::render_status_bar(rows[2], f.buffer_mut(), app);

    if app.show_help {
        let help_area = centered_rect(50, 60, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
