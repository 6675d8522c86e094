use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph, Widget},
};

use rep_coach::models::WorkoutRecord;
use rep_coach::services::session::display_score;

use super::app::App;

fn border_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Render today's calories against the daily goal
pub fn render_calorie_gauge(area: Rect, buf: &mut Buffer, app: &App) {
    let title = match &app.user_name {
        Some(name) => format!(" 🔥 {}'s Daily Goal ", name),
        None => " 🔥 Daily Goal ".to_string(),
    };

    let ratio = app.goal_ratio();
    let color = if ratio >= 1.0 {
        Color::Green
    } else if ratio >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(false)),
        )
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .ratio(ratio)
        .label(format!("{:.2} / {} kcal", app.calories_today, app.daily_goal));

    gauge.render(area, buf);
}

/// Render recent workouts list
pub fn render_recent_workouts(
    area: Rect,
    buf: &mut Buffer,
    workouts: &[WorkoutRecord],
    selected_index: usize,
    is_selected: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🏋 Recent Workouts ")
        .border_style(border_style(is_selected));

    let inner = block.inner(area);
    block.render(area, buf);

    if workouts.is_empty() {
        let empty_text = Paragraph::new("No workouts yet.\nRun `rep-coach train` to record one!")
            .style(Style::default().fg(Color::Gray));
        empty_text.render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = workouts
        .iter()
        .enumerate()
        .map(|(idx, workout)| {
            let kind = workout.exercise_type;
            let line_style = if is_selected && idx == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let content = format!(
                "{} {:<15} {:>6} {:<7} {:>8.2} kcal",
                workout.timestamp.with_timezone(&Local).format("%m/%d %H:%M"),
                kind.label(),
                display_score(kind, workout.reps),
                kind.unit(),
                workout.calories
            );

            ListItem::new(Line::from(Span::styled(content, line_style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render calories per exercise as a bar chart
pub fn render_exercise_chart(area: Rect, buf: &mut Buffer, app: &App, is_selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📊 Calories by Exercise ")
        .border_style(border_style(is_selected));

    let inner = block.inner(area);
    block.render(area, buf);

    if app.totals.is_empty() {
        Paragraph::new("Nothing recorded yet.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let bars: Vec<Bar> = app
        .totals
        .iter()
        .enumerate()
        .map(|(idx, (kind, calories))| {
            let style = if is_selected && idx == app.selected_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };
            Bar::default()
                .label(Line::from(kind.as_str()))
                .value(calories.round().max(0.0) as u64)
                .text_value(format!("{:.1}", calories))
                .style(style)
        })
        .collect();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        .render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  ↑/k ↓/j   - Move selection"),
        Line::from("  Tab ←/→   - Switch panel"),
        Line::from("  r         - Refresh data"),
        Line::from("  ?         - Toggle this help"),
        Line::from("  q / Esc   - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, app: &App) {
    let workouts = Span::styled(
        format!(" {} recent workouts ", app.recent_workouts.len()),
        Style::default().fg(Color::Green).bg(Color::DarkGray),
    );

    let help_hint = Span::styled(
        " Press ? for help, q to quit ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    );

    Paragraph::new(Line::from(vec![workouts, help_hint])).render(area, buf);
}
