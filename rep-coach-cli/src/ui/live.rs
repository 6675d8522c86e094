// Live session feedback: overlay spinner and keyboard stop

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

use rep_coach::models::ExerciseKind;
use rep_coach::services::classifier::RepEvent;
use rep_coach::services::session::{FrameObserver, FrameReport, StopSignal};

/// Ends the session when `q`, Esc or Ctrl-C is pressed
///
/// Holds the terminal in raw mode for its lifetime.
pub struct KeyboardStop {
    _private: (),
}

impl KeyboardStop {
    /// Attach to the terminal, or `None` when stdin is not interactive
    pub fn attach() -> Result<Option<Self>> {
        if !std::io::stdin().is_terminal() {
            return Ok(None);
        }
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Some(Self { _private: () }))
    }
}

impl StopSignal for KeyboardStop {
    fn should_stop(&mut self) -> bool {
        // Non-blocking: drain whatever is queued, never wait for input
        while let Ok(true) = event::poll(Duration::ZERO) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Keyboard input unavailable: {}", e);
                    return false;
                }
            }
        }
        false
    }
}

impl Drop for KeyboardStop {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Stop signal for non-interactive runs: the stream end finishes the session
pub struct EndOfStream;

impl StopSignal for EndOfStream {
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Spinner line showing the classifier overlay for the latest frame
pub struct LiveOverlay {
    kind: ExerciseKind,
    bar: ProgressBar,
}

impl LiveOverlay {
    pub fn new(kind: ExerciseKind) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix(kind.label());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { kind, bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl FrameObserver for LiveOverlay {
    fn on_frame(&mut self, report: &FrameReport) {
        self.bar.set_message(overlay_line(self.kind, report));
        if let RepEvent::Rep { count } = report.event {
            tracing::debug!("Rep {} at {} ms", count, report.timestamp_ms);
        }
    }
}

/// One-line rendering of a frame report
pub fn overlay_line(kind: ExerciseKind, report: &FrameReport) -> String {
    let stage = report
        .stage
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!("{} {} | stage: {}", report.display_score, kind.unit(), stage);
    for text in &report.overlay {
        line.push_str(" | ");
        line.push_str(text);
    }
    line
}
