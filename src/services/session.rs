//! Exercise session runner
//!
//! Owns one classifier and its state for the length of a session, drives
//! the frame loop, and turns the final counter into a workout record.

use crate::config::CaptureConfig;
use crate::error::SessionError;
use crate::models::{ExerciseKind, PoseFrame, WorkoutRecord};
use crate::services::classifier::{classifier_for, ClassifierState, RepClassifier, RepEvent, Stage};
use crate::services::cue::CueSink;
use crate::services::frame_source::FrameSource;
use crate::services::storage::WorkoutStore;

/// Polled once per loop iteration; `true` ends the session
pub trait StopSignal {
    fn should_stop(&mut self) -> bool;
}

impl<F: FnMut() -> bool> StopSignal for F {
    fn should_stop(&mut self) -> bool {
        self()
    }
}

/// Receives the report for every processed frame (live overlay, logging)
pub trait FrameObserver {
    fn on_frame(&mut self, report: &FrameReport);
}

impl<F: FnMut(&FrameReport)> FrameObserver for F {
    fn on_frame(&mut self, report: &FrameReport) {
        self(report)
    }
}

/// Outcome of feeding one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub timestamp_ms: u64,
    pub event: RepEvent,
    pub stage: Option<Stage>,
    pub counter: f64,
    pub display_score: String,
    pub overlay: Vec<String>,
}

/// Final tally of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub kind: ExerciseKind,
    pub counter: f64,
    pub calories: f64,
    pub display_score: String,
    pub frames: usize,
    pub skipped_frames: usize,
}

impl SessionSummary {
    /// Workout record for this session; `None` when nothing was counted
    pub fn into_record(&self) -> Option<WorkoutRecord> {
        (self.counter > 0.0).then(|| WorkoutRecord::new(self.kind, self.counter, self.calories))
    }
}

/// Calories for a counter value, rounded to two decimals
pub fn calories(kind: ExerciseKind, counter: f64) -> f64 {
    (counter * kind.calorie_factor() * 100.0).round() / 100.0
}

/// Counter as shown to the user: whole reps, or seconds to one decimal
pub fn display_score(kind: ExerciseKind, counter: f64) -> String {
    if kind.is_timed() {
        format!("{:.1}", counter)
    } else {
        format!("{}", counter.trunc() as i64)
    }
}

/// Save a session's record if it counted anything
///
/// On failure the unsaved record travels with the error so the caller can
/// still show it.
pub fn persist(summary: &SessionSummary, store: &dyn WorkoutStore) -> Result<Option<WorkoutRecord>, SessionError> {
    let Some(record) = summary.into_record() else {
        tracing::info!("Nothing counted for {}, not saving", summary.kind);
        return Ok(None);
    };

    match store.save_workout(&record) {
        Ok(()) => Ok(Some(record)),
        Err(source) => Err(SessionError::Persistence {
            record: Box::new(record),
            source,
        }),
    }
}

pub struct SessionRunner {
    classifier: Box<dyn RepClassifier>,
    state: ClassifierState,
    cue: Box<dyn CueSink>,
    frames: usize,
    skipped_frames: usize,
}

impl SessionRunner {
    /// Start a fresh session for `kind`
    pub fn new(kind: ExerciseKind, capture: &CaptureConfig, cue: Box<dyn CueSink>) -> Self {
        tracing::info!("Starting {} session", kind);
        Self {
            classifier: classifier_for(kind, capture),
            state: ClassifierState::new(),
            cue,
            frames: 0,
            skipped_frames: 0,
        }
    }

    /// Start a session from a mode selector string such as `"squat"`
    pub fn from_selector(selector: &str, capture: &CaptureConfig, cue: Box<dyn CueSink>) -> Result<Self, SessionError> {
        let kind: ExerciseKind = selector.parse()?;
        Ok(Self::new(kind, capture, cue))
    }

    pub fn kind(&self) -> ExerciseKind {
        self.classifier.kind()
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Run one classifier update and fire the cue on a completed rep
    pub fn feed(&mut self, frame: &PoseFrame) -> FrameReport {
        let update = self.classifier.update(&self.state, frame);
        self.state = update.state;
        self.frames += 1;

        match &update.event {
            RepEvent::Rep { count } => {
                tracing::debug!("{} rep {}", self.kind(), count);
                if let Err(e) = self.cue.play() {
                    tracing::debug!("Ignoring cue failure: {}", e);
                }
            }
            RepEvent::Skipped(_) => self.skipped_frames += 1,
            _ => {}
        }

        FrameReport {
            timestamp_ms: frame.timestamp_ms,
            event: update.event,
            stage: self.state.stage,
            counter: self.state.counter,
            display_score: display_score(self.kind(), self.state.counter),
            overlay: update.overlay,
        }
    }

    /// Pull frames until the stream ends or `stop` fires
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        stop: &mut impl StopSignal,
        observer: &mut impl FrameObserver,
    ) -> Result<SessionSummary, SessionError> {
        while let Some(frame) = source.next_frame()? {
            let report = self.feed(&frame);
            observer.on_frame(&report);

            if stop.should_stop() {
                tracing::info!("Stop requested after {} frames", self.frames);
                break;
            }
        }

        let summary = self.finish();
        tracing::info!(
            "Finished {} session: {} ({} calories, {} of {} frames skipped)",
            summary.kind,
            summary.display_score,
            summary.calories,
            summary.skipped_frames,
            summary.frames
        );
        Ok(summary)
    }

    /// Summarize the session so far
    pub fn finish(&self) -> SessionSummary {
        let kind = self.kind();
        SessionSummary {
            kind,
            counter: self.state.counter,
            calories: calories(kind, self.state.counter),
            display_score: display_score(kind, self.state.counter),
            frames: self.frames,
            skipped_frames: self.skipped_frames,
        }
    }
}
