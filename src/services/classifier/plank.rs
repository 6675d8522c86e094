use std::time::Duration;

use crate::config::{CaptureConfig, HoldTiming};
use crate::error::MissingLandmark;
use crate::models::{ExerciseKind, JointName, PoseFrame};
use crate::services::geometry;

use super::{angle_label, ClassifierState, ClassifierUpdate, FormWarning, RepClassifier, RepEvent, Stage};

const STRAIGHT_BODY_DEG: f64 = 160.0;
const MAX_HEIGHT_DIFF: f64 = 0.3;

const JOINTS: [JointName; 3] = [JointName::LeftShoulder, JointName::LeftHip, JointName::LeftAnkle];

/// Accumulates plank hold time while the body is straight and horizontal
#[derive(Debug, Clone)]
pub struct PlankClassifier {
    min_visibility: f32,
    timing: HoldTiming,
    nominal_interval: Duration,
    max_frame_gap: Duration,
}

impl PlankClassifier {
    pub fn new(min_visibility: f32, timing: HoldTiming, nominal_interval: Duration, max_frame_gap: Duration) -> Self {
        Self {
            min_visibility,
            timing,
            nominal_interval,
            max_frame_gap,
        }
    }

    pub fn from_config(capture: &CaptureConfig) -> Self {
        Self::new(
            capture.min_visibility,
            capture.hold_timing,
            capture.nominal_interval(),
            capture.max_frame_gap(),
        )
    }

    /// Seconds credited for one holding frame
    fn hold_increment(&self, state: &ClassifierState, frame: &PoseFrame) -> f64 {
        match self.timing {
            HoldTiming::FixedRate => self.nominal_interval.as_secs_f64(),
            HoldTiming::Elapsed => match state.last_timestamp_ms {
                Some(prev) if frame.timestamp_ms >= prev => Duration::from_millis(frame.timestamp_ms - prev)
                    .min(self.max_frame_gap)
                    .as_secs_f64(),
                _ => self.nominal_interval.as_secs_f64(),
            },
        }
    }
}

impl RepClassifier for PlankClassifier {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Plank
    }

    fn required_joints(&self) -> &[JointName] {
        &JOINTS
    }

    fn step(&self, state: &ClassifierState, frame: &PoseFrame) -> Result<ClassifierUpdate, MissingLandmark> {
        let [shoulder, hip, ankle] = frame.require_all(JOINTS, self.min_visibility)?;

        let body_angle = geometry::angle(shoulder, hip, ankle);
        let height_diff = geometry::vertical_gap(shoulder, ankle);

        let mut next = state.clone();
        let event = if body_angle > STRAIGHT_BODY_DEG && height_diff < MAX_HEIGHT_DIFF {
            let seconds = self.hold_increment(state, frame);
            next.stage = Some(Stage::Holding);
            next.counter += seconds;
            RepEvent::Hold { seconds }
        } else {
            next.stage = Some(Stage::NotHolding);
            if height_diff >= MAX_HEIGHT_DIFF {
                RepEvent::Warning(FormWarning::GetOnFloor)
            } else {
                RepEvent::Warning(FormWarning::StraightenBack)
            }
        };

        let mut overlay = vec![
            angle_label(body_angle),
            format!("Time: {}s", next.counter.trunc() as i64),
        ];
        if let RepEvent::Warning(warning) = &event {
            overlay.push(warning.message().to_string());
        }

        Ok(ClassifierUpdate {
            state: next,
            event,
            overlay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JointPoint;
    use assert_matches::assert_matches;

    fn plank_frame(timestamp_ms: u64, hip_sag: f32, ankle_y: f32) -> PoseFrame {
        PoseFrame::new(timestamp_ms)
            .with_joint(JointName::LeftShoulder, JointPoint::new(0.2, 0.6))
            .with_joint(JointName::LeftHip, JointPoint::new(0.5, 0.6 + hip_sag))
            .with_joint(JointName::LeftAnkle, JointPoint::new(0.8, ankle_y))
    }

    fn fixed_rate() -> PlankClassifier {
        PlankClassifier::new(
            0.5,
            HoldTiming::FixedRate,
            Duration::from_secs_f64(1.0 / 30.0),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_fixed_rate_accumulates_per_frame() {
        let classifier = fixed_rate();
        let mut state = ClassifierState::new();
        for i in 0..90u64 {
            state = classifier.update(&state, &plank_frame(i * 33, 0.0, 0.6)).state;
        }
        assert!((state.counter - 3.0).abs() < 1e-6);
        assert_eq!(state.stage, Some(Stage::Holding));
    }

    #[test]
    fn test_elapsed_timing_uses_timestamps() {
        let classifier = PlankClassifier::from_config(&CaptureConfig::default());
        let mut state = ClassifierState::new();
        // First frame has no predecessor and gets the nominal 1/30 s
        state = classifier.update(&state, &plank_frame(0, 0.0, 0.6)).state;
        state = classifier.update(&state, &plank_frame(100, 0.0, 0.6)).state;
        state = classifier.update(&state, &plank_frame(300, 0.0, 0.6)).state;
        assert!((state.counter - (1.0 / 30.0 + 0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_timing_clamps_gaps() {
        let classifier = PlankClassifier::from_config(&CaptureConfig::default());
        let prior = ClassifierState {
            stage: Some(Stage::Holding),
            counter: 10.0,
            last_timestamp_ms: Some(1_000),
        };
        let update = classifier.update(&prior, &plank_frame(9_000, 0.0, 0.6));
        assert!((update.state.counter - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_skipped_frame_gap_is_credited_to_next_hold() {
        let classifier = PlankClassifier::from_config(&CaptureConfig::default());
        let mut state = ClassifierState::new();
        state = classifier.update(&state, &plank_frame(0, 0.0, 0.6)).state;
        state = classifier.update(&state, &plank_frame(100, 0.0, 0.6)).state;

        let hidden = PoseFrame::new(200)
            .with_joint(JointName::LeftShoulder, JointPoint::new(0.2, 0.6))
            .with_joint(JointName::LeftHip, JointPoint::new(0.5, 0.6));
        let skipped = classifier.update(&state, &hidden);
        assert_matches!(skipped.event, RepEvent::Skipped(_));
        assert_eq!(skipped.state.last_timestamp_ms, Some(100));
        state = skipped.state;

        // Hold time resumes from the last frame the body was seen
        let update = classifier.update(&state, &plank_frame(300, 0.0, 0.6));
        assert_matches!(update.event, RepEvent::Hold { seconds } if (seconds - 0.2).abs() < 1e-9);
        assert!((update.state.counter - (1.0 / 30.0 + 0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_sagging_hips_warn_straighten_back() {
        let classifier = fixed_rate();
        let update = classifier.update(&ClassifierState::new(), &plank_frame(0, 0.2, 0.6));
        assert_matches!(update.event, RepEvent::Warning(FormWarning::StraightenBack));
        assert_eq!(update.state.stage, Some(Stage::NotHolding));
        assert!(update.overlay.contains(&"STRAIGHTEN BACK!".to_string()));
    }

    #[test]
    fn test_standing_warns_get_on_floor() {
        let classifier = fixed_rate();
        // Ankle far below the shoulder: standing upright
        let frame = PoseFrame::new(0)
            .with_joint(JointName::LeftShoulder, JointPoint::new(0.5, 0.2))
            .with_joint(JointName::LeftHip, JointPoint::new(0.5, 0.5))
            .with_joint(JointName::LeftAnkle, JointPoint::new(0.5, 0.9));
        let update = classifier.update(&ClassifierState::new(), &frame);
        assert_matches!(update.event, RepEvent::Warning(FormWarning::GetOnFloor));
    }

    #[test]
    fn test_breaking_form_keeps_counter() {
        let classifier = fixed_rate();
        let mut state = ClassifierState::new();
        for i in 0..30u64 {
            state = classifier.update(&state, &plank_frame(i * 33, 0.0, 0.6)).state;
        }
        let held = state.counter;
        for i in 30..60u64 {
            state = classifier.update(&state, &plank_frame(i * 33, 0.2, 0.6)).state;
            assert_eq!(state.counter, held);
        }
    }
}
