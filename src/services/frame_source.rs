//! Landmark frame sources
//!
//! The pose estimator sits behind `FrameSource`. Recorded streams are JSON
//! Lines, one frame per line:
//!
//! ```text
//! {"timestamp_ms": 33, "landmarks": {"left_elbow": {"x": 0.5, "y": 0.4, "visibility": 0.9}}}
//! ```

use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::CaptureError;
use crate::models::{JointName, JointPoint, PoseFrame};

/// Yields one landmark snapshot per captured frame
pub trait FrameSource: Send {
    /// Next frame, or `None` once the stream has ended
    fn next_frame(&mut self) -> Result<Option<PoseFrame>, CaptureError>;
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    timestamp_ms: u64,
    #[serde(default)]
    landmarks: HashMap<String, JointPoint>,
}

/// Replays a recorded JSON Lines landmark stream
#[derive(Debug)]
pub struct ReplaySource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CaptureError::Unavailable(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Replaying landmark stream from {:?}", path);
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    fn parse(&self, text: &str) -> Result<PoseFrame, CaptureError> {
        let raw: RawFrame = serde_json::from_str(text).map_err(|e| CaptureError::Malformed {
            line: self.line,
            message: e.to_string(),
        })?;

        let mut frame = PoseFrame::new(raw.timestamp_ms);
        for (name, point) in raw.landmarks {
            match name.parse::<JointName>() {
                Ok(joint) => frame.insert(joint, point),
                Err(_) => tracing::trace!("Ignoring unknown joint '{}' on line {}", name, self.line),
            }
        }
        Ok(frame)
    }
}

impl<R: BufRead + Send> FrameSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>, CaptureError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return self.parse(text).map(Some);
        }
    }
}

/// In-memory frames, used for scripted sessions
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<PoseFrame>,
}

impl From<Vec<PoseFrame>> for MemorySource {
    fn from(frames: Vec<PoseFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>, CaptureError> {
        Ok(self.frames.pop_front())
    }
}
