//! Recording session state
//!
//! Defines the frame buffer, the per-session state the recorder owns,
//! and recorder configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One captured still image plus its capture timestamp
#[derive(Debug, Clone)]
pub struct Frame {
    /// PNG-encoded image payload, stored as delivered by the capture
    /// source (never re-encoded by this layer)
    pub bytes: Vec<u8>,

    /// Monotonic capture time in seconds, sub-second precision
    pub timestamp: f64,
}

impl Frame {
    pub fn new(bytes: Vec<u8>, timestamp: f64) -> Self {
        Self { bytes, timestamp }
    }
}

/// State of one start-to-stop recording lifecycle
///
/// An explicit value owned by the recorder: frames are appended while
/// active and consumed by a successful stop. The output path is pinned
/// at session start and never changes afterwards.
#[derive(Debug, Default)]
pub struct RecordingSession {
    frames: Vec<Frame>,
    active: bool,
    output_path: Option<PathBuf>,
}

impl RecordingSession {
    /// Begin a new session: clear the buffer and pin the output path.
    pub fn begin(&mut self, output_path: PathBuf) {
        self.frames.clear();
        self.output_path = Some(output_path);
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Append one frame. Only meaningful while active.
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Consume the buffer after a produced output
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Configuration for the recorder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Base directory for session output files
    pub target_dir: PathBuf,

    /// Spacing used by callers polling `capture_frame` periodically
    pub frame_interval_ms: u64,

    /// Component name used in generated file names
    pub component_name: String,

    /// Logical test name used in generated file names
    pub test_name: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("storage/recordings"),
            frame_interval_ms: 100,
            component_name: "browser".to_string(),
            test_name: "session".to_string(),
        }
    }
}

/// Summary of a produced recording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingOutcome {
    /// Path of the encoded video
    pub path: PathBuf,

    /// File size in bytes
    pub size_bytes: u64,

    /// Duration reported by `ffprobe`, when available
    pub duration_secs: Option<f64>,
}
