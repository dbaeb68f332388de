//! Recording system module
//!
//! Session state and the coordinator driving one capture source
//! through the start / capture / stop lifecycle.

pub mod coordinator;
pub mod state;

pub use coordinator::{probe_recording, Recorder, VIDEO_EXTENSION};
pub use state::{Frame, RecorderConfig, RecordingOutcome, RecordingSession};
