//! Testreel - video recordings of browser test runs, made simple.
//!
//! Buffers timestamped screenshots from a browser-automation session
//! and assembles them into a single WebM file via the external ffmpeg
//! binary, with the playback rate derived from actual capture timing
//! and guaranteed temp-workspace cleanup on every exit path.
//!
//! Two capture variants feed the same pipeline: direct screenshot
//! polling ([`ScreenshotSource`]) and the remote-debugging-protocol
//! screencast handshake ([`ScreencastSource`]). Either way, frames land
//! in a caller-owned [`Recorder`] session and are encoded on `stop`.

pub mod capture;
pub mod export;
pub mod recorder;
pub mod utils;

pub use capture::{
    BrowserDriver, CaptureError, CaptureSource, ScreencastParams, ScreencastSource,
    ScreenshotSource,
};
pub use export::{estimate_fps, Encode, EncodeError, FfmpegEncoder, PixelFormat, VideoAssembler};
pub use recorder::{
    probe_recording, Frame, Recorder, RecorderConfig, RecordingOutcome, RecordingSession,
    VIDEO_EXTENSION,
};
pub use utils::error::{RecorderError, RecorderResult};
