//! Recording coordinator
//!
//! Owns the session state and drives one capture source through the
//! start / capture / stop lifecycle, handing buffered frames to the
//! assembler on stop.

use super::state::{Frame, RecorderConfig, RecordingOutcome, RecordingSession};
use crate::capture::CaptureSource;
use crate::export::{Encode, FfmpegEncoder, VideoAssembler};
use crate::utils::error::RecorderResult;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// File extension of every produced video
pub const VIDEO_EXTENSION: &str = "webm";

/// Session controller for one capture source
pub struct Recorder<S: CaptureSource, E: Encode = FfmpegEncoder> {
    source: S,
    assembler: VideoAssembler<E>,
    config: RecorderConfig,
    session: RecordingSession,
    epoch: Instant,
}

impl<S: CaptureSource> Recorder<S, FfmpegEncoder> {
    /// Recorder encoding with the system ffmpeg profile for the
    /// source's pixel format.
    pub fn new(source: S, config: RecorderConfig) -> Self {
        let assembler = VideoAssembler::new(source.pixel_format());
        Self::with_assembler(source, assembler, config)
    }
}

impl<S: CaptureSource, E: Encode> Recorder<S, E> {
    /// Recorder with a custom assembler (and encoder collaborator)
    pub fn with_assembler(
        source: S,
        assembler: VideoAssembler<E>,
        config: RecorderConfig,
    ) -> Self {
        Self {
            source,
            assembler,
            config,
            session: RecordingSession::default(),
            epoch: Instant::now(),
        }
    }

    /// Current session state
    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Configured spacing for periodic `capture_frame` polling
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.frame_interval_ms)
    }

    fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn resolve_output_path(&self, name: Option<&str>) -> PathBuf {
        let extension = format!(".{VIDEO_EXTENSION}");
        let file_name = match name {
            Some(name) if name.ends_with(&extension) => name.to_string(),
            Some(name) => format!("{name}{extension}"),
            None => format!(
                "{}_{}_{}{extension}",
                self.config.component_name,
                self.config.test_name,
                chrono::Utc::now().timestamp()
            ),
        };
        self.config.target_dir.join(file_name)
    }

    /// Start a recording session.
    ///
    /// Clears the frame buffer, resolves the output path once (a
    /// supplied name takes precedence over the generated
    /// `<component>_<test>_<unixTimestamp>` convention), and issues the
    /// source's begin handshake. Nothing touches the disk yet; the
    /// output directory is created lazily at assembly time.
    pub fn start(&mut self, name: Option<&str>) -> RecorderResult<()> {
        let output_path = self.resolve_output_path(name);
        // A begin-streaming handshake that cannot be issued surfaces:
        // recording cannot proceed meaningfully without it.
        self.source.begin()?;
        tracing::info!("Recording started: {}", output_path.display());
        self.session.begin(output_path);
        Ok(())
    }

    /// Capture one frame into the session buffer.
    ///
    /// No-op while not recording. Capture is best-effort: a failed
    /// screenshot is skipped, never an error — recording must not abort
    /// the surrounding test action.
    pub fn capture_frame(&mut self) {
        if !self.session.is_active() {
            return;
        }
        match self.source.capture() {
            Ok(bytes) => {
                let frame = Frame::new(bytes, self.now_secs());
                self.session.push_frame(frame);
            }
            Err(e) => tracing::debug!("Frame skipped: {e}"),
        }
    }

    /// Stop the session and assemble buffered frames into a video.
    ///
    /// Returns the output path, or `None` when nothing was produced:
    /// not recording, fewer than two frames (no rate or duration can be
    /// established), or an encoder failure. Only filesystem setup
    /// problems return an error. The buffer is consumed only when an
    /// output was produced.
    pub fn stop(&mut self) -> RecorderResult<Option<PathBuf>> {
        if !self.session.is_active() {
            return Ok(None);
        }
        self.session.deactivate();
        self.source.end();

        if self.session.frame_count() < 2 {
            tracing::info!(
                "Recording stopped with {} frame(s), no video produced",
                self.session.frame_count()
            );
            return Ok(None);
        }

        let Some(output_path) = self.session.output_path().map(Path::to_path_buf) else {
            return Ok(None);
        };

        let produced = self.assembler.assemble(self.session.frames(), &output_path)?;
        if produced.is_some() {
            self.session.clear();
        }
        Ok(produced)
    }

    /// Stop and probe the produced file for size and duration.
    pub fn stop_with_outcome(&mut self) -> RecorderResult<Option<RecordingOutcome>> {
        match self.stop()? {
            Some(path) => Ok(Some(probe_recording(&path)?)),
            None => Ok(None),
        }
    }

    /// Record around an arbitrary action: one frame before, one after.
    ///
    /// `stop` runs exactly once even when the action fails, and the
    /// action's error then propagates to the caller after cleanup. No
    /// sampling happens while the action runs; callers wanting denser
    /// coverage call [`capture_frame`](Self::capture_frame) between
    /// their own steps.
    pub fn record_around<T, F>(
        &mut self,
        name: Option<&str>,
        action: F,
    ) -> anyhow::Result<(T, Option<PathBuf>)>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.start(name)?;
        self.capture_frame();
        let outcome = action();
        self.capture_frame();
        let stopped = self.stop();

        // The action's failure wins over a fatal stop error; both ran.
        let value = outcome?;
        Ok((value, stopped?))
    }
}

/// Inspect a produced recording: file size always, duration when
/// `ffprobe` is available. A failed probe leaves the duration unset
/// rather than failing the recording.
pub fn probe_recording(path: &Path) -> RecorderResult<RecordingOutcome> {
    let size_bytes = std::fs::metadata(path)?.len();
    Ok(RecordingOutcome {
        path: path.to_path_buf(),
        size_bytes,
        duration_secs: probe_duration(path),
    })
}

fn probe_duration(path: &Path) -> Option<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}
