//! Video assembly
//!
//! Materializes a buffered frame sequence as numbered image files in a
//! fresh temporary workspace, invokes the encoder, and removes the
//! workspace on every exit path.

use crate::export::ffmpeg::{Encode, FfmpegEncoder, PixelFormat};
use crate::export::fps::estimate_fps;
use crate::recorder::state::Frame;
use crate::utils::error::RecorderResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Zero-padded width of frame sequence numbers
const FRAME_INDEX_WIDTH: usize = 6;

/// Turns a frame sequence into an encoded video file
pub struct VideoAssembler<E: Encode = FfmpegEncoder> {
    encoder: E,
}

impl VideoAssembler<FfmpegEncoder> {
    /// Assembler using the system ffmpeg profile
    pub fn new(pixel_format: PixelFormat) -> Self {
        Self {
            encoder: FfmpegEncoder::new(pixel_format),
        }
    }
}

impl<E: Encode> VideoAssembler<E> {
    /// Assembler with a custom encoder collaborator
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Assemble `frames` into a video at `output_path`.
    ///
    /// Returns the output path only when the encoder reports success;
    /// encoder failures (missing binary, non-zero exit) are logged and
    /// reported as `None`. Filesystem failures creating the workspace
    /// or the output directory propagate — they signal an unusable
    /// environment, not a capture anomaly.
    pub fn assemble(
        &self,
        frames: &[Frame],
        output_path: &Path,
    ) -> RecorderResult<Option<PathBuf>> {
        if frames.len() < 2 {
            tracing::debug!("Assembly skipped: {} frame(s) buffered", frames.len());
            return Ok(None);
        }

        // TempDir removes the workspace and its contents when dropped,
        // so every early return below still cleans up.
        let workspace = tempfile::Builder::new()
            .prefix("testreel-frames-")
            .tempdir()?;

        for (index, frame) in frames.iter().enumerate() {
            let name = format!("frame_{index:0width$}.png", width = FRAME_INDEX_WIDTH);
            fs::write(workspace.path().join(name), &frame.bytes)?;
        }

        let fps = estimate_fps(
            frames.len(),
            frames[0].timestamp,
            frames[frames.len() - 1].timestamp,
        );
        tracing::info!(
            "Assembling {} frames at {} fps into {}",
            frames.len(),
            fps,
            output_path.display()
        );

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let pattern = workspace
            .path()
            .join(format!("frame_%0{FRAME_INDEX_WIDTH}d.png"));
        let encoded = self.encoder.encode(&pattern, fps, output_path);

        // Remove the workspace before interpreting the outcome, encoder
        // success or not.
        if let Err(e) = workspace.close() {
            tracing::warn!("Failed to remove frame workspace: {e}");
        }

        match encoded {
            Ok(()) => Ok(Some(output_path.to_path_buf())),
            Err(e) => {
                tracing::warn!("Encoder failed, no video produced: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ffmpeg::EncodeError;
    use std::cell::RefCell;

    struct SeenCall {
        workspace: PathBuf,
        frame_files: Vec<String>,
        fps: u32,
    }

    struct FakeEncoder {
        succeed: bool,
        seen: RefCell<Option<SeenCall>>,
    }

    impl FakeEncoder {
        fn new(succeed: bool) -> Self {
            Self {
                succeed,
                seen: RefCell::new(None),
            }
        }
    }

    impl Encode for FakeEncoder {
        fn encode(
            &self,
            input_pattern: &Path,
            fps: u32,
            output_path: &Path,
        ) -> Result<(), EncodeError> {
            let workspace = input_pattern.parent().unwrap().to_path_buf();
            let mut frame_files: Vec<String> = fs::read_dir(&workspace)
                .unwrap()
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            frame_files.sort();
            *self.seen.borrow_mut() = Some(SeenCall {
                workspace,
                frame_files,
                fps,
            });

            if self.succeed {
                fs::write(output_path, b"webm").unwrap();
                Ok(())
            } else {
                Err(EncodeError::Spawn(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "encoder missing",
                )))
            }
        }
    }

    fn frames(count: usize, spacing: f64) -> Vec<Frame> {
        (0..count)
            .map(|i| Frame::new(vec![0u8; 16], i as f64 * spacing))
            .collect()
    }

    #[test]
    fn produces_output_and_removes_workspace() {
        let target = tempfile::tempdir().unwrap();
        let output = target.path().join("run.webm");
        let assembler = VideoAssembler::with_encoder(FakeEncoder::new(true));

        let result = assembler.assemble(&frames(5, 0.1), &output).unwrap();

        assert_eq!(result, Some(output.clone()));
        assert!(output.exists());
        let seen = assembler.encoder.seen.borrow();
        let seen = seen.as_ref().unwrap();
        assert_eq!(seen.fps, estimate_fps(5, 0.0, 0.4));
        assert!(!seen.workspace.exists());
    }

    #[test]
    fn numbered_files_follow_capture_order() {
        let target = tempfile::tempdir().unwrap();
        let output = target.path().join("run.webm");
        let assembler = VideoAssembler::with_encoder(FakeEncoder::new(true));

        assembler.assemble(&frames(3, 0.1), &output).unwrap();

        let seen = assembler.encoder.seen.borrow();
        let files = &seen.as_ref().unwrap().frame_files;
        assert_eq!(
            files,
            &vec![
                "frame_000000.png".to_string(),
                "frame_000001.png".to_string(),
                "frame_000002.png".to_string(),
            ]
        );
    }

    #[test]
    fn encoder_failure_yields_none_and_still_cleans_up() {
        let target = tempfile::tempdir().unwrap();
        let output = target.path().join("run.webm");
        let assembler = VideoAssembler::with_encoder(FakeEncoder::new(false));

        let result = assembler.assemble(&frames(4, 0.1), &output).unwrap();

        assert_eq!(result, None);
        assert!(!output.exists());
        let seen = assembler.encoder.seen.borrow();
        assert!(!seen.as_ref().unwrap().workspace.exists());
    }

    #[test]
    fn creates_missing_output_parent() {
        let target = tempfile::tempdir().unwrap();
        let output = target.path().join("nested").join("deeper").join("run.webm");
        let assembler = VideoAssembler::with_encoder(FakeEncoder::new(true));

        let result = assembler.assemble(&frames(2, 0.5), &output).unwrap();

        assert_eq!(result, Some(output.clone()));
        assert!(output.exists());
    }

    #[test]
    fn fewer_than_two_frames_never_reaches_the_encoder() {
        let target = tempfile::tempdir().unwrap();
        let output = target.path().join("run.webm");
        let assembler = VideoAssembler::with_encoder(FakeEncoder::new(true));

        assert_eq!(assembler.assemble(&frames(1, 0.1), &output).unwrap(), None);
        assert_eq!(assembler.assemble(&[], &output).unwrap(), None);
        assert!(assembler.encoder.seen.borrow().is_none());
        assert!(!output.exists());
    }
}
