//! FFmpeg encoder invocation
//!
//! Wraps the external `ffmpeg` binary behind a narrow trait so the
//! assembler's frame and rate logic can be tested with a fake encoder.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Errors from one encoder invocation.
///
/// Both variants are recoverable at the session level: the assembler
/// reports them as a missing output, never a crash.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The encoder binary could not be started (usually not installed)
    #[error("failed to start encoder: {0}")]
    Spawn(#[source] std::io::Error),

    /// The encoder ran and exited non-zero
    #[error("encoder exited with {status}: {stderr}")]
    Exited {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Pixel format of the encoded output
///
/// A fixed system choice per capture variant, not a per-call option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Opaque output (direct screenshots)
    #[default]
    Opaque,
    /// Alpha-capable output (protocol screencast frames)
    Alpha,
}

impl PixelFormat {
    /// FFmpeg `-pix_fmt` value
    pub fn as_ffmpeg_arg(&self) -> &'static str {
        match self {
            PixelFormat::Opaque => "yuv420p",
            PixelFormat::Alpha => "yuva420p",
        }
    }
}

/// Narrow encoder collaborator interface
pub trait Encode {
    /// Encode the numbered-frame sequence matching `input_pattern` into
    /// a video at `output_path`, declaring `fps` as the input rate.
    fn encode(&self, input_pattern: &Path, fps: u32, output_path: &Path)
        -> Result<(), EncodeError>;
}

/// Encoder that shells out to the `ffmpeg` binary
pub struct FfmpegEncoder {
    binary: String,
    pixel_format: PixelFormat,
}

impl FfmpegEncoder {
    pub fn new(pixel_format: PixelFormat) -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            pixel_format,
        }
    }

    /// Override the binary name or path (unusual installs, tests)
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    fn build_args(&self, input_pattern: &Path, fps: u32, output_path: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-framerate".to_string(),
            fps.to_string(),
            "-i".to_string(),
            input_pattern.to_string_lossy().into_owned(),
            "-c:v".to_string(),
            "libvpx-vp9".to_string(),
            "-crf".to_string(),
            "30".to_string(),
            "-b:v".to_string(),
            "0".to_string(),
            "-pix_fmt".to_string(),
            self.pixel_format.as_ffmpeg_arg().to_string(),
            output_path.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new(PixelFormat::Opaque)
    }
}

impl Encode for FfmpegEncoder {
    fn encode(
        &self,
        input_pattern: &Path,
        fps: u32,
        output_path: &Path,
    ) -> Result<(), EncodeError> {
        let args = self.build_args(input_pattern, fps, output_path);
        tracing::info!("Starting {} encoder: {:?}", self.binary, args);

        // Blocks until the encoder exits; no timeout is imposed here,
        // the surrounding test run is already time-bounded.
        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(EncodeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(EncodeError::Exited {
                status: output.status,
                stderr,
            });
        }

        tracing::info!("Encoder finished: {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_declare_rate_codec_and_output() {
        let encoder = FfmpegEncoder::default();
        let args = encoder.build_args(
            Path::new("/tmp/work/frame_%06d.png"),
            12,
            Path::new("/tmp/out/demo.webm"),
        );

        assert_eq!(args[0], "-y");
        let framerate = args.iter().position(|a| a == "-framerate").unwrap();
        assert_eq!(args[framerate + 1], "12");
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input + 1], "/tmp/work/frame_%06d.png");
        assert!(args.contains(&"libvpx-vp9".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/out/demo.webm");
    }

    #[test]
    fn opaque_and_alpha_pixel_formats() {
        let opaque = FfmpegEncoder::new(PixelFormat::Opaque).build_args(
            Path::new("p_%06d.png"),
            10,
            Path::new("o.webm"),
        );
        assert!(opaque.contains(&"yuv420p".to_string()));

        let alpha = FfmpegEncoder::new(PixelFormat::Alpha).build_args(
            Path::new("p_%06d.png"),
            10,
            Path::new("o.webm"),
        );
        assert!(alpha.contains(&"yuva420p".to_string()));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let encoder =
            FfmpegEncoder::default().with_binary("testreel-no-such-encoder-binary");
        let out: PathBuf = std::env::temp_dir().join("testreel-spawn-test.webm");
        let result = encoder.encode(Path::new("frame_%06d.png"), 10, &out);
        assert!(matches!(result, Err(EncodeError::Spawn(_))));
        assert!(!out.exists());
    }
}
