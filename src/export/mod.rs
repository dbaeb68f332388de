//! Video export
//!
//! Rate estimation, encoder invocation, and assembly of buffered
//! frames into a single output file.

pub mod assembler;
pub mod ffmpeg;
pub mod fps;

pub use assembler::VideoAssembler;
pub use ffmpeg::{Encode, EncodeError, FfmpegEncoder, PixelFormat};
pub use fps::estimate_fps;
