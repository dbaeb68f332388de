//! Capture sources
//!
//! Two variants feed the same frame buffer: direct screenshot polling
//! and the protocol-driven screencast handshake.

pub mod screencast;
pub mod screenshot;
pub mod traits;

pub use screencast::{ScreencastParams, ScreencastSource};
pub use screenshot::ScreenshotSource;
pub use traits::{BrowserDriver, CaptureError, CaptureSource};
