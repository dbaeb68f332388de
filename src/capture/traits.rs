//! Capture trait definitions
//!
//! Contracts between the recorder and its collaborators: the external
//! browser driver, and the capture-source seam the recorder polls.

use crate::export::PixelFormat;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by capture collaborators
#[derive(Error, Debug)]
pub enum CaptureError {
    /// A screenshot request failed
    #[error("screenshot failed: {0}")]
    Screenshot(String),

    /// A protocol command failed or could not be delivered
    #[error("protocol command {method} failed: {detail}")]
    Protocol { method: String, detail: String },

    /// A protocol response did not carry a usable image payload
    #[error("bad frame payload: {0}")]
    Payload(String),
}

/// External browser-automation collaborator.
///
/// Implemented over whatever drives the browser under test: a WebDriver
/// client, a DevTools websocket, or a test double. The recorder never
/// talks to the browser through anything else.
pub trait BrowserDriver {
    /// Request one still image of the current page, PNG-encoded.
    fn take_screenshot(&mut self) -> Result<Vec<u8>, CaptureError>;

    /// Execute a remote-debugging-protocol command against a page target.
    fn execute_command(
        &mut self,
        target: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, CaptureError>;
}

/// A source of frames for one recording session.
///
/// Both capture variants implement this; the recorder drives them
/// identically.
pub trait CaptureSource {
    /// Called once when a session starts, before any frame is buffered.
    fn begin(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    /// Obtain one PNG-encoded frame.
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError>;

    /// Called once when a session stops. Best-effort: implementations
    /// swallow their own failures, stopping must never fail the test.
    fn end(&mut self) {}

    /// Pixel format the encoder should use for this source's frames.
    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Opaque
    }
}
