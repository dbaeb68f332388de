//! Protocol-driven screencast capture
//!
//! The streamed variant: a start/stop screencast handshake over the
//! remote-debugging protocol brackets the session, and frames are
//! decoded from base64 protocol payloads.

use super::traits::{BrowserDriver, CaptureError, CaptureSource};
use crate::export::PixelFormat;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fixed parameter set for the begin-streaming command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreencastParams {
    /// Image format requested from the browser
    pub format: String,

    /// Compression quality (0-100)
    pub quality: u8,

    /// Capture every Nth frame the compositor produces
    pub every_nth_frame: u32,
}

impl Default for ScreencastParams {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            quality: 100,
            every_nth_frame: 1,
        }
    }
}

/// Capture source driven by the screencast protocol handshake
pub struct ScreencastSource<D: BrowserDriver> {
    driver: D,
    page_target: String,
    params: ScreencastParams,
}

impl<D: BrowserDriver> ScreencastSource<D> {
    pub fn new(driver: D, page_target: impl Into<String>) -> Self {
        Self {
            driver,
            page_target: page_target.into(),
            params: ScreencastParams::default(),
        }
    }

    pub fn with_params(mut self, params: ScreencastParams) -> Self {
        self.params = params;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consume the source and hand the driver back
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Decode the image payload of a pushed `Page.screencastFrame`
    /// event body.
    ///
    /// Event-delivered frames and polled screenshots land in the same
    /// buffer shape; callers pumping protocol events themselves use
    /// this to turn an event body into frame bytes.
    pub fn decode_event_frame(params: &Value) -> Result<Vec<u8>, CaptureError> {
        decode_payload(params)
    }
}

fn decode_payload(value: &Value) -> Result<Vec<u8>, CaptureError> {
    let data = value
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| CaptureError::Payload("missing data field".to_string()))?;
    BASE64
        .decode(data)
        .map_err(|e| CaptureError::Payload(format!("invalid base64 image data: {e}")))
}

impl<D: BrowserDriver> CaptureSource for ScreencastSource<D> {
    fn begin(&mut self) -> Result<(), CaptureError> {
        tracing::info!("Starting screencast on target {}", self.page_target);
        self.driver.execute_command(
            &self.page_target,
            "Page.startScreencast",
            json!({
                "format": self.params.format,
                "quality": self.params.quality,
                "everyNthFrame": self.params.every_nth_frame,
            }),
        )?;
        Ok(())
    }

    fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        let response = self.driver.execute_command(
            &self.page_target,
            "Page.captureScreenshot",
            json!({ "format": self.params.format }),
        )?;
        decode_payload(&response)
    }

    fn end(&mut self) {
        // A dead channel just means there is nothing left to stop.
        let stopped =
            self.driver
                .execute_command(&self.page_target, "Page.stopScreencast", json!({}));
        if let Err(e) = stopped {
            tracing::debug!("stopScreencast failed, continuing to assembly: {e}");
        }
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Alpha
    }
}
