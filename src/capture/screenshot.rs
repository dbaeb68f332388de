//! Direct screenshot capture
//!
//! The polling variant: every frame is an explicit screenshot request
//! against the live browser session. No handshake, no teardown.

use super::traits::{BrowserDriver, CaptureError, CaptureSource};

/// Capture source backed by on-demand driver screenshots
pub struct ScreenshotSource<D: BrowserDriver> {
    driver: D,
}

impl<D: BrowserDriver> ScreenshotSource<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
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
}

impl<D: BrowserDriver> CaptureSource for ScreenshotSource<D> {
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        self.driver.take_screenshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PixelFormat;
    use serde_json::Value;

    struct CountingDriver {
        shots: usize,
    }

    impl BrowserDriver for CountingDriver {
        fn take_screenshot(&mut self) -> Result<Vec<u8>, CaptureError> {
            self.shots += 1;
            Ok(vec![0x89, 0x50, 0x4E, 0x47])
        }

        fn execute_command(
            &mut self,
            _target: &str,
            method: &str,
            _params: Value,
        ) -> Result<Value, CaptureError> {
            panic!("polling variant must not issue protocol commands, got {method}");
        }
    }

    #[test]
    fn capture_delegates_to_driver_screenshot() {
        let mut source = ScreenshotSource::new(CountingDriver { shots: 0 });
        let bytes = source.capture().unwrap();
        assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(source.driver().shots, 1);
    }

    #[test]
    fn lifecycle_hooks_are_no_ops() {
        let mut source = ScreenshotSource::new(CountingDriver { shots: 0 });
        source.begin().unwrap();
        source.end();
        assert_eq!(source.driver().shots, 0);
    }

    #[test]
    fn output_is_opaque() {
        let source = ScreenshotSource::new(CountingDriver { shots: 0 });
        assert_eq!(source.pixel_format(), PixelFormat::Opaque);
    }
}
