//! Error types and handling
//!
//! Common error types used across the crate.

use crate::capture::CaptureError;
use thiserror::Error;

/// Crate-wide error type
///
/// Only environment-level failures travel through this type: filesystem
/// setup problems and a begin-streaming handshake that could not be
/// issued. Per-frame capture failures and encoder failures degrade to
/// skipped frames or a missing output instead.
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),
}

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;
