//! Playback rate estimation
//!
//! Capture intervals are irregular (best-effort, subject to scheduling
//! jitter), so the encoder is told a rate derived from actual elapsed
//! wall time rather than a fixed assumption. The clamp keeps noisy or
//! near-equal timestamps from producing degenerate rates.

/// Rate used when the buffered timestamps span no positive duration
pub const FALLBACK_FPS: u32 = 10;

/// Lowest rate ever handed to the encoder
pub const MIN_FPS: u32 = 1;

/// Highest rate ever handed to the encoder
pub const MAX_FPS: u32 = 30;

/// Estimate an integer playback rate for a buffered frame sequence.
///
/// `first_ts` and `last_ts` are the first and last buffered capture
/// timestamps in seconds. A zero or negative duration (clock anomaly,
/// near-simultaneous captures) falls back to [`FALLBACK_FPS`].
pub fn estimate_fps(frame_count: usize, first_ts: f64, last_ts: f64) -> u32 {
    let duration = last_ts - first_ts;
    let fps = if duration > 0.0 {
        (frame_count as f64 / duration).round() as i64
    } else {
        i64::from(FALLBACK_FPS)
    };
    fps.clamp(i64::from(MIN_FPS), i64::from(MAX_FPS)) as u32
}
