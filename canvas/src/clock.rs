//! Frame delta-time from host animation-frame timestamps.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use crate::consts::MAX_FRAME_DELTA;

/// Tracks the previous frame timestamp for the scheduling loop that owns it.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    /// `max_delta` is the largest gap, in seconds, that is integrated.
    #[must_use]
    pub fn new(max_delta: f64) -> Self {
        Self { last_ms: None, max_delta }
    }

    /// Record a frame timestamp (milliseconds) and return the seconds to integrate.
    ///
    /// The first frame after construction or [`FrameClock::reset`] returns 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let delta = self.last_ms.map_or(0.0, |last_ms| frame_delta(last_ms, timestamp_ms, self.max_delta));
        self.last_ms = Some(timestamp_ms);
        delta
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    #[must_use]
    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}

/// Seconds between two millisecond timestamps, or 0 if the gap is negative,
/// non-finite, or longer than `max_delta` seconds.
#[must_use]
pub fn frame_delta(last_ms: f64, now_ms: f64, max_delta: f64) -> f64 {
    let elapsed = (now_ms - last_ms) / 1000.0;
    if !elapsed.is_finite() || elapsed < 0.0 {
        return 0.0;
    }
    if elapsed > max_delta {
        tracing::debug!(elapsed, max_delta, "dropping stalled frame delta");
        return 0.0;
    }
    elapsed
}
