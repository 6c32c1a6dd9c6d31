//! Recorded input scripts and the fixed-rate replay loop.
//!
//! A script is JSON lines, one `{"t_ms": <f64>, "event": <InputEvent>}` per
//! line; blank lines and `#` comments are skipped. Replay owns the scheduling
//! loop: it advances a synthetic animation clock at a fixed frame rate,
//! dispatches every event whose timestamp has been reached, then ticks the
//! engine, the same order a browser gives input handlers and
//! `requestAnimationFrame`.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use canvas::camera::Transform;
use canvas::engine::EngineCore;
use canvas::input::InputEvent;
use serde::{Deserialize, Serialize};

use crate::DriverError;

/// Frames replayed past the last event while waiting for the camera to settle.
pub const MAX_SETTLE_FRAMES: u64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub t_ms: f64,
    pub event: InputEvent,
}

/// Camera state after one replayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub t_ms: f64,
    /// Seconds integrated this frame.
    pub dt: f64,
    pub transform: Transform,
    pub idle: bool,
}

/// Parse a script, returning entries ordered by timestamp (stable for ties).
///
/// # Errors
///
/// Returns [`DriverError::Script`] for a line that is not a valid entry,
/// [`DriverError::Timestamp`] for a negative or non-finite `t_ms`, and
/// [`DriverError::Read`] if the reader fails.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<ScriptEntry>, DriverError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| DriverError::Read { what: format!("script line {line_no}"), source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry: ScriptEntry =
            serde_json::from_str(trimmed).map_err(|source| DriverError::Script { line: line_no, source })?;
        if !entry.t_ms.is_finite() || entry.t_ms < 0.0 {
            return Err(DriverError::Timestamp { line: line_no, t_ms: entry.t_ms });
        }
        entries.push(entry);
    }
    entries.sort_by(|a, b| a.t_ms.total_cmp(&b.t_ms));
    tracing::debug!(events = entries.len(), "script parsed");
    Ok(entries)
}

/// Replay settings.
#[derive(Debug, Clone, Copy)]
pub struct Replay {
    pub fps: f64,
    /// Keep ticking after the last event until the camera is idle.
    pub settle: bool,
    pub max_settle_frames: u64,
}

impl Replay {
    /// # Errors
    ///
    /// Returns [`DriverError::Fps`] unless `fps` is finite and positive.
    pub fn new(fps: f64, settle: bool) -> Result<Self, DriverError> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self { fps, settle, max_settle_frames: MAX_SETTLE_FRAMES })
        } else {
            Err(DriverError::Fps(fps))
        }
    }

    /// Drive `core` through `script`, calling `on_frame` after every tick.
    /// Returns the last frame.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `on_frame`.
    pub fn run(
        &self,
        core: &mut EngineCore,
        script: &[ScriptEntry],
        mut on_frame: impl FnMut(&FrameRecord) -> Result<(), DriverError>,
    ) -> Result<FrameRecord, DriverError> {
        let frame_ms = 1000.0 / self.fps;
        let end_ms = script.last().map_or(0.0, |entry| entry.t_ms);
        let mut pending = script.iter().peekable();
        let mut frame: u64 = 0;
        let mut settle_frames: u64 = 0;

        loop {
            #[allow(clippy::cast_precision_loss)]
            let t_ms = frame as f64 * frame_ms;

            while let Some(entry) = pending.next_if(|entry| entry.t_ms <= t_ms) {
                if let Some(command) = core.handle(&entry.event) {
                    tracing::trace!(t_ms = entry.t_ms, ?command, "input applied");
                }
            }

            let dt = core.tick(t_ms);
            let record = FrameRecord { frame, t_ms, dt, transform: core.transform(), idle: core.is_idle() };
            on_frame(&record)?;

            let script_done = pending.peek().is_none() && t_ms >= end_ms;
            if script_done {
                if !self.settle || record.idle {
                    return Ok(record);
                }
                settle_frames += 1;
                if settle_frames >= self.max_settle_frames {
                    tracing::warn!(frames = settle_frames, "camera did not settle; stopping replay");
                    return Ok(record);
                }
            }
            frame += 1;
        }
    }
}
