//! Shared numeric constants for the canvas crate.

// ── Math ────────────────────────────────────────────────────────

/// Per-axis tolerance for [`crate::vector::Vector2::is_equal`].
pub const VECTOR_EQ_TOLERANCE: f64 = 0.001;

// ── Pan body ────────────────────────────────────────────────────

pub const PAN_MASS: f64 = 1.5;
pub const PAN_DRAG: f64 = 10.0;
/// Pan speed cap in pixels per second.
pub const PAN_MAX_VELOCITY: f64 = 50_000.0;
/// Pan speed below which the camera snaps to rest.
pub const PAN_STOP_VELOCITY: f64 = 0.1;

// ── Zoom body ───────────────────────────────────────────────────

pub const ZOOM_MASS: f64 = 1.0;
pub const ZOOM_DRAG: f64 = 10.0;
/// Zoom speed cap in scale units per second.
pub const ZOOM_MAX_VELOCITY: f64 = 20.0;
pub const ZOOM_STOP_VELOCITY: f64 = 0.001;

/// Minimum scale factor.
pub const MIN_SCALE: f64 = 0.1;

/// Maximum scale factor.
pub const MAX_SCALE: f64 = 10.0;

// ── Input ───────────────────────────────────────────────────────

/// Force applied per held pan key.
pub const PAN_INTENSITY: f64 = 60.0;

/// Force multiplier while shift is held.
pub const SHIFT_MULTIPLIER: f64 = 3.0;

/// Zoom force per wheel pixel (sign inverted: scrolling down zooms out).
pub const WHEEL_INTENSITY: f64 = 0.6;

/// Zoom force per zoom key-down.
pub const KEY_ZOOM_INTENSITY: f64 = 30.0;

// ── Scheduling ──────────────────────────────────────────────────

/// Largest frame delta, in seconds, that is integrated. Longer gaps (e.g. a
/// backgrounded tab) integrate as zero.
pub const MAX_FRAME_DELTA: f64 = 0.5;
