//! Error types for the canvas crate.

/// A rigid-body parameter was out of range. The previous value is retained.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("mass must be > 0")]
    Mass { value: f64 },
    #[error("drag coefficient must be >= 0")]
    DragCoefficient { value: f64 },
}

/// Camera configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid camera config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid body tuning: {0}")]
    Invalid(#[from] ValidationError),
    #[error("scale bounds must satisfy 0 < min <= 1 <= max (got min {min}, max {max})")]
    Scale { min: f64, max: f64 },
    #[error("max frame delta must be >= 0 (got {0})")]
    FrameDelta(f64),
}
