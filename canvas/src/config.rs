//! Camera tuning, loaded from JSON supplied by the host.
//!
//! Every field is optional in the JSON; anything left out keeps the default
//! from [`crate::consts`]. Body blocks merge field by field, so
//! `{"pan": {"drag": 4}}` changes only the pan drag.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::body::{Motion, RigidBody};
use crate::consts::{
    KEY_ZOOM_INTENSITY, MAX_FRAME_DELTA, MAX_SCALE, MIN_SCALE, PAN_DRAG, PAN_INTENSITY, PAN_MASS, PAN_MAX_VELOCITY,
    PAN_STOP_VELOCITY, SHIFT_MULTIPLIER, WHEEL_INTENSITY, ZOOM_DRAG, ZOOM_MASS, ZOOM_MAX_VELOCITY, ZOOM_STOP_VELOCITY,
};
use crate::error::{ConfigError, ValidationError};

/// Physical parameters for one rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyTuning {
    pub mass: f64,
    pub drag: f64,
    /// `< 0` disables the speed cap.
    pub max_velocity: f64,
    /// `< 0` disables the rest snap.
    pub stop_velocity: f64,
}

impl BodyTuning {
    pub const PAN: Self =
        Self { mass: PAN_MASS, drag: PAN_DRAG, max_velocity: PAN_MAX_VELOCITY, stop_velocity: PAN_STOP_VELOCITY };

    pub const ZOOM: Self =
        Self { mass: ZOOM_MASS, drag: ZOOM_DRAG, max_velocity: ZOOM_MAX_VELOCITY, stop_velocity: ZOOM_STOP_VELOCITY };

    /// Build a body at rest with these parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `mass <= 0` or `drag < 0`.
    pub fn build<V: Motion>(&self) -> Result<RigidBody<V>, ValidationError> {
        let mut body = RigidBody::new();
        body.set_mass(self.mass)?;
        body.set_drag_coefficient(self.drag)?;
        body.max_velocity = self.max_velocity;
        body.stop_velocity = self.stop_velocity;
        Ok(body)
    }
}

/// Full camera configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraConfig {
    pub pan: BodyTuning,
    pub zoom: BodyTuning,
    /// Push per held pan key.
    pub pan_intensity: f64,
    /// Push multiplier while shift is held.
    pub shift_multiplier: f64,
    /// Zoom force per wheel pixel.
    pub wheel_intensity: f64,
    /// Zoom force per zoom key-down.
    pub key_zoom_intensity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Frame deltas above this many seconds integrate as zero.
    pub max_frame_delta: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan: BodyTuning::PAN,
            zoom: BodyTuning::ZOOM,
            pan_intensity: PAN_INTENSITY,
            shift_multiplier: SHIFT_MULTIPLIER,
            wheel_intensity: WHEEL_INTENSITY,
            key_zoom_intensity: KEY_ZOOM_INTENSITY,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl CameraConfig {
    /// Parse overrides from JSON on top of the defaults, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown fields, and
    /// the errors of [`CameraConfig::validate`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let config = overrides.merge(Self::default());
        config.validate()?;
        Ok(config)
    }

    /// Check every value the camera relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a bad mass or drag,
    /// [`ConfigError::Scale`] unless `0 < min_scale <= 1 <= max_scale`, and
    /// [`ConfigError::FrameDelta`] for a negative or NaN frame ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pan.build::<f64>()?;
        self.zoom.build::<f64>()?;
        let scale_ok = self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0;
        if !scale_ok {
            return Err(ConfigError::Scale { min: self.min_scale, max: self.max_scale });
        }
        if self.max_frame_delta >= 0.0 { Ok(()) } else { Err(ConfigError::FrameDelta(self.max_frame_delta)) }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BodyOverrides {
    mass: Option<f64>,
    drag: Option<f64>,
    max_velocity: Option<f64>,
    stop_velocity: Option<f64>,
}

impl BodyOverrides {
    fn merge(self, base: BodyTuning) -> BodyTuning {
        BodyTuning {
            mass: self.mass.unwrap_or(base.mass),
            drag: self.drag.unwrap_or(base.drag),
            max_velocity: self.max_velocity.unwrap_or(base.max_velocity),
            stop_velocity: self.stop_velocity.unwrap_or(base.stop_velocity),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    pan: BodyOverrides,
    zoom: BodyOverrides,
    pan_intensity: Option<f64>,
    shift_multiplier: Option<f64>,
    wheel_intensity: Option<f64>,
    key_zoom_intensity: Option<f64>,
    min_scale: Option<f64>,
    max_scale: Option<f64>,
    max_frame_delta: Option<f64>,
}

impl ConfigOverrides {
    fn merge(self, base: CameraConfig) -> CameraConfig {
        CameraConfig {
            pan: self.pan.merge(base.pan),
            zoom: self.zoom.merge(base.zoom),
            pan_intensity: self.pan_intensity.unwrap_or(base.pan_intensity),
            shift_multiplier: self.shift_multiplier.unwrap_or(base.shift_multiplier),
            wheel_intensity: self.wheel_intensity.unwrap_or(base.wheel_intensity),
            key_zoom_intensity: self.key_zoom_intensity.unwrap_or(base.key_zoom_intensity),
            min_scale: self.min_scale.unwrap_or(base.min_scale),
            max_scale: self.max_scale.unwrap_or(base.max_scale),
            max_frame_delta: self.max_frame_delta.unwrap_or(base.max_frame_delta),
        }
    }
}
