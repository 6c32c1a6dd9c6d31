//! Inertial zoom controller.
//!
//! `CameraZoom` owns a [`RigidBody1D`] whose position is the scale factor
//! (seeded at 1). Zoom forces are impulses: they act for exactly one tick and
//! drag bleeds off the resulting velocity. After writing the new scale the
//! controller shifts the pan so the world point under the viewport center
//! stays put; without that, scaling about the origin drifts the view.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use crate::body::RigidBody1D;
use crate::camera::RenderSurface;
use crate::config::BodyTuning;
use crate::error::ValidationError;
use crate::movement::{CameraMovement, track_motion};
use crate::vector::Vector2;

#[derive(Debug, Clone)]
pub struct CameraZoom {
    body: RigidBody1D,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    moving: bool,
}

impl CameraZoom {
    /// Build a zoom controller at scale 1, bounded to `[min_scale, max_scale]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the tuning has an invalid mass or drag.
    pub fn new(tuning: &BodyTuning, min_scale: f64, max_scale: f64) -> Result<Self, ValidationError> {
        let mut body: RigidBody1D = tuning.build()?;
        body.position = 1.0;
        Ok(Self { body, scale: 1.0, min_scale, max_scale, moving: false })
    }

    /// Replace any pending zoom push with one of `intensity` (positive zooms in).
    pub fn apply_zoom(&mut self, intensity: f64) {
        self.body.remove_forces();
        self.body.apply_force(intensity);
    }

    /// Integrate one frame, write the scale into `surface` and re-center the pan.
    ///
    /// Must run after `movement` has ticked for the same frame, since the
    /// re-centering reads the current pan position.
    pub fn tick(
        &mut self,
        delta_time: f64,
        surface: &mut impl RenderSurface,
        movement: &mut CameraMovement,
        viewport: Vector2,
    ) {
        self.body.update(delta_time);
        // A zero-length frame integrates nothing, so the impulse waits for the next one.
        if delta_time > 0.0 {
            self.body.remove_forces();
        }

        let integrated = self.body.position;
        if !integrated.is_finite() || integrated < self.min_scale || integrated > self.max_scale {
            let bounded = if integrated.is_finite() {
                integrated.max(self.min_scale).min(self.max_scale)
            } else {
                self.scale
            };
            tracing::debug!(scale = bounded, "zoom hit scale bound");
            self.body.position = bounded;
            self.body.velocity = 0.0;
        }

        self.set_scale(self.body.position, surface, movement, viewport);
        self.moving = track_motion("zoom", self.moving, !self.body.is_resting());
    }

    /// Set the scale directly and shift the pan so the viewport center keeps
    /// showing the same world point.
    ///
    /// The scale is clamped to `[min_scale, max_scale]`. A non-finite or
    /// non-positive request is ignored and leaves `surface` untouched.
    pub fn set_scale(
        &mut self,
        requested: f64,
        surface: &mut impl RenderSurface,
        movement: &mut CameraMovement,
        viewport: Vector2,
    ) {
        if !requested.is_finite() || requested <= 0.0 {
            tracing::debug!(scale = requested, "ignoring invalid zoom scale");
            return;
        }
        let new_scale = requested.max(self.min_scale).min(self.max_scale);
        let previous_scale = self.scale;
        let delta_scale = new_scale - previous_scale;

        let mut transform = surface.transform();
        transform.a = new_scale;
        transform.d = new_scale;
        surface.set_transform(transform);

        self.scale = new_scale;
        self.body.position = new_scale;

        // Negated world point under the viewport center, at the old scale.
        let center_world = (movement.position() - viewport * 0.5) * (1.0 / previous_scale);
        movement.force_set_position(center_world * (delta_scale / new_scale), surface);
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.body.velocity
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    #[must_use]
    pub fn body(&self) -> &RigidBody1D {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RigidBody1D {
        &mut self.body
    }
}
