//! Inertial pan controller.
//!
//! `CameraMovement` owns a [`RigidBody2D`] whose position *is* the pan
//! translation of the render transform. Input sets a steady push with
//! [`CameraMovement::translate`]; every frame [`CameraMovement::tick`]
//! integrates and writes the position into the transform's `e` / `f`.

#[cfg(test)]
#[path = "movement_test.rs"]
mod movement_test;

use crate::body::RigidBody2D;
use crate::camera::RenderSurface;
use crate::config::BodyTuning;
use crate::error::ValidationError;
use crate::vector::Vector2;

#[derive(Debug, Clone)]
pub struct CameraMovement {
    body: RigidBody2D,
    moving: bool,
}

impl CameraMovement {
    /// Build a pan controller from body tuning.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the tuning has an invalid mass or drag.
    pub fn new(tuning: &BodyTuning) -> Result<Self, ValidationError> {
        Ok(Self { body: tuning.build()?, moving: false })
    }

    /// Replace the current push with `force`. Pushes never stack.
    pub fn translate(&mut self, force: Vector2) {
        self.body.remove_forces();
        self.body.apply_force(force);
    }

    /// Integrate one frame and write the pan position into `surface`.
    pub fn tick(&mut self, delta_time: f64, surface: &mut impl RenderSurface) {
        self.body.update(delta_time);

        let mut transform = surface.transform();
        transform.e = self.body.position.x;
        transform.f = self.body.position.y;
        surface.set_transform(transform);

        self.moving = track_motion("pan", self.moving, !self.body.is_resting());
    }

    /// Translate `surface` immediately, bypassing the force model, then pull
    /// the body position back from the surface so the next tick continues
    /// from where the transform actually is.
    ///
    /// `delta` is in the surface's local (scaled) space.
    pub fn force_set_position(&mut self, delta: Vector2, surface: &mut impl RenderSurface) {
        surface.translate(delta.x, delta.y);
        self.body.position = surface.transform().translation();
    }

    /// Current pan translation in CSS pixels.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        self.body.position
    }

    #[must_use]
    pub fn velocity(&self) -> Vector2 {
        self.body.velocity
    }

    /// Whether the last tick left the camera gliding or pushed.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    #[must_use]
    pub fn body(&self) -> &RigidBody2D {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RigidBody2D {
        &mut self.body
    }
}

/// Log idle/moving transitions for a controller and return the new state.
pub(crate) fn track_motion(controller: &'static str, was_moving: bool, moving: bool) -> bool {
    if moving != was_moving {
        if moving {
            tracing::debug!(controller, "camera started moving");
        } else {
            tracing::debug!(controller, "camera came to rest");
        }
    }
    moving
}
