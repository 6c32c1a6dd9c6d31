//! Damped point-mass integrator, scalar and vector.
//!
//! A [`RigidBody`] holds position, velocity and acceleration plus a table of
//! pending forces. Forces are not impulses: once applied they act on every
//! [`RigidBody::update`] until removed by id or cleared. Each update adds a
//! linear drag force opposing the current velocity, integrates velocity with
//! semi-implicit Euler, clamps it, snaps it to zero below the stop threshold,
//! and then advances position by the average of the old and new velocity.
//!
//! [`RigidBody1D`] and [`RigidBody2D`] are the same integrator over `f64` and
//! [`Vector2`] respectively; the [`Motion`] trait is the seam between them.

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;

use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::ValidationError;
use crate::vector::Vector2;

/// A value the integrator can move: `f64` for 1D bodies, [`Vector2`] for 2D.
pub trait Motion:
    Copy + Debug + Default + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Neg<Output = Self>
{
    /// Length (absolute value for scalars).
    fn magnitude(self) -> f64;

    /// Same direction, rescaled to `magnitude`. Only called on non-zero values.
    #[must_use]
    fn with_magnitude(self, magnitude: f64) -> Self;
}

impl Motion for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn with_magnitude(self, magnitude: f64) -> Self {
        magnitude.copysign(self)
    }
}

impl Motion for Vector2 {
    fn magnitude(self) -> f64 {
        self.mag()
    }

    fn with_magnitude(self, magnitude: f64) -> Self {
        self.normalize().scale(magnitude)
    }
}

/// Handle to a force applied to one body. Ids increase monotonically per body
/// and are never reused, even after [`RigidBody::remove_forces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForceId(u64);

impl ForceId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Pending forces stored densely, with an id -> slot index for O(1) removal.
#[derive(Debug, Clone)]
struct ForceTable<V> {
    entries: Vec<(ForceId, V)>,
    slots: HashMap<ForceId, usize>,
    next_id: u64,
}

impl<V: Motion> ForceTable<V> {
    fn new() -> Self {
        Self { entries: Vec::new(), slots: HashMap::new(), next_id: 0 }
    }

    fn insert(&mut self, force: V) -> ForceId {
        let id = ForceId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, self.entries.len());
        self.entries.push((id, force));
        id
    }

    fn remove(&mut self, id: ForceId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        self.entries.swap_remove(slot);
        // The former last entry now lives in `slot`.
        if let Some((moved, _)) = self.entries.get(slot) {
            self.slots.insert(*moved, slot);
        }
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    fn sum(&self, initial: V) -> V {
        self.entries.iter().fold(initial, |acc, (_, force)| acc + *force)
    }
}

/// A point mass driven by pending forces and linear drag.
///
/// `max_velocity` and `stop_velocity` are disabled when negative (the default
/// is `-1.0` for both). `position` and `velocity` may be assigned directly,
/// e.g. to seed a throw or to resynchronize with an external transform.
#[derive(Debug, Clone)]
pub struct RigidBody<V> {
    pub position: V,
    pub velocity: V,
    /// Acceleration computed by the most recent [`RigidBody::update`].
    pub acceleration: V,
    /// Speed cap; `< 0` means unbounded.
    pub max_velocity: f64,
    /// Speed below which velocity snaps to zero; `< 0` disables the snap.
    pub stop_velocity: f64,
    mass: f64,
    drag_coefficient: f64,
    forces: ForceTable<V>,
}

/// Scalar body, e.g. a zoom factor.
pub type RigidBody1D = RigidBody<f64>;

/// Planar body, e.g. a pan offset.
pub type RigidBody2D = RigidBody<Vector2>;

impl<V: Motion> Default for RigidBody<V> {
    fn default() -> Self {
        Self {
            position: V::default(),
            velocity: V::default(),
            acceleration: V::default(),
            max_velocity: -1.0,
            stop_velocity: -1.0,
            mass: 1.0,
            drag_coefficient: 0.0,
            forces: ForceTable::new(),
        }
    }
}

impl<V: Motion> RigidBody<V> {
    /// A body at rest at the origin with mass 1 and no drag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Mass`] unless `mass > 0` (NaN included); the
    /// previous mass is kept.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), ValidationError> {
        if mass > 0.0 {
            self.mass = mass;
            Ok(())
        } else {
            Err(ValidationError::Mass { value: mass })
        }
    }

    #[must_use]
    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// Set the linear drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DragCoefficient`] unless `drag >= 0` (NaN
    /// included); the previous coefficient is kept.
    pub fn set_drag_coefficient(&mut self, drag: f64) -> Result<(), ValidationError> {
        if drag >= 0.0 {
            self.drag_coefficient = drag;
            Ok(())
        } else {
            Err(ValidationError::DragCoefficient { value: drag })
        }
    }

    /// Queue a force. It takes effect from the next [`RigidBody::update`] and
    /// keeps acting until removed.
    pub fn apply_force(&mut self, force: V) -> ForceId {
        self.forces.insert(force)
    }

    /// Remove one force. Returns `false` if `id` is not pending on this body.
    pub fn remove_force(&mut self, id: ForceId) -> bool {
        self.forces.remove(id)
    }

    /// Remove every pending force.
    pub fn remove_forces(&mut self) {
        self.forces.clear();
    }

    /// Number of pending forces.
    #[must_use]
    pub fn pending_forces(&self) -> usize {
        self.forces.entries.len()
    }

    /// Sum of pending forces, excluding drag.
    #[must_use]
    pub fn net_force(&self) -> V {
        self.forces.sum(V::default())
    }

    /// No pending push and no velocity above the stop threshold.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        let threshold = self.stop_velocity.max(0.0);
        self.net_force().magnitude() <= 0.0 && self.velocity.magnitude() <= threshold
    }

    /// Advance the simulation by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f64) {
        let drag_force = -self.velocity * self.drag_coefficient;
        let resulting_force = self.forces.sum(drag_force);

        self.acceleration = resulting_force * (1.0 / self.mass);

        let prev_velocity = self.velocity;
        self.velocity = self.velocity + self.acceleration * delta_time;

        if self.max_velocity >= 0.0 && self.velocity.magnitude() > self.max_velocity {
            self.velocity = self.velocity.with_magnitude(self.max_velocity);
        }

        if self.stop_velocity >= 0.0 && self.velocity.magnitude() < self.stop_velocity {
            self.velocity = V::default();
        }

        self.position = self.position + (self.velocity + prev_velocity) * (delta_time * 0.5);
    }
}
