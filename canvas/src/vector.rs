//! Immutable 2D vector value type.
//!
//! Every operation returns a new value. `multiply` and `divide` compose in polar
//! form (magnitudes multiply/divide, angles add/subtract), which makes them the
//! complex product and quotient rather than component-wise operations.

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::VECTOR_EQ_TOLERANCE;

/// A 2D vector in screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Polar product: magnitudes multiply, angles add.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        Self::from_polar(self.mag() * other.mag(), self.angle() + other.angle())
    }

    /// Polar quotient: magnitudes divide, angles subtract.
    ///
    /// Dividing by a zero vector yields non-finite components.
    #[must_use]
    pub fn divide(self, other: Self) -> Self {
        Self::from_polar(self.mag() / other.mag(), self.angle() - other.angle())
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn mag(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the positive x axis in radians, in `(-π, π]`.
    ///
    /// Quadrant-aware, so `(-1, 0)` reports `π` rather than `0`.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn angle_deg(self) -> f64 {
        self.angle().to_degrees()
    }

    /// Unit vector in the same direction.
    ///
    /// At zero magnitude the components are NaN; use [`Vector2::try_normalize`]
    /// when the input may be zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mag = self.mag();
        Self::new(self.x / mag, self.y / mag)
    }

    #[must_use]
    pub fn try_normalize(self) -> Option<Self> {
        let mag = self.mag();
        if mag > 0.0 && mag.is_finite() { Some(self.scale(1.0 / mag)) } else { None }
    }

    #[must_use]
    pub fn r90deg(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn r180deg(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    #[must_use]
    pub fn r270deg(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Equal within [`VECTOR_EQ_TOLERANCE`] on each axis.
    #[must_use]
    pub fn is_equal(self, other: Self) -> bool {
        (self.x - other.x).abs() < VECTOR_EQ_TOLERANCE && (self.y - other.y).abs() < VECTOR_EQ_TOLERANCE
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        *self
    }

    fn from_polar(mag: f64, angle: f64) -> Self {
        Self::new(angle.cos() * mag, angle.sin() * mag)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        self.r180deg()
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
