#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// 2D affine transform in canvas order:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// `a` / `d` carry the camera scale and `e` / `f` the pan translation, both in
/// CSS pixels. The camera never writes `b` or `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Current pan translation.
    #[must_use]
    pub fn translation(&self) -> Vector2 {
        Vector2::new(self.e, self.f)
    }

    /// Current uniform scale, read from `a`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.a
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        Vector2::new((screen.x - self.e) / self.a, (screen.y - self.f) / self.d)
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        Vector2::new(world.x * self.a + self.e, world.y * self.d + self.f)
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.a
    }

    /// World-space rectangle covered by a viewport of `viewport` CSS pixels,
    /// as `(top_left, size)`.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: Vector2) -> (Vector2, Vector2) {
        let top_left = self.screen_to_world(Vector2::ZERO);
        let size = Vector2::new(viewport.x / self.a, viewport.y / self.d);
        (top_left, size)
    }
}

/// A mutable affine transform the camera controllers write into.
///
/// [`Transform`] implements this directly; a browser host mirrors it onto a
/// `CanvasRenderingContext2d` after each frame.
pub trait RenderSurface {
    fn transform(&self) -> Transform;

    fn set_transform(&mut self, transform: Transform);

    /// Translate in the surface's current local space, like the canvas
    /// `translate()` call: the offset is multiplied by the current scale.
    fn translate(&mut self, dx: f64, dy: f64) {
        let mut t = self.transform();
        t.e += t.a * dx + t.c * dy;
        t.f += t.b * dx + t.d * dy;
        self.set_transform(t);
    }
}

impl RenderSurface for Transform {
    fn transform(&self) -> Transform {
        *self
    }

    fn set_transform(&mut self, transform: Transform) {
        *self = transform;
    }
}
