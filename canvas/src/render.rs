//! Rendering bridge: mirrors the camera onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Drawing the scene itself is the host's job; this only installs the camera
//! transform and clears what the camera can see, so the host draws in world
//! coordinates.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Transform;
use crate::vector::Vector2;

/// Install `transform` on `ctx` and clear the world rectangle visible through
/// a viewport of `viewport` CSS pixels.
///
/// # Errors
///
/// Returns `Err` if the context rejects the transform (e.g. non-finite values).
pub fn prepare_frame(ctx: &CanvasRenderingContext2d, transform: &Transform, viewport: Vector2) -> Result<(), JsValue> {
    ctx.set_transform(transform.a, transform.b, transform.c, transform.d, transform.e, transform.f)?;
    let (top_left, size) = transform.visible_world_rect(viewport);
    ctx.clear_rect(top_left.x, top_left.y, size.x, size.y);
    Ok(())
}
