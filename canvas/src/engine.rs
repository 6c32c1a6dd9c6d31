use web_sys::CanvasRenderingContext2d;

use crate::camera::Transform;
use crate::clock::FrameClock;
use crate::config::CameraConfig;
use crate::error::ConfigError;
use crate::input::{Button, CameraCommand, InputEvent, InputTranslator, Key, Modifiers, WheelDelta};
use crate::movement::CameraMovement;
use crate::render;
use crate::vector::Vector2;
use crate::zoom::CameraZoom;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// The transform is owned here and lent to one controller at a time: pan ticks
/// first, then zoom (whose re-centering reads the fresh pan), then the host renders.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub transform: Transform,
    pub movement: CameraMovement,
    pub zoom: CameraZoom,
    pub input: InputTranslator,
    pub clock: FrameClock,
    /// Viewport size in CSS pixels.
    pub viewport: Vector2,
}

impl EngineCore {
    /// Build an engine at identity transform with the given tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: &CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transform: Transform::IDENTITY,
            movement: CameraMovement::new(&config.pan)?,
            zoom: CameraZoom::new(&config.zoom, config.min_scale, config.max_scale)?,
            input: InputTranslator::new(config),
            clock: FrameClock::new(config.max_frame_delta),
            viewport: Vector2::ZERO,
        })
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Vector2::new(width, height);
    }

    // --- Input events ---

    /// Feed one input event through the translator and apply the result.
    pub fn handle(&mut self, event: &InputEvent) -> Option<CameraCommand> {
        let command = self.input.handle(event)?;
        self.apply(command);
        Some(command)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Option<CameraCommand> {
        self.handle(&InputEvent::KeyDown { key, modifiers })
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Option<CameraCommand> {
        self.handle(&InputEvent::KeyUp { key, modifiers })
    }

    pub fn on_pointer_down(&mut self, button: Button) -> Option<CameraCommand> {
        self.handle(&InputEvent::PointerDown { button })
    }

    pub fn on_pointer_up(&mut self, button: Button) -> Option<CameraCommand> {
        self.handle(&InputEvent::PointerUp { button })
    }

    pub fn on_pointer_move(&mut self, dx: f64, dy: f64) -> Option<CameraCommand> {
        self.handle(&InputEvent::PointerMove { dx, dy })
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Option<CameraCommand> {
        self.handle(&delta.into())
    }

    pub fn on_blur(&mut self) -> Option<CameraCommand> {
        self.handle(&InputEvent::Blur)
    }

    fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Push(force) => self.movement.translate(force),
            CameraCommand::Zoom(intensity) => self.zoom.apply_zoom(intensity),
            // Screen pixels -> local space, so the view tracks the pointer 1:1.
            CameraCommand::Drag(delta) => {
                let local = delta * (1.0 / self.transform.scale());
                self.movement.force_set_position(local, &mut self.transform);
            }
        }
    }

    // --- Frame ---

    /// Advance to the frame at `timestamp_ms`. Returns the integrated delta in seconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let delta_time = self.clock.tick(timestamp_ms);
        self.step(delta_time);
        delta_time
    }

    /// Integrate pan, then zoom, by `delta_time` seconds.
    pub fn step(&mut self, delta_time: f64) {
        self.movement.tick(delta_time, &mut self.transform);
        self.zoom.tick(delta_time, &mut self.transform, &mut self.movement, self.viewport);
    }

    // --- Queries ---

    /// The current camera transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Neither controller is pushed or gliding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.movement.is_moving() && !self.zoom.is_moving()
    }

    /// World point shown at the viewport center.
    #[must_use]
    pub fn center_world(&self) -> Vector2 {
        self.transform.screen_to_world(self.viewport * 0.5)
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser 2D context.
pub struct Engine {
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given context, sized to its canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(ctx: CanvasRenderingContext2d, config: &CameraConfig) -> Result<Self, ConfigError> {
        let mut core = EngineCore::new(config)?;
        if let Some(canvas) = ctx.canvas() {
            core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        }
        Ok(Self { ctx, core })
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64) {
        self.core.set_viewport(width_css, height_css);
    }

    // --- Delegated input events ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Option<CameraCommand> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Option<CameraCommand> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn on_pointer_down(&mut self, button: Button) -> Option<CameraCommand> {
        self.core.on_pointer_down(button)
    }

    pub fn on_pointer_up(&mut self, button: Button) -> Option<CameraCommand> {
        self.core.on_pointer_up(button)
    }

    pub fn on_pointer_move(&mut self, dx: f64, dy: f64) -> Option<CameraCommand> {
        self.core.on_pointer_move(dx, dy)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Option<CameraCommand> {
        self.core.on_wheel(delta)
    }

    pub fn on_blur(&mut self) -> Option<CameraCommand> {
        self.core.on_blur()
    }

    // --- Frame ---

    /// Animation-frame entry point: integrate, then push the transform to the context.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.core.tick(timestamp_ms);
        self.render();
    }

    /// Apply the camera transform to the context and clear the visible area.
    pub fn render(&self) {
        if let Err(err) = render::prepare_frame(&self.ctx, &self.core.transform, self.core.viewport) {
            tracing::warn!(?err, "failed to apply camera transform");
        }
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.core.transform()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.core.is_idle()
    }
}
