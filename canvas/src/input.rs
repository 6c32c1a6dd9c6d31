//! Input model: keys, modifiers, mouse buttons, and the input translator.
//!
//! [`InputTranslator`] turns discrete browser events into [`CameraCommand`]s.
//! It keeps a table of held pan keys and held drag buttons, and recomputes the
//! net pan push from that table on every relevant event, so releasing one of
//! two held keys leaves the other one pushing. It never integrates anything;
//! the engine applies the commands and the next frame tick does the physics.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::vector::Vector2;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }

    /// Whether holding this button drags the canvas.
    #[must_use]
    pub fn drags(self) -> bool {
        matches!(self, Self::Primary | Self::Middle)
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"w"`, `"ArrowUp"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Wheel / trackpad scroll delta. Only the vertical axis zooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A raw input event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerDown {
        button: Button,
    },
    PointerUp {
        button: Button,
    },
    /// Pointer movement since the previous move event, in CSS pixels.
    PointerMove {
        dx: f64,
        dy: f64,
    },
    Wheel {
        dy: f64,
    },
    /// The window lost focus; every held key and button is released.
    Blur,
}

impl From<WheelDelta> for InputEvent {
    fn from(delta: WheelDelta) -> Self {
        Self::Wheel { dy: delta.dy }
    }
}

/// What the camera should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Replace the steady pan push.
    Push(Vector2),
    /// Apply a zoom impulse (positive zooms in).
    Zoom(f64),
    /// Move the view directly by a screen-space delta.
    Drag(Vector2),
}

/// Direction a pan key pushes the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Pan direction bound to `key`, case-insensitive for letters.
    #[must_use]
    pub fn from_key(key: &Key) -> Option<Self> {
        match key.0.as_str() {
            "w" | "W" | "ArrowUp" => Some(Self::Up),
            "s" | "S" | "ArrowDown" => Some(Self::Down),
            "a" | "A" | "ArrowLeft" => Some(Self::Left),
            "d" | "D" | "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit push on the transform translation. Looking up moves the world down.
    #[must_use]
    pub fn unit(self) -> Vector2 {
        match self {
            Self::Up => Vector2::new(0.0, 1.0),
            Self::Down => Vector2::new(0.0, -1.0),
            Self::Left => Vector2::new(1.0, 0.0),
            Self::Right => Vector2::new(-1.0, 0.0),
        }
    }
}

/// Zoom direction bound to `key`: `+1` zooms in, `-1` zooms out.
fn zoom_sign(key: &Key) -> Option<f64> {
    match key.0.as_str() {
        "+" | "=" => Some(1.0),
        "-" | "_" => Some(-1.0),
        _ => None,
    }
}

fn is_shift(key: &Key) -> bool {
    key.0 == "Shift"
}

/// Held-state table that maps input events to camera commands.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    held_keys: HashSet<PanDirection>,
    held_buttons: HashSet<Button>,
    shift: bool,
    pan_intensity: f64,
    shift_multiplier: f64,
    wheel_intensity: f64,
    key_zoom_intensity: f64,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl InputTranslator {
    #[must_use]
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            held_keys: HashSet::new(),
            held_buttons: HashSet::new(),
            shift: false,
            pan_intensity: config.pan_intensity,
            shift_multiplier: config.shift_multiplier,
            wheel_intensity: config.wheel_intensity,
            key_zoom_intensity: config.key_zoom_intensity,
        }
    }

    /// Update the held-state table and return the resulting command, if any.
    pub fn handle(&mut self, event: &InputEvent) -> Option<CameraCommand> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, *modifiers),
            InputEvent::KeyUp { key, modifiers } => self.key_up(key, *modifiers),
            InputEvent::PointerDown { button } => {
                if button.drags() {
                    self.held_buttons.insert(*button);
                }
                None
            }
            InputEvent::PointerUp { button } => {
                self.held_buttons.remove(button);
                None
            }
            InputEvent::PointerMove { dx, dy } => {
                self.is_dragging().then(|| CameraCommand::Drag(Vector2::new(*dx, *dy)))
            }
            InputEvent::Wheel { dy } => (dy.abs() > 0.0).then(|| CameraCommand::Zoom(-dy * self.wheel_intensity)),
            InputEvent::Blur => {
                let was_pushing = !self.held_keys.is_empty();
                self.held_keys.clear();
                self.held_buttons.clear();
                self.shift = false;
                was_pushing.then_some(CameraCommand::Push(Vector2::ZERO))
            }
        }
    }

    fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Option<CameraCommand> {
        let shift_changed = self.set_shift(modifiers.shift || is_shift(key));
        if let Some(direction) = PanDirection::from_key(key) {
            self.held_keys.insert(direction);
            return Some(CameraCommand::Push(self.net_push()));
        }
        if let Some(sign) = zoom_sign(key) {
            return Some(CameraCommand::Zoom(sign * self.key_zoom_intensity));
        }
        self.push_if_held(shift_changed)
    }

    fn key_up(&mut self, key: &Key, modifiers: Modifiers) -> Option<CameraCommand> {
        let shift_changed = self.set_shift(modifiers.shift && !is_shift(key));
        if let Some(direction) = PanDirection::from_key(key) {
            self.held_keys.remove(&direction);
            return Some(CameraCommand::Push(self.net_push()));
        }
        self.push_if_held(shift_changed)
    }

    fn set_shift(&mut self, shift: bool) -> bool {
        let changed = self.shift != shift;
        self.shift = shift;
        changed
    }

    fn push_if_held(&self, shift_changed: bool) -> Option<CameraCommand> {
        (shift_changed && !self.held_keys.is_empty()).then(|| CameraCommand::Push(self.net_push()))
    }

    /// Sum of held pan directions, scaled by intensity and the shift multiplier.
    #[must_use]
    pub fn net_push(&self) -> Vector2 {
        let multiplier = if self.shift { self.shift_multiplier } else { 1.0 };
        let direction = self.held_keys.iter().fold(Vector2::ZERO, |acc, d| acc + d.unit());
        direction * (self.pan_intensity * multiplier)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.held_buttons.is_empty()
    }

    #[must_use]
    pub fn is_held(&self, direction: PanDirection) -> bool {
        self.held_keys.contains(&direction)
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.shift
    }
}
