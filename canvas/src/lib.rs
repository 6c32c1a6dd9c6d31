//! Inertial camera engine for an infinite, pannable, zoomable 2D canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! camera: translating raw DOM input events into forces, integrating those
//! forces with damped rigid bodies once per animation frame, and writing the
//! result into the affine transform the host draws with. The host JavaScript
//! layer is responsible only for wiring DOM events and `requestAnimationFrame`
//! to the engine and for drawing its own content in world coordinates.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`vector`] | Immutable 2D vector math |
//! | [`body`] | Damped-force integrators (`RigidBody1D`, `RigidBody2D`) |
//! | [`camera`] | Affine transform, render-surface trait, coordinate conversions |
//! | [`movement`] | Inertial pan controller |
//! | [`zoom`] | Inertial zoom controller with center anchoring |
//! | [`input`] | Input event types and the held-state translator |
//! | [`clock`] | Frame delta-time from animation timestamps |
//! | [`config`] | Camera tuning loaded from JSON |
//! | [`error`] | Validation and configuration errors |
//! | [`render`] | Mirrors the transform onto a `CanvasRenderingContext2d` |
//! | [`consts`] | Default tuning constants |

pub mod body;
pub mod camera;
pub mod clock;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod movement;
pub mod render;
pub mod vector;
pub mod zoom;
