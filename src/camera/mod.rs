//! Camera system for 3D scene viewing.
//!
//! Provides an orbital camera with rotation, panning and dolly zoom, default
//! framing from scene bounds, and debounced reporting of pose changes.

/// Orbital camera controller managing rotation, pan and zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pointer-event classification into camera gestures.
pub mod input;
/// Mount-time framing and debounced pose reporting.
pub mod manager;

pub use manager::{CameraManager, MountOrigin};
