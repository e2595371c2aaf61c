//! GPU resource management utilities.
//!
//! Provides headless wgpu device initialization and growable instance
//! buffers.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Headless wgpu device and queue initialization.
pub mod render_context;
