//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the biodockviz crate.
#[derive(Debug)]
pub enum VizError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A draw or readback failed while rendering a frame.
    Render(String),
    /// No renderable frame was available to capture.
    Capture(String),
    /// PNG encoding of a captured frame failed.
    Encode(String),
    /// Failed to load a parsed structure document.
    StructureLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Snapshot metadata or state (de)serialization failure.
    Json(serde_json::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// An export was requested while another one is still in flight.
    ExportInFlight,
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::Capture(msg) => write!(f, "frame capture failed: {msg}"),
            Self::Encode(msg) => write!(f, "image encoding failed: {msg}"),
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::ExportInFlight => {
                write!(f, "an export is already in progress")
            }
        }
    }
}

impl std::error::Error for VizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for VizError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
