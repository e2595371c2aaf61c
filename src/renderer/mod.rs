//! Render targets: the capability the viewer draws into and the exporter
//! captures from.
//!
//! [`RenderTarget`] is the seam between scene composition and the GPU.
//! [`OffscreenRenderer`] implements it with wgpu; tests substitute fakes.

mod offscreen;
mod pass;
mod readback;

pub use offscreen::OffscreenRenderer;
pub use readback::padded_bytes_per_row;

use crate::error::VizError;
use crate::scene::SceneFrame;

/// A read-back frame: tightly packed RGBA8 rows, top row first, straight
/// (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl CapturedFrame {
    /// Wrap pixel data, checking its length.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Capture`] if `pixels` is not `width * height * 4`
    /// bytes or either dimension is zero.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, VizError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(VizError::Capture(format!(
                "{width}x{height} frame needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Something a scene frame can be drawn into and read back from.
pub trait RenderTarget {
    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Any error is a render fault; the viewer moves to its error state.
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError>;

    /// Read back the last rendered frame.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Capture`] if nothing has been rendered or the
    /// readback fails.
    fn capture(&mut self) -> Result<CapturedFrame, VizError>;

    /// Target size in pixels.
    fn size(&self) -> (u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_length_is_checked() {
        assert!(CapturedFrame::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            CapturedFrame::new(2, 2, vec![0; 15]),
            Err(VizError::Capture(_))
        ));
        assert!(CapturedFrame::new(0, 2, Vec::new()).is_err());
    }
}
