use std::fmt;

/// Errors that can occur during GPU context initialization.
#[derive(Debug)]
pub enum RenderContextError {
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// GPU device request failed (limits or features not met).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Requested target size is zero or exceeds the device limit.
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Largest supported dimension.
        max: u32,
    },
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::InvalidSize { width, height, max } => write!(
                f,
                "render target {width}x{height} outside supported range 1..={max}"
            ),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::InvalidSize { .. } => None,
        }
    }
}

/// Owns the core wgpu resources for offscreen rendering: device, queue and
/// the target size.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    width: u32,
    height: u32,
}

impl RenderContext {
    /// Create a headless render context with the given target size.
    ///
    /// # Errors
    ///
    /// Returns `RenderContextError` if the adapter or device request fails,
    /// or the size is unsupported.
    pub async fn headless(
        width: u32,
        height: u32,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: None,
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();
        log::info!("using GPU adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Offscreen Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        Self::from_device(device, queue, width, height)
    }

    /// Create a render context from an externally-owned device and queue.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError::InvalidSize`] if either dimension is
    /// zero or above the device's 2D texture limit.
    pub fn from_device(
        device: wgpu::Device,
        queue: wgpu::Queue,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderContextError> {
        let max = device.limits().max_texture_dimension_2d;
        check_size(width, height, max)?;
        Ok(Self {
            device,
            queue,
            width,
            height,
        })
    }

    /// Render target width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Render target height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Create a new command encoder for recording GPU commands.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// Finish the encoder and submit its command buffer to the GPU queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn check_size(width: u32, height: u32, max: u32) -> Result<(), RenderContextError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(RenderContextError::InvalidSize { width, height, max });
    }
    Ok(())
}
