use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, orbit-control and persistence parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees, used when no saved pose exists.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Fraction of the remaining orbit velocity removed per frame.
    #[schemars(title = "Damping", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Quiet period after the last camera change before the pose is
    /// reported to the host.
    #[schemars(skip)]
    pub debounce_ms: u64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 10_000.0,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.8,
            damping: 0.05,
            debounce_ms: 100,
        }
    }
}
