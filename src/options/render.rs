use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
/// Offscreen render target and material parameters.
pub struct RenderOptions {
    /// Render target width in pixels.
    #[schemars(title = "Width", range(min = 16, max = 8192))]
    pub width: u32,
    /// Render target height in pixels.
    #[schemars(title = "Height", range(min = 16, max = 8192))]
    pub height: u32,
    /// Surface roughness of atom spheres.
    #[schemars(title = "Roughness", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub roughness: f32,
    /// Metalness of atom spheres.
    #[schemars(title = "Metalness", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub metalness: f32,
    /// Length of a dash on dashed overlay lines (angstroms).
    #[schemars(skip)]
    pub dash_size: f32,
    /// Gap between dashes on dashed overlay lines (angstroms).
    #[schemars(skip)]
    pub gap_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
            roughness: 0.5,
            metalness: 0.3,
            dash_size: 0.25,
            gap_size: 0.15,
        }
    }
}
