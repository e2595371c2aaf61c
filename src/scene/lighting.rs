use glam::Vec3;

use crate::options::RenderOptions;

/// A directional light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Where the light sits; only its direction matters.
    pub position: Vec3,
    /// Brightness multiplier.
    pub intensity: f32,
    /// Whether the light is marked as a shadow caster.
    pub casts_shadow: bool,
}

/// Fixed scene lighting: one ambient term, a key light and a fill light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    /// Ambient intensity.
    pub ambient: f32,
    /// Key light, upper front right.
    pub key: DirectionalLight,
    /// Fill light, lower back left.
    pub fill: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: 0.5,
            key: DirectionalLight {
                position: Vec3::new(10.0, 10.0, 5.0),
                intensity: 0.8,
                casts_shadow: true,
            },
            fill: DirectionalLight {
                position: Vec3::new(-10.0, -10.0, -5.0),
                intensity: 0.5,
                casts_shadow: false,
            },
        }
    }
}

/// Lighting configuration shared by the atom and line shaders.
/// NOTE: Must match WGSL struct layout exactly (64 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Direction toward the key light (normalized)
    pub key_dir: [f32; 3],
    /// Key light intensity
    pub key_intensity: f32,
    /// Direction toward the fill light (normalized)
    pub fill_dir: [f32; 3],
    /// Fill light intensity
    pub fill_intensity: f32,
    /// Ambient light intensity
    pub ambient: f32,
    /// Specular intensity
    pub specular_intensity: f32,
    /// Specular shininess exponent
    pub shininess: f32,
    pub(crate) _pad: f32,
    /// Dash and gap length for dashed lines, in world units
    pub dash: [f32; 2],
    pub(crate) _pad2: [f32; 2],
}

impl LightingUniform {
    /// Pack `rig` with material parameters from `render`.
    #[must_use]
    pub fn new(rig: &LightRig, render: &RenderOptions) -> Self {
        let roughness = render.roughness.clamp(0.05, 1.0);
        Self {
            key_dir: rig.key.position.normalize_or_zero().to_array(),
            key_intensity: rig.key.intensity,
            fill_dir: rig.fill.position.normalize_or_zero().to_array(),
            fill_intensity: rig.fill.intensity,
            ambient: rig.ambient,
            // Rougher surfaces spread a dimmer highlight.
            specular_intensity: (1.0 - roughness) * (0.25 + 0.5 * render.metalness),
            shininess: (2.0 / (roughness * roughness)).clamp(2.0, 256.0),
            _pad: 0.0,
            dash: [render.dash_size, render.gap_size],
            _pad2: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rig() {
        let rig = LightRig::default();
        assert_eq!(rig.ambient, 0.5);
        assert_eq!(rig.key.position, Vec3::new(10.0, 10.0, 5.0));
        assert_eq!(rig.key.intensity, 0.8);
        assert!(rig.key.casts_shadow);
        assert_eq!(rig.fill.intensity, 0.5);
        assert!(!rig.fill.casts_shadow);
    }

    #[test]
    fn uniform_is_64_bytes_with_unit_directions() {
        assert_eq!(size_of::<LightingUniform>(), 64);
        let u = LightingUniform::new(&LightRig::default(), &RenderOptions::default());
        assert!((Vec3::from_array(u.key_dir).length() - 1.0).abs() < 1e-5);
        assert!((Vec3::from_array(u.fill_dir).length() - 1.0).abs() < 1e-5);
        assert_eq!(u.dash, [0.25, 0.15]);
    }
}
