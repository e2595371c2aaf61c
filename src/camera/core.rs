use glam::{Mat4, Vec3};

use crate::state::CameraSettings;

/// Camera defined by eye position, target, and projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Zoom factor; narrows the effective field of view.
    pub zoom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Orthographic instead of perspective projection.
    pub orthographic: bool,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Camera up direction.
    pub up: [f32; 3],
    /// 1.0 for orthographic projection, 0.0 for perspective.
    pub orthographic: f32,
    /// Translation applied to every model position (recenters the scene).
    pub scene_offset: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
    /// Render target size in pixels.
    pub viewport: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad2: [f32; 2],
}

impl Camera {
    /// Camera at `settings`, with the remaining projection parameters given.
    #[must_use]
    pub fn from_settings(
        settings: &CameraSettings,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            eye: Vec3::from_array(settings.position),
            target: Vec3::from_array(settings.target),
            up: Vec3::Y,
            aspect,
            fovy: settings.field_of_view,
            zoom: settings.zoom,
            znear,
            zfar,
            orthographic: settings.orthographic,
        }
    }

    /// Snapshot of the pose in host-state form.
    #[must_use]
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            position: self.eye.to_array(),
            target: self.target.to_array(),
            zoom: self.zoom,
            field_of_view: self.fovy,
            orthographic: self.orthographic,
        }
    }

    /// Field of view after zoom, in degrees.
    #[must_use]
    pub fn effective_fovy(&self) -> f32 {
        let half = (self.fovy.to_radians() * 0.5).tan() / self.zoom.max(1e-3);
        (half.atan() * 2.0).to_degrees()
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.build_projection() * view
    }

    /// Projection matrix alone.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        if self.orthographic {
            // Match the perspective frustum's height at the target distance.
            let distance = (self.target - self.eye).length().max(self.znear);
            let half_h =
                distance * (self.fovy.to_radians() * 0.5).tan() / self.zoom.max(1e-3);
            let half_w = half_h * self.aspect;
            Mat4::orthographic_rh(
                -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
            )
        } else {
            // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
            // convention)
            Mat4::perspective_rh(
                self.effective_fovy().to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            )
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 60.0,
            up: [0.0, 1.0, 0.0],
            orthographic: 0.0,
            scene_offset: [0.0; 3],
            _pad: 0.0,
            viewport: [1.0, 1.0],
            _pad2: [0.0; 2],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera, scene_offset: Vec3) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        let forward = (camera.target - camera.eye).normalize_or(Vec3::NEG_Z);
        self.forward = forward.to_array();
        self.fovy = camera.fovy;
        self.up = camera.up.normalize_or(Vec3::Y).to_array();
        self.orthographic = if camera.orthographic { 1.0 } else { 0.0 };
        self.scene_offset = scene_offset.to_array();
    }

    /// Record the render target size for pixel-space line widths.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = [width.max(1) as f32, height.max(1) as f32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CameraSettings {
        CameraSettings {
            position: [0.0, 0.0, 30.0],
            target: [0.0; 3],
            zoom: 1.0,
            field_of_view: 60.0,
            orthographic: false,
        }
    }

    #[test]
    fn settings_round_trip_through_camera() {
        let s = settings();
        let cam = Camera::from_settings(&s, 1.5, 0.1, 1000.0);
        assert_eq!(cam.settings(), s);
    }

    #[test]
    fn zoom_narrows_field_of_view() {
        let mut cam = Camera::from_settings(&settings(), 1.0, 0.1, 1000.0);
        assert!((cam.effective_fovy() - 60.0).abs() < 1e-3);
        cam.zoom = 2.0;
        assert!(cam.effective_fovy() < 60.0);
    }

    #[test]
    fn target_projects_to_screen_center() {
        for orthographic in [false, true] {
            let s = CameraSettings {
                orthographic,
                ..settings()
            };
            let cam = Camera::from_settings(&s, 1.0, 0.1, 1000.0);
            let clip = cam.build_matrix().project_point3(Vec3::ZERO);
            assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
            assert!((0.0..=1.0).contains(&clip.z));
        }
    }

    #[test]
    fn uniform_layout() {
        assert_eq!(size_of::<CameraUniform>(), 144);
        let cam = Camera::from_settings(&settings(), 2.0, 0.1, 1000.0);
        let mut u = CameraUniform::new();
        u.update_view_proj(&cam, Vec3::new(-1.0, 0.0, 0.0));
        u.set_viewport(640, 320);
        assert_eq!(u.forward, [0.0, 0.0, -1.0]);
        assert_eq!(u.scene_offset, [-1.0, 0.0, 0.0]);
        assert_eq!(u.viewport, [640.0, 320.0]);
    }
}
