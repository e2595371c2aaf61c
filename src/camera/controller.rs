use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::camera::input::CameraInput;
use crate::options::CameraOptions;
use crate::state::CameraSettings;

/// Remaining motion below this is dropped instead of damped further.
const SETTLE_EPSILON: f32 = 1e-5;

/// Dolly factor per wheel notch before `zoom_speed` is applied.
const DOLLY_BASE: f32 = 0.95;

/// Orbit camera: rotates about a focus point, pans it, dollies toward it.
///
/// Input only queues motion. [`update`](Self::update) applies a damped
/// fraction of it each frame and reports whether the pose moved, which is
/// the camera's change event.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    camera: Camera,

    pending_rotate: Vec2,
    pending_pan: Vec3,
    pending_dolly: f32,

    min_distance: f32,
    max_distance: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    damping: f32,
    viewport_height: f32,
}

impl OrbitController {
    /// Controller posed at `settings`.
    #[must_use]
    pub fn new(
        settings: &CameraSettings,
        options: &CameraOptions,
        viewport: (u32, u32),
    ) -> Self {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        let camera = Camera::from_settings(
            settings,
            width as f32 / height as f32,
            options.znear,
            options.zfar,
        );
        let mut controller = Self {
            orientation: Quat::IDENTITY,
            distance: 1.0,
            focus_point: Vec3::ZERO,
            camera,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec3::ZERO,
            pending_dolly: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping,
            viewport_height: height as f32,
        };
        controller.set_pose(settings);
        controller
    }

    /// Jump to `settings`, discarding queued motion. The eye lands exactly
    /// on the given position.
    pub fn set_pose(&mut self, settings: &CameraSettings) {
        let eye = Vec3::from_array(settings.position);
        let target = Vec3::from_array(settings.target);
        let offset = eye - target;

        self.focus_point = target;
        self.distance = offset.length();
        self.orientation = if self.distance > f32::EPSILON {
            Quat::from_rotation_arc(Vec3::Z, offset / self.distance)
        } else {
            Quat::IDENTITY
        };
        self.camera.fovy = settings.field_of_view;
        self.camera.zoom = settings.zoom;
        self.camera.orthographic = settings.orthographic;
        self.pending_rotate = Vec2::ZERO;
        self.pending_pan = Vec3::ZERO;
        self.pending_dolly = 1.0;

        self.camera.eye = eye;
        self.camera.target = target;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Bound the dolly distance.
    pub fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.min_distance = min;
        self.max_distance = max.max(min);
    }

    /// Current `(min, max)` dolly distance.
    #[must_use]
    pub fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// The posed camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Live pose in host-state form.
    #[must_use]
    pub fn settings(&self) -> CameraSettings {
        self.camera.settings()
    }

    /// Track a viewport size change.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.viewport_height = height as f32;
        }
    }

    /// Queue one input gesture.
    pub fn apply(&mut self, input: CameraInput) {
        match input {
            CameraInput::Rotate(delta) => self.rotate(delta),
            CameraInput::Pan(delta) => self.pan(delta),
            CameraInput::Zoom(notches) => self.zoom(notches),
        }
    }

    /// Queue an orbit by a pointer delta in pixels. A drag across the full
    /// viewport height turns one full revolution at unit speed.
    pub fn rotate(&mut self, delta: Vec2) {
        let per_pixel = std::f32::consts::TAU / self.viewport_height;
        self.pending_rotate += delta * per_pixel * self.rotate_speed;
    }

    /// Queue a pan by a pointer delta in pixels; the focus point tracks the
    /// pointer at the target's depth.
    pub fn pan(&mut self, delta: Vec2) {
        let half_height =
            self.distance * (self.camera.fovy.to_radians() * 0.5).tan();
        let per_pixel = 2.0 * half_height / self.viewport_height;
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;

        self.pending_pan += (right * -delta.x + up * delta.y)
            * per_pixel
            * self.pan_speed;
    }

    /// Queue a dolly by wheel notches; positive moves toward the target.
    pub fn zoom(&mut self, notches: f32) {
        self.pending_dolly *= DOLLY_BASE.powf(notches * self.zoom_speed);
    }

    /// Whether queued motion remains.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.pending_rotate.length_squared() > SETTLE_EPSILON * SETTLE_EPSILON
            || self.pending_pan.length_squared()
                > SETTLE_EPSILON * SETTLE_EPSILON
            || (self.pending_dolly - 1.0).abs() > SETTLE_EPSILON
    }

    /// Apply one frame of queued motion. Returns `true` when the pose
    /// changed.
    pub fn update(&mut self) -> bool {
        let factor = if self.damping > 0.0 && self.damping < 1.0 {
            self.damping
        } else {
            1.0
        };
        let mut changed = false;

        if self.pending_rotate.length_squared() > SETTLE_EPSILON * SETTLE_EPSILON
        {
            let step = self.pending_rotate * factor;
            self.pending_rotate -= step;
            self.orbit(step);
            changed = true;
        } else {
            self.pending_rotate = Vec2::ZERO;
        }

        if self.pending_pan.length_squared() > SETTLE_EPSILON * SETTLE_EPSILON {
            let step = self.pending_pan * factor;
            self.pending_pan -= step;
            self.focus_point += step;
            changed = true;
        } else {
            self.pending_pan = Vec3::ZERO;
        }

        // Dolly is applied whole, like a wheel step.
        if (self.pending_dolly - 1.0).abs() > SETTLE_EPSILON {
            let distance = (self.distance * self.pending_dolly)
                .clamp(self.min_distance, self.max_distance);
            self.pending_dolly = 1.0;
            if (distance - self.distance).abs() > f32::EPSILON {
                self.distance = distance;
                changed = true;
            }
        } else {
            self.pending_dolly = 1.0;
        }

        if changed {
            self.update_camera_pos();
        }
        changed
    }

    fn orbit(&mut self, angle: Vec2) {
        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -angle.x);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -angle.y);
        self.orientation = (vertical * self.orientation).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraSettings {
        CameraSettings {
            position: [0.0, 0.0, 30.0],
            target: [0.0; 3],
            zoom: 1.0,
            field_of_view: 60.0,
            orthographic: false,
        }
    }

    fn undamped() -> CameraOptions {
        CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        }
    }

    #[test]
    fn set_pose_is_exact() {
        let settings = CameraSettings {
            position: [3.0, -4.0, 12.0],
            target: [1.0, 1.0, 1.0],
            zoom: 1.5,
            field_of_view: 45.0,
            orthographic: true,
        };
        let c = OrbitController::new(&settings, &undamped(), (800, 600));
        assert_eq!(c.settings(), settings);
    }

    #[test]
    fn rotation_keeps_distance_to_target() {
        let mut c = OrbitController::new(&pose(), &undamped(), (800, 600));
        c.rotate(Vec2::new(120.0, -40.0));
        assert!(c.update());
        let cam = c.camera();
        assert!(((cam.eye - cam.target).length() - 30.0).abs() < 1e-3);
        assert_ne!(cam.eye, Vec3::new(0.0, 0.0, 30.0));
        assert!(!c.update());
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut c = OrbitController::new(&pose(), &CameraOptions::default(), (800, 600));
        c.rotate(Vec2::new(200.0, 0.0));
        assert!(c.update());
        assert!(c.is_settling());
        let mut frames = 1;
        while c.update() {
            frames += 1;
        }
        assert!(frames > 10);
        assert!(!c.is_settling());
    }

    #[test]
    fn dolly_respects_limits() {
        let mut c = OrbitController::new(&pose(), &undamped(), (800, 600));
        c.set_distance_limits(2.0, 100.0);
        c.zoom(1000.0);
        assert!(c.update());
        let d = (c.camera().eye - c.camera().target).length();
        assert!((d - 2.0).abs() < 1e-3);
        c.zoom(10.0);
        assert!(!c.update(), "already at the near limit");
        c.zoom(-1000.0);
        assert!(c.update());
        let d = (c.camera().eye - c.camera().target).length();
        assert!((d - 100.0).abs() < 1e-2);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut c = OrbitController::new(&pose(), &undamped(), (800, 600));
        c.pan(Vec2::new(-50.0, 0.0));
        assert!(c.update());
        let cam = c.camera();
        assert!(cam.target.x > 0.0);
        assert!((cam.eye.x - cam.target.x).abs() < 1e-4);
    }
}
