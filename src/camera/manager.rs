use glam::Vec3;
use web_time::{Duration, Instant};

use crate::camera::controller::OrbitController;
use crate::camera::core::Camera;
use crate::camera::input::CameraInput;
use crate::options::CameraOptions;
use crate::scene::bounds::SceneBounds;
use crate::state::CameraSettings;
use crate::util::debounce::Debouncer;

/// Eye distance from the scene center in multiples of `max_dimension`.
pub const FRAMING_DISTANCE_FACTOR: f32 = 3.0;
/// Closest dolly distance in multiples of `max_dimension`.
pub const MIN_DISTANCE_FACTOR: f32 = 0.1;
/// Farthest dolly distance in multiples of `max_dimension`.
pub const MAX_DISTANCE_FACTOR: f32 = 5.0;

/// How the camera got its pose at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOrigin {
    /// No saved pose; framed from the scene bounds.
    Framed,
    /// Host-supplied pose used verbatim.
    Restored,
}

/// Camera pose, orbit controls and debounced reporting for one mounted
/// scene.
///
/// Every pose change restarts a single quiet-period deadline. When it
/// expires the live pose is read and returned from [`tick`](Self::tick),
/// so a burst of changes yields one report carrying the final pose.
/// Dropping or [`unmount`](Self::unmount)ing the manager discards any
/// pending report.
#[derive(Debug)]
pub struct CameraManager {
    controller: OrbitController,
    debounce: Debouncer,
    origin: MountOrigin,
}

impl CameraManager {
    /// Pose that frames `bounds`: looking down -Z from three extents away.
    #[must_use]
    pub fn default_framing(bounds: &SceneBounds, fovy: f32) -> CameraSettings {
        let eye = bounds.center
            + Vec3::new(0.0, 0.0, FRAMING_DISTANCE_FACTOR * bounds.max_dimension);
        CameraSettings {
            position: eye.to_array(),
            target: bounds.center.to_array(),
            zoom: 1.0,
            field_of_view: fovy,
            orthographic: false,
        }
    }

    /// Mount on a scene. A saved pose wins over default framing.
    #[must_use]
    pub fn mount(
        bounds: &SceneBounds,
        saved: Option<&CameraSettings>,
        options: &CameraOptions,
        viewport: (u32, u32),
    ) -> Self {
        let (settings, origin) = match saved {
            Some(saved) => (*saved, MountOrigin::Restored),
            None => (
                Self::default_framing(bounds, options.fovy),
                MountOrigin::Framed,
            ),
        };
        let mut controller = OrbitController::new(&settings, options, viewport);
        controller.set_distance_limits(
            MIN_DISTANCE_FACTOR * bounds.max_dimension,
            MAX_DISTANCE_FACTOR * bounds.max_dimension,
        );
        log::debug!("camera mounted ({origin:?}) at {:?}", settings.position);

        Self {
            controller,
            debounce: Debouncer::new(Duration::from_millis(options.debounce_ms)),
            origin,
        }
    }

    /// How the mount pose was chosen.
    #[must_use]
    pub fn origin(&self) -> MountOrigin {
        self.origin
    }

    /// The live camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// The live pose, read now.
    #[must_use]
    pub fn settings(&self) -> CameraSettings {
        self.controller.settings()
    }

    /// Orbit controls, for direct manipulation. Call
    /// [`notify_change`](Self::notify_change) after moving the pose.
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// Queue a gesture; it takes effect on the next [`tick`](Self::tick).
    pub fn handle_input(&mut self, input: CameraInput) {
        self.controller.apply(input);
    }

    /// Track a viewport size change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.controller.resize(width, height);
    }

    /// Record a change event: cancel any pending report and restart the
    /// quiet period from `now`.
    pub fn notify_change(&mut self, now: Instant) {
        self.debounce.schedule(now);
    }

    /// Whether a report is scheduled.
    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Advance the controls one frame. Returns the live pose when a
    /// scheduled report fires.
    pub fn tick(&mut self, now: Instant) -> Option<CameraSettings> {
        if self.controller.update() {
            self.notify_change(now);
        }
        if self.debounce.poll(now) {
            let settings = self.controller.settings();
            log::debug!("camera settled at {:?}", settings.position);
            Some(settings)
        } else {
            None
        }
    }

    /// Tear down, discarding any pending report.
    pub fn unmount(mut self) {
        if self.debounce.is_pending() {
            log::debug!("camera unmounted with a pending update; dropped");
        }
        self.debounce.cancel();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::test_support::carbon_chain;

    fn undamped() -> CameraOptions {
        CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        }
    }

    fn bounds20() -> SceneBounds {
        SceneBounds::from_atoms(&carbon_chain(21)).recentered()
    }

    #[test]
    fn default_framing_sits_three_extents_out() {
        let m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        assert_eq!(m.origin(), MountOrigin::Framed);
        let s = m.settings();
        assert_eq!(s.position, [0.0, 0.0, 60.0]);
        assert_eq!(s.target, [0.0; 3]);
        assert_eq!(s.zoom, 1.0);
        assert_eq!(s.field_of_view, 60.0);
    }

    #[test]
    fn saved_pose_is_restored_verbatim() {
        let saved = CameraSettings {
            position: [5.0, 6.0, 7.0],
            target: [1.0, 0.0, 0.0],
            zoom: 2.0,
            field_of_view: 35.0,
            orthographic: false,
        };
        let m = CameraManager::mount(&bounds20(), Some(&saved), &undamped(), (800, 600));
        assert_eq!(m.origin(), MountOrigin::Restored);
        assert_eq!(m.settings(), saved);
    }

    #[test]
    fn distance_limits_follow_extent() {
        let m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        let (min, max) = m.controller.distance_limits();
        assert!((min - 2.0).abs() < 1e-5);
        assert!((max - 100.0).abs() < 1e-5);
    }

    #[test]
    fn burst_of_changes_reports_once_with_final_pose() {
        let t0 = Instant::now();
        let mut m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        let mut reports = Vec::new();
        for i in 0..5u64 {
            m.handle_input(CameraInput::Rotate(Vec2::new(10.0, 0.0)));
            let now = t0 + Duration::from_millis(i * 20);
            reports.extend(m.tick(now));
        }
        let last_change = m.settings();
        assert!(reports.is_empty());

        reports.extend(m.tick(t0 + Duration::from_millis(80 + 99)));
        assert!(reports.is_empty());
        reports.extend(m.tick(t0 + Duration::from_millis(80 + 100)));
        reports.extend(m.tick(t0 + Duration::from_millis(500)));

        assert_eq!(reports, vec![last_change]);
    }

    #[test]
    fn report_reads_live_pose_not_scheduled_pose() {
        let t0 = Instant::now();
        let mut m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        m.notify_change(t0);
        let moved = CameraSettings {
            position: [0.0, 10.0, 10.0],
            ..m.settings()
        };
        m.controller_mut().set_pose(&moved);
        assert_eq!(m.tick(t0 + Duration::from_millis(100)), Some(moved));
    }

    #[test]
    fn idle_frames_never_report() {
        let t0 = Instant::now();
        let mut m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        for i in 0..10u64 {
            assert_eq!(m.tick(t0 + Duration::from_millis(i * 50)), None);
        }
    }

    #[test]
    fn unmount_drops_pending_report() {
        let mut m = CameraManager::mount(&bounds20(), None, &undamped(), (800, 600));
        m.notify_change(Instant::now());
        assert!(m.has_pending_update());
        m.unmount();
    }
}
