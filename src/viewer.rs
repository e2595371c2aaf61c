//! Scene composition and the viewer's presentation state machine.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use biodockviz::{renderer::OffscreenRenderer, Options, StructureData, Viewer};
//! # fn main() -> Result<(), biodockviz::VizError> {
//! let options = Options::default();
//! let target = OffscreenRenderer::headless(options.render.clone())?;
//! let mut viewer = Viewer::builder()
//!     .with_options(options)
//!     .on_state_change(|patch| log::info!("camera moved: {patch:?}"))
//!     .build(target);
//! let structure = StructureData::load(std::path::Path::new("1abc.json"))?;
//! viewer.set_structure(Some(Arc::new(structure)));
//! let _ = viewer.frame(web_time::Instant::now());
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use glam::Vec2;
use web_time::Instant;

use crate::camera::input::{CameraInput, PointerButton, PointerTracker};
use crate::camera::CameraManager;
use crate::error::VizError;
use crate::labels;
use crate::options::Options;
use crate::renderer::RenderTarget;
use crate::scene::{OverlaySegment, SceneBounds, SceneComposer};
use crate::snapshot::{
    ArtifactSink, DirectorySink, ExportEvent, SnapshotExporter, SnapshotRequest,
};
use crate::state::{VisualizationPatch, VisualizationState};
use crate::structure::StructureData;

/// Receives the state changes the viewer proposes.
pub type StateCallback = Box<dyn FnMut(VisualizationPatch)>;

// ── Status ───────────────────────────────────────────────────────────────

/// Where the viewer is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    /// No structure yet.
    Loading,
    /// A structure with zero atoms.
    Empty,
    /// Drawing.
    Ready,
    /// A render fault; only [`Viewer::reload`] leaves this state.
    Error(String),
}

/// What to show in place of, or on top of, the render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Status text; `None` when the scene is drawing.
    pub message: Option<String>,
    /// Label of the recovery action, offered in the error state.
    pub retry: Option<&'static str>,
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder<T> {
    options: Options,
    state: VisualizationState,
    sink: Option<Arc<dyn ArtifactSink>>,
    on_state_change: Option<StateCallback>,
    target: PhantomData<T>,
}

impl<T: RenderTarget> ViewerBuilder<T> {
    fn new() -> Self {
        Self {
            options: Options::default(),
            state: VisualizationState::default(),
            sink: None,
            on_state_change: None,
            target: PhantomData,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Initial display state.
    #[must_use]
    pub fn with_state(mut self, state: VisualizationState) -> Self {
        self.state = state;
        self
    }

    /// Where exported snapshots go. Defaults to the working directory.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ArtifactSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Callback receiving proposed state patches.
    #[must_use]
    pub fn on_state_change(
        mut self,
        callback: impl FnMut(VisualizationPatch) + 'static,
    ) -> Self {
        self.on_state_change = Some(Box::new(callback));
        self
    }

    /// Consume the builder, taking ownership of the render target.
    #[must_use]
    pub fn build(self, target: T) -> Viewer<T> {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(DirectorySink::new(".")));
        let exporter = SnapshotExporter::new(sink);
        Viewer {
            target,
            options: self.options,
            state: self.state,
            structure: None,
            bounds: SceneBounds::default(),
            camera: None,
            pointer: PointerTracker::new(),
            composer: SceneComposer::new(),
            exporter,
            on_state_change: self.on_state_change,
            status: ViewerStatus::Loading,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// Composes a structure and display state into frames on a render target.
///
/// The host drives it: [`set_structure`](Self::set_structure) and
/// [`set_state`](Self::set_state) when its data changes, and
/// [`frame`](Self::frame) once per display refresh.
pub struct Viewer<T: RenderTarget> {
    target: T,
    options: Options,
    state: VisualizationState,
    structure: Option<Arc<StructureData>>,
    bounds: SceneBounds,
    camera: Option<CameraManager>,
    pointer: PointerTracker,
    composer: SceneComposer,
    exporter: SnapshotExporter,
    on_state_change: Option<StateCallback>,
    status: ViewerStatus,
}

impl<T: RenderTarget> std::fmt::Debug for Viewer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("status", &self.status)
            .field("bounds", &self.bounds)
            .field("camera", &self.camera)
            .field("exporter", &self.exporter)
            .finish_non_exhaustive()
    }
}

impl<T: RenderTarget> Viewer<T> {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder<T> {
        ViewerBuilder::new()
    }

    // -- Inputs --

    /// Replace the structure. `None` returns to loading.
    ///
    /// A new structure remounts the camera: framed from its bounds, or
    /// restored from the state's saved pose. In the error state the
    /// structure is kept for the next [`reload`](Self::reload).
    pub fn set_structure(&mut self, structure: Option<Arc<StructureData>>) {
        self.structure = structure;
        if matches!(self.status, ViewerStatus::Error(_)) {
            return;
        }
        self.enter();
    }

    /// Replace the display state. A saved camera pose only matters at
    /// mount; later poses come from the live camera.
    pub fn set_state(&mut self, state: VisualizationState) {
        self.state = state;
    }

    /// Forward a pointer gesture to the camera.
    pub fn handle_camera_input(&mut self, input: CameraInput) {
        if let Some(camera) = self.camera.as_mut() {
            camera.handle_input(input);
        }
    }

    /// A pointer button went down over the surface.
    pub fn pointer_pressed(&mut self, button: PointerButton, at: Vec2) {
        self.pointer.press(button, at);
    }

    /// The pointer moved; a held button drives the camera.
    pub fn pointer_moved(&mut self, at: Vec2) {
        if let Some(input) = self.pointer.moved(at) {
            self.handle_camera_input(input);
        }
    }

    /// Pointer buttons released.
    pub fn pointer_released(&mut self) {
        self.pointer.release();
    }

    /// Shift modifier state; shift turns an orbit drag into a pan.
    pub fn set_shift(&mut self, shift: bool) {
        self.pointer.set_shift(shift);
    }

    /// Wheel scrolled by `lines`.
    pub fn wheel(&mut self, lines: f32) {
        let input = self.pointer.wheel(lines);
        self.handle_camera_input(input);
    }

    /// Leave the error state and rebuild from the current structure.
    pub fn reload(&mut self) {
        log::info!("reloading viewer");
        self.enter();
    }

    fn enter(&mut self) {
        if let Some(camera) = self.camera.take() {
            camera.unmount();
        }
        let next = match &self.structure {
            None => ViewerStatus::Loading,
            Some(s) if s.atoms.is_empty() => ViewerStatus::Empty,
            Some(s) => {
                self.bounds = SceneBounds::from_atoms(&s.atoms);
                self.camera = Some(CameraManager::mount(
                    &self.bounds.recentered(),
                    self.state.camera.as_ref(),
                    &self.options.camera,
                    self.target.size(),
                ));
                ViewerStatus::Ready
            }
        };
        if next != self.status {
            log::info!("viewer {:?} -> {next:?}", self.status);
        }
        self.status = next;
    }

    fn fail(&mut self, err: &VizError) {
        log::error!("render fault: {err}");
        if let Some(camera) = self.camera.take() {
            camera.unmount();
        }
        let message = err.to_string();
        self.status = ViewerStatus::Error(if message.is_empty() {
            labels::UNEXPECTED_ERROR.to_owned()
        } else {
            message
        });
    }

    // -- Frame loop --

    /// Advance one display refresh: collect a finished export, step the
    /// camera (reporting a settled pose to the host), and draw.
    pub fn frame(&mut self, now: Instant) -> Option<ExportEvent> {
        let event = self.exporter.poll();
        if self.status != ViewerStatus::Ready {
            return event;
        }
        let (Some(structure), Some(camera)) = (&self.structure, &mut self.camera)
        else {
            return event;
        };

        if let Some(settings) = camera.tick(now) {
            if let Some(callback) = self.on_state_change.as_mut() {
                callback(VisualizationPatch::camera(settings));
            }
        }

        let frame = self.composer.compose(
            structure,
            &self.state,
            &self.bounds,
            camera.camera(),
        );
        if let Err(e) = self.target.render(&frame) {
            self.fail(&e);
        }
        event
    }

    // -- Export --

    /// Start exporting the current state. The scene is drawn again before
    /// capture so the image and its metadata describe the same state. A
    /// request while an export is in flight does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Capture`] when there is no drawn scene, the
    /// render error when redrawing faults, or the exporter's capture error.
    pub fn export_snapshot(&mut self, now: DateTime<Utc>) -> Result<(), VizError> {
        if self.exporter.is_busy() {
            log::debug!("export requested while one is in flight; ignored");
            return Ok(());
        }
        let Some(structure) = self.structure.as_ref() else {
            return Err(VizError::Capture("no structure loaded".into()));
        };
        let (ViewerStatus::Ready, Some(camera)) = (&self.status, &self.camera) else {
            return Err(VizError::Capture(format!(
                "nothing drawn while {:?}",
                self.status
            )));
        };

        let rendered = {
            let frame = self.composer.compose(
                structure,
                &self.state,
                &self.bounds,
                camera.camera(),
            );
            self.target.render(&frame)
        };
        if let Err(e) = rendered {
            self.fail(&e);
            return Err(e);
        }

        let request = SnapshotRequest {
            structure: structure.as_ref(),
            state: &self.state,
            camera: self.camera.as_ref().map(CameraManager::settings),
            export: &self.options.export,
            thresholds: &self.options.analysis,
        };
        match self.exporter.begin(&mut self.target, &request, now) {
            Err(VizError::ExportInFlight) => Ok(()),
            other => other,
        }
    }

    /// The snapshot exporter, for status and error dismissal.
    #[must_use]
    pub fn exporter(&self) -> &SnapshotExporter {
        &self.exporter
    }

    /// Mutable access to the exporter.
    pub fn exporter_mut(&mut self) -> &mut SnapshotExporter {
        &mut self.exporter
    }

    // -- Presentation --

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    /// Text and actions for the current state.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        match &self.status {
            ViewerStatus::Loading => Presentation {
                message: Some(labels::LOADING.to_owned()),
                retry: None,
            },
            ViewerStatus::Empty => Presentation {
                message: Some(labels::NO_ATOMS.to_owned()),
                retry: None,
            },
            ViewerStatus::Ready => Presentation {
                message: None,
                retry: None,
            },
            ViewerStatus::Error(msg) => Presentation {
                message: Some(msg.clone()),
                retry: Some(labels::RETRY),
            },
        }
    }

    /// Accessible label of the render surface.
    #[must_use]
    pub fn aria_label(&self) -> &'static str {
        labels::VIEWER_ARIA_LABEL
    }

    /// The overlay segments currently drawn, with their ids and names.
    pub fn overlay_segments(&mut self) -> &[OverlaySegment] {
        match (&self.status, &self.structure) {
            (ViewerStatus::Ready, Some(structure))
                if structure.interactions.is_some() =>
            {
                self.composer.overlay_segments(structure, &self.state)
            }
            _ => &[],
        }
    }

    /// Notice for an overlay that is switched on but has nothing to draw.
    pub fn overlay_notice(&mut self) -> Option<&'static str> {
        let drawing_overlay =
            self.status == ViewerStatus::Ready && self.state.show_interactions;
        (drawing_overlay && self.overlay_segments().is_empty())
            .then_some(labels::NO_INTERACTIONS)
    }

    // -- Accessors --

    /// The display state being drawn.
    #[must_use]
    pub fn state(&self) -> &VisualizationState {
        &self.state
    }

    /// The structure being drawn.
    #[must_use]
    pub fn structure(&self) -> Option<&Arc<StructureData>> {
        self.structure.as_ref()
    }

    /// Bounds of the current structure, before recentering.
    #[must_use]
    pub fn bounds(&self) -> &SceneBounds {
        &self.bounds
    }

    /// The mounted camera, present only while ready.
    #[must_use]
    pub fn camera(&self) -> Option<&CameraManager> {
        self.camera.as_ref()
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The render target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the render target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}
