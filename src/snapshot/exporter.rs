use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};

use super::encode::{encode_png, flatten, EncodeFn};
use super::metadata::{artifact_stem, resolve_export_background, SnapshotMetadata, SnapshotRequest};
use super::sink::{ArtifactSink, SnapshotArtifacts};
use crate::error::VizError;
use crate::labels;
use crate::renderer::{CapturedFrame, RenderTarget};
use crate::style::Color;

/// A finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    /// Delivered image name.
    pub image_name: String,
    /// Delivered metadata name.
    pub metadata_name: String,
    /// The metadata that was delivered.
    pub metadata: SnapshotMetadata,
}

/// Result of an export, reported once by [`SnapshotExporter::poll`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    /// Both artifacts were delivered.
    Completed(ExportOutcome),
    /// Nothing was delivered; the message is also kept until dismissed.
    Failed(String),
}

/// What the export control should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Ready to export.
    Idle,
    /// An export is encoding or delivering.
    InFlight,
    /// The last export failed; export is still available.
    Failed(String),
}

struct InFlight {
    thread: JoinHandle<()>,
    result: mpsc::Receiver<Result<ExportOutcome, VizError>>,
}

/// Captures the render target and delivers an image + metadata pair.
///
/// Capture happens on the caller's thread, since the target is only lent
/// for the duration of [`begin`](Self::begin). Flattening, encoding and
/// delivery run on a worker thread; the frame loop polls for the result.
/// At most one export runs at a time.
pub struct SnapshotExporter {
    sink: Arc<dyn ArtifactSink>,
    encode: EncodeFn,
    in_flight: Option<InFlight>,
    error: Option<String>,
}

impl std::fmt::Debug for SnapshotExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotExporter")
            .field("in_flight", &self.in_flight.is_some())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl SnapshotExporter {
    /// Exporter delivering to `sink`. Naming and background fallback come
    /// from each request's export options.
    #[must_use]
    pub fn new(sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            sink,
            encode: encode_png,
            in_flight: None,
            error: None,
        }
    }

    /// Replace the image encoder.
    #[must_use]
    pub fn with_encoder(mut self, encode: EncodeFn) -> Self {
        self.encode = encode;
        self
    }

    /// Whether an export is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the export control accepts a click.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.is_busy()
    }

    /// Current control state.
    #[must_use]
    pub fn status(&self) -> ExportStatus {
        match (&self.in_flight, &self.error) {
            (Some(_), _) => ExportStatus::InFlight,
            (None, Some(msg)) => ExportStatus::Failed(msg.clone()),
            (None, None) => ExportStatus::Idle,
        }
    }

    /// Text on the export control.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            labels::LOADING
        } else {
            labels::EXPORT_SNAPSHOT
        }
    }

    /// Last failure message, until dismissed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the failure message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Capture `target` and start encoding and delivery in the background.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::ExportInFlight`] without side effects while
    /// another export runs. Capture and thread-spawn failures are returned
    /// and also kept as the dismissible error.
    pub fn begin(
        &mut self,
        target: &mut dyn RenderTarget,
        request: &SnapshotRequest<'_>,
        captured_at: DateTime<Utc>,
    ) -> Result<(), VizError> {
        if self.is_busy() {
            log::debug!("export requested while one is in flight; ignored");
            return Err(VizError::ExportInFlight);
        }
        self.error = None;

        match self.spawn(target, request, captured_at) {
            Ok(in_flight) => {
                self.in_flight = Some(in_flight);
                Ok(())
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn spawn(
        &self,
        target: &mut dyn RenderTarget,
        request: &SnapshotRequest<'_>,
        captured_at: DateTime<Utc>,
    ) -> Result<InFlight, VizError> {
        let (_, background) = resolve_export_background(
            &request.state.background_color,
            &request.export.fallback_background,
        );
        let frame = target.capture()?;
        let metadata = SnapshotMetadata::build(request, frame.width, captured_at);
        let stem = artifact_stem(
            &request.export.product_name,
            &request.structure.id,
            captured_at,
        );

        let sink = Arc::clone(&self.sink);
        let encode = self.encode;
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("snapshot-export".into())
            .spawn(move || {
                let result = Self::encode_and_deliver(
                    &frame,
                    background,
                    encode,
                    &stem,
                    metadata,
                    sink.as_ref(),
                );
                let _ = tx.send(result);
            })
            .map_err(VizError::ThreadSpawn)?;

        Ok(InFlight { thread, result: rx })
    }

    fn encode_and_deliver(
        frame: &CapturedFrame,
        background: Color,
        encode: EncodeFn,
        stem: &str,
        metadata: SnapshotMetadata,
        sink: &dyn ArtifactSink,
    ) -> Result<ExportOutcome, VizError> {
        let image = encode(&flatten(frame, background))?;
        let artifacts = SnapshotArtifacts::new(stem, image, metadata.to_json()?);
        sink.deliver(&artifacts)?;
        Ok(ExportOutcome {
            image_name: artifacts.image_name,
            metadata_name: artifacts.metadata_name,
            metadata,
        })
    }

    /// Non-blocking check for the running export's result.
    pub fn poll(&mut self) -> Option<ExportEvent> {
        let received = match &self.in_flight {
            Some(in_flight) => match in_flight.result.try_recv() {
                Ok(result) => result,
                Err(mpsc::TryRecvError::Empty) => return None,
                Err(mpsc::TryRecvError::Disconnected) => Err(VizError::Encode(
                    "export worker stopped without a result".into(),
                )),
            },
            None => return None,
        };
        Some(self.finish(received))
    }

    /// Block until the running export finishes. `None` when idle.
    pub fn wait(&mut self) -> Option<ExportEvent> {
        let received = match self.in_flight.as_ref()?.result.recv() {
            Ok(result) => result,
            Err(_) => Err(VizError::Encode(
                "export worker stopped without a result".into(),
            )),
        };
        Some(self.finish(received))
    }

    fn finish(&mut self, result: Result<ExportOutcome, VizError>) -> ExportEvent {
        if let Some(in_flight) = self.in_flight.take() {
            let _ = in_flight.thread.join();
        }
        match result {
            Ok(outcome) => {
                log::info!("exported snapshot {}", outcome.image_name);
                ExportEvent::Completed(outcome)
            }
            Err(e) => {
                log::error!("export failed: {e}");
                let message = e.to_string();
                self.error = Some(message.clone());
                ExportEvent::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use image::RgbaImage;

    use super::*;
    use crate::options::{AnalysisThresholds, ExportOptions};
    use crate::scene::SceneFrame;
    use crate::state::VisualizationState;
    use crate::structure::StructureData;
    use crate::test_support::{carbon_chain, structure};

    /// Target returning a fixed 2x2 frame, or failing capture.
    struct FakeTarget {
        fail: bool,
    }

    impl RenderTarget for FakeTarget {
        fn render(&mut self, _: &SceneFrame<'_>) -> Result<(), VizError> {
            Ok(())
        }
        fn capture(&mut self) -> Result<CapturedFrame, VizError> {
            if self.fail {
                return Err(VizError::Capture("no frame".into()));
            }
            CapturedFrame::new(2, 2, vec![0; 16])
        }
        fn size(&self) -> (u32, u32) {
            (2, 2)
        }
    }

    #[derive(Default)]
    struct MemorySink {
        delivered: Mutex<Vec<SnapshotArtifacts>>,
    }

    impl ArtifactSink for MemorySink {
        fn deliver(&self, artifacts: &SnapshotArtifacts) -> Result<(), VizError> {
            if let Ok(mut d) = self.delivered.lock() {
                d.push(artifacts.clone());
            }
            Ok(())
        }
    }

    fn fixture() -> (StructureData, VisualizationState, AnalysisThresholds) {
        let state = VisualizationState {
            background_color: "transparent".into(),
            ..VisualizationState::default()
        };
        (structure("1abc", carbon_chain(3)), state, AnalysisThresholds::default())
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 0).unwrap()
    }

    fn failing_encoder(_: &RgbaImage) -> Result<Vec<u8>, VizError> {
        Err(VizError::Encode("disk full of pixels".into()))
    }

    #[test]
    fn successful_export_delivers_a_matching_pair() {
        let sink = Arc::new(MemorySink::default());
        let mut exporter = SnapshotExporter::new(sink.clone());
        let (s, state, th) = fixture();
        let export = ExportOptions::default();
        let request = SnapshotRequest {
            structure: &s,
            state: &state,
            camera: None,
            export: &export,
            thresholds: &th,
        };
        exporter
            .begin(&mut FakeTarget { fail: false }, &request, at())
            .unwrap();
        assert_eq!(exporter.status(), ExportStatus::InFlight);
        assert_eq!(exporter.label(), "Loading...");
        assert!(!exporter.is_enabled());

        let Some(ExportEvent::Completed(outcome)) = exporter.wait() else {
            panic!("export did not complete");
        };
        assert_eq!(outcome.image_name, "BioDockViz_1abc_2025-01-31.png");
        assert_eq!(outcome.metadata_name, "BioDockViz_1abc_2025-01-31_metadata.json");
        assert_eq!(outcome.metadata.background_color, "#FFFFFF");
        assert_eq!(outcome.metadata.resolution, 2);

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(&delivered[0].image[1..4], b"PNG");
        assert!(delivered[0].metadata.contains("\"atomCount\": 3"));
        assert_eq!(exporter.status(), ExportStatus::Idle);
        assert_eq!(exporter.label(), "Export Snapshot");
    }

    #[test]
    fn encode_failure_delivers_nothing_and_stays_retryable() {
        let sink = Arc::new(MemorySink::default());
        let mut exporter = SnapshotExporter::new(sink.clone())
            .with_encoder(failing_encoder);
        let (s, state, th) = fixture();
        let export = ExportOptions::default();
        let request = SnapshotRequest {
            structure: &s,
            state: &state,
            camera: None,
            export: &export,
            thresholds: &th,
        };
        exporter
            .begin(&mut FakeTarget { fail: false }, &request, at())
            .unwrap();
        assert!(matches!(exporter.wait(), Some(ExportEvent::Failed(_))));
        assert!(sink.delivered.lock().unwrap().is_empty());
        assert!(matches!(exporter.status(), ExportStatus::Failed(_)));
        assert!(exporter.error().unwrap().contains("disk full of pixels"));
        assert!(exporter.is_enabled());

        exporter.dismiss_error();
        assert_eq!(exporter.status(), ExportStatus::Idle);
    }

    #[test]
    fn capture_failure_is_reported_synchronously() {
        let sink = Arc::new(MemorySink::default());
        let mut exporter = SnapshotExporter::new(sink.clone());
        let (s, state, th) = fixture();
        let export = ExportOptions::default();
        let request = SnapshotRequest {
            structure: &s,
            state: &state,
            camera: None,
            export: &export,
            thresholds: &th,
        };
        let err = exporter
            .begin(&mut FakeTarget { fail: true }, &request, at())
            .unwrap_err();
        assert!(matches!(err, VizError::Capture(_)));
        assert!(exporter.error().is_some());
        assert!(exporter.poll().is_none());
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[test]
    fn second_export_while_busy_is_ignored() {
        let sink = Arc::new(MemorySink::default());
        let mut exporter = SnapshotExporter::new(sink.clone());
        let (s, state, th) = fixture();
        let export = ExportOptions::default();
        let request = SnapshotRequest {
            structure: &s,
            state: &state,
            camera: None,
            export: &export,
            thresholds: &th,
        };
        let mut target = FakeTarget { fail: false };
        exporter.begin(&mut target, &request, at()).unwrap();
        assert!(matches!(
            exporter.begin(&mut target, &request, at()),
            Err(VizError::ExportInFlight)
        ));
        assert!(exporter.error().is_none());
        let _ = exporter.wait();
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);
        assert!(exporter.wait().is_none());
    }

    /// Target whose single pixel is fully transparent.
    struct TranslucentTarget;

    impl RenderTarget for TranslucentTarget {
        fn render(&mut self, _: &SceneFrame<'_>) -> Result<(), VizError> {
            Ok(())
        }
        fn capture(&mut self) -> Result<CapturedFrame, VizError> {
            CapturedFrame::new(1, 1, vec![255, 255, 255, 0])
        }
        fn size(&self) -> (u32, u32) {
            (1, 1)
        }
    }

    #[test]
    fn image_and_metadata_share_the_request_fallback_background() {
        let sink = Arc::new(MemorySink::default());
        let mut exporter = SnapshotExporter::new(sink.clone());
        let (s, state, th) = fixture();
        let export = ExportOptions {
            product_name: "Dock".into(),
            fallback_background: "#0000FF".into(),
            ..ExportOptions::default()
        };
        let request = SnapshotRequest {
            structure: &s,
            state: &state,
            camera: None,
            export: &export,
            thresholds: &th,
        };
        exporter.begin(&mut TranslucentTarget, &request, at()).unwrap();
        let Some(ExportEvent::Completed(outcome)) = exporter.wait() else {
            panic!("export did not complete");
        };
        assert_eq!(outcome.metadata.background_color, "#0000FF");
        assert!(outcome.image_name.starts_with("Dock_1abc_"));

        let delivered = sink.delivered.lock().unwrap();
        let png = image::load_from_memory(&delivered[0].image)
            .unwrap()
            .to_rgba8();
        assert_eq!(png.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }
}
