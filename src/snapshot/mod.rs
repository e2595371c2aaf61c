//! Snapshot export: capture the rendered frame, flatten it onto an opaque
//! background, encode PNG, and deliver it with a metadata document that
//! records how to reproduce it.

/// Flattening onto an opaque background and PNG encoding.
pub mod encode;
/// Capture on the caller's thread, encode and deliver on a worker.
pub mod exporter;
/// The metadata document written next to each image.
pub mod metadata;
/// Destinations that receive the image and metadata pair.
pub mod sink;

pub use exporter::{ExportEvent, ExportOutcome, ExportStatus, SnapshotExporter};
pub use metadata::{SnapshotMetadata, SnapshotRequest};
pub use sink::{ArtifactSink, DirectorySink, SnapshotArtifacts};
