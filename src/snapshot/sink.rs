use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VizError;

/// An encoded image and its metadata, named and ready to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotArtifacts {
    /// `<stem>.png`
    pub image_name: String,
    /// PNG bytes.
    pub image: Vec<u8>,
    /// `<stem>_metadata.json`
    pub metadata_name: String,
    /// Pretty-printed metadata JSON.
    pub metadata: String,
}

impl SnapshotArtifacts {
    /// Name both artifacts after `stem`.
    #[must_use]
    pub fn new(stem: &str, image: Vec<u8>, metadata: String) -> Self {
        Self {
            image_name: format!("{stem}.png"),
            image,
            metadata_name: format!("{stem}_metadata.json"),
            metadata,
        }
    }
}

/// Destination for exported snapshots.
///
/// Implementations must deliver both artifacts or neither.
pub trait ArtifactSink: Send + Sync {
    /// Deliver the pair.
    ///
    /// # Errors
    ///
    /// Any error means nothing was delivered.
    fn deliver(&self, artifacts: &SnapshotArtifacts) -> Result<(), VizError>;
}

/// Writes artifacts as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`, created on first delivery if missing.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, artifacts: &SnapshotArtifacts) -> Result<(), VizError> {
        fs::create_dir_all(&self.dir)?;
        let image_path = self.dir.join(&artifacts.image_name);
        let metadata_path = self.dir.join(&artifacts.metadata_name);

        fs::write(&image_path, &artifacts.image)?;
        if let Err(e) = fs::write(&metadata_path, &artifacts.metadata) {
            // Never leave an image without its metadata.
            let _ = fs::remove_file(&image_path);
            return Err(e.into());
        }
        log::info!(
            "wrote {} and {}",
            image_path.display(),
            metadata_path.display()
        );
        Ok(())
    }
}
