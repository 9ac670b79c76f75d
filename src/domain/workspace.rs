use super::jobs::UploadedFile;
use crate::error::StorageError;
use crate::ports::storage::StoragePort;
use std::path::{Path, PathBuf};

/// The two fixed root areas every job lives under.
#[derive(Debug, Clone)]
pub struct Workspace {
    uploads_root: PathBuf,
    chunks_root: PathBuf,
}

impl Workspace {
    pub fn new(uploads_root: impl Into<PathBuf>, chunks_root: impl Into<PathBuf>) -> Self {
        Self {
            uploads_root: uploads_root.into(),
            chunks_root: chunks_root.into(),
        }
    }

    /// Create both roots if missing. Run once at startup.
    pub async fn prepare(&self, storage: &impl StoragePort) -> Result<(), StorageError> {
        storage.ensure_dir(&self.uploads_root).await?;
        storage.ensure_dir(&self.chunks_root).await
    }

    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    pub fn chunks_root(&self) -> &Path {
        &self.chunks_root
    }

    /// Dedicated output directory of the job started for `upload`.
    pub fn job_dir(&self, upload: &UploadedFile) -> PathBuf {
        self.chunks_root.join(upload.output_dir_name())
    }
}
