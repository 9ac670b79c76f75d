//! Error types for the chunking pipeline.

use std::io;
use std::path::PathBuf;

/// Bad or missing request parameters. User-correctable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No video file uploaded.")]
    MissingFile,

    #[error("Invalid chunk duration.")]
    InvalidDuration,
}

/// A directory could not be provisioned.
#[derive(Debug, thiserror::Error)]
#[error("cannot prepare directory {}: {source}", path.display())]
pub struct StorageError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl StorageError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// The external segmentation operation reported failure.
#[derive(Debug, thiserror::Error)]
#[error("segmentation failed: {reason}")]
pub struct SegmentationError {
    pub reason: String,
}

/// The produced segments could not be enumerated or ordered.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("cannot read {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no sequence index in segment name {filename:?}")]
    UnindexedArtifact { filename: String },

    #[error("segment name is not valid UTF-8: {0}")]
    InvalidName(String),
}

/// Any way a single job can end other than success.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    #[error(transparent)]
    List(#[from] ListError),
}
