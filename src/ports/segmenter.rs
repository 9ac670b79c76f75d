use async_trait::async_trait;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Parameters of one external segmentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRequest {
    pub source: PathBuf,
    /// Output path template with a printf-style index placeholder.
    pub output_pattern: PathBuf,
    pub segment_duration_secs: u32,
}

/// How a segmentation run ended. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentOutcome {
    Success,
    Failure(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SegmenterPort: Send + Sync {
    /// Split `request.source` into stream-copied, time-sliced parts.
    ///
    /// Resolves once the external operation finishes. Cancelling `cancel`
    /// aborts the operation and resolves to [`SegmentOutcome::Failure`].
    async fn segment(&self, request: &SegmentRequest, cancel: CancellationToken) -> SegmentOutcome;
}
