use crate::domain::artifacts::{self, OUTPUT_TEMPLATE};
use crate::domain::jobs::{validate_duration, JobState, SegmentationJob, UploadedFile};
use crate::domain::response::{build_urls, ChunkUrlList};
use crate::domain::workspace::Workspace;
use crate::error::{JobError, SegmentationError};
use crate::ports::segmenter::{SegmentOutcome, SegmenterPort, SegmentRequest};
use crate::ports::storage::StoragePort;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Runs one upload through segmentation, listing and URL assembly.
pub struct ChunkingService<S, G> {
    storage: Arc<S>,
    segmenter: G,
    workspace: Workspace,
    public_base_url: String,
    segment_timeout: Option<Duration>,
}

impl<S, G> ChunkingService<S, G>
where
    S: StoragePort + 'static,
    G: SegmenterPort,
{
    pub fn new(storage: S, segmenter: G, workspace: Workspace, public_base_url: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(storage),
            segmenter,
            workspace,
            public_base_url: public_base_url.into(),
            segment_timeout: None,
        }
    }

    /// Treat a segmentation run that outlives `timeout` as failed.
    pub fn with_segment_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.segment_timeout = timeout;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Validate, segment, list and map to URLs.
    ///
    /// The source file is left in place on every path; callers hand it to
    /// [`ChunkingService::cleanup`] once the response is built.
    pub async fn process(
        &self,
        upload: &UploadedFile,
        duration_param: Option<&str>,
    ) -> Result<ChunkUrlList, JobError> {
        let job_id = upload.generated_id.as_str();
        transition(job_id, JobState::Received);
        transition(job_id, JobState::Validating);

        let duration = validate_duration(duration_param).map_err(|e| {
            transition(job_id, JobState::Rejected);
            e
        })?;

        let job = SegmentationJob {
            id: upload.generated_id.clone(),
            source_path: upload.stored_path.clone(),
            output_dir: self.workspace.job_dir(upload),
            segment_duration_secs: duration,
        };

        transition(job_id, JobState::Processing);
        self.storage.ensure_dir(&job.output_dir).await.map_err(|e| {
            error!(job = job_id, error = %e, "Could not create the chunk directory");
            e
        })?;

        if let Err(e) = self.run(&job).await {
            transition(job_id, JobState::SegmentationFailed);
            error!(job = job_id, source = %job.source_path.display(), error = %e, "Error during chunking");
            return Err(e.into());
        }
        transition(job_id, JobState::Segmented);
        info!(job = job_id, "Video has been chunked successfully");

        transition(job_id, JobState::Listing);
        let ordered = artifacts::list(self.storage.as_ref(), &job.output_dir)
            .await
            .map_err(|e| {
                transition(job_id, JobState::ListFailed);
                error!(job = job_id, error = %e, "Could not list the chunk directory");
                e
            })?;

        Ok(build_urls(&job.output_dir, &ordered, &self.public_base_url))
    }

    async fn run(&self, job: &SegmentationJob) -> Result<(), SegmentationError> {
        let request = SegmentRequest {
            source: job.source_path.clone(),
            output_pattern: job.output_dir.join(OUTPUT_TEMPLATE),
            segment_duration_secs: job.segment_duration_secs,
        };

        let cancel = CancellationToken::new();
        let deadline = self.segment_timeout.map(|timeout| {
            let token = cancel.clone();
            let job_id = job.id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                warn!(job = %job_id, timeout_secs = timeout.as_secs(), "segmentation timed out, cancelling");
                token.cancel();
            })
        });

        let outcome = self.segmenter.segment(&request, cancel).await;

        if let Some(deadline) = deadline {
            deadline.abort();
        }

        match outcome {
            SegmentOutcome::Success => Ok(()),
            SegmentOutcome::Failure(reason) => Err(SegmentationError { reason }),
        }
    }

    /// Remove the uploaded source in the background. Failures are logged only.
    pub fn cleanup(&self, upload: &UploadedFile) -> JoinHandle<()> {
        let storage = Arc::clone(&self.storage);
        let source: PathBuf = upload.stored_path.clone();
        let job_id = upload.generated_id.clone();

        transition(&job_id, JobState::Responded);
        tokio::spawn(async move {
            transition(&job_id, JobState::CleaningUp);
            if let Err(e) = storage.remove_file(&source).await {
                warn!(job = %job_id, path = %source.display(), error = %e, "Error deleting original upload");
            }
            transition(&job_id, JobState::Done);
        })
    }
}

fn transition(job_id: &str, state: JobState) {
    debug!(job = job_id, state = %state, terminal = state.is_terminal(), "job state");
}
