use super::error::ApiError;
use crate::application::chunking::ChunkingService;
use crate::domain::jobs::UploadedFile;
use crate::domain::response::UploadResponse;
use crate::error::ValidationError;
use crate::ports::segmenter::SegmenterPort;
use crate::ports::storage::StoragePort;
use axum::extract::{Multipart, State};
use axum::{BoxError, Json};
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::{fs::File, io::AsyncWriteExt, io::BufWriter};
use tokio_util::io::StreamReader;

pub const VIDEO_FIELD: &str = "video";
pub const DURATION_FIELD: &str = "chunkDuration";

/// `POST /api/upload`: stage the `video` field, then run the chunking job.
pub async fn upload_video<S, G>(
    State(service): State<Arc<ChunkingService<S, G>>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
    S: StoragePort + 'static,
    G: SegmenterPort + 'static,
{
    let mut upload: Option<UploadedFile> = None;
    let mut chunk_duration: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(VIDEO_FIELD) if upload.is_none() => {
                let Some(file_name) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let staged = UploadedFile::allocate(service.workspace().uploads_root(), &file_name);
                tracing::debug!(job = %staged.generated_id, path = %staged.stored_path.display(), "Saving upload");
                stream_to_file(&staged.stored_path, field).await.map_err(|e| {
                    tracing::error!(path = %staged.stored_path.display(), error = %e, "Failed to stage upload");
                    ApiError::Staging(e)
                })?;
                upload = Some(staged);
            }
            Some(DURATION_FIELD) => chunk_duration = Some(field.text().await?),
            _ => {}
        }
    }

    let upload = upload.ok_or(ValidationError::MissingFile)?;
    let urls = service.process(&upload, chunk_duration.as_deref()).await?;

    let response = Json(UploadResponse::chunked(urls));
    service.cleanup(&upload);
    Ok(response)
}

// Save a `Stream` to a file, removing the partial file on failure.
async fn stream_to_file<S, E>(path: &Path, stream: S) -> io::Result<()>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let result = async {
        let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
        let body_reader = StreamReader::new(body_with_io_error);
        futures::pin_mut!(body_reader);

        let mut file = BufWriter::new(File::create(path).await?);
        tokio::io::copy(&mut body_reader, &mut file).await?;
        file.flush().await?;

        Ok::<_, io::Error>(())
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}
