use crate::domain::response::ErrorResponse;
use crate::error::{JobError, ValidationError};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::io;

/// Failure of an upload request, mapped onto fixed client-facing messages.
///
/// Diagnostic detail is logged where the error is raised and never leaves the
/// server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("failed to stage upload: {0}")]
    Staging(io::Error),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Job(e.into())
    }
}

impl ApiError {
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Job(JobError::Validation(ValidationError::MissingFile)) => {
                (StatusCode::BAD_REQUEST, "No video file uploaded.")
            }
            ApiError::Job(JobError::Validation(ValidationError::InvalidDuration)) => {
                (StatusCode::BAD_REQUEST, "Invalid chunk duration.")
            }
            ApiError::Job(JobError::Segmentation(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to chunk video.")
            }
            ApiError::Job(JobError::List(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list video chunks.")
            }
            ApiError::Job(JobError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to prepare chunk storage.")
            }
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "Invalid multipart request."),
            ApiError::Staging(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store uploaded file."),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_client_error() {
            tracing::debug!(status = %status, error = %self, "Rejected upload");
        }
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
