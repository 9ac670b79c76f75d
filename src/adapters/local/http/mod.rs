//! HTTP inbound adapter.
//!
//! `POST /api/upload` runs a chunking job; `GET /chunks/...` serves what
//! earlier jobs produced.

mod error;
mod upload;

pub use error::ApiError;
pub use upload::{upload_video, DURATION_FIELD, VIDEO_FIELD};

use crate::application::chunking::ChunkingService;
use crate::ports::segmenter::SegmenterPort;
use crate::ports::storage::StoragePort;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn router<S, G>(service: Arc<ChunkingService<S, G>>) -> Router
where
    S: StoragePort + 'static,
    G: SegmenterPort + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chunks = ServeDir::new(service.workspace().chunks_root());

    Router::new()
        .route("/api/upload", post(upload_video::<S, G>))
        .nest_service("/chunks", chunks)
        .with_state(service)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
