//! Chunker binary - HTTP upload endpoint backed by a local ffmpeg.
//!
//! Wires up:
//! - Local adapters (filesystem, ffmpeg child process)
//! - The chunking service
//! - HTTP layer (upload + static chunk serving)

use chunker::adapters::local::{http, FfmpegSegmenter, FsAdapter};
use chunker::domain::workspace::Workspace;
use chunker::{ChunkingService, ServerConfig};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chunker=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // 1. Workspace roots
    let fs_adapter = FsAdapter::new();
    let workspace = Workspace::new(&config.uploads_root, &config.chunks_root);
    if let Err(e) = workspace.prepare(&fs_adapter).await {
        tracing::error!(error = %e, "Failed to create working directories");
        std::process::exit(1);
    }

    // 2. Application service
    let service = ChunkingService::new(
        fs_adapter,
        FfmpegSegmenter::new(&config.ffmpeg_bin),
        workspace,
        config.public_base_url.clone(),
    )
    .with_segment_timeout(config.segment_timeout);

    // 3. HTTP layer
    let app = http::router(Arc::new(service));

    // 4. Start server
    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %config.bind_address(), error = %e, "Failed to bind TCP listener");
            std::process::exit(1);
        }
    };
    tracing::info!(
        address = %config.bind_address(),
        public_url = %config.public_base_url,
        ffmpeg = %config.ffmpeg_bin.display(),
        "Chunker listening; make sure ffmpeg is installed"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
    tracing::info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
