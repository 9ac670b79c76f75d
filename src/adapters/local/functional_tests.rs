//! End-to-end runs against a real ffmpeg. Skipped when ffmpeg is not installed.

use crate::adapters::local::{FfmpegSegmenter, FsAdapter};
use crate::application::chunking::ChunkingService;
use crate::domain::jobs::UploadedFile;
use crate::domain::workspace::Workspace;
use crate::error::JobError;
use std::path::Path;
use std::process::Stdio;
use tempfile::tempdir;
use tokio::process::Command;

/// Render a synthetic clip with a keyframe every second.
async fn render_source(path: &Path, seconds: u32) -> bool {
    let status = Command::new("ffmpeg")
        .arg("-y")
        .arg("-f")
        .arg("lavfi")
        .arg("-i")
        .arg(format!("testsrc=duration={}:size=160x120:rate=10", seconds))
        .arg("-c:v")
        .arg("mpeg4")
        .arg("-g")
        .arg("10")
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    matches!(status, Ok(status) if status.success())
}

#[tokio::test]
async fn test_functional_thirty_seconds_in_ten_second_chunks() {
    let temp = tempdir().unwrap();
    let workspace = Workspace::new(temp.path().join("uploads"), temp.path().join("chunks"));
    workspace.prepare(&FsAdapter::new()).await.unwrap();

    let upload = UploadedFile::allocate(workspace.uploads_root(), "source.mp4");
    if !render_source(&upload.stored_path, 30).await {
        println!("Skipping test: ffmpeg not available");
        return;
    }

    let service = ChunkingService::new(
        FsAdapter::new(),
        FfmpegSegmenter::new("ffmpeg"),
        workspace.clone(),
        "http://localhost:5001",
    );

    let urls = service.process(&upload, Some("10")).await.unwrap();
    let dir_name = upload.output_dir_name();
    assert_eq!(
        urls,
        vec![
            format!("http://localhost:5001/chunks/{}/chunk-000.mp4", dir_name),
            format!("http://localhost:5001/chunks/{}/chunk-001.mp4", dir_name),
            format!("http://localhost:5001/chunks/{}/chunk-002.mp4", dir_name),
        ]
    );
    for index in 0..3 {
        let segment = workspace.job_dir(&upload).join(format!("chunk-{:03}.mp4", index));
        assert!(segment.metadata().unwrap().len() > 0, "{:?} is empty", segment);
    }

    service.cleanup(&upload).await.unwrap();
    assert!(!upload.stored_path.exists());
}

#[tokio::test]
async fn test_functional_corrupt_upload_fails_and_is_kept() {
    let temp = tempdir().unwrap();
    let workspace = Workspace::new(temp.path().join("uploads"), temp.path().join("chunks"));
    workspace.prepare(&FsAdapter::new()).await.unwrap();

    // Only meaningful when ffmpeg itself can run.
    let probe = Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .status()
        .await;
    if !matches!(probe, Ok(status) if status.success()) {
        println!("Skipping test: ffmpeg not available");
        return;
    }

    let upload = UploadedFile::allocate(workspace.uploads_root(), "broken.mp4");
    std::fs::write(&upload.stored_path, b"definitely not a video").unwrap();

    let service = ChunkingService::new(
        FsAdapter::new(),
        FfmpegSegmenter::new("ffmpeg"),
        workspace.clone(),
        "http://localhost:5001",
    );

    let err = service.process(&upload, Some("10")).await.unwrap_err();
    assert!(matches!(err, JobError::Segmentation(_)));
    assert!(upload.stored_path.exists());
}
