use crate::ports::segmenter::{SegmentOutcome, SegmenterPort, SegmentRequest};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs the ffmpeg segment muxer as a child process.
#[derive(Clone, Debug)]
pub struct FfmpegSegmenter {
    program: PathBuf,
}

impl FfmpegSegmenter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Stream copy, fixed-length slices, per-segment timestamps from zero.
    pub fn arguments(request: &SegmentRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(12);
        args.push("-y".into());
        args.push("-i".into());
        args.push(request.source.clone().into_os_string());
        args.push("-c".into());
        args.push("copy".into());
        args.push("-f".into());
        args.push("segment".into());
        args.push("-segment_time".into());
        args.push(request.segment_duration_secs.to_string().into());
        args.push("-reset_timestamps".into());
        args.push("1".into());
        args.push(request.output_pattern.clone().into_os_string());
        args
    }
}

#[async_trait]
impl SegmenterPort for FfmpegSegmenter {
    async fn segment(&self, request: &SegmentRequest, cancel: CancellationToken) -> SegmentOutcome {
        let mut child = match Command::new(&self.program)
            .args(Self::arguments(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return SegmentOutcome::Failure(format!(
                    "failed to spawn {}: {}",
                    self.program.display(),
                    e
                ))
            }
        };

        // Drain stderr concurrently; a full pipe would stall ffmpeg.
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let status = tokio::select! {
            status = child.wait() => status,
            _ = cancel.cancelled() => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "failed to kill ffmpeg");
                }
                return SegmentOutcome::Failure(String::from("segmentation cancelled"));
            }
        };

        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        match status {
            Ok(status) if status.success() => SegmentOutcome::Success,
            Ok(status) => SegmentOutcome::Failure(format!(
                "ffmpeg exited with {}: {}",
                status,
                last_lines(&stderr, 5)
            )),
            Err(e) => SegmentOutcome::Failure(format!("failed to wait for ffmpeg: {}", e)),
        }
    }
}

fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(count)..].join("\n")
}
