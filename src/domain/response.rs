use super::artifacts::SegmentArtifact;
use serde::Serialize;
use std::path::Path;

pub const SUCCESS_MESSAGE: &str = "Video chunked successfully!";

/// Public URLs of a job's segments, in playback order.
pub type ChunkUrlList = Vec<String>;

/// Map ordered artifacts to `{base_url}/chunks/{output_dir_name}/{filename}`.
pub fn build_urls(output_dir: &Path, artifacts: &[SegmentArtifact], base_url: &str) -> ChunkUrlList {
    let base = base_url.trim_end_matches('/');
    let dir_name = output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    artifacts
        .iter()
        .map(|artifact| format!("{}/chunks/{}/{}", base, dir_name, artifact.filename))
        .collect()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub chunk_urls: ChunkUrlList,
}

impl UploadResponse {
    pub fn chunked(chunk_urls: ChunkUrlList) -> Self {
        Self {
            success: true,
            message: String::from(SUCCESS_MESSAGE),
            chunk_urls,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(filename: &str, sequence_index: u64) -> SegmentArtifact {
        SegmentArtifact {
            filename: filename.to_owned(),
            sequence_index,
        }
    }

    #[test]
    fn test_build_urls_preserves_order() {
        let artifacts = vec![artifact("chunk-000.mp4", 0), artifact("chunk-001.mp4", 1)];
        let urls = build_urls(Path::new("/data/chunks/abc_mp4"), &artifacts, "http://localhost:5001/");

        assert_eq!(
            urls,
            vec![
                "http://localhost:5001/chunks/abc_mp4/chunk-000.mp4",
                "http://localhost:5001/chunks/abc_mp4/chunk-001.mp4",
            ]
        );
    }

    #[test]
    fn test_build_urls_empty() {
        assert!(build_urls(Path::new("chunks/x"), &[], "http://h").is_empty());
    }

    #[test]
    fn test_payload_shapes() {
        let ok = serde_json::to_value(UploadResponse::chunked(vec!["u".into()])).unwrap();
        assert_eq!(
            ok,
            json!({"success": true, "message": "Video chunked successfully!", "chunkUrls": ["u"]})
        );

        let err = serde_json::to_value(ErrorResponse::new("Failed to chunk video.")).unwrap();
        assert_eq!(err, json!({"error": "Failed to chunk video."}));
    }
}
