use crate::error::ValidationError;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// A source video staged on local disk by the upload handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub stored_path: PathBuf,
    pub generated_id: String,
    /// Extension including the leading dot, or empty.
    pub original_extension: String,
}

impl UploadedFile {
    /// Allocate a fresh, collision-resistant location under `uploads_root`.
    ///
    /// The id is a UUIDv7 (millisecond timestamp plus random bits). Only a
    /// sanitised extension survives from the client-supplied name.
    pub fn allocate(uploads_root: &Path, original_name: &str) -> Self {
        let generated_id = Uuid::now_v7().simple().to_string();
        let original_extension = sanitize_extension(original_name);
        let stored_path = uploads_root.join(format!("{}{}", generated_id, original_extension));

        Self {
            stored_path,
            generated_id,
            original_extension,
        }
    }

    pub fn stored_name(&self) -> String {
        format!("{}{}", self.generated_id, self.original_extension)
    }

    /// Name of the per-job segment directory: the stored filename with its
    /// extension separator replaced.
    pub fn output_dir_name(&self) -> String {
        self.stored_name().replacen('.', "_", 1)
    }
}

fn sanitize_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// One upload-to-segments run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationJob {
    pub id: String,
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub segment_duration_secs: u32,
}

/// Lifecycle of a job. Terminal states are `Rejected`, `SegmentationFailed`,
/// `ListFailed` and `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Received,
    Validating,
    Rejected,
    Processing,
    SegmentationFailed,
    Segmented,
    Listing,
    ListFailed,
    Responded,
    CleaningUp,
    Done,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Rejected | JobState::SegmentationFailed | JobState::ListFailed | JobState::Done
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Received => "received",
            JobState::Validating => "validating",
            JobState::Rejected => "rejected",
            JobState::Processing => "processing",
            JobState::SegmentationFailed => "segmentation_failed",
            JobState::Segmented => "segmented",
            JobState::Listing => "listing",
            JobState::ListFailed => "list_failed",
            JobState::Responded => "responded",
            JobState::CleaningUp => "cleaning_up",
            JobState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Parse the requested segment duration in whole seconds.
pub fn validate_duration(param: Option<&str>) -> Result<u32, ValidationError> {
    let raw = param.map(str::trim).ok_or(ValidationError::InvalidDuration)?;
    match raw.parse::<i64>() {
        Ok(secs) if secs > 0 => u32::try_from(secs).map_err(|_| ValidationError::InvalidDuration),
        _ => Err(ValidationError::InvalidDuration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_duration_accepts_positive_integers() {
        assert_eq!(validate_duration(Some("10")), Ok(10));
        assert_eq!(validate_duration(Some(" 3 ")), Ok(3));
        assert_eq!(validate_duration(Some("1")), Ok(1));
    }

    #[test]
    fn test_validate_duration_rejects_everything_else() {
        for bad in [Some("0"), Some("-5"), Some("abc"), Some(""), Some("1.5"), Some("99999999999"), None] {
            assert_eq!(
                validate_duration(bad),
                Err(ValidationError::InvalidDuration),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_allocate_keeps_only_sanitized_extension() {
        let root = Path::new("/srv/uploads");
        let upload = UploadedFile::allocate(root, "../../etc/My Clip.MP4");

        assert_eq!(upload.original_extension, ".mp4");
        assert_eq!(upload.stored_path.parent(), Some(root));
        assert_eq!(upload.stored_name(), format!("{}.mp4", upload.generated_id));
        assert_eq!(upload.output_dir_name(), format!("{}_mp4", upload.generated_id));
    }

    #[test]
    fn test_allocate_drops_suspicious_extension() {
        let root = Path::new("uploads");
        assert_eq!(UploadedFile::allocate(root, "video").original_extension, "");
        assert_eq!(UploadedFile::allocate(root, "video.m p4").original_extension, "");
        assert_eq!(UploadedFile::allocate(root, "video.averyverylongext").original_extension, "");

        let bare = UploadedFile::allocate(root, "video");
        assert_eq!(bare.output_dir_name(), bare.generated_id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let root = Path::new("uploads");
        let a = UploadedFile::allocate(root, "a.mp4");
        let b = UploadedFile::allocate(root, "a.mp4");
        assert_ne!(a.generated_id, b.generated_id);
        assert_ne!(a.output_dir_name(), b.output_dir_name());
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobState::Done.is_terminal());
        assert!(JobState::Rejected.is_terminal());
        assert!(!JobState::Processing.is_terminal());
        assert_eq!(JobState::SegmentationFailed.to_string(), "segmentation_failed");
    }
}
