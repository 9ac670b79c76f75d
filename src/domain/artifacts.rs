//! Segment naming and ordering.
//!
//! The external segmenter writes files from [`OUTPUT_TEMPLATE`]; the index it
//! substitutes is the only ordering information we get back, so the template
//! and the parser that reads the index out again live side by side here.

use crate::error::ListError;
use crate::ports::storage::StoragePort;
use regex::Regex;
use std::ffi::OsString;
use std::path::Path;
use std::sync::OnceLock;

/// printf-style template handed to the segmenter. Zero padding keeps
/// lexicographic and numeric order aligned up to 1000 segments; past that
/// only [`order`] is reliable.
pub const OUTPUT_TEMPLATE: &str = "chunk-%03d.mp4";

/// One file produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentArtifact {
    pub filename: String,
    pub sequence_index: u64,
}

fn index_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("static pattern"))
}

/// Name of the segment at `index`, as the segmenter renders [`OUTPUT_TEMPLATE`].
pub fn segment_filename(index: u64) -> String {
    format!("chunk-{:03}.mp4", index)
}

/// Extract the first run of digits in `filename` as its sequence index.
pub fn sequence_index(filename: &str) -> Result<u64, ListError> {
    index_pattern()
        .find(filename)
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
        .ok_or_else(|| ListError::UnindexedArtifact {
            filename: filename.to_owned(),
        })
}

/// Turn raw directory entries into artifacts sorted by ascending index.
///
/// Any entry without an index fails the whole listing.
pub fn order(names: Vec<OsString>) -> Result<Vec<SegmentArtifact>, ListError> {
    let mut artifacts = names
        .into_iter()
        .map(|name| -> Result<SegmentArtifact, ListError> {
            let filename = name
                .into_string()
                .map_err(|raw| ListError::InvalidName(raw.to_string_lossy().into_owned()))?;
            let sequence_index = sequence_index(&filename)?;
            Ok(SegmentArtifact {
                filename,
                sequence_index,
            })
        })
        .collect::<Result<Vec<_>, ListError>>()?;

    artifacts.sort_by_key(|artifact| artifact.sequence_index);

    let contiguous = artifacts
        .iter()
        .enumerate()
        .all(|(position, artifact)| artifact.sequence_index == position as u64);
    if !contiguous {
        tracing::warn!(
            count = artifacts.len(),
            "segment indices are not contiguous from zero"
        );
    }

    Ok(artifacts)
}

/// Enumerate `output_dir` and return its segments in playback order.
pub async fn list(
    storage: &impl StoragePort,
    output_dir: &Path,
) -> Result<Vec<SegmentArtifact>, ListError> {
    let names = storage
        .list_dir(output_dir)
        .await
        .map_err(|source| ListError::ReadDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

    order(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::local::fs::FsAdapter;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn filenames(artifacts: &[SegmentArtifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.filename.as_str()).collect()
    }

    #[test]
    fn test_order_is_numeric_not_enumeration_order() {
        let ordered = order(names(&["chunk-010.mp4", "chunk-002.mp4", "chunk-001.mp4"])).unwrap();
        assert_eq!(
            filenames(&ordered),
            vec!["chunk-001.mp4", "chunk-002.mp4", "chunk-010.mp4"]
        );
    }

    #[test]
    fn test_order_beyond_padding_width() {
        let ordered = order(names(&["chunk-1000.mp4", "chunk-999.mp4", "chunk-10.mp4", "chunk-9.mp4"])).unwrap();
        assert_eq!(
            filenames(&ordered),
            vec!["chunk-9.mp4", "chunk-10.mp4", "chunk-999.mp4", "chunk-1000.mp4"]
        );
        assert_eq!(ordered[3].sequence_index, 1000);
    }

    #[test]
    fn test_first_digit_run_wins() {
        assert_eq!(sequence_index("chunk-007-v2.mp4").unwrap(), 7);
        assert_eq!(sequence_index("42.mp4").unwrap(), 42);
    }

    #[test]
    fn test_unindexed_entry_fails_listing() {
        let err = order(names(&["chunk-000.mp4", "notes.txt"])).unwrap_err();
        assert!(matches!(err, ListError::UnindexedArtifact { ref filename } if filename == "notes.txt"));
    }

    #[test]
    fn test_segment_filename_matches_template() {
        assert_eq!(segment_filename(0), "chunk-000.mp4");
        assert_eq!(segment_filename(12), "chunk-012.mp4");
        assert_eq!(segment_filename(1234), "chunk-1234.mp4");
        assert_eq!(sequence_index(&segment_filename(57)).unwrap(), 57);
    }

    #[tokio::test]
    async fn test_list_reads_directory() {
        let temp = tempdir().unwrap();
        for index in [2u64, 0, 1] {
            std::fs::write(temp.path().join(segment_filename(index)), b"x").unwrap();
        }

        let artifacts = list(&FsAdapter::new(), temp.path()).await.unwrap();
        let indices: Vec<u64> = artifacts.iter().map(|a| a.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_read_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("gone");

        let err = list(&FsAdapter::new(), &missing).await.unwrap_err();
        assert!(matches!(err, ListError::ReadDir { ref path, .. } if path == &missing));
    }
}
