use crate::error::StorageError;
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default)]
pub struct FsAdapter;

impl FsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoragePort for FsAdapter {
    async fn ensure_dir(&self, path: &Path) -> Result<(), StorageError> {
        // create_dir_all already succeeds on an existing directory and fails
        // when something else sits at `path`.
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| StorageError::new(path, e))
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
