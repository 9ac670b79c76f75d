use crate::error::StorageError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Make sure `path` exists as a directory, creating parents as needed.
    async fn ensure_dir(&self, path: &Path) -> Result<(), StorageError>;

    /// Names of the entries directly inside `path`, in no particular order.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Delete a single file.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;
}
