use std::path::{Path, PathBuf};

use super::StorageResult;

/// Storage trait for the stage's file operations
pub trait Storage {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> StorageResult<bool>;

    /// Read file contents
    fn read(&self, path: &Path) -> StorageResult<Vec<u8>>;

    /// Write file contents, creating parent directories as needed
    fn write(&self, path: &Path, content: &[u8]) -> StorageResult<()>;

    /// Create directory and any missing parents; succeeds if it already exists
    fn create_dir(&self, path: &Path) -> StorageResult<()>;

    /// Location `path` refers to once resolved against this storage
    fn resolve(&self, path: &Path) -> PathBuf;
}
