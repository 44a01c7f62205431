use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::{Storage, StorageError, StorageResult};

/// Local filesystem storage implementation
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Storage rooted at the process working directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Get full path by joining base path with relative path.
    /// Absolute paths are used as given.
    fn full_path(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> StorageResult<bool> {
        let full_path = self.full_path(path);
        fs::exists(&full_path).map_err(|e| StorageError::io(&full_path, e))
    }

    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path);
        let mut file = fs::File::open(&full_path).map_err(|e| StorageError::io(&full_path, e))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| StorageError::io(&full_path, e))?;
        Ok(content)
    }

    fn write(&self, path: &Path, content: &[u8]) -> StorageResult<()> {
        let full_path = self.full_path(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let mut file = fs::File::create(&full_path).map_err(|e| StorageError::io(&full_path, e))?;
        file.write_all(content)
            .map_err(|e| StorageError::io(&full_path, e))?;
        file.sync_all().map_err(|e| StorageError::io(&full_path, e))?;
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> StorageResult<()> {
        let full_path = self.full_path(path);
        fs::create_dir_all(&full_path).map_err(|e| StorageError::io(&full_path, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.full_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("report/nested/scores.json");

        assert!(!storage.exists(path).unwrap());
        storage.write(path, b"{}").unwrap();
        assert!(storage.exists(path).unwrap());
        assert_eq!(storage.read(path).unwrap(), b"{}");
        assert!(storage.resolve(path).is_file());
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("params.json");
        storage.write(path, b"first, longer content").unwrap();
        storage.write(path, b"second").unwrap();
        assert_eq!(storage.read(path).unwrap(), b"second");
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("saved_models/a/b");
        storage.create_dir(path).unwrap();
        storage.create_dir(path).unwrap();
        assert!(storage.exists(path).unwrap());
        assert!(storage.resolve(path).is_dir());
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new("/nonexistent-base");
        let path = dir.path().join("model.joblib");
        storage.write(&path, b"bytes").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn test_resolve_joins_relative_paths_only() {
        let storage = LocalStorage::new("/srv/stage");
        assert_eq!(
            storage.resolve(Path::new("saved_models/model.joblib")),
            PathBuf::from("/srv/stage/saved_models/model.joblib")
        );
        assert_eq!(
            storage.resolve(Path::new("/data/train.csv")),
            PathBuf::from("/data/train.csv")
        );
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.read(Path::new("missing.json")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_dir_over_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.write(Path::new("saved_models"), b"not a dir").unwrap();
        assert!(matches!(
            storage.create_dir(Path::new("saved_models")),
            Err(StorageError::Io { .. })
        ));
    }
}
