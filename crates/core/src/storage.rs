//! File store abstraction for media content.
//!
//! The database only records media metadata and a relative `path`; the bytes
//! live behind a [`FileStore`]. [`LocalFileStore`] keeps them under a root
//! directory on local disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::media::validate_relative_path;

/// Storage backend for media content, addressed by relative path.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `data` at `path`, replacing any existing content.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), CoreError>;

    /// Read the full content stored at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, CoreError>;

    /// Remove the content at `path`. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), CoreError>;
}

/// [`FileStore`] backed by a directory on local disk.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, CoreError> {
        validate_relative_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), CoreError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Internal(format!("create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&full, data)
            .await
            .map_err(|e| CoreError::Internal(format!("write {}: {e}", full.display())))
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, CoreError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CoreError::not_found("MediaFile", path)),
            Err(e) => Err(CoreError::Internal(format!("read {}: {e}", full.display()))),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), CoreError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!("delete {}: {e}", full.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        store.put("p1/notes.md", b"hello").await.unwrap();
        assert_eq!(store.get("p1/notes.md").await.unwrap(), b"hello");

        store.put("p1/notes.md", b"replaced").await.unwrap();
        assert_eq!(store.get("p1/notes.md").await.unwrap(), b"replaced");

        store.delete("p1/notes.md").await.unwrap();
        assert_matches!(
            store.get("p1/notes.md").await,
            Err(CoreError::NotFound { entity: "MediaFile", .. })
        );
    }

    #[tokio::test]
    async fn delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        assert!(store.delete("nothing/here.txt").await.is_ok());
    }

    #[tokio::test]
    async fn escaping_paths_are_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        assert_matches!(
            store.put("../outside.txt", b"x").await,
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(store.get("/etc/hosts").await, Err(CoreError::Forbidden(_)));
    }
}
