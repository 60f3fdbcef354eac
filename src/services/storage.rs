use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct StoredFile {
    pub key: String,
    pub size: i64,
}

/// Storage backend for uploaded documents. Keys are opaque strings chosen by
/// the backend; callers persist them and never derive paths themselves.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Writes the bytes under a fresh unpredictable key and returns it.
    async fn write(&self, bytes: &[u8]) -> Result<StoredFile>;
    /// Removes a stored file. A missing file is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;
}

/// Local-disk storage. Files land in a flat directory under a random
/// uuid-based name; the original filename is never part of the key.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        // Keys are generated by `write`; anything with path separators did
        // not come from us.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(anyhow!("invalid storage key: {}", key));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn write(&self, bytes: &[u8]) -> Result<StoredFile> {
        let key = format!("{}.pdf", Uuid::new_v4());
        let path = self.resolve(&key)?;

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;

        Ok(StoredFile {
            key,
            size: bytes.len() as i64,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_generates_opaque_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        let stored = storage.write(b"%PDF-1.5 content").await.unwrap();
        assert!(stored.key.ends_with(".pdf"));
        assert_eq!(stored.size, 16);
        assert!(storage.exists(&stored.key).await.unwrap());

        let other = storage.write(b"%PDF-1.5 content").await.unwrap();
        assert_ne!(stored.key, other.key);
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        let stored = storage.write(b"%PDF-1.5").await.unwrap();
        storage.delete(&stored.key).await.unwrap();
        assert!(!storage.exists(&stored.key).await.unwrap());
        // Second delete of the same key is a no-op
        storage.delete(&stored.key).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        assert!(storage.delete("../outside.pdf").await.is_err());
        assert!(storage.exists("a/b.pdf").await.is_err());
    }
}
