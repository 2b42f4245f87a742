//! File-system collaborator
//!
//! Providers never touch `std::fs` directly; they go through [`FileSystem`]
//! so builds can run against an in-memory tree in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncRead;

pub type ReadStream = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    /// Open `path` for reading. Fails if the file is gone by the time it is
    /// opened, even if `exists` reported it earlier.
    async fn open_read(&self, path: &Path) -> io::Result<ReadStream>;
}

/// The real file system, backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn shared() -> Arc<dyn FileSystem> {
        Arc::new(Self)
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    async fn open_read(&self, path: &Path) -> io::Result<ReadStream> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }
}

/// A fixed set of files held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn into_shared(self) -> Arc<dyn FileSystem> {
        Arc::new(self)
    }
}

#[async_trait]
impl FileSystem for InMemoryFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    async fn open_read(&self, path: &Path) -> io::Result<ReadStream> {
        let contents = self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })?;
        Ok(Box::new(io::Cursor::new(contents)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let fs = InMemoryFileSystem::new().with_file("a.json", "{}");
        assert!(fs.exists(Path::new("a.json")).await);
        assert!(!fs.exists(Path::new("b.json")).await);

        let mut stream = fs.open_read(Path::new("a.json")).await.unwrap();
        let mut text = String::new();
        stream.read_to_string(&mut text).await.unwrap();
        assert_eq!(text, "{}");
    }

    #[tokio::test]
    async fn test_in_memory_open_missing_fails() {
        let fs = InMemoryFileSystem::new();
        let err = fs.open_read(Path::new("nope.json")).await.err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_local_file_system_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{\"a\":1}").unwrap();

        let fs = LocalFileSystem;
        assert!(fs.exists(&path).await);
        assert!(!fs.exists(dir.path()).await);
        assert!(!fs.exists(&dir.path().join("missing.json")).await);

        let mut stream = fs.open_read(&path).await.unwrap();
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).await.unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
    }
}
