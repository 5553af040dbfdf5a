use async_trait::async_trait;
use std::io;
use std::path::Path;

/// File access used by the sync pipeline. Paths are already resolved against
/// the sandbox root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read `path` as text. Invalid UTF-8 sequences become U+FFFD.
    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` and write `content`. Parent directories are
    /// not created.
    async fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn read(&self, path: &Path) -> io::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        tokio::fs::write(path, content).await
    }
}
