//! Storage writer for generated files
//!
//! Every write is a whole-file overwrite, so re-running a generation is always
//! safe. Parent directories are created as needed.

use async_trait::async_trait;
use classgen_core::{GenError, GenResult};
use std::path::Path;

/// Destination of rendered files
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Overwrite `path` with `contents`, creating parent directories
    async fn write(&self, path: &Path, contents: &str) -> GenResult<()>;

    /// Create an empty file unless one exists; returns whether it was created
    async fn ensure_exists(&self, path: &Path) -> GenResult<bool>;
}

/// Writes to the local filesystem through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    async fn create_parent(path: &Path) -> GenResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| GenError::io(parent, e))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn write(&self, path: &Path, contents: &str) -> GenResult<()> {
        Self::create_parent(path).await?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| GenError::io(path, e))?;
        tracing::trace!("Wrote {}", path.display());
        Ok(())
    }

    async fn ensure_exists(&self, path: &Path) -> GenResult<bool> {
        Self::create_parent(path).await?;

        let created = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;

        match created {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(GenError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[tokio::test]
    async fn FsStorage___write___creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/C.autogen.js");

        FsStorage.write(&path, "content").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[tokio::test]
    async fn FsStorage___write___overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.js");
        std::fs::write(&path, "a much longer previous content").unwrap();

        FsStorage.write(&path, "short").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[tokio::test]
    async fn FsStorage___ensure_exists___never_clobbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkg/__init__.py");

        assert!(FsStorage.ensure_exists(&path).await.unwrap());
        std::fs::write(&path, "# hand-written").unwrap();
        assert!(!FsStorage.ensure_exists(&path).await.unwrap());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hand-written");
    }
}
