//! File system operations abstraction for blob storage
//!
//! Uploaded content goes through this trait so the lifecycle service can be
//! exercised against a mocked file system in tests.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docsign::fs::{FileSystemOperations, StandardFileSystem};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fs_ops: Arc<dyn FileSystemOperations> = Arc::new(StandardFileSystem);
//!
//!     fs_ops.create_dir_all("storage").await?;
//!     fs_ops.write("storage/blob.tmp", b"%PDF-1.7").await?;
//!     fs_ops.rename("storage/blob.tmp", "storage/blob.pdf").await?;
//!
//!     if fs_ops.exists("storage/blob.pdf") {
//!         println!("Blob stored");
//!     }
//!
//!     Ok(())
//! }
//! ```
use anyhow::Result;
use std::path::Path;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Trait for file system operations that can be mocked in tests
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait::async_trait]
pub trait FileSystemOperations: Send + Sync {
    /// Create a directory and all its parent directories
    async fn create_dir_all(&self, path: &str) -> Result<()>;

    /// Write data to a file, creating or truncating it
    async fn write(&self, path: &str, contents: &[u8]) -> Result<()>;

    /// Rename `from` to `to`, replacing `to` if it exists
    async fn rename(&self, from: &str, to: &str) -> Result<()>;

    /// Remove a file
    async fn remove_file(&self, path: &str) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &str) -> bool;
}

/// Production implementation backed by `tokio::fs`
pub struct StandardFileSystem;

#[async_trait::async_trait]
impl FileSystemOperations for StandardFileSystem {
    async fn create_dir_all(&self, path: &str) -> Result<()> {
        tokio::fs::create_dir_all(path).await.map_err(Into::into)
    }

    async fn write(&self, path: &str, contents: &[u8]) -> Result<()> {
        tokio::fs::write(path, contents).await.map_err(Into::into)
    }

    async fn rename(&self, from: &str, to: &str) -> Result<()> {
        tokio::fs::rename(from, to).await.map_err(Into::into)
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        tokio::fs::remove_file(path).await.map_err(Into::into)
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }
}
