//! Local filesystem snapshot storage.
//!
//! Writes go to a temporary file first and are renamed into place, so an
//! interrupted save never leaves a half-written snapshot behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{SnapshotData, SnapshotStore};

/// Snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn save_snapshot(&self, snapshot: &SnapshotData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        self.write_bytes(&bytes).await?;
        log::info!(
            "Snapshot saved to {} ({} fragments)",
            self.path.display(),
            snapshot.fragment_count
        );
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<SnapshotData>> {
        let Some(bytes) = self.read_bytes().await? else {
            log::warn!("No snapshot found at {}", self.path.display());
            return Ok(None);
        };

        let snapshot: SnapshotData = match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Snapshot at {} is unreadable: {}", self.path.display(), e);
                return Ok(None);
            }
        };

        if !snapshot.is_intact() {
            log::warn!("Snapshot at {} failed digest check", self.path.display());
            return Ok(None);
        }
        Ok(Some(snapshot))
    }
}
