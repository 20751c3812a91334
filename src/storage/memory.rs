//! In-memory snapshot storage.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::{SnapshotData, SnapshotStore};

/// Snapshot kept in process memory; lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<SnapshotData>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: SnapshotData) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryStorage {
    async fn save_snapshot(&self, snapshot: &SnapshotData) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<SnapshotData>> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slot.clone().filter(SnapshotData::is_intact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load_snapshot().await.unwrap().is_none());

        storage
            .save_snapshot(&SnapshotData::new("<dataroot/>", 1))
            .await
            .unwrap();
        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.document, "<dataroot/>");
    }
}
