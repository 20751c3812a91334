//! Best-effort snapshot of the last successfully loaded document.
//!
//! After a successful load the merged document is saved; when a later load
//! fails, the snapshot is the fallback. Any key-value backend will do:
//!
//! ```text
//! storage/
//! └── snapshot.json         # { saved_at, digest, fragment_count, document }
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Stored snapshot with integrity digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
    /// Hex SHA-256 of `document`
    pub digest: String,
    /// Number of fragments merged into `document`
    pub fragment_count: usize,
    /// The merged document text
    pub document: String,
}

impl SnapshotData {
    pub fn new(document: impl Into<String>, fragment_count: usize) -> Self {
        let document = document.into();
        Self {
            saved_at: Utc::now(),
            digest: digest(&document),
            fragment_count,
            document,
        }
    }

    /// Whether the stored digest still matches the document.
    pub fn is_intact(&self) -> bool {
        self.digest == digest(&self.document)
    }
}

/// Hex SHA-256 digest of a text.
pub fn digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Key-value contract for the offline fallback.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Save the merged document of a successful load.
    async fn save_snapshot(&self, snapshot: &SnapshotData) -> Result<()>;

    /// Load the last snapshot; `None` when absent or corrupted.
    async fn load_snapshot(&self) -> Result<Option<SnapshotData>>;
}
