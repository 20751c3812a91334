// src/pipeline/load.rs

//! Bulk load: fetch fragments, merge, extract, with snapshot fallback.
//!
//! A successful fetch and extraction saves the merged document as the new
//! snapshot. Any failure falls back to the snapshot; without one the attempt
//! ends in a load (or parse) error and nothing is retried.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{AppError, Result};
use crate::services::{Extraction, LoadSource, RecordExtractor};
use crate::storage::{SnapshotData, SnapshotStore};
use crate::utils::markup::merge_fragments;

/// Where the loaded records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Source,
    Snapshot,
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub extraction: Extraction,
    pub origin: LoadOrigin,
    pub fragment_count: usize,
}

/// Settings for one load attempt.
pub struct LoadPlan<'a> {
    pub source: &'a dyn LoadSource,
    pub snapshot: Option<&'a dyn SnapshotStore>,
    pub extractor: &'a RecordExtractor,
    pub root_tag: &'a str,
    pub max_concurrent: usize,
}

/// Fetch every fragment named by the manifest and merge them in order.
pub async fn fetch_document(
    source: &dyn LoadSource,
    root_tag: &str,
    max_concurrent: usize,
) -> Result<(String, usize)> {
    let names = source.list_fragment_names().await?;
    log::info!("Manifest lists {} fragments", names.len());

    let fragments: Vec<String> = stream::iter(names)
        .map(|name| async move {
            source
                .fetch_fragment(&name)
                .await
                .map_err(|e| AppError::load(format!("fragment {name}: {e}")))
        })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    let count = fragments.len();
    Ok((merge_fragments(&fragments, root_tag), count))
}

/// Run one load attempt.
pub async fn load_records(plan: &LoadPlan<'_>) -> Result<LoadOutcome> {
    let failure = match fetch_document(plan.source, plan.root_tag, plan.max_concurrent).await {
        Ok((document, fragment_count)) => match plan.extractor.extract(&document) {
            Ok(extraction) => {
                if let Some(store) = plan.snapshot {
                    let snapshot = SnapshotData::new(document, fragment_count);
                    if let Err(e) = store.save_snapshot(&snapshot).await {
                        log::warn!("Snapshot save failed: {}", e);
                    }
                }
                log::info!(
                    "Loaded {} records from {} fragments",
                    extraction.records.len(),
                    fragment_count
                );
                return Ok(LoadOutcome {
                    extraction,
                    origin: LoadOrigin::Source,
                    fragment_count,
                });
            }
            Err(e) => e,
        },
        Err(e) => normalize(e),
    };

    log::warn!("Load from source failed: {}", failure);
    load_from_snapshot(plan, failure).await
}

async fn load_from_snapshot(plan: &LoadPlan<'_>, failure: AppError) -> Result<LoadOutcome> {
    let Some(store) = plan.snapshot else {
        return Err(failure);
    };

    let snapshot = match store.load_snapshot().await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return Err(failure),
        Err(e) => {
            log::warn!("Snapshot read failed: {}", e);
            return Err(failure);
        }
    };

    log::info!("Falling back to snapshot saved at {}", snapshot.saved_at);
    let extraction = plan.extractor.extract(&snapshot.document)?;
    Ok(LoadOutcome {
        extraction,
        origin: LoadOrigin::Snapshot,
        fragment_count: snapshot.fragment_count,
    })
}

/// Fold transport-level errors into `Load`.
fn normalize(error: AppError) -> AppError {
    match error {
        AppError::Load(_) | AppError::Parse(_) => error,
        other if other.is_load_failure() => AppError::load(other),
        other => other,
    }
}
