//! Shared-read compliance record store.
//!
//! The record set is loaded once at startup and read concurrently without
//! coordination: readers take a cheap `Arc` snapshot, and the explicit
//! `reload` operation swaps the snapshot atomically. A failed load leaves
//! the store empty and the service running in a degraded state; it never
//! terminates the process.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use comply_core::{AppError, AppResult};

use crate::types::ComplianceRecord;

/// Immutable-by-convention record store with snapshot reads.
pub struct ComplianceStore {
    records: RwLock<Arc<Vec<ComplianceRecord>>>,
}

impl ComplianceStore {
    /// Create a store over an explicit record set.
    pub fn new(records: Vec<ComplianceRecord>) -> Self {
        Self {
            records: RwLock::new(Arc::new(records)),
        }
    }

    /// Create an empty store (degraded mode).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load the store from a JSON dataset file.
    ///
    /// A missing or malformed file logs an error and yields an empty store;
    /// the health surface reports the degraded state.
    pub fn load(path: &Path) -> Self {
        match read_records(path) {
            Ok(records) => {
                tracing::info!(
                    path = %path.display(),
                    count = records.len(),
                    "loaded compliance records"
                );
                Self::new(records)
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "failed to load compliance data; continuing with empty dataset"
                );
                Self::empty()
            }
        }
    }

    /// Replace the record set from the dataset file.
    ///
    /// On failure the previous records are kept and the error is returned;
    /// on success the new snapshot is swapped in and its size returned.
    pub fn reload(&self, path: &Path) -> AppResult<usize> {
        let records = read_records(path)?;
        let count = records.len();

        let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(records);

        tracing::info!(path = %path.display(), count, "reloaded compliance records");
        Ok(count)
    }

    /// Take a snapshot of the current record set.
    pub fn snapshot(&self) -> Arc<Vec<ComplianceRecord>> {
        Arc::clone(&self.records.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Number of records currently loaded.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the dataset loaded successfully at startup.
    pub fn is_loaded(&self) -> bool {
        !self.is_empty()
    }

    /// Distinct record categories, for status reporting.
    pub fn categories(&self) -> Vec<String> {
        let snapshot = self.snapshot();
        let set: BTreeSet<String> = snapshot
            .iter()
            .map(|record| {
                if record.category.is_empty() {
                    "Unknown".to_string()
                } else {
                    record.category.clone()
                }
            })
            .collect();
        set.into_iter().collect()
    }
}

/// Read and parse the dataset file.
fn read_records(path: &Path) -> AppResult<Vec<ComplianceRecord>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Dataset(format!("Failed to read dataset {:?}: {}", path, e))
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| AppError::Dataset(format!("Failed to parse dataset {:?}: {}", path, e)))
}
