//! Append-only scan log
//!
//! Records are added at the end and removed by position. Every mutation
//! writes the full list through the backend; when the write fails the
//! in-memory list is rolled back so memory and disk never diverge.

use crate::backend::RecordBackend;
use crate::dedupe::find_duplicate;
use gs1_core::{Gs1Error, ScanRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not a valid record list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("no record at index {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<StoreError> for Gs1Error {
    fn from(err: StoreError) -> Self {
        Gs1Error::StoreError(err.to_string())
    }
}

/// What `try_append` did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "index", rename_all = "snake_case")]
pub enum AppendOutcome {
    /// Stored at this index
    Appended(usize),
    /// Rejected; duplicates the record at this index
    Duplicate(usize),
}

/// The scan log with its persistence backend
pub struct ScanStore {
    records: Vec<ScanRecord>,
    backend: Box<dyn RecordBackend>,
}

impl ScanStore {
    /// Load the initial list from `backend`
    pub fn open(backend: impl RecordBackend + 'static) -> Result<Self, StoreError> {
        let records = backend.load()?;
        tracing::info!(
            backend = %backend.describe(),
            records = records.len(),
            "opened scan store"
        );
        Ok(Self {
            records,
            backend: Box::new(backend),
        })
    }

    /// Append without a duplicate check; returns the new index
    pub fn append(&mut self, record: ScanRecord) -> Result<usize, StoreError> {
        let index = self.records.len();
        let id = record.id;
        self.records.push(record);

        if let Err(e) = self.backend.save(&self.records) {
            self.records.pop();
            return Err(e);
        }

        tracing::info!(index, %id, "record appended");
        Ok(index)
    }

    /// Append unless the record duplicates one already stored
    pub fn try_append(&mut self, record: ScanRecord) -> Result<AppendOutcome, StoreError> {
        if let Some(index) = find_duplicate(&record, &self.records) {
            tracing::info!(index, "duplicate scan rejected");
            return Ok(AppendOutcome::Duplicate(index));
        }
        self.append(record).map(AppendOutcome::Appended)
    }

    /// Remove and return the record at `index`
    pub fn remove(&mut self, index: usize) -> Result<ScanRecord, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let removed = self.records.remove(index);
        if let Err(e) = self.backend.save(&self.records) {
            self.records.insert(index, removed);
            return Err(e);
        }

        tracing::info!(index, id = %removed.id, "record removed");
        Ok(removed)
    }

    pub fn list(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ScanRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
