//! Persistence backends for the scan log
//!
//! A backend loads and saves the whole record list at once. The store never
//! writes partial updates.

use crate::store::StoreError;
use gs1_core::ScanRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Whole-list persistence
pub trait RecordBackend {
    /// Load the persisted list; an absent store is an empty list
    fn load(&self) -> Result<Vec<ScanRecord>, StoreError>;

    /// Replace the persisted list with `records`
    fn save(&mut self, records: &[ScanRecord]) -> Result<(), StoreError>;

    /// Short label for log messages
    fn describe(&self) -> String;
}

// ============================================================================
// JSON file
// ============================================================================

/// Pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<ScanRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, records: &[ScanRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        // Write beside the target, then rename over it
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Ephemeral backend; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<ScanRecord>>>,
}

impl MemoryBackend {
    pub fn with_records(records: Vec<ScanRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Copy of the last saved list
    pub fn snapshot(&self) -> Vec<ScanRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl RecordBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<ScanRecord>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, records: &[ScanRecord]) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gs1_core::DecodedFieldSet;

    #[test]
    fn test_memory_clones_share_storage() {
        let backend = MemoryBackend::default();
        let mut writer = backend.clone();

        let record = ScanRecord::new("X", DecodedFieldSet::plain_text("hello"), "hello", Utc::now());
        writer.save(&[record.clone()]).unwrap();

        assert_eq!(backend.load().unwrap(), vec![record]);
    }

    #[test]
    fn test_json_describe_is_path() {
        let backend = JsonFileBackend::new("data/scans.json");
        assert_eq!(backend.describe(), "data/scans.json");
    }
}
