//! Persistence across sessions with the JSON file backend

use chrono::{TimeZone, Utc};
use gs1_core::{DecodedFieldSet, ScanRecord};
use gs1_store::{AppendOutcome, JsonFileBackend, RecordBackend, ScanStore, StoreError};
use tempfile::TempDir;

fn record(lot: &str, serial: Option<&str>) -> ScanRecord {
    let mut fields = DecodedFieldSet::new();
    fields.insert("01", "07613034383979");
    fields.insert("10", lot);
    if let Some(serial) = serial {
        fields.insert("21", serial);
    }
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
    ScanRecord::new("BIOPROTECE", fields, "raw", at)
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = ScanStore::open(JsonFileBackend::new(dir.path().join("scans.json"))).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("scans.json");

    let first = record("L1", Some("S1"));
    {
        let mut store = ScanStore::open(JsonFileBackend::new(&path)).unwrap();
        store.append(first.clone()).unwrap();
        store.append(record("L2", None)).unwrap();
    }

    let store = ScanStore::open(JsonFileBackend::new(&path)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0], first);
    assert_eq!(store.list()[1].lot(), Some("L2"));
}

#[test]
fn test_duplicate_detected_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scans.json");

    ScanStore::open(JsonFileBackend::new(&path))
        .unwrap()
        .append(record("L1", Some("S1")))
        .unwrap();

    let mut store = ScanStore::open(JsonFileBackend::new(&path)).unwrap();
    assert_eq!(
        store.try_append(record("L1", None)).unwrap(),
        AppendOutcome::Duplicate(0)
    );
    assert_eq!(
        store.try_append(record("L1", Some("S2"))).unwrap(),
        AppendOutcome::Appended(1)
    );
}

#[test]
fn test_remove_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scans.json");

    let mut store = ScanStore::open(JsonFileBackend::new(&path)).unwrap();
    store.append(record("L1", None)).unwrap();
    store.append(record("L2", None)).unwrap();
    store.remove(0).unwrap();

    let reloaded = JsonFileBackend::new(&path).load().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].lot(), Some("L2"));
}

#[test]
fn test_file_is_pretty_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scans.json");

    let mut store = ScanStore::open(JsonFileBackend::new(&path)).unwrap();
    store.append(record("L1", None)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["fields"]["10"], "L1");
    assert_eq!(value[0]["provider"], "BIOPROTECE");
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scans.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = ScanStore::open(JsonFileBackend::new(&path));
    assert!(matches!(result, Err(StoreError::Json(_))));
}
