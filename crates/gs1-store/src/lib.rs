//! GS1 Store: the local scan log
//!
//! ```text
//! ScanRecord → find_duplicate → ScanStore::try_append → RecordBackend::save
//!                                        │
//!                                        └──→ ExportTable (CSV)
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use gs1_core::{DecodedFieldSet, ScanRecord};
//! use gs1_store::{AppendOutcome, MemoryBackend, ScanStore};
//!
//! let mut store = ScanStore::open(MemoryBackend::default()).unwrap();
//!
//! let mut fields = DecodedFieldSet::new();
//! fields.insert("01", "07613034383979");
//! fields.insert("10", "L1");
//!
//! let record = ScanRecord::new("SAI", fields, "010761303438397910L1", Utc::now());
//! assert_eq!(store.try_append(record.clone()).unwrap(), AppendOutcome::Appended(0));
//! assert_eq!(store.try_append(record).unwrap(), AppendOutcome::Duplicate(0));
//! ```

pub mod backend;
pub mod dedupe;
pub mod export;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, RecordBackend};
pub use dedupe::{find_duplicate, is_duplicate};
pub use export::{ExportTable, DEFAULT_COLUMNS};
pub use store::{AppendOutcome, ScanStore, StoreError};
