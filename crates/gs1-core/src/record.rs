//! The persisted unit of the scan log.
use crate::fields::DecodedFieldSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One accepted scan. Never mutated after creation; removed by index only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Record ID (older logs without one get a fresh ID on load)
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Provider/category label assigned by the classifier
    pub provider: String,
    /// Every AI → value pair of the scan
    pub fields: DecodedFieldSet,
    /// Text exactly as delivered by the scan source
    pub raw: String,
    /// When the scan was taken
    pub scanned_at: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(
        provider: impl Into<String>,
        fields: DecodedFieldSet,
        raw: impl Into<String>,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider: provider.into(),
            fields,
            raw: raw.into(),
            scanned_at,
        }
    }

    pub fn gtin(&self) -> Option<&str> {
        self.fields.gtin()
    }

    pub fn lot(&self) -> Option<&str> {
        self.fields.lot()
    }

    pub fn serial(&self) -> Option<&str> {
        self.fields.serial()
    }
}
