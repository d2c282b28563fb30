//! Tabular export of the scan log
//!
//! One column per requested AI (raw values, headed by the registry
//! description), followed by the provider and the scan time.

use crate::store::StoreError;
use gs1_core::ScanRecord;
use gs1_registry::AiRegistry;
use std::io::Write;

/// GTIN, lot, expiry, serial, variant
pub const DEFAULT_COLUMNS: &[&str] = &["01", "10", "17", "21", "22"];

const PROVIDER_HEADER: &str = "Provider";
const SCANNED_AT_HEADER: &str = "Scanned at";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Build the table; AIs a record lacks export as empty cells
    pub fn build<S: AsRef<str>>(records: &[ScanRecord], columns: &[S], registry: &AiRegistry) -> Self {
        let mut headers: Vec<String> = columns
            .iter()
            .map(|code| registry.describe(code.as_ref()))
            .collect();
        headers.push(PROVIDER_HEADER.to_string());
        headers.push(SCANNED_AT_HEADER.to_string());

        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<String> = columns
                    .iter()
                    .map(|code| record.fields.get(code.as_ref()).unwrap_or_default().to_string())
                    .collect();
                row.push(record.provider.clone());
                row.push(record.scanned_at.to_rfc3339());
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), StoreError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.headers)?;
        for row in &self.rows {
            csv.write_record(row)?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gs1_core::DecodedFieldSet;

    fn records() -> Vec<ScanRecord> {
        let mut fields = DecodedFieldSet::new();
        fields.insert("01", "07613034383979");
        fields.insert("17", "231231");
        fields.insert("10", "1B12345");
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        vec![ScanRecord::new("SAI", fields, "raw", at)]
    }

    #[test]
    fn test_headers_use_registry_descriptions() {
        let table = ExportTable::build(&records(), DEFAULT_COLUMNS, AiRegistry::shared());
        assert_eq!(table.headers.first().map(String::as_str), Some("GTIN"));
        assert_eq!(table.headers.len(), DEFAULT_COLUMNS.len() + 2);
        assert_eq!(table.headers.last().map(String::as_str), Some("Scanned at"));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let table = ExportTable::build(&records(), DEFAULT_COLUMNS, AiRegistry::shared());
        assert_eq!(
            table.rows[0],
            vec![
                "07613034383979",
                "1B12345",
                "231231",
                "",
                "",
                "SAI",
                "2024-05-02T09:30:00+00:00"
            ]
        );
    }

    #[test]
    fn test_write_csv() {
        let table = ExportTable::build(&records(), &["01", "9999"], AiRegistry::shared());
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("GTIN,Unknown,Provider,Scanned at"));
        assert_eq!(lines.next(), Some("07613034383979,,SAI,2024-05-02T09:30:00+00:00"));
        assert_eq!(lines.next(), None);
    }
}
