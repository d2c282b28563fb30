//! Duplicate detection
//!
//! Two records are the same physical item when their GTINs match and every
//! identifier present in BOTH records agrees. An identifier missing from
//! either side is not evidence of a different item.

use gs1_core::ScanRecord;

/// True when `candidate` describes the same item as `existing`
pub fn is_duplicate(candidate: &ScanRecord, existing: &ScanRecord) -> bool {
    let (Some(a), Some(b)) = (candidate.gtin(), existing.gtin()) else {
        return false;
    };
    if a != b {
        return false;
    }

    agrees(candidate.lot(), existing.lot()) && agrees(candidate.serial(), existing.serial())
}

/// Index of the first stored record that `candidate` duplicates
pub fn find_duplicate(candidate: &ScanRecord, records: &[ScanRecord]) -> Option<usize> {
    records.iter().position(|existing| is_duplicate(candidate, existing))
}

fn agrees(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
