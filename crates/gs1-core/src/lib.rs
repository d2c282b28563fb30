//! GS1 Core: shared data model for the scan pipeline
//!
//! Every other crate in the workspace speaks in these types:
//!
//! ```text
//! raw scan ──decode──> DecodedFieldSet ──classify/dedupe──> ScanRecord ──> store
//! ```

pub mod ai;
pub mod error;
pub mod fields;
pub mod record;

pub use error::{Gs1Error, Result};
pub use fields::DecodedFieldSet;
pub use record::ScanRecord;

/// The GS1 group separator (FNC1 as transmitted by scanners).
pub const FNC1: char = '\u{1d}';

/// Label assigned when no provider rule matches a scan.
pub const UNIDENTIFIED: &str = "Unidentified";
