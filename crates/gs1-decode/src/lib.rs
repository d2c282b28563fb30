//! GS1-DECODE: scan text to Application Identifier fields
//!
//! This crate turns the text delivered by a barcode/QR scanning library
//! into an ordered AI → value mapping and derives display values from it.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use gs1_decode::{decode, interpret};
//! use gs1_registry::AiRegistry;
//!
//! let registry = AiRegistry::builtin();
//! let decoded = decode("0107613034383979\u{1d}17231231\u{1d}10B12345", &registry);
//! assert_eq!(decoded.fields.lot(), Some("B12345"));
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let view = interpret(&decoded.fields, &registry, now);
//! assert_eq!(view.get("17").unwrap().display, "31/12/2023 (EXPIRED)");
//! ```

pub mod decoder;
pub mod interpreter;
pub mod normalizer;

pub use decoder::{decode, DecodeWarning, Decoded};
pub use interpreter::{
    interpret, parse_gs1_date, scale_decimal, InterpretedField, Interpretation, EXPIRED_MARKER,
    INVALID_DATE_MARKER,
};
pub use normalizer::{normalize, Normalized};
