//! GS1 Registry: Application Identifier table
//!
//! Holds the length class, length and description of every known AI, and
//! the decimal-indicator families (`310n`, `392n`, ...) whose last digit
//! carries the number of decimal places. The decoder and the interpreter
//! both read this table; nothing else hard-codes AI patterns.
//!
//! # Example
//!
//! ```
//! use gs1_registry::{AiRegistry, LengthClass};
//!
//! let registry = AiRegistry::builtin();
//!
//! let gtin = registry.lookup("01").unwrap();
//! assert_eq!(gtin.length_class, LengthClass::Fixed);
//! assert_eq!(gtin.length, 14);
//!
//! // Family codes resolve by prefix
//! assert_eq!(registry.decimal_places("3102"), Some(2));
//! assert!(registry.is_known("310"));
//! ```

pub mod builtin;
pub mod definition;
pub mod registry;

pub use definition::{AiDefinition, AiFamily, DataFormat, FamilyKind, LengthClass};
pub use registry::{AiRegistry, RegistryError, RegistryFile};

/// Description returned for codes the registry does not know.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// True when `code` is 2-4 ASCII digits.
pub fn is_ai_shaped(code: &str) -> bool {
    (2..=4).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}
