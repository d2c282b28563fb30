//! GS1 Classify: provider identification for decoded scans
//!
//! # Example
//!
//! ```
//! use gs1_classify::{classify, ProviderRule, RuleSet};
//! use gs1_core::DecodedFieldSet;
//!
//! let rules = RuleSet::new(vec![
//!     ProviderRule::new("SAI").with_gtin_prefix("8422222"),
//! ]).unwrap();
//!
//! let mut fields = DecodedFieldSet::new();
//! fields.insert("01", "84222220000017");
//!
//! let result = classify(&fields, "0184222220000017", &rules);
//! assert_eq!(result.to_string(), "SAI (by GTIN)");
//! ```

pub mod classifier;
pub mod rule;

pub use classifier::{classify, classify_with, Classification, MatchBasis, ProviderSelection};
pub use rule::{ProviderRule, ProviderRuleSpec, RuleSet, RuleSetError};
