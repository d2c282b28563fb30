//! GS1 Scan: pipeline, session and configuration
//!
//! ```text
//! ┌────────┐   ┌───────────┐   ┌──────────┐   ┌────────┐   ┌───────┐
//! │ decode │──→│ interpret │──→│ classify │──→│ dedupe │──→│ store │
//! └────────┘   └───────────┘   └──────────┘   └────────┘   └───────┘
//! ```
//!
//! [`process_scan`] is the pure core. [`ScanSession`] binds it to a
//! [`gs1_store::ScanStore`]; [`ScannerConfig`] builds sessions from YAML.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use gs1_classify::RuleSet;
//! use gs1_registry::AiRegistry;
//! use gs1_scan::{process_scan, ScanContext, ScanVerdict};
//!
//! let registry = AiRegistry::builtin();
//! let rules = RuleSet::default();
//! let ctx = ScanContext::new(Utc::now(), &registry, &rules);
//!
//! let outcome = process_scan("0107613034383979\u{1d}10ABC", &ctx, &[]);
//! assert!(matches!(outcome.verdict, ScanVerdict::Accepted(_)));
//! ```

pub mod config;
pub mod pipeline;
pub mod session;

pub use config::{ConfigError, ScannerConfig};
pub use pipeline::{inspect, process_scan, Inspection, ScanContext, ScanOutcome, ScanVerdict};
pub use session::ScanSession;
