//! Scan pipeline
//!
//! ```text
//! raw ──→ decode ──→ interpret ──→ classify ──→ find_duplicate ──→ ScanVerdict
//! ```
//!
//! Everything the pipeline depends on arrives through [`ScanContext`]; the
//! functions here read no clocks, files or globals.

use chrono::{DateTime, Utc};
use gs1_classify::{classify_with, Classification, ProviderSelection, RuleSet};
use gs1_core::ScanRecord;
use gs1_decode::{decode, interpret, Decoded, Interpretation};
use gs1_registry::AiRegistry;
use gs1_store::find_duplicate;
use serde::Serialize;

/// Inputs shared by every step of one scan
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub now: DateTime<Utc>,
    pub registry: &'a AiRegistry,
    pub rules: &'a RuleSet,
    pub selection: &'a ProviderSelection,
}

impl<'a> ScanContext<'a> {
    /// Context in automatic classification mode
    pub fn new(now: DateTime<Utc>, registry: &'a AiRegistry, rules: &'a RuleSet) -> Self {
        static AUTO: ProviderSelection = ProviderSelection::Auto;
        Self {
            now,
            registry,
            rules,
            selection: &AUTO,
        }
    }

    pub fn with_selection(mut self, selection: &'a ProviderSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Decode, interpretation and classification of one scan, without storage
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub decoded: Decoded,
    pub interpretation: Interpretation,
    pub classification: Classification,
}

/// What should happen to a scan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ScanVerdict {
    /// New item; ready to store
    Accepted(ScanRecord),
    /// Same item as the stored record at `index`
    Duplicate { index: usize },
    /// Nothing readable in the scan
    Empty,
}

impl ScanVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Full result of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub decoded: Decoded,
    pub interpretation: Interpretation,
    pub classification: Classification,
    pub verdict: ScanVerdict,
}

/// Decode, interpret and classify `raw`
pub fn inspect(raw: &str, ctx: &ScanContext) -> Inspection {
    let decoded = decode(raw, ctx.registry);
    let interpretation = interpret(&decoded.fields, ctx.registry, ctx.now);

    let classification = if decoded.fields.is_empty() {
        Classification::unidentified()
    } else {
        classify_with(ctx.selection, &decoded.fields, raw, ctx.rules)
    };

    Inspection {
        decoded,
        interpretation,
        classification,
    }
}

/// Run the whole pipeline for one scan against the `existing` records
pub fn process_scan(raw: &str, ctx: &ScanContext, existing: &[ScanRecord]) -> ScanOutcome {
    let Inspection {
        decoded,
        interpretation,
        classification,
    } = inspect(raw, ctx);

    let verdict = if decoded.fields.is_empty() {
        ScanVerdict::Empty
    } else {
        let record = ScanRecord::new(
            classification.label(),
            decoded.fields.clone(),
            raw,
            ctx.now,
        );
        match find_duplicate(&record, existing) {
            Some(index) => ScanVerdict::Duplicate { index },
            None => ScanVerdict::Accepted(record),
        }
    };

    tracing::debug!(
        provider = %classification,
        fields = decoded.fields.len(),
        warnings = decoded.warnings.len(),
        "scan processed"
    );

    ScanOutcome {
        decoded,
        interpretation,
        classification,
        verdict,
    }
}
