//! Scan session: the pipeline bound to a store
use crate::pipeline::{inspect, process_scan, Inspection, ScanContext, ScanOutcome, ScanVerdict};
use chrono::{DateTime, Utc};
use gs1_classify::{ProviderSelection, RuleSet};
use gs1_core::ScanRecord;
use gs1_registry::AiRegistry;
use gs1_store::{ExportTable, ScanStore, StoreError};

/// One operator's scanning session. Single writer.
pub struct ScanSession {
    store: ScanStore,
    registry: AiRegistry,
    rules: RuleSet,
    selection: ProviderSelection,
}

impl ScanSession {
    pub fn new(store: ScanStore, registry: AiRegistry, rules: RuleSet) -> Self {
        Self {
            store,
            registry,
            rules,
            selection: ProviderSelection::Auto,
        }
    }

    pub fn with_selection(mut self, selection: ProviderSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Switch between automatic and manual provider assignment
    pub fn set_selection(&mut self, selection: ProviderSelection) {
        tracing::info!(?selection, "provider selection changed");
        self.selection = selection;
    }

    pub fn selection(&self) -> &ProviderSelection {
        &self.selection
    }

    fn context(&self, now: DateTime<Utc>) -> ScanContext<'_> {
        ScanContext::new(now, &self.registry, &self.rules).with_selection(&self.selection)
    }

    /// Process one scan and store it when accepted
    pub fn handle(&mut self, raw: &str, now: DateTime<Utc>) -> Result<ScanOutcome, StoreError> {
        let outcome = process_scan(raw, &self.context(now), self.store.list());

        if let ScanVerdict::Accepted(record) = &outcome.verdict {
            self.store.append(record.clone())?;
        }
        Ok(outcome)
    }

    /// Decode and classify without touching the store
    pub fn inspect(&self, raw: &str, now: DateTime<Utc>) -> Inspection {
        inspect(raw, &self.context(now))
    }

    pub fn remove(&mut self, index: usize) -> Result<ScanRecord, StoreError> {
        self.store.remove(index)
    }

    pub fn records(&self) -> &[ScanRecord] {
        self.store.list()
    }

    pub fn export<S: AsRef<str>>(&self, columns: &[S]) -> ExportTable {
        ExportTable::build(self.store.list(), columns, &self.registry)
    }

    pub fn registry(&self) -> &AiRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn store(&self) -> &ScanStore {
        &self.store
    }
}
