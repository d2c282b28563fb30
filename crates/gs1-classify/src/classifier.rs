//! Provider classification
//!
//! Tiers are evaluated strictly in order and the first rule that matches
//! inside a tier wins:
//!
//! ```text
//! diagnostic AI → GTIN prefix → lot pattern → serial pattern → free text → Unidentified
//! ```
//!
//! Structured fields always outrank text found anywhere in the raw scan.

use crate::rule::RuleSet;
use gs1_core::{DecodedFieldSet, UNIDENTIFIED};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which signal decided the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum MatchBasis {
    DiagnosticAi { ai: String },
    GtinPrefix,
    LotPattern,
    SerialPattern,
    FreeText,
    /// Chosen by the operator, not inferred
    Manual,
    Unidentified,
}

impl fmt::Display for MatchBasis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DiagnosticAi { ai } => write!(f, "by AI {}", ai),
            Self::GtinPrefix => write!(f, "by GTIN"),
            Self::LotPattern => write!(f, "by lot"),
            Self::SerialPattern => write!(f, "by serial"),
            Self::FreeText => write!(f, "by text"),
            Self::Manual => write!(f, "manual"),
            Self::Unidentified => write!(f, "no match"),
        }
    }
}

/// Result of classifying one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub provider: Option<String>,
    pub basis: MatchBasis,
}

impl Classification {
    fn matched(provider: &str, basis: MatchBasis) -> Self {
        Self {
            provider: Some(provider.to_string()),
            basis,
        }
    }

    pub fn unidentified() -> Self {
        Self {
            provider: None,
            basis: MatchBasis::Unidentified,
        }
    }

    /// Provider label, or the "Unidentified" sentinel
    pub fn label(&self) -> &str {
        self.provider.as_deref().unwrap_or(UNIDENTIFIED)
    }

    pub fn is_identified(&self) -> bool {
        self.provider.is_some()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.provider {
            Some(provider) => write!(f, "{} ({})", provider, self.basis),
            None => write!(f, "{}", UNIDENTIFIED),
        }
    }
}

/// Automatic classification or an operator-chosen provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSelection {
    #[default]
    Auto,
    Manual(String),
}

impl ProviderSelection {
    /// `None` or an empty name means automatic mode
    pub fn from_option(provider: Option<String>) -> Self {
        match provider {
            Some(name) if !name.trim().is_empty() => Self::Manual(name),
            _ => Self::Auto,
        }
    }
}

/// Classify a decoded scan against `rules`
pub fn classify(fields: &DecodedFieldSet, raw: &str, rules: &RuleSet) -> Classification {
    for rule in rules.iter() {
        if let Some(ai) = rule.diagnostic_match(fields) {
            return Classification::matched(&rule.name, MatchBasis::DiagnosticAi { ai: ai.to_string() });
        }
    }

    if let Some(gtin) = fields.gtin() {
        if let Some(rule) = rules.iter().find(|r| r.matches_gtin(gtin)) {
            return Classification::matched(&rule.name, MatchBasis::GtinPrefix);
        }
    }

    if let Some(lot) = fields.lot() {
        if let Some(rule) = rules.iter().find(|r| r.matches_lot(lot)) {
            return Classification::matched(&rule.name, MatchBasis::LotPattern);
        }
    }

    if let Some(serial) = fields.serial() {
        if let Some(rule) = rules.iter().find(|r| r.matches_serial(serial)) {
            return Classification::matched(&rule.name, MatchBasis::SerialPattern);
        }
    }

    if let Some(rule) = rules.iter().find(|r| r.matches_text(raw)) {
        return Classification::matched(&rule.name, MatchBasis::FreeText);
    }

    tracing::debug!("no provider rule matched");
    Classification::unidentified()
}

/// Classify honoring a manual provider override
pub fn classify_with(
    selection: &ProviderSelection,
    fields: &DecodedFieldSet,
    raw: &str,
    rules: &RuleSet,
) -> Classification {
    match selection {
        ProviderSelection::Manual(name) => Classification::matched(name, MatchBasis::Manual),
        ProviderSelection::Auto => classify(fields, raw, rules),
    }
}
