//! Provider rules
//!
//! A rule describes the signals that identify one provider's labels.
//! Rule sets are configuration: they are loaded from YAML (or built in code)
//! and handed to the classifier.

use gs1_core::{DecodedFieldSet, Gs1Error};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a rule set
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("provider rule has an empty name")]
    EmptyName,
    #[error("duplicate provider '{0}'")]
    DuplicateProvider(String),
    #[error("invalid pattern '{pattern}' for provider '{provider}': {source}")]
    InvalidPattern {
        provider: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse provider rules YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read provider rules: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RuleSetError> for Gs1Error {
    fn from(err: RuleSetError) -> Self {
        Gs1Error::RuleSetError(err.to_string())
    }
}

/// Rule as written in configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderRuleSpec {
    pub name: String,
    #[serde(default)]
    pub gtin_prefix: Option<String>,
    #[serde(default)]
    pub lot_pattern: Option<String>,
    #[serde(default)]
    pub serial_pattern: Option<String>,
    /// Free-text marker; defaults to the provider name
    #[serde(default)]
    pub text: Option<String>,
    /// AIs that only this provider uses
    #[serde(default)]
    pub diagnostic_ais: Vec<String>,
}

/// A compiled provider rule
#[derive(Debug, Clone)]
pub struct ProviderRule {
    /// Provider label assigned on match
    pub name: String,

    pub gtin_prefix: Option<String>,

    /// Matched against AI 10 (case-insensitive)
    pub lot_pattern: Option<Regex>,

    /// Matched against AI 21 (case-insensitive)
    pub serial_pattern: Option<Regex>,

    /// Substring looked up in the raw scan text
    pub text: Option<String>,

    pub diagnostic_ais: Vec<String>,
}

impl ProviderRule {
    /// Create a rule with no signals
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gtin_prefix: None,
            lot_pattern: None,
            serial_pattern: None,
            text: None,
            diagnostic_ais: Vec::new(),
        }
    }

    /// Compile a configuration entry
    pub fn compile(spec: ProviderRuleSpec) -> Result<Self, RuleSetError> {
        if spec.name.trim().is_empty() {
            return Err(RuleSetError::EmptyName);
        }

        let mut rule = Self::new(spec.name);
        rule.gtin_prefix = spec.gtin_prefix;
        rule.text = spec.text;
        rule.diagnostic_ais = spec.diagnostic_ais;

        if let Some(pattern) = spec.lot_pattern {
            rule = rule.with_lot_pattern(&pattern)?;
        }
        if let Some(pattern) = spec.serial_pattern {
            rule = rule.with_serial_pattern(&pattern)?;
        }
        Ok(rule)
    }

    pub fn with_gtin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.gtin_prefix = Some(prefix.into());
        self
    }

    pub fn with_lot_pattern(mut self, pattern: &str) -> Result<Self, RuleSetError> {
        self.lot_pattern = Some(self.compile_pattern(pattern)?);
        Ok(self)
    }

    pub fn with_serial_pattern(mut self, pattern: &str) -> Result<Self, RuleSetError> {
        self.serial_pattern = Some(self.compile_pattern(pattern)?);
        Ok(self)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_diagnostic_ai(mut self, ai: impl Into<String>) -> Self {
        self.diagnostic_ais.push(ai.into());
        self
    }

    fn compile_pattern(&self, pattern: &str) -> Result<Regex, RuleSetError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleSetError::InvalidPattern {
                provider: self.name.clone(),
                pattern: pattern.to_string(),
                source,
            })
    }

    /// First diagnostic AI of this rule present in `fields`
    pub fn diagnostic_match<'f>(&self, fields: &'f DecodedFieldSet) -> Option<&'f str> {
        fields
            .codes()
            .find(|code| self.diagnostic_ais.iter().any(|ai| ai == code))
    }

    pub fn matches_gtin(&self, gtin: &str) -> bool {
        self.gtin_prefix
            .as_deref()
            .is_some_and(|prefix| !prefix.is_empty() && gtin.starts_with(prefix))
    }

    pub fn matches_lot(&self, lot: &str) -> bool {
        self.lot_pattern.as_ref().is_some_and(|re| re.is_match(lot))
    }

    pub fn matches_serial(&self, serial: &str) -> bool {
        self.serial_pattern.as_ref().is_some_and(|re| re.is_match(serial))
    }

    /// Case-insensitive substring test against raw scan text
    pub fn matches_text(&self, raw: &str) -> bool {
        let needle = self.text.as_deref().unwrap_or(&self.name).to_uppercase();
        !needle.is_empty() && raw.to_uppercase().contains(&needle)
    }
}

/// Top-level rules file structure
#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    pub providers: Vec<ProviderRuleSpec>,
}

/// Ordered provider rules; order breaks ties inside each tier
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ProviderRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ProviderRule>) -> Result<Self, RuleSetError> {
        let mut set = Self::default();
        for rule in rules {
            set.push(rule)?;
        }
        Ok(set)
    }

    fn push(&mut self, rule: ProviderRule) -> Result<(), RuleSetError> {
        if rule.name.trim().is_empty() {
            return Err(RuleSetError::EmptyName);
        }
        if self.get(&rule.name).is_some() {
            return Err(RuleSetError::DuplicateProvider(rule.name));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Compile a rule set from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleSetError> {
        let file: RulesFile = serde_yaml::from_str(yaml)?;
        let rules = file
            .providers
            .into_iter()
            .map(ProviderRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// Load and compile a rule set from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn get(&self, name: &str) -> Option<&ProviderRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_signals() {
        let rule = ProviderRule::new("BIOPROTECE")
            .with_gtin_prefix("8411111")
            .with_lot_pattern(r"^B\d{5,}$")
            .unwrap();

        assert!(!rule.matches_gtin("08411111000012"));
        assert!(rule.matches_gtin("84111110000123"));
        assert!(rule.matches_lot("b12345"));
        assert!(!rule.matches_lot("B12"));
        assert!(!rule.matches_serial("anything"));
        assert!(rule.matches_text("lot from bioprotece labs"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = ProviderRule::new("X").with_serial_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, RuleSetError::InvalidPattern { ref provider, .. } if provider == "X"));
    }

    #[test]
    fn test_from_yaml() {
        let rules = RuleSet::from_yaml(
            r#"
providers:
  - name: SAI
    gtin_prefix: "8422222"
    serial_pattern: "^SAI-[A-Z0-9]{4,}$"
  - name: MEDLAB
    diagnostic_ais: ["90", "240"]
"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.get("SAI").unwrap().matches_serial("sai-ab12"));
        assert_eq!(rules.get("MEDLAB").unwrap().diagnostic_ais, vec!["90", "240"]);
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let result = RuleSet::new(vec![ProviderRule::new("A"), ProviderRule::new("A")]);
        assert!(matches!(result, Err(RuleSetError::DuplicateProvider(name)) if name == "A"));
    }
}
