//! AI Registry
use crate::builtin;
use crate::definition::{AiDefinition, AiFamily, DataFormat};
use crate::{is_ai_shaped, UNKNOWN_DESCRIPTION};
use gs1_core::Gs1Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// YYMMDD
const DATE_LENGTH: usize = 6;

static BUILTIN: Lazy<AiRegistry> = Lazy::new(|| {
    AiRegistry::new(builtin::definitions(), builtin::families())
        .expect("built-in AI table is consistent")
});

/// Errors raised while building a registry. These are configuration
/// problems, detected once at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid AI code '{0}': expected 2-4 ASCII digits")]
    InvalidCode(String),
    #[error("duplicate AI code '{0}'")]
    DuplicateCode(String),
    #[error("AI '{0}' declares a zero length")]
    ZeroLength(String),
    #[error("date AI '{code}' must be fixed length 6, got {length}")]
    InvalidDateLength { code: String, length: usize },
    #[error("invalid family prefix '{0}': expected 3 ASCII digits")]
    InvalidFamilyPrefix(String),
    #[error("family prefix '{prefix}' collides with registered AI '{code}'")]
    FamilyCollision { prefix: String, code: String },
    #[error("failed to parse registry YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RegistryError> for Gs1Error {
    fn from(err: RegistryError) -> Self {
        Gs1Error::RegistryError(err.to_string())
    }
}

/// Registry extension file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub definitions: Vec<AiDefinition>,
    #[serde(default)]
    pub families: Vec<AiFamily>,
}

/// Immutable lookup table of Application Identifiers
#[derive(Debug, Clone)]
pub struct AiRegistry {
    definitions: HashMap<String, AiDefinition>,
    families: Vec<AiFamily>,
}

impl AiRegistry {
    /// Build and validate a registry
    pub fn new(
        definitions: Vec<AiDefinition>,
        families: Vec<AiFamily>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self {
            definitions: HashMap::new(),
            families: Vec::new(),
        };
        registry.extend(definitions, families)?;
        Ok(registry)
    }

    /// The standard table shipped with the crate
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Shared reference to the standard table
    pub fn shared() -> &'static AiRegistry {
        &BUILTIN
    }

    /// Add definitions and families, rejecting anything that would make
    /// lookups ambiguous. On error the registry is left unchanged.
    pub fn extend(
        &mut self,
        definitions: Vec<AiDefinition>,
        families: Vec<AiFamily>,
    ) -> Result<(), RegistryError> {
        let mut staged = self.clone();

        for family in families {
            let prefix = &family.prefix;
            if prefix.len() != 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RegistryError::InvalidFamilyPrefix(prefix.clone()));
            }
            if family.length == 0 {
                return Err(RegistryError::ZeroLength(prefix.clone()));
            }
            if staged.families.iter().any(|f| &f.prefix == prefix) {
                return Err(RegistryError::DuplicateCode(prefix.clone()));
            }
            if let Some(code) = staged.colliding_code(prefix) {
                return Err(RegistryError::FamilyCollision {
                    prefix: prefix.clone(),
                    code,
                });
            }
            staged.families.push(family);
        }

        for definition in definitions {
            let code = definition.code.clone();
            if !is_ai_shaped(&code) {
                return Err(RegistryError::InvalidCode(code));
            }
            if definition.length == 0 {
                return Err(RegistryError::ZeroLength(code));
            }
            if matches!(definition.format, DataFormat::Date | DataFormat::ExpiryDate)
                && !(definition.is_fixed() && definition.length == DATE_LENGTH)
            {
                return Err(RegistryError::InvalidDateLength {
                    code,
                    length: definition.length,
                });
            }
            if staged.definitions.contains_key(&code) {
                return Err(RegistryError::DuplicateCode(code));
            }
            if let Some(family) = staged.families.iter().find(|f| {
                f.prefix == code || f.matches(&code)
            }) {
                return Err(RegistryError::FamilyCollision {
                    prefix: family.prefix.clone(),
                    code,
                });
            }
            staged.definitions.insert(code, definition);
        }

        *self = staged;
        Ok(())
    }

    /// Layer extra entries from YAML content
    pub fn extend_from_yaml(&mut self, yaml: &str) -> Result<(), RegistryError> {
        let file: RegistryFile = serde_yaml::from_str(yaml)?;
        self.extend(file.definitions, file.families)
    }

    /// Layer extra entries from a YAML file
    pub fn extend_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let content = std::fs::read_to_string(path)?;
        self.extend_from_yaml(&content)
    }

    fn colliding_code(&self, prefix: &str) -> Option<String> {
        self.definitions
            .keys()
            .find(|code| code.as_str() == prefix || (code.len() == 4 && code.starts_with(prefix)))
            .cloned()
    }

    /// Resolve a complete AI code, including family members like `"3102"`
    pub fn lookup(&self, code: &str) -> Option<AiDefinition> {
        if let Some(definition) = self.definitions.get(code) {
            return Some(definition.clone());
        }
        self.family(code).and_then(|f| f.definition_for(code))
    }

    /// True for any 2-4 digit candidate that is a registered AI or a
    /// registered family prefix
    pub fn is_known(&self, candidate: &str) -> bool {
        if !is_ai_shaped(candidate) {
            return false;
        }
        self.definitions.contains_key(candidate)
            || self
                .families
                .iter()
                .any(|f| f.prefix == candidate || f.matches(candidate))
    }

    /// Family of a full 4-digit member code
    pub fn family(&self, code: &str) -> Option<&AiFamily> {
        self.families.iter().find(|f| f.matches(code))
    }

    /// Decimal places implied by a family member code
    pub fn decimal_places(&self, code: &str) -> Option<u32> {
        self.family(code).and_then(|f| f.decimal_places(code))
    }

    /// Human-readable label, `"Unknown"` for unregistered codes
    pub fn describe(&self, code: &str) -> String {
        self.lookup(code)
            .map(|d| d.description)
            .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string())
    }

    /// All plain definitions, sorted by code
    pub fn definitions(&self) -> Vec<&AiDefinition> {
        let mut defs: Vec<&AiDefinition> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.code.cmp(&b.code));
        defs
    }

    pub fn families(&self) -> &[AiFamily] {
        &self.families
    }
}

impl Default for AiRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{DataFormat, FamilyKind, LengthClass};

    #[test]
    fn test_builtin_lookups() {
        let registry = AiRegistry::builtin();

        let gtin = registry.lookup("01").unwrap();
        assert!(gtin.is_fixed());
        assert_eq!(gtin.length, 14);

        let lot = registry.lookup("10").unwrap();
        assert_eq!(lot.length_class, LengthClass::Variable);
        assert_eq!(lot.length, 20);

        assert_eq!(registry.lookup("17").unwrap().format, DataFormat::ExpiryDate);
        assert_eq!(registry.lookup("8005").unwrap().length, 6);
        assert!(registry.lookup("99").is_none());
    }

    #[test]
    fn test_family_lookup() {
        let registry = AiRegistry::builtin();

        let weight = registry.lookup("3102").unwrap();
        assert_eq!(weight.length, 6);
        assert_eq!(weight.description, "Net weight (kg) - 2 dec");
        assert_eq!(registry.decimal_places("3925"), Some(5));
        // The bare prefix is known but is not a complete AI
        assert!(registry.lookup("310").is_none());
    }

    #[test]
    fn test_is_known() {
        let registry = AiRegistry::builtin();
        assert!(registry.is_known("01"));
        assert!(registry.is_known("240"));
        assert!(registry.is_known("310"));
        assert!(registry.is_known("3931"));
        assert!(registry.is_known("8005"));
        assert!(!registry.is_known("1"));
        assert!(!registry.is_known("99"));
        assert!(!registry.is_known("1A"));
        assert!(!registry.is_known("80050"));
    }

    #[test]
    fn test_describe_unknown() {
        let registry = AiRegistry::builtin();
        assert_eq!(registry.describe("21"), "Serial number");
        assert_eq!(registry.describe("7003"), UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn test_rejects_duplicate_code() {
        let err = AiRegistry::new(
            vec![
                AiDefinition::fixed("01", 14, "GTIN"),
                AiDefinition::fixed("01", 14, "GTIN again"),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCode(code) if code == "01"));
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(matches!(
            AiRegistry::new(vec![AiDefinition::fixed("1", 4, "short")], vec![]),
            Err(RegistryError::InvalidCode(_))
        ));
        assert!(matches!(
            AiRegistry::new(vec![AiDefinition::variable("95", 0, "empty")], vec![]),
            Err(RegistryError::ZeroLength(_))
        ));
        assert!(matches!(
            AiRegistry::new(
                vec![AiDefinition::fixed("3101", 6, "clash")],
                vec![AiFamily::new("310", LengthClass::Fixed, 6, "w", FamilyKind::Amount)],
            ),
            Err(RegistryError::FamilyCollision { .. })
        ));
    }

    #[test]
    fn test_extend_from_yaml() {
        let mut registry = AiRegistry::builtin();
        registry
            .extend_from_yaml(
                r#"
definitions:
  - code: "7003"
    length_class: fixed
    length: 10
    description: Expiration date and time
families:
  - prefix: "330"
    length_class: fixed
    length: 6
    description: Gross weight (kg)
    kind:
      type: measure
      unit: kg
"#,
            )
            .unwrap();

        assert_eq!(registry.describe("7003"), "Expiration date and time");
        assert_eq!(registry.decimal_places("3301"), Some(1));
    }

    #[test]
    fn test_failed_extend_leaves_registry_unchanged() {
        let mut registry = AiRegistry::builtin();
        let result = registry.extend(
            vec![
                AiDefinition::fixed("7003", 10, "ok"),
                AiDefinition::fixed("01", 14, "dup"),
            ],
            vec![],
        );
        assert!(result.is_err());
        assert!(registry.lookup("7003").is_none());
    }

    #[test]
    fn test_rejects_date_format_without_six_digits() {
        let mut registry = AiRegistry::builtin();
        let err = registry
            .extend_from_yaml(
                r#"
definitions:
  - code: "7006"
    length_class: fixed
    length: 4
    description: Short date
    format: date
"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidDateLength { ref code, length: 4 } if code == "7006"
        ));
        assert!(registry.lookup("7006").is_none());

        let variable = AiDefinition::variable("7007", 6, "Loose date").with_format(DataFormat::ExpiryDate);
        assert!(matches!(
            AiRegistry::new(vec![variable], vec![]),
            Err(RegistryError::InvalidDateLength { .. })
        ));

        let ok = AiDefinition::fixed("7006", 6, "First freeze date").with_format(DataFormat::Date);
        assert!(registry.extend(vec![ok], vec![]).is_ok());
    }
}
