//! AI definitions and decimal-indicator families

use serde::{Deserialize, Serialize};

/// Whether an AI value has an exact or a maximum length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Fixed,
    Variable,
}

/// How the interpreter should read a plain (non-family) AI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// Shown as-is
    #[default]
    Text,
    /// YYMMDD date
    Date,
    /// YYMMDD date that can be past due
    ExpiryDate,
}

/// A single registered Application Identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDefinition {
    /// 2-4 digit code
    pub code: String,

    pub length_class: LengthClass,

    /// Exact length (fixed) or maximum length (variable)
    pub length: usize,

    /// Human-readable label, also used for export column headers
    pub description: String,

    #[serde(default)]
    pub format: DataFormat,
}

impl AiDefinition {
    pub fn fixed(code: impl Into<String>, length: usize, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            length_class: LengthClass::Fixed,
            length,
            description: description.into(),
            format: DataFormat::Text,
        }
    }

    pub fn variable(
        code: impl Into<String>,
        max_length: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            length_class: LengthClass::Variable,
            length: max_length,
            description: description.into(),
            format: DataFormat::Text,
        }
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.length_class == LengthClass::Fixed
    }
}

/// What the decimal-scaled value of a family represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FamilyKind {
    /// A physical measure with a unit suffix (kg, m, l, ...)
    Measure { unit: String },
    /// A monetary amount in the local currency
    Amount,
    /// A 3-digit ISO 4217 currency code followed by the amount
    AmountWithCurrency,
}

/// A family of 4-digit AIs sharing a 3-digit prefix.
///
/// The fourth digit is the decimal-place indicator: `3102` is net weight in
/// kilograms with two implied decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiFamily {
    /// 3-digit prefix
    pub prefix: String,
    pub length_class: LengthClass,
    pub length: usize,
    pub description: String,
    pub kind: FamilyKind,
}

impl AiFamily {
    pub fn new(
        prefix: impl Into<String>,
        length_class: LengthClass,
        length: usize,
        description: impl Into<String>,
        kind: FamilyKind,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            length_class,
            length,
            description: description.into(),
            kind,
        }
    }

    /// Does a full 4-digit code belong to this family?
    pub fn matches(&self, code: &str) -> bool {
        code.len() == self.prefix.len() + 1
            && code.starts_with(self.prefix.as_str())
            && code.as_bytes()[code.len() - 1].is_ascii_digit()
    }

    /// Decimal places encoded in the last digit of `code`
    pub fn decimal_places(&self, code: &str) -> Option<u32> {
        if !self.matches(code) {
            return None;
        }
        code.chars().last().and_then(|c| c.to_digit(10))
    }

    /// Concrete definition for one member code of the family
    pub fn definition_for(&self, code: &str) -> Option<AiDefinition> {
        let decimals = self.decimal_places(code)?;
        Some(AiDefinition {
            code: code.to_string(),
            length_class: self.length_class,
            length: self.length,
            description: format!("{} - {} dec", self.description, decimals),
            format: DataFormat::Text,
        })
    }

    pub fn unit(&self) -> Option<&str> {
        match &self.kind {
            FamilyKind::Measure { unit } => Some(unit.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight() -> AiFamily {
        AiFamily::new(
            "310",
            LengthClass::Fixed,
            6,
            "Net weight (kg)",
            FamilyKind::Measure { unit: "kg".to_string() },
        )
    }

    #[test]
    fn test_family_matching() {
        let family = weight();
        assert!(family.matches("3102"));
        assert!(family.matches("3109"));
        assert!(!family.matches("310"));
        assert!(!family.matches("3112"));
        assert!(!family.matches("310A"));
    }

    #[test]
    fn test_family_definition() {
        let def = weight().definition_for("3103").unwrap();
        assert_eq!(def.code, "3103");
        assert_eq!(def.length, 6);
        assert_eq!(def.description, "Net weight (kg) - 3 dec");
        assert_eq!(weight().unit(), Some("kg"));
    }
}
