//! Field interpretation for decoded GS1 data.
//!
//! Turns raw AI values into display values:
//! - YYMMDD dates with century windowing and expiry against an injected "now"
//! - decimal-indicator families (`310n`, `392n`, `393n`, ...) scaled by 10^n
//! - everything else shown raw, labeled with the registry description

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use gs1_core::DecodedFieldSet;
use gs1_registry::{AiFamily, AiRegistry, DataFormat, FamilyKind};
use serde::Serialize;

/// Appended to the display value of a past-due date
pub const EXPIRED_MARKER: &str = " (EXPIRED)";

/// Appended to a date value that is not a real calendar date
pub const INVALID_DATE_MARKER: &str = " (invalid date)";

/// Derived view of one decoded field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedField {
    pub code: String,
    pub description: String,
    pub raw: String,
    /// What a UI should show
    pub display: String,
    /// Scaled value of decimal-indicator families
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// `None` when not applicable or the date could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl InterpretedField {
    fn passthrough(code: &str, raw: &str, registry: &AiRegistry) -> Self {
        Self {
            code: code.to_string(),
            description: registry.describe(code),
            raw: raw.to_string(),
            display: raw.to_string(),
            numeric: None,
            date: None,
            expired: None,
        }
    }
}

/// All derived fields of one scan, in decode order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Interpretation {
    pub fields: Vec<InterpretedField>,
}

impl Interpretation {
    pub fn get(&self, code: &str) -> Option<&InterpretedField> {
        self.fields.iter().find(|f| f.code == code)
    }

    /// True when any expiry-bearing date is in the past
    pub fn any_expired(&self) -> bool {
        self.fields.iter().any(|f| f.expired == Some(true))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Interpret every decoded field against `now`
pub fn interpret(fields: &DecodedFieldSet, registry: &AiRegistry, now: DateTime<Utc>) -> Interpretation {
    let fields = fields
        .iter()
        .map(|(code, raw)| interpret_field(code, raw, registry, now))
        .collect();
    Interpretation { fields }
}

fn interpret_field(code: &str, raw: &str, registry: &AiRegistry, now: DateTime<Utc>) -> InterpretedField {
    let mut field = InterpretedField::passthrough(code, raw, registry);

    if let Some(family) = registry.family(code) {
        if let Some(decimals) = family.decimal_places(code) {
            apply_scaled(&mut field, family, decimals);
        }
        return field;
    }

    match registry.lookup(code).map(|d| d.format) {
        Some(DataFormat::Date) => apply_date(&mut field, now, false),
        Some(DataFormat::ExpiryDate) => apply_date(&mut field, now, true),
        _ => {}
    }
    field
}

// ============================================================================
// DATES
// ============================================================================

/// Parse a GS1 YYMMDD date.
///
/// Two-digit years up to ten years past `now`'s year map to 20YY, the rest
/// to 19YY. Returns `None` for anything that is not a real calendar date.
pub fn parse_gs1_date(raw: &str, now: DateTime<Utc>) -> Option<NaiveDate> {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = raw[0..2].parse().ok()?;
    let month: u32 = raw[2..4].parse().ok()?;
    let day: u32 = raw[4..6].parse().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let current_yy = now.year() % 100;
    let year = if yy <= current_yy + 10 { 2000 + yy } else { 1900 + yy };

    // from_ymd_opt refuses dates such as 30 February
    NaiveDate::from_ymd_opt(year, month, day)
}

fn apply_date(field: &mut InterpretedField, now: DateTime<Utc>, expiry: bool) {
    match parse_gs1_date(&field.raw, now) {
        Some(date) => {
            let mut display = date.format("%d/%m/%Y").to_string();
            if expiry {
                let expired = date < now.date_naive();
                if expired {
                    display.push_str(EXPIRED_MARKER);
                }
                field.expired = Some(expired);
            }
            field.date = Some(date);
            field.display = display;
        }
        None => {
            tracing::warn!(ai = %field.code, value = %field.raw, "invalid GS1 date");
            field.display = format!("{}{}", field.raw, INVALID_DATE_MARKER);
        }
    }
}

// ============================================================================
// DECIMAL FAMILIES
// ============================================================================

/// Scale an all-digit string by 10^decimals.
///
/// The display string is built from the digits directly so it always carries
/// exactly `decimals` fraction digits.
pub fn scale_decimal(digits: &str, decimals: u32) -> Option<(f64, String)> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = digits.parse().ok()?;
    let numeric = value as f64 / 10f64.powi(decimals as i32);

    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let display = if decimals == 0 {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    Some((numeric, display))
}

fn apply_scaled(field: &mut InterpretedField, family: &AiFamily, decimals: u32) {
    match &family.kind {
        FamilyKind::Measure { unit } => {
            if let Some((numeric, display)) = scale_decimal(&field.raw, decimals) {
                field.numeric = Some(numeric);
                field.display = format!("{} {}", display, unit);
            }
        }
        FamilyKind::Amount => {
            if let Some((numeric, display)) = scale_decimal(&field.raw, decimals) {
                field.numeric = Some(numeric);
                field.display = display;
            }
        }
        FamilyKind::AmountWithCurrency => {
            if field.raw.len() < 4 || !field.raw.is_char_boundary(3) {
                return;
            }
            let (currency, amount) = field.raw.split_at(3);
            if !currency.bytes().all(|b| b.is_ascii_digit()) {
                return;
            }
            if let Some((numeric, display)) = scale_decimal(amount, decimals) {
                field.numeric = Some(numeric);
                field.display = format!("{} (ISO 4217: {})", display, currency);
            }
        }
    }
}
