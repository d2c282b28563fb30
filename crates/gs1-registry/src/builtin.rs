//! Built-in AI table
//!
//! Covers the identifiers commonly printed on healthcare and retail labels.
//! Extra identifiers can be layered on with [`crate::AiRegistry::extend_from_yaml`].

use crate::definition::{AiDefinition, AiFamily, DataFormat, FamilyKind, LengthClass};

/// (code, length, description, format)
const FIXED: &[(&str, usize, &str, DataFormat)] = &[
    ("00", 18, "SSCC", DataFormat::Text),
    ("01", 14, "GTIN", DataFormat::Text),
    ("02", 14, "Content GTIN", DataFormat::Text),
    ("11", 6, "Production date", DataFormat::Date),
    ("12", 6, "Due date", DataFormat::Date),
    ("13", 6, "Packaging date", DataFormat::Date),
    ("15", 6, "Best before date", DataFormat::ExpiryDate),
    ("16", 6, "Sell by date", DataFormat::ExpiryDate),
    ("17", 6, "Expiry date", DataFormat::ExpiryDate),
    ("20", 2, "Internal product variant", DataFormat::Text),
    ("410", 13, "Ship to (GLN)", DataFormat::Text),
    ("414", 13, "Location (GLN)", DataFormat::Text),
    ("8005", 6, "Price per unit of measure", DataFormat::Text),
];

/// (code, max length, description)
const VARIABLE: &[(&str, usize, &str)] = &[
    ("10", 20, "Batch/lot number"),
    ("21", 20, "Serial number"),
    ("22", 20, "Consumer product variant"),
    ("30", 8, "Variable count"),
    ("37", 8, "Count of trade items"),
    ("90", 30, "Mutually agreed information"),
    ("240", 30, "Additional item ID"),
    ("241", 30, "Customer part number"),
    ("400", 30, "Customer purchase order number"),
];

/// (prefix, description, unit)
const MEASURES: &[(&str, &str, &str)] = &[
    ("310", "Net weight (kg)", "kg"),
    ("311", "Length (m)", "m"),
    ("312", "Width (m)", "m"),
    ("313", "Depth (m)", "m"),
    ("314", "Area (m²)", "m²"),
    ("315", "Net volume (l)", "l"),
    ("316", "Net volume (m³)", "m³"),
    ("320", "Net weight (lb)", "lb"),
];

pub fn definitions() -> Vec<AiDefinition> {
    let fixed = FIXED.iter().map(|(code, len, desc, format)| {
        AiDefinition::fixed(*code, *len, *desc).with_format(*format)
    });
    let variable = VARIABLE
        .iter()
        .map(|(code, max, desc)| AiDefinition::variable(*code, *max, *desc));
    fixed.chain(variable).collect()
}

pub fn families() -> Vec<AiFamily> {
    let mut families: Vec<AiFamily> = MEASURES
        .iter()
        .map(|(prefix, desc, unit)| {
            AiFamily::new(
                *prefix,
                LengthClass::Fixed,
                6,
                *desc,
                FamilyKind::Measure { unit: unit.to_string() },
            )
        })
        .collect();

    families.push(AiFamily::new(
        "392",
        LengthClass::Variable,
        15,
        "Amount payable",
        FamilyKind::Amount,
    ));
    families.push(AiFamily::new(
        "393",
        LengthClass::Variable,
        18,
        "Amount payable (ISO currency)",
        FamilyKind::AmountWithCurrency,
    ));

    families
}
