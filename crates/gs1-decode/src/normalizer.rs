//! Scan text normalization.
//!
//! Scanners disagree on how they transmit the group separator:
//! - some send FNC1 as GS (0x1D), others as RS, EOT or a bare newline
//! - some prepend an AIM symbology identifier (`]C1`, `]d2`, `]Q3`, ...)
//! - some pad the payload with spaces or a trailing carriage return
//!
//! Everything is folded onto the canonical FNC1 before tokenizing.

use gs1_core::FNC1;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// AIM symbology identifiers that announce GS1 content
    static ref GS1_SYMBOLOGY_ID: Regex = Regex::new(r"^\](C1|e0|d2|Q3|J1)").unwrap();
}

/// Normalized scan text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Text with every separator folded onto FNC1
    pub text: String,
    /// Whether any FNC1 survives inside the text
    pub has_separator: bool,
    /// Stripped symbology identifier, if the scanner sent one
    pub symbology: Option<String>,
}

/// Normalize raw scan text for tokenizing
pub fn normalize(raw: &str) -> Normalized {
    // Keyboard-wedge scanners end every read with CR/LF; that is not a separator
    let mut text = raw.trim_end_matches(['\r', '\n', ' ']).trim_start_matches(' ');

    let symbology = GS1_SYMBOLOGY_ID.find(text).map(|m| m.as_str().to_string());
    if let Some(id) = &symbology {
        text = &text[id.len()..];
    }

    let folded: String = text
        .chars()
        .map(|c| if c != FNC1 && c.is_control() { FNC1 } else { c })
        .collect();

    // A trailing FNC1 is kept: it explicitly terminates the last field
    let text = folded.trim_start_matches(FNC1).to_string();
    let has_separator = text.contains(FNC1);

    Normalized {
        text,
        has_separator,
        symbology,
    }
}
