//! GS1 element string tokenizer.
//!
//! Walks the normalized scan text left to right, matching the longest
//! registered AI at the cursor (4, 3, then 2 digits) and reading its value
//! according to the registry's length class.
//!
//! Variable-length values end at the next FNC1. When the scanner dropped
//! every separator, a variable value instead ends at the latest point
//! (within the AI's maximum length) where the remaining text reads as a
//! clean sequence of known AIs; otherwise it runs to the end of input.

use crate::normalizer::normalize;
use gs1_core::{DecodedFieldSet, FNC1};
use gs1_registry::{AiDefinition, AiRegistry, DataFormat};
use serde::Serialize;
use std::fmt;

/// Non-fatal problems found while decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Nothing left after normalization
    EmptyInput,
    /// No known AI at `position`; decoding stopped there
    UnrecognizedAi { position: usize, remainder: String },
    /// A fixed-length value was shorter than the table length
    TruncatedValue { ai: String, expected: usize, actual: usize },
    /// A separator-less variable value was cut at the AI's maximum length
    BoundedVariableValue { ai: String, max: usize },
    /// The same AI appeared twice; the first value was kept
    RepeatedAi { ai: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty scan"),
            Self::UnrecognizedAi { position, remainder } => {
                write!(f, "no known AI at position {}: '{}'", position, remainder)
            }
            Self::TruncatedValue { ai, expected, actual } => write!(
                f,
                "AI {} expects {} characters, got {}",
                ai, expected, actual
            ),
            Self::BoundedVariableValue { ai, max } => {
                write!(f, "AI {} value cut at its maximum length {}", ai, max)
            }
            Self::RepeatedAi { ai } => write!(f, "AI {} repeated, kept first value", ai),
        }
    }
}

/// Result of decoding one scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub fields: DecodedFieldSet,
    pub warnings: Vec<DecodeWarning>,
    /// AIM symbology identifier sent by the scanner, if any
    pub symbology: Option<String>,
}

impl Decoded {
    /// Every character was accounted for
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn is_plain_text(&self) -> bool {
        self.fields.is_plain_text()
    }
}

/// Decode a raw scan. Never fails: unreadable input yields a partial field
/// set plus warnings, or the whole text under the plain-text pseudo-key.
pub fn decode(raw: &str, registry: &AiRegistry) -> Decoded {
    let normalized = normalize(raw);
    let tokenizer = Tokenizer {
        chars: normalized.text.chars().collect(),
        registry,
        delimited: normalized.has_separator,
    };

    let mut decoded = Decoded {
        fields: DecodedFieldSet::new(),
        warnings: Vec::new(),
        symbology: normalized.symbology,
    };

    if tokenizer.chars.is_empty() {
        tracing::warn!("empty scan after normalization");
        decoded.warnings.push(DecodeWarning::EmptyInput);
        return decoded;
    }

    if !tokenizer.delimited && tokenizer.match_ai(0).is_none() {
        tracing::debug!("no AI at start of undelimited scan, keeping it as plain text");
        decoded.fields = DecodedFieldSet::plain_text(normalized.text);
        return decoded;
    }

    tokenizer.run(&mut decoded);
    decoded
}

struct Tokenizer<'a> {
    chars: Vec<char>,
    registry: &'a AiRegistry,
    /// The input carries at least one FNC1
    delimited: bool,
}

/// One field read from the cursor
struct Step {
    value: String,
    next: usize,
    stop: bool,
}

impl<'a> Tokenizer<'a> {
    fn run(&self, decoded: &mut Decoded) {
        let len = self.chars.len();
        let mut pos = 0;

        loop {
            while pos < len && self.chars[pos] == FNC1 {
                pos += 1;
            }
            if pos >= len {
                break;
            }

            let Some(def) = self.match_ai(pos) else {
                let remainder: String = self.chars[pos..].iter().collect();
                tracing::warn!(position = pos, remainder = %remainder, "no known GS1 AI, stopping");
                decoded
                    .warnings
                    .push(DecodeWarning::UnrecognizedAi { position: pos, remainder });
                break;
            };

            let start = pos + def.code.len();
            let step = if def.is_fixed() {
                self.read_fixed(&def, start, &mut decoded.warnings)
            } else {
                self.read_variable(&def, start, &decoded.fields, &mut decoded.warnings)
            };

            tracing::debug!(ai = %def.code, value = %step.value, "decoded field");
            if !decoded.fields.insert(def.code.clone(), step.value) {
                tracing::warn!(ai = %def.code, "repeated AI, keeping first value");
                decoded
                    .warnings
                    .push(DecodeWarning::RepeatedAi { ai: def.code.clone() });
            }

            if step.stop {
                break;
            }
            pos = step.next;
        }
    }

    /// Longest registered AI at `pos`
    fn match_ai(&self, pos: usize) -> Option<AiDefinition> {
        (2..=4).rev().find_map(|len| {
            let end = pos + len;
            if end > self.chars.len() {
                return None;
            }
            let candidate = &self.chars[pos..end];
            if !candidate.iter().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let code: String = candidate.iter().collect();
            self.registry.lookup(&code)
        })
    }

    fn read_fixed(&self, def: &AiDefinition, start: usize, warnings: &mut Vec<DecodeWarning>) -> Step {
        let len = self.chars.len();
        let end = (start + def.length).min(len);

        // A separator inside the window ends the value early
        let cut = self.chars[start..end]
            .iter()
            .position(|&c| c == FNC1)
            .map(|i| start + i);
        let value_end = cut.unwrap_or(end);
        let value: String = self.chars[start..value_end].iter().collect();

        let actual = value_end - start;
        if actual < def.length {
            tracing::warn!(ai = %def.code, expected = def.length, actual, "truncated fixed-length value");
            warnings.push(DecodeWarning::TruncatedValue {
                ai: def.code.clone(),
                expected: def.length,
                actual,
            });
            return Step {
                value,
                next: value_end + 1,
                stop: cut.is_none(),
            };
        }

        let mut next = value_end;
        if next < len && self.chars[next] == FNC1 {
            next += 1;
        }
        Step { value, next, stop: false }
    }

    fn read_variable(
        &self,
        def: &AiDefinition,
        start: usize,
        fields: &DecodedFieldSet,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Step {
        let len = self.chars.len();

        if self.delimited {
            let end = self.chars[start..]
                .iter()
                .position(|&c| c == FNC1)
                .map(|i| start + i)
                .unwrap_or(len);
            return Step {
                value: self.chars[start..end].iter().collect(),
                next: end + 1,
                stop: false,
            };
        }

        let remaining = len - start;
        let mut seen: Vec<&str> = fields.codes().collect();
        seen.push(&def.code);

        let bound = def.length.min(remaining.saturating_sub(1));
        let split = (1..=bound)
            .rev()
            .find(|&p| self.decodes_cleanly(start + p, &seen));

        let end = match split {
            Some(p) => start + p,
            None if remaining <= def.length => len,
            None => {
                tracing::warn!(ai = %def.code, max = def.length, "variable value cut at maximum length");
                warnings.push(DecodeWarning::BoundedVariableValue {
                    ai: def.code.clone(),
                    max: def.length,
                });
                start + def.length
            }
        };

        Step {
            value: self.chars[start..end].iter().collect(),
            next: end,
            stop: false,
        }
    }

    /// Does the text from `pos` read as known, complete, non-repeating AIs
    /// all the way to the end?
    fn decodes_cleanly(&self, mut pos: usize, seen: &[&str]) -> bool {
        let len = self.chars.len();
        let mut codes: Vec<String> = seen.iter().map(|c| c.to_string()).collect();

        while pos < len {
            let Some(def) = self.match_ai(pos) else {
                return false;
            };
            if codes.contains(&def.code) {
                return false;
            }
            let start = pos + def.code.len();

            if def.is_fixed() {
                let end = start + def.length;
                if end > len {
                    return false;
                }
                let value = &self.chars[start..end];
                if !value.iter().all(|c| c.is_ascii_digit()) {
                    return false;
                }
                if matches!(def.format, DataFormat::Date | DataFormat::ExpiryDate)
                    && !plausible_date(value)
                {
                    return false;
                }
                pos = end;
            } else {
                // A trailing variable field must fit without another split
                let remaining = len - start;
                return remaining > 0 && remaining <= def.length;
            }
            codes.push(def.code);
        }
        true
    }
}

/// Cheap YYMMDD shape check used while looking for split points
fn plausible_date(digits: &[char]) -> bool {
    if digits.len() != 6 {
        return false;
    }
    let num = |a: usize| -> u32 {
        digits[a].to_digit(10).unwrap_or(0) * 10 + digits[a + 1].to_digit(10).unwrap_or(0)
    };
    let month = num(2);
    let day = num(4);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}
