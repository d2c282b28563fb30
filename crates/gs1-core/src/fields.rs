//! Ordered AI → value mapping produced by one decode.

use crate::ai;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fields extracted from exactly one raw scan, in decode order.
///
/// Serializes as a JSON object whose key order follows the decode order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFieldSet {
    entries: Vec<(String, String)>,
}

impl DecodedFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field set holding opaque, non-GS1 text under [`ai::PLAIN_TEXT`].
    pub fn plain_text(text: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(ai::PLAIN_TEXT, text);
        set
    }

    /// Insert a field. Returns `false` (and keeps the first value) when the
    /// code is already present.
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<String>) -> bool {
        let code = code.into();
        if self.contains(&code) {
            return false;
        }
        self.entries.push((code, value.into()));
        true
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn gtin(&self) -> Option<&str> {
        self.get(ai::GTIN)
    }

    pub fn lot(&self) -> Option<&str> {
        self.get(ai::BATCH)
    }

    pub fn serial(&self) -> Option<&str> {
        self.get(ai::SERIAL)
    }

    /// True when the scan could not be read as GS1 at all.
    pub fn is_plain_text(&self) -> bool {
        self.entries.len() == 1 && self.entries[0].0 == ai::PLAIN_TEXT
    }
}

impl FromIterator<(String, String)> for DecodedFieldSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (code, value) in iter {
            set.insert(code, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DecodedFieldSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for DecodedFieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, value) in &self.entries {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

struct FieldSetVisitor;

impl<'de> Visitor<'de> for FieldSetVisitor {
    type Value = DecodedFieldSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of AI codes to string values")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut set = DecodedFieldSet::new();
        while let Some((code, value)) = access.next_entry::<String, String>()? {
            set.insert(code, value);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for DecodedFieldSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldSetVisitor)
    }
}
