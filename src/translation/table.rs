//! Immutable code → message lookup table.

use std::collections::HashMap;

use serde_json::Value;

use crate::translation::{expand, flatten, TranslationError};

/// Translations keyed by dotted message code.
///
/// Built once from a document and never mutated afterwards. Reloading
/// produces a new table that replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Create an empty table (no translation active).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by flattening a nested document.
    pub fn from_document(doc: &Value) -> Result<Self, TranslationError> {
        Ok(Self {
            entries: flatten(doc)?,
        })
    }

    /// Look up the translation for a code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Whether a translation exists for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by code.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Rebuild the nested document this table was flattened from.
    pub fn to_document(&self) -> Value {
        expand(&self.entries)
    }
}

impl From<HashMap<String, String>> for TranslationTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
