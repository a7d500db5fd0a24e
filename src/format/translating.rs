//! Formatter decorator that swaps message codes for translated text.

use std::sync::Arc;

use crate::format::{FormatError, Formatter, Record};
use crate::translation::TranslationTable;

/// Wraps another formatter and translates records before delegating.
///
/// If the record's `code` field is a string found in the bound table, the
/// message is replaced by the translation. Anything else (no code, a
/// non-string code, an unknown code) leaves the message as written.
#[derive(Debug, Clone)]
pub struct TranslatingFormatter<F> {
    inner: F,
    table: Arc<TranslationTable>,
}

impl<F: Formatter> TranslatingFormatter<F> {
    pub fn new(inner: F, table: Arc<TranslationTable>) -> Self {
        Self { inner, table }
    }
}

impl<F: Formatter> Formatter for TranslatingFormatter<F> {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, FormatError> {
        if let Some(translation) = record.code().and_then(|code| self.table.get(code)) {
            record.message = translation.to_string();
        }
        self.inner.format(record)
    }
}
