//! Verbatim formatter.

use crate::format::{FormatError, Formatter, Record};

/// Emits the record message and nothing else: no level, time or fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, FormatError> {
        Ok(record.message.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_message_only() {
        let mut record = Record::new(Level::ERROR, "hello")
            .with_field("code", "greeting")
            .with_field("id", 42);

        let bytes = RawFormatter.format(&mut record).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_no_newline_added() {
        let mut record = Record::new(Level::INFO, "line\n");
        assert_eq!(RawFormatter.format(&mut record).unwrap(), b"line\n");
    }
}
