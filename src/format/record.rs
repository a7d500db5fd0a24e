//! Log record passed through formatters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::Level;

/// Field carrying the translation lookup key.
pub const CODE_FIELD: &str = "code";

/// Named fields attached to a record.
pub type Fields = BTreeMap<String, Value>;

/// A single log event.
///
/// Records are transient: one is built per log call and formatters may
/// rewrite it in place before it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub time: DateTime<Utc>,
    pub fields: Fields,
}

impl Record {
    /// Create a record stamped with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Utc::now(),
            fields: Fields::new(),
        }
    }

    /// Attach a field, replacing any previous value under the same key.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The message code, if the record carries a string `code` field.
    pub fn code(&self) -> Option<&str> {
        self.fields.get(CODE_FIELD).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_must_be_string() {
        let record = Record::new(Level::INFO, "literal").with_field(CODE_FIELD, "user.notfound");
        assert_eq!(record.code(), Some("user.notfound"));

        let record = Record::new(Level::INFO, "literal").with_field(CODE_FIELD, 404);
        assert_eq!(record.code(), None);

        let record = Record::new(Level::INFO, "literal");
        assert_eq!(record.code(), None);
    }

    #[test]
    fn test_with_field_overwrites() {
        let record = Record::new(Level::WARN, "msg")
            .with_field("id", 1)
            .with_field("id", 2);
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields["id"], Value::from(2));
    }
}
