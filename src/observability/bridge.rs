//! Bridge from `tracing` events to a [`Logger`].
//!
//! # Responsibilities
//! - Convert each event into a `Record` (message + fields)
//! - Apply the logger's threshold and formatter (translation included)
//!
//! # Design Decisions
//! - The `message` field becomes the record message; every other field is kept
//! - Values recorded through `Debug` are stored as their debug text

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::format::{Fields, Record};
use crate::logger::Logger;

const MESSAGE_FIELD: &str = "message";

/// Layer that forwards every event to a logger.
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let mut record = Record::new(level, visitor.message.unwrap_or_default());
        record.fields = visitor.fields;

        if let Err(e) = self.logger.log(record) {
            // Reporting through tracing here would re-enter this layer.
            eprintln!("Failed to forward tracing event to '{}' logger: {}", self.logger.name(), e);
        }
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: Option<String>,
    fields: Fields,
}

impl RecordVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{RawFormatter, TextFormatter, TranslatingFormatter};
    use crate::config::TextConfig;
    use crate::logger::MemorySink;
    use crate::translation::TranslationTable;
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::layer::SubscriberExt;

    fn translated_logger(sink: MemorySink, level: LevelFilter) -> Arc<Logger> {
        let table: TranslationTable = [("user.notfound", "User was not found")].into_iter().collect();
        let text = TextFormatter::new(TextConfig {
            timestamps: false,
            ..TextConfig::default()
        });
        Arc::new(Logger::new(
            "main",
            TranslatingFormatter::new(text, Arc::new(table)),
            sink,
            level,
        ))
    }

    #[test]
    fn test_events_are_translated() {
        let sink = MemorySink::new();
        let logger = translated_logger(sink.clone(), LevelFilter::INFO);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(code = "user.notfound", id = 42, "literal");
            tracing::info!(code = "user.banned", "User {} banned", 7);
        });

        assert_eq!(
            sink.lines(),
            vec![
                " WARN User was not found code=\"user.notfound\" id=42",
                " INFO User 7 banned code=\"user.banned\"",
            ]
        );
    }

    #[test]
    fn test_threshold_applies() {
        let sink = MemorySink::new();
        let logger = translated_logger(sink.clone(), LevelFilter::WARN);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::info!("hidden");
            tracing::error!("shown");
        });

        assert_eq!(sink.lines(), vec!["ERROR shown"]);
    }

    #[test]
    fn test_field_kinds() {
        struct FieldsFormatter;
        impl crate::format::Formatter for FieldsFormatter {
            fn format(&self, record: &mut Record) -> Result<Vec<u8>, crate::format::FormatError> {
                Ok(serde_json::to_vec(&record.fields).unwrap())
            }
        }

        let sink = MemorySink::new();
        let logger = Arc::new(Logger::new("main", FieldsFormatter, sink.clone(), LevelFilter::TRACE));
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!(flag = true, ratio = 0.5, count = 3u64, path = ?"/tmp", "kinds");
        });

        assert_eq!(
            sink.contents(),
            r#"{"count":3,"flag":true,"path":"\"/tmp\"","ratio":0.5}"#
        );
    }

    #[test]
    fn test_raw_logger_gets_message_only() {
        let sink = MemorySink::new();
        let logger = Arc::new(Logger::new("raw", RawFormatter, sink.clone(), LevelFilter::TRACE));
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(code = "x", "verbatim");
        });

        assert_eq!(sink.contents(), "verbatim");
    }
}
