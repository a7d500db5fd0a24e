//! Logger handle and entry builder.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use serde_json::Value;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::format::{Fields, FormatError, Formatter, Record};
use crate::logger::level;

/// Error returned when a record could not be emitted.
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to write log line: {0}")]
    Write(#[source] std::io::Error),
}

/// A named logger: one threshold, one formatter, one sink.
///
/// The threshold and the formatter can be changed while other threads log;
/// each record sees one consistent formatter snapshot.
pub struct Logger {
    name: String,
    level: AtomicU8,
    formatter: ArcSwap<Box<dyn Formatter>>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    pub fn new<F, W>(name: impl Into<String>, formatter: F, sink: W, level: LevelFilter) -> Self
    where
        F: Formatter + 'static,
        W: Write + Send + 'static,
    {
        let formatter: Box<dyn Formatter> = Box::new(formatter);
        let sink: Box<dyn Write + Send> = Box::new(sink);
        Self {
            name: name.into(),
            level: AtomicU8::new(level::to_u8(level)),
            formatter: ArcSwap::from_pointee(formatter),
            sink: Mutex::new(sink),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current severity threshold.
    pub fn level(&self) -> LevelFilter {
        level::from_u8(self.level.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.level.store(level::to_u8(level), Ordering::Release);
    }

    /// Whether a record at `level` passes the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level()
    }

    /// Replace the formatter. Records already being formatted finish with
    /// the previous one.
    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        let formatter: Box<dyn Formatter> = Box::new(formatter);
        self.formatter.store(Arc::new(formatter));
    }

    /// Replace the sink.
    pub fn set_sink<W: Write + Send + 'static>(&self, sink: W) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Box::new(sink);
    }

    /// Format and write a record if its level passes the threshold.
    pub fn log(&self, mut record: Record) -> Result<(), LogError> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let formatter = self.formatter.load();
        let bytes = formatter.format(&mut record)?;

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(&bytes).map_err(LogError::Write)?;
        sink.flush().map_err(LogError::Write)
    }

    /// Start an entry with no fields.
    pub fn entry(&self) -> Entry<'_> {
        Entry {
            logger: self,
            fields: Fields::new(),
        }
    }

    /// Start an entry carrying one field.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry<'_> {
        self.entry().with_field(key, value)
    }

    /// Start an entry carrying several fields.
    pub fn with_fields(&self, fields: Fields) -> Entry<'_> {
        Entry {
            logger: self,
            fields,
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.entry().error(message)
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.entry().warn(message)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.entry().info(message)
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.entry().debug(message)
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.entry().trace(message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Fields collected for one log call.
///
/// Emitting never fails the caller: a formatting or write error is reported
/// on stderr and the entry is dropped.
#[derive(Debug)]
pub struct Entry<'a> {
    logger: &'a Logger,
    fields: Fields,
}

impl<'a> Entry<'a> {
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Emit the entry at `level`.
    pub fn log(self, level: Level, message: impl Into<String>) {
        let mut record = Record::new(level, message);
        record.fields = self.fields;

        if let Err(e) = self.logger.log(record) {
            // Not tracing::error!: the tracing bridge may feed this same logger.
            eprintln!("Failed to emit log entry on '{}' logger: {}", self.logger.name, e);
        }
    }

    pub fn error(self, message: impl Into<String>) {
        self.log(Level::ERROR, message)
    }

    pub fn warn(self, message: impl Into<String>) {
        self.log(Level::WARN, message)
    }

    pub fn info(self, message: impl Into<String>) {
        self.log(Level::INFO, message)
    }

    pub fn debug(self, message: impl Into<String>) {
        self.log(Level::DEBUG, message)
    }

    pub fn trace(self, message: impl Into<String>) {
        self.log(Level::TRACE, message)
    }
}
