//! Human-readable line formatter.
//!
//! Lines are rendered by `tracing_subscriber::fmt`. Each record is replayed
//! as a `tracing` event into a private fmt subscriber whose writer captures
//! the line, so layout, level labels, colors and `key=value` rendering are
//! exactly those of the fmt "full" format with the target hidden:
//!
//! ```text
//! Jan 02 15:04:05  WARN gateway: User 42 was not found api_id="a1" code="user.notfound"
//! └─ timestamp ─┘ level  prefix   message                   fields (sorted)
//! ```
//!
//! The `prefix:` in front of the message is the only addition on top.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::{DateTime, Local, Utc};
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_core::callsite::Callsite;
use tracing_core::field::{display, DisplayValue, FieldSet};
use tracing_core::metadata::Kind;
use tracing_core::subscriber::Interest;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::config::TextConfig;
use crate::format::{FormatError, Formatter, Record};

const MESSAGE_FIELD: &str = "message";
const RECORD_TARGET: &str = "tyk_log";

thread_local! {
    static LINE: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
    static RECORD_TIME: Cell<Option<DateTime<Utc>>> = const { Cell::new(None) };
}

/// Default line formatter of the main logger.
#[derive(Clone)]
pub struct TextFormatter {
    prefix_field: String,
    renderer: Arc<dyn Subscriber + Send + Sync>,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        let builder = tracing_subscriber::fmt()
            .with_writer(|| LineWriter)
            .with_ansi(config.colors)
            .with_target(false)
            .with_max_level(LevelFilter::TRACE);

        let renderer: Arc<dyn Subscriber + Send + Sync> = if config.timestamps {
            Arc::new(
                builder
                    .with_timer(RecordTime {
                        format: config.timestamp_format,
                    })
                    .finish(),
            )
        } else {
            Arc::new(builder.without_time().finish())
        };

        Self {
            prefix_field: config.prefix_field,
            renderer,
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(TextConfig::default())
    }
}

impl fmt::Debug for TextFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFormatter")
            .field("prefix_field", &self.prefix_field)
            .finish_non_exhaustive()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, FormatError> {
        let message = match record.fields.get(&self.prefix_field) {
            Some(prefix) => Cow::Owned(format!("{}: {}", plain(prefix), record.message)),
            None => Cow::Borrowed(record.message.as_str()),
        };

        let mut names = vec![MESSAGE_FIELD];
        let mut args = vec![FieldArg::Text(&message)];
        for (key, value) in &record.fields {
            if *key == self.prefix_field {
                continue;
            }
            names.push(key);
            args.push(FieldArg::from_json(value));
        }

        let metadata = record_metadata(record.level, &names);
        let values: Vec<Option<&dyn tracing::Value>> =
            args.iter().map(|arg| Some(arg.as_value())).collect();
        // Values pair with the interned field names by position.
        let value_set = metadata.fields().value_set_all(&values);

        RECORD_TIME.with(|time| time.set(Some(record.time)));
        self.renderer.event(&Event::new(metadata, &value_set));
        RECORD_TIME.with(|time| time.set(None));

        Ok(LINE.with(RefCell::take))
    }
}

/// Appends to the current thread's line buffer.
struct LineWriter;

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LINE.with(|line| line.borrow_mut().extend_from_slice(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stamps lines with the record's own time, in local time.
struct RecordTime {
    format: String,
}

impl FormatTime for RecordTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let time = RECORD_TIME.with(Cell::get).unwrap_or_else(Utc::now);
        write!(w, "{}", time.with_timezone(&Local).format(&self.format))
    }
}

enum FieldArg<'a> {
    Text(&'a str),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
    Other(DisplayValue<&'a Value>),
}

impl<'a> FieldArg<'a> {
    fn from_json(value: &'a Value) -> Self {
        match value {
            Value::String(text) => FieldArg::Text(text),
            Value::Bool(flag) => FieldArg::Flag(*flag),
            Value::Number(number) => {
                if let Some(n) = number.as_i64() {
                    FieldArg::Signed(n)
                } else if let Some(n) = number.as_u64() {
                    FieldArg::Unsigned(n)
                } else {
                    number.as_f64().map_or(FieldArg::Other(display(value)), FieldArg::Float)
                }
            }
            other => FieldArg::Other(display(other)),
        }
    }

    fn as_value(&self) -> &dyn tracing::Value {
        match self {
            FieldArg::Text(text) => text,
            FieldArg::Signed(n) => n,
            FieldArg::Unsigned(n) => n,
            FieldArg::Float(n) => n,
            FieldArg::Flag(flag) => flag,
            FieldArg::Other(value) => value,
        }
    }
}

fn plain(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}

/// Identity shared by every replayed record. Never registered, so it has
/// no effect on the interest of real callsites.
struct RecordCallsite;

static RECORD_CALLSITE: RecordCallsite = RecordCallsite;

static RECORD_CALLSITE_METADATA: Metadata<'static> = Metadata::new(
    "record",
    RECORD_TARGET,
    Level::INFO,
    None,
    None,
    None,
    FieldSet::new(&[], tracing_core::identify_callsite!(&RECORD_CALLSITE)),
    Kind::EVENT,
);

impl Callsite for RecordCallsite {
    fn set_interest(&self, _interest: Interest) {}

    fn metadata(&self) -> &Metadata<'_> {
        &RECORD_CALLSITE_METADATA
    }
}

type Shape = (Level, Vec<String>);

static SHAPES: OnceLock<Mutex<HashMap<Shape, &'static Metadata<'static>>>> = OnceLock::new();

/// Event metadata for a level and field-name list, interned for the life of
/// the process. Distinct field-name sets are few in practice.
fn record_metadata(level: Level, names: &[&str]) -> &'static Metadata<'static> {
    let key: Shape = (level, names.iter().map(|name| name.to_string()).collect());
    let mut shapes = SHAPES
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    *shapes.entry(key).or_insert_with_key(|(level, names)| {
        let names: Vec<&'static str> = names.iter().map(|name| leak_str(name)).collect();
        let names: &'static [&'static str] = Box::leak(names.into_boxed_slice());
        Box::leak(Box::new(Metadata::new(
            "record",
            RECORD_TARGET,
            *level,
            None,
            None,
            None,
            FieldSet::new(names, tracing_core::identify_callsite!(&RECORD_CALLSITE)),
            Kind::EVENT,
        )))
    })
}

fn leak_str(name: &str) -> &'static str {
    Box::leak(name.to_string().into_boxed_str())
}
