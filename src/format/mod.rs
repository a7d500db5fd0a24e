//! Record formatting.
//!
//! # Data Flow
//! ```text
//! Record
//!     → TranslatingFormatter (code field → translated message)
//!     → TextFormatter (timestamp, level, prefix, message, key=value fields)
//!     → bytes for the sink
//!
//! Record
//!     → RawFormatter (message only)
//!     → bytes for the sink
//! ```
//!
//! # Design Decisions
//! - One small trait; decorators own the formatter they wrap
//! - Formatters may rewrite the record in place (it lives for one call)
//! - A missing translation never turns into an error

pub mod raw;
pub mod record;
pub mod text;
pub mod translating;

pub use raw::RawFormatter;
pub use record::{Fields, Record, CODE_FIELD};
pub use text::TextFormatter;
pub use translating::TranslatingFormatter;

use thiserror::Error;

/// Error raised while rendering a record.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error while formatting: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatting failed (invalid timestamp format?)")]
    Fmt(#[from] std::fmt::Error),
}

/// Renders a record into the bytes written to a sink.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, FormatError>;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, FormatError> {
        (**self).format(record)
    }
}
