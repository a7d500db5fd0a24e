//! Translating logging facade.
//!
//! Two loggers per registry: a leveled `main` logger that renders human
//! readable lines, and a `raw` logger that writes messages verbatim. Call
//! sites attach a stable `code` field; a loaded translation table turns the
//! code into display text at format time.
//!
//! ```no_run
//! use serde_json::json;
//!
//! tyk_log::load_translations(&json!({
//!     "user": { "notfound": "User was not found" }
//! }))?;
//!
//! tyk_log::get()
//!     .with_field("code", "user.notfound")
//!     .with_field("id", 42)
//!     .warn("User 42 not found");
//! # Ok::<(), tyk_log::translation::TranslationError>(())
//! ```

pub mod config;
pub mod format;
pub mod logger;
pub mod observability;
pub mod translation;

pub use config::LogConfig;
pub use format::{Formatter, RawFormatter, Record, TextFormatter, TranslatingFormatter};
pub use logger::{get, get_raw, global, load_translations, Logger, LoggerRegistry};
pub use translation::TranslationTable;
