//! Logger subsystem.
//!
//! # Data Flow
//! ```text
//! call site (message + fields, e.g. code = "user.notfound")
//!     → Logger (threshold check)
//!     → formatter snapshot (TranslatingFormatter → TextFormatter | RawFormatter)
//!     → sink (stderr, stdout, memory)
//! ```
//!
//! # Design Decisions
//! - Registries are plain values; the global one is only a default instance
//! - The main threshold is re-resolved from the environment on every fetch
//! - Formatter and table swaps are atomic (`arc-swap`); readers never see a
//!   half-applied reload
//! - Emitting an entry never fails the caller

pub mod level;
#[allow(clippy::module_inception)]
pub mod logger;
pub mod registry;
pub mod sink;

pub use level::{resolve_level, LEVEL_ENV};
pub use logger::{Entry, LogError, Logger};
pub use registry::{get, get_raw, global, load_translations, EnvLookup, LoggerRegistry, RegistryBuilder};
pub use sink::MemorySink;
