//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig (validated, immutable)
//!     → LoggerRegistry::from_config
//!
//! translation file (JSON/TOML)
//!     → loader.rs (parse into a nested document)
//!     → LoggerRegistry::load_translations
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new document
//!     → registry flattens and atomically swaps the table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A failed translation reload keeps the current table

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_document, ConfigError};
pub use schema::{LogConfig, Output, OutputConfig, TextConfig, TranslationsConfig};
pub use watcher::{watch_configured, ReloadEvent, TranslationWatcher, WatchError};
