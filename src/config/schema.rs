//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the logger
//! registry. All types derive Serde traits for deserialization from config files.

use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logger::level::LEVEL_ENV;

/// Root configuration for the logger registry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Environment variable consulted for the main logger's level.
    pub level_env: String,

    /// Line rendering settings for the main logger.
    pub text: TextConfig,

    /// Where each logger writes.
    pub output: OutputConfig,

    /// Translation document source.
    pub translations: TranslationsConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_env: LEVEL_ENV.to_string(),
            text: TextConfig::default(),
            output: OutputConfig::default(),
            translations: TranslationsConfig::default(),
        }
    }
}

/// Line rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Prefix each line with a timestamp.
    pub timestamps: bool,

    /// chrono format string for the timestamp.
    pub timestamp_format: String,

    /// Colorize level labels with ANSI escapes.
    pub colors: bool,

    /// Field rendered as `value:` in front of the message instead of as `key=value`.
    pub prefix_field: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            timestamps: true,
            timestamp_format: "%b %d %H:%M:%S".to_string(),
            colors: false,
            prefix_field: "prefix".to_string(),
        }
    }
}

/// Output stream selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stderr,
    Stdout,
}

impl Output {
    /// Open a writer for this stream.
    pub fn writer(self) -> Box<dyn Write + Send> {
        match self {
            Output::Stderr => Box::new(std::io::stderr()),
            Output::Stdout => Box::new(std::io::stdout()),
        }
    }
}

/// Per-logger output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Stream for the main (formatted) logger.
    pub main: Output,

    /// Stream for the raw logger.
    pub raw: Output,
}

/// Translation source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Translation file (`.json` or `.toml`) loaded at startup.
    pub path: Option<PathBuf>,

    /// Reload the file whenever it changes.
    pub watch: bool,
}
