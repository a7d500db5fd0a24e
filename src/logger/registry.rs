//! Registry owning the main and raw loggers and the active translations.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use arc_swap::ArcSwap;
use serde_json::Value;
use tracing::level_filters::LevelFilter;

use crate::config::{load_document, ConfigError, LogConfig, TextConfig};
use crate::format::{RawFormatter, TextFormatter, TranslatingFormatter};
use crate::logger::level::resolve_level;
use crate::logger::Logger;
use crate::translation::{TranslationError, TranslationTable};

/// Looks up an environment variable by name.
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Holds the two loggers of a process (or of a test).
///
/// * `main` renders through [`TextFormatter`], wrapped in a
///   [`TranslatingFormatter`] once translations are loaded. Its threshold is
///   re-read from the environment on every [`main_logger`](Self::main_logger) call.
/// * `raw` renders through [`RawFormatter`] and lets every level through.
pub struct LoggerRegistry {
    main: Arc<Logger>,
    raw: Arc<Logger>,
    translations: ArcSwap<TranslationTable>,
    /// Held across the table store and the formatter rebind.
    reload: Mutex<()>,
    text: TextConfig,
    level_env: String,
    env: EnvLookup,
}

impl LoggerRegistry {
    /// Registry with default configuration, reading the real environment.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from configuration and load the configured
    /// translation file, if any.
    pub fn from_config(config: &LogConfig) -> Result<Self, ConfigError> {
        let registry = Self::builder().config(config.clone()).build();
        if let Some(path) = &config.translations.path {
            registry.load_translations_from_path(path)?;
        }
        Ok(registry)
    }

    /// Replace the translation table with the flattened `doc` and bind the
    /// main logger's formatter to it.
    ///
    /// Nothing changes if `doc` is malformed.
    pub fn load_translations(&self, doc: &Value) -> Result<Arc<TranslationTable>, TranslationError> {
        let table = Arc::new(TranslationTable::from_document(doc)?);
        let formatter = TranslatingFormatter::new(TextFormatter::new(self.text.clone()), Arc::clone(&table));

        {
            let _reload = self.reload.lock().unwrap_or_else(PoisonError::into_inner);
            self.translations.store(Arc::clone(&table));
            self.main.set_formatter(formatter);
        }

        tracing::debug!(entries = table.len(), "Translations loaded");
        Ok(table)
    }

    /// Read a translation file and load it.
    pub fn load_translations_from_path(
        &self,
        path: &Path,
    ) -> Result<Arc<TranslationTable>, ConfigError> {
        let doc = load_document(path)?;
        Ok(self.load_translations(&doc)?)
    }

    /// The current translation table.
    pub fn translations(&self) -> Arc<TranslationTable> {
        self.translations.load_full()
    }

    /// The main logger, with its threshold refreshed from the environment.
    ///
    /// The logger is shared: the threshold set here stays in effect for
    /// every holder until the next call.
    pub fn main_logger(&self) -> Arc<Logger> {
        let value = (self.env)(&self.level_env);
        self.main.set_level(resolve_level(value.as_deref()));
        Arc::clone(&self.main)
    }

    /// The raw logger.
    pub fn raw_logger(&self) -> Arc<Logger> {
        Arc::clone(&self.raw)
    }

    /// Name of the environment variable consulted by [`main_logger`](Self::main_logger).
    pub fn level_env(&self) -> &str {
        &self.level_env
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("main", &self.main)
            .field("raw", &self.raw)
            .field("translations", &self.translations.load().len())
            .field("level_env", &self.level_env)
            .finish_non_exhaustive()
    }
}

/// Builder for [`LoggerRegistry`] with injectable environment and sinks.
#[derive(Default)]
pub struct RegistryBuilder {
    config: LogConfig,
    env: Option<EnvLookup>,
    main_sink: Option<Box<dyn Write + Send>>,
    raw_sink: Option<Box<dyn Write + Send>>,
}

impl RegistryBuilder {
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the environment lookup used for level selection.
    pub fn env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Some(Box::new(lookup));
        self
    }

    /// Write main logger output here instead of the configured stream.
    pub fn main_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.main_sink = Some(Box::new(sink));
        self
    }

    /// Write raw logger output here instead of the configured stream.
    pub fn raw_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.raw_sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> LoggerRegistry {
        let RegistryBuilder {
            config,
            env,
            main_sink,
            raw_sink,
        } = self;

        let main_sink = main_sink.unwrap_or_else(|| config.output.main.writer());
        let raw_sink = raw_sink.unwrap_or_else(|| config.output.raw.writer());

        let main = Logger::new(
            "main",
            TextFormatter::new(config.text.clone()),
            main_sink,
            LevelFilter::INFO,
        );
        let raw = Logger::new("raw", RawFormatter, raw_sink, LevelFilter::TRACE);
        let env: EnvLookup = match env {
            Some(lookup) => lookup,
            None => Box::new(process_env),
        };

        LoggerRegistry {
            main: Arc::new(main),
            raw: Arc::new(raw),
            translations: ArcSwap::from_pointee(TranslationTable::new()),
            reload: Mutex::new(()),
            text: config.text,
            level_env: config.level_env,
            env,
        }
    }
}

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

/// Process-wide default registry, created on first use.
pub fn global() -> &'static LoggerRegistry {
    GLOBAL.get_or_init(LoggerRegistry::new)
}

/// Main logger of the global registry.
pub fn get() -> Arc<Logger> {
    global().main_logger()
}

/// Raw logger of the global registry.
pub fn get_raw() -> Arc<Logger> {
    global().raw_logger()
}

/// Load translations into the global registry.
pub fn load_translations(doc: &Value) -> Result<Arc<TranslationTable>, TranslationError> {
    global().load_translations(doc)
}
