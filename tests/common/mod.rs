//! Shared utilities for integration testing.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tyk_log::config::LogConfig;
use tyk_log::logger::MemorySink;
use tyk_log::LoggerRegistry;

/// Registry wired to in-memory sinks, with timestamps off and a fixed
/// environment value for the level variable.
pub struct Harness {
    pub registry: LoggerRegistry,
    pub main: MemorySink,
    pub raw: MemorySink,
    level: Arc<Mutex<Option<String>>>,
}

impl Harness {
    pub fn new(level: Option<&str>) -> Self {
        Self::with_config(level, quiet_config())
    }

    pub fn with_config(level: Option<&str>, config: LogConfig) -> Self {
        let main = MemorySink::new();
        let raw = MemorySink::new();
        let level = Arc::new(Mutex::new(level.map(str::to_string)));

        let lookup = Arc::clone(&level);
        let registry = LoggerRegistry::builder()
            .config(config)
            .env_lookup(move |_| lookup.lock().unwrap().clone())
            .main_sink(main.clone())
            .raw_sink(raw.clone())
            .build();

        Self {
            registry,
            main,
            raw,
            level,
        }
    }

    /// Change what the level variable reads as from now on.
    #[allow(dead_code)]
    pub fn set_level(&self, level: Option<&str>) {
        *self.level.lock().unwrap() = level.map(str::to_string);
    }
}

/// Default configuration with timestamps disabled so output is stable.
pub fn quiet_config() -> LogConfig {
    let mut config = LogConfig::default();
    config.text.timestamps = false;
    config
}

/// Write `contents` to `name` inside a fresh temporary directory.
#[allow(dead_code)]
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
