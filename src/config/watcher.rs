//! Translation file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::schema::LogConfig;
use crate::logger::LoggerRegistry;

/// Error starting the file watcher.
#[derive(Debug, Error)]
#[error("failed to watch translation file: {0}")]
pub struct WatchError(#[from] notify::Error);

/// Outcome of one reload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadEvent {
    /// The new table is active.
    Loaded { entries: usize },
    /// The file could not be loaded; the previous table is still active.
    Failed { error: String },
}

/// A watcher that monitors a translation file and reloads it into a registry.
pub struct TranslationWatcher {
    path: PathBuf,
    registry: Arc<LoggerRegistry>,
    update_tx: mpsc::UnboundedSender<ReloadEvent>,
}

impl TranslationWatcher {
    /// Create a new TranslationWatcher.
    ///
    /// Returns the watcher and a receiver for reload outcomes.
    pub fn new(
        path: &Path,
        registry: Arc<LoggerRegistry>,
    ) -> (Self, mpsc::UnboundedReceiver<ReloadEvent>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                registry,
                update_tx,
            },
            update_rx,
        )
    }

    /// Reload the file now and report the outcome on the channel.
    pub fn reload(&self) -> ReloadEvent {
        let event = reload(&self.path, &self.registry);
        let _ = self.update_tx.send(event.clone());
        event
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, WatchError> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let registry = Arc::clone(&self.registry);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Translation file change detected, reloading");
                        let _ = tx.send(reload(&path, &registry));
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Translation watcher started");
        Ok(watcher)
    }
}

/// Start watching the configured translation file when `translations.watch`
/// is enabled. The registry is expected to hold the initial load already.
pub fn watch_configured(
    config: &LogConfig,
    registry: &Arc<LoggerRegistry>,
) -> Result<Option<(RecommendedWatcher, mpsc::UnboundedReceiver<ReloadEvent>)>, WatchError> {
    let Some(path) = config
        .translations
        .path
        .as_deref()
        .filter(|_| config.translations.watch)
    else {
        return Ok(None);
    };

    let (watcher, updates) = TranslationWatcher::new(path, Arc::clone(registry));
    Ok(Some((watcher.run()?, updates)))
}

fn reload(path: &Path, registry: &LoggerRegistry) -> ReloadEvent {
    match registry.load_translations_from_path(path) {
        Ok(table) => ReloadEvent::Loaded {
            entries: table.len(),
        },
        Err(e) => {
            tracing::error!(
                "Failed to reload translations: {}. Keeping current translations.",
                e
            );
            ReloadEvent::Failed {
                error: e.to_string(),
            }
        }
    }
}
