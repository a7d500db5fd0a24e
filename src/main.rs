//! tyk-log command line.
//!
//! # Commands
//! - `flatten <file>`: print the dotted-path table a translation file produces
//! - `emit`: render one record through the main logger
//! - `raw <message>`: write a message through the raw logger
//! - `watch [file]`: keep a translation file loaded, reporting every reload
//!
//! The process's own diagnostics go through the main logger as well, via
//! the tracing bridge.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::Level;

use tyk_log::config::{
    load_config, load_document, watch_configured, LogConfig, ReloadEvent, TranslationWatcher,
};
use tyk_log::format::CODE_FIELD;
use tyk_log::observability::init_tracing;
use tyk_log::{LoggerRegistry, TranslationTable};

#[derive(Parser)]
#[command(name = "tyk-log")]
#[command(about = "Render, inspect and hot-reload translated log output", long_about = None)]
struct Cli {
    /// Logger configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the flattened form of a translation document
    Flatten { file: PathBuf },
    /// Render one record through the main logger
    Emit {
        /// Translation file to load first
        #[arg(short, long)]
        translations: Option<PathBuf>,

        /// Message code looked up in the translations
        #[arg(long)]
        code: Option<String>,

        #[arg(short, long, default_value = "info")]
        level: Level,

        /// Extra field as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,

        /// Literal message, used when no translation applies
        message: String,
    },
    /// Write a message through the raw logger
    Raw { message: String },
    /// Load a translation file and reload it whenever it changes
    Watch { file: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    let registry = Arc::new(LoggerRegistry::from_config(&config)?);
    init_tracing(registry.main_logger(), "tyk_log=info")?;

    match cli.command {
        Commands::Flatten { file } => {
            let table = TranslationTable::from_document(&load_document(&file)?)?;
            for (code, text) in table.sorted() {
                println!("{} = {}", code, text);
            }
        }
        Commands::Emit {
            translations,
            code,
            level,
            fields,
            message,
        } => {
            if let Some(path) = translations {
                registry.load_translations_from_path(&path)?;
            }

            let logger = registry.main_logger();
            let mut entry = logger.entry();
            if let Some(code) = code {
                entry = entry.with_field(CODE_FIELD, code);
            }
            for (key, value) in fields {
                entry = entry.with_field(key, value);
            }
            entry.log(level, message);
        }
        Commands::Raw { message } => registry.raw_logger().info(message),
        Commands::Watch { file } => {
            let (watcher, updates) = match file {
                Some(path) => {
                    let (watcher, updates) = TranslationWatcher::new(&path, Arc::clone(&registry));
                    watcher.reload();
                    (watcher.run()?, updates)
                }
                None => watch_configured(&config, &registry)?.ok_or(
                    "nothing to watch: pass a file or set translations.path and translations.watch",
                )?,
            };

            report_reloads(updates).await;
            drop(watcher);
            tracing::info!("Watcher stopped");
        }
    }

    Ok(())
}

async fn report_reloads(mut updates: mpsc::UnboundedReceiver<ReloadEvent>) {
    loop {
        tokio::select! {
            event = updates.recv() => match event {
                Some(ReloadEvent::Loaded { entries }) => {
                    tracing::info!(entries, "Translations active");
                }
                Some(ReloadEvent::Failed { error }) => {
                    tracing::warn!(%error, "Reload rejected, previous translations kept");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

/// Parse `key=value`; the value is read as JSON when it parses, else kept as text.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("id=42").unwrap(), ("id".to_string(), Value::from(42)));
        assert_eq!(
            parse_field("api_id=a1b2").unwrap(),
            ("api_id".to_string(), Value::from("a1b2"))
        );
        assert_eq!(
            parse_field("expr=a=b").unwrap(),
            ("expr".to_string(), Value::from("a=b"))
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_cli_parses_emit() {
        let cli = Cli::try_parse_from([
            "tyk-log", "emit", "--code", "user.notfound", "-l", "warn", "-f", "id=7", "literal",
        ])
        .unwrap();

        match cli.command {
            Commands::Emit { code, level, fields, message, .. } => {
                assert_eq!(code.as_deref(), Some("user.notfound"));
                assert_eq!(level, Level::WARN);
                assert_eq!(fields, vec![("id".to_string(), Value::from(7))]);
                assert_eq!(message, "literal");
            }
            _ => panic!("expected emit"),
        }
    }
}
