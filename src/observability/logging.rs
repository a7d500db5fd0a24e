//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Route `tracing` events through a translating logger
//! - Configure the event filter at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the default filter directive
//! - Events that pass the filter still face the logger's own threshold

use std::sync::Arc;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::logger::Logger;
use crate::observability::bridge::LoggerLayer;

/// Install the global subscriber, forwarding filtered events to `logger`.
///
/// `default_filter` is used when `RUST_LOG` is unset or invalid.
pub fn init_tracing(logger: Arc<Logger>, default_filter: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init()
}
