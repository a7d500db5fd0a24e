//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tracing events (this crate and its host application)
//!     → logging.rs (EnvFilter, global subscriber)
//!     → bridge.rs (event → Record)
//!     → main Logger (threshold, translation, sink)
//! ```
//!
//! # Design Decisions
//! - `tracing` macros stay the way code logs; the bridge gives them codes
//!   and translations for free
//! - The bridge never fails the emitting call site

pub mod bridge;
pub mod logging;

pub use bridge::LoggerLayer;
pub use logging::init_tracing;
