//! Severity threshold selection.

use tracing::level_filters::LevelFilter;

/// Default environment variable holding the main logger's level.
pub const LEVEL_ENV: &str = "TYK_LOGLEVEL";

/// Map a level setting to a threshold.
///
/// Matching is case-insensitive. `error`, `warn` and `debug` are recognized;
/// anything else, including an empty or missing value, selects `info`.
pub fn resolve_level(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("error") => LevelFilter::ERROR,
        Some("warn") => LevelFilter::WARN,
        Some("debug") => LevelFilter::DEBUG,
        _ => LevelFilter::INFO,
    }
}

pub(crate) fn to_u8(filter: LevelFilter) -> u8 {
    match filter {
        LevelFilter::OFF => 0,
        LevelFilter::ERROR => 1,
        LevelFilter::WARN => 2,
        LevelFilter::INFO => 3,
        LevelFilter::DEBUG => 4,
        _ => 5,
    }
}

pub(crate) fn from_u8(value: u8) -> LevelFilter {
    match value {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
