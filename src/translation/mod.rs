//! Translation subsystem.
//!
//! # Data Flow
//! ```text
//! translation document (already parsed, nested)
//!     → flatten.rs (dotted-path keys, stringified leaves)
//!     → TranslationTable (immutable)
//!     → shared via Arc with the translating formatter
//!
//! On reload:
//!     new document → new table → atomic swap in the registry
//! ```
//!
//! # Design Decisions
//! - A table is never mutated after construction; reloads replace it
//! - Flattening is all-or-nothing: a malformed node fails the whole load
//! - Lookup misses are not errors

pub mod flatten;
pub mod table;

pub use flatten::{expand, flatten};
pub use table::TranslationTable;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while turning a document into a translation table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// The document holds a node that is neither a scalar nor a mapping,
    /// or its root is not a mapping.
    #[error("malformed translation document at '{path}': expected a mapping or scalar, found {found}")]
    MalformedDocument {
        /// Dotted path of the offending node (`<root>` for the document itself).
        path: String,
        /// JSON kind of the offending node.
        found: &'static str,
    },
}

impl TranslationError {
    pub(crate) fn malformed(path: &[String], value: &Value) -> Self {
        let path = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };
        TranslationError::MalformedDocument {
            path,
            found: kind_of(value),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
