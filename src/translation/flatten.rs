//! Flattening of nested translation documents.
//!
//! ```text
//! {"user": {"notfound": "User {{id}} was not found", "retries": 3}}
//!     → user.notfound = "User {{id}} was not found"
//!     → user.retries  = "3"
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::translation::TranslationError;

/// Separator placed between path segments.
pub const SEPARATOR: char = '.';

/// Flatten a nested document into `dotted.path → text` pairs.
///
/// The root must be a mapping. Leaves are strings, numbers or booleans;
/// `null` and arrays are rejected with [`TranslationError::MalformedDocument`].
/// When two paths collapse onto the same key the later one in traversal
/// order wins.
pub fn flatten(doc: &Value) -> Result<HashMap<String, String>, TranslationError> {
    let Value::Object(root) = doc else {
        return Err(TranslationError::malformed(&[], doc));
    };

    let mut result = HashMap::new();
    let mut prefix = Vec::new();
    flatten_map(root, &mut prefix, &mut result)?;
    Ok(result)
}

fn flatten_map(
    map: &Map<String, Value>,
    prefix: &mut Vec<String>,
    out: &mut HashMap<String, String>,
) -> Result<(), TranslationError> {
    for (key, value) in map {
        prefix.push(key.clone());
        flatten_value(value, prefix, out)?;
        prefix.pop();
    }
    Ok(())
}

fn flatten_value(
    value: &Value,
    prefix: &mut Vec<String>,
    out: &mut HashMap<String, String>,
) -> Result<(), TranslationError> {
    match value {
        Value::Object(map) => flatten_map(map, prefix, out),
        Value::String(text) => {
            out.insert(join(prefix), text.clone());
            Ok(())
        }
        Value::Number(number) => {
            out.insert(join(prefix), number.to_string());
            Ok(())
        }
        Value::Bool(flag) => {
            out.insert(join(prefix), flag.to_string());
            Ok(())
        }
        Value::Null | Value::Array(_) => Err(TranslationError::malformed(prefix, value)),
    }
}

fn join(prefix: &[String]) -> String {
    prefix.join(&SEPARATOR.to_string())
}

/// Rebuild a nested document from flattened pairs.
///
/// Every leaf comes back as a string. If a key is both a leaf and the prefix
/// of another key, the nested mapping is kept.
pub fn expand(flat: &HashMap<String, String>) -> Value {
    let mut root = Map::new();
    for (key, value) in flat {
        let segments: Vec<&str> = key.split(SEPARATOR).collect();
        insert_path(&mut root, &segments, value);
    }
    Value::Object(root)
}

fn insert_path(node: &mut Map<String, Value>, segments: &[&str], value: &str) {
    match segments {
        [] => {}
        [leaf] => {
            if !matches!(node.get(*leaf), Some(Value::Object(_))) {
                node.insert((*leaf).to_string(), Value::String(value.to_string()));
            }
        }
        [head, rest @ ..] => {
            let child = node
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                insert_path(map, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document() {
        let flat = flatten(&json!({})).unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn test_nested_paths_are_dotted() {
        let doc = json!({
            "user": {
                "notfound": "User {{id}} was not found",
                "session": { "expired": "Session expired" }
            },
            "ready": "Gateway ready"
        });

        let flat = flatten(&doc).unwrap();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["user.notfound"], "User {{id}} was not found");
        assert_eq!(flat["user.session.expired"], "Session expired");
        assert_eq!(flat["ready"], "Gateway ready");
    }

    #[test]
    fn test_flat_document_is_unchanged() {
        let doc = json!({ "a": "one", "b": "two" });
        let flat = flatten(&doc).unwrap();

        let expected: HashMap<String, String> = [("a", "one"), ("b", "two")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_scalars_are_stringified() {
        let doc = json!({ "limits": { "max": 10, "ratio": 0.5, "strict": true, "neg": -3 } });
        let flat = flatten(&doc).unwrap();

        assert_eq!(flat["limits.max"], "10");
        assert_eq!(flat["limits.ratio"], "0.5");
        assert_eq!(flat["limits.strict"], "true");
        assert_eq!(flat["limits.neg"], "-3");
    }

    #[test]
    fn test_empty_nested_mapping_adds_nothing() {
        let doc = json!({ "empty": {}, "kept": "yes" });
        let flat = flatten(&doc).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["kept"], "yes");
    }

    #[test]
    fn test_null_leaf_is_malformed() {
        let doc = json!({ "user": { "notfound": null } });
        let err = flatten(&doc).unwrap_err();
        assert_eq!(
            err,
            TranslationError::MalformedDocument {
                path: "user.notfound".to_string(),
                found: "null",
            }
        );
    }

    #[test]
    fn test_array_is_malformed() {
        let doc = json!({ "codes": ["a", "b"] });
        let err = flatten(&doc).unwrap_err();
        assert!(matches!(
            err,
            TranslationError::MalformedDocument { ref path, found: "array" } if path == "codes"
        ));
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = flatten(&json!("just text")).unwrap_err();
        assert_eq!(
            err,
            TranslationError::MalformedDocument {
                path: "<root>".to_string(),
                found: "string",
            }
        );
        assert!(err.to_string().contains("<root>"));
    }

    #[test]
    fn test_colliding_paths_keep_one_entry() {
        let doc = json!({ "a": { "b": "nested" }, "a.b": "literal" });
        let flat = flatten(&doc).unwrap();

        assert_eq!(flat.len(), 1);
        assert!(flat["a.b"] == "nested" || flat["a.b"] == "literal");
    }

    #[test]
    fn test_expand_round_trip() {
        let doc = json!({
            "user": {
                "notfound": "User {{id}} was not found",
                "banned": "User banned",
                "session": { "expired": "Session expired" }
            },
            "ready": "Gateway ready"
        });

        let flat = flatten(&doc).unwrap();
        assert_eq!(expand(&flat), doc);
    }

    #[test]
    fn test_expand_round_trip_stringifies_scalars() {
        let doc = json!({ "limits": { "max": 10, "strict": false } });
        let flat = flatten(&doc).unwrap();

        assert_eq!(
            expand(&flat),
            json!({ "limits": { "max": "10", "strict": "false" } })
        );
    }

    #[test]
    fn test_expand_prefers_nested_mapping() {
        let flat: HashMap<String, String> = [("a", "leaf"), ("a.b", "nested")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(expand(&flat), json!({ "a": { "b": "nested" } }));
    }
}
