//! Value tree flattener
//!
//! Turns a parsed JSON document into a flat path → value mapping:
//! - Scalars are stored under their path (`true` renders as `True`)
//! - Array elements get index segments (`Items:0`, `Items:1`)
//! - Every object or array below the root is also stored as minified JSON,
//!   so `TestingPlatform:CrashDump` yields `{"Enable":true}`
//! - `null` produces no entry

use crate::types::{combine, upsert, ConfigKey, EntrySet};
use serde_json::Value;

pub fn flatten(root: &Value) -> EntrySet {
    let mut entries = EntrySet::new();
    visit(root, "", &mut entries);
    entries
}

/// Stringify a scalar the way configuration values are exposed. Numbers keep
/// the digits they were written with, so large integers are not rounded. Returns
/// `None` for `null` and for composites.
pub fn stringify_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn visit(value: &Value, prefix: &str, entries: &mut EntrySet) {
    match value {
        Value::Object(map) => {
            record_subtree(value, prefix, entries);
            for (name, child) in map {
                if name.is_empty() {
                    continue;
                }
                visit(child, &combine(prefix, name), entries);
            }
        }
        Value::Array(items) => {
            record_subtree(value, prefix, entries);
            for (index, child) in items.iter().enumerate() {
                visit(child, &combine(prefix, &index.to_string()), entries);
            }
        }
        scalar => {
            if prefix.is_empty() {
                return;
            }
            if let Some(text) = stringify_scalar(scalar) {
                upsert(entries, ConfigKey::new(prefix), text);
            }
        }
    }
}

fn record_subtree(value: &Value, prefix: &str, entries: &mut EntrySet) {
    if prefix.is_empty() {
        return;
    }
    // Serializing a `Value` only fails for non-string map keys, which JSON
    // objects cannot have.
    if let Ok(text) = serde_json::to_string(value) {
        upsert(entries, ConfigKey::new(prefix), text);
    }
}
