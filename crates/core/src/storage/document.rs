//! The settings document tree: defaults merging and dotted-path access.
//!
//! The in-memory document is a schema-less `serde_json` object, so keys
//! unknown to the default schema survive a load/save round trip.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::errors::SettingsError;
use crate::models::config::default_document;

/// Load the document from `path`, merged over the default schema.
///
/// A missing or unparseable file yields the pure defaults — a broken
/// settings file is never a reason the application cannot start.
pub fn load_or_default(path: &Path) -> Map<String, Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return default_document(),
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(loaded)) => {
            let mut doc = default_document();
            deep_merge(&mut doc, loaded);
            doc
        }
        Ok(_) | Err(_) => {
            warn!(
                "settings file {} is not a valid JSON object, using defaults",
                path.display()
            );
            default_document()
        }
    }
}

/// Serialize the document to `path` as pretty-printed UTF-8 JSON.
/// Non-ASCII characters are written as-is, not escaped.
pub fn write(doc: &Map<String, Value>, path: &Path) -> Result<(), SettingsError> {
    let text = serde_json::to_string_pretty(doc)
        .map_err(|e| SettingsError::Serialization(e.to_string()))?;
    fs::write(path, text)?;
    debug!("wrote settings document to {}", path.display());
    Ok(())
}

/// Recursively merge `source` into `target`.
///
/// Where both sides hold an object the merge recurses, so a partial
/// section in `source` overrides only the leaves it names. Any other
/// `source` value replaces the target value outright; keys unknown to
/// `target` are inserted as-is.
pub fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Walk `doc` along a dotted path (e.g. `"audio.sample_rate"`).
///
/// Returns `None` when any segment is missing or a non-object is reached
/// before the final segment.
#[must_use]
pub fn get_path<'a>(doc: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Assign `value` at a dotted path, creating intermediate objects as
/// needed. A non-object value sitting mid-path is replaced by an object.
pub fn set_path(doc: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = doc;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else {
            return;
        };
        current = map;
    }
    current.insert(last.to_string(), value);
}
