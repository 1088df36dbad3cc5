use std::path::Path;

use medproto_core::models::norm_table::NormTable;
use medproto_core::models::protocol::Protocol;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

/// Version written by this build. A shape change raises it and adds the
/// matching step to [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    pub version: u32,
    pub tables: Vec<NormTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolDocument {
    pub version: u32,
    pub protocols: Vec<Protocol>,
}

/// Version of a raw document. A bare JSON array is the pre-versioned
/// export written by the browser client (version 0).
pub fn document_version(json: &Value) -> u32 {
    match json {
        Value::Array(_) => 0,
        other => other
            .get("version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32,
    }
}

/// Bring a raw document at `from_version` up to [`CURRENT_VERSION`].
/// `items_key` names the list field ("tables" or "protocols"); `path` is
/// only used in error reports.
///
/// A version-0 document must be a bare array or an object holding an
/// `items_key` array. Anything else is rejected so the caller never
/// replaces a file it does not understand.
pub fn migrate(
    json: Value,
    from_version: u32,
    items_key: &str,
    path: &Path,
) -> Result<Value, StorageError> {
    if from_version > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    let mut json = json;

    // v0 → v1: wrap the bare array and give every norm row an id.
    if from_version < 1 {
        let items = match json {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove(items_key) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(invalid(path, format!("`{items_key}` is not a list")));
                }
                None => {
                    return Err(invalid(path, format!("no `{items_key}` list and no version")));
                }
            },
            other => {
                return Err(invalid(
                    path,
                    format!("expected a list or an object, found {}", json_kind(&other)),
                ));
            }
        };

        let items = items.into_iter().map(backfill_row_ids).collect::<Vec<_>>();

        let mut doc = serde_json::Map::new();
        doc.insert("version".to_string(), Value::Number(1.into()));
        doc.insert(items_key.to_string(), Value::Array(items));
        json = Value::Object(doc);
        tracing::info!(items_key, "migrated document v0 → v1");
    }

    Ok(json)
}

fn invalid(path: &Path, reason: String) -> StorageError {
    StorageError::InvalidDocument {
        path: path.display().to_string(),
        reason,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn backfill_row_ids(mut item: Value) -> Value {
    if let Some(rows) = item.get_mut("rows").and_then(|r| r.as_array_mut()) {
        for row in rows.iter_mut().filter_map(|r| r.as_object_mut()) {
            row.entry("id")
                .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        }
    }
    item
}
