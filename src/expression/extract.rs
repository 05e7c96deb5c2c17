use crate::core::{FieldPath, Record, Value};
use serde_json::Value as JsonValue;

/// Walk `path` through the record. `None` as soon as a segment is missing or
/// null; numeric segments index into arrays.
pub fn resolve<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a JsonValue> {
    let mut current = record.data();
    for segment in path.segments() {
        current = match current {
            JsonValue::Object(map) => map.get(segment.as_str())?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Extract the scalar behind `path`, or `Value::Null` when it does not resolve.
///
/// Embedded references such as `{ "_id": .., "name": "Acme", "email": .. }`
/// resolve to their `name`. Arrays resolve to their elements joined with
/// `", "`.
pub fn extract(record: &Record, path: &FieldPath) -> Value {
    match resolve(record, path) {
        Some(json) => display_value(json),
        None => Value::Null,
    }
}

/// Text form of the field; empty string when absent.
pub fn extract_text(record: &Record, path: &FieldPath) -> String {
    extract(record, path).to_text()
}

/// Numeric form of the field; `0.0` when absent or not numeric.
pub fn extract_number(record: &Record, path: &FieldPath) -> f64 {
    extract(record, path).as_number().unwrap_or(0.0)
}

fn display_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Object(map) => map.get("name").map(Value::from_json).unwrap_or(Value::Null),
        JsonValue::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(display_value)
                .filter(|v| !v.is_null())
                .map(|v| v.to_text())
                .collect();
            if parts.is_empty() {
                Value::Null
            } else {
                Value::Text(parts.join(", "))
            }
        }
        scalar => Value::from_json(scalar),
    }
}
