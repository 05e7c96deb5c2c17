use super::{Result, ViewError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// One item of a fetched collection (a transaction, a company, an API key...).
///
/// The engine never owns the canonical copy; it works on whatever snapshot the
/// record source handed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    data: JsonValue,
}

impl Record {
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    pub fn into_inner(self) -> JsonValue {
        self.data
    }

    /// Identifier read from `_id`, falling back to `id`.
    pub fn id(&self) -> Option<String> {
        let object = self.data.as_object()?;
        match object.get("_id").or_else(|| object.get("id"))? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Records must be JSON objects; anything else is skipped by the pipeline.
    pub fn is_well_formed(&self) -> bool {
        self.data.is_object()
    }
}

impl From<JsonValue> for Record {
    fn from(data: JsonValue) -> Self {
        Self::new(data)
    }
}

/// Dotted address into a record, e.g. `timestamps.created` or `items.0.sku`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn validate(&self) -> Result<()> {
        if self.raw.trim().is_empty() || self.segments.iter().any(|s| s.is_empty()) {
            return Err(ViewError::InvalidFieldPath(self.raw.clone()));
        }
        Ok(())
    }

    /// Whether the field name reads like a timestamp (`createdAt`,
    /// `timestamps.created`, `check_in_date`...).
    pub fn is_date_hint(&self) -> bool {
        let last = self.last_segment();
        let lower = last.to_lowercase();
        lower.contains("date")
            || lower.contains("time")
            || lower.contains("created")
            || lower.contains("updated")
            || last.ends_with("At")
            || lower.ends_with("_at")
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
