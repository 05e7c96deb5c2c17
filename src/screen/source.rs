use crate::core::{Record, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// One fetched snapshot. `total_count` is whatever the backend reported and
/// is informational only; the engine counts the items it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResponse {
    pub items: Vec<Record>,
    pub total_count: Option<usize>,
}

impl FetchResponse {
    pub fn new(items: Vec<Record>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    /// Accepts a bare array of records or an `{ "items": [...], "totalCount": n }`
    /// envelope.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(match serde_json::from_str::<FetchPayload>(json)? {
            FetchPayload::Bare(items) => Self::new(items),
            FetchPayload::Envelope { items, total_count } => Self { items, total_count },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FetchPayload {
    Bare(Vec<Record>),
    Envelope {
        items: Vec<Record>,
        #[serde(rename = "totalCount", default)]
        total_count: Option<usize>,
    },
}

/// Backend collaborator producing record snapshots.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchResponse>;
}

/// Serves a fixed list; useful for tests and for data already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<Record>,
}

impl StaticSource {
    pub fn new(items: Vec<Record>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> Result<FetchResponse> {
        Ok(FetchResponse::new(self.items.clone()))
    }
}

/// Reads a JSON export from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self) -> Result<FetchResponse> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        FetchResponse::from_json_str(&json)
    }
}
