//! Remote store seam. Every gateway operation is one call through [`RemoteStore`].

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::StoreError;
use crate::query::SelectQuery;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Rows matching `query`, in the order the store returns them.
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError>;

    /// Insert one row; returns the rows the store reports as inserted (ids assigned by the store).
    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Convert a decoded JSON array into rows; anything else is a malformed response.
pub(crate) fn rows_from_json(value: Value) -> Result<Vec<Row>, StoreError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(m) => Ok(m),
                other => Err(StoreError::Decode(format!("expected row object, got {}", other))),
            })
            .collect(),
        Value::Object(m) => Ok(vec![m]),
        other => Err(StoreError::Decode(format!("expected array of rows, got {}", other))),
    }
}
