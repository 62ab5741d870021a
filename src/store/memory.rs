//! In-process store with the same observable behavior as the hosted one: store-assigned
//! sequential ids, insertion-ordered reads, equality filters and id-based embeds.

use crate::error::StoreError;
use crate::query::{Embed, FilterValue, SelectQuery};
use crate::store::{RemoteStore, Row};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows verbatim (ids included), e.g. to model rows written by other clients.
    pub fn seed(&self, table: &str, rows: Vec<Row>) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let t = tables.entry(table.to_string()).or_default();
        for row in rows {
            if let Some(id) = row.get("id").and_then(Value::as_i64) {
                t.next_id = t.next_id.max(id);
            }
            t.rows.push(row);
        }
    }

    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

fn project(row: &Row, columns: &[&str]) -> Row {
    if columns.is_empty() || columns.contains(&"*") {
        return row.clone();
    }
    columns
        .iter()
        .filter_map(|c| row.get(*c).map(|v| (c.to_string(), v.clone())))
        .collect()
}

/// The referenced row's selected columns, or `null` when the reference is unset or dangling.
fn resolve_embed(tables: &HashMap<String, Table>, row: &Row, embed: &Embed) -> Value {
    let target = row.get(embed.foreign_key).filter(|v| !v.is_null()).and_then(|fk| {
        let wanted = FilterValue::from_json(fk);
        tables
            .get(embed.table)
            .and_then(|t| t.rows.iter().find(|r| wanted.matches(r.get("id"))))
    });
    match target {
        Some(r) => Value::Object(project(r, embed.columns)),
        None => Value::Null,
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let Some(table) = tables.get(query.table) else {
            return Ok(Vec::new());
        };
        let filters: Vec<(&str, FilterValue)> = query
            .filters
            .iter()
            .map(|f| (f.column, FilterValue::from_json(&f.value)))
            .collect();
        let rows = table
            .rows
            .iter()
            .filter(|r| filters.iter().all(|(col, want)| want.matches(r.get(*col))))
            .map(|r| {
                let mut out = project(r, &query.columns);
                for embed in &query.embeds {
                    out.insert(embed.alias.to_string(), resolve_embed(&tables, r, embed));
                }
                out
            })
            .collect();
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Vec<Row>, StoreError> {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        let t = tables.entry(table.to_string()).or_default();
        t.next_id += 1;
        row.insert("id".to_string(), Value::from(t.next_id));
        t.rows.push(row.clone());
        Ok(vec![row])
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
