//! Gateway operations: each one validates its input, makes a single remote-store call and shapes the result.

use crate::config::{StockPolicy, CREATED_AT, ORDERS, ORDER_TOTAL_COLUMN};
use crate::error::{AppError, StoreError};
use crate::model::{CreatePayload, Resource};
use crate::query::{Embed, SelectQuery};
use crate::service::validation as check;
use crate::store::{RemoteStore, Row};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

pub struct GatewayService;

impl GatewayService {
    /// All rows of the resource (with its embeds), in store order. An empty table is an empty list.
    pub async fn list<R: Resource>(store: &dyn RemoteStore) -> Result<Vec<Value>, AppError> {
        let spec = R::SPEC;
        let q = SelectQuery::from_table(spec.table).embeds(spec.embeds);
        let rows = store.select(&q).await?;
        tracing::debug!(resource = spec.name, count = rows.len(), "listed");
        Ok(rows.into_iter().map(|r| shape_row(r, spec.embeds)).collect())
    }

    /// Exactly one row or an error: zero rows is not-found, several rows is a store fault.
    pub async fn get_by_id<R: Resource>(store: &dyn RemoteStore, id: i64) -> Result<Value, AppError> {
        let spec = R::SPEC;
        check::positive_id("id", id)?;
        let q = SelectQuery::from_table(spec.table).embeds(spec.embeds).eq("id", id);
        let mut rows = store.select(&q).await?;
        match rows.len() {
            0 => Err(AppError::NotFound(format!("{} {}", spec.name, id))),
            1 => Ok(shape_row(rows.remove(0), spec.embeds)),
            count => Err(StoreError::Ambiguous {
                table: spec.table.to_string(),
                count,
            }
            .into()),
        }
    }

    /// Validate, derive defaults, stamp `created_at` where the resource carries it, insert once.
    pub async fn create<R: Resource>(
        store: &dyn RemoteStore,
        mut payload: R::Payload,
        stock: &StockPolicy,
    ) -> Result<Value, AppError> {
        let spec = R::SPEC;
        payload.validate()?;
        payload.prepare(stock);
        let mut row = match serde_json::to_value(&payload) {
            Ok(Value::Object(m)) => m,
            Ok(_) => return Err(AppError::BadRequest("payload must serialize to an object".into())),
            Err(e) => return Err(AppError::BadRequest(e.to_string())),
        };
        if spec.stamp_created_at {
            row.insert(
                CREATED_AT.to_string(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
            );
        }
        let inserted = store.insert(spec.table, row).await?;
        let created = inserted.into_iter().next().ok_or_else(|| StoreError::NoRowsInserted {
            table: spec.table.to_string(),
        })?;
        tracing::info!(resource = spec.name, id = ?created.get("id"), "created");
        Ok(Value::Object(created))
    }

    /// Sum of `orders.total_price`; absent, null or non-numeric values count as zero.
    pub async fn total_revenue(store: &dyn RemoteStore) -> Result<f64, AppError> {
        let q = SelectQuery::from_table(ORDERS.table).columns(&[ORDER_TOTAL_COLUMN]);
        let rows = store.select(&q).await?;
        Ok(rows.iter().map(|r| numeric(r.get(ORDER_TOTAL_COLUMN))).sum())
    }
}

/// Parse a request body into a payload. Non-objects are malformed; shape errors are validation failures.
pub fn parse_payload<P: CreatePayload>(body: Value) -> Result<P, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

fn numeric(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Nested embeds stay as objects (or `null` when the target is missing); flattened embeds are
/// replaced by `{prefix}_{column}` fields, `null` when the target is missing.
fn shape_row(mut row: Row, embeds: &[Embed]) -> Value {
    for e in embeds {
        match e.flatten {
            Some(prefix) => {
                let nested = row.remove(e.alias);
                for col in e.columns {
                    let v = nested
                        .as_ref()
                        .and_then(|n| n.get(*col))
                        .cloned()
                        .unwrap_or(Value::Null);
                    row.insert(format!("{}_{}", prefix, col), v);
                }
            }
            None => {
                row.entry(e.alias).or_insert(Value::Null);
            }
        }
    }
    Value::Object(row)
}
