//! Shared helpers: build the full application over an in-process store and drive it with oneshot requests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use invenflow_gateway::query::SelectQuery;
use invenflow_gateway::store::Row;
use invenflow_gateway::{build_app, AppState, GatewayConfig, MemoryStore, RemoteStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub const ORIGIN: &str = "http://localhost:8080";

pub type App = NormalizePath<Router>;

pub fn test_config() -> GatewayConfig {
    GatewayConfig::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("http://store.invalid".into()),
        "SUPABASE_KEY" => Some("test-key".into()),
        "ALLOWED_ORIGIN" => Some(ORIGIN.into()),
        _ => None,
    })
    .expect("test config")
}

pub fn app_with(store: Arc<dyn RemoteStore>) -> App {
    let config = test_config();
    build_app(AppState::new(store, config.stock), &config)
}

/// Fresh app plus a handle on its store for seeding and inspection.
pub fn setup() -> (App, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with(store.clone()), store)
}

/// Store that fails every call, as an unreachable or misbehaving remote would.
pub struct FailingStore;

#[async_trait]
impl RemoteStore for FailingStore {
    async fn select(&self, _query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: "upstream connect error".into(),
        })
    }

    async fn insert(&self, _table: &str, _row: Row) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: "upstream connect error".into(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: "upstream connect error".into(),
        })
    }
}

/// Store whose inserts report zero rows.
pub struct SilentInsertStore;

#[async_trait]
impl RemoteStore for SilentInsertStore {
    async fn select(&self, _query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, _row: Row) -> Result<Vec<Row>, StoreError> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub fn row(v: Value) -> Row {
    match v {
        Value::Object(m) => m,
        other => panic!("not an object: {other}"),
    }
}

pub async fn get(app: &App, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &App, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &App, uri: &str, body: String) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn send(app: &App, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
