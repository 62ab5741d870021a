//! HTTP client for a hosted PostgREST endpoint (`{url}/rest/v1/{table}`).

use crate::config::{StoreCredentials, SUPABASE_KEY};
use crate::error::{AppError, ConfigError, StoreError};
use crate::query::SelectQuery;
use crate::store::{rows_from_json, RemoteStore, Row};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Response, Url};
use serde_json::Value;

const REST_PREFIX: &str = "rest/v1/";

/// One long-lived client shared by every request; reqwest pools connections internally.
#[derive(Clone, Debug)]
pub struct RestStore {
    client: reqwest::Client,
    base: Url,
}

impl RestStore {
    pub fn new(credentials: &StoreCredentials) -> Result<Self, AppError> {
        let key_header = |raw: &str| {
            let mut v = HeaderValue::from_str(raw).map_err(|e| ConfigError::InvalidValue {
                var: SUPABASE_KEY,
                reason: e.to_string(),
            })?;
            v.set_sensitive(true);
            Ok::<_, ConfigError>(v)
        };
        let mut headers = HeaderMap::new();
        headers.insert("apikey", key_header(&credentials.key)?);
        headers.insert(AUTHORIZATION, key_header(&format!("Bearer {}", credentials.key))?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(StoreError::from)?;
        Ok(RestStore {
            client,
            base: credentials.url.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base
            .join(&format!("{}{}", REST_PREFIX, table))
            .map_err(|e| StoreError::Decode(format!("invalid table path '{}': {}", table, e)))
    }

    /// Success bodies are decoded as JSON; error bodies surface the store's `message` when present.
    async fn read_json(resp: Response) -> Result<Value, StoreError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let url = self.table_url(query.table)?;
        let params = query.to_params();
        tracing::debug!(table = query.table, params = ?params, "store select");
        let resp = self.client.get(url).query(&params).send().await?;
        rows_from_json(Self::read_json(resp).await?)
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError> {
        let url = self.table_url(table)?;
        tracing::debug!(table = table, row = ?row, "store insert");
        let resp = self
            .client
            .post(url)
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        rows_from_json(Self::read_json(resp).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = self.table_url("")?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Rejected {
                status: status.as_u16(),
                message: "store not ready".into(),
            })
        }
    }
}
