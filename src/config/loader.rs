//! Load settings from the process environment (or any key lookup, for tests).

use crate::config::types::*;
use crate::error::ConfigError;
use axum::http::HeaderValue;
use reqwest::Url;
use std::net::SocketAddr;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const LOW_STOCK_THRESHOLD: &str = "LOW_STOCK_THRESHOLD";
pub const BODY_LIMIT_BYTES: &str = "BODY_LIMIT_BYTES";

impl GatewayConfig {
    /// Read settings from environment variables. Both store credentials are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = get(SUPABASE_URL).ok_or(ConfigError::MissingVar(SUPABASE_URL))?;
        let key = get(SUPABASE_KEY).ok_or(ConfigError::MissingVar(SUPABASE_KEY))?;
        let store = StoreCredentials {
            url: parse_store_url(&url)?,
            key,
        };

        let origin = get(ALLOWED_ORIGIN).unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.into());
        let allowed_origin = HeaderValue::from_str(&origin).map_err(|e| ConfigError::InvalidValue {
            var: ALLOWED_ORIGIN,
            reason: e.to_string(),
        })?;

        let bind = get(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            var: BIND_ADDR,
            reason: e.to_string(),
        })?;

        let low_stock_threshold = match get(LOW_STOCK_THRESHOLD) {
            Some(v) => parse_number::<i64>(LOW_STOCK_THRESHOLD, &v)?,
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };
        if low_stock_threshold < 0 {
            return Err(ConfigError::InvalidValue {
                var: LOW_STOCK_THRESHOLD,
                reason: "must not be negative".into(),
            });
        }

        let body_limit = match get(BODY_LIMIT_BYTES) {
            Some(v) => parse_number::<usize>(BODY_LIMIT_BYTES, &v)?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(GatewayConfig {
            store,
            allowed_origin,
            bind_addr,
            stock: StockPolicy { low_stock_threshold },
            body_limit,
        })
    }
}

/// Parse the store endpoint; only http(s) is accepted and the path is forced to end in `/`
/// so that relative joins (`rest/v1/...`) stay under it.
pub fn parse_store_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        var: SUPABASE_URL,
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidValue {
            var: SUPABASE_URL,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        var,
        reason: format!("'{}' is not a valid number", raw),
    })
}
