//! Runtime settings for the gateway process.

use axum::http::HeaderValue;
use reqwest::Url;
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Endpoint and key for the hosted store.
#[derive(Clone)]
pub struct StoreCredentials {
    /// Base URL, always ending in `/`.
    pub url: Url,
    pub key: String,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Thresholds used when a supply row arrives without a stock status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockPolicy {
    pub low_stock_threshold: i64,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicy {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub store: StoreCredentials,
    /// The single origin allowed by CORS.
    pub allowed_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub stock: StockPolicy,
    pub body_limit: usize,
}
