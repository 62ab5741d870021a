//! Gateway server: reads settings from the environment (and `.env`), connects the store client, serves HTTP.

use axum::{extract::Request, ServiceExt};
use invenflow_gateway::{build_app, AppState, GatewayConfig, RestStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("invenflow_gateway=info,tower_http=info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(store = %config.store.url, origin = ?config.allowed_origin, "configuration loaded");

    let store = RestStore::new(&config.store)?;
    let state = AppState::new(Arc::new(store), config.stock);
    let app = build_app(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
