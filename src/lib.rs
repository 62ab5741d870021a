//! Invenflow gateway: REST endpoints for items, suppliers, customers, orders and inventory,
//! each forwarded as a single call to a hosted PostgREST store.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_app, build_router};
pub use config::{GatewayConfig, StockPolicy};
pub use error::{AppError, ConfigError, StoreError};
pub use response::{success_many, success_one};
pub use routes::{common_routes, resource_routes};
pub use service::GatewayService;
pub use state::AppState;
pub use store::{MemoryStore, RemoteStore, RestStore};
