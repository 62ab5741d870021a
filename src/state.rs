//! Shared application state for all routes.

use crate::config::StockPolicy;
use crate::store::RemoteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Process-scoped store handle, shared read-only by every request.
    pub store: Arc<dyn RemoteStore>,
    pub stock: StockPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn RemoteStore>, stock: StockPolicy) -> Self {
        AppState { store, stock }
    }
}
