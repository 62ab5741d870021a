//! Resource routes. Paths are declared without trailing slashes; the app trims them from requests,
//! so `/items/` and `/items` reach the same handler. One create route per resource.

use crate::handlers::{create, list, read, total_revenue};
use crate::model::{Customers, Inventory, Items, Orders, Suppliers};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list::<Items>).post(create::<Items>))
        .route("/items/:id", get(read::<Items>))
        .route("/suppliers", get(list::<Suppliers>))
        .route("/suppliers/:id", get(read::<Suppliers>))
        .route("/add-supplier", post(create::<Suppliers>))
        .route("/customers", get(list::<Customers>))
        .route("/customers/:id", get(read::<Customers>))
        .route("/add-customer", post(create::<Customers>))
        .route("/orders", get(list::<Orders>))
        .route("/orders/total-revenue", get(total_revenue))
        .route("/orders/:id", get(read::<Orders>))
        .route("/add-order", post(create::<Orders>))
        .route("/inventory", get(list::<Inventory>))
        .route("/add-supply", post(create::<Inventory>))
        .with_state(state)
}
