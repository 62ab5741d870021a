//! Order aggregates.

use crate::error::AppError;
use crate::response::Revenue;
use crate::service::GatewayService;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn total_revenue(State(state): State<AppState>) -> Result<Json<Revenue>, AppError> {
    let total_revenue = GatewayService::total_revenue(state.store.as_ref()).await?;
    Ok(Json(Revenue { total_revenue }))
}
