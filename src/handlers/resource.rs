//! Resource handlers: list, read by id, create. One generic set, instantiated per resource in the route table.

use crate::error::AppError;
use crate::model::Resource;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{parse_payload, GatewayService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::Validation(format!("id must be a positive integer, got '{}'", id_str)))
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = GatewayService::list::<R>(state.store.as_ref()).await?;
    Ok(success_many(rows))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = GatewayService::get_by_id::<R>(state.store.as_ref(), id).await?;
    Ok(success_one_ok(row))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::BadRequest(rejection.body_text()),
    })?;
    let payload = parse_payload::<R::Payload>(body)?;
    let row = GatewayService::create::<R>(state.store.as_ref(), payload, &state.stock).await?;
    Ok(success_one(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
    }
}
