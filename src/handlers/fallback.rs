//! Responses for requests no route accepts.

use crate::error::AppError;
use axum::{
    http::{header::CONTENT_LENGTH, header::CONTENT_TYPE, Uri},
    response::{IntoResponse, Response},
};

pub async fn unknown_route(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Rewrites error responses built outside the handlers (body limit, routing) into the JSON error
/// body. Other headers, such as `Allow`, are kept.
pub async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }
    let (parts, _) = response.into_parts();
    let mut rebuilt = AppError::from_status(status).into_response();
    for (name, value) in parts.headers.iter() {
        if *name != CONTENT_TYPE && *name != CONTENT_LENGTH {
            rebuilt.headers_mut().append(name.clone(), value.clone());
        }
    }
    rebuilt
}
