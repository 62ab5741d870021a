//! Router assembly: routes plus body limit, CORS and request tracing, with trailing slashes trimmed.
//! Every error leaving the router carries the JSON error body.

use crate::config::GatewayConfig;
use crate::handlers::{json_error_body, method_not_allowed, unknown_route};
use crate::routes::{common_routes, resource_routes};
use crate::state::AppState;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::{middleware::map_response, Router};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// CORS for exactly one origin, with credentials.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT])
        .allow_credentials(true)
}

pub fn build_router(state: AppState, allowed_origin: HeaderValue, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(unknown_route)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(map_response(json_error_body))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
}

/// The served application. Path normalization has to wrap the router so it runs before routing.
pub fn build_app(state: AppState, config: &GatewayConfig) -> NormalizePath<Router> {
    let router = build_router(state, config.allowed_origin.clone(), config.body_limit);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
