//! HTTP route handlers.
//!
//! The service answers exactly one application route, `GET /`. Anything else
//! falls through to axum's defaults (404 for unknown paths, 405 for other
//! methods on a known path).
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod root;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_ROOT;
use crate::middleware::request_id_layer;

/// Creates the Axum router with all routes.
pub fn create_router() -> Router {
    let root_routes = Router::new().route("/", get(root::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_ROOT),
        ),
    );

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(root_routes)
        .merge(health_routes)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
