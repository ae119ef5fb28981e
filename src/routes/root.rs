//! The greeting served at `/`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::config::GREETING;

/// Root handler.
///
/// Returns the same plaintext greeting for every request. It reads no state,
/// so concurrent requests need no coordination.
pub async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        GREETING,
    )
}
