//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! The Helm chart points both the liveness and readiness probes here.

use crate::config::HEALTH_BODY;

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> &'static str {
    HEALTH_BODY
}
