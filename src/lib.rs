//! hello-k3s: a single-endpoint HTTP service for a K3s GitOps demo.
//!
//! `GET /` answers with a constant greeting; `GET /health` backs the
//! orchestrator's probes. Everything else is the web framework's default.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::AppConfig;
pub use error::{ConfigError, ServerError};
pub use routes::create_router;
