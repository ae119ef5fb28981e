//! HTTP server module.
//!
//! Binds the single listener the process owns for its lifetime, serves the
//! router on it, and drains connections on SIGTERM/SIGINT:
//! - **Starting**: `bind` acquires the port or fails with `ServerError::Bind`
//! - **Serving**: `serve` accepts connections until the shutdown handle fires

mod server;
mod shutdown;

pub use server::{bind, serve, start_server};
pub use shutdown::setup_shutdown_handler;
