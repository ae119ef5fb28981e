//! HTTP server startup logic.

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::error::ServerError;

use super::shutdown;

/// Bind the listener for `addr`.
///
/// Binding happens before serving so a port that is already in use is
/// reported as `ServerError::Bind` and no partial listener is left behind.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ServerError::Bind { addr, source })?;
    Ok(listener)
}

/// Serve `app` on an already bound listener until `handle` triggers shutdown.
pub async fn serve(listener: TcpListener, app: Router, handle: Handle) -> Result<(), ServerError> {
    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

/// Start the HTTP server on `addr`.
///
/// This function blocks until the server shuts down, either after a
/// termination signal and connection draining or because serving failed.
pub async fn start_server(app: Router, addr: SocketAddr, grace: Duration) -> Result<(), ServerError> {
    // Signal handlers go in before the port opens so an early SIGTERM still drains
    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), grace);

    let listener = match bind(addr) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind listener");
            return Err(e);
        }
    };
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "Starting HTTP server");

    serve(listener, app, handle).await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}
