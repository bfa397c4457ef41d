//! HTTP boundary for the directors service.
//!
//! This crate wires the movies API client and the aggregation engine behind
//! `GET /api/directors?threshold={n}`:
//! - `validation`: threshold parsing and its error messages
//! - `error`: `ApiError` and the JSON error envelope
//! - `routes`: router, shared state and handlers
//! - `config`: flags/env for the upstream client and engine

pub mod config;
pub mod error;
pub mod routes;
pub mod validation;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

pub use config::UpstreamArgs;
pub use error::{ApiError, ApiRejection, ErrorResponse};
pub use routes::{AppState, DIRECTORS_PATH, DirectorsResponse, router};

/// Serve the application on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("Directors service listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("Directors service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            // Without a signal handler, run until killed
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
