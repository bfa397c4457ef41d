//! Directors service binary.
//!
//! Reads configuration from flags/environment, connects the movies API
//! client to the aggregation engine and serves HTTP until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use movies_client::MoviesApiClient;
use tokio::net::TcpListener;
use tracing::info;

use server::{AppState, UpstreamArgs};

/// Directors service - which directors have more than N movies?
#[derive(Parser)]
#[command(name = "directors-server")]
#[command(about = "Serves directors above a movie-count threshold", long_about = None)]
struct ServerArgs {
    /// Interface to bind
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    port: u16,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();
    info!("Starting directors service");

    let client = MoviesApiClient::new(args.upstream.client_config())
        .context("Failed to build movies API client")?;
    let engine_config = args.upstream.engine_config();
    info!(
        "Engine: up to {} pages in flight, {:?} director keys",
        engine_config.max_concurrent_pages, engine_config.key_policy
    );

    let state = AppState::new(Arc::new(client), engine_config);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server::serve(listener, state).await
}
