use anyhow::{bail, Context, Result};
use catalog::PageSource;
use clap::{Parser, Subcommand};
use colored::Colorize;
use movies_client::MoviesApiClient;
use pipeline::DirectorsEngine;
use server::{DirectorsResponse, UpstreamArgs};
use std::sync::Arc;
use std::time::Instant;

/// directors - query the movie catalog from the terminal
#[derive(Parser)]
#[command(name = "directors")]
#[command(about = "Find directors with more than N movies in the catalog", long_about = None)]
struct Cli {
    #[command(flatten)]
    upstream: UpstreamArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List directors with more than THRESHOLD movies
    Query {
        /// Minimum number of movies to exceed
        #[arg(long)]
        threshold: u64,

        /// Print the same JSON body the HTTP service returns
        #[arg(long)]
        json: bool,
    },

    /// Check whether the movies API is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = Arc::new(
        MoviesApiClient::new(cli.upstream.client_config())
            .context("Failed to build movies API client")?,
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Query { threshold, json } => {
            let engine = DirectorsEngine::new(client, cli.upstream.engine_config());
            handle_query(engine, threshold, json).await?
        }
        Commands::Health => handle_health(client).await?,
    }

    Ok(())
}

/// Handle the 'query' command
async fn handle_query(engine: DirectorsEngine, threshold: u64, json: bool) -> Result<()> {
    let start = Instant::now();
    let directors = engine.directors_above_threshold(threshold).await;

    if json {
        let body = DirectorsResponse { directors };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_directors(&directors, threshold);
    println!(
        "{} {} directors in {:.2?}",
        "✓".green(),
        directors.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'health' command
async fn handle_health(client: Arc<MoviesApiClient>) -> Result<()> {
    let url = client.search_url().clone();
    if client.is_healthy().await {
        println!("{} {} is reachable", "✓".green(), url);
        Ok(())
    } else {
        bail!("{} is not reachable", url)
    }
}

/// Helper function to format and print the director list
fn print_directors(directors: &[String], threshold: u64) {
    println!(
        "{}",
        format!("Directors with more than {} movies:", threshold)
            .bold()
            .blue()
    );
    if directors.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for (rank, director) in directors.iter().enumerate() {
        println!("{:>4}. {}", rank + 1, director);
    }
}
