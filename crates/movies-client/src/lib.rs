//! HTTP client for the upstream movies API.
//!
//! This crate provides the production `PageSource`. It handles:
//! - Building the search URL from the configured base URL
//! - A per-attempt timeout covering connect, response and decode
//! - Exponential-backoff retries on 5xx responses only
//! - Mapping every terminal failure into `catalog::FetchError`
//! - A cheap health probe used to gate incoming requests

pub mod config;

use async_trait::async_trait;
use catalog::{FetchError, MoviesPage, PageNumber, PageSource};
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

pub use config::{ClientConfig, DEFAULT_BASE_URL};

const SEARCH_PATH: &str = "api/movies/search";

/// Errors that can occur while constructing the client
#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("Invalid movies API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the paginated movies search endpoint.
///
/// Cheap to share: wrap it in an `Arc` and hand it to the engine and the
/// HTTP layer.
pub struct MoviesApiClient {
    http: Client,
    search_url: Url,
    config: ClientConfig,
}

impl MoviesApiClient {
    /// Create a client from an immutable configuration.
    ///
    /// Fails only if the base URL is unusable or the HTTP stack cannot be
    /// initialised; no request is made here.
    pub fn new(config: ClientConfig) -> Result<Self, ClientBuildError> {
        let search_url = build_search_url(&config.base_url)?;
        let http = Client::builder().build()?;

        info!(
            "Movies API client targeting {} (timeout {:?}, max retries {}, retry delay {:?})",
            search_url, config.timeout, config.max_retries, config.retry_delay
        );

        Ok(Self {
            http,
            search_url,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of the search endpoint, without the page parameter.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// One attempt, bounded by the configured timeout.
    async fn attempt(&self, page: PageNumber) -> Result<MoviesPage, FetchError> {
        match timeout(self.config.timeout, self.request_page(page)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(page, self.config.timeout)),
        }
    }

    async fn request_page(&self, page: PageNumber) -> Result<MoviesPage, FetchError> {
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| FetchError::transport(page, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(page, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(page, e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| FetchError::decode(page, status.as_u16(), e.to_string()))
    }
}

#[async_trait]
impl PageSource for MoviesApiClient {
    async fn fetch_page(&self, page: PageNumber) -> Result<MoviesPage, FetchError> {
        let mut attempt = 0;
        loop {
            match self.attempt(page).await {
                Ok(movies) => {
                    debug!(
                        "Fetched page {} ({} movies, {} pages declared)",
                        page,
                        movies.data.len(),
                        movies.total_pages
                    );
                    return Ok(movies);
                }
                Err(err) if err.is_server_error() && attempt < self.config.max_retries => {
                    let delay = self.config.backoff_delay(attempt);
                    attempt += 1;
                    warn!(
                        "{} - retry {}/{} in {:?}",
                        err, attempt, self.config.max_retries, delay
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    debug!("Giving up on page {} after {} attempt(s): {}", page, attempt + 1, err);
                    return Err(err);
                }
            }
        }
    }

    async fn is_healthy(&self) -> bool {
        let probe = self
            .http
            .get(self.search_url.clone())
            .query(&[("page", 1u32)])
            .send();

        match timeout(self.config.health_timeout, probe).await {
            // The body is dropped unread; only the status matters
            Ok(Ok(response)) if response.status().is_success() => true,
            Ok(Ok(response)) => {
                warn!("Movies API health probe returned {}", response.status());
                false
            }
            Ok(Err(e)) => {
                warn!("Movies API health probe failed: {}", e);
                false
            }
            Err(_) => {
                warn!(
                    "Movies API health probe timed out after {:?}",
                    self.config.health_timeout
                );
                false
            }
        }
    }
}

/// `{base}/api/movies/search`, tolerating a trailing slash on `base`.
fn build_search_url(base_url: &str) -> Result<Url, ClientBuildError> {
    let invalid = |reason: String| ClientBuildError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let joined = format!("{}/{}", base_url.trim_end_matches('/'), SEARCH_PATH);
    let url = Url::parse(&joined).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
