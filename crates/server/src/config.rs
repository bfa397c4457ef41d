//! Command-line / environment configuration shared by the binaries.
//!
//! Every flag can also be set through the environment variable named next
//! to it, which is how the service is configured in containers.

use std::time::Duration;

use clap::Args;
use movies_client::{ClientConfig, DEFAULT_BASE_URL};
use pipeline::{DEFAULT_MAX_CONCURRENT_PAGES, DirectorKeyPolicy, EngineConfig};

/// Settings for reaching and aggregating the upstream catalog
#[derive(Debug, Clone, Args)]
pub struct UpstreamArgs {
    /// Base URL of the movies API
    #[arg(long, env = "MOVIES_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout for one page request, in seconds
    #[arg(long, env = "MOVIES_API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries after a 5xx response
    #[arg(long, env = "MOVIES_API_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    /// Base delay of the exponential retry backoff, in seconds
    #[arg(long, env = "MOVIES_API_RETRY_DELAY_SECS", default_value_t = 1)]
    pub retry_delay_secs: u64,

    /// Maximum page requests in flight at once
    #[arg(long, env = "DIRECTORS_PAGE_CONCURRENCY", default_value_t = DEFAULT_MAX_CONCURRENT_PAGES)]
    pub page_concurrency: usize,

    /// Group directors on the trimmed name instead of the raw string
    #[arg(long, env = "DIRECTORS_TRIM_KEYS")]
    pub trim_director_keys: bool,
}

impl UpstreamArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_retries(self.max_retries)
            .with_retry_delay(Duration::from_secs(self.retry_delay_secs))
    }

    pub fn engine_config(&self) -> EngineConfig {
        let key_policy = if self.trim_director_keys {
            DirectorKeyPolicy::Trimmed
        } else {
            DirectorKeyPolicy::Raw
        };

        EngineConfig::default()
            .with_max_concurrent_pages(self.page_concurrency)
            .with_key_policy(key_policy)
    }
}
