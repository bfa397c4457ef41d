//! # Directors Engine
//!
//! Turns a threshold into a sorted list of directors:
//! 1. Fetch page 1 to learn how many pages exist
//! 2. Fetch pages 2..=N concurrently, bounded, dropping failures
//! 3. Merge everything that arrived
//! 4. Count movies per director (on the blocking pool)
//! 5. Keep directors strictly above the threshold, sorted
//!
//! The engine never reports a fetch error. A missing page just contributes
//! nothing, and a missing first page yields an empty answer.

use std::sync::Arc;
use std::time::Instant;

use catalog::PageSource;
use tracing::{error, info, warn};

use crate::fan_out::fetch_pages;
use crate::tally::{DirectorKeyPolicy, DirectorTally};

/// Page fetches allowed in flight when nothing else is configured
pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 8;

/// Immutable engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on simultaneously outstanding page fetches (always >= 1)
    pub max_concurrent_pages: usize,
    pub key_policy: DirectorKeyPolicy,
}

impl EngineConfig {
    /// Set the fan-out bound; 0 is raised to 1.
    pub fn with_max_concurrent_pages(mut self, max_concurrent_pages: usize) -> Self {
        self.max_concurrent_pages = max_concurrent_pages.max(1);
        self
    }

    pub fn with_key_policy(mut self, key_policy: DirectorKeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
            key_policy: DirectorKeyPolicy::default(),
        }
    }
}

/// Aggregates the whole catalog on every call. Clone freely.
#[derive(Clone)]
pub struct DirectorsEngine {
    source: Arc<dyn PageSource>,
    config: EngineConfig,
}

impl DirectorsEngine {
    pub fn new(source: Arc<dyn PageSource>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Directors with more than `threshold` movies in the catalog, ascending.
    pub async fn directors_above_threshold(&self, threshold: u64) -> Vec<String> {
        let start_time = Instant::now();

        let first_page = match self.source.fetch_page(1).await {
            Ok(page) => page,
            Err(err) => {
                warn!("Catalog unavailable, returning no directors: {}", err);
                return Vec::new();
            }
        };

        // Only page 1 decides how many pages there are
        let total_pages = first_page.declared_pages();
        let mut pages = vec![first_page];
        if total_pages > 1 {
            let rest = fetch_pages(
                self.source.as_ref(),
                2..=total_pages,
                self.config.max_concurrent_pages,
            )
            .await;
            pages.extend(rest);
        }
        let fetched = pages.len();

        let policy = self.config.key_policy;
        let tally = tokio::task::spawn_blocking(move || {
            DirectorTally::from_pages(&pages, policy).above(threshold)
        })
        .await;

        let directors = match tally {
            Ok(directors) => directors,
            Err(err) => {
                error!("Director tally task failed: {}", err);
                Vec::new()
            }
        };

        info!(
            "Found {} directors above threshold {} from {}/{} pages in {:.2?}",
            directors.len(),
            threshold,
            fetched,
            total_pages,
            start_time.elapsed()
        );

        directors
    }
}
