//! The page-fetching capability the aggregation engine is written against.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{MoviesPage, PageNumber};

/// Anything that can hand out catalog pages.
///
/// ## Design Note
/// - `Send + Sync` so one source can be shared by concurrent page fetches
/// - The engine only sees this trait, which keeps HTTP out of aggregation
///   and lets tests plug in an in-memory source
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page (1-based).
    ///
    /// Implementations apply their own timeout and retry policy; the error
    /// returned here is terminal.
    async fn fetch_page(&self, page: PageNumber) -> Result<MoviesPage, FetchError>;

    /// Best-effort reachability probe. Never fails, only answers.
    ///
    /// The default asks for page 1 and reports whether that worked.
    async fn is_healthy(&self) -> bool {
        self.fetch_page(1).await.is_ok()
    }
}
