//! Bounded concurrent page fetching.

use std::ops::RangeInclusive;

use catalog::{MoviesPage, PageNumber, PageSource};
use futures::future;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

/// Fetch every page in `pages`, at most `max_in_flight` at a time.
///
/// Each fetch is turned into `Option<MoviesPage>` before it reaches the
/// join point, so a failed page is logged and dropped rather than failing
/// the batch. Pages come back in completion order.
pub async fn fetch_pages(
    source: &dyn PageSource,
    pages: RangeInclusive<PageNumber>,
    max_in_flight: usize,
) -> Vec<MoviesPage> {
    let requested = pages.clone().count();
    let max_in_flight = max_in_flight.max(1);
    debug!(
        "Fetching {} pages ({:?}) with at most {} in flight",
        requested, pages, max_in_flight
    );

    let fetched: Vec<MoviesPage> = stream::iter(pages)
        .map(|page| async move {
            match source.fetch_page(page).await {
                Ok(movies) => Some(movies),
                Err(err) => {
                    warn!("Skipping page {}: {}", page, err);
                    None
                }
            }
        })
        .buffer_unordered(max_in_flight)
        .filter_map(future::ready)
        .collect()
        .await;

    if fetched.len() < requested {
        warn!(
            "{} of {} pages could not be fetched and were left out",
            requested - fetched.len(),
            requested
        );
    }

    fetched
}
