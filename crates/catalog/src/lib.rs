//! # Catalog Crate
//!
//! Shared vocabulary for talking to the upstream movie catalog.
//!
//! ## Main Components
//!
//! - **types**: Wire types for one catalog page (`MoviesPage`, `Movie`)
//! - **error**: `FetchError`, the single failure kind a page fetch can produce
//! - **source**: The `PageSource` trait the aggregation engine depends on
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::PageSource;
//!
//! async fn first_page_size(source: &dyn PageSource) -> usize {
//!     match source.fetch_page(1).await {
//!         Ok(page) => page.data.len(),
//!         Err(_) => 0,
//!     }
//! }
//! ```

// Public modules
pub mod error;
pub mod source;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{FetchCause, FetchError};
pub use source::PageSource;
pub use types::{Movie, MoviesPage, PageNumber};
