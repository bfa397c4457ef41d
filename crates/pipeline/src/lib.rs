//! Aggregation pipeline over the paginated movie catalog.
//!
//! This crate provides:
//! - `DirectorsEngine`: page discovery, bounded fan-out, partial-failure
//!   absorption and the final threshold selection
//! - `fetch_pages`: the bounded concurrent fetch used by the engine
//! - `DirectorTally`: per-director movie counts
//!
//! ## Example Usage
//! ```ignore
//! use std::sync::Arc;
//! use pipeline::{DirectorsEngine, EngineConfig};
//!
//! let engine = DirectorsEngine::new(Arc::new(client), EngineConfig::default());
//! let directors = engine.directors_above_threshold(4).await;
//! ```

pub mod engine;
pub mod fan_out;
pub mod tally;

// Re-export main types
pub use engine::{DEFAULT_MAX_CONCURRENT_PAGES, DirectorsEngine, EngineConfig};
pub use fan_out::fetch_pages;
pub use tally::{DirectorKeyPolicy, DirectorTally};
