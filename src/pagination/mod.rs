//! Pagination module
//!
//! # Overview
//!
//! A [`PageFetcher`] issues one request for one page index and reports the
//! outcome as data. The [`Aggregator`] walks page indices from 0, concatenating
//! items until a page comes back empty, a fetch fails, or the declared total
//! page count is reached. The empty page is the authoritative stop signal;
//! the total page count and `max_pages` only bound the walk.

mod aggregator;
mod fetcher;
mod types;

pub use aggregator::{Aggregator, DEFAULT_MAX_PAGES};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use types::{Aggregated, AggregationStatus, FetchFailure, Page};
