//! Page aggregation
//!
//! Walks a paged endpoint sequentially, one awaited fetch at a time.

use super::fetcher::PageFetcher;
use super::types::{Aggregated, AggregationStatus};
use crate::error::Result;
use tracing::{debug, info, warn};

/// Hard ceiling on pages walked per aggregation
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Drives a [`PageFetcher`] from page 0 until the endpoint is exhausted
#[derive(Debug, Clone)]
pub struct Aggregator<F> {
    fetcher: F,
    max_pages: u32,
}

impl<F: PageFetcher> Aggregator<F> {
    /// Create an aggregator with the default page ceiling
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set the page ceiling; zero is treated as one
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Walk every page of `url_template`, concatenating items in fetch order
    ///
    /// Stops on the first failed fetch (status `Failed`, partial items kept),
    /// the first empty page (`EmptyPage`), or once the page counter reaches the
    /// declared total or the page ceiling (`Exhausted`). Only malformed
    /// responses are returned as errors.
    pub async fn aggregate(&self, url_template: &str) -> Result<Aggregated<F::Item>> {
        let mut items = Vec::new();
        let mut page_index: u32 = 0;

        let status = loop {
            let page = self.fetcher.fetch(url_template, page_index).await?;

            if let Some(reason) = page.failure {
                warn!(page = page_index, %reason, "Page fetch failed, keeping partial result");
                break AggregationStatus::Failed {
                    page: page_index,
                    reason,
                };
            }

            if page.is_empty() {
                debug!(page = page_index, "Empty page, stopping");
                page_index += 1;
                break AggregationStatus::EmptyPage;
            }

            items.extend(page.items);
            page_index += 1;

            if page_index >= page.total_pages {
                break AggregationStatus::Exhausted;
            }

            if page_index >= self.max_pages {
                warn!(
                    max_pages = self.max_pages,
                    declared = page.total_pages,
                    "Page ceiling reached before the declared total"
                );
                break AggregationStatus::Exhausted;
            }
        };

        // A failed page still counts as a fetch call
        let pages_fetched = if status.is_failed() {
            page_index + 1
        } else {
            page_index
        };

        info!(
            items = items.len(),
            pages = pages_fetched,
            status = status.label(),
            "Aggregation finished"
        );

        Ok(Aggregated::new(items, status, pages_fetched))
    }
}
