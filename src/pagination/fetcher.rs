//! Page fetchers
//!
//! A fetcher performs exactly one request per call. Expected failures come
//! back as a failed [`Page`]; only malformed bodies and bad templates are
//! returned as errors.

use super::types::{FetchFailure, Page};
use crate::decode::{JsonPageDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::template::{self, TemplateContext};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Fetches a single page of a paged endpoint
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type carried by each page
    type Item: Send;

    /// Fetch the page at `page_index` from a URL template containing
    /// `{{ page }}`
    async fn fetch(&self, url_template: &str, page_index: u32) -> Result<Page<Self::Item>>;
}

/// Fetcher backed by the HTTP client and a JSON page decoder
#[derive(Debug, Clone)]
pub struct HttpPageFetcher<D = JsonPageDecoder> {
    client: HttpClient,
    decoder: D,
}

impl<D: RecordDecoder> HttpPageFetcher<D> {
    /// Create a fetcher
    pub fn new(client: HttpClient, decoder: D) -> Self {
        Self { client, decoder }
    }
}

#[async_trait]
impl<D: RecordDecoder> PageFetcher for HttpPageFetcher<D> {
    type Item = Value;

    async fn fetch(&self, url_template: &str, page_index: u32) -> Result<Page<Value>> {
        let ctx = TemplateContext::new().with_var("page", page_index);
        let url = template::render(url_template, &ctx)?;

        let body = match self.client.get_text(&url).await {
            Ok(body) => body,
            Err(e) => return classify_failure(e).map(Page::failed),
        };

        let decoded = self.decoder.decode(&body)?;
        debug!(
            page = page_index,
            items = decoded.items.len(),
            total_pages = decoded.total_pages,
            "Fetched page"
        );
        Ok(Page::ok(decoded.items, decoded.total_pages))
    }
}

/// Turn expected request failures into data, pass anything else through
fn classify_failure(e: Error) -> Result<FetchFailure> {
    if let Some(status) = e.status() {
        return Ok(FetchFailure::NonSuccessStatus { status });
    }
    if e.is_transport() {
        return Ok(FetchFailure::Transport {
            message: e.to_string(),
        });
    }
    Err(e)
}
