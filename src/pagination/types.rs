//! Pagination types
//!
//! Defines the page and aggregation result types shared by fetchers and the
//! aggregator.

use serde::Serialize;
use std::fmt;

/// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// Network, DNS or timeout failure
    Transport {
        /// Underlying error message
        message: String,
    },
    /// The server answered with a non-success status
    NonSuccessStatus {
        /// HTTP status code
        status: u16,
    },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport failure: {message}"),
            Self::NonSuccessStatus { status } => write!(f, "HTTP {status}"),
        }
    }
}

/// One fetched response unit
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Item records in upstream order
    pub items: Vec<T>,
    /// Declared total page count (1 when the upstream omits it)
    pub total_pages: u32,
    /// Set when the fetch did not succeed; the page is then empty
    pub failure: Option<FetchFailure>,
}

impl<T> Page<T> {
    /// A successfully fetched page
    pub fn ok(items: Vec<T>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages,
            failure: None,
        }
    }

    /// A page whose fetch failed
    pub fn failed(failure: FetchFailure) -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
            failure: Some(failure),
        }
    }

    /// Whether the page carried no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// How an aggregation ended. Every variant is a valid, non-fatal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AggregationStatus {
    /// Ran out of pages (declared total reached or page bound hit)
    Exhausted,
    /// A page came back with no items
    EmptyPage,
    /// A fetch failed; items hold everything gathered before it
    Failed {
        /// Index of the page that failed
        page: u32,
        /// Why it failed
        reason: FetchFailure,
    },
}

impl AggregationStatus {
    /// Check if aggregation stopped on a failed fetch
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::EmptyPage => "empty_page",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for AggregationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { page, reason } => write!(f, "failed at page {page} ({reason})"),
            other => f.write_str(other.label()),
        }
    }
}

/// Items of every successfully fetched page, in fetch order, plus how the
/// walk ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregated<T> {
    /// Concatenated items; duplicates across pages are kept
    pub items: Vec<T>,
    /// Terminal state
    pub status: AggregationStatus,
    /// Number of fetch calls made
    pub pages_fetched: u32,
}

impl<T> Aggregated<T> {
    /// Create an aggregation result
    pub fn new(items: Vec<T>, status: AggregationStatus, pages_fetched: u32) -> Self {
        Self {
            items,
            status,
            pages_fetched,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were gathered
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item, keeping status and page count
    pub fn try_map<U, E, F>(self, f: F) -> std::result::Result<Aggregated<U>, E>
    where
        F: FnMut(T) -> std::result::Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Aggregated {
            items,
            status: self.status,
            pages_fetched: self.pages_fetched,
        })
    }
}
