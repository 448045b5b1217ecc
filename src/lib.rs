// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # airq
//!
//! A client for the GIOS air-quality monitoring network. It walks the
//! paginated station, sensor and measurement endpoints, keeps whatever was
//! collected when a page fails, and reports how each walk ended.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airq::{AirQualityClient, ApiConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AirQualityClient::new(ApiConfig::builtin("v1")?)?;
//!
//!     let catalog = client.fetch_catalog().await?;
//!     for city in catalog.cities() {
//!         println!("{city}");
//!     }
//!
//!     let history = client
//!         .station_history(&catalog, "Kraków", "Kraków, Aleja Krasińskiego", "PM10")
//!         .await?;
//!     println!("{} readings ({})", history.measurements.len(), history.measurements.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ AirQualityClient: stations → catalog → sensors → measurements│
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴──┬──────────────┬─────────────┐
//! │   Config   │     Pagination     │    Decode    │    HTTP     │
//! ├────────────┼────────────────────┼──────────────┼─────────────┤
//! │ Profiles   │ PageFetcher        │ Items path   │ GET         │
//! │ Endpoints  │ Aggregator         │ totalPages   │ Timeouts    │
//! │ Field names│ Exhausted / Failed │ Field access │ Rate limit  │
//! │            │ / EmptyPage        │              │             │
//! └────────────┴────────────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with timeouts and rate limiting
pub mod http;

/// Page fetching and aggregation
pub mod pagination;

/// Response decoders and field access
pub mod decode;

/// Station, sensor and measurement records
pub mod model;

/// API profile configuration
pub mod config;

/// Built-in API profiles
pub mod profiles;

/// Air-quality API client
pub mod api;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::{AirQualityClient, StationHistory};
pub use config::ApiConfig;
pub use model::{Catalog, Measurement, Sensor, Station};
pub use pagination::{Aggregated, AggregationStatus, FetchFailure};
