//! HTTP client module
//!
//! Provides a thin HTTP client over reqwest with optional rate limiting.
//!
//! # Features
//!
//! - **Single attempt**: no retries or backoff, a failed request is reported
//!   to the caller as-is
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error classification**: transport failures, timeouts and non-success
//!   statuses map to distinct [`crate::Error`] variants

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
