//! HTTP client module
//!
//! Provides the single-exchange transport used by the paginated fetch.
//!
//! # Features
//!
//! - **JSON exchange**: GET with query string, POST with JSON body
//! - **Error classification**: transient vs client errors from the status
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Credentials**: bearer token or API key header

mod client;
mod credentials;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use credentials::Credentials;
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
