//! # dms-client
//!
//! Async client for a cloud data-modeling REST API (spaces, views,
//! containers, nodes, edges).
//!
//! ## Features
//!
//! - **Cursor pagination**: list reads follow `nextCursor` until the last page
//! - **Retry with backoff**: transient failures (429, 5xx, timeouts) restart
//!   the whole read, 1s doubling to at most 10s between attempts
//! - **Typed instances API**: list, retrieve, apply, delete, search, aggregate
//! - **Filter builder**: `equals`, `in`, `range`, `hasData`, `and`/`or`/`not`
//! - **Edge reconciliation**: diff desired vs existing edges, write both
//!   sides concurrently
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dms_client::{ClientConfig, DmsClient, Result};
//! use dms_client::instances::ListRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("dms.yaml")?.apply_env()?;
//!     let client = DmsClient::from_config(&config)?;
//!
//!     // No limit: every page is fetched and concatenated
//!     let nodes = client.instances().list(&ListRequest::nodes()).await?;
//!     println!("{} nodes", nodes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  DmsClient → InstancesApi / RelationshipApi                 │
//! └────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴─────────────┬───────────────┐
//! │    Retry     │        Pagination          │     HTTP      │
//! ├──────────────┼────────────────────────────┼───────────────┤
//! │ 1s ×2 ≤ 10s  │ items / nextCursor → cursor│ GET query     │
//! │ max_tries    │ limit = single page        │ POST body     │
//! │ transient    │ strip bookkeeping          │ rate limit    │
//! └──────────────┴────────────────────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport with rate limiting
pub mod http;

/// Retry with exponential backoff
pub mod retry;

/// Cursor pagination and the retrying fetcher
pub mod pagination;

/// Running paired mutations concurrently
pub mod concurrency;

/// Instance filter builder
pub mod filters;

/// Nodes and edges
pub mod instances;

/// Edge reconciliation
pub mod relationships;

/// Client configuration
pub mod config;

/// Top-level client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::DmsClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::Fetcher;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
