//! CLI module
//!
//! Command-line interface for the data-modeling API.
//!
//! # Commands
//!
//! - `fetch` - Call any endpoint with automatic cursor pagination
//! - `list` - List nodes or edges
//! - `retrieve` - Retrieve instances by id
//! - `delete` - Delete instances by id

mod commands;
mod runner;

pub use commands::{Cli, Commands, InstanceTypeArg};
pub use runner::Runner;
