//! Pagination module
//!
//! Cursor pagination over `{"items": [...], "nextCursor": "..."}` pages,
//! wrapped in a retry envelope.
//!
//! # Overview
//!
//! - [`CursorPaginator`] reads the cursor out of a page and builds the
//!   parameters for the next request
//! - [`Fetcher`] drives the loop, merges pages and retries transient
//!   failures with exponential backoff

mod cursor;
mod fetch;
mod types;

pub use cursor::CursorPaginator;
pub use fetch::Fetcher;
pub use types::{
    NextPage, PaginationState, CURSOR_PARAM, ITEMS_FIELD, LIMIT_PARAM, NEXT_CURSOR_FIELD,
};
