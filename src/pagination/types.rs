//! Pagination types
//!
//! Wire field names and the bookkeeping carried through one paginated read.

/// Parameter whose presence disables auto-pagination
pub const LIMIT_PARAM: &str = "limit";

/// Parameter carrying the cursor on follow-up requests
pub const CURSOR_PARAM: &str = "cursor";

/// Response field holding the cursor of the next page
pub const NEXT_CURSOR_FIELD: &str = "nextCursor";

/// Response field holding the page's records
pub const ITEMS_FIELD: &str = "items";

/// Result of inspecting a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available, request the next one with this cursor
    Continue {
        /// Opaque cursor from the previous page
        cursor: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks progress during one paginated read
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages received so far
    pub pages: u32,
    /// Cursor the next request will carry
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a received page
    pub fn record_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.cursor = None;
        self.done = true;
    }
}
