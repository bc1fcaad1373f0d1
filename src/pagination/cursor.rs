//! Cursor pagination strategy
//!
//! The service returns `nextCursor` on every page that has a successor and
//! expects it back as the `cursor` parameter of the following request.

use super::types::{
    NextPage, PaginationState, CURSOR_PARAM, ITEMS_FIELD, NEXT_CURSOR_FIELD,
};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, OptionStringExt, Params};

/// Cursor-based pagination over `items` / `nextCursor` pages
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Request parameter name for the cursor
    pub cursor_param: String,
    /// Response field holding the next cursor
    pub next_cursor_field: String,
    /// Response field holding the records
    pub items_field: String,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self {
            cursor_param: CURSOR_PARAM.to_string(),
            next_cursor_field: NEXT_CURSOR_FIELD.to_string(),
            items_field: ITEMS_FIELD.to_string(),
        }
    }
}

impl CursorPaginator {
    /// Create a paginator using the service's field names
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect a page and decide whether to continue
    ///
    /// A missing, null, non-string or empty cursor ends pagination.
    pub fn process_response(&self, body: &JsonObject, state: &mut PaginationState) -> NextPage {
        let records = body
            .get(&self.items_field)
            .and_then(JsonValue::as_array)
            .map_or(0, Vec::len);
        state.record_page(records);

        let cursor = body
            .get(&self.next_cursor_field)
            .and_then(JsonValue::as_str)
            .map(String::from)
            .none_if_empty();

        match cursor {
            Some(cursor) => {
                state.set_cursor(cursor.clone());
                NextPage::Continue { cursor }
            }
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }

    /// Params for the follow-up request; `params` itself is left untouched
    pub fn next_params(&self, params: &Params, cursor: &str) -> Params {
        let mut next = params.clone();
        next.insert(
            self.cursor_param.clone(),
            JsonValue::String(cursor.to_string()),
        );
        next
    }

    /// Remove and return a page's records
    pub fn take_items(&self, body: &mut JsonObject) -> Result<Vec<JsonValue>> {
        match body.remove(&self.items_field) {
            Some(JsonValue::Array(items)) => Ok(items),
            Some(_) => Err(Error::malformed(format!(
                "'{}' is not an array",
                self.items_field
            ))),
            None => Err(Error::malformed(format!(
                "page is missing '{}'",
                self.items_field
            ))),
        }
    }

    /// Append records to the accumulated result's `items`
    pub fn append_items(&self, result: &mut JsonObject, items: Vec<JsonValue>) -> Result<()> {
        match result.get_mut(&self.items_field) {
            Some(JsonValue::Array(existing)) => {
                existing.extend(items);
                Ok(())
            }
            _ => Err(Error::malformed(format!(
                "first page has no '{}' array to merge into",
                self.items_field
            ))),
        }
    }

    /// Drop cursor bookkeeping from a finished result
    ///
    /// Absent keys are fine.
    pub fn strip_bookkeeping(&self, result: &mut JsonObject) {
        result.remove(&self.next_cursor_field);
        result.remove(&self.cursor_param);
    }
}
