//! Paginated fetch with whole-exchange retry
//!
//! One call to [`Fetcher::fetch`] is one logical read. Without a `limit`
//! parameter (or with a null one) it follows `nextCursor` until a page has
//! none and returns every page's `items` concatenated in server order. With
//! a non-null `limit` it sends one request and returns that page untouched,
//! so callers can page manually.
//!
//! A transient failure on any page restarts the read from the first page.

use super::cursor::CursorPaginator;
use super::types::{NextPage, PaginationState, LIMIT_PARAM};
use crate::error::Result;
use crate::http::HttpClient;
use crate::retry::{retry, RetryPolicy, Sleeper, TokioSleeper};
use crate::types::{JsonObject, Method, Params};
use std::sync::Arc;
use tracing::debug;

/// Paginating, retrying front end to [`HttpClient`]
pub struct Fetcher {
    http: HttpClient,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    paginator: CursorPaginator,
}

impl Fetcher {
    /// Create a fetcher with the default retry policy
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
            paginator: CursorPaginator::default(),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the sleep primitive used between attempts
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Get the underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Get the retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch `url`, following cursors unless `params` carries a `limit`
    pub async fn fetch(&self, method: Method, url: &str, params: &Params) -> Result<JsonObject> {
        retry(&self.policy, self.sleeper.as_ref(), |attempt| {
            debug!("{} {} (attempt {})", method, url, attempt);
            self.fetch_once(method, url, params)
        })
        .await
    }

    /// One complete exchange, no retries
    async fn fetch_once(&self, method: Method, url: &str, params: &Params) -> Result<JsonObject> {
        let mut result = self.http.send_json(method, url, params).await?;

        // A null limit is never sent on the wire, so it does not opt out
        if params.get(LIMIT_PARAM).is_some_and(|limit| !limit.is_null()) {
            return Ok(result);
        }

        let mut state = PaginationState::new();
        let mut next = self.paginator.process_response(&result, &mut state);

        while let NextPage::Continue { cursor } = next {
            let page_params = self.paginator.next_params(params, &cursor);
            let mut page = self.http.send_json(method, url, &page_params).await?;

            next = self.paginator.process_response(&page, &mut state);
            let items = self.paginator.take_items(&mut page)?;
            self.paginator.append_items(&mut result, items)?;

            debug!(
                "{} {}: page {} merged, {} records so far",
                method, url, state.pages, state.total_fetched
            );
        }

        self.paginator.strip_bookkeeping(&mut result);
        Ok(result)
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("http", &self.http)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
