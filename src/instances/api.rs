//! Instances resource API
//!
//! Every call goes through [`Fetcher`], so list reads auto-paginate when no
//! limit is set and transient failures are retried.

use super::types::{
    AggregateGroup, AggregateRequest, AppliedInstance, Instance, InstanceApply, InstancePage,
    InstanceRef, ListRequest, SearchRequest, SourceSelector, ViewId,
};
use crate::error::{Error, Result};
use crate::pagination::{Fetcher, ITEMS_FIELD, NEXT_CURSOR_FIELD};
use crate::types::{JsonObject, JsonValue, Method, OptionStringExt, Params};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const INSTANCES_PATH: &str = "/models/instances";
const LIST_PATH: &str = "/models/instances/list";
const BY_IDS_PATH: &str = "/models/instances/byids";
const DELETE_PATH: &str = "/models/instances/delete";
const SEARCH_PATH: &str = "/models/instances/search";
const AGGREGATE_PATH: &str = "/models/instances/aggregate";

/// Nodes and edges
#[derive(Debug, Clone)]
pub struct InstancesApi {
    fetcher: Arc<Fetcher>,
}

impl InstancesApi {
    /// Create the API over a shared fetcher
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    /// List instances; all pages unless `request.limit` is set
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<Instance>> {
        let body = self
            .fetcher
            .fetch(Method::POST, LIST_PATH, &to_params(request)?)
            .await?;
        let items: Vec<Instance> = decode_items(body)?;
        debug!("Listed {} {}s", items.len(), request.instance_type);
        Ok(items)
    }

    /// List one page and keep the service's cursor
    ///
    /// With `request.limit` set this is a single request and
    /// [`InstancePage::next_cursor`] carries the resume point. Without a
    /// limit every page is read and the cursor is always `None`.
    pub async fn list_page(&self, request: &ListRequest) -> Result<InstancePage> {
        let body = self
            .fetcher
            .fetch(Method::POST, LIST_PATH, &to_params(request)?)
            .await?;
        let next_cursor = body
            .get(NEXT_CURSOR_FIELD)
            .and_then(JsonValue::as_str)
            .map(String::from)
            .none_if_empty();
        let items: Vec<Instance> = decode_items(body)?;
        debug!(
            "Listed page of {} {}s, more: {}",
            items.len(),
            request.instance_type,
            next_cursor.is_some()
        );
        Ok(InstancePage { items, next_cursor })
    }

    /// Retrieve instances by id, with properties from `sources`
    pub async fn retrieve(&self, ids: &[InstanceRef], sources: &[ViewId]) -> Result<Vec<Instance>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sources: Vec<SourceSelector> = sources.iter().cloned().map(Into::into).collect();
        let mut params = to_params(&json!({ "items": ids }))?;
        if !sources.is_empty() {
            params.insert("sources".to_string(), serde_json::to_value(sources)?);
        }

        let body = self.fetcher.fetch(Method::POST, BY_IDS_PATH, &params).await?;
        decode_items(body)
    }

    /// Create or update nodes and edges
    ///
    /// With `replace` the written properties replace the stored ones instead
    /// of being merged into them.
    pub async fn apply(&self, items: &[InstanceApply], replace: bool) -> Result<Vec<AppliedInstance>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let params = to_params(&json!({ "items": items, "replace": replace }))?;

        let body = self.fetcher.fetch(Method::POST, INSTANCES_PATH, &params).await?;
        let applied: Vec<AppliedInstance> = decode_items(body)?;
        debug!("Applied {} instances", applied.len());
        Ok(applied)
    }

    /// Delete instances; returns the ids the service reports as deleted
    pub async fn delete(&self, ids: &[InstanceRef]) -> Result<Vec<InstanceRef>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = to_params(&json!({ "items": ids }))?;

        let body = self.fetcher.fetch(Method::POST, DELETE_PATH, &params).await?;
        let deleted: Vec<InstanceRef> = decode_items(body)?;
        debug!("Deleted {} instances", deleted.len());
        Ok(deleted)
    }

    /// Free-text search within one view
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Instance>> {
        let body = self
            .fetcher
            .fetch(Method::POST, SEARCH_PATH, &to_params(request)?)
            .await?;
        decode_items(body)
    }

    /// Aggregates (count, sum, avg, min, max, histogram) over one view
    pub async fn aggregate(&self, request: &AggregateRequest) -> Result<Vec<AggregateGroup>> {
        let body = self
            .fetcher
            .fetch(Method::POST, AGGREGATE_PATH, &to_params(request)?)
            .await?;
        decode_items(body)
    }
}

/// Serialize a request body into fetch params
fn to_params<T: Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::Other(
            "request body must serialize to a JSON object".to_string(),
        )),
    }
}

/// Deserialize the `items` of a response
fn decode_items<T: DeserializeOwned>(mut body: JsonObject) -> Result<Vec<T>> {
    match body.remove(ITEMS_FIELD) {
        Some(items @ JsonValue::Array(_)) => Ok(serde_json::from_value(items)?),
        Some(_) => Err(Error::malformed("'items' is not an array")),
        None => Err(Error::malformed("response is missing 'items'")),
    }
}
