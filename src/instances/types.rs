//! Instance wire types
//!
//! Field names follow the service's camelCase JSON.

use crate::filters::Filter;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Node or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceType {
    #[default]
    Node,
    Edge,
}

impl std::fmt::Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceType::Node => write!(f, "node"),
            InstanceType::Edge => write!(f, "edge"),
        }
    }
}

/// Space-scoped identifier, also the shape of direct relation values
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceId {
    pub space: String,
    pub external_id: String,
}

impl InstanceId {
    /// Create an id in `space`
    pub fn new(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
        }
    }

    /// JSON value for use in filters
    pub fn to_value(&self) -> JsonValue {
        serde_json::json!({"space": self.space, "externalId": self.external_id})
    }
}

/// Identifier qualified with its instance type, used by retrieve and delete
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRef {
    pub instance_type: InstanceType,
    pub space: String,
    pub external_id: String,
}

impl InstanceRef {
    /// Reference to a node
    pub fn node(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            instance_type: InstanceType::Node,
            space: space.into(),
            external_id: external_id.into(),
        }
    }

    /// Reference to an edge
    pub fn edge(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            instance_type: InstanceType::Edge,
            space: space.into(),
            external_id: external_id.into(),
        }
    }
}

/// Versioned view identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename = "view", rename_all = "camelCase")]
pub struct ViewId {
    pub space: String,
    pub external_id: String,
    pub version: String,
}

impl ViewId {
    /// Create a view id
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            version: version.into(),
        }
    }
}

/// `{"source": <view>}` wrapper used to select properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSelector {
    pub source: ViewId,
}

impl From<ViewId> for SourceSelector {
    fn from(source: ViewId) -> Self {
        Self { source }
    }
}

// ============================================================================
// Write model
// ============================================================================

/// Property values written through one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSource {
    pub source: ViewId,
    pub properties: JsonObject,
}

/// Node create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instanceType", rename = "node", rename_all = "camelCase")]
pub struct NodeApply {
    pub space: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<InstanceSource>,
}

impl NodeApply {
    /// Node write without properties
    pub fn new(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            existing_version: None,
            sources: Vec::new(),
        }
    }

    /// Add properties written through `view`
    #[must_use]
    pub fn with_source(mut self, view: ViewId, properties: JsonObject) -> Self {
        self.sources.push(InstanceSource {
            source: view,
            properties,
        });
        self
    }
}

/// Edge create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instanceType", rename = "edge", rename_all = "camelCase")]
pub struct EdgeApply {
    pub space: String,
    pub external_id: String,
    #[serde(rename = "type")]
    pub edge_type: InstanceId,
    pub start_node: InstanceId,
    pub end_node: InstanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<InstanceSource>,
}

impl EdgeApply {
    /// Edge write from `start_node` to `end_node`
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        edge_type: InstanceId,
        start_node: InstanceId,
        end_node: InstanceId,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            edge_type,
            start_node,
            end_node,
            existing_version: None,
            sources: Vec::new(),
        }
    }
}

/// Either kind of write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstanceApply {
    Node(NodeApply),
    Edge(EdgeApply),
}

impl From<NodeApply> for InstanceApply {
    fn from(node: NodeApply) -> Self {
        Self::Node(node)
    }
}

impl From<EdgeApply> for InstanceApply {
    fn from(edge: EdgeApply) -> Self {
        Self::Edge(edge)
    }
}

/// Outcome of one applied instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedInstance {
    pub instance_type: InstanceType,
    pub space: String,
    pub external_id: String,
    pub version: i64,
    #[serde(default)]
    pub was_modified: bool,
    #[serde(default)]
    pub created_time: i64,
    #[serde(default)]
    pub last_updated_time: i64,
}

// ============================================================================
// Read model
// ============================================================================

/// Node or edge as returned by list, retrieve and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub instance_type: InstanceType,
    pub space: String,
    pub external_id: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub created_time: i64,
    #[serde(default)]
    pub last_updated_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_node: Option<InstanceId>,
    /// `{space: {"externalId/version": {property: value}}}`
    #[serde(default)]
    pub properties: JsonObject,
}

impl Instance {
    /// Identity of this instance
    pub fn id(&self) -> InstanceId {
        InstanceId::new(&self.space, &self.external_id)
    }

    /// Property value as written through `view`
    pub fn property(&self, view: &ViewId, name: &str) -> Option<&JsonValue> {
        self.properties
            .get(&view.space)?
            .get(format!("{}/{}", view.external_id, view.version))?
            .get(name)
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Body of a list request
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub instance_type: InstanceType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Setting a limit turns off auto-pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Resume point from [`InstancePage::next_cursor`]; only meaningful
    /// together with `limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_typing: bool,
}

impl ListRequest {
    /// List nodes
    pub fn nodes() -> Self {
        Self::default()
    }

    /// List edges
    pub fn edges() -> Self {
        Self {
            instance_type: InstanceType::Edge,
            ..Self::default()
        }
    }

    /// Return properties from `view`
    #[must_use]
    pub fn source(mut self, view: ViewId) -> Self {
        self.sources.push(view.into());
        self
    }

    /// Restrict results to `filter`
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Return at most one page of `limit` results
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue a manual read where the previous page stopped
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// One page of a limited list read
#[derive(Debug, Clone, PartialEq)]
pub struct InstancePage {
    pub items: Vec<Instance>,
    /// Set when the service has more results; pass it to
    /// [`ListRequest::cursor`] for the next page
    pub next_cursor: Option<String>,
}

/// Body of a search request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub view: ViewId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<InstanceType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchRequest {
    /// Search everything in `view`
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            query: None,
            instance_type: None,
            properties: Vec::new(),
            filter: None,
            limit: None,
        }
    }
}

/// One aggregate to compute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    Count { property: String },
    Sum { property: String },
    Avg { property: String },
    Min { property: String },
    Max { property: String },
    Histogram { property: String, interval: f64 },
}

/// Body of an aggregate request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    pub view: ViewId,
    pub aggregates: Vec<Aggregation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<InstanceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl AggregateRequest {
    /// Compute `aggregates` over `view`
    pub fn new(view: ViewId, aggregates: Vec<Aggregation>) -> Self {
        Self {
            view,
            aggregates,
            group_by: Vec::new(),
            query: None,
            filter: None,
            instance_type: None,
            limit: None,
        }
    }
}

/// Histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: f64,
    pub count: u64,
}

/// One computed aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateValue {
    pub aggregate: String,
    pub property: String,
    #[serde(default)]
    pub value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<Bucket>,
}

/// Aggregates for one group (or the whole selection without `group_by`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGroup {
    pub instance_type: InstanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<JsonObject>,
    pub aggregates: Vec<AggregateValue>,
}
