//! Instance filters
//!
//! Serializes to the service's filter JSON, e.g.
//! `{"equals": {"property": ["node", "space"], "value": "sp"}}`.
//!
//! Property paths are either `[scope, field]` for built-in fields
//! (`["node", "externalId"]`, `["edge", "startNode"]`) or
//! `[space, "externalId/version", property]` for view properties, see
//! [`Filter::view_property`].

use crate::instances::ViewId;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Filter expression over instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    Equals {
        property: Vec<String>,
        value: JsonValue,
    },
    In {
        property: Vec<String>,
        values: Vec<JsonValue>,
    },
    Range {
        property: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gt: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gte: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lt: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lte: Option<JsonValue>,
    },
    Prefix {
        property: Vec<String>,
        value: JsonValue,
    },
    Exists {
        property: Vec<String>,
    },
    ContainsAny {
        property: Vec<String>,
        values: Vec<JsonValue>,
    },
    HasData(Vec<ViewId>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    /// Path to a property defined in `view`
    pub fn view_property(view: &ViewId, property: impl Into<String>) -> Vec<String> {
        vec![
            view.space.clone(),
            format!("{}/{}", view.external_id, view.version),
            property.into(),
        ]
    }

    /// Path to a built-in field, e.g. `("edge", "type")`
    pub fn builtin(scope: &str, field: &str) -> Vec<String> {
        vec![scope.to_string(), field.to_string()]
    }

    /// `property == value`
    pub fn equals(property: Vec<String>, value: impl Into<JsonValue>) -> Self {
        Self::Equals {
            property,
            value: value.into(),
        }
    }

    /// `property ∈ values`
    ///
    /// An empty `values` list is sent as-is; how the service treats it is
    /// up to the service, so it is only logged here.
    pub fn is_in<V: Into<JsonValue>>(property: Vec<String>, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<JsonValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            warn!("'in' filter on {:?} has no values", property);
        }
        Self::In { property, values }
    }

    /// `property >= gte && property < lt`, either bound optional
    pub fn range(property: Vec<String>, gte: Option<JsonValue>, lt: Option<JsonValue>) -> Self {
        Self::Range {
            property,
            gt: None,
            gte,
            lt,
            lte: None,
        }
    }

    /// String prefix match
    pub fn prefix(property: Vec<String>, value: impl Into<JsonValue>) -> Self {
        Self::Prefix {
            property,
            value: value.into(),
        }
    }

    /// Property is set
    pub fn exists(property: Vec<String>) -> Self {
        Self::Exists { property }
    }

    /// Instance has data in every listed view
    pub fn has_data(views: impl IntoIterator<Item = ViewId>) -> Self {
        Self::HasData(views.into_iter().collect())
    }

    /// Negation
    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: Filter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Conjunction that collapses trivial cases
    ///
    /// No filters yields `None`, a single filter is returned unwrapped.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Option<Self> {
        let mut filters: Vec<Filter> = filters.into_iter().collect();
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Self::And(filters)),
        }
    }
}
