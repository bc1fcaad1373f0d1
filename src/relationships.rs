//! Edge reconciliation
//!
//! Makes the set of edges of one type leaving a node match a desired list of
//! end nodes: missing edges are created, surplus ones deleted, and the two
//! writes run concurrently.

use crate::concurrency::run_pair;
use crate::error::Result;
use crate::filters::Filter;
use crate::instances::{
    EdgeApply, Instance, InstanceApply, InstanceId, InstanceRef, InstancesApi, ListRequest,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Planned changes for one reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeDiff {
    /// End nodes that need a new edge
    pub to_create: Vec<InstanceId>,
    /// Existing edges to remove
    pub to_delete: Vec<InstanceId>,
}

impl EdgeDiff {
    /// True when there is nothing to create or delete
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

/// Compare existing edges against the desired end nodes
///
/// Edges without an end node are ignored. Duplicate desired end nodes
/// produce one edge. Output order is sorted by id.
pub fn diff_edges(existing: &[Instance], desired: &[InstanceId]) -> EdgeDiff {
    let mut existing_by_end: BTreeMap<InstanceId, Vec<InstanceId>> = BTreeMap::new();
    for edge in existing {
        if let Some(end) = &edge.end_node {
            existing_by_end
                .entry(end.clone())
                .or_default()
                .push(edge.id());
        }
    }
    let desired: BTreeSet<&InstanceId> = desired.iter().collect();

    let to_create = desired
        .iter()
        .filter(|end| !existing_by_end.contains_key(**end))
        .map(|end| (*end).clone())
        .collect();

    let mut to_delete: Vec<InstanceId> = existing_by_end
        .iter()
        .filter(|(end, _)| !desired.contains(end))
        .flat_map(|(_, edges)| edges.iter().cloned())
        .collect();
    to_delete.sort();

    EdgeDiff {
        to_create,
        to_delete,
    }
}

/// External id for the edge `start -[edge_type]-> end`
pub fn edge_external_id(start: &InstanceId, edge_type: &InstanceId, end: &InstanceId) -> String {
    format!(
        "{}:{}:{}",
        start.external_id, edge_type.external_id, end.external_id
    )
}

/// One-to-many relationships expressed as edges
#[derive(Debug, Clone)]
pub struct RelationshipApi {
    instances: InstancesApi,
}

impl RelationshipApi {
    /// Create the API over the instances endpoints
    pub fn new(instances: InstancesApi) -> Self {
        Self { instances }
    }

    /// All edges of `edge_type` leaving `start`
    pub async fn edges_from(&self, start: &InstanceId, edge_type: &InstanceId) -> Result<Vec<Instance>> {
        let filter = Filter::And(vec![
            Filter::equals(Filter::builtin("edge", "startNode"), start.to_value()),
            Filter::equals(Filter::builtin("edge", "type"), edge_type.to_value()),
        ]);
        self.instances
            .list(&ListRequest::edges().filter(filter))
            .await
    }

    /// Make the `edge_type` edges from `start` point at exactly `end_nodes`
    ///
    /// New edges are created in `edge_space`.
    pub async fn set_edges(
        &self,
        start: &InstanceId,
        edge_type: &InstanceId,
        end_nodes: &[InstanceId],
        edge_space: &str,
    ) -> Result<EdgeDiff> {
        let existing = self.edges_from(start, edge_type).await?;
        let diff = diff_edges(&existing, end_nodes);
        if diff.is_empty() {
            return Ok(diff);
        }

        let creates: Vec<InstanceApply> = diff
            .to_create
            .iter()
            .map(|end| {
                EdgeApply::new(
                    edge_space,
                    edge_external_id(start, edge_type, end),
                    edge_type.clone(),
                    start.clone(),
                    end.clone(),
                )
                .into()
            })
            .collect();
        let deletes: Vec<InstanceRef> = diff
            .to_delete
            .iter()
            .map(|id| InstanceRef::edge(&id.space, &id.external_id))
            .collect();

        run_pair(
            self.instances.apply(&creates, false),
            self.instances.delete(&deletes),
        )
        .await?;

        info!(
            "Reconciled {} edges from {}: {} created, {} deleted",
            edge_type.external_id,
            start.external_id,
            diff.to_create.len(),
            diff.to_delete.len()
        );
        Ok(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::InstanceType;
    use crate::types::JsonObject;
    use pretty_assertions::assert_eq;

    fn edge(external_id: &str, end: &str) -> Instance {
        Instance {
            instance_type: InstanceType::Edge,
            space: "rel".to_string(),
            external_id: external_id.to_string(),
            version: 1,
            created_time: 0,
            last_updated_time: 0,
            deleted_time: None,
            edge_type: Some(InstanceId::new("types", "owns")),
            start_node: Some(InstanceId::new("sp", "farm")),
            end_node: Some(InstanceId::new("sp", end)),
            properties: JsonObject::new(),
        }
    }

    fn node(id: &str) -> InstanceId {
        InstanceId::new("sp", id)
    }

    #[test]
    fn test_diff_creates_and_deletes() {
        let existing = vec![edge("e-a", "a"), edge("e-b", "b")];
        let desired = vec![node("b"), node("c")];

        let diff = diff_edges(&existing, &desired);

        assert_eq!(diff.to_create, vec![node("c")]);
        assert_eq!(diff.to_delete, vec![InstanceId::new("rel", "e-a")]);
    }

    #[test]
    fn test_diff_no_changes() {
        let existing = vec![edge("e-a", "a")];
        assert!(diff_edges(&existing, &[node("a")]).is_empty());
        assert!(diff_edges(&[], &[]).is_empty());
    }

    #[test]
    fn test_diff_duplicates_and_orphans() {
        let mut orphan = edge("e-x", "x");
        orphan.end_node = None;
        let existing = vec![edge("e-a1", "a"), edge("e-a2", "a"), orphan];

        let diff = diff_edges(&existing, &[node("b"), node("b")]);

        assert_eq!(diff.to_create, vec![node("b")]);
        assert_eq!(
            diff.to_delete,
            vec![InstanceId::new("rel", "e-a1"), InstanceId::new("rel", "e-a2")]
        );
    }

    #[test]
    fn test_edge_external_id() {
        assert_eq!(
            edge_external_id(&node("farm"), &InstanceId::new("types", "owns"), &node("t1")),
            "farm:owns:t1"
        );
    }
}
