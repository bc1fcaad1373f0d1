//! Instances module
//!
//! Typed access to nodes and edges: list, retrieve, apply, delete, search
//! and aggregate. Request bodies are built from typed structs and sent
//! through the paginating fetcher.

mod api;
mod types;

pub use api::InstancesApi;
pub use types::{
    AggregateGroup, AggregateRequest, AggregateValue, Aggregation, AppliedInstance, Bucket,
    EdgeApply, Instance, InstanceApply, InstanceId, InstancePage, InstanceRef, InstanceSource,
    InstanceType, ListRequest, NodeApply, SearchRequest, SourceSelector, ViewId,
};
