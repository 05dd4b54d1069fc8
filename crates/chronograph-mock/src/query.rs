//! Request and response payloads for the mock datastore
//!
//! The temporal mode of a call is carried by one explicit field:
//! `temporal_axes` of `None` means "use the default axes", resolved at
//! query time. There is no structural presence check.

use crate::filter::MultiFilter;
use crate::sort::SortRule;
use chronograph_core::QueryTemporalAxesUnresolved;
use chronograph_graph::{EntityId, GraphResolveDepths, Subgraph, VersionedUri};
use serde::{Deserialize, Serialize};

/// Parameters of a `get_entity` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityData {
    pub entity_id: EntityId,
    /// Defaults to one hop in every direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_resolve_depths: Option<GraphResolveDepths>,
    /// Defaults to the datastore's default axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_axes: Option<QueryTemporalAxesUnresolved>,
}

impl GetEntityData {
    /// A request with default depths and axes
    pub fn by_id<I: Into<EntityId>>(entity_id: I) -> Self {
        Self {
            entity_id: entity_id.into(),
            graph_resolve_depths: None,
            temporal_axes: None,
        }
    }
}

/// The filtering/sorting/pagination operation of an `aggregate_entities`
/// call; every field is optional and defaulted by the datastore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOperationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type_id: Option<VersionedUri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_sort: Option<Vec<SortRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_filter: Option<MultiFilter>,
}

/// Parameters of an `aggregate_entities` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEntitiesData {
    #[serde(default)]
    pub operation: AggregateOperationInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_resolve_depths: Option<GraphResolveDepths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_axes: Option<QueryTemporalAxesUnresolved>,
}

/// The operation actually applied, with every default filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAggregateOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type_id: Option<VersionedUri>,
    pub page_number: usize,
    pub items_per_page: usize,
    pub page_count: usize,
    pub total_count: usize,
    pub multi_sort: Vec<SortRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_filter: Option<MultiFilter>,
}

/// The result of an `aggregate_entities` call: the traversed subgraph
/// rooted at the page of matching entities, plus the applied operation.
///
/// Pagination is a deliberate partial-view mechanism, not an error
/// condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEntitiesResult {
    pub results: Subgraph,
    pub operation: AppliedAggregateOperation,
}
