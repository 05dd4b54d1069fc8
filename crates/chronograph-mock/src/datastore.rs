//! The mock datastore
//!
//! Serves `get_entity` and `aggregate_entities` against one in-memory
//! snapshot. Both operations resolve the request's temporal axes (falling
//! back to the default axes), traverse the snapshot from the matching
//! roots with the requested depths, and finalize the traversal into the
//! returned subgraph.

use crate::data;
use crate::query::{AggregateEntitiesData, AggregateEntitiesResult, GetEntityData};
use crate::sort::filter_and_sort_entities;
use chronograph_core::{
    QueryTemporalAxes, QueryTemporalAxesUnresolved, Result, SubgraphTemporalAxes, Timestamp,
};
use chronograph_graph::stdlib::{get_entities, get_entity_revision};
use chronograph_graph::{
    EntityVertexId, GraphResolveDepths, Subgraph, TraversalContext, TraversalSubgraph,
    traverse_element,
};
use tracing::debug;

/// A fake embedding-application datastore over an in-memory snapshot
#[derive(Debug)]
pub struct MockDatastore {
    graph: Subgraph,
}

impl MockDatastore {
    /// Wrap an existing snapshot
    pub fn new(graph: Subgraph) -> Self {
        Self { graph }
    }

    /// A datastore over the fixture graph
    pub fn with_default_data() -> Result<Self> {
        Ok(Self::new(data::mock_datastore_graph(Timestamp::now())?))
    }

    /// The backing snapshot
    pub fn graph(&self) -> &Subgraph {
        &self.graph
    }

    fn resolve_axes(
        requested: Option<&QueryTemporalAxesUnresolved>,
    ) -> (QueryTemporalAxesUnresolved, QueryTemporalAxes) {
        let initial = requested
            .cloned()
            .unwrap_or_else(QueryTemporalAxesUnresolved::default_axes);
        let resolved = initial.resolve(Timestamp::now());
        (initial, resolved)
    }

    /// Returns the bounded neighborhood of the entity as a subgraph
    /// rooted at its latest revision, or `None` if the entity is unknown.
    ///
    /// # Errors
    ///
    /// Propagates internal-consistency errors from traversal.
    pub fn get_entity(&self, request: &GetEntityData) -> Result<Option<Subgraph>> {
        let (initial, resolved) = Self::resolve_axes(request.temporal_axes.as_ref());
        let depths = request
            .graph_resolve_depths
            .unwrap_or_else(|| GraphResolveDepths::uniform(1));

        let Some(entity) = get_entity_revision(&self.graph, &request.entity_id, None) else {
            debug!(entity_id = %request.entity_id, "get_entity: unknown entity");
            return Ok(None);
        };
        let entity = entity.clone();

        let vertex_id = EntityVertexId {
            base_id: request.entity_id.clone(),
            revision_id: self.graph.entity_revision_key(&entity),
        };

        let mut traversal = TraversalSubgraph::new(
            depths,
            Some(SubgraphTemporalAxes {
                initial,
                resolved: resolved.clone(),
            }),
        );
        traversal.push_root(vertex_id.clone().into());

        traverse_element(
            &mut traversal,
            &self.graph,
            &entity,
            vertex_id,
            resolved.variable.interval,
            depths,
            &mut TraversalContext::new(),
        )?;

        traversal.finalize().map(Some)
    }

    /// Filters, sorts and paginates the snapshot's entities, then returns
    /// the traversed subgraph rooted at the selected page together with
    /// the operation actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`chronograph_core::Error::InvalidFilter`] for malformed
    /// filters and propagates internal-consistency errors from traversal.
    pub fn aggregate_entities(
        &self,
        request: &AggregateEntitiesData,
    ) -> Result<AggregateEntitiesResult> {
        let (initial, resolved) = Self::resolve_axes(request.temporal_axes.as_ref());
        let depths = request
            .graph_resolve_depths
            .unwrap_or_else(|| GraphResolveDepths::uniform(1));

        let candidates = get_entities(&self.graph, false);
        let (page, applied_operation) =
            filter_and_sort_entities(candidates, &request.operation, Some(&resolved))?;

        let mut traversal = TraversalSubgraph::new(
            depths,
            Some(SubgraphTemporalAxes {
                initial,
                resolved: resolved.clone(),
            }),
        );
        let mut context = TraversalContext::new();

        for entity in page {
            let vertex_id = EntityVertexId {
                base_id: entity.metadata.record_id.entity_id.clone(),
                revision_id: self.graph.entity_revision_key(entity),
            };
            traversal.push_root(vertex_id.clone().into());

            traverse_element(
                &mut traversal,
                &self.graph,
                entity,
                vertex_id,
                resolved.variable.interval.clone(),
                depths,
                &mut context,
            )?;
        }

        Ok(AggregateEntitiesResult {
            results: traversal.finalize()?,
            operation: applied_operation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CombinatorOperator, EntityFilter, FilterOperator, MultiFilter};
    use crate::query::AggregateOperationInput;
    use chronograph_graph::EntityId;
    use chronograph_graph::stdlib::get_entity_roots;

    #[test]
    fn test_get_entity_unknown_is_none() {
        let datastore = MockDatastore::with_default_data().unwrap();
        let result = datastore
            .get_entity(&GetEntityData::by_id("nobody"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_entity_default_depths_reach_one_hop() {
        let datastore = MockDatastore::with_default_data().unwrap();
        let subgraph = datastore
            .get_entity(&GetEntityData::by_id("alice"))
            .unwrap()
            .unwrap();

        let ids: Vec<&str> = subgraph
            .vertices
            .entities
            .keys()
            .map(EntityId::as_str)
            .collect();
        // Each kind/direction budget is spent independently: alice's
        // works-at link and acme via it, then acme's other incoming link
        // and bob at its far end are all within one hop per pair.
        assert_eq!(
            ids,
            vec![
                "acme",
                "alice",
                "alice-works-at-acme",
                "bob",
                "bob-founded-acme",
            ]
        );

        let roots = get_entity_roots(&subgraph).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].metadata.record_id.entity_id, EntityId::new("alice"));
    }

    #[test]
    fn test_aggregate_filters_by_entity_type() {
        let datastore = MockDatastore::with_default_data().unwrap();
        let result = datastore
            .aggregate_entities(&AggregateEntitiesData {
                operation: AggregateOperationInput {
                    entity_type_id: Some(data::person_type_uri()),
                    ..AggregateOperationInput::default()
                },
                graph_resolve_depths: Some(GraphResolveDepths::default()),
                temporal_axes: None,
            })
            .unwrap();

        // Only revisions within the temporal window are candidates:
        // alice's current revision and bob
        assert_eq!(result.operation.total_count, 2);
        let ids: Vec<&str> = result
            .results
            .vertices
            .entities
            .keys()
            .map(EntityId::as_str)
            .collect();
        assert_eq!(ids, vec!["alice", "bob"]);
        // Alice's superseded revision is outside the window
        assert_eq!(result.results.vertices.entities[&EntityId::new("alice")].len(), 1);
    }

    #[test]
    fn test_aggregate_multi_filter_and_pagination_defaults() {
        let datastore = MockDatastore::with_default_data().unwrap();
        let result = datastore
            .aggregate_entities(&AggregateEntitiesData {
                operation: AggregateOperationInput {
                    multi_filter: Some(MultiFilter {
                        filters: vec![EntityFilter {
                            field: vec![
                                "properties".to_string(),
                                data::name_property_uri().to_string(),
                            ],
                            operator: FilterOperator::Contains,
                            value: Some(serde_json::json!("acme")),
                        }],
                        operator: CombinatorOperator::And,
                    }),
                    ..AggregateOperationInput::default()
                },
                graph_resolve_depths: Some(GraphResolveDepths::default()),
                temporal_axes: None,
            })
            .unwrap();

        assert_eq!(result.operation.page_number, 1);
        assert_eq!(result.operation.items_per_page, 10);
        assert_eq!(result.operation.total_count, 1);
        assert_eq!(result.operation.page_count, 1);
        let ids: Vec<&str> = result
            .results
            .vertices
            .entities
            .keys()
            .map(EntityId::as_str)
            .collect();
        assert_eq!(ids, vec!["acme"]);
    }

    #[test]
    fn test_aggregate_empty_page_is_valid() {
        let datastore = MockDatastore::with_default_data().unwrap();
        let result = datastore
            .aggregate_entities(&AggregateEntitiesData {
                operation: AggregateOperationInput {
                    page_number: Some(99),
                    ..AggregateOperationInput::default()
                },
                graph_resolve_depths: Some(GraphResolveDepths::default()),
                temporal_axes: None,
            })
            .unwrap();

        assert!(result.results.vertices.is_empty());
        assert_eq!(result.operation.page_number, 99);
        assert!(result.operation.total_count > 0);
    }
}
