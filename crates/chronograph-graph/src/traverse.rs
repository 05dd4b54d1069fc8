//! Depth-bounded traversal
//!
//! Expands a bounded neighborhood of a starting element into a result
//! subgraph. The walk runs over an explicit worklist: each item carries
//! the element, the search interval narrowed so far, and the remaining
//! per-kind/direction depth budget. Moving across a link edge intersects
//! the search interval with the neighbor revision's own validity; an empty
//! intersection prunes that branch outright.
//!
//! Edges discovered during the walk are recorded as [`DraftEdge`]s without
//! timestamps. [`TraversalSubgraph::finalize`] rewrites every draft into
//! an interval-qualified edge once the full vertex set is known; the two
//! phases are separate types so the rewrite cannot be skipped.

use crate::depths::{EDGE_KIND_DIRECTIONS, EdgeDirection, GraphResolveDepths};
use crate::edge::{EntityIdWithInterval, KnowledgeGraphEdgeKind, KnowledgeGraphOutwardEdge};
use crate::entity::{Entity, EntityId};
use crate::stdlib::{
    get_incoming_links_for_entity, get_left_entity_for_link_entity, get_outgoing_links_for_entity,
    get_right_entity_for_link_entity, map_elements_into_revisions,
};
use crate::subgraph::Subgraph;
use crate::vertex::{EntityVertexId, GraphElementVertexId, Vertices};
use chronograph_core::{
    Error, Result, SubgraphTemporalAxes, TemporalBound, TimeInterval, Timestamp,
};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, trace};

/// An edge discovered during traversal, before its timestamp is known.
///
/// Drafts carry no interval: the interval depends on which revisions of
/// the endpoint end up in the result, which is only known once the walk
/// has finished.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraftEdge {
    source: EntityId,
    kind: KnowledgeGraphEdgeKind,
    reversed: bool,
    target: EntityId,
}

/// The partially-built result of a traversal.
///
/// Vertices are complete as recorded; entity-to-entity edges exist only as
/// drafts until [`TraversalSubgraph::finalize`] stamps them.
#[derive(Debug)]
pub struct TraversalSubgraph {
    pub roots: Vec<GraphElementVertexId>,
    pub vertices: Vertices,
    pub depths: GraphResolveDepths,
    pub temporal_axes: Option<SubgraphTemporalAxes>,
    draft_edges: Vec<DraftEdge>,
}

impl TraversalSubgraph {
    /// Create an empty traversal result
    pub fn new(depths: GraphResolveDepths, temporal_axes: Option<SubgraphTemporalAxes>) -> Self {
        Self {
            roots: Vec::new(),
            vertices: Vertices::default(),
            depths,
            temporal_axes,
            draft_edges: Vec::new(),
        }
    }

    /// Declare a root of the result
    pub fn push_root(&mut self, root: GraphElementVertexId) {
        self.roots.push(root);
    }

    fn record_vertex(&mut self, vertex_id: &EntityVertexId, entity: Entity) {
        // Re-visits overwrite the same slot; recording is idempotent
        self.vertices
            .entities
            .entry(vertex_id.base_id.clone())
            .or_default()
            .insert(vertex_id.revision_id, entity);
    }

    fn record_draft_edge(&mut self, draft: DraftEdge) {
        if !self.draft_edges.contains(&draft) {
            self.draft_edges.push(draft);
        }
    }

    /// Stamps every draft edge with its real bounds and returns the
    /// finished subgraph.
    ///
    /// For each draft, the endpoint's revision starts present in the
    /// result are collected: the earliest becomes the edge's recording
    /// instant and interval start, and the latest revision's own validity
    /// end becomes the interval end (unbounded when that revision never
    /// ends). Ontology edges are not interval-based and would keep their
    /// literal recording version; the current edge kinds are all
    /// entity-to-entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if a draft edge points at an entity
    /// with no vertex in the result.
    pub fn finalize(self) -> Result<Subgraph> {
        let mut subgraph = Subgraph {
            roots: self.roots,
            vertices: self.vertices,
            edges: Default::default(),
            depths: self.depths,
            temporal_axes: self.temporal_axes,
        };

        for draft in &self.draft_edges {
            let (at, interval) = endpoint_interval(&subgraph, &draft.target)?;
            subgraph.insert_knowledge_edge(
                draft.source.clone(),
                at,
                KnowledgeGraphOutwardEdge::ToEntity {
                    kind: draft.kind,
                    reversed: draft.reversed,
                    right_endpoint: EntityIdWithInterval {
                        entity_id: draft.target.clone(),
                        interval,
                    },
                },
            );
        }

        debug!(
            vertices = subgraph.vertices.len(),
            edges = self.draft_edges.len(),
            "finalized traversal subgraph"
        );

        Ok(subgraph)
    }
}

fn endpoint_interval(subgraph: &Subgraph, target: &EntityId) -> Result<(Timestamp, TimeInterval)> {
    let revisions: Option<&BTreeMap<Timestamp, Entity>> = subgraph.vertices.entities.get(target);

    // Keys are sorted: first is the earliest revision start, last the
    // latest revision, whose own end bound closes the edge's interval.
    let (Some(earliest), Some(latest)) = (
        revisions.and_then(|revisions| revisions.keys().next().copied()),
        revisions.and_then(|revisions| revisions.values().next_back()),
    ) else {
        return Err(Error::Internal(format!(
            "traversed edge endpoint {target} has no vertex in the result subgraph"
        )));
    };

    let end = match subgraph.variable_axis() {
        Some(axis) => latest.validity_interval(axis).end,
        None => TemporalBound::Unbounded,
    };

    Ok((
        earliest,
        TimeInterval::new(TemporalBound::Inclusive(earliest), end),
    ))
}

/// Tracks, per visited element, the depths already resolved for each
/// edge-kind/direction pair.
///
/// When the same element is reached again along a different path, only the
/// kind/direction pairs whose new budget exceeds what was already explored
/// need further work; everything else has been covered by a deeper or
/// equal earlier visit.
#[derive(Debug, Default)]
pub struct TraversalContext {
    resolved: HashMap<EntityVertexId, GraphResolveDepths>,
}

impl TraversalContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit to `vertex_id` with the given budget, returning the
    /// subset of depths that still need resolution
    pub fn insert(
        &mut self,
        vertex_id: &EntityVertexId,
        depths: GraphResolveDepths,
    ) -> GraphResolveDepths {
        let resolved = self.resolved.entry(vertex_id.clone()).or_default();
        let mut unresolved = GraphResolveDepths::default();

        for (kind, direction) in EDGE_KIND_DIRECTIONS {
            let offered = depths.depth(kind, direction);
            if offered > resolved.depth(kind, direction) {
                resolved.set_depth(kind, direction, offered);
                unresolved.set_depth(kind, direction, offered);
            }
        }

        unresolved
    }
}

struct WorkItem {
    entity: Entity,
    vertex_id: EntityVertexId,
    interval: TimeInterval,
    depths: GraphResolveDepths,
}

/// Expands the neighborhood of `element` into `traversal`, following link
/// edges up to the per-kind/direction budgets in `depths` and narrowing
/// the search interval at every hop.
///
/// The datastore is the full snapshot being queried; the traversal result
/// accumulates the visited vertices and the draft edges between them.
/// Termination is by construction: every hop strictly decrements the
/// budget it spends, and branches whose interval intersection is empty are
/// pruned.
///
/// # Errors
///
/// Propagates internal-consistency errors from the underlying link
/// accessors (a link entity missing a structural endpoint edge).
pub fn traverse_element(
    traversal: &mut TraversalSubgraph,
    datastore: &Subgraph,
    element: &Entity,
    element_id: EntityVertexId,
    interval: TimeInterval,
    depths: GraphResolveDepths,
    context: &mut TraversalContext,
) -> Result<()> {
    let mut worklist = VecDeque::new();
    worklist.push_back(WorkItem {
        entity: element.clone(),
        vertex_id: element_id,
        interval,
        depths,
    });

    while let Some(item) = worklist.pop_front() {
        traversal.record_vertex(&item.vertex_id, item.entity.clone());

        let unresolved = context.insert(&item.vertex_id, item.depths);
        if unresolved.is_exhausted() {
            continue;
        }

        for (kind, direction) in EDGE_KIND_DIRECTIONS {
            if unresolved.depth(kind, direction) < 1 {
                continue;
            }

            let source_id = &item.entity.metadata.record_id.entity_id;
            let reversed = direction == EdgeDirection::Incoming;
            let neighbor_groups = neighbors(datastore, &item.entity, kind, reversed, &item.interval)?;

            for (neighbor_id, revisions) in neighbor_groups {
                trace!(
                    source = %source_id,
                    neighbor = %neighbor_id,
                    ?kind,
                    reversed,
                    "traversing edge"
                );

                traversal.record_draft_edge(DraftEdge {
                    source: source_id.clone(),
                    kind,
                    reversed,
                    target: neighbor_id.clone(),
                });

                for revision in revisions {
                    // Narrow the search to the window where both the path
                    // so far and this revision are valid; nothing outside
                    // it may be explored through this branch.
                    let revision_validity = datastore.entity_validity_interval(&revision);
                    let Some(next_interval) = item.interval.intersect(&revision_validity) else {
                        continue;
                    };

                    worklist.push_back(WorkItem {
                        vertex_id: EntityVertexId {
                            base_id: neighbor_id.clone(),
                            revision_id: datastore.entity_revision_key(&revision),
                        },
                        entity: revision,
                        interval: next_interval,
                        depths: item.depths.decremented(kind, direction),
                    });
                }
            }
        }
    }

    Ok(())
}

/// The neighbor revisions reachable from `entity` over one edge kind and
/// orientation, grouped by entity id.
///
/// Reversed `HAS_LEFT_ENTITY` finds the entity's outgoing links and
/// reversed `HAS_RIGHT_ENTITY` its incoming links; the non-reversed kinds
/// resolve a link entity's own endpoints and yield nothing for ordinary
/// entities.
fn neighbors(
    datastore: &Subgraph,
    entity: &Entity,
    kind: KnowledgeGraphEdgeKind,
    reversed: bool,
    interval: &TimeInterval,
) -> Result<Vec<(EntityId, Vec<Entity>)>> {
    let entity_id = &entity.metadata.record_id.entity_id;

    let grouped = match (kind, reversed) {
        (KnowledgeGraphEdgeKind::HasLeftEntity, true) => map_elements_into_revisions(
            get_outgoing_links_for_entity(datastore, entity_id, Some(interval)),
        ),
        (KnowledgeGraphEdgeKind::HasRightEntity, true) => map_elements_into_revisions(
            get_incoming_links_for_entity(datastore, entity_id, Some(interval)),
        ),
        (KnowledgeGraphEdgeKind::HasLeftEntity, false) => {
            if !entity.is_link() {
                return Ok(Vec::new());
            }
            map_elements_into_revisions(get_left_entity_for_link_entity(
                datastore,
                entity_id,
                Some(interval),
            )?)
        }
        (KnowledgeGraphEdgeKind::HasRightEntity, false) => {
            if !entity.is_link() {
                return Ok(Vec::new());
            }
            map_elements_into_revisions(get_right_entity_for_link_entity(
                datastore,
                entity_id,
                Some(interval),
            )?)
        }
    };

    Ok(grouped
        .into_iter()
        .map(|(id, revisions)| (id, revisions.into_iter().cloned().collect()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_subgraph;
    use crate::entity::{
        EntityMetadata, EntityRecordId, EntityTemporalMetadata, LinkData, PropertyObject,
    };
    use crate::ontology::{BaseUri, VersionedUri};
    use chronograph_core::{
        PinnedTemporalAxisUnresolved, QueryTemporalAxes, QueryTemporalAxesUnresolved,
        TemporalAxis, TimeIntervalUnresolved, VariableTemporalAxisUnresolved,
    };

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn axes() -> QueryTemporalAxes {
        QueryTemporalAxesUnresolved {
            pinned: PinnedTemporalAxisUnresolved {
                axis: TemporalAxis::TransactionTime,
                timestamp: None,
            },
            variable: VariableTemporalAxisUnresolved {
                axis: TemporalAxis::DecisionTime,
                interval: TimeIntervalUnresolved {
                    start: Some(TemporalBound::Inclusive(Timestamp::unix_epoch())),
                    end: Some(TemporalBound::Unbounded),
                },
            },
        }
        .resolve(ts(1_000_000))
    }

    fn entity(id: &str, interval: TimeInterval) -> Entity {
        Entity {
            metadata: EntityMetadata {
                record_id: EntityRecordId {
                    entity_id: EntityId::new(id),
                    edition_id: format!("{id}-ed1"),
                },
                entity_type_id: VersionedUri::new(
                    BaseUri::new("https://example.com/types/thing/"),
                    1,
                ),
                temporal_versioning: Some(EntityTemporalMetadata {
                    decision_time: interval.clone(),
                    transaction_time: interval,
                }),
            },
            properties: PropertyObject::new(),
            link_data: None,
        }
    }

    fn link(id: &str, left: &str, right: &str, interval: TimeInterval) -> Entity {
        let mut link_entity = entity(id, interval);
        link_entity.link_data = Some(LinkData {
            left_entity_id: EntityId::new(left),
            right_entity_id: EntityId::new(right),
            left_to_right_order: None,
            right_to_left_order: None,
        });
        link_entity
    }

    /// p1 -(l1)-> c1 -(l2)-> c2: a two-hop chain of links
    fn chain_datastore() -> Subgraph {
        let interval = TimeInterval::from_timestamp_onwards(ts(100));
        let entities = vec![
            entity("p1", interval.clone()),
            entity("c1", interval.clone()),
            entity("c2", interval.clone()),
            link("l1", "p1", "c1", interval.clone()),
            link("l2", "c1", "c2", interval.clone()),
        ];
        let root = entities[0].metadata.record_id.clone();
        build_subgraph(&entities, &[root], GraphResolveDepths::uniform(255), Some(axes())).unwrap()
    }

    fn run_traversal(datastore: &Subgraph, start: &str, depths: GraphResolveDepths) -> Subgraph {
        let start_id = EntityId::new(start);
        let element = crate::stdlib::get_entity_revision(datastore, &start_id, None)
            .unwrap()
            .clone();
        let vertex_id = EntityVertexId {
            base_id: start_id,
            revision_id: datastore.entity_revision_key(&element),
        };

        let mut traversal =
            TraversalSubgraph::new(depths, datastore.temporal_axes.clone());
        traversal.push_root(vertex_id.clone().into());

        let interval = datastore
            .temporal_axes
            .as_ref()
            .unwrap()
            .resolved
            .variable
            .interval
            .clone();

        traverse_element(
            &mut traversal,
            datastore,
            &element,
            vertex_id,
            interval,
            depths,
            &mut TraversalContext::new(),
        )
        .unwrap();

        traversal.finalize().unwrap()
    }

    fn vertex_ids(subgraph: &Subgraph) -> Vec<&str> {
        subgraph
            .vertices
            .entities
            .keys()
            .map(EntityId::as_str)
            .collect()
    }

    #[test]
    fn test_one_hop_stops_at_links() {
        let datastore = chain_datastore();
        let mut depths = GraphResolveDepths::default();
        depths.set_depth(
            KnowledgeGraphEdgeKind::HasLeftEntity,
            EdgeDirection::Incoming,
            1,
        );

        let result = run_traversal(&datastore, "p1", depths);
        // One incoming hop reaches the outgoing link l1 and nothing beyond
        assert_eq!(vertex_ids(&result), vec!["l1", "p1"]);
    }

    #[test]
    fn test_depth_budget_spends_per_kind_and_direction() {
        let datastore = chain_datastore();
        let result = run_traversal(&datastore, "p1", GraphResolveDepths::uniform(1));

        // l1 via the outgoing-link hop, c1 via l1's right endpoint; l2 is
        // two outgoing-link hops from p1 and stays out
        assert_eq!(vertex_ids(&result), vec!["c1", "l1", "p1"]);
    }

    #[test]
    fn test_deeper_budget_reaches_next_hop() {
        let datastore = chain_datastore();
        let result = run_traversal(&datastore, "p1", GraphResolveDepths::uniform(2));
        assert_eq!(vertex_ids(&result), vec!["c1", "c2", "l1", "l2", "p1"]);
    }

    #[test]
    fn test_traversed_edges_are_finalized_with_intervals() {
        let datastore = chain_datastore();
        let result = run_traversal(&datastore, "p1", GraphResolveDepths::uniform(1));

        let p1_edges = &result.edges.knowledge_graph[&EntityId::new("p1")][&ts(100)];
        let outgoing = p1_edges
            .iter()
            .find(|edge| edge.is_outgoing_link_edge())
            .and_then(|edge| edge.entity_endpoint())
            .unwrap();
        assert_eq!(outgoing.entity_id, EntityId::new("l1"));
        assert_eq!(
            outgoing.interval,
            TimeInterval::from_timestamp_onwards(ts(100))
        );

        let l1_edges = &result.edges.knowledge_graph[&EntityId::new("l1")][&ts(100)];
        let right = l1_edges
            .iter()
            .find(|edge| edge.is_has_right_entity_edge())
            .and_then(|edge| edge.entity_endpoint())
            .unwrap();
        assert_eq!(right.entity_id, EntityId::new("c1"));
    }

    #[test]
    fn test_empty_interval_intersection_prunes_branch() {
        // The link is only valid before t=50; the entity validity windows
        // do not reach it when searching from t=100 onwards.
        let entities = vec![
            entity("p1", TimeInterval::from_timestamp_onwards(ts(0))),
            entity("c1", TimeInterval::from_timestamp_onwards(ts(0))),
            link("l1", "p1", "c1", TimeInterval::half_open(ts(0), ts(50))),
        ];
        let root = entities[0].metadata.record_id.clone();
        let datastore = build_subgraph(
            &entities,
            &[root],
            GraphResolveDepths::uniform(255),
            Some(axes()),
        )
        .unwrap();

        let start_id = EntityId::new("p1");
        let element = crate::stdlib::get_entity_revision(&datastore, &start_id, None)
            .unwrap()
            .clone();
        let vertex_id = EntityVertexId {
            base_id: start_id,
            revision_id: datastore.entity_revision_key(&element),
        };
        let mut traversal = TraversalSubgraph::new(
            GraphResolveDepths::uniform(2),
            datastore.temporal_axes.clone(),
        );
        traversal.push_root(vertex_id.clone().into());

        traverse_element(
            &mut traversal,
            &datastore,
            &element,
            vertex_id,
            TimeInterval::from_timestamp_onwards(ts(100)),
            GraphResolveDepths::uniform(2),
            &mut TraversalContext::new(),
        )
        .unwrap();

        let result = traversal.finalize().unwrap();
        assert_eq!(vertex_ids(&result), vec!["p1"]);
    }

    #[test]
    fn test_cycles_terminate() {
        // A two-entity cycle: a -(l1)-> b -(l2)-> a
        let interval = TimeInterval::from_timestamp_onwards(ts(0));
        let entities = vec![
            entity("a", interval.clone()),
            entity("b", interval.clone()),
            link("l1", "a", "b", interval.clone()),
            link("l2", "b", "a", interval.clone()),
        ];
        let root = entities[0].metadata.record_id.clone();
        let datastore = build_subgraph(
            &entities,
            &[root],
            GraphResolveDepths::uniform(255),
            Some(axes()),
        )
        .unwrap();

        let result = run_traversal(&datastore, "a", GraphResolveDepths::uniform(8));
        assert_eq!(vertex_ids(&result), vec!["a", "b", "l1", "l2"]);
    }

    #[test]
    fn test_traversal_context_returns_only_deeper_depths() {
        let mut context = TraversalContext::new();
        let vertex_id = EntityVertexId {
            base_id: EntityId::new("e1"),
            revision_id: Timestamp::unix_epoch(),
        };

        let first = context.insert(&vertex_id, GraphResolveDepths::uniform(2));
        assert_eq!(first, GraphResolveDepths::uniform(2));

        // A shallower re-visit has nothing left to resolve
        let second = context.insert(&vertex_id, GraphResolveDepths::uniform(1));
        assert!(second.is_exhausted());

        // A deeper re-visit resolves only the deeper budget
        let third = context.insert(&vertex_id, GraphResolveDepths::uniform(3));
        assert_eq!(third, GraphResolveDepths::uniform(3));
    }
}
