//! Subgraph construction
//!
//! Builds a `Subgraph` from a flat list of entities, some (or all) of
//! which may be link entities. The list should represent the result of a
//! query on a graph; the roots, depths and temporal axes used for that
//! query are provided alongside the data.
//!
//! The builder does NOT verify that the depths or axes are accurate for
//! the data; the caller is responsible for both. It DOES check that the
//! requested roots are present.

use crate::depths::GraphResolveDepths;
use crate::edge::{EntityIdWithInterval, KnowledgeGraphEdgeKind, KnowledgeGraphOutwardEdge};
use crate::entity::{Entity, EntityId, EntityRecordId};
use crate::subgraph::Subgraph;
use crate::vertex::EntityVertexId;
use chronograph_core::{
    Error, QueryTemporalAxes, Result, SubgraphTemporalAxes, TimeInterval, Timestamp,
    union_of_intervals,
};
use std::collections::BTreeMap;
use tracing::debug;

struct LinkInfo {
    left_entity_id: EntityId,
    right_entity_id: EntityId,
    valid_intervals: Vec<TimeInterval>,
}

/// Builds a `Subgraph` from the given entities.
///
/// Every entity becomes a vertex keyed by `(entity id, revision start)`.
/// For every link entity the union of its revisions' validity intervals is
/// computed and four edges are synthesized per union interval:
/// `HAS_LEFT_ENTITY` from the link to its left endpoint plus the reversed
/// record at the endpoint, and the same pair for `HAS_RIGHT_ENTITY`.
///
/// The maximum value for any single depth is 255. In non-temporal mode
/// (`temporal_axes` of `None`) the same steps run with every entity
/// treated as valid from the epoch onwards.
///
/// # Errors
///
/// Returns [`Error::RootsNotFound`] naming every requested root that has
/// no exact `EntityRecordId` match among `entities`.
pub fn build_subgraph(
    entities: &[Entity],
    root_record_ids: &[EntityRecordId],
    depths: GraphResolveDepths,
    temporal_axes: Option<QueryTemporalAxes>,
) -> Result<Subgraph> {
    let missing_roots: Vec<&EntityRecordId> = root_record_ids
        .iter()
        .filter(|root| {
            !entities
                .iter()
                .any(|entity| &entity.metadata.record_id == *root)
        })
        .collect();

    if !missing_roots.is_empty() {
        return Err(Error::RootsNotFound(
            missing_roots
                .iter()
                .map(|root| root.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ));
    }

    let mut subgraph = Subgraph::new(
        depths,
        temporal_axes.map(SubgraphTemporalAxes::from_resolved),
    );

    add_entities_to_subgraph(&mut subgraph, entities);

    let roots: Vec<_> = root_record_ids
        .iter()
        .map(|root| {
            // Present by the validation above
            let entity = entities
                .iter()
                .find(|entity| &entity.metadata.record_id == root)
                .expect("validated roots are present in the entity list");
            EntityVertexId {
                base_id: root.entity_id.clone(),
                revision_id: subgraph.entity_revision_key(entity),
            }
            .into()
        })
        .collect();
    subgraph.roots = roots;

    debug!(
        roots = subgraph.roots.len(),
        vertices = subgraph.vertices.len(),
        "built subgraph"
    );

    Ok(subgraph)
}

/// Inserts the entities as vertices and synthesizes the edges they imply.
///
/// Only edges implied by the given entities are added: if a link endpoint
/// is missing from the vertex set this does not loop back to complete the
/// edge later.
pub(crate) fn add_entities_to_subgraph(subgraph: &mut Subgraph, entities: &[Entity]) {
    // Left and right endpoints of a link entity are assumed stable across
    // its revisions; the revisions contribute their validity intervals.
    let mut link_map: BTreeMap<EntityId, LinkInfo> = BTreeMap::new();

    for entity in entities {
        let entity_id = entity.metadata.record_id.entity_id.clone();
        let valid_interval = subgraph.entity_validity_interval(entity);

        if let Some(link_data) = &entity.link_data {
            link_map
                .entry(entity_id.clone())
                .and_modify(|info| info.valid_intervals.push(valid_interval.clone()))
                .or_insert_with(|| LinkInfo {
                    left_entity_id: link_data.left_entity_id.clone(),
                    right_entity_id: link_data.right_entity_id.clone(),
                    valid_intervals: vec![valid_interval.clone()],
                });
        }

        let revision_key = subgraph.entity_revision_key(entity);
        subgraph.insert_entity_vertex(revision_key, entity.clone());
    }

    for (link_entity_id, link_info) in link_map {
        let unioned = union_of_intervals(link_info.valid_intervals);

        for valid_interval in unioned {
            let at = interval_start_timestamp(&valid_interval);

            add_link_edge_pair(
                subgraph,
                KnowledgeGraphEdgeKind::HasLeftEntity,
                &link_entity_id,
                &link_info.left_entity_id,
                at,
                &valid_interval,
            );
            add_link_edge_pair(
                subgraph,
                KnowledgeGraphEdgeKind::HasRightEntity,
                &link_entity_id,
                &link_info.right_entity_id,
                at,
                &valid_interval,
            );
        }
    }
}

/// One synthesized edge from the link to its endpoint, plus the reversed
/// record stored at the endpoint
fn add_link_edge_pair(
    subgraph: &mut Subgraph,
    kind: KnowledgeGraphEdgeKind,
    link_entity_id: &EntityId,
    endpoint_id: &EntityId,
    at: Timestamp,
    valid_interval: &TimeInterval,
) {
    subgraph.insert_knowledge_edge(
        link_entity_id.clone(),
        at,
        KnowledgeGraphOutwardEdge::ToEntity {
            kind,
            reversed: false,
            right_endpoint: EntityIdWithInterval {
                entity_id: endpoint_id.clone(),
                interval: valid_interval.clone(),
            },
        },
    );
    subgraph.insert_knowledge_edge(
        endpoint_id.clone(),
        at,
        KnowledgeGraphOutwardEdge::ToEntity {
            kind,
            reversed: true,
            right_endpoint: EntityIdWithInterval {
                entity_id: link_entity_id.clone(),
                interval: valid_interval.clone(),
            },
        },
    );
}

fn interval_start_timestamp(interval: &TimeInterval) -> Timestamp {
    interval
        .start
        .limit()
        .unwrap_or_else(Timestamp::unix_epoch)
}
