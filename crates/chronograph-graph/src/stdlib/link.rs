//! Link traversal accessors
//!
//! Links are stored as entities with `link_data`, plus the four directed
//! edges the builder synthesized for them. These functions walk those
//! edges for a given search interval; when no interval is supplied they
//! default to the latest instant the subgraph's query could see.

use crate::edge::KnowledgeGraphOutwardEdge;
use crate::entity::{Entity, EntityId, EntityRecordId};
use crate::stdlib::entity::get_entity_revisions_intersecting;
use crate::stdlib::map_elements_into_revisions;
use crate::subgraph::Subgraph;
use chronograph_core::{Error, Result, TimeInterval, Timestamp};
use std::collections::HashSet;

/// An outgoing link's revisions grouped with the revisions of its target
#[derive(Debug, Clone, PartialEq)]
pub struct LinkEntityAndRightEntity<'a> {
    pub link_entity: Vec<&'a Entity>,
    pub right_entity: Vec<&'a Entity>,
}

/// Keep only edge records created at or before the search interval's end
fn edge_created_within<'a, I>(
    edge_entries: I,
    interval: &TimeInterval,
) -> impl Iterator<Item = (Timestamp, &'a Vec<KnowledgeGraphOutwardEdge>)>
where
    I: Iterator<
        Item = (
            &'a Timestamp,
            &'a Vec<KnowledgeGraphOutwardEdge>,
        ),
    >,
{
    let end_limit = interval.end.limit();
    edge_entries
        .filter(move |(edge_timestamp, _)| {
            end_limit.is_none_or(|limit| **edge_timestamp <= limit)
        })
        .map(|(edge_timestamp, edges)| (*edge_timestamp, edges))
}

fn resolve_link_edges<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: &TimeInterval,
    reversed_kind_filter: fn(&KnowledgeGraphOutwardEdge) -> bool,
) -> Vec<&'a Entity> {
    let Some(entity_edges) = subgraph.edges.knowledge_graph.get(entity_id) else {
        return Vec::new();
    };

    let mut seen: HashSet<EntityRecordId> = HashSet::new();
    let mut links = Vec::new();

    for (_, edges) in edge_created_within(entity_edges.iter(), interval) {
        for edge in edges.iter().filter(|edge| reversed_kind_filter(edge)) {
            let Some(endpoint) = edge.entity_endpoint() else {
                continue;
            };
            for revision in
                get_entity_revisions_intersecting(subgraph, &endpoint.entity_id, interval)
            {
                if seen.insert(revision.metadata.record_id.clone()) {
                    links.push(revision);
                }
            }
        }
    }

    links
}

/// For a given search interval, get all outgoing link entities from a
/// given entity. Defaults to the latest instant the subgraph's query
/// could see.
pub fn get_outgoing_links_for_entity<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Vec<&'a Entity> {
    let search = interval
        .cloned()
        .unwrap_or_else(|| subgraph.latest_instant_interval());
    resolve_link_edges(
        subgraph,
        entity_id,
        &search,
        KnowledgeGraphOutwardEdge::is_outgoing_link_edge,
    )
}

/// For a given search interval, get all incoming link entities to a given
/// entity
pub fn get_incoming_links_for_entity<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Vec<&'a Entity> {
    let search = interval
        .cloned()
        .unwrap_or_else(|| subgraph.latest_instant_interval());
    resolve_link_edges(
        subgraph,
        entity_id,
        &search,
        KnowledgeGraphOutwardEdge::is_incoming_link_edge,
    )
}

fn endpoint_for_link_entity<'a>(
    subgraph: &'a Subgraph,
    link_entity_id: &EntityId,
    interval: &TimeInterval,
    edge_filter: fn(&KnowledgeGraphOutwardEdge) -> bool,
    endpoint_name: &'static str,
) -> Result<Vec<&'a Entity>> {
    let link_entity_edges = subgraph
        .edges
        .knowledge_graph
        .get(link_entity_id)
        .ok_or_else(|| Error::MissingEdgeEndpoint {
            link_entity_id: link_entity_id.to_string(),
            endpoint: endpoint_name,
        })?;

    let endpoint_entity_id = link_entity_edges
        .values()
        .flatten()
        .find(|edge| edge_filter(edge))
        .and_then(|edge| edge.entity_endpoint())
        .map(|endpoint| endpoint.entity_id.clone())
        .ok_or_else(|| Error::MissingEdgeEndpoint {
            link_entity_id: link_entity_id.to_string(),
            endpoint: endpoint_name,
        })?;

    if !subgraph
        .vertices
        .entities
        .contains_key(&endpoint_entity_id)
    {
        return Err(Error::Internal(format!(
            "all edge endpoints should have a corresponding vertex, but {endpoint_entity_id} is missing"
        )));
    }

    Ok(get_entity_revisions_intersecting(
        subgraph,
        &endpoint_entity_id,
        interval,
    ))
}

/// For a given search interval, get the revisions of the "left entity"
/// (by default the source) of a given link entity.
///
/// # Errors
///
/// A link entity structurally must have a left endpoint edge; its absence
/// is an internal-consistency error, not a lookup miss.
pub fn get_left_entity_for_link_entity<'a>(
    subgraph: &'a Subgraph,
    link_entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Result<Vec<&'a Entity>> {
    let search = interval
        .cloned()
        .unwrap_or_else(|| subgraph.latest_instant_interval());
    endpoint_for_link_entity(
        subgraph,
        link_entity_id,
        &search,
        KnowledgeGraphOutwardEdge::is_has_left_entity_edge,
        "left",
    )
}

/// For a given search interval, get the revisions of the "right entity"
/// (by default the target) of a given link entity.
///
/// # Errors
///
/// A link entity structurally must have a right endpoint edge; its absence
/// is an internal-consistency error, not a lookup miss.
pub fn get_right_entity_for_link_entity<'a>(
    subgraph: &'a Subgraph,
    link_entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Result<Vec<&'a Entity>> {
    let search = interval
        .cloned()
        .unwrap_or_else(|| subgraph.latest_instant_interval());
    endpoint_for_link_entity(
        subgraph,
        link_entity_id,
        &search,
        KnowledgeGraphOutwardEdge::is_has_right_entity_edge,
        "right",
    )
}

/// For a given search interval, get all outgoing link entities and their
/// target ("right") entities from a given entity, with the revisions of
/// the same link grouped together
pub fn get_outgoing_link_and_target_entities<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Result<Vec<LinkEntityAndRightEntity<'a>>> {
    let outgoing_links = get_outgoing_links_for_entity(subgraph, entity_id, interval);

    map_elements_into_revisions(outgoing_links)
        .into_iter()
        .map(|(link_entity_id, link_revisions)| {
            let right_entity =
                get_right_entity_for_link_entity(subgraph, &link_entity_id, interval)?;
            Ok(LinkEntityAndRightEntity {
                link_entity: link_revisions,
                right_entity,
            })
        })
        .collect()
}
