//! Entity accessors

use crate::entity::{Entity, EntityId};
use crate::subgraph::Subgraph;
use chronograph_core::{TimeInterval, Timestamp};

/// Returns all entities within the vertices of the subgraph, optionally
/// only the latest revision of each
pub fn get_entities(subgraph: &Subgraph, latest_only: bool) -> Vec<&Entity> {
    subgraph
        .vertices
        .entities
        .values()
        .flat_map(|revisions| {
            if latest_only {
                revisions.values().last().into_iter().collect::<Vec<_>>()
            } else {
                revisions.values().collect()
            }
        })
        .collect()
}

/// Gets an entity by id from within the vertices of the subgraph.
///
/// Without `at`, the latest revision is returned. With `at`, the revision
/// whose variable-axis validity interval contains that instant is
/// returned. Returns `None` if the entity (or a matching revision)
/// couldn't be found.
pub fn get_entity_revision<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    at: Option<Timestamp>,
) -> Option<&'a Entity> {
    let revisions = subgraph.vertices.entities.get(entity_id)?;

    match at {
        // Revision keys are sorted ascending; the last one is the latest
        None => revisions.values().last(),
        Some(target) => revisions.values().find(|entity| {
            subgraph
                .entity_validity_interval(entity)
                .contains_timestamp(target)
        }),
    }
}

/// Returns all revisions of an entity, optionally constrained to those
/// wholly contained in the given interval
pub fn get_entity_revisions<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: Option<&TimeInterval>,
) -> Vec<&'a Entity> {
    let Some(revisions) = subgraph.vertices.entities.get(entity_id) else {
        return Vec::new();
    };

    match interval {
        None => revisions.values().collect(),
        Some(interval) => revisions
            .iter()
            .filter(|(start_time, _)| interval.contains_timestamp(**start_time))
            .map(|(_, entity)| entity)
            .filter(|entity| {
                interval.contains_interval(&subgraph.entity_validity_interval(entity))
            })
            .collect(),
    }
}

/// Returns the revisions of an entity whose validity overlaps the given
/// interval; the selection link queries resolve endpoints with
pub(crate) fn get_entity_revisions_intersecting<'a>(
    subgraph: &'a Subgraph,
    entity_id: &EntityId,
    interval: &TimeInterval,
) -> Vec<&'a Entity> {
    let Some(revisions) = subgraph.vertices.entities.get(entity_id) else {
        return Vec::new();
    };

    revisions
        .values()
        .filter(|entity| {
            subgraph
                .entity_validity_interval(entity)
                .overlaps(interval)
        })
        .collect()
}
