//! Root resolution
//!
//! A subgraph declares its roots as vertex ids; every one of them must
//! resolve to a stored vertex. A root without a vertex indicates the
//! subgraph was constructed incorrectly.

use crate::entity::Entity;
use crate::subgraph::Subgraph;
use crate::vertex::{GraphElementVertexId, Vertex};
use chronograph_core::{Error, Result};

/// Returns all root elements of the subgraph.
///
/// # Errors
///
/// Returns [`Error::Internal`] if a declared root has no corresponding
/// vertex.
pub fn get_roots(subgraph: &Subgraph) -> Result<Vec<Vertex>> {
    subgraph
        .roots
        .iter()
        .map(|root| match root {
            GraphElementVertexId::Entity(id) => subgraph
                .vertices
                .entities
                .get(&id.base_id)
                .and_then(|revisions| revisions.get(&id.revision_id))
                .map(|entity| Vertex::Entity(entity.clone()))
                .ok_or_else(|| missing_root(root)),
            GraphElementVertexId::Ontology(id) => subgraph
                .vertices
                .ontology
                .get(&id.base_id)
                .and_then(|versions| versions.get(&id.revision_id))
                .map(|vertex| Vertex::from(vertex.clone()))
                .ok_or_else(|| missing_root(root)),
        })
        .collect()
}

/// Returns the entity roots of the subgraph.
///
/// # Errors
///
/// Returns [`Error::Internal`] if an entity root has no corresponding
/// vertex.
pub fn get_entity_roots(subgraph: &Subgraph) -> Result<Vec<&Entity>> {
    subgraph
        .roots
        .iter()
        .filter_map(|root| match root {
            GraphElementVertexId::Entity(id) => Some(
                subgraph
                    .vertices
                    .entities
                    .get(&id.base_id)
                    .and_then(|revisions| revisions.get(&id.revision_id))
                    .ok_or_else(|| missing_root(root)),
            ),
            GraphElementVertexId::Ontology(_) => None,
        })
        .collect()
}

fn missing_root(root: &GraphElementVertexId) -> Error {
    Error::Internal(format!(
        "roots should have corresponding vertices but {root} was missing"
    ))
}
