//! The subgraph container
//!
//! A `Subgraph` is an in-memory snapshot of selected vertices and edges,
//! with declared roots, the traversal depths used to produce it, and the
//! temporal axes it was queried with (`None` in non-temporal mode).
//!
//! Construction code mutates a privately-owned draft through the insertion
//! primitives below and hands the finished value back by move; a subgraph
//! a caller holds is never mutated behind its back.

use crate::depths::GraphResolveDepths;
use crate::edge::{Edges, KnowledgeGraphOutwardEdge, OntologyOutwardEdge};
use crate::entity::{Entity, EntityId};
use crate::ontology::BaseUri;
use crate::vertex::{GraphElementVertexId, OntologyVertex, Vertices};
use chronograph_core::{SubgraphTemporalAxes, TemporalAxis, TimeInterval, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// An in-memory snapshot of part of the knowledge graph.
///
/// Every root and every edge endpoint resolves to a vertex present in
/// `vertices`; construction and traversal guarantee this or fail loudly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgraph {
    pub roots: Vec<GraphElementVertexId>,
    pub vertices: Vertices,
    pub edges: Edges,
    pub depths: GraphResolveDepths,
    /// `None` in non-temporal mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_axes: Option<SubgraphTemporalAxes>,
}

impl Subgraph {
    /// Create an empty subgraph with the given depths and axes
    pub fn new(depths: GraphResolveDepths, temporal_axes: Option<SubgraphTemporalAxes>) -> Self {
        Self {
            roots: Vec::new(),
            vertices: Vertices::default(),
            edges: Edges::default(),
            depths,
            temporal_axes,
        }
    }

    /// The axis this subgraph's queries range over, when temporal
    pub fn variable_axis(&self) -> Option<TemporalAxis> {
        self.temporal_axes
            .as_ref()
            .map(|axes| axes.resolved.variable.axis)
    }

    /// The validity interval of an entity revision along the variable
    /// axis. In non-temporal mode every revision is treated as valid from
    /// the epoch onwards.
    pub fn entity_validity_interval(&self, entity: &Entity) -> TimeInterval {
        match self.variable_axis() {
            Some(axis) => entity.validity_interval(axis),
            None => TimeInterval::from_epoch_onwards(),
        }
    }

    /// The revision key an entity is stored under: the start instant of
    /// its variable-axis validity interval
    pub fn entity_revision_key(&self, entity: &Entity) -> Timestamp {
        self.entity_validity_interval(entity)
            .start
            .limit()
            .unwrap_or_else(Timestamp::unix_epoch)
    }

    /// The default search interval for link queries: the latest instant
    /// the query can see, or all of time in non-temporal mode
    pub fn latest_instant_interval(&self) -> TimeInterval {
        match &self.temporal_axes {
            Some(axes) => axes.resolved.latest_instant_interval(),
            None => TimeInterval::unbounded(),
        }
    }

    // ========== Insertion Primitives ==========
    //
    // Construction-phase mutators, the counterparts of the original
    // `internal/mutate-subgraph` helpers. Callers assembling a snapshot
    // use them on a draft they own exclusively.

    /// Insert an entity revision at `(entity id, revision key)`,
    /// overwriting any previous vertex at the same key
    pub fn insert_entity_vertex(&mut self, revision_key: Timestamp, entity: Entity) {
        trace!(entity_id = %entity.metadata.record_id.entity_id, revision = %revision_key, "inserting entity vertex");
        self.vertices
            .entities
            .entry(entity.metadata.record_id.entity_id.clone())
            .or_default()
            .insert(revision_key, entity);
    }

    /// Insert an ontology element vertex at `(base URI, version)`
    pub fn insert_ontology_vertex(&mut self, vertex: OntologyVertex) {
        self.vertices
            .ontology
            .entry(vertex.base_uri().clone())
            .or_default()
            .insert(vertex.version(), vertex);
    }

    /// Record an outward edge at `source` for the instant `at`. Exact
    /// duplicates at the same instant are skipped.
    pub fn insert_knowledge_edge(
        &mut self,
        source: EntityId,
        at: Timestamp,
        edge: KnowledgeGraphOutwardEdge,
    ) {
        let edges_at = self
            .edges
            .knowledge_graph
            .entry(source)
            .or_default()
            .entry(at)
            .or_default();
        if !edges_at.contains(&edge) {
            edges_at.push(edge);
        }
    }

    /// Record an outward edge at the ontology element `(source, version)`
    pub fn insert_ontology_edge(
        &mut self,
        source: BaseUri,
        version: u32,
        edge: OntologyOutwardEdge,
    ) {
        let edges_at = self
            .edges
            .ontology
            .entry(source)
            .or_default()
            .entry(version)
            .or_default();
        if !edges_at.contains(&edge) {
            edges_at.push(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{EntityIdWithInterval, KnowledgeGraphEdgeKind};
    use crate::entity::{EntityMetadata, EntityRecordId, PropertyObject};
    use crate::ontology::VersionedUri;

    fn entity(id: &str) -> Entity {
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
                temporal_versioning: None,
            },
            properties: PropertyObject::new(),
            link_data: None,
        }
    }

    #[test]
    fn test_vertex_insertion_overwrites_same_key() {
        let mut subgraph = Subgraph::new(GraphResolveDepths::default(), None);
        let revision = Timestamp::unix_epoch();

        subgraph.insert_entity_vertex(revision, entity("e1"));
        subgraph.insert_entity_vertex(revision, entity("e1"));

        assert_eq!(subgraph.vertices.entities[&EntityId::new("e1")].len(), 1);
    }

    #[test]
    fn test_edge_insertion_deduplicates() {
        let mut subgraph = Subgraph::new(GraphResolveDepths::default(), None);
        let at = Timestamp::unix_epoch();
        let edge = KnowledgeGraphOutwardEdge::ToEntity {
            kind: KnowledgeGraphEdgeKind::HasLeftEntity,
            reversed: false,
            right_endpoint: EntityIdWithInterval {
                entity_id: EntityId::new("e2"),
                interval: TimeInterval::from_epoch_onwards(),
            },
        };

        subgraph.insert_knowledge_edge(EntityId::new("l1"), at, edge.clone());
        subgraph.insert_knowledge_edge(EntityId::new("l1"), at, edge);

        assert_eq!(
            subgraph.edges.knowledge_graph[&EntityId::new("l1")][&at].len(),
            1
        );
    }

    #[test]
    fn test_non_temporal_defaults() {
        let subgraph = Subgraph::new(GraphResolveDepths::default(), None);
        assert_eq!(subgraph.variable_axis(), None);
        assert_eq!(subgraph.latest_instant_interval(), TimeInterval::unbounded());
        assert_eq!(
            subgraph.entity_validity_interval(&entity("e1")),
            TimeInterval::from_epoch_onwards()
        );
    }
}
