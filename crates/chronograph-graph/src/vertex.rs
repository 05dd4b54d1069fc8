//! Subgraph vertices
//!
//! A vertex is one stored revision of an entity or ontology element.
//! Vertices are keyed by a two-level map: base id, then revision id. For
//! entities the revision id is the start instant of the revision's
//! validity interval; for ontology elements it is the integer version.

use crate::entity::{Entity, EntityId};
use crate::ontology::{
    BaseUri, DataTypeWithMetadata, EntityTypeWithMetadata, PropertyTypeWithMetadata,
};
use chronograph_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies an entity vertex: entity id plus revision start instant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityVertexId {
    pub base_id: EntityId,
    pub revision_id: Timestamp,
}

/// Identifies an ontology element vertex: base URI plus version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyTypeVertexId {
    pub base_id: BaseUri,
    pub revision_id: u32,
}

/// Identifies any vertex of the subgraph; the shape roots are declared in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphElementVertexId {
    Entity(EntityVertexId),
    Ontology(OntologyTypeVertexId),
}

impl fmt::Display for GraphElementVertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphElementVertexId::Entity(id) => {
                write!(f, "{} at {}", id.base_id, id.revision_id)
            }
            GraphElementVertexId::Ontology(id) => {
                write!(f, "{}v/{}", id.base_id, id.revision_id)
            }
        }
    }
}

impl From<EntityVertexId> for GraphElementVertexId {
    fn from(id: EntityVertexId) -> Self {
        GraphElementVertexId::Entity(id)
    }
}

impl From<OntologyTypeVertexId> for GraphElementVertexId {
    fn from(id: OntologyTypeVertexId) -> Self {
        GraphElementVertexId::Ontology(id)
    }
}

/// A stored ontology element revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "inner", rename_all = "camelCase")]
pub enum OntologyVertex {
    DataType(DataTypeWithMetadata),
    PropertyType(PropertyTypeWithMetadata),
    EntityType(EntityTypeWithMetadata),
}

impl OntologyVertex {
    /// The base id this vertex is stored under
    pub fn base_uri(&self) -> &BaseUri {
        match self {
            OntologyVertex::DataType(inner) => &inner.metadata.record_id.base_uri,
            OntologyVertex::PropertyType(inner) => &inner.metadata.record_id.base_uri,
            OntologyVertex::EntityType(inner) => &inner.metadata.record_id.base_uri,
        }
    }

    /// The version this vertex is stored under
    pub fn version(&self) -> u32 {
        match self {
            OntologyVertex::DataType(inner) => inner.metadata.record_id.version,
            OntologyVertex::PropertyType(inner) => inner.metadata.record_id.version,
            OntologyVertex::EntityType(inner) => inner.metadata.record_id.version,
        }
    }

    /// Short name of the vertex kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            OntologyVertex::DataType(_) => "dataType",
            OntologyVertex::PropertyType(_) => "propertyType",
            OntologyVertex::EntityType(_) => "entityType",
        }
    }
}

/// Any stored vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "inner", rename_all = "camelCase")]
pub enum Vertex {
    Entity(Entity),
    DataType(DataTypeWithMetadata),
    PropertyType(PropertyTypeWithMetadata),
    EntityType(EntityTypeWithMetadata),
}

impl From<OntologyVertex> for Vertex {
    fn from(vertex: OntologyVertex) -> Self {
        match vertex {
            OntologyVertex::DataType(inner) => Vertex::DataType(inner),
            OntologyVertex::PropertyType(inner) => Vertex::PropertyType(inner),
            OntologyVertex::EntityType(inner) => Vertex::EntityType(inner),
        }
    }
}

/// The two-level vertex maps of a subgraph, with revision keys kept sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertices {
    pub entities: BTreeMap<EntityId, BTreeMap<Timestamp, Entity>>,
    pub ontology: BTreeMap<BaseUri, BTreeMap<u32, OntologyVertex>>,
}

impl Vertices {
    /// Returns true if no vertex of either kind is stored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.ontology.is_empty()
    }

    /// Total number of stored vertex revisions
    pub fn len(&self) -> usize {
        self.entities.values().map(BTreeMap::len).sum::<usize>()
            + self.ontology.values().map(BTreeMap::len).sum::<usize>()
    }
}
