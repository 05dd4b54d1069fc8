//! Subgraph edges
//!
//! Edges are stored outward: at their source element, keyed by the instant
//! the edge first became true, as a list of `OutwardEdge`s pointing at the
//! target. A link entity implies four directed edges: `HAS_LEFT_ENTITY`
//! from the link to its left endpoint plus the reversed record at the
//! endpoint, and the same pair for `HAS_RIGHT_ENTITY`.

use crate::entity::EntityId;
use crate::ontology::{BaseUri, OntologyTypeRecordId};
use chronograph_core::{TimeInterval, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge kinds between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnowledgeGraphEdgeKind {
    HasLeftEntity,
    HasRightEntity,
}

/// Edge kinds between two ontology elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OntologyEdgeKind {
    InheritsFrom,
    ConstrainsValuesOn,
    ConstrainsPropertiesOn,
    ConstrainsLinksOn,
    ConstrainsLinkDestinationsOn,
}

/// Edge kinds crossing between the knowledge graph and the ontology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SharedEdgeKind {
    IsOfType,
}

/// An entity endpoint qualified with the interval over which the edge to
/// it held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityIdWithInterval {
    pub entity_id: EntityId,
    pub interval: TimeInterval,
}

/// An edge record stored at an entity vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnowledgeGraphOutwardEdge {
    /// An entity-to-entity edge, interval-qualified
    ToEntity {
        kind: KnowledgeGraphEdgeKind,
        reversed: bool,
        #[serde(rename = "rightEndpoint")]
        right_endpoint: EntityIdWithInterval,
    },
    /// The entity's `IS_OF_TYPE` edge into the ontology
    ToOntology {
        kind: SharedEdgeKind,
        #[serde(rename = "rightEndpoint")]
        right_endpoint: OntologyTypeRecordId,
    },
}

impl KnowledgeGraphOutwardEdge {
    /// A reversed `HAS_LEFT_ENTITY` record: the source entity is the left
    /// endpoint of the link at the other end
    pub fn is_outgoing_link_edge(&self) -> bool {
        matches!(
            self,
            KnowledgeGraphOutwardEdge::ToEntity {
                kind: KnowledgeGraphEdgeKind::HasLeftEntity,
                reversed: true,
                ..
            }
        )
    }

    /// A reversed `HAS_RIGHT_ENTITY` record: the source entity is the
    /// right endpoint of the link at the other end
    pub fn is_incoming_link_edge(&self) -> bool {
        matches!(
            self,
            KnowledgeGraphOutwardEdge::ToEntity {
                kind: KnowledgeGraphEdgeKind::HasRightEntity,
                reversed: true,
                ..
            }
        )
    }

    /// The non-reversed `HAS_LEFT_ENTITY` record stored at a link entity
    pub fn is_has_left_entity_edge(&self) -> bool {
        matches!(
            self,
            KnowledgeGraphOutwardEdge::ToEntity {
                kind: KnowledgeGraphEdgeKind::HasLeftEntity,
                reversed: false,
                ..
            }
        )
    }

    /// The non-reversed `HAS_RIGHT_ENTITY` record stored at a link entity
    pub fn is_has_right_entity_edge(&self) -> bool {
        matches!(
            self,
            KnowledgeGraphOutwardEdge::ToEntity {
                kind: KnowledgeGraphEdgeKind::HasRightEntity,
                reversed: false,
                ..
            }
        )
    }

    /// The entity endpoint of an entity-to-entity edge
    pub fn entity_endpoint(&self) -> Option<&EntityIdWithInterval> {
        match self {
            KnowledgeGraphOutwardEdge::ToEntity { right_endpoint, .. } => Some(right_endpoint),
            KnowledgeGraphOutwardEdge::ToOntology { .. } => None,
        }
    }
}

/// An edge record stored at an ontology vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OntologyOutwardEdge {
    /// An ontology-to-ontology edge
    ToOntology {
        kind: OntologyEdgeKind,
        #[serde(rename = "rightEndpoint")]
        right_endpoint: OntologyTypeRecordId,
    },
    /// The reversed `IS_OF_TYPE` record: some entity is of this type
    ToEntity {
        kind: SharedEdgeKind,
        #[serde(rename = "rightEndpoint")]
        right_endpoint: EntityIdWithInterval,
    },
}

/// The two-level edge maps of a subgraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edges {
    pub knowledge_graph: BTreeMap<EntityId, BTreeMap<Timestamp, Vec<KnowledgeGraphOutwardEdge>>>,
    pub ontology: BTreeMap<BaseUri, BTreeMap<u32, Vec<OntologyOutwardEdge>>>,
}

impl Edges {
    /// Returns true if no edge of either kind is stored
    pub fn is_empty(&self) -> bool {
        self.knowledge_graph.is_empty() && self.ontology.is_empty()
    }
}
