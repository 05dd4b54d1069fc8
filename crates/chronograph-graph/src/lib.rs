//! Chronograph Graph Library
//!
//! The in-memory knowledge-graph snapshot: entity and ontology element
//! models, the `Subgraph` container, the builder that synthesizes link
//! edges, the read-only query standard library, and the depth-bounded
//! traversal engine.
//!
//! # Overview
//!
//! Callers supply a flat list of entities (some of which may be link
//! entities relating a left and a right entity). [`build_subgraph`] turns
//! that list into a [`Subgraph`]: a vertex map keyed by base id and
//! revision, an edge map with four synthesized directed edges per link,
//! declared roots, and the temporal axes the data was selected with. The
//! `stdlib` module reads such a snapshot; the `traverse` module expands a
//! bounded neighborhood of a starting element into a new, smaller
//! `Subgraph`.
//!
//! # Modules
//!
//! - `entity` - Entities, link data, temporal versioning metadata
//! - `ontology` - Ontology element identifiers and type stubs
//! - `vertex` / `edge` / `depths` - Subgraph building blocks
//! - `subgraph` - The aggregate container and insertion primitives
//! - `builder` - Subgraph construction from flat entity lists
//! - `stdlib` - Read-only query functions
//! - `traverse` - Depth-bounded traversal and edge finalization

pub mod builder;
pub mod depths;
pub mod edge;
pub mod entity;
pub mod ontology;
pub mod stdlib;
pub mod subgraph;
pub mod traverse;
pub mod vertex;

pub use builder::build_subgraph;
pub use depths::{EdgeDirection, EdgeResolveDepths, GraphResolveDepths};
pub use edge::{
    EntityIdWithInterval, KnowledgeGraphEdgeKind, KnowledgeGraphOutwardEdge, OntologyEdgeKind,
    OntologyOutwardEdge, SharedEdgeKind,
};
pub use entity::{
    Entity, EntityId, EntityMetadata, EntityRecordId, EntityTemporalMetadata, LinkData,
    PropertyObject,
};
pub use ontology::{
    BaseUri, DataType, DataTypeWithMetadata, EntityType, EntityTypeWithMetadata,
    OntologyElementMetadata, OntologyTypeRecordId, PropertyType, PropertyTypeWithMetadata,
    VersionedUri,
};
pub use subgraph::Subgraph;
pub use traverse::{TraversalContext, TraversalSubgraph, traverse_element};
pub use vertex::{
    EntityVertexId, GraphElementVertexId, OntologyTypeVertexId, OntologyVertex, Vertex, Vertices,
};
