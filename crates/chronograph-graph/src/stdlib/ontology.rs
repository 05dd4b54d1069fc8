//! Ontology element accessors
//!
//! Direct two-level map lookups by `(base URI, version)`. A vertex found
//! under the requested id but of the wrong kind indicates a programming
//! error, not a user error, and is reported as such.

use crate::ontology::{
    BaseUri, DataTypeWithMetadata, EntityTypeWithMetadata, PropertyTypeWithMetadata, VersionedUri,
};
use crate::subgraph::Subgraph;
use crate::vertex::OntologyVertex;
use chronograph_core::{Error, Result};

fn get_ontology_vertex<'a>(
    subgraph: &'a Subgraph,
    base_uri: &BaseUri,
    version: u32,
) -> Option<&'a OntologyVertex> {
    subgraph
        .vertices
        .ontology
        .get(base_uri)?
        .get(&version)
}

fn wrong_kind(expected: &'static str, vertex: &OntologyVertex, uri: &VersionedUri) -> Error {
    Error::WrongVertexKind {
        expected,
        found: vertex.kind(),
        id: uri.to_string(),
    }
}

/// Gets a data type by its versioned URI. Returns `Ok(None)` if absent.
///
/// # Errors
///
/// Returns [`Error::WrongVertexKind`] if the vertex under that id is not
/// a data type.
pub fn get_data_type_by_id<'a>(
    subgraph: &'a Subgraph,
    uri: &VersionedUri,
) -> Result<Option<&'a DataTypeWithMetadata>> {
    match get_ontology_vertex(subgraph, &uri.base_uri, uri.version) {
        None => Ok(None),
        Some(OntologyVertex::DataType(inner)) => Ok(Some(inner)),
        Some(other) => Err(wrong_kind("dataType", other, uri)),
    }
}

/// Gets a property type by its versioned URI. Returns `Ok(None)` if absent.
///
/// # Errors
///
/// Returns [`Error::WrongVertexKind`] if the vertex under that id is not
/// a property type.
pub fn get_property_type_by_id<'a>(
    subgraph: &'a Subgraph,
    uri: &VersionedUri,
) -> Result<Option<&'a PropertyTypeWithMetadata>> {
    match get_ontology_vertex(subgraph, &uri.base_uri, uri.version) {
        None => Ok(None),
        Some(OntologyVertex::PropertyType(inner)) => Ok(Some(inner)),
        Some(other) => Err(wrong_kind("propertyType", other, uri)),
    }
}

/// Gets an entity type by its versioned URI. Returns `Ok(None)` if absent.
///
/// # Errors
///
/// Returns [`Error::WrongVertexKind`] if the vertex under that id is not
/// an entity type.
pub fn get_entity_type_by_id<'a>(
    subgraph: &'a Subgraph,
    uri: &VersionedUri,
) -> Result<Option<&'a EntityTypeWithMetadata>> {
    match get_ontology_vertex(subgraph, &uri.base_uri, uri.version) {
        None => Ok(None),
        Some(OntologyVertex::EntityType(inner)) => Ok(Some(inner)),
        Some(other) => Err(wrong_kind("entityType", other, uri)),
    }
}

/// Returns all data types within the vertices of the subgraph
pub fn get_data_types(subgraph: &Subgraph) -> Vec<&DataTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .values()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::DataType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Returns all property types within the vertices of the subgraph
pub fn get_property_types(subgraph: &Subgraph) -> Vec<&PropertyTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .values()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::PropertyType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Returns all entity types within the vertices of the subgraph
pub fn get_entity_types(subgraph: &Subgraph) -> Vec<&EntityTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .values()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::EntityType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Returns every version of the data type family under `base_uri`
pub fn get_data_types_by_base_uri<'a>(
    subgraph: &'a Subgraph,
    base_uri: &BaseUri,
) -> Vec<&'a DataTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .get(base_uri)
        .into_iter()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::DataType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Returns every version of the property type family under `base_uri`
pub fn get_property_types_by_base_uri<'a>(
    subgraph: &'a Subgraph,
    base_uri: &BaseUri,
) -> Vec<&'a PropertyTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .get(base_uri)
        .into_iter()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::PropertyType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

/// Returns every version of the entity type family under `base_uri`
pub fn get_entity_types_by_base_uri<'a>(
    subgraph: &'a Subgraph,
    base_uri: &BaseUri,
) -> Vec<&'a EntityTypeWithMetadata> {
    subgraph
        .vertices
        .ontology
        .get(base_uri)
        .into_iter()
        .flat_map(|versions| versions.values())
        .filter_map(|vertex| match vertex {
            OntologyVertex::EntityType(inner) => Some(inner),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depths::GraphResolveDepths;
    use crate::ontology::{EntityType, OntologyElementMetadata, OntologyTypeRecordId};

    fn entity_type(base: &str, version: u32) -> OntologyVertex {
        let uri = VersionedUri::new(BaseUri::new(base), version);
        OntologyVertex::EntityType(EntityTypeWithMetadata {
            schema: EntityType {
                id: uri.clone(),
                title: "Test".to_string(),
                schema: serde_json::json!({}),
            },
            metadata: OntologyElementMetadata {
                record_id: OntologyTypeRecordId::from(uri),
            },
        })
    }

    fn subgraph_with_types() -> Subgraph {
        let mut subgraph = Subgraph::new(GraphResolveDepths::default(), None);
        subgraph.insert_ontology_vertex(entity_type("https://example.com/types/person/", 1));
        subgraph.insert_ontology_vertex(entity_type("https://example.com/types/person/", 2));
        subgraph.insert_ontology_vertex(entity_type("https://example.com/types/company/", 1));
        subgraph
    }

    #[test]
    fn test_lookup_by_exact_version() {
        let subgraph = subgraph_with_types();
        let uri = VersionedUri::new(BaseUri::new("https://example.com/types/person/"), 2);
        let found = get_entity_type_by_id(&subgraph, &uri).unwrap().unwrap();
        assert_eq!(found.metadata.record_id.version, 2);
    }

    #[test]
    fn test_absent_version_is_none() {
        let subgraph = subgraph_with_types();
        let uri = VersionedUri::new(BaseUri::new("https://example.com/types/person/"), 9);
        assert!(get_entity_type_by_id(&subgraph, &uri).unwrap().is_none());
    }

    #[test]
    fn test_wrong_kind_is_error() {
        let subgraph = subgraph_with_types();
        let uri = VersionedUri::new(BaseUri::new("https://example.com/types/person/"), 1);
        let err = get_data_type_by_id(&subgraph, &uri).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_family_listing() {
        let subgraph = subgraph_with_types();
        let person_versions = get_entity_types_by_base_uri(
            &subgraph,
            &BaseUri::new("https://example.com/types/person/"),
        );
        assert_eq!(person_versions.len(), 2);
        assert_eq!(get_entity_types(&subgraph).len(), 3);
        assert!(get_data_types(&subgraph).is_empty());
    }
}
