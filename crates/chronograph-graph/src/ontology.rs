//! Ontology element model
//!
//! The ontology is the type system entities conform to: data types,
//! property types and entity types. Elements are immutable per version;
//! the base URI identifies the family and the integer version the specific
//! element. This library only looks ontology elements up; schema
//! validation is out of scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a family of ontology element versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BaseUri(String);

impl BaseUri {
    /// Create a new base URI
    pub fn new<S: Into<String>>(uri: S) -> Self {
        Self(uri.into())
    }

    /// Get the URI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BaseUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A base URI pinned to one specific version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedUri {
    pub base_uri: BaseUri,
    pub version: u32,
}

impl VersionedUri {
    /// Create a versioned URI
    pub fn new(base_uri: BaseUri, version: u32) -> Self {
        Self { base_uri, version }
    }
}

impl fmt::Display for VersionedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v/{}", self.base_uri, self.version)
    }
}

/// Identifies one specific version of an ontology element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyTypeRecordId {
    pub base_uri: BaseUri,
    pub version: u32,
}

impl From<VersionedUri> for OntologyTypeRecordId {
    fn from(uri: VersionedUri) -> Self {
        Self {
            base_uri: uri.base_uri,
            version: uri.version,
        }
    }
}

impl fmt::Display for OntologyTypeRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v/{}", self.base_uri, self.version)
    }
}

/// Metadata shared by every ontology element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyElementMetadata {
    pub record_id: OntologyTypeRecordId,
}

/// A data type schema: the scalar shapes property values can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataType {
    #[serde(rename = "$id")]
    pub id: VersionedUri,
    pub title: String,
    /// Free-form schema payload; this library does not validate against it
    #[serde(flatten)]
    pub schema: serde_json::Value,
}

/// A property type schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[serde(rename = "$id")]
    pub id: VersionedUri,
    pub title: String,
    #[serde(flatten)]
    pub schema: serde_json::Value,
}

/// An entity type schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    #[serde(rename = "$id")]
    pub id: VersionedUri,
    pub title: String,
    #[serde(flatten)]
    pub schema: serde_json::Value,
}

/// A data type together with its record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypeWithMetadata {
    pub schema: DataType,
    pub metadata: OntologyElementMetadata,
}

/// A property type together with its record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTypeWithMetadata {
    pub schema: PropertyType,
    pub metadata: OntologyElementMetadata,
}

/// An entity type together with its record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTypeWithMetadata {
    pub schema: EntityType,
    pub metadata: OntologyElementMetadata,
}

impl EntityTypeWithMetadata {
    /// Build an entity type element from a schema, deriving the metadata
    /// from the schema's own id
    pub fn from_schema(schema: EntityType) -> Self {
        let record_id = OntologyTypeRecordId::from(schema.id.clone());
        Self {
            schema,
            metadata: OntologyElementMetadata { record_id },
        }
    }
}
