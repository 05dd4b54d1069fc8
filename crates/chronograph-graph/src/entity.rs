//! Entity model
//!
//! An entity is a versioned record in the knowledge graph. Each revision
//! carries the half-open interval during which it is the valid revision
//! along each temporal axis. An entity with `link_data` is a link entity:
//! it denotes a directed, typed relationship from a left entity to a right
//! entity.

use crate::ontology::{BaseUri, VersionedUri};
use chronograph_core::{TemporalAxis, TimeInterval};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier for an entity, stable across all of its revisions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new entity id
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one specific revision of an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecordId {
    pub entity_id: EntityId,
    pub edition_id: String,
}

impl fmt::Display for EntityRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at version {}", self.entity_id, self.edition_id)
    }
}

/// The validity interval of one revision along each temporal axis.
///
/// For a fixed entity id, the revisions' intervals along a given axis must
/// exactly tile: no gaps, no overlaps, when sorted by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTemporalMetadata {
    pub decision_time: TimeInterval,
    pub transaction_time: TimeInterval,
}

impl EntityTemporalMetadata {
    /// The validity interval along the given axis
    pub fn interval(&self, axis: TemporalAxis) -> &TimeInterval {
        match axis {
            TemporalAxis::DecisionTime => &self.decision_time,
            TemporalAxis::TransactionTime => &self.transaction_time,
        }
    }
}

/// Marks an entity as a link between two other entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkData {
    pub left_entity_id: EntityId,
    pub right_entity_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_to_right_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_to_left_order: Option<u32>,
}

/// Properties of an entity, keyed by the base URI of the property type
pub type PropertyObject = BTreeMap<BaseUri, serde_json::Value>;

/// Metadata of one entity revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub record_id: EntityRecordId,
    pub entity_type_id: VersionedUri,
    /// `None` in non-temporal mode, where the single revision is treated
    /// as valid from the epoch onwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_versioning: Option<EntityTemporalMetadata>,
}

/// A revisioned record in the knowledge graph, optionally a link between
/// two other entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub metadata: EntityMetadata,
    pub properties: PropertyObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_data: Option<LinkData>,
}

impl Entity {
    /// Returns true if this entity denotes a relationship between two
    /// other entities
    pub fn is_link(&self) -> bool {
        self.link_data.is_some()
    }

    /// The interval during which this revision is the valid one along the
    /// given axis; in non-temporal mode this degenerates to
    /// `[epoch, unbounded)`.
    pub fn validity_interval(&self, axis: TemporalAxis) -> TimeInterval {
        self.metadata
            .temporal_versioning
            .as_ref()
            .map(|versioning| versioning.interval(axis).clone())
            .unwrap_or_else(TimeInterval::from_epoch_onwards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronograph_core::Timestamp;

    fn versioned(interval: TimeInterval) -> Entity {
        Entity {
            metadata: EntityMetadata {
                record_id: EntityRecordId {
                    entity_id: EntityId::new("e1"),
                    edition_id: "ed1".to_string(),
                },
                entity_type_id: VersionedUri::new(BaseUri::new("https://example.com/types/thing/"), 1),
                temporal_versioning: Some(EntityTemporalMetadata {
                    decision_time: interval.clone(),
                    transaction_time: interval,
                }),
            },
            properties: PropertyObject::new(),
            link_data: None,
        }
    }

    #[test]
    fn test_validity_interval_temporal() {
        let interval = TimeInterval::half_open(
            Timestamp::from_millis(1_000),
            Timestamp::from_millis(2_000),
        );
        let entity = versioned(interval.clone());
        assert_eq!(entity.validity_interval(TemporalAxis::DecisionTime), interval);
    }

    #[test]
    fn test_validity_interval_degenerate() {
        let mut entity = versioned(TimeInterval::unbounded());
        entity.metadata.temporal_versioning = None;
        assert_eq!(
            entity.validity_interval(TemporalAxis::DecisionTime),
            TimeInterval::from_epoch_onwards()
        );
        assert!(!entity.is_link());
    }
}
