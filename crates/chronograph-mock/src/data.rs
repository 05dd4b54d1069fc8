//! Fixture data
//!
//! A small deterministic graph for exercising blocks against the mock
//! datastore: two people, a company, and the links between them, plus the
//! entity types they conform to. Entity ids are fixed so tests can refer
//! to them; edition ids are generated per run.
//!
//! Alice has two decision-time revisions whose intervals tile exactly,
//! so revision-sensitive queries have something to bite on.

use chronograph_core::{
    PinnedTemporalAxisUnresolved, QueryTemporalAxes, QueryTemporalAxesUnresolved, Result,
    TemporalAxis, TemporalBound, TimeInterval, TimeIntervalUnresolved, Timestamp,
    VariableTemporalAxisUnresolved,
};
use chronograph_graph::{
    BaseUri, Entity, EntityId, EntityMetadata, EntityRecordId, EntityTemporalMetadata, EntityType,
    EntityTypeWithMetadata, GraphResolveDepths, LinkData, OntologyVertex, PropertyObject, Subgraph,
    VersionedUri, build_subgraph,
};
use uuid::Uuid;

/// 2021-01-01T00:00:00Z, when the fixture world begins
pub const FIXTURE_EPOCH_MILLIS: i64 = 1_609_459_200_000;
/// 2022-06-01T00:00:00Z, when Alice's second revision takes over
pub const FIXTURE_REVISION_MILLIS: i64 = 1_654_041_600_000;

pub fn person_type_uri() -> VersionedUri {
    VersionedUri::new(BaseUri::new("https://example.com/types/entity-type/person/"), 1)
}

pub fn company_type_uri() -> VersionedUri {
    VersionedUri::new(BaseUri::new("https://example.com/types/entity-type/company/"), 1)
}

pub fn works_at_type_uri() -> VersionedUri {
    VersionedUri::new(BaseUri::new("https://example.com/types/entity-type/works-at/"), 1)
}

pub fn founded_type_uri() -> VersionedUri {
    VersionedUri::new(BaseUri::new("https://example.com/types/entity-type/founded/"), 1)
}

pub fn name_property_uri() -> BaseUri {
    BaseUri::new("https://example.com/types/property-type/name/")
}

fn fresh_edition_id() -> String {
    Uuid::new_v4().to_string()
}

fn entity(
    entity_id: &str,
    type_uri: VersionedUri,
    name: &str,
    interval: TimeInterval,
) -> Entity {
    let mut properties = PropertyObject::new();
    properties.insert(name_property_uri(), serde_json::json!(name));
    Entity {
        metadata: EntityMetadata {
            record_id: EntityRecordId {
                entity_id: EntityId::new(entity_id),
                edition_id: fresh_edition_id(),
            },
            entity_type_id: type_uri,
            temporal_versioning: Some(EntityTemporalMetadata {
                decision_time: interval.clone(),
                transaction_time: interval,
            }),
        },
        properties,
        link_data: None,
    }
}

fn link(
    entity_id: &str,
    type_uri: VersionedUri,
    left: &str,
    right: &str,
    interval: TimeInterval,
) -> Entity {
    let mut link_entity = entity(entity_id, type_uri, "", interval);
    link_entity.properties = PropertyObject::new();
    link_entity.link_data = Some(LinkData {
        left_entity_id: EntityId::new(left),
        right_entity_id: EntityId::new(right),
        left_to_right_order: None,
        right_to_left_order: None,
    });
    link_entity
}

/// The fixture entities: alice (two tiling revisions), bob, the acme
/// company, alice's `works-at` link and bob's `founded` link
pub fn mock_data_entities() -> Vec<Entity> {
    let start = Timestamp::from_millis(FIXTURE_EPOCH_MILLIS);
    let revision = Timestamp::from_millis(FIXTURE_REVISION_MILLIS);

    vec![
        entity(
            "alice",
            person_type_uri(),
            "Alice",
            TimeInterval::half_open(start, revision),
        ),
        entity(
            "alice",
            person_type_uri(),
            "Alice Smith",
            TimeInterval::from_timestamp_onwards(revision),
        ),
        entity(
            "bob",
            person_type_uri(),
            "Bob",
            TimeInterval::from_timestamp_onwards(start),
        ),
        entity(
            "acme",
            company_type_uri(),
            "Acme Corp",
            TimeInterval::from_timestamp_onwards(start),
        ),
        link(
            "alice-works-at-acme",
            works_at_type_uri(),
            "alice",
            "acme",
            TimeInterval::from_timestamp_onwards(revision),
        ),
        link(
            "bob-founded-acme",
            founded_type_uri(),
            "bob",
            "acme",
            TimeInterval::from_timestamp_onwards(start),
        ),
    ]
}

fn entity_type(uri: VersionedUri, title: &str) -> OntologyVertex {
    OntologyVertex::EntityType(EntityTypeWithMetadata::from_schema(EntityType {
        id: uri,
        title: title.to_string(),
        schema: serde_json::json!({ "type": "object" }),
    }))
}

/// The entity types the fixture entities conform to
pub fn mock_data_entity_types() -> Vec<OntologyVertex> {
    vec![
        entity_type(person_type_uri(), "Person"),
        entity_type(company_type_uri(), "Company"),
        entity_type(works_at_type_uri(), "Works At"),
        entity_type(founded_type_uri(), "Founded"),
    ]
}

/// The axes the fixture data was selected with: pinned transaction time at
/// `now`, variable decision time from the epoch up to and including `now`
pub fn mock_data_axes(now: Timestamp) -> QueryTemporalAxes {
    QueryTemporalAxesUnresolved {
        pinned: PinnedTemporalAxisUnresolved {
            axis: TemporalAxis::TransactionTime,
            timestamp: None,
        },
        variable: VariableTemporalAxisUnresolved {
            axis: TemporalAxis::DecisionTime,
            interval: TimeIntervalUnresolved {
                start: Some(TemporalBound::Inclusive(Timestamp::unix_epoch())),
                end: None,
            },
        },
    }
    .resolve(now)
}

/// Builds the datastore snapshot backing the mock: every fixture entity
/// as a vertex and a root, link edges synthesized, the entity types
/// available for lookup
pub fn mock_datastore_graph(now: Timestamp) -> Result<Subgraph> {
    let entities = mock_data_entities();
    let roots: Vec<EntityRecordId> = entities
        .iter()
        .map(|entity| entity.metadata.record_id.clone())
        .collect();

    let mut graph = build_subgraph(
        &entities,
        &roots,
        GraphResolveDepths::uniform(255),
        Some(mock_data_axes(now)),
    )?;

    for entity_type in mock_data_entity_types() {
        graph.insert_ontology_vertex(entity_type);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronograph_graph::stdlib::{get_entity_revisions, get_entity_types, get_roots};

    #[test]
    fn test_fixture_graph_is_consistent() {
        let now = Timestamp::from_millis(FIXTURE_REVISION_MILLIS + 1_000_000);
        let graph = mock_datastore_graph(now).unwrap();

        // Every root resolves
        assert_eq!(get_roots(&graph).unwrap().len(), 6);

        // Alice's revisions tile: two revisions, adjacent intervals
        let revisions = get_entity_revisions(&graph, &EntityId::new("alice"), None);
        assert_eq!(revisions.len(), 2);
        let first = revisions[0].validity_interval(TemporalAxis::DecisionTime);
        let second = revisions[1].validity_interval(TemporalAxis::DecisionTime);
        assert!(first.is_adjacent_to(&second));
        assert!(!first.overlaps(&second));

        assert_eq!(get_entity_types(&graph).len(), 4);
    }
}
