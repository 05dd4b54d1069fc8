//! Read-only query functions over a `Subgraph`
//!
//! Everything in this module treats "not found" as `None` or an empty
//! collection, except where an element is structurally guaranteed to exist
//! (a link entity's endpoints, a declared root); absence there is an
//! internal-consistency error, not a recoverable lookup miss.

pub mod entity;
pub mod link;
pub mod ontology;
pub mod roots;

pub use entity::{get_entities, get_entity_revision, get_entity_revisions};
pub use link::{
    LinkEntityAndRightEntity, get_incoming_links_for_entity, get_left_entity_for_link_entity,
    get_outgoing_link_and_target_entities, get_outgoing_links_for_entity,
    get_right_entity_for_link_entity,
};
pub use ontology::{
    get_data_type_by_id, get_data_types, get_data_types_by_base_uri, get_entity_type_by_id,
    get_entity_types, get_entity_types_by_base_uri, get_property_type_by_id, get_property_types,
    get_property_types_by_base_uri,
};
pub use roots::{get_entity_roots, get_roots};

use crate::entity::{Entity, EntityId};
use std::collections::BTreeMap;

/// Groups entity revisions by their entity id
pub fn map_elements_into_revisions<'a, I>(elements: I) -> BTreeMap<EntityId, Vec<&'a Entity>>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut revision_map: BTreeMap<EntityId, Vec<&'a Entity>> = BTreeMap::new();
    for element in elements {
        revision_map
            .entry(element.metadata.record_id.entity_id.clone())
            .or_default()
            .push(element);
    }
    revision_map
}
