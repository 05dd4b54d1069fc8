//! Multi-filter evaluation over entity fields
//!
//! Filters address a field of the entity by path (into its serialized
//! form, e.g. `["properties", "<property base URI>"]` or
//! `["metadata", "entityTypeId", "baseUri"]`), apply one operator to it,
//! and are combined with AND or OR.

use chronograph_core::{Error, Result};
use chronograph_graph::Entity;
use serde::{Deserialize, Serialize};

/// Comparison operators of a single filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Contains,
    DoesNotContain,
    Is,
    IsNot,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

/// How the filters of a [`MultiFilter`] combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinatorOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// One predicate over one entity field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFilter {
    /// Path into the serialized entity
    pub field: Vec<String>,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// A combination of filters applied to every candidate entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFilter {
    pub filters: Vec<EntityFilter>,
    pub operator: CombinatorOperator,
}

/// Resolves a field path against the serialized form of an entity
pub(crate) fn resolve_field(entity: &Entity, field: &[String]) -> Option<serde_json::Value> {
    let serialized = serde_json::to_value(entity).ok()?;
    let mut current = &serialized;
    for segment in field {
        current = current.get(segment)?;
    }
    Some(current.clone())
}

fn value_as_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_empty_value(value: Option<&serde_json::Value>) -> bool {
    match value {
        None => true,
        Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(text)) => text.is_empty(),
        Some(serde_json::Value::Array(items)) => items.is_empty(),
        Some(serde_json::Value::Object(members)) => members.is_empty(),
        Some(_) => false,
    }
}

impl EntityFilter {
    /// Evaluates this filter against one entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] when the operator requires a
    /// comparison value and none was provided.
    fn comparison_value(&self) -> Result<&serde_json::Value> {
        self.value.as_ref().ok_or_else(|| {
            Error::InvalidFilter(format!(
                "operator {:?} requires a value for field {:?}",
                self.operator, self.field
            ))
        })
    }

    pub fn matches(&self, entity: &Entity) -> Result<bool> {
        let resolved = resolve_field(entity, &self.field);

        Ok(match self.operator {
            FilterOperator::IsEmpty => is_empty_value(resolved.as_ref()),
            FilterOperator::IsNotEmpty => !is_empty_value(resolved.as_ref()),
            FilterOperator::Is => resolved.as_ref() == Some(self.comparison_value()?),
            FilterOperator::IsNot => resolved.as_ref() != Some(self.comparison_value()?),
            FilterOperator::Contains
            | FilterOperator::DoesNotContain
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith => {
                let needle = value_as_text(self.comparison_value()?).to_lowercase();
                let Some(resolved) = resolved else {
                    // A missing field contains nothing
                    return Ok(matches!(self.operator, FilterOperator::DoesNotContain));
                };
                let haystack = value_as_text(&resolved).to_lowercase();
                match self.operator {
                    FilterOperator::Contains => haystack.contains(&needle),
                    FilterOperator::DoesNotContain => !haystack.contains(&needle),
                    FilterOperator::StartsWith => haystack.starts_with(&needle),
                    FilterOperator::EndsWith => haystack.ends_with(&needle),
                    _ => unreachable!(),
                }
            }
        })
    }
}

impl MultiFilter {
    /// Evaluates the combined filter against one entity.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidFilter`] from any malformed inner
    /// filter.
    pub fn matches(&self, entity: &Entity) -> Result<bool> {
        match self.operator {
            CombinatorOperator::And => {
                for filter in &self.filters {
                    if !filter.matches(entity)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            CombinatorOperator::Or => {
                for filter in &self.filters {
                    if filter.matches(entity)? {
                        return Ok(true);
                    }
                }
                Ok(self.filters.is_empty())
            }
        }
    }
}
