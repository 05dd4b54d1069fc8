//! Multi-sort, pagination, and the combined aggregate operation
//!
//! Sorting is stable across multiple keys: later rules only break ties
//! left by earlier ones. Pagination is applied after filtering and
//! sorting and echoes the page bookkeeping in the applied operation.

use crate::filter::resolve_field;
use crate::query::{AggregateOperationInput, AppliedAggregateOperation};
use chronograph_core::{QueryTemporalAxes, Result};
use chronograph_graph::Entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

const DEFAULT_PAGE_NUMBER: usize = 1;
const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// One sort key: a field path and a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRule {
    /// Path into the serialized entity
    pub field: Vec<String>,
    #[serde(default)]
    pub desc: bool,
}

impl SortRule {
    /// Ascending sort on a field path
    pub fn ascending<I, S>(field: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into_iter().map(Into::into).collect(),
            desc: false,
        }
    }
}

/// The sort applied when a caller specifies none: ascending entity id
fn default_sort() -> Vec<SortRule> {
    vec![SortRule::ascending(["metadata", "recordId", "entityId"])]
}

/// Orders two JSON values: nulls and missing fields first, numbers
/// numerically, everything else by its text form
fn compare_values(lhs: Option<&serde_json::Value>, rhs: Option<&serde_json::Value>) -> Ordering {
    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(lhs), Some(rhs)) => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(lhs_num), Some(rhs_num)) => {
                lhs_num.partial_cmp(&rhs_num).unwrap_or(Ordering::Equal)
            }
            _ => {
                let lhs_text = match lhs {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                let rhs_text = match rhs {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                lhs_text.cmp(&rhs_text)
            }
        },
    }
}

/// Stable multi-key sort of entities by the given rules
pub fn sort_entities(entities: &mut [&Entity], rules: &[SortRule]) {
    entities.sort_by(|lhs, rhs| {
        for rule in rules {
            let ordering = compare_values(
                resolve_field(lhs, &rule.field).as_ref(),
                resolve_field(rhs, &rule.field).as_ref(),
            );
            let ordering = if rule.desc { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Applies the full aggregate operation to the candidate entities:
/// temporal window, entity-type filter, multi-filter, multi-sort, then
/// pagination.
///
/// When resolved temporal axes are given, only revisions whose validity
/// overlaps the variable interval are candidates. Returns the selected
/// page together with the operation actually applied, every default
/// filled in.
///
/// # Errors
///
/// Propagates [`chronograph_core::Error::InvalidFilter`] from malformed
/// filters.
pub fn filter_and_sort_entities<'a>(
    mut entities: Vec<&'a Entity>,
    operation: &AggregateOperationInput,
    temporal_axes: Option<&QueryTemporalAxes>,
) -> Result<(Vec<&'a Entity>, AppliedAggregateOperation)> {
    if let Some(axes) = temporal_axes {
        entities.retain(|entity| {
            entity
                .validity_interval(axes.variable.axis)
                .overlaps(&axes.variable.interval)
        });
    }

    if let Some(entity_type_id) = &operation.entity_type_id {
        entities.retain(|entity| &entity.metadata.entity_type_id == entity_type_id);
    }

    if let Some(multi_filter) = &operation.multi_filter {
        let mut filtered = Vec::with_capacity(entities.len());
        for entity in entities {
            if multi_filter.matches(entity)? {
                filtered.push(entity);
            }
        }
        entities = filtered;
    }

    let multi_sort = operation.multi_sort.clone().unwrap_or_else(default_sort);
    sort_entities(&mut entities, &multi_sort);

    let total_count = entities.len();
    let items_per_page = operation
        .items_per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .max(1);
    let page_number = operation.page_number.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
    let page_count = total_count.div_ceil(items_per_page);

    let page: Vec<&Entity> = entities
        .into_iter()
        .skip((page_number - 1) * items_per_page)
        .take(items_per_page)
        .collect();

    debug!(
        total = total_count,
        page = page_number,
        returned = page.len(),
        "applied aggregate operation"
    );

    Ok((
        page,
        AppliedAggregateOperation {
            entity_type_id: operation.entity_type_id.clone(),
            page_number,
            items_per_page,
            page_count,
            total_count,
            multi_sort,
            multi_filter: operation.multi_filter.clone(),
        },
    ))
}
