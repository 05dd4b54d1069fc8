//! Chronograph Mock Datastore
//!
//! A fake embedding-application datastore for exercising graph-consuming
//! components without a real backend. It holds one in-memory [`Subgraph`]
//! built from fixture entities and serves `get_entity` /
//! `aggregate_entities` requests against it: resolve the temporal axes,
//! filter and sort, traverse from the matching roots, finalize.
//!
//! # Modules
//!
//! - `query` - Request/response payloads for the datastore operations
//! - `filter` - Multi-filter evaluation over entity fields
//! - `sort` - Multi-sort, pagination, and the combined operation apply
//! - `datastore` - The datastore itself
//! - `data` - Deterministic fixture graph

pub mod data;
pub mod datastore;
pub mod filter;
pub mod query;
pub mod sort;

pub use datastore::MockDatastore;
pub use filter::{CombinatorOperator, EntityFilter, FilterOperator, MultiFilter};
pub use query::{
    AggregateEntitiesData, AggregateEntitiesResult, AggregateOperationInput,
    AppliedAggregateOperation, GetEntityData,
};
pub use sort::SortRule;
