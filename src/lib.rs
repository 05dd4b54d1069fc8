//! Chronograph - Bitemporal knowledge-graph subgraph library
//!
//! This is the main library crate that re-exports all Chronograph components.

pub use chronograph_core as core;
pub use chronograph_graph as graph;
pub use chronograph_mock as mock;

// Re-export commonly used types
pub use chronograph_core::{
    BoundRole, Error, QueryTemporalAxes, QueryTemporalAxesUnresolved, Result,
    SubgraphTemporalAxes, TemporalAxis, TemporalBound, TimeInterval, Timestamp,
};

pub use chronograph_graph::{
    Entity, EntityId, EntityRecordId, GraphResolveDepths, Subgraph, build_subgraph,
};

pub use chronograph_mock::{AggregateEntitiesData, GetEntityData, MockDatastore};
