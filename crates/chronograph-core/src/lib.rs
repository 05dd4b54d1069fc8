//! Chronograph Core Library
//!
//! This crate provides the temporal foundations and error handling for the
//! Chronograph subgraph library.
//!
//! # Overview
//!
//! Chronograph models a bitemporal knowledge graph: every fact is versioned
//! along two independent time axes (decision time and transaction time).
//! This crate holds the leaf pieces everything temporal is built from.
//!
//! # Modules
//!
//! - `timestamp` - Instant representation with a sortable wire form
//! - `bound` - Comparison and adjacency of interval bounds
//! - `interval` - Containment, overlap, intersection and union of intervals
//! - `axes` - Pinned/variable query axes and their resolution
//! - `error` - Error types and result alias

pub mod axes;
pub mod bound;
pub mod error;
pub mod interval;
pub mod timestamp;

pub use axes::{
    PinnedTemporalAxis, PinnedTemporalAxisUnresolved, QueryTemporalAxes,
    QueryTemporalAxesUnresolved, SubgraphTemporalAxes, TemporalAxis, TimeIntervalUnresolved,
    VariableTemporalAxis, VariableTemporalAxisUnresolved,
};
pub use bound::{BoundRole, TemporalBound, bound_is_adjacent_to, compare_bounds};
pub use error::{Error, Result};
pub use interval::{TimeInterval, union_of_intervals};
pub use timestamp::Timestamp;
