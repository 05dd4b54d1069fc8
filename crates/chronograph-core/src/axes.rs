//! Query temporal axes
//!
//! A bitemporal query fixes one axis to a single instant (the "pinned"
//! axis) and ranges over an interval of the other (the "variable" axis).
//! Queries arrive in an "unresolved" shape where missing bounds mean
//! "default to now"; resolution is a pure function that fills every gap
//! from one consistent instant.

use crate::bound::TemporalBound;
use crate::interval::TimeInterval;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// One of the two independent time dimensions tracked for every fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalAxis {
    /// When a fact is considered true in the domain
    #[serde(rename = "decisionTime")]
    DecisionTime,
    /// When a fact was recorded
    #[serde(rename = "transactionTime")]
    TransactionTime,
}

impl TemporalAxis {
    /// The other axis of the bitemporal pair
    pub fn complement(self) -> Self {
        match self {
            TemporalAxis::DecisionTime => TemporalAxis::TransactionTime,
            TemporalAxis::TransactionTime => TemporalAxis::DecisionTime,
        }
    }
}

/// An interval whose missing bounds default to "now" at resolution time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIntervalUnresolved {
    pub start: Option<TemporalBound>,
    pub end: Option<TemporalBound>,
}

/// A pinned axis whose missing timestamp defaults to "now"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedTemporalAxisUnresolved {
    pub axis: TemporalAxis,
    pub timestamp: Option<Timestamp>,
}

/// A variable axis whose interval may have missing bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTemporalAxisUnresolved {
    pub axis: TemporalAxis,
    pub interval: TimeIntervalUnresolved,
}

/// The temporal axes of a query before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemporalAxesUnresolved {
    pub pinned: PinnedTemporalAxisUnresolved,
    pub variable: VariableTemporalAxisUnresolved,
}

/// An axis projected onto a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedTemporalAxis {
    pub axis: TemporalAxis,
    pub timestamp: Timestamp,
}

/// The axis a query ranges over, with its fully concrete interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTemporalAxis {
    pub axis: TemporalAxis,
    pub interval: TimeInterval,
}

/// The temporal axes of a query with every bound concretely filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemporalAxes {
    pub pinned: PinnedTemporalAxis,
    pub variable: VariableTemporalAxis,
}

impl QueryTemporalAxesUnresolved {
    /// The axes used when a caller supplies none: pinned transaction time
    /// at the resolution instant, variable decision time from that instant
    /// onwards.
    pub fn default_axes() -> Self {
        Self {
            pinned: PinnedTemporalAxisUnresolved {
                axis: TemporalAxis::TransactionTime,
                timestamp: None,
            },
            variable: VariableTemporalAxisUnresolved {
                axis: TemporalAxis::DecisionTime,
                interval: TimeIntervalUnresolved {
                    start: None,
                    end: Some(TemporalBound::Unbounded),
                },
            },
        }
    }

    /// Replaces every missing bound with `now`. Pure and idempotent: axes
    /// that are already fully specified come back unchanged, and all gaps
    /// within one call are filled from the same instant.
    pub fn resolve(&self, now: Timestamp) -> QueryTemporalAxes {
        QueryTemporalAxes {
            pinned: PinnedTemporalAxis {
                axis: self.pinned.axis,
                timestamp: self.pinned.timestamp.unwrap_or(now),
            },
            variable: VariableTemporalAxis {
                axis: self.variable.axis,
                interval: TimeInterval::new(
                    self.variable
                        .interval
                        .start
                        .unwrap_or(TemporalBound::Inclusive(now)),
                    self.variable
                        .interval
                        .end
                        .unwrap_or(TemporalBound::Inclusive(now)),
                ),
            },
        }
    }
}

impl QueryTemporalAxes {
    /// The search interval implied by "the latest instant this query can
    /// see": the variable interval's end projected onto a point.
    pub fn latest_instant_interval(&self) -> TimeInterval {
        match self.variable.interval.end {
            TemporalBound::Unbounded => {
                TimeInterval::new(TemporalBound::Unbounded, TemporalBound::Unbounded)
            }
            TemporalBound::Inclusive(limit) | TemporalBound::Exclusive(limit) => {
                TimeInterval::at_timestamp(limit)
            }
        }
    }
}

/// The axes a subgraph was queried with: the caller's original request and
/// the concrete axes it resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphTemporalAxes {
    pub initial: QueryTemporalAxesUnresolved,
    pub resolved: QueryTemporalAxes,
}

impl SubgraphTemporalAxes {
    /// Wrap already-resolved axes, echoing them as the initial request
    pub fn from_resolved(resolved: QueryTemporalAxes) -> Self {
        Self {
            initial: QueryTemporalAxesUnresolved {
                pinned: PinnedTemporalAxisUnresolved {
                    axis: resolved.pinned.axis,
                    timestamp: Some(resolved.pinned.timestamp),
                },
                variable: VariableTemporalAxisUnresolved {
                    axis: resolved.variable.axis,
                    interval: TimeIntervalUnresolved {
                        start: Some(resolved.variable.interval.start),
                        end: Some(resolved.variable.interval.end),
                    },
                },
            },
            resolved,
        }
    }
}
