//! Comparison and adjacency of interval bounds
//!
//! Bounds are compared in the context of the interval endpoint they occupy:
//! an unbounded start is less than everything, an unbounded end greater
//! than everything, and at equal limits an exclusive end closes before an
//! inclusive or exclusive start opens. The full case table below is the
//! contract; a combination it does not enumerate is a programming error.

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One endpoint of a time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "limit", rename_all = "camelCase")]
pub enum TemporalBound {
    /// No bound on this side of the interval
    Unbounded,
    /// The interval includes the limit instant
    Inclusive(Timestamp),
    /// The interval stops just short of the limit instant
    Exclusive(Timestamp),
}

impl TemporalBound {
    /// The limiting instant, if this bound carries one
    pub fn limit(&self) -> Option<Timestamp> {
        match self {
            TemporalBound::Unbounded => None,
            TemporalBound::Inclusive(limit) | TemporalBound::Exclusive(limit) => Some(*limit),
        }
    }
}

/// Whether a bound is the start or the end of its interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundRole {
    Start,
    End,
}

/// Compares two bounds, each in the role it occupies within its interval.
///
/// If both bounds carry a limit and the limits differ, the ordering follows
/// the limits. Equal-kind bounds in equal roles are equal. The remaining
/// equal-limit cases are resolved by the enumerated guards; any combination
/// outside them indicates an implementation error and panics.
pub fn compare_bounds(
    lhs: &TemporalBound,
    rhs: &TemporalBound,
    lhs_role: BoundRole,
    rhs_role: BoundRole,
) -> Ordering {
    use BoundRole::{End, Start};
    use TemporalBound::{Exclusive, Inclusive, Unbounded};

    if let (Some(lhs_limit), Some(rhs_limit)) = (lhs.limit(), rhs.limit()) {
        if lhs_limit != rhs_limit {
            return lhs_limit.cmp(&rhs_limit);
        }
    }

    let same_kind = matches!(
        (lhs, rhs),
        (Unbounded, Unbounded) | (Inclusive(_), Inclusive(_)) | (Exclusive(_), Exclusive(_))
    );
    if same_kind && lhs_role == rhs_role {
        return Ordering::Equal;
    }

    if matches!((lhs, lhs_role), (Unbounded, Start))
        || matches!((rhs, rhs_role), (Unbounded, End))
        || matches!(
            (lhs, rhs, lhs_role, rhs_role),
            (Exclusive(_), Exclusive(_), End, Start)
        )
        || matches!((lhs, rhs, lhs_role), (Exclusive(_), Inclusive(_), End))
        || matches!((lhs, rhs, rhs_role), (Inclusive(_), Exclusive(_), Start))
    {
        return Ordering::Less;
    }

    if matches!((lhs, lhs_role), (Unbounded, End))
        || matches!((rhs, rhs_role), (Unbounded, Start))
        || matches!(
            (lhs, rhs, lhs_role, rhs_role),
            (Exclusive(_), Exclusive(_), Start, End)
        )
        || matches!((lhs, rhs, lhs_role), (Exclusive(_), Inclusive(_), Start))
        || matches!((lhs, rhs, rhs_role), (Inclusive(_), Exclusive(_), End))
    {
        return Ordering::Greater;
    }

    panic!("implementation error, failed to compare bounds: {lhs:?} ({lhs_role:?}) vs {rhs:?} ({rhs_role:?})");
}

/// Returns true exactly when the two bounds represent touching half-open
/// intervals with no gap between them: one `Inclusive(t)` and one
/// `Exclusive(t)` for the same `t`.
pub fn bound_is_adjacent_to(lhs: &TemporalBound, rhs: &TemporalBound) -> bool {
    match (lhs, rhs) {
        (TemporalBound::Inclusive(lhs_limit), TemporalBound::Exclusive(rhs_limit))
        | (TemporalBound::Exclusive(lhs_limit), TemporalBound::Inclusive(rhs_limit)) => {
            lhs_limit == rhs_limit
        }
        _ => false,
    }
}
