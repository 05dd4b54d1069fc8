//! Interval algebra over temporal bounds
//!
//! Built entirely on [`compare_bounds`]: containment, overlap, adjacency,
//! intersection, merging, and the n-ary union that produces a minimal
//! sorted disjoint cover. Half-open intervals (`[start, end)`) are the
//! canonical shape for entity validity periods; fully bounded and fully
//! unbounded intervals occur in queries.

use crate::bound::{BoundRole, TemporalBound, bound_is_adjacent_to, compare_bounds};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A pair of temporal bounds delimiting a period of time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: TemporalBound,
    pub end: TemporalBound,
}

impl TimeInterval {
    /// Create an interval from explicit bounds
    pub fn new(start: TemporalBound, end: TemporalBound) -> Self {
        Self { start, end }
    }

    /// The interval covering all of time
    pub fn unbounded() -> Self {
        Self {
            start: TemporalBound::Unbounded,
            end: TemporalBound::Unbounded,
        }
    }

    /// The degenerate validity period used in non-temporal mode: from the
    /// Unix epoch onwards, with no end
    pub fn from_epoch_onwards() -> Self {
        Self {
            start: TemporalBound::Inclusive(Timestamp::unix_epoch()),
            end: TemporalBound::Unbounded,
        }
    }

    /// The canonical half-open interval `[start, end)`
    pub fn half_open(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: TemporalBound::Inclusive(start),
            end: TemporalBound::Exclusive(end),
        }
    }

    /// A half-open interval with no end: `[start, ..)`
    pub fn from_timestamp_onwards(start: Timestamp) -> Self {
        Self {
            start: TemporalBound::Inclusive(start),
            end: TemporalBound::Unbounded,
        }
    }

    /// The degenerate interval containing exactly one instant
    pub fn at_timestamp(timestamp: Timestamp) -> Self {
        Self {
            start: TemporalBound::Inclusive(timestamp),
            end: TemporalBound::Inclusive(timestamp),
        }
    }

    /// Returns true if `self` wholly contains `other`
    pub fn contains_interval(&self, other: &Self) -> bool {
        compare_bounds(&self.start, &other.start, BoundRole::Start, BoundRole::Start)
            != Ordering::Greater
            && compare_bounds(&self.end, &other.end, BoundRole::End, BoundRole::End)
                != Ordering::Less
    }

    /// Returns true if the instant `timestamp` falls within this interval
    pub fn contains_timestamp(&self, timestamp: Timestamp) -> bool {
        let instant = TemporalBound::Inclusive(timestamp);
        compare_bounds(&self.start, &instant, BoundRole::Start, BoundRole::Start)
            != Ordering::Greater
            && compare_bounds(&self.end, &instant, BoundRole::End, BoundRole::End)
                != Ordering::Less
    }

    /// Returns true if either interval's start falls within the other
    pub fn overlaps(&self, other: &Self) -> bool {
        (compare_bounds(&self.start, &other.start, BoundRole::Start, BoundRole::Start)
            != Ordering::Less
            && compare_bounds(&self.start, &other.end, BoundRole::Start, BoundRole::End)
                != Ordering::Greater)
            || (compare_bounds(&other.start, &self.start, BoundRole::Start, BoundRole::Start)
                != Ordering::Less
                && compare_bounds(&other.start, &self.end, BoundRole::Start, BoundRole::End)
                    != Ordering::Greater)
    }

    /// Returns true if the two intervals touch with no gap and no overlap
    pub fn is_adjacent_to(&self, other: &Self) -> bool {
        bound_is_adjacent_to(&self.end, &other.start)
            || bound_is_adjacent_to(&self.start, &other.end)
    }

    /// The overlapping part of the two intervals, or `None` when they do
    /// not overlap.
    ///
    /// For non-degenerate inputs the result is `Some` exactly when
    /// [`TimeInterval::overlaps`] returns true.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let start = if compare_bounds(&self.start, &other.start, BoundRole::Start, BoundRole::Start)
            != Ordering::Greater
        {
            other.start
        } else {
            self.start
        };
        let end = if compare_bounds(&self.end, &other.end, BoundRole::End, BoundRole::End)
            != Ordering::Greater
        {
            self.end
        } else {
            other.end
        };

        Some(Self { start, end })
    }

    /// The smallest interval spanning both inputs, regardless of whether
    /// they overlap
    pub fn merge(&self, other: &Self) -> Self {
        let start = if compare_bounds(&self.start, &other.start, BoundRole::Start, BoundRole::Start)
            != Ordering::Greater
        {
            self.start
        } else {
            other.start
        };
        let end = if compare_bounds(&self.end, &other.end, BoundRole::End, BoundRole::End)
            != Ordering::Less
        {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Merge the intervals when they overlap or are adjacent; otherwise
    /// return both, ordered by start
    pub fn union(&self, other: &Self) -> (Self, Option<Self>) {
        if self.overlaps(other) || self.is_adjacent_to(other) {
            (self.merge(other), None)
        } else if compare_bounds(&self.start, &other.start, BoundRole::Start, BoundRole::Start)
            == Ordering::Less
        {
            (self.clone(), Some(other.clone()))
        } else {
            (other.clone(), Some(self.clone()))
        }
    }
}

/// Collapses a set of intervals into a minimal, sorted, disjoint cover.
///
/// The intervals are sorted by `(start, end)` and then folded pairwise;
/// because of the sort it is only ever necessary to union each interval
/// with the last element of the accumulator. Duplicate and fully-contained
/// inputs do not produce redundant entries.
pub fn union_of_intervals(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort_by(|lhs, rhs| {
        compare_bounds(&lhs.start, &rhs.start, BoundRole::Start, BoundRole::Start)
            .then_with(|| compare_bounds(&lhs.end, &rhs.end, BoundRole::End, BoundRole::End))
    });

    let mut cover: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match cover.pop() {
            None => cover.push(interval),
            Some(last) => {
                let (first, second) = last.union(&interval);
                cover.push(first);
                if let Some(second) = second {
                    cover.push(second);
                }
            }
        }
    }

    cover
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_containment() {
        let outer = TimeInterval::half_open(ts(0), ts(10));
        let inner = TimeInterval::half_open(ts(2), ts(8));
        assert!(outer.contains_interval(&inner));
        assert!(!inner.contains_interval(&outer));
        assert!(outer.contains_interval(&outer));
        assert!(TimeInterval::unbounded().contains_interval(&outer));
    }

    #[test]
    fn test_contains_timestamp() {
        let interval = TimeInterval::half_open(ts(5), ts(10));
        assert!(interval.contains_timestamp(ts(5)));
        assert!(interval.contains_timestamp(ts(9)));
        assert!(!interval.contains_timestamp(ts(10)));
        assert!(!interval.contains_timestamp(ts(4)));
        assert!(TimeInterval::unbounded().contains_timestamp(ts(4)));
    }

    #[test]
    fn test_overlap_and_intersection() {
        let a = TimeInterval::half_open(ts(0), ts(6));
        let b = TimeInterval::half_open(ts(4), ts(10));
        assert!(a.overlaps(&b));
        assert_eq!(a.intersect(&b), Some(TimeInterval::half_open(ts(4), ts(6))));

        let c = TimeInterval::half_open(ts(7), ts(9));
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersect(&c), None);

        // Touching half-open intervals share no instant
        let d = TimeInterval::half_open(ts(6), ts(9));
        assert!(!a.overlaps(&d));
        assert!(a.is_adjacent_to(&d));
    }

    #[test]
    fn test_merge_spans_gaps() {
        let a = TimeInterval::half_open(ts(0), ts(2));
        let b = TimeInterval::half_open(ts(5), ts(7));
        assert_eq!(a.merge(&b), TimeInterval::half_open(ts(0), ts(7)));
    }

    #[test]
    fn test_union_adjacent_merges() {
        let a = TimeInterval::half_open(ts(0), ts(5));
        let b = TimeInterval::half_open(ts(5), ts(9));
        let (first, second) = a.union(&b);
        assert_eq!(first, TimeInterval::half_open(ts(0), ts(9)));
        assert_eq!(second, None);
    }

    #[test]
    fn test_union_disjoint_orders_by_start() {
        let a = TimeInterval::half_open(ts(6), ts(9));
        let b = TimeInterval::half_open(ts(0), ts(2));
        let (first, second) = a.union(&b);
        assert_eq!(first, b);
        assert_eq!(second, Some(a));
    }

    #[test]
    fn test_union_of_intervals_minimal_cover() {
        let cover = union_of_intervals(vec![
            TimeInterval::half_open(ts(4), ts(6)),
            TimeInterval::half_open(ts(0), ts(2)),
            TimeInterval::half_open(ts(1), ts(3)),
            TimeInterval::half_open(ts(6), ts(8)),
        ]);
        assert_eq!(
            cover,
            vec![
                TimeInterval::half_open(ts(0), ts(3)),
                TimeInterval::half_open(ts(4), ts(8)),
            ]
        );
    }

    #[test]
    fn test_union_of_intervals_idempotent_on_duplicates() {
        let a = TimeInterval::half_open(ts(0), ts(5));
        assert_eq!(union_of_intervals(vec![a.clone(), a.clone()]), vec![a]);
    }

    #[test]
    fn test_union_of_intervals_absorbs_contained() {
        let cover = union_of_intervals(vec![
            TimeInterval::half_open(ts(0), ts(10)),
            TimeInterval::half_open(ts(2), ts(4)),
            TimeInterval::half_open(ts(5), ts(6)),
        ]);
        assert_eq!(cover, vec![TimeInterval::half_open(ts(0), ts(10))]);
    }

    // Well-formed intervals in the shapes the library actually produces:
    // half-open, optionally unbounded on either side.
    fn interval_strategy() -> impl Strategy<Value = TimeInterval> {
        (0i64..6, 1i64..5, 0u8..3, proptest::bool::ANY).prop_map(
            |(start_ms, len, start_kind, end_unbounded)| {
                let start = match start_kind {
                    0 => TemporalBound::Unbounded,
                    1 => TemporalBound::Inclusive(ts(start_ms)),
                    _ => TemporalBound::Exclusive(ts(start_ms)),
                };
                let end = if end_unbounded {
                    TemporalBound::Unbounded
                } else {
                    TemporalBound::Exclusive(ts(start_ms + len))
                };
                TimeInterval::new(start, end)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_intersection_agrees_with_overlap(
            a in interval_strategy(),
            b in interval_strategy(),
        ) {
            prop_assert_eq!(a.intersect(&b).is_some(), a.overlaps(&b));
        }

        #[test]
        fn prop_union_is_fixed_point_and_disjoint(
            intervals in proptest::collection::vec(interval_strategy(), 1..6),
        ) {
            let cover = union_of_intervals(intervals);

            // Re-running the union on its own output changes nothing
            prop_assert_eq!(&union_of_intervals(cover.clone()), &cover);

            // Output entries are pairwise non-overlapping and non-adjacent
            for window in cover.windows(2) {
                prop_assert!(!window[0].overlaps(&window[1]));
                prop_assert!(!window[0].is_adjacent_to(&window[1]));
            }
        }
    }
}
