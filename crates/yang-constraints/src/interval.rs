//! Resolved and raw (pre-narrowing) interval representations.

use smallvec::SmallVec;

use crate::kind::NumericKind;

/// A bound as written in source text, before it has been resolved against
/// a base type's effective range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawBound {
    /// The literal keyword `min`.
    Min,
    /// The literal keyword `max`.
    Max,
    /// An explicit numeric literal, already scaled for [`NumericKind::Decimal`].
    Value(i128),
}

/// One `lower..upper` (or single-value `lower` with `upper == lower`)
/// interval as parsed from a `range`/`length` restriction, before its
/// `min`/`max` bounds have been resolved against a base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawInterval {
    pub lower: RawBound,
    pub upper: RawBound,
}

/// A resolved, ascending, non-overlapping set of closed `[lower, upper]`
/// intervals over a single [`NumericKind`].
///
/// Unlike a true set union, the individual intervals are kept exactly as
/// narrowed rather than merged across touching boundaries: `0..10 | 11..20`
/// stays two intervals rather than collapsing to `0..20`, matching the
/// textual restriction the author wrote (and so that a later, further
/// restriction can still be checked against the boundary the author
/// declared).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSet {
    pub kind: NumericKind,
    pub intervals: SmallVec<[(i128, i128); 4]>,
}

impl IntervalSet {
    /// A single unrestricted interval spanning `[lower, upper]`, typically
    /// the value space of a built-in type before any restriction is
    /// applied.
    pub fn unrestricted(kind: NumericKind, lower: i128, upper: i128) -> Self {
        let mut intervals = SmallVec::new();
        intervals.push((lower, upper));
        IntervalSet { kind, intervals }
    }

    pub fn effective_min(&self) -> i128 {
        self.intervals.first().map(|&(lo, _)| lo).unwrap_or(0)
    }

    pub fn effective_max(&self) -> i128 {
        self.intervals.last().map(|&(_, hi)| hi).unwrap_or(0)
    }

    /// Whether `value` falls inside some interval of this set.
    pub fn contains(&self, value: i128) -> bool {
        self.intervals.iter().any(|&(lo, hi)| value >= lo && value <= hi)
    }
}
