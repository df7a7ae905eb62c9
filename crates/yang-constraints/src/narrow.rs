//! Narrows a base [`IntervalSet`] by a locally-declared restriction.

use crate::error::ConstraintError;
use crate::interval::{IntervalSet, RawBound, RawInterval};

/// Resolves `raw` against `base` and returns the narrowed interval set.
///
/// Every resolved interval must fall entirely within a single interval of
/// `base` (straddling two disjoint base intervals is rejected, not
/// silently split), and intervals must be given in strictly ascending,
/// non-overlapping order.
pub fn narrow(base: &IntervalSet, raw: &[RawInterval]) -> Result<IntervalSet, ConstraintError> {
    let mut resolved = Vec::with_capacity(raw.len());
    let mut prev_upper: Option<i128> = None;

    for interval in raw {
        let lower = resolve_bound(interval.lower, base);
        let upper = resolve_bound(interval.upper, base);
        if lower > upper {
            return Err(ConstraintError::RangeOutOfOrder);
        }
        if let Some(prev) = prev_upper {
            if lower <= prev {
                return Err(ConstraintError::RangeOutOfOrder);
            }
        }
        if !base.intervals.iter().any(|&(blo, bhi)| lower >= blo && upper <= bhi) {
            return Err(ConstraintError::RangeNotContained);
        }
        prev_upper = Some(upper);
        resolved.push((lower, upper));
    }

    Ok(IntervalSet {
        kind: base.kind,
        intervals: resolved.into_iter().collect(),
    })
}

fn resolve_bound(bound: RawBound, base: &IntervalSet) -> i128 {
    match bound {
        RawBound::Min => base.effective_min(),
        RawBound::Max => base.effective_max(),
        RawBound::Value(v) => v,
    }
}

#[cfg(test)]
#[path = "tests/narrow.rs"]
mod tests;
