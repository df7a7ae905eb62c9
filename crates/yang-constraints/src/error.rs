//! Failure modes of the interval-constraint engine.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintError {
    /// A local interval's bounds are not syntactically valid (bad integer
    /// literal, malformed decimal, `..` with nothing on one side).
    RangeSyntaxError,
    /// Consecutive intervals are not strictly ascending, or a single
    /// interval's lower bound exceeds its upper bound.
    RangeOutOfOrder,
    /// A local interval is not entirely contained within one interval of
    /// the base type being restricted.
    RangeNotContained,
    /// A decimal literal has more fraction digits than the type's
    /// `fraction-digits` allows, or its scaled mantissa overflows `i128`.
    DecimalPrecisionOverflow,
}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::RangeSyntaxError => "malformed range or length expression",
            Self::RangeOutOfOrder => "range or length intervals are not in ascending order",
            Self::RangeNotContained => "interval is not contained within the base type's range",
            Self::DecimalPrecisionOverflow => {
                "decimal literal exceeds the type's fraction-digits precision"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ConstraintError {}
