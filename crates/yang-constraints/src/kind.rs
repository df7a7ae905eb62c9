//! The numeric domain an [`crate::IntervalSet`] is defined over.

/// Distinguishes the three numeric families `range`/`length` restrictions
/// can apply to. Every bound is ultimately represented as a plain `i128`;
/// `Decimal` additionally records how many of that `i128`'s low digits are
/// fractional, so `3.14` with two fraction digits is stored as the integer
/// `314`.
///
/// An explicit `(mantissa, scale)` pair is used instead of a floating-point
/// type: `f64`/`long double` cannot represent `decimal64`'s exact base-10
/// fractions, and silent rounding in a schema's declared value space would
/// be worse than a hard precision-overflow error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericKind {
    /// `uint8`/`uint16`/`uint32`/`uint64` and their restrictions.
    Unsigned,
    /// `int8`/`int16`/`int32`/`int64` and their restrictions.
    Signed,
    /// `decimal64`, scaled by `10^fraction_digits`.
    Decimal { fraction_digits: u8 },
}

impl NumericKind {
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal { .. })
    }

    pub const fn fraction_digits(self) -> u8 {
        match self {
            Self::Decimal { fraction_digits } => fraction_digits,
            _ => 0,
        }
    }
}
