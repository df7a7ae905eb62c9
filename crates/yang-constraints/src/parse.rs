//! Parses `range-arg-str` / `length-arg-str` text into [`RawInterval`]s.
//!
//! Grammar (shared by both `range` and `length`, `length` simply never
//! using negative values in practice):
//!
//! ```text
//! arg-str   = part *(sep "|" sep part)
//! part      = boundary [sep ".." sep boundary]
//! boundary  = "min" / "max" / value
//! sep       = *(" " / "\t")
//! ```

use smallvec::SmallVec;

use crate::error::ConstraintError;
use crate::interval::{RawBound, RawInterval};
use crate::kind::NumericKind;

pub fn parse_intervals(
    text: &str,
    kind: NumericKind,
) -> Result<SmallVec<[RawInterval; 4]>, ConstraintError> {
    let mut out = SmallVec::new();
    for part in text.split('|') {
        let part = part.trim();
        if part.is_empty() {
            return Err(ConstraintError::RangeSyntaxError);
        }
        let interval = match part.find("..") {
            Some(idx) => {
                let lower = parse_bound(part[..idx].trim(), kind)?;
                let upper = parse_bound(part[idx + 2..].trim(), kind)?;
                RawInterval { lower, upper }
            }
            None => {
                let bound = parse_bound(part, kind)?;
                RawInterval {
                    lower: bound,
                    upper: bound,
                }
            }
        };
        out.push(interval);
    }
    if out.is_empty() {
        return Err(ConstraintError::RangeSyntaxError);
    }
    Ok(out)
}

fn parse_bound(tok: &str, kind: NumericKind) -> Result<RawBound, ConstraintError> {
    if tok == "min" {
        return Ok(RawBound::Min);
    }
    if tok == "max" {
        return Ok(RawBound::Max);
    }
    let value = if let NumericKind::Decimal { fraction_digits } = kind {
        parse_decimal_literal(tok, fraction_digits)?
    } else {
        tok.parse::<i128>()
            .map_err(|_| ConstraintError::RangeSyntaxError)?
    };
    Ok(RawBound::Value(value))
}

/// Parses a decimal literal (e.g. `"3.14"`, `"-0.5"`) into its
/// `fraction_digits`-scaled integer representation (`314`, `-50`).
pub fn parse_decimal_literal(text: &str, fraction_digits: u8) -> Result<i128, ConstraintError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConstraintError::RangeSyntaxError);
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConstraintError::RangeSyntaxError);
    }
    if frac_part.len() > fraction_digits as usize {
        return Err(ConstraintError::DecimalPrecisionOverflow);
    }

    let mut digits = String::with_capacity(int_part.len() + fraction_digits as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in frac_part.len()..fraction_digits as usize {
        digits.push('0');
    }

    let magnitude = digits
        .parse::<i128>()
        .map_err(|_| ConstraintError::DecimalPrecisionOverflow)?;

    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[path = "tests/parse.rs"]
mod tests;
