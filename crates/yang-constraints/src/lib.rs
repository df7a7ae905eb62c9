//! Interval-constraint engine for `range`/`length` restrictions.
//!
//! A derived type can only ever narrow its base type's value space: every
//! restriction statement is checked for containment inside the interval it
//! restricts, and the whole chain from a leaf typedef up to a built-in type
//! is walked one level at a time by the caller (`yang-resolve`), feeding
//! each level's resolved [`IntervalSet`] in as the next level's base.

pub mod error;
pub use error::ConstraintError;

pub mod kind;
pub use kind::NumericKind;

pub mod interval;
pub use interval::{IntervalSet, RawBound, RawInterval};

pub mod parse;
pub use parse::{parse_decimal_literal, parse_intervals};

pub mod narrow;
pub use narrow::narrow;
