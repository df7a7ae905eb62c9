//! Common types and utilities for the yang-resolve schema compiler.
//!
//! This crate provides the foundational types shared by every later phase
//! of the resolver (path micro-parsers, schema-tree lookup, the constraint
//! engine, and the fixpoint driver):
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`, `Spanned`)
//! - Structured diagnostics (`Diagnostic`, `DiagnosticSink`, `ErrorCode`)
//! - Centralized limits and thresholds
//! - Data-time resolution configuration (`ResolveFlags`)

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSink, ErrorCode};

pub mod interner;
pub use interner::{Atom, Interner};

pub mod span;
pub use span::{Span, Spanned};

pub mod limits;

pub mod flags;
pub use flags::ResolveFlags;
