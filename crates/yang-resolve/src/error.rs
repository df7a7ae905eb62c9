//! Host-level failures, as opposed to schema/data diagnostics (which are
//! `yang_common::Diagnostic`s collected into a `DiagnosticSink`, not
//! `Err` values).

/// A resolver-internal failure: either the fixpoint driver genuinely
/// could not make progress (a real schema defect, reported as `Diagnostic`s
/// too, but surfaced here so the caller knows the batch aborted), or an
/// invariant the resolver itself is responsible for was violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A whole round of the schema or data worklist made no progress
    /// while items remained pending.
    NoProgress { worklist: &'static str },
    /// The caller's abort signal was observed before the batch completed.
    Cancelled,
    /// A `NodeId`/`TypeId` was used against an arena that did not produce
    /// it. Never caused by a malformed schema; always a bug in the
    /// resolver or its caller.
    ArenaMismatch { detail: &'static str },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NoProgress { worklist } => {
                write!(f, "{worklist} worklist made no progress with items still pending")
            }
            ResolveError::Cancelled => write!(f, "resolution was cancelled"),
            ResolveError::ArenaMismatch { detail } => write!(f, "internal arena mismatch: {detail}"),
        }
    }
}

impl std::error::Error for ResolveError {}
