//! Structured diagnostics.
//!
//! A `Diagnostic` decouples error *production* (inside the path parsers,
//! the schema lookup, the constraint engine, and the fixpoint driver) from
//! error *formatting*, which lives at whatever boundary the host chooses
//! (the `yang-cli` text/JSON printers, or an embedding host's own UI).

pub mod codes;

pub use codes::ErrorCode;

/// Severity of a diagnostic. The resolver itself only ever produces
/// `Error`; `Warning`/`Message` exist so downstream consumers (a future
/// linter built on this core) can share the same record shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Message,
}

/// A source path anchor for a diagnostic: either a schema-node path
/// (`/mod:a/b`) or a data-instance path with predicates
/// (`/mod:a[k='v']/b`). Kept as an owned `String` rather than borrowing the
/// source text because diagnostics frequently outlive the arena that
/// produced them (e.g. collected across the whole resolution batch and
/// printed only at the end).
pub type SourcePath = String;

/// A single structured error record.
///
/// Mirrors `tsz_common::diagnostics::Diagnostic` in shape (category, code,
/// path/file, message, related information) but keys off this crate's own
/// closed `ErrorCode` taxonomy instead of numeric TSxxxx codes, and carries
/// an `app_tag` field for `must`-violation propagation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: ErrorCode,
    pub path: SourcePath,
    pub message: String,
    /// `must`'s optional `error-app-tag`, attached to the top-level record
    /// so a caller validating instance data can surface it over the wire.
    pub app_tag: Option<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            path: path.into(),
            message: message.into(),
            app_tag: None,
        }
    }

    #[must_use]
    pub fn with_app_tag(mut self, app_tag: impl Into<String>) -> Self {
        self.app_tag = Some(app_tag.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.code, self.path, self.message)
    }
}

/// Collects diagnostics produced during a resolution batch.
///
/// Recoverable not-yet-resolvable conditions are *soft failures* that must
/// not be printed while the fixpoint driver still has rounds left to run;
/// only the final diagnostic pass un-hides them. `DiagnosticSink` models
/// that directly: while `suppressed` is true,
/// `push` records the diagnostic into a side buffer instead of the public
/// list; `unsuppress` promotes everything buffered so far (called by the
/// driver exactly once, before its last, diagnostics-unsuppressed pass).
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    suppressed_buffer: Vec<Diagnostic>,
    suppressed: bool,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Record a diagnostic, respecting the current suppression state.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.suppressed {
            self.suppressed_buffer.push(diagnostic);
        } else {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Promote every buffered soft-failure diagnostic into the visible
    /// list and clear the buffer. Does not change `suppressed` itself.
    pub fn flush_suppressed(&mut self) {
        self.diagnostics.append(&mut self.suppressed_buffer);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
