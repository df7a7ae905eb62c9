//! Summary of one resolution batch, returned alongside the populated
//! `DiagnosticSink` so a caller (the CLI's `--stats`, or a future
//! embedding host) can report on fixpoint behavior without re-deriving it
//! from the worklist. Wall-clock timing is the caller's concern, not
//! this crate's — `yang-cli` wraps these numbers with its own timer.

#[derive(Debug, Default, Clone)]
pub struct ResolveReport {
    /// One entry per round actually run, in order (e.g. `"round-a"`,
    /// `"round-a"`, `"round-b"`) — the count is the round total.
    pub rounds: Vec<&'static str>,
    pub schema_items_resolved: usize,
    pub data_items_resolved: usize,
}

impl ResolveReport {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
