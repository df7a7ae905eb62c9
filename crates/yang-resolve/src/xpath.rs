//! The XPath evaluator is an external collaborator (§1 Non-goals: "no
//! runtime XPath evaluation"); the resolver only ever schedules
//! `when`/`must` dependency checks against it. [`XPathScheduler`] is that
//! registration sink. A production host backs it with a real evaluator;
//! tests back it with [`StubXPathScheduler`], whose canned answers make
//! the worklist cascade/scheduling logic exercisable without an XPath
//! engine in this crate.

use rustc_hash::FxHashMap;

use crate::instance::InstanceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XPathKind {
    When,
    Must,
}

/// Registers an XPath-dependent condition and, if an answer is already
/// available, returns it synchronously; `None` means "not yet known",
/// leaving the owning worklist item pending for a later round.
pub trait XPathScheduler {
    fn evaluate(&mut self, node: InstanceId, expression: &str, kind: XPathKind) -> Option<bool>;
}

/// A scheduler backed by a fixed table of `(node, expression) -> answer`,
/// used by tests to drive the data worklist's cascade logic
/// deterministically without an XPath engine.
#[derive(Debug, Default)]
pub struct StubXPathScheduler {
    answers: FxHashMap<(InstanceId, String), bool>,
    registered: Vec<(InstanceId, String, XPathKind)>,
}

impl StubXPathScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_answer(&mut self, node: InstanceId, expression: impl Into<String>, answer: bool) {
        self.answers.insert((node, expression.into()), answer);
    }

    pub fn registered(&self) -> &[(InstanceId, String, XPathKind)] {
        &self.registered
    }
}

impl XPathScheduler for StubXPathScheduler {
    fn evaluate(&mut self, node: InstanceId, expression: &str, kind: XPathKind) -> Option<bool> {
        self.registered.push((node, expression.to_string(), kind));
        self.answers.get(&(node, expression.to_string())).copied()
    }
}

#[cfg(test)]
#[path = "tests/xpath.rs"]
mod tests;
