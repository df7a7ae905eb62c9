//! Unknown-statement (extension) passthrough.
//!
//! Statements the resolver does not recognize are kept verbatim (name plus
//! raw argument text) rather than dropped, so a host building a serializer
//! on top of this crate still has the original data available. Never
//! interpreted here.

use yang_common::Atom;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStatement {
    /// `[prefix ":"] keyword`, interned as written.
    pub keyword: Atom,
    pub argument: Option<String>,
    pub children: Vec<UnknownStatement>,
}
