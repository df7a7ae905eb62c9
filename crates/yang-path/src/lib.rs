//! Recursive-descent micro-parsers for YANG's path and identifier
//! sub-languages.
//!
//! Each parser is single-pass with a fixed one-character lookahead and
//! never backtracks past a grammar alternative it has already committed to.
//! None of them own or copy the input text: every recognized token is
//! returned as a slice borrowed from the caller's string, so the only
//! allocation in this crate is the `Vec` used to collect a variable number
//! of path segments/predicates.

pub mod error;
pub use error::{ParseError, ParseResult};

pub mod identifier;
pub use identifier::{NodeIdentifier, parse_identifier, parse_node_identifier};

pub mod schema_nodeid;
pub use schema_nodeid::{SchemaNodeId, SchemaNodeIdForm, parse_schema_nodeid};

pub mod path_arg;
pub use path_arg::{PathArg, PathKeyExpr, PathPredicate, PathSegment, parse_path_arg};

pub mod instance_identifier;
pub use instance_identifier::{
    InstanceIdSegment, InstanceIdentifier, Predicate, parse_instance_identifier,
};

pub mod json_predicate;
pub use json_predicate::{SchemaJsonKey, SchemaJsonPredicate, parse_schema_json_predicate};
