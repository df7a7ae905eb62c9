//! The schema data model: modules, the tagged schema-node tree, types,
//! identities, features, and the lookup operations that resolve textual
//! node-ids against it.
//!
//! This crate owns the arena-indexed graph a YANG module compiles down to.
//! It does not itself perform forward-reference resolution (grouping
//! expansion, augment/deviation splicing, leafref binding) — that lives in
//! `yang-resolve`, which builds and mutates the structures defined here.

pub mod arena;
pub mod config;
pub mod context;
pub mod extension;
pub mod feature;
pub mod identity;
pub mod ids;
pub mod lookup;
pub mod module;
pub mod node;
pub mod status;
pub mod ty;

pub use arena::Arena;
pub use config::ConfigFlag;
pub use context::{ModuleContext, ModuleRegistry};
pub use extension::UnknownStatement;
pub use feature::{Feature, IfFeatureAst, IfFeatureSyntaxError, parse_if_feature};
pub use identity::{CycleError, Identity, IdentityArena};
pub use ids::{FeatureId, IdentityId, ModuleId, NodeId, TypeId};
pub use lookup::{
    AcceptedNodeKinds, AugmentStart, DescendantOptions, LookupError, find_child_by_atom,
    resolve_absolute_nodeid, resolve_augment_nodeid, resolve_choice_default,
    resolve_descendant_nodeid, resolve_json_schema_nodeid, resolve_uses_grouping,
};
pub use module::Module;
pub use node::{
    AugmentRecord, DeviateMode, DeviateRecord, DeviationRecord, IfFeatureExpr, MustConstraint,
    NodeData, NodeKind, RefineRecord, SchemaNode,
};
pub use status::Status;
pub use ty::{
    BitValue, BitsDef, Builtin, Derived, EnumDef, EnumValue, LeafrefDef, PatternDef, StringDef,
    Type,
};

#[cfg(test)]
mod test_support;
