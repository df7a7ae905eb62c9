//! Types: built-ins and derived (`typedef`/inline-restricted) types.

use smallvec::SmallVec;
use yang_common::Atom;
use yang_constraints::IntervalSet;

use crate::ids::{IdentityId, ModuleId, NodeId, TypeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: Atom,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EnumDef {
    pub values: Vec<EnumValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitValue {
    pub name: Atom,
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BitsDef {
    pub bits: Vec<BitValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDef {
    pub regex: String,
    pub inverted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StringDef {
    pub length: Option<IntervalSet>,
    pub patterns: Vec<PatternDef>,
}

/// A `leafref`'s schema-time-resolved path and its data-time behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafrefDef {
    pub path: String,
    pub require_instance: bool,
    /// Populated once schema-time leafref resolution succeeds.
    pub target: Option<NodeId>,
}

/// The fourteen YANG built-in types plus `union`, `leafref` and
/// `identityref`, each carrying whatever payload the built-in needs
/// directly (a built-in has no separate "base type" to restrict — its
/// restrictions, if any, are declared inline and folded straight into
/// this payload rather than going through [`Derived`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Binary { length: Option<IntervalSet> },
    Bits(BitsDef),
    Boolean,
    Decimal64 { fraction_digits: u8, range: Option<IntervalSet> },
    Empty,
    Enumeration(EnumDef),
    Identityref { base: SmallVec<[IdentityId; 2]> },
    InstanceIdentifier { require_instance: bool },
    Int8 { range: Option<IntervalSet> },
    Int16 { range: Option<IntervalSet> },
    Int32 { range: Option<IntervalSet> },
    Int64 { range: Option<IntervalSet> },
    Leafref(LeafrefDef),
    StringT(StringDef),
    Uint8 { range: Option<IntervalSet> },
    Uint16 { range: Option<IntervalSet> },
    Uint32 { range: Option<IntervalSet> },
    Uint64 { range: Option<IntervalSet> },
    Union(SmallVec<[TypeId; 4]>),
}

/// A `typedef`, or a type restricted inline at its point of use. Owns an
/// exclusive reference to its base plus whatever local refinements it
/// declares; an unset field means "inherit the base's".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derived {
    pub name: Atom,
    pub module: ModuleId,
    pub base: TypeId,
    pub length: Option<IntervalSet>,
    pub range: Option<IntervalSet>,
    pub patterns: Vec<PatternDef>,
    pub enum_set: Option<EnumDef>,
    pub bit_set: Option<BitsDef>,
    pub fraction_digits: Option<u8>,
    pub require_instance: Option<bool>,
    pub identity_base: Option<SmallVec<[IdentityId; 2]>>,
    pub leafref_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Builtin(Builtin),
    Derived(Derived),
}

impl Type {
    pub const fn as_derived(&self) -> Option<&Derived> {
        match self {
            Type::Derived(d) => Some(d),
            Type::Builtin(_) => None,
        }
    }
}
