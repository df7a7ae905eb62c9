//! Unresolved-item records for both worklists.

use yang_schema::{ModuleId, NodeId};

use crate::instance::InstanceId;

/// Schema-time unresolved-item kind. `TYPE_DERIVATION` and `USES_EXPAND`
/// run in round A; everything else runs in round B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaItemKind {
    IdentBase,
    TypeIdentrefBase,
    TypeLeafref,
    TypeDerivation,
    IfFeature,
    UsesExpand,
    TypeDefaultCheck,
    ChoiceDefault,
    ListKeys,
    ListUnique,
    AugmentTarget,
    XpathRegister,
}

impl SchemaItemKind {
    pub const fn is_round_a(self) -> bool {
        matches!(self, Self::TypeDerivation | Self::UsesExpand)
    }
}

/// A single schema-time unresolved reference.
#[derive(Clone, Debug)]
pub struct SchemaItem {
    pub kind: SchemaItemKind,
    pub module: ModuleId,
    /// The node the item is anchored to (diagnostics path, and the node
    /// mutated on successful resolution).
    pub node: NodeId,
    /// Human-readable context for the diagnostic, e.g. the raw path text
    /// being resolved.
    pub context: String,
    resolved: bool,
}

impl SchemaItem {
    pub fn new(kind: SchemaItemKind, module: ModuleId, node: NodeId, context: impl Into<String>) -> Self {
        SchemaItem {
            kind,
            module,
            node,
            context: context.into(),
            resolved: false,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}

/// Data-time unresolved-item kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataItemKind {
    Leafref,
    InstanceId,
    WhenEval,
    MustEval,
    EmptyNpContainerPrune,
}

impl DataItemKind {
    pub const fn is_phase_one(self) -> bool {
        matches!(self, Self::WhenEval)
    }
}

/// The tri-state result of a `when` evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhenState {
    Pending,
    True,
    False,
}

/// A single data-time unresolved reference, anchored to an instance node.
#[derive(Clone, Debug)]
pub struct DataItem {
    pub kind: DataItemKind,
    pub node: InstanceId,
    pub context: String,
    resolved: bool,
}

impl DataItem {
    pub fn new(kind: DataItemKind, node: InstanceId, context: impl Into<String>) -> Self {
        DataItem {
            kind,
            node,
            context: context.into(),
            resolved: false,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}
