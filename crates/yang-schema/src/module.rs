//! Module: the top-level compilation unit.

use rustc_hash::FxHashMap;
use yang_common::Atom;

use crate::arena::Arena;
use crate::feature::Feature;
use crate::identity::IdentityArena;
use crate::ids::{FeatureId, ModuleId, NodeId, TypeId};
use crate::node::SchemaNode;
use crate::ty::Type;

/// A named, versioned namespace holding ordered top-level data-definition
/// nodes, typedefs, groupings, features, identities, augments and
/// deviations.
///
/// Identifier uniqueness is tracked per kind-group (data nodes, types,
/// groupings, features, identities) via the `*_by_name` maps: after every
/// expansion (uses, augment, deviation) the relevant map is re-checked,
/// per the invariant that uniqueness must hold only once expansion is
/// complete, not at every intermediate step.
#[derive(Debug)]
pub struct Module {
    pub id: ModuleId,
    pub name: Atom,
    pub revision: Option<String>,
    pub namespace: Atom,
    pub prefix: Atom,

    pub nodes: Arena<NodeId, SchemaNode>,
    pub types: Arena<TypeId, Type>,
    pub identities: IdentityArena,
    pub features: Arena<FeatureId, Feature>,

    /// Top-level data-definition nodes, in declaration order.
    pub top_level: Vec<NodeId>,
    /// Top-level `typedef`s by name.
    pub typedefs_by_name: FxHashMap<Atom, TypeId>,
    /// Top-level `grouping`s by name (groupings are ordinary
    /// [`crate::node::NodeData::Grouping`] schema nodes).
    pub groupings_by_name: FxHashMap<Atom, NodeId>,
    pub features_by_name: FxHashMap<Atom, FeatureId>,
    pub identities_by_name: FxHashMap<Atom, crate::ids::IdentityId>,

    /// `prefix -> imported module` resolved by the module-lookup
    /// collaborator ahead of time and recorded here for the schema-tree
    /// lookup's module-prefix handling.
    pub imports: FxHashMap<Atom, ModuleId>,
    /// Set once a deviation targets a node reached transitively through
    /// this module (§4.6 "marked as deviated and implemented").
    pub deviated: bool,
    pub implemented: bool,
}

impl Module {
    pub fn new(id: ModuleId, name: Atom, namespace: Atom, prefix: Atom) -> Self {
        Module {
            id,
            name,
            revision: None,
            namespace,
            prefix,
            nodes: Arena::new(),
            types: Arena::new(),
            identities: IdentityArena::new(),
            features: Arena::new(),
            top_level: Vec::new(),
            typedefs_by_name: FxHashMap::default(),
            groupings_by_name: FxHashMap::default(),
            features_by_name: FxHashMap::default(),
            identities_by_name: FxHashMap::default(),
            imports: FxHashMap::default(),
            deviated: false,
            implemented: true,
        }
    }

    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id]
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id]
    }

    /// Children of `parent`, or the module's top-level nodes when
    /// `parent` is `None`.
    pub fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.node(id).children,
            None => &self.top_level,
        }
    }
}

#[cfg(test)]
#[path = "tests/module.rs"]
mod tests;
