//! A minimal already-parsed instance-data tree: the data-worklist analog
//! of the schema tree the "parser collaborator" hands the schema
//! resolver. Building one from wire XML/JSON is out of scope (§1); tests
//! and `yang-cli` construct `InstanceTree`s directly or from the same
//! JSON fixture format used for schema modules.

use yang_schema::{ModuleId, NodeId};

use crate::item::WhenState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl InstanceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct InstanceNode {
    pub id: InstanceId,
    /// The schema node this instance conforms to.
    pub schema: NodeId,
    pub schema_module: ModuleId,
    pub parent: Option<InstanceId>,
    pub children: Vec<InstanceId>,
    /// Leaf/leaf-list canonical value. `None` for container-shaped nodes.
    pub value_str: Option<String>,
    pub when_state: WhenState,
    /// Set by phase 1 when a false `when` (or cascade from a deleted
    /// ancestor) removes this node from the effective tree. Physically
    /// retained in the arena (indices must stay stable) but skipped by
    /// every later phase-2 operation and by `children_of`.
    pub deleted: bool,
}

#[derive(Debug, Default)]
pub struct InstanceTree {
    nodes: Vec<InstanceNode>,
    pub roots: Vec<InstanceId>,
}

impl InstanceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        schema: NodeId,
        schema_module: ModuleId,
        parent: Option<InstanceId>,
        value_str: Option<String>,
    ) -> InstanceId {
        let id = InstanceId(self.nodes.len() as u32);
        self.nodes.push(InstanceNode {
            id,
            schema,
            schema_module,
            parent,
            children: Vec::new(),
            value_str,
            when_state: WhenState::Pending,
            deleted: false,
        });
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: InstanceId) -> &InstanceNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: InstanceId) -> &mut InstanceNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live (non-deleted) children of `parent`, or the tree's live roots
    /// when `parent` is `None`.
    pub fn children_of(&self, parent: Option<InstanceId>) -> Vec<InstanceId> {
        let ids: &[InstanceId] = match parent {
            Some(id) => &self.node(id).children,
            None => &self.roots,
        };
        ids.iter().copied().filter(|&id| !self.node(id).deleted).collect()
    }

    /// Marks `id` and every descendant as deleted (the auto-prune pass of
    /// §4.4 Phase 1).
    pub fn delete_subtree(&mut self, id: InstanceId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.node_mut(current).deleted = true;
            stack.extend(self.node(current).children.iter().copied());
        }
    }

    /// Whether `id` or any ancestor is deleted.
    pub fn is_in_deleted_subtree(&self, id: InstanceId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.node(node).deleted {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/instance.rs"]
mod tests;
