//! Identities and the identity base DAG.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use yang_common::Atom;

use crate::arena::Arena;
use crate::ids::{IdentityId, ModuleId};

#[derive(Clone, Debug)]
pub struct Identity {
    pub name: Atom,
    pub module: ModuleId,
    /// YANG 1.1 allows multiple `base` statements.
    pub bases: SmallVec<[IdentityId; 2]>,
    /// Back-links maintained under each base whenever a derived identity
    /// is added, so identityref validation can walk "is X derived from Y"
    /// without a full DAG traversal.
    pub derived: Vec<IdentityId>,
}

impl Identity {
    pub fn new(name: Atom, module: ModuleId) -> Self {
        Identity {
            name,
            module,
            bases: SmallVec::new(),
            derived: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct IdentityArena {
    arena: Arena<IdentityId, Identity>,
}

impl IdentityArena {
    pub fn new() -> Self {
        IdentityArena {
            arena: Arena::new(),
        }
    }

    pub fn insert(&mut self, identity: Identity) -> IdentityId {
        self.arena.insert(identity)
    }

    pub fn get(&self, id: IdentityId) -> &Identity {
        &self.arena[id]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Adds `base` as a base of `child`, maintaining the back-link on
    /// `base`. Rejects the edge if it would close a cycle in the base
    /// DAG, *without* mutating either identity.
    ///
    /// Multiple inheritance (YANG 1.1) means this cannot be a union-find
    /// "already connected" check: a diamond (`d base b`, `d base c`,
    /// `b base a`, `c base a`) shares the ancestor `a` through two paths
    /// with no cycle present, and an undirected connectivity check would
    /// flag it as one. Plain reachability from `base` back to `child` is
    /// the only sound test.
    pub fn add_base(&mut self, child: IdentityId, base: IdentityId) -> Result<(), CycleError> {
        if child == base || self.is_reachable(base, child) {
            return Err(CycleError { identity: child });
        }
        self.arena[child].bases.push(base);
        self.arena[base].derived.push(child);
        Ok(())
    }

    /// Whether `target` is in `from`'s transitive base closure.
    pub fn is_reachable(&self, from: IdentityId, target: IdentityId) -> bool {
        let mut stack = vec![from];
        let mut seen = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            stack.extend(self.arena[current].bases.iter().copied());
        }
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleError {
    pub identity: IdentityId,
}

#[cfg(test)]
#[path = "tests/identity.rs"]
mod tests;
