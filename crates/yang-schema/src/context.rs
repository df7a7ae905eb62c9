//! The schema-tree lookup's view of "everything outside this one module":
//! other loaded modules and the shared string interner. Resolution of an
//! import prefix to a module is delegated to the implementor, matching
//! the module-lookup collaborator interface.

use yang_common::Interner;

use crate::ids::ModuleId;
use crate::module::Module;

pub trait ModuleContext {
    fn module(&self, id: ModuleId) -> &Module;
    fn interner(&self) -> &Interner;

    /// Resolves `prefix` as seen from `from`: the current module (if
    /// `prefix` is `from`'s own), an imported module, or a submodule's
    /// `belongs-to` target. `None` means the prefix is unknown.
    fn resolve_prefix(&self, from: ModuleId, prefix: &str) -> Option<ModuleId>;
}

/// A minimal in-memory [`ModuleContext`] sufficient for tests and the
/// batch CLI: modules are looked up by their own declared prefix.
#[derive(Default)]
pub struct ModuleRegistry {
    pub interner: Interner,
    pub modules: Vec<Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry {
            interner: Interner::new(),
            modules: Vec::new(),
        }
    }

    pub fn insert(&mut self, module: Module) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(module);
        id
    }
}

impl ModuleContext for ModuleRegistry {
    fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    fn interner(&self) -> &Interner {
        &self.interner
    }

    fn resolve_prefix(&self, from: ModuleId, prefix: &str) -> Option<ModuleId> {
        let from_module = self.module(from);
        if self.interner.resolve(from_module.prefix) == prefix {
            return Some(from);
        }
        for (&import_prefix, &target) in &from_module.imports {
            if self.interner.resolve(import_prefix) == prefix {
                return Some(target);
            }
        }
        None
    }
}
