//! Shared fixture builders for this crate's own tests.

use yang_common::{Atom, Interner};

use crate::config::ConfigFlag;
use crate::ids::{ModuleId, NodeId, TypeId};
use crate::module::Module;
use crate::node::{NodeData, SchemaNode};
use crate::status::Status;
use crate::ty::{Builtin, Type};

pub struct Fixture {
    pub interner: Interner,
    pub module: Module,
}

impl Fixture {
    pub fn new(name: &str) -> Self {
        let mut interner = Interner::new();
        let module_name = interner.intern(name);
        let namespace = interner.intern(&format!("urn:{name}"));
        let prefix = interner.intern(name);
        let module = Module::new(ModuleId(0), module_name, namespace, prefix);
        Fixture { interner, module }
    }

    pub fn atom(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    pub fn string_type(&mut self) -> TypeId {
        self.module.types.insert(Type::Builtin(Builtin::StringT(Default::default())))
    }

    fn push_child(&mut self, parent: Option<NodeId>, id: NodeId) {
        match parent {
            Some(p) => self.module.nodes[p].children.push(id),
            None => self.module.top_level.push(id),
        }
    }

    pub fn add_leaf(&mut self, parent: Option<NodeId>, name: &str, ty: TypeId) -> NodeId {
        let name = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name,
            module: self.module.id,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::Leaf { ty, default: None },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(parent, id);
        id
    }

    pub fn add_container(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let name = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name,
            module: self.module.id,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::Container { presence: None },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(parent, id);
        id
    }

    pub fn add_list(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let name = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name,
            module: self.module.id,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::List {
                keys: Vec::new(),
                unique: Vec::new(),
                min_elements: 0,
                max_elements: None,
            },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(parent, id);
        id
    }

    pub fn add_choice(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let name = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name,
            module: self.module.id,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::Choice { default_case: None },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(parent, id);
        id
    }

    pub fn add_grouping(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let name_atom = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name: name_atom,
            module: self.module.id,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::Grouping { pending_uses: 0 },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(parent, id);
        if parent.is_none() {
            self.module.groupings_by_name.insert(name_atom, id);
        }
        id
    }

    /// Adds a case under `choice`. `synthetic` marks it as a shorthand
    /// wrapper (its single child's name is what's actually addressed in
    /// a path, never the case's own name).
    pub fn add_case(&mut self, choice: NodeId, name: &str, synthetic: bool) -> NodeId {
        let name = self.atom(name);
        let id = NodeId(self.module.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name,
            module: self.module.id,
            parent: Some(choice),
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data: NodeData::Case { synthetic },
        };
        let inserted = self.module.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        self.push_child(Some(choice), id);
        id
    }
}
