use yang_common::Atom;
use yang_schema::{ConfigFlag, ModuleId, ModuleRegistry, NodeData, NodeId, SchemaNode, Status};

use super::*;

struct Harness {
    registry: ModuleRegistry,
}

impl Harness {
    fn new() -> Self {
        Harness { registry: ModuleRegistry::new() }
    }

    fn atom(&mut self, s: &str) -> Atom {
        self.registry.interner.intern(s)
    }

    fn new_module(&mut self, name: &str) -> ModuleId {
        let name_atom = self.atom(name);
        let namespace = self.atom(&format!("urn:{name}"));
        let prefix = self.atom(name);
        let module = yang_schema::Module::new(ModuleId(0), name_atom, namespace, prefix);
        self.registry.insert(module)
    }

    fn module_mut(&mut self, id: ModuleId) -> &mut yang_schema::Module {
        &mut self.registry.modules[id.index()]
    }

    fn bare_node(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str, data: NodeData) -> NodeId {
        let name_atom = self.atom(name);
        let m = self.module_mut(module);
        let id = NodeId(m.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name: name_atom,
            module,
            parent,
            children: Vec::new(),
            config: ConfigFlag::Inherited,
            status: Status::Current,
            mandatory: false,
            when: None,
            must: Vec::new(),
            if_features: Vec::new(),
            extensions: Vec::new(),
            data,
        };
        let inserted = m.nodes.insert(node);
        debug_assert_eq!(inserted, id);
        match parent {
            Some(p) => m.nodes[p].children.push(id),
            None => m.top_level.push(id),
        }
        id
    }

    fn add_container(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Container { presence: None })
    }

    fn add_choice(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Choice { default_case: None })
    }

    fn add_leaf(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str, mandatory: bool) -> NodeId {
        let ty = {
            let m = self.module_mut(module);
            m.types.insert(yang_schema::Type::Builtin(yang_schema::Builtin::Uint8 { range: None }))
        };
        let id = self.bare_node(module, parent, name, NodeData::Leaf { ty, default: None });
        self.module_mut(module).node_mut(id).mandatory = mandatory;
        id
    }
}

#[test]
fn apply_augment_splices_data_children_into_container() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let target = h.add_container(module, None, "target");
    let new_leaf = h.add_leaf(module, None, "added", false);

    apply_augment(h.module_mut(module), target, module, &[new_leaf]).expect("splice succeeds");

    let m = h.module_mut(module);
    assert_eq!(m.children_of(Some(target)), &[new_leaf]);
    assert_eq!(m.node(new_leaf).parent, Some(target));
}

#[test]
fn apply_augment_rejects_non_case_child_under_choice() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let target = h.add_choice(module, None, "target");
    let new_leaf = h.add_leaf(module, None, "added", false);

    let err = apply_augment(h.module_mut(module), target, module, &[new_leaf]).unwrap_err();
    assert_eq!(
        err,
        AugmentError::ChildKindMismatch { target: yang_schema::NodeKind::Choice, child: yang_schema::NodeKind::Leaf }
    );
}

#[test]
fn apply_augment_rejects_mandatory_leaf_across_modules() {
    let mut h = Harness::new();
    let module_b = h.new_module("b");
    let target = h.add_container(module_b, None, "target");
    let module_a = h.new_module("a");
    let new_leaf = h.add_leaf(module_b, None, "added", true);

    let err = apply_augment(h.module_mut(module_b), target, module_a, &[new_leaf]).unwrap_err();
    assert_eq!(err, AugmentError::MandatoryAcrossModules);
}

#[test]
fn apply_augment_allows_mandatory_leaf_within_same_module() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let target = h.add_container(module, None, "target");
    let new_leaf = h.add_leaf(module, None, "added", true);

    apply_augment(h.module_mut(module), target, module, &[new_leaf]).expect("same-module mandatory is fine");
}

#[test]
fn apply_augment_rejects_duplicate_identifier() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let target = h.add_container(module, None, "target");
    h.add_leaf(module, Some(target), "x", false);
    let new_leaf = h.add_leaf(module, None, "x", false);

    let err = apply_augment(h.module_mut(module), target, module, &[new_leaf]).unwrap_err();
    assert_eq!(err, AugmentError::DuplicateIdentifier);
}
