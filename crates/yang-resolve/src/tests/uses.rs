use yang_common::Atom;
use yang_schema::{
    ConfigFlag, ModuleId, ModuleRegistry, MustConstraint, NodeData, NodeId, RefineRecord, SchemaNode,
    Status,
};

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

    fn add_grouping(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Grouping { pending_uses: 0 })
    }

    fn add_leaf(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        let ty = {
            let m = self.module_mut(module);
            m.types.insert(yang_schema::Type::Builtin(yang_schema::Builtin::Uint8 { range: None }))
        };
        self.bare_node(module, parent, name, NodeData::Leaf { ty, default: None })
    }

    fn add_container(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Container { presence: None })
    }

    fn add_list_with_key(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> (NodeId, NodeId) {
        let list = self.bare_node(
            module,
            parent,
            name,
            NodeData::List { keys: Vec::new(), unique: Vec::new(), min_elements: 0, max_elements: None },
        );
        let key = self.add_leaf(module, Some(list), "id");
        if let NodeData::List { keys, .. } = &mut self.module_mut(module).node_mut(list).data {
            keys.push(key);
        }
        (list, key)
    }
}

#[test]
fn expand_uses_copies_children_under_new_parent() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let grouping = h.add_grouping(module, None, "g");
    h.add_leaf(module, Some(grouping), "x");

    let site = h.add_container(module, None, "site");
    let new_children = expand_uses(h.module_mut(module), Some(site), grouping);

    assert_eq!(new_children.len(), 1);
    let copied = new_children[0];
    let m = h.module_mut(module);
    assert_eq!(m.node(copied).parent, Some(site));
    assert_eq!(m.children_of(Some(site)), &[copied]);
    assert_ne!(copied, m.children_of(Some(grouping))[0]);
}

#[test]
fn expand_uses_remaps_list_key_self_reference() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let grouping = h.add_grouping(module, None, "g");
    let (list, _key) = h.add_list_with_key(module, Some(grouping), "items");
    let _ = list;

    let site = h.add_container(module, None, "site");
    let new_children = expand_uses(h.module_mut(module), Some(site), grouping);
    let new_list = new_children[0];

    let m = h.module_mut(module);
    let new_key = m.children_of(Some(new_list))[0];
    match &m.node(new_list).data {
        NodeData::List { keys, .. } => assert_eq!(keys, &vec![new_key]),
        _ => panic!("expected a list"),
    }
}

#[test]
fn apply_refine_sets_config_and_mandatory() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let site = h.add_container(module, None, "site");
    h.add_leaf(module, Some(site), "x");

    let refine = RefineRecord {
        target: "x".to_string(),
        description: None,
        reference: None,
        config: Some(false),
        mandatory: Some(true),
        presence: None,
        min_elements: None,
        max_elements: None,
        must: vec![MustConstraint { xpath: "1 = 1".into(), error_message: None, error_app_tag: None }],
        default: Vec::new(),
    };

    {
        let registry = &mut h.registry;
        apply_refine(&mut registry.modules[module.index()], &registry.interner, site, &refine)
            .expect("refine applies");
    }

    let m = h.module_mut(module);
    let target = m.children_of(Some(site))[0];
    let node = m.node(target);
    assert_eq!(node.config, ConfigFlag::Explicit(false));
    assert!(node.mandatory);
    assert_eq!(node.must.len(), 1);
}

#[test]
fn apply_refine_rejects_presence_on_leaf() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let site = h.add_container(module, None, "site");
    h.add_leaf(module, Some(site), "x");

    let refine = RefineRecord {
        target: "x".to_string(),
        description: None,
        reference: None,
        config: None,
        mandatory: None,
        presence: Some("enabled".to_string()),
        min_elements: None,
        max_elements: None,
        must: Vec::new(),
        default: Vec::new(),
    };

    let err = {
        let registry = &mut h.registry;
        apply_refine(&mut registry.modules[module.index()], &registry.interner, site, &refine).unwrap_err()
    };
    assert_eq!(err, UsesError::RefineIncompatible { field: "presence", kind: yang_schema::NodeKind::Leaf });
}

#[test]
fn apply_refine_rejects_config_true_under_false_ancestor() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let outer = h.add_container(module, None, "outer");
    {
        let m = h.module_mut(module);
        m.node_mut(outer).config = ConfigFlag::Explicit(false);
    }
    let inner = h.add_container(module, Some(outer), "inner");
    {
        let m = h.module_mut(module);
        m.node_mut(inner).config = ConfigFlag::Explicit(true);
    }

    let refine = RefineRecord {
        target: "inner".to_string(),
        description: None,
        reference: None,
        config: Some(true),
        mandatory: None,
        presence: None,
        min_elements: None,
        max_elements: None,
        must: Vec::new(),
        default: Vec::new(),
    };

    let err = {
        let registry = &mut h.registry;
        apply_refine(&mut registry.modules[module.index()], &registry.interner, outer, &refine).unwrap_err()
    };
    assert_eq!(err, UsesError::ConfigTrueUnderFalse);
}
