use yang_common::{Atom, DiagnosticSink};
use yang_schema::{
    AugmentRecord, Builtin, ConfigFlag, Feature, Identity, ModuleId, ModuleRegistry, NodeData, NodeId,
    RefineRecord, SchemaNode, Status, Type,
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

    fn add_container(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Container { presence: None })
    }

    fn add_leaf_of(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str, ty: Type) -> NodeId {
        let ty_id = self.module_mut(module).types.insert(ty);
        self.bare_node(module, parent, name, NodeData::Leaf { ty: ty_id, default: None })
    }

    fn add_grouping(&mut self, module: ModuleId, parent: Option<NodeId>, name: &str) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Grouping { pending_uses: 0 })
    }

    fn add_uses(
        &mut self,
        module: ModuleId,
        parent: Option<NodeId>,
        name: &str,
        grouping: NodeId,
        refines: Vec<RefineRecord>,
        augments: Vec<AugmentRecord>,
    ) -> NodeId {
        self.bare_node(module, parent, name, NodeData::Uses { grouping, refines, augments })
    }

    fn add_identity(&mut self, module: ModuleId, name: &str) -> yang_schema::IdentityId {
        let atom = self.atom(name);
        let m = self.module_mut(module);
        let id = m.identities.insert(Identity::new(atom, module));
        m.identities_by_name.insert(atom, id);
        id
    }

    fn add_feature(&mut self, module: ModuleId, name: &str) {
        let atom = self.atom(name);
        let m = self.module_mut(module);
        let id = m.features.insert(Feature { name: atom, module, if_features: Vec::new() });
        m.features_by_name.insert(atom, id);
    }
}

#[test]
fn type_derivation_narrows_successfully() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let base = h.module_mut(module).types.insert(Type::Builtin(Builtin::Uint8 {
        range: Some(yang_constraints::IntervalSet { kind: yang_constraints::NumericKind::Unsigned, intervals: smallvec::smallvec![(0, 100)] }),
    }));
    let derived_ty = Type::Derived(yang_schema::Derived {
        name: h.atom("percentage"),
        module,
        base,
        length: None,
        range: Some(yang_constraints::IntervalSet { kind: yang_constraints::NumericKind::Unsigned, intervals: smallvec::smallvec![(0, 50)] }),
        patterns: Vec::new(),
        enum_set: None,
        bit_set: None,
        fraction_digits: None,
        require_instance: None,
        identity_base: None,
        leafref_path: None,
    });
    let leaf = h.add_leaf_of(module, None, "x", derived_ty);

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::TypeDerivation, module, leaf, ""));
    let mut sink = DiagnosticSink::default();
    let report = resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(report.round_count() > 0);
    assert!(!sink.has_errors());
}

#[test]
fn type_derivation_rejects_widened_range() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let base = h.module_mut(module).types.insert(Type::Builtin(Builtin::Uint8 {
        range: Some(yang_constraints::IntervalSet { kind: yang_constraints::NumericKind::Unsigned, intervals: smallvec::smallvec![(0, 10)] }),
    }));
    let derived_ty = Type::Derived(yang_schema::Derived {
        name: h.atom("narrow"),
        module,
        base,
        length: None,
        range: Some(yang_constraints::IntervalSet { kind: yang_constraints::NumericKind::Unsigned, intervals: smallvec::smallvec![(0, 50)] }),
        patterns: Vec::new(),
        enum_set: None,
        bit_set: None,
        fraction_digits: None,
        require_instance: None,
        identity_base: None,
        leafref_path: None,
    });
    let leaf = h.add_leaf_of(module, None, "x", derived_ty);

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::TypeDerivation, module, leaf, ""));
    let mut sink = DiagnosticSink::default();
    let result = resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink);
    assert!(result.is_err());
    assert!(sink.has_errors());
}

#[test]
fn uses_expand_runs_in_round_a_before_refine_is_applied() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let grouping = h.add_grouping(module, None, "g");
    h.add_leaf_of(module, Some(grouping), "x", Type::Builtin(Builtin::Uint8 { range: None }));

    let site = h.add_container(module, None, "site");
    let refine = RefineRecord {
        target: "x".to_string(),
        description: None,
        reference: None,
        config: Some(false),
        mandatory: None,
        presence: None,
        min_elements: None,
        max_elements: None,
        must: Vec::new(),
        default: Vec::new(),
    };
    let uses_node = h.add_uses(module, Some(site), "u", grouping, vec![refine], Vec::new());

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::UsesExpand, module, uses_node, ""));
    let mut sink = DiagnosticSink::default();
    let report = resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());
    assert_eq!(report.rounds.first().copied(), Some("round-a"));

    let m = h.module_mut(module);
    let copied = m.children_of(Some(site))[0];
    assert_eq!(m.node(copied).config, ConfigFlag::Explicit(false));
}

#[test]
fn augment_target_splices_children() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let site = h.add_container(module, None, "site");
    let augment_node = h.bare_node(
        module,
        None,
        "aug",
        NodeData::Augment { target: "/m:site".to_string(), when: None },
    );
    let added = h.add_container(module, Some(augment_node), "extra");

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::AugmentTarget, module, augment_node, "/m:site"));
    let mut sink = DiagnosticSink::default();
    resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());

    let m = h.module_mut(module);
    assert!(m.children_of(Some(site)).contains(&added));
}

#[test]
fn list_keys_and_unique_resolve_by_name() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let list = h.bare_node(
        module,
        None,
        "entries",
        NodeData::List { keys: Vec::new(), unique: Vec::new(), min_elements: 0, max_elements: None },
    );
    let key = h.add_leaf_of(module, Some(list), "id", Type::Builtin(Builtin::Uint8 { range: None }));
    h.add_leaf_of(module, Some(list), "name", Type::Builtin(Builtin::StringT(yang_schema::StringDef::default())));

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::ListKeys, module, list, "id"));
    worklist.push(SchemaItem::new(SchemaItemKind::ListUnique, module, list, "name"));
    let mut sink = DiagnosticSink::default();
    resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());

    let m = h.module_mut(module);
    match &m.node(list).data {
        NodeData::List { keys, unique, .. } => {
            assert_eq!(keys, &vec![key]);
            assert_eq!(unique.len(), 1);
        }
        _ => panic!("expected a list"),
    }
}

#[test]
fn ident_base_links_into_the_dag() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    h.add_identity(module, "base-type");
    h.add_identity(module, "derived-type");
    let anchor = h.add_container(module, None, "anchor");

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::IdentBase, module, anchor, "derived-type base-type"));
    let mut sink = DiagnosticSink::default();
    resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());

    let m = h.module_mut(module);
    let derived_id = *m.identities_by_name.get(&h.registry.interner.find("derived-type").unwrap()).unwrap();
    assert_eq!(m.identities.get(derived_id).bases.len(), 1);
}

#[test]
fn if_feature_pending_until_feature_is_known() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let anchor = h.add_container(module, None, "anchor");

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::IfFeature, module, anchor, "never-declared"));
    let mut sink = DiagnosticSink::default();
    let result = resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink);
    assert!(result.is_err());
}

#[test]
fn leafref_default_within_target_fraction_digits_is_accepted() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let root = h.add_container(module, None, "root");
    let decimal_ty = Type::Builtin(Builtin::Decimal64 { fraction_digits: 2, range: None });
    h.add_leaf_of(module, Some(root), "price", decimal_ty);

    let leafref_ty = Type::Builtin(Builtin::Leafref(yang_schema::LeafrefDef {
        path: "../price".to_string(),
        require_instance: true,
        target: None,
    }));
    let ty_id = h.module_mut(module).types.insert(leafref_ty);
    let default = h.atom("1.23");
    let ref_leaf = h.bare_node(module, Some(root), "ref", NodeData::Leaf { ty: ty_id, default: Some(default) });

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::TypeLeafref, module, ref_leaf, "../price"));
    let mut sink = DiagnosticSink::default();
    resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());
}

#[test]
fn leafref_default_exceeding_target_fraction_digits_is_rejected() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    let root = h.add_container(module, None, "root");
    let decimal_ty = Type::Builtin(Builtin::Decimal64 { fraction_digits: 2, range: None });
    h.add_leaf_of(module, Some(root), "price", decimal_ty);

    let leafref_ty = Type::Builtin(Builtin::Leafref(yang_schema::LeafrefDef {
        path: "../price".to_string(),
        require_instance: true,
        target: None,
    }));
    let ty_id = h.module_mut(module).types.insert(leafref_ty);
    let default = h.atom("1.234");
    let ref_leaf = h.bare_node(module, Some(root), "ref", NodeData::Leaf { ty: ty_id, default: Some(default) });

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::TypeLeafref, module, ref_leaf, "../price"));
    let mut sink = DiagnosticSink::default();
    let result = resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink);
    assert!(result.is_err());
    assert!(sink.has_errors());
}

#[test]
fn if_feature_resolves_once_feature_exists() {
    let mut h = Harness::new();
    let module = h.new_module("m");
    h.add_feature(module, "turbo");
    let anchor = h.add_container(module, None, "anchor");

    let mut worklist = Worklist::new();
    worklist.push(SchemaItem::new(SchemaItemKind::IfFeature, module, anchor, "turbo"));
    let mut sink = DiagnosticSink::default();
    resolve_unres_schema(&mut h.registry, &mut worklist, &mut sink).expect("resolves");
    assert!(!sink.has_errors());
}
