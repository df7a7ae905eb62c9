use yang_common::{Atom, DiagnosticSink, ResolveFlags};
use yang_schema::{Builtin, ConfigFlag, ModuleId, ModuleRegistry, NodeData, NodeId, SchemaNode, Status, Type};

use crate::xpath::StubXPathScheduler;

use super::*;

struct Harness {
    registry: ModuleRegistry,
    module: ModuleId,
    tree: InstanceTree,
}

impl Harness {
    fn new() -> Self {
        let mut registry = ModuleRegistry::new();
        let name = registry.interner.intern("m");
        let namespace = registry.interner.intern("urn:m");
        let prefix = registry.interner.intern("m");
        let module = registry.insert(yang_schema::Module::new(ModuleId(0), name, namespace, prefix));
        Harness { registry, module, tree: InstanceTree::new() }
    }

    fn atom(&mut self, s: &str) -> Atom {
        self.registry.interner.intern(s)
    }

    fn schema_node(&mut self, parent: Option<NodeId>, name: &str, data: NodeData) -> NodeId {
        let name_atom = self.atom(name);
        let m = &mut self.registry.modules[self.module.index()];
        let id = NodeId(m.nodes.len() as u32);
        let node = SchemaNode {
            id,
            name: name_atom,
            module: self.module,
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

    fn container(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        self.schema_node(parent, name, NodeData::Container { presence: None })
    }

    fn leaf(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let ty = self.registry.modules[self.module.index()].types.insert(Type::Builtin(Builtin::Uint8 { range: None }));
        self.schema_node(parent, name, NodeData::Leaf { ty, default: None })
    }

    fn instance(&mut self, schema: NodeId, parent: Option<InstanceId>, value: Option<&str>) -> InstanceId {
        self.tree.insert(schema, self.module, parent, value.map(str::to_string))
    }
}

#[test]
fn when_false_auto_deletes_subtree_and_nested_items_resolve_vacuously() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let target = h.leaf(Some(root), "target");

    let root_inst = h.instance(root, None, None);
    let target_inst = h.instance(target, Some(root_inst), Some("42"));

    let mut scheduler = StubXPathScheduler::new();
    scheduler.set_answer(root_inst, "condition", false);

    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::WhenEval, root_inst, "condition"));
    worklist.push(DataItem::new(DataItemKind::MustEval, target_inst, "irrelevant"));

    let mut sink = DiagnosticSink::default();
    let report = resolve_unres_data(
        &mut h.tree,
        &h.registry,
        &mut worklist,
        &mut scheduler,
        ResolveFlags::empty(),
        &mut sink,
    )
    .expect("resolves");

    assert!(!sink.has_errors());
    assert!(h.tree.node(root_inst).deleted);
    assert!(h.tree.is_in_deleted_subtree(target_inst));
    assert!(report.data_items_resolved >= 2);
}

#[test]
fn when_false_with_no_auto_del_is_a_hard_error() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let root_inst = h.instance(root, None, None);

    let mut scheduler = StubXPathScheduler::new();
    scheduler.set_answer(root_inst, "condition", false);

    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::WhenEval, root_inst, "condition"));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(
        &mut h.tree,
        &h.registry,
        &mut worklist,
        &mut scheduler,
        ResolveFlags::NO_AUTO_DEL,
        &mut sink,
    )
    .expect("the driver still completes; the failure is a diagnostic, not a host error");

    assert!(sink.has_errors());
    assert!(!h.tree.node(root_inst).deleted);
}

#[test]
fn must_false_produces_a_diagnostic() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let root_inst = h.instance(root, None, None);

    let mut scheduler = StubXPathScheduler::new();
    scheduler.set_answer(root_inst, "1 = 2", false);

    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::MustEval, root_inst, "1 = 2"));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink)
        .expect("resolves");

    assert!(sink.has_errors());
}

#[test]
fn leafref_matches_a_sibling_instance() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let target = h.leaf(Some(root), "target");
    let source = h.leaf(Some(root), "source");

    let root_inst = h.instance(root, None, None);
    h.instance(target, Some(root_inst), Some("42"));
    let source_inst = h.instance(source, Some(root_inst), Some("42"));

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::Leafref, source_inst, "1 ../target"));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink)
        .expect("resolves");

    assert!(!sink.has_errors());
}

#[test]
fn leafref_with_require_instance_fails_when_unmatched() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let target = h.leaf(Some(root), "target");
    let source = h.leaf(Some(root), "source");

    let root_inst = h.instance(root, None, None);
    h.instance(target, Some(root_inst), Some("42"));
    let source_inst = h.instance(source, Some(root_inst), Some("99"));

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::Leafref, source_inst, "1 ../target"));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink)
        .expect("resolves");

    assert!(sink.has_errors());
}

#[test]
fn instance_identifier_resolves_from_the_data_root() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let target = h.leaf(Some(root), "target");
    let anchor = h.leaf(Some(root), "anchor");

    let root_inst = h.instance(root, None, None);
    h.instance(target, Some(root_inst), Some("42"));
    let anchor_inst = h.instance(anchor, Some(root_inst), Some("x"));

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::InstanceId, anchor_inst, "1 /m:root/m:target"));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink)
        .expect("resolves");

    assert!(!sink.has_errors());
}

#[test]
fn empty_non_presence_container_is_pruned_unless_kept() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let empty = h.container(Some(root), "empty");

    let root_inst = h.instance(root, None, None);
    let empty_inst = h.instance(empty, Some(root_inst), None);

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::EmptyNpContainerPrune, empty_inst, ""));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink)
        .expect("resolves");
    assert!(!sink.has_errors());
    assert!(h.tree.node(empty_inst).deleted);
}

#[test]
fn keep_empty_containers_flag_suppresses_the_prune() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let empty = h.container(Some(root), "empty");

    let root_inst = h.instance(root, None, None);
    let empty_inst = h.instance(empty, Some(root_inst), None);

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::EmptyNpContainerPrune, empty_inst, ""));

    let mut sink = DiagnosticSink::default();
    resolve_unres_data(
        &mut h.tree,
        &h.registry,
        &mut worklist,
        &mut scheduler,
        ResolveFlags::KEEP_EMPTY_CONTAINERS,
        &mut sink,
    )
    .expect("resolves");
    assert!(!h.tree.node(empty_inst).deleted);
}

#[test]
fn an_item_with_no_scheduler_answer_never_resolves() {
    let mut h = Harness::new();
    let root = h.container(None, "root");
    let root_inst = h.instance(root, None, None);

    let mut scheduler = StubXPathScheduler::new();
    let mut worklist = Worklist::new();
    worklist.push(DataItem::new(DataItemKind::WhenEval, root_inst, "condition"));

    let mut sink = DiagnosticSink::default();
    let result = resolve_unres_data(&mut h.tree, &h.registry, &mut worklist, &mut scheduler, ResolveFlags::empty(), &mut sink);
    assert!(result.is_err());
}
