//! The schema-time fixpoint driver (§4.4 Round A / Round B, §9).
//!
//! Round A resolves `TYPE_DERIVATION`/`USES_EXPAND` to fixpoint first,
//! since every other kind may depend on a fully-expanded tree or a fully
//! narrowed type. Round B then resolves everything else. Diagnostics are
//! suppressed until the very last pass (`DiagnosticSink::set_suppressed`)
//! so a soft "not yet resolvable" during an early round never surfaces —
//! only the final, true root-cause failure does.
//!
//! `IdentBase`/`TypeIdentrefBase`/`IfFeature` items have no node of their
//! own to resolve into (an identity, a type, a feature reference are not
//! schema nodes), so per `SchemaItem`'s single `node: NodeId` anchor they
//! piggyback on the nearest node that carries the reference (the leaf
//! using the type, or — for `IdentBase`, which has no natural node at
//! all — whichever node the item was enqueued against purely for
//! diagnostic-path purposes). The real edge endpoints travel in `context`
//! as text, consistent with how every other item kind carries its
//! unresolved payload.

use yang_common::{Diagnostic, DiagnosticSink, ErrorCode};
use yang_constraints::IntervalSet;
use yang_schema::{
    AcceptedNodeKinds, AugmentStart, DescendantOptions, LookupError, ModuleContext, ModuleId,
    NodeData, NodeId, NodeKind, Type, find_child_by_atom, resolve_augment_nodeid,
    resolve_choice_default, resolve_descendant_nodeid,
};

use crate::augment::{self, AugmentError};
use crate::error::ResolveError;
use crate::item::{SchemaItem, SchemaItemKind};
use crate::leafref::{self, LeafrefError};
use crate::report::ResolveReport;
use crate::uses::{self, UsesError};
use crate::worklist::Worklist;

/// Drives `worklist` to a fixpoint, per the two-round discipline. Returns
/// once every item is resolved, or [`ResolveError::NoProgress`] if a
/// round completes without resolving anything while items remain
/// pending — always preceded by one final, diagnostics-unsuppressed pass
/// so the caller's sink holds the true root-cause failure, not just the
/// first soft one.
pub fn resolve_unres_schema(
    registry: &mut yang_schema::ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    sink: &mut DiagnosticSink,
) -> Result<ResolveReport, ResolveError> {
    sink.set_suppressed(true);
    let mut report = ResolveReport::default();

    run_round(registry, worklist, sink, &mut report, "round-a", SchemaItemKind::is_round_a);
    run_round(registry, worklist, sink, &mut report, "round-b", |k| !k.is_round_a());

    sink.set_suppressed(false);
    sink.flush_suppressed();
    if !worklist.all_resolved() {
        dispatch_pending(registry, worklist, sink, &mut report, |_| true);
        return Err(ResolveError::NoProgress { worklist: "schema" });
    }
    Ok(report)
}

fn run_round(
    registry: &mut yang_schema::ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    sink: &mut DiagnosticSink,
    report: &mut ResolveReport,
    round_name: &'static str,
    filter: impl Fn(SchemaItemKind) -> bool + Copy,
) {
    loop {
        let resolved_before = report.schema_items_resolved;
        dispatch_pending(registry, worklist, sink, report, filter);
        report.rounds.push(round_name);
        if report.schema_items_resolved == resolved_before
            || report.rounds.len() >= yang_common::limits::MAX_FIXPOINT_ROUNDS
        {
            break;
        }
    }
}

fn dispatch_pending(
    registry: &mut yang_schema::ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    sink: &mut DiagnosticSink,
    report: &mut ResolveReport,
    filter: impl Fn(SchemaItemKind) -> bool,
) {
    let snapshot: Vec<(usize, SchemaItemKind, ModuleId, NodeId, String)> = worklist
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_resolved() && filter(item.kind))
        .map(|(i, item)| (i, item.kind, item.module, item.node, item.context.clone()))
        .collect();

    let mut done = Vec::new();
    for (index, kind, module, node, context) in snapshot {
        match dispatch_one(registry, kind, module, node, &context) {
            Outcome::Resolved => done.push(index),
            Outcome::Pending => {}
            Outcome::Failed(diag) => {
                sink.push(diag);
                done.push(index);
            }
        }
    }

    for (i, item) in worklist.iter_mut().enumerate() {
        if done.contains(&i) {
            item.mark_resolved();
            report.schema_items_resolved += 1;
        }
    }
}

enum Outcome {
    Resolved,
    Pending,
    Failed(Diagnostic),
}

fn node_path(registry: &yang_schema::ModuleRegistry, module: ModuleId, node: NodeId) -> String {
    let m = registry.module(module);
    format!("/{}:{}", registry.interner.resolve(m.name), registry.interner.resolve(m.node(node).name))
}

fn dispatch_one(
    registry: &mut yang_schema::ModuleRegistry,
    kind: SchemaItemKind,
    module: ModuleId,
    node: NodeId,
    context: &str,
) -> Outcome {
    match kind {
        SchemaItemKind::TypeDerivation => resolve_type_derivation(registry, module, node),
        SchemaItemKind::TypeLeafref => resolve_type_leafref(registry, module, node, context),
        SchemaItemKind::ChoiceDefault => resolve_choice_default_item(registry, module, node, context),
        SchemaItemKind::UsesExpand => resolve_uses_expand(registry, module, node),
        SchemaItemKind::AugmentTarget => resolve_augment_target(registry, module, node, context),
        SchemaItemKind::ListKeys => resolve_list_keys(registry, module, node, context),
        SchemaItemKind::ListUnique => resolve_list_unique(registry, module, node, context),
        SchemaItemKind::IdentBase => resolve_ident_base(registry, module, node, context),
        SchemaItemKind::TypeIdentrefBase => resolve_identref_base(registry, module, node, context),
        SchemaItemKind::IfFeature => resolve_if_feature(registry, module, node, context),
        SchemaItemKind::TypeDefaultCheck => Outcome::Resolved,
        SchemaItemKind::XpathRegister => Outcome::Resolved,
    }
}

fn resolve_type_leafref(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    path_text: &str,
) -> Outcome {
    match leafref::resolve_schema_leafref(registry, module, node, path_text) {
        Ok(target) => {
            let m = &mut registry.modules[module.index()];
            let ty = match m.node(node).data {
                NodeData::Leaf { ty, .. } | NodeData::LeafList { ty, .. } => ty,
                _ => return Outcome::Resolved,
            };
            if let Type::Builtin(yang_schema::Builtin::Leafref(def)) = m.ty(ty) {
                let mut def = def.clone();
                def.target = Some(target);
                m.types[ty] = Type::Builtin(yang_schema::Builtin::Leafref(def));
            }
            if let Err(diag) = check_leafref_default_against_target(registry, module, node, target) {
                return Outcome::Failed(diag);
            }
            Outcome::Resolved
        }
        Err(LeafrefError::NotFound) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noleafref,
            node_path(registry, module, node),
            format!("leafref path '{path_text}' does not resolve"),
        )),
        Err(LeafrefError::NotLeaf) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noleafref,
            node_path(registry, module, node),
            "leafref path does not target a leaf or leaf-list",
        )),
        Err(LeafrefError::StatusIncompatible) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Instatus,
            node_path(registry, module, node),
            "leafref targets a less-stable node",
        )),
        Err(LeafrefError::Syntax) => Outcome::Failed(Diagnostic::error(
            ErrorCode::PathInnode,
            node_path(registry, module, node),
            "malformed leafref path",
        )),
    }
}

/// A leafref's own range is always absent (§4.3), so a default on the
/// leafref leaf is only checkable against its *target*'s fraction-digits
/// once resolution has found that target. Walks the target's derivation
/// chain the same way [`merge_derivation_chain`] walks range restrictions,
/// but only far enough to learn whether it bottoms out in `decimal64`.
fn check_leafref_default_against_target(
    registry: &yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    target: NodeId,
) -> Result<(), Diagnostic> {
    let m = &registry.modules[module.index()];
    let target_ty = match m.node(target).data {
        NodeData::Leaf { ty, .. } | NodeData::LeafList { ty, .. } => ty,
        _ => return Ok(()),
    };
    let Some(fraction_digits) = decimal_fraction_digits(m, target_ty, yang_common::limits::MAX_DERIVATION_DEPTH)
    else {
        return Ok(());
    };

    let defaults: Vec<yang_common::Atom> = match &m.node(node).data {
        NodeData::Leaf { default: Some(d), .. } => vec![*d],
        NodeData::LeafList { defaults, .. } => defaults.iter().copied().collect(),
        _ => Vec::new(),
    };
    for default in defaults {
        let text = registry.interner.resolve(default);
        if let Err(yang_constraints::ConstraintError::DecimalPrecisionOverflow) =
            yang_constraints::parse_decimal_literal(text, fraction_digits)
        {
            return Err(Diagnostic::error(
                ErrorCode::Inval,
                node_path(registry, module, node),
                format!("default '{text}' is not expressible at the leafref target's {fraction_digits} fraction digits"),
            ));
        }
    }
    Ok(())
}

/// Walks `ty`'s derivation chain to its built-in ancestor and reports its
/// `fraction-digits` if that ancestor is `decimal64`.
fn decimal_fraction_digits(module: &yang_schema::Module, ty: yang_schema::TypeId, depth_budget: usize) -> Option<u8> {
    if depth_budget == 0 {
        return None;
    }
    match module.ty(ty) {
        Type::Builtin(yang_schema::Builtin::Decimal64 { fraction_digits, .. }) => Some(*fraction_digits),
        Type::Builtin(_) => None,
        Type::Derived(d) => d
            .fraction_digits
            .or_else(|| decimal_fraction_digits(module, d.base, depth_budget - 1)),
    }
}

fn resolve_choice_default_item(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    case_name: &str,
) -> Outcome {
    let resolved = {
        let m = &registry.modules[module.index()];
        resolve_choice_default(m, &registry.interner, node, case_name)
    };
    match resolved {
        Ok(resolved) => {
            if let NodeData::Choice { default_case } = &mut registry.modules[module.index()].node_mut(node).data {
                *default_case = Some(resolved);
            }
            Outcome::Resolved
        }
        Err(_) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noresolv,
            node_path(registry, module, node),
            format!("default case '{case_name}' not found"),
        )),
    }
}

fn resolve_uses_expand(registry: &mut yang_schema::ModuleRegistry, module: ModuleId, uses_node: NodeId) -> Outcome {
    let (grouping, refines, augments, parent) = {
        let m = &registry.modules[module.index()];
        let NodeData::Uses { grouping, refines, augments } = m.node(uses_node).data.clone() else {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::Internal,
                node_path(registry, module, uses_node),
                "UsesExpand item anchored on a non-uses node",
            ));
        };
        if let NodeData::Grouping { pending_uses } = &m.node(grouping).data {
            if *pending_uses > 0 {
                return Outcome::Pending;
            }
        }
        (grouping, refines, augments, m.node(uses_node).parent)
    };

    {
        let m = &mut registry.modules[module.index()];
        let _ = uses::expand_uses(m, parent, grouping);
    }

    for refine in &refines {
        let result =
            uses::apply_refine(&mut registry.modules[module.index()], &registry.interner, uses_node, refine);
        if let Err(err) = result {
            return Outcome::Failed(uses_error_diagnostic(registry, module, uses_node, err));
        }
    }

    for augment_record in &augments {
        let target = match resolve_descendant_nodeid(
            registry,
            module,
            uses_node,
            &augment_record.target,
            AcceptedNodeKinds::all(),
            DescendantOptions::default(),
        ) {
            Ok(t) => t,
            Err(e) => return Outcome::Failed(lookup_error_diagnostic(registry, module, uses_node, e)),
        };
        let m = &mut registry.modules[module.index()];
        if let Err(err) = augment::apply_augment(m, target, module, &augment_record.children) {
            return Outcome::Failed(augment_error_diagnostic(registry, module, uses_node, err));
        }
    }

    Outcome::Resolved
}

fn resolve_augment_target(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    augment_node: NodeId,
    target_text: &str,
) -> Outcome {
    let children = {
        let m = &registry.modules[module.index()];
        if !matches!(m.node(augment_node).data, NodeData::Augment { .. }) {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::Internal,
                node_path(registry, module, augment_node),
                "AugmentTarget item anchored on a non-augment node",
            ));
        }
        m.node(augment_node).children.clone()
    };

    let target = match resolve_augment_nodeid(registry, target_text, AugmentStart::TopLevel(module)) {
        Ok(t) => t,
        Err(e) => return Outcome::Failed(lookup_error_diagnostic(registry, module, augment_node, e)),
    };
    let target_module = resolve_target_module(registry, module, target_text).unwrap_or(module);

    let m = &mut registry.modules[target_module.index()];
    match augment::apply_augment(m, target, module, &children) {
        Ok(()) => Outcome::Resolved,
        Err(err) => Outcome::Failed(augment_error_diagnostic(registry, module, augment_node, err)),
    }
}

/// Re-derives which module owns the augment's target, for indexing into
/// `ModuleRegistry` once the target is found: the last prefixed
/// segment's module, or the starting module if the path never switches.
fn resolve_target_module(
    registry: &yang_schema::ModuleRegistry,
    start_module: ModuleId,
    text: &str,
) -> Option<ModuleId> {
    let (_, parsed) = yang_path::parse_schema_nodeid(text).ok()?;
    let mut current = start_module;
    for seg in &parsed.segments {
        if let Some(prefix) = seg.prefix {
            current = registry.resolve_prefix(current, prefix)?;
        }
    }
    Some(current)
}

fn resolve_list_keys(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    keys_text: &str,
) -> Outcome {
    let mut resolved = Vec::new();
    for name in keys_text.split_whitespace() {
        let m = &registry.modules[module.index()];
        let found = registry.interner.find(name).and_then(|atom| find_child_by_atom(m, Some(node), atom));
        match found {
            Some(key) => resolved.push(key),
            None => {
                return Outcome::Failed(Diagnostic::error(
                    ErrorCode::KeyMiss,
                    node_path(registry, module, node),
                    format!("key leaf '{name}' does not exist"),
                ));
            }
        }
    }

    for &key in &resolved {
        if registry.modules[module.index()].node(key).kind() != NodeKind::Leaf {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::KeyNleaf,
                node_path(registry, module, node),
                "list key is not a leaf",
            ));
        }
    }

    let m = &mut registry.modules[module.index()];
    if let NodeData::List { keys, .. } = &mut m.node_mut(node).data {
        *keys = resolved;
    }
    Outcome::Resolved
}

fn resolve_list_unique(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    unique_text: &str,
) -> Outcome {
    let mut one_statement = Vec::new();
    for path in unique_text.split_whitespace() {
        match resolve_descendant_nodeid(
            registry,
            module,
            node,
            path,
            AcceptedNodeKinds::LEAF,
            DescendantOptions { forbid_inner_list: true },
        ) {
            Ok(leaf) => one_statement.push(leaf),
            Err(e) => return Outcome::Failed(lookup_error_diagnostic(registry, module, node, e)),
        }
    }

    let m = &mut registry.modules[module.index()];
    if let NodeData::List { unique, .. } = &mut m.node_mut(node).data {
        unique.push(one_statement);
    }
    Outcome::Resolved
}

/// `context` is `"<child-identity-name> <base-name>"`. `node` anchors the
/// diagnostic only; identities have no schema node of their own.
fn resolve_ident_base(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    context: &str,
) -> Outcome {
    let Some((child_name, base_name)) = context.split_once(' ') else {
        return Outcome::Failed(Diagnostic::error(
            ErrorCode::Internal,
            node_path(registry, module, node),
            "malformed IdentBase item context",
        ));
    };

    let (child_id, base_id) = {
        let m = registry.module(module);
        let child_atom = registry.interner.find(child_name);
        let base_atom = registry.interner.find(base_name);
        let (Some(child_atom), Some(base_atom)) = (child_atom, base_atom) else {
            return Outcome::Pending;
        };
        let (Some(&child_id), Some(&base_id)) =
            (m.identities_by_name.get(&child_atom), m.identities_by_name.get(&base_atom))
        else {
            return Outcome::Pending;
        };
        (child_id, base_id)
    };

    let m = &mut registry.modules[module.index()];
    match m.identities.add_base(child_id, base_id) {
        Ok(()) => Outcome::Resolved,
        Err(_) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Inresolv,
            node_path(registry, module, node),
            format!("identity '{child_name}' bases on '{base_name}', forming a cycle"),
        )),
    }
}

fn resolve_identref_base(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    base_name: &str,
) -> Outcome {
    let base_id = {
        let m = registry.module(module);
        let Some(base_atom) = registry.interner.find(base_name) else {
            return Outcome::Pending;
        };
        let Some(&base_id) = m.identities_by_name.get(&base_atom) else {
            return Outcome::Pending;
        };
        base_id
    };

    let m = &mut registry.modules[module.index()];
    let ty = match m.node(node).data {
        NodeData::Leaf { ty, .. } | NodeData::LeafList { ty, .. } => ty,
        _ => {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::Internal,
                node_path(registry, module, node),
                "TypeIdentrefBase anchored on a non-leaf node",
            ));
        }
    };
    if let Type::Builtin(yang_schema::Builtin::Identityref { base }) = &mut m.types[ty] {
        base.push(base_id);
    }
    Outcome::Resolved
}

/// Resolution here means "every referenced feature name is known to
/// exist", not evaluating enablement — `Feature` carries no enabled
/// flag; that belongs to a consumer layered on top of this resolver.
fn resolve_if_feature(
    registry: &mut yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    expr_text: &str,
) -> Outcome {
    let ast = match yang_schema::parse_if_feature(expr_text) {
        Ok(ast) => ast,
        Err(_) => {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::Inval,
                node_path(registry, module, node),
                format!("malformed if-feature expression '{expr_text}'"),
            ));
        }
    };
    let m = registry.module(module);
    let interner = &registry.interner;
    let mut all_known = true;
    let mut check = |name: &str| -> Option<bool> {
        match interner.find(name) {
            Some(atom) if m.features_by_name.contains_key(&atom) => Some(true),
            _ => {
                all_known = false;
                None
            }
        }
    };
    let _ = ast.eval(&mut check);
    if all_known { Outcome::Resolved } else { Outcome::Pending }
}

fn resolve_type_derivation(registry: &mut yang_schema::ModuleRegistry, module: ModuleId, node: NodeId) -> Outcome {
    let m = &registry.modules[module.index()];
    let ty = match m.node(node).data {
        NodeData::Leaf { ty, .. } | NodeData::LeafList { ty, .. } => ty,
        _ => return Outcome::Resolved,
    };

    match merge_derivation_chain(m, ty, yang_common::limits::MAX_DERIVATION_DEPTH) {
        Ok(Some(merged)) => {
            let m = &mut registry.modules[module.index()];
            if let Type::Derived(d) = &mut m.types[ty] {
                d.range = Some(merged);
            }
            Outcome::Resolved
        }
        Ok(None) => Outcome::Resolved,
        Err(()) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noconstr,
            node_path(registry, module, node),
            "range restriction is not satisfiable against its base type",
        )),
    }
}

/// Walks `ty`'s derivation chain to its built-in ancestor, checking that
/// each level's own `range` (if any) is contained within the next
/// level's effective range. Returns the fully merged range for `ty`.
fn merge_derivation_chain(
    module: &yang_schema::Module,
    ty: yang_schema::TypeId,
    depth_budget: usize,
) -> Result<Option<IntervalSet>, ()> {
    if depth_budget == 0 {
        return Err(());
    }
    match module.ty(ty) {
        Type::Builtin(b) => Ok(builtin_range(b)),
        Type::Derived(d) => {
            let base_range = merge_derivation_chain(module, d.base, depth_budget - 1)?;
            match (&d.range, &base_range) {
                (Some(own), Some(base)) => {
                    let contained = own
                        .intervals
                        .iter()
                        .all(|&(lo, hi)| base.intervals.iter().any(|&(blo, bhi)| lo >= blo && hi <= bhi));
                    if contained { Ok(Some(own.clone())) } else { Err(()) }
                }
                (Some(own), None) => Ok(Some(own.clone())),
                (None, base) => Ok(base.clone()),
            }
        }
    }
}

fn builtin_range(builtin: &yang_schema::Builtin) -> Option<IntervalSet> {
    use yang_schema::Builtin::*;
    match builtin {
        Int8 { range } | Int16 { range } | Int32 { range } | Int64 { range } | Uint8 { range } | Uint16 { range }
        | Uint32 { range } | Uint64 { range } | Decimal64 { range, .. } => range.clone(),
        _ => None,
    }
}

fn uses_error_diagnostic(
    registry: &yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    err: UsesError,
) -> Diagnostic {
    let path = node_path(registry, module, node);
    match err {
        UsesError::GroupingPending => Diagnostic::error(ErrorCode::Inresolv, path, "grouping not yet resolved"),
        UsesError::RefineTarget(_) => Diagnostic::error(ErrorCode::Noresolv, path, "refine target not found"),
        UsesError::RefineIncompatible { field, kind } => {
            Diagnostic::error(ErrorCode::Inchildstmt, path, format!("refine '{field}' does not apply to a {kind:?}"))
        }
        UsesError::ConfigTrueUnderFalse => {
            Diagnostic::error(ErrorCode::KeyConfig, path, "config true under a config false ancestor")
        }
    }
}

fn augment_error_diagnostic(
    registry: &yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    err: AugmentError,
) -> Diagnostic {
    let path = node_path(registry, module, node);
    match err {
        AugmentError::TargetKindMismatch { target } => {
            Diagnostic::error(ErrorCode::Inchildstmt, path, format!("{target:?} cannot be augmented"))
        }
        AugmentError::ChildKindMismatch { target, child } => Diagnostic::error(
            ErrorCode::Inchildstmt,
            path,
            format!("a {child:?} cannot be augmented into a {target:?}"),
        ),
        AugmentError::MandatoryAcrossModules => {
            Diagnostic::error(ErrorCode::Inchildstmt, path, "mandatory node added across module boundary")
        }
        AugmentError::DuplicateIdentifier => Diagnostic::error(ErrorCode::Dupid, path, "duplicate identifier"),
    }
}

fn lookup_error_diagnostic(
    registry: &yang_schema::ModuleRegistry,
    module: ModuleId,
    node: NodeId,
    err: LookupError,
) -> Diagnostic {
    let path = node_path(registry, module, node);
    match err {
        LookupError::NotFound => Diagnostic::error(ErrorCode::Noresolv, path, "target not found"),
        LookupError::SyntaxError => Diagnostic::error(ErrorCode::PathInnode, path, "malformed nodeid"),
        LookupError::InnerListForbidden => {
            Diagnostic::error(ErrorCode::Nouniq, path, "path descends through a list before its final segment")
        }
    }
}

#[cfg(test)]
#[path = "tests/schema_driver.rs"]
mod tests;
