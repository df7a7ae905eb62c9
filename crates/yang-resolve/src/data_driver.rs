//! The data-time fixpoint driver (§4.4 Phase 1 / Phase 2, §9).
//!
//! Phase 1 resolves `WHEN_EVAL` to fixpoint: a false `when` deletes its
//! node's subtree (cascading to anything anchored inside it, which
//! resolves vacuously without evaluation), which can in turn make a
//! sibling's own `when` newly evaluable against the now-pruned tree.
//! Phase 2 then resolves everything else against the settled tree.
//!
//! `InstanceId`/`Leafref` item `context` carries `"<0|1> <path-text>"` —
//! the leading flag is `require-instance`, absent from [`DataItem`]'s
//! single `String` field otherwise.

use yang_common::{Diagnostic, DiagnosticSink, ErrorCode, ResolveFlags};
use yang_schema::{ModuleContext, NodeData};

use crate::error::ResolveError;
use crate::instance::{InstanceId, InstanceTree};
use crate::item::{DataItem, DataItemKind, WhenState};
use crate::leafref::{self, LeafrefError};
use crate::report::ResolveReport;
use crate::worklist::Worklist;
use crate::xpath::{XPathKind, XPathScheduler};

pub fn resolve_unres_data(
    tree: &mut InstanceTree,
    ctx: &dyn ModuleContext,
    worklist: &mut Worklist<DataItem>,
    scheduler: &mut dyn XPathScheduler,
    flags: ResolveFlags,
    sink: &mut DiagnosticSink,
) -> Result<ResolveReport, ResolveError> {
    debug_assert!(flags.is_valid(), "RPC_INPUT and RPC_OUTPUT are mutually exclusive");
    let mut report = ResolveReport::default();

    loop {
        let resolved_before = report.data_items_resolved;
        run_phase(tree, ctx, worklist, scheduler, flags, sink, &mut report, DataItemKind::is_phase_one);
        report.rounds.push("phase-1");
        if report.data_items_resolved == resolved_before {
            break;
        }
    }

    run_phase(tree, ctx, worklist, scheduler, flags, sink, &mut report, |k| !k.is_phase_one());
    report.rounds.push("phase-2");

    if !worklist.all_resolved() {
        return Err(ResolveError::NoProgress { worklist: "data" });
    }
    Ok(report)
}

fn run_phase(
    tree: &mut InstanceTree,
    ctx: &dyn ModuleContext,
    worklist: &mut Worklist<DataItem>,
    scheduler: &mut dyn XPathScheduler,
    flags: ResolveFlags,
    sink: &mut DiagnosticSink,
    report: &mut ResolveReport,
    filter: impl Fn(DataItemKind) -> bool,
) {
    let snapshot: Vec<(usize, DataItemKind, InstanceId, String)> = worklist
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_resolved() && filter(item.kind))
        .map(|(i, item)| (i, item.kind, item.node, item.context.clone()))
        .collect();

    let mut done = Vec::new();
    for (index, kind, node, context) in snapshot {
        if tree.is_in_deleted_subtree(node) {
            done.push(index);
            continue;
        }
        match dispatch_one(tree, ctx, scheduler, flags, kind, node, &context) {
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
            report.data_items_resolved += 1;
        }
    }
}

enum Outcome {
    Resolved,
    Pending,
    Failed(Diagnostic),
}

fn instance_path(tree: &InstanceTree, ctx: &dyn ModuleContext, id: InstanceId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(node_id) = current {
        let node = tree.node(node_id);
        let schema = ctx.module(node.schema_module).node(node.schema);
        segments.push(ctx.interner().resolve(schema.name).to_string());
        current = node.parent;
    }
    segments.reverse();
    format!("/{}", segments.join("/"))
}

fn dispatch_one(
    tree: &mut InstanceTree,
    ctx: &dyn ModuleContext,
    scheduler: &mut dyn XPathScheduler,
    flags: ResolveFlags,
    kind: DataItemKind,
    node: InstanceId,
    context: &str,
) -> Outcome {
    match kind {
        DataItemKind::WhenEval => resolve_when(tree, ctx, scheduler, flags, node, context),
        DataItemKind::MustEval => resolve_must(tree, ctx, scheduler, node, context),
        DataItemKind::Leafref => resolve_leafref(tree, ctx, node, context),
        DataItemKind::InstanceId => resolve_instance_id(tree, ctx, node, context),
        DataItemKind::EmptyNpContainerPrune => resolve_empty_container(tree, ctx, flags, node),
    }
}

fn resolve_when(
    tree: &mut InstanceTree,
    ctx: &dyn ModuleContext,
    scheduler: &mut dyn XPathScheduler,
    flags: ResolveFlags,
    node: InstanceId,
    expr: &str,
) -> Outcome {
    match scheduler.evaluate(node, expr, XPathKind::When) {
        None => Outcome::Pending,
        Some(true) => {
            tree.node_mut(node).when_state = WhenState::True;
            Outcome::Resolved
        }
        Some(false) => {
            tree.node_mut(node).when_state = WhenState::False;
            if flags.contains(ResolveFlags::NO_AUTO_DEL) {
                return Outcome::Failed(Diagnostic::error(
                    ErrorCode::Nowhen,
                    instance_path(tree, ctx, node),
                    "when evaluated false and auto-delete is disabled",
                ));
            }
            tree.delete_subtree(node);
            Outcome::Resolved
        }
    }
}

fn resolve_must(
    tree: &InstanceTree,
    ctx: &dyn ModuleContext,
    scheduler: &mut dyn XPathScheduler,
    node: InstanceId,
    expr: &str,
) -> Outcome {
    match scheduler.evaluate(node, expr, XPathKind::Must) {
        None => Outcome::Pending,
        Some(true) => Outcome::Resolved,
        Some(false) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Nomust,
            instance_path(tree, ctx, node),
            format!("must condition '{expr}' is false"),
        )),
    }
}

fn split_flagged_context(context: &str) -> (bool, &str) {
    match context.split_once(' ') {
        Some(("1", rest)) => (true, rest),
        Some((_, rest)) => (false, rest),
        None => (false, context),
    }
}

fn resolve_leafref(tree: &InstanceTree, ctx: &dyn ModuleContext, node: InstanceId, context: &str) -> Outcome {
    let (require_instance, path_text) = split_flagged_context(context);
    let leaf_value = match &tree.node(node).value_str {
        Some(v) => v.clone(),
        None => {
            return Outcome::Failed(Diagnostic::error(
                ErrorCode::Internal,
                instance_path(tree, ctx, node),
                "leafref item anchored on a node with no value",
            ));
        }
    };
    match leafref::resolve_data_leafref(tree, ctx, node, &leaf_value, path_text) {
        Ok(true) => Outcome::Resolved,
        Ok(false) if require_instance => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noreqins,
            instance_path(tree, ctx, node),
            format!("leafref value '{leaf_value}' has no matching instance"),
        )),
        Ok(false) => Outcome::Resolved,
        Err(LeafrefError::Syntax) => Outcome::Failed(Diagnostic::error(
            ErrorCode::PathInnode,
            instance_path(tree, ctx, node),
            "malformed leafref path",
        )),
        Err(_) => Outcome::Resolved,
    }
}

fn resolve_instance_id(tree: &InstanceTree, ctx: &dyn ModuleContext, node: InstanceId, context: &str) -> Outcome {
    let (require_instance, path_text) = split_flagged_context(context);
    match leafref::resolve_instance_identifier(tree, ctx, path_text, require_instance) {
        Ok(_) => Outcome::Resolved,
        Err(LeafrefError::NotFound) => Outcome::Failed(Diagnostic::error(
            ErrorCode::Noreqins,
            instance_path(tree, ctx, node),
            format!("instance-identifier '{path_text}' has no matching instance"),
        )),
        Err(_) => Outcome::Failed(Diagnostic::error(
            ErrorCode::PathInnode,
            instance_path(tree, ctx, node),
            "malformed instance-identifier",
        )),
    }
}

fn resolve_empty_container(
    tree: &mut InstanceTree,
    ctx: &dyn ModuleContext,
    flags: ResolveFlags,
    node: InstanceId,
) -> Outcome {
    if flags.contains(ResolveFlags::KEEP_EMPTY_CONTAINERS) {
        return Outcome::Resolved;
    }
    let schema_node = tree.node(node).schema;
    let schema_module = tree.node(node).schema_module;
    let is_non_presence = matches!(
        ctx.module(schema_module).node(schema_node).data,
        NodeData::Container { presence: None }
    );
    if is_non_presence && tree.children_of(Some(node)).is_empty() {
        tree.delete_subtree(node);
    }
    Outcome::Resolved
}

#[cfg(test)]
#[path = "tests/data_driver.rs"]
mod tests;
