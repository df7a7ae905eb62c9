//! Schema-time and data-time `leafref` resolution (§4.7), plus data-time
//! `instance-identifier` resolution.

use yang_path::{PathArg, parse_instance_identifier, parse_path_arg};
use yang_schema::{ModuleContext, ModuleId, NodeId, NodeKind, find_child_by_atom};

use crate::instance::{InstanceId, InstanceTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafrefError {
    Syntax,
    NotFound,
    NotLeaf,
    StatusIncompatible,
}

/// Walks a `leafref`'s `path-arg` from `leaf`'s schema position to its
/// target, per §4.7 "Schema-time leafref". Predicate key leaves are
/// checked for existence on the candidate list but the remote/local
/// base-type cross-check is left to the caller (it needs the fully
/// resolved types of both sides, which only exist after `TYPE_DERIVATION`
/// has run on both).
pub fn resolve_schema_leafref(
    ctx: &dyn ModuleContext,
    module: ModuleId,
    leaf: NodeId,
    path_text: &str,
) -> Result<NodeId, LeafrefError> {
    let (consumed, parsed) = parse_path_arg(path_text).map_err(|_| LeafrefError::Syntax)?;
    if consumed as usize != path_text.len() {
        return Err(LeafrefError::Syntax);
    }

    let mut current_module = module;
    let mut current_parent = start_parent(ctx, module, leaf, &parsed)?;

    let mut last = None;
    for segment in &parsed.segments {
        let seg_module = match segment.node.prefix {
            Some(prefix) => ctx
                .resolve_prefix(current_module, prefix)
                .ok_or(LeafrefError::NotFound)?,
            None => current_module,
        };
        if seg_module != current_module {
            current_parent = None;
        }
        current_module = seg_module;

        let mod_ref = ctx.module(current_module);
        let name_atom = ctx
            .interner()
            .find(segment.node.name)
            .ok_or(LeafrefError::NotFound)?;
        let child = find_child_by_atom(mod_ref, current_parent, name_atom)
            .ok_or(LeafrefError::NotFound)?;

        for predicate in &segment.predicates {
            let key_atom = ctx
                .interner()
                .find(predicate.key.name)
                .ok_or(LeafrefError::NotFound)?;
            if find_child_by_atom(ctx.module(current_module), Some(child), key_atom).is_none() {
                return Err(LeafrefError::NotFound);
            }
        }

        current_parent = Some(child);
        last = Some(child);
    }

    let target = last.ok_or(LeafrefError::Syntax)?;
    let target_module = ctx.module(current_module);
    let target_node = target_module.node(target);
    if !matches!(target_node.kind(), NodeKind::Leaf | NodeKind::LeafList) {
        return Err(LeafrefError::NotLeaf);
    }

    let leaf_status = ctx.module(module).node(leaf).status;
    if !leaf_status.may_reference(target_node.status) {
        return Err(LeafrefError::StatusIncompatible);
    }

    Ok(target)
}

/// `current()` for a schema-time leafref is the leaf's own schema
/// position; each `..` hops to its parent. Landing on `None` means the
/// first segment is looked up at the module top level.
fn start_parent(
    ctx: &dyn ModuleContext,
    module: ModuleId,
    leaf: NodeId,
    parsed: &PathArg<'_>,
) -> Result<Option<NodeId>, LeafrefError> {
    if parsed.is_absolute {
        return Ok(None);
    }
    let mut cursor = Some(leaf);
    for _ in 0..parsed.up_levels {
        let id = cursor.ok_or(LeafrefError::NotFound)?;
        cursor = ctx.module(module).node(id).parent;
    }
    Ok(cursor)
}

/// Re-walks a `leafref`'s path over already-parsed instance data,
/// per §4.7 "Data-time leafref". Returns whether at least one candidate
/// instance has `value_str` equal to `leaf_value`.
pub fn resolve_data_leafref(
    tree: &InstanceTree,
    ctx: &dyn ModuleContext,
    start: InstanceId,
    leaf_value: &str,
    path_text: &str,
) -> Result<bool, LeafrefError> {
    let (consumed, parsed) = parse_path_arg(path_text).map_err(|_| LeafrefError::Syntax)?;
    if consumed as usize != path_text.len() {
        return Err(LeafrefError::Syntax);
    }

    let mut cursors = vec![data_start(tree, start, &parsed)?];

    for segment in &parsed.segments {
        let mut next = Vec::new();
        for &cursor in &cursors {
            for child in tree.children_of(cursor) {
                if !instance_matches_name(tree, ctx, child, segment.node.name) {
                    continue;
                }
                if segment
                    .predicates
                    .iter()
                    .all(|p| predicate_holds(tree, ctx, child, p))
                {
                    next.push(child);
                }
            }
        }
        cursors = next.into_iter().map(Some).collect();
    }

    Ok(cursors
        .into_iter()
        .flatten()
        .any(|id| tree.node(id).value_str.as_deref() == Some(leaf_value)))
}

/// `current()` is `start`'s own instance; each `..` hops to its parent.
/// `None` means the first segment is matched against the data roots.
fn data_start(
    tree: &InstanceTree,
    start: InstanceId,
    parsed: &PathArg<'_>,
) -> Result<Option<InstanceId>, LeafrefError> {
    if parsed.is_absolute {
        return Ok(None);
    }
    let mut cursor = Some(start);
    for _ in 0..parsed.up_levels {
        let id = cursor.ok_or(LeafrefError::NotFound)?;
        cursor = tree.node(id).parent;
    }
    Ok(cursor)
}

fn instance_matches_name(tree: &InstanceTree, ctx: &dyn ModuleContext, id: InstanceId, name: &str) -> bool {
    let node = tree.node(id);
    let schema_name = ctx.module(node.schema_module).node(node.schema).name;
    ctx.interner().resolve(schema_name) == name
}

/// Evaluates a `path-predicate` by walking `path-key-expr` from the
/// candidate entry (`current()`) and comparing the reached leaf's value
/// to the local key leaf's value.
fn predicate_holds(
    tree: &InstanceTree,
    ctx: &dyn ModuleContext,
    candidate: InstanceId,
    predicate: &yang_path::PathPredicate<'_>,
) -> bool {
    let Some(local_key) = tree
        .children_of(Some(candidate))
        .into_iter()
        .find(|&c| instance_matches_name(tree, ctx, c, predicate.key.name))
    else {
        return false;
    };

    let mut remote = candidate;
    for _ in 0..predicate.expr.up_levels {
        match tree.node(remote).parent {
            Some(p) => remote = p,
            None => return false,
        }
    }
    for segment in &predicate.expr.segments {
        let Some(next) = tree
            .children_of(Some(remote))
            .into_iter()
            .find(|&c| instance_matches_name(tree, ctx, c, segment.name))
        else {
            return false;
        };
        remote = next;
    }

    tree.node(local_key).value_str == tree.node(remote).value_str
}

/// Resolves an absolute instance-identifier from the data root, per
/// §4.7 "Instance-identifier (data-time)". Predicates are equality on a
/// key/leaf-list value or a 1-based positional index; every segment's
/// module prefix is mandatory.
pub fn resolve_instance_identifier(
    tree: &InstanceTree,
    ctx: &dyn ModuleContext,
    text: &str,
    require_instance: bool,
) -> Result<Option<InstanceId>, LeafrefError> {
    let (consumed, parsed) = parse_instance_identifier(text).map_err(|_| LeafrefError::Syntax)?;
    if consumed as usize != text.len() {
        return Err(LeafrefError::Syntax);
    }

    let mut cursors: Vec<Option<InstanceId>> = vec![None];
    for segment in &parsed.segments {
        if segment.node.prefix.is_none() {
            return Err(LeafrefError::Syntax);
        }
        let mut next = Vec::new();
        for &cursor in &cursors {
            for child in tree.children_of(cursor) {
                if instance_matches_name(tree, ctx, child, segment.node.name) {
                    next.push(child);
                }
            }
        }
        let filtered = filter_by_predicates(tree, ctx, next, &segment.predicates);
        cursors = filtered.into_iter().map(Some).collect();
    }

    let candidates: Vec<InstanceId> = cursors.into_iter().flatten().collect();
    match candidates.len() {
        0 if require_instance => Err(LeafrefError::NotFound),
        0 => Ok(None),
        1 => Ok(Some(candidates[0])),
        _ => Err(LeafrefError::NotFound),
    }
}

fn filter_by_predicates(
    tree: &InstanceTree,
    ctx: &dyn ModuleContext,
    candidates: Vec<InstanceId>,
    predicates: &[yang_path::Predicate<'_>],
) -> Vec<InstanceId> {
    if predicates.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .enumerate()
        .filter(|(index, candidate)| {
            predicates.iter().all(|p| match p {
                yang_path::Predicate::KeyEquals { key, value } => tree
                    .children_of(Some(*candidate))
                    .into_iter()
                    .find(|&c| instance_matches_name(tree, ctx, c, key.name))
                    .is_some_and(|c| tree.node(c).value_str.as_deref() == Some(value.as_str())),
                yang_path::Predicate::CurrentEquals { value } => {
                    tree.node(*candidate).value_str.as_deref() == Some(value.as_str())
                }
                yang_path::Predicate::Position(pos) => *pos == (*index as u64) + 1,
            })
        })
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
#[path = "tests/leafref.rs"]
mod tests;
