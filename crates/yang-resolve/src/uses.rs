//! `uses` expansion and refinement (§4.5). Grouping and `uses` site must
//! live in the same module: a copied leaf's `TypeId` keeps indexing into
//! its originating module's type arena (typedefs are shared, not
//! duplicated, per §4.5 "Expansion"), which only stays valid within one
//! module's arenas. Cross-module `uses` of an imported grouping is out of
//! scope for this reason (see `DESIGN.md`).

use rustc_hash::FxHashMap;
use yang_path::{SchemaNodeIdForm, parse_schema_nodeid};
use yang_schema::{ConfigFlag, LookupError, Module, NodeData, NodeId, NodeKind, RefineRecord, find_child_by_atom};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsesError {
    GroupingPending,
    RefineTarget(LookupError),
    RefineIncompatible { field: &'static str, kind: NodeKind },
    ConfigTrueUnderFalse,
}

/// Deep-copies `grouping`'s children under `parent` (or the module top
/// level, if `parent` is `None`), re-parenting pointers but keeping
/// `List::keys`/`unique` and `Choice::default_case` self-references
/// consistent via an old-id -> new-id remap.
pub fn expand_uses(module: &mut Module, parent: Option<NodeId>, grouping: NodeId) -> Vec<NodeId> {
    let source_children = module.children_of(Some(grouping)).to_vec();
    let mut remap = FxHashMap::default();
    let mut new_top = Vec::new();
    for child in source_children {
        new_top.push(copy_subtree(module, child, parent, &mut remap));
    }
    let new_ids: Vec<NodeId> = remap.values().copied().collect();
    for id in new_ids {
        remap_self_refs(module, id, &remap);
    }
    new_top
}

fn copy_subtree(
    module: &mut Module,
    src_id: NodeId,
    parent: Option<NodeId>,
    remap: &mut FxHashMap<NodeId, NodeId>,
) -> NodeId {
    let mut cloned = module.node(src_id).clone();
    let new_id = NodeId(module.nodes.len() as u32);
    cloned.id = new_id;
    cloned.parent = parent;
    let original_children = std::mem::take(&mut cloned.children);

    let inserted = module.nodes.insert(cloned);
    debug_assert_eq!(inserted, new_id);
    match parent {
        Some(p) => module.nodes[p].children.push(new_id),
        None => module.top_level.push(new_id),
    }
    remap.insert(src_id, new_id);

    for gc in original_children {
        copy_subtree(module, gc, Some(new_id), remap);
    }
    new_id
}

fn remap_self_refs(module: &mut Module, id: NodeId, remap: &FxHashMap<NodeId, NodeId>) {
    let node = module.node_mut(id);
    match &mut node.data {
        NodeData::List { keys, unique, .. } => {
            for key in keys.iter_mut() {
                if let Some(&new) = remap.get(key) {
                    *key = new;
                }
            }
            for set in unique.iter_mut() {
                for key in set.iter_mut() {
                    if let Some(&new) = remap.get(key) {
                        *key = new;
                    }
                }
            }
        }
        NodeData::Choice { default_case } => {
            if let Some(dc) = default_case {
                if let Some(&new) = remap.get(dc) {
                    *dc = new;
                }
            }
        }
        _ => {}
    }
}

/// Locates a descendant-nodeid target within a single module, with no
/// module-prefix support: a refine target always lives inside the `uses`
/// site's own (already same-module, see module doc) copied subtree.
fn resolve_local_descendant(
    module: &Module,
    interner: &yang_common::Interner,
    start: NodeId,
    text: &str,
) -> Result<NodeId, LookupError> {
    let (consumed, parsed) = parse_schema_nodeid(text).map_err(|_| LookupError::SyntaxError)?;
    if consumed as usize != text.len() {
        return Err(LookupError::SyntaxError);
    }
    if parsed.form == SchemaNodeIdForm::Slash {
        return Err(LookupError::SyntaxError);
    }
    let mut parent = Some(start);
    let mut last = None;
    for seg in &parsed.segments {
        if seg.prefix.is_some() {
            return Err(LookupError::NotFound);
        }
        let name_atom = interner.find(seg.name).ok_or(LookupError::NotFound)?;
        let child = find_child_by_atom(module, parent, name_atom).ok_or(LookupError::NotFound)?;
        parent = Some(child);
        last = Some(child);
    }
    last.ok_or(LookupError::SyntaxError)
}

/// Applies one refine record against a target located by descendant
/// nodeid within `uses_parent`'s children, per §4.5's compatibility
/// matrix and merge rules.
pub fn apply_refine(
    module: &mut Module,
    interner: &yang_common::Interner,
    uses_parent: NodeId,
    refine: &RefineRecord,
) -> Result<(), UsesError> {
    let target = resolve_local_descendant(module, interner, uses_parent, &refine.target)
        .map_err(UsesError::RefineTarget)?;

    let kind = module.node(target).kind();
    check_refine_compat(kind, refine)?;

    // description/reference are accepted syntactically but have nowhere
    // to land: `SchemaNode` carries no documentation-string field.

    {
        let node = module.node_mut(target);
        if let Some(config) = refine.config {
            node.config = ConfigFlag::Explicit(config);
        }
        if let Some(mandatory) = refine.mandatory {
            node.mandatory = mandatory;
        }
        if let NodeData::Container { presence } = &mut node.data {
            if let Some(new_presence) = &refine.presence {
                *presence = Some(new_presence.clone());
            }
        }
        match &mut node.data {
            NodeData::List { min_elements, max_elements, .. }
            | NodeData::LeafList { min_elements, max_elements, .. } => {
                if let Some(min) = refine.min_elements {
                    *min_elements = min;
                }
                if let Some(max) = refine.max_elements {
                    *max_elements = Some(max);
                }
            }
            _ => {}
        }
        node.must.extend(refine.must.iter().cloned());
        match &mut node.data {
            NodeData::Leaf { default, .. } => {
                if let Some(&d) = refine.default.first() {
                    *default = Some(d);
                }
            }
            NodeData::LeafList { defaults, .. } => {
                defaults.extend(refine.default.iter().copied());
            }
            _ => {}
        }
    }

    if module.node(target).kind() == NodeKind::Choice {
        if let Some(&d) = refine.default.first() {
            let resolved = module
                .children_of(Some(target))
                .iter()
                .copied()
                .find(|&c| module.node(c).name == d);
            if let NodeData::Choice { default_case } = &mut module.node_mut(target).data {
                *default_case = resolved;
            }
        }
    }

    if refine.config.is_some() {
        let effective = module.node(target).config.effective(parent_config_effective(module, target));
        check_config_validity(module, target, effective)?;
    }

    Ok(())
}

fn parent_config_effective(module: &Module, node: NodeId) -> bool {
    match module.node(node).parent {
        Some(parent) => {
            let parent_node = module.node(parent);
            parent_node.config.effective(parent_config_effective(module, parent))
        }
        None => true,
    }
}

fn check_config_validity(module: &Module, node: NodeId, ancestor_effective: bool) -> Result<(), UsesError> {
    let data = module.node(node);
    let effective = data.config.effective(ancestor_effective);
    if !ancestor_effective && data.config.is_explicit() && effective {
        return Err(UsesError::ConfigTrueUnderFalse);
    }
    for &child in &data.children {
        check_config_validity(module, child, effective)?;
    }
    Ok(())
}

fn check_refine_compat(kind: NodeKind, refine: &RefineRecord) -> Result<(), UsesError> {
    let is_data = kind.is_data_definition();
    if refine.config.is_some() && !(is_data && kind != NodeKind::Anyxml) {
        return Err(UsesError::RefineIncompatible { field: "config", kind });
    }
    if refine.mandatory.is_some()
        && !matches!(kind, NodeKind::Leaf | NodeKind::Anyxml | NodeKind::Anydata | NodeKind::Choice)
    {
        return Err(UsesError::RefineIncompatible { field: "mandatory", kind });
    }
    if refine.presence.is_some() && kind != NodeKind::Container {
        return Err(UsesError::RefineIncompatible { field: "presence", kind });
    }
    if (refine.min_elements.is_some() || refine.max_elements.is_some())
        && !matches!(kind, NodeKind::List | NodeKind::LeafList)
    {
        return Err(UsesError::RefineIncompatible { field: "min/max-elements", kind });
    }
    if !refine.must.is_empty()
        && !matches!(
            kind,
            NodeKind::Leaf | NodeKind::LeafList | NodeKind::List | NodeKind::Container | NodeKind::Anyxml
        )
    {
        return Err(UsesError::RefineIncompatible { field: "must", kind });
    }
    if !refine.default.is_empty() && !matches!(kind, NodeKind::Leaf | NodeKind::LeafList | NodeKind::Choice) {
        return Err(UsesError::RefineIncompatible { field: "default", kind });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/uses.rs"]
mod tests;
