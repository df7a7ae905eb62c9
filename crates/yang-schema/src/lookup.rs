//! Schema-tree lookup: resolves textual node-ids against an
//! already-constructed (possibly still-unresolved-elsewhere) schema tree.

use bitflags::bitflags;
use yang_path::{SchemaNodeIdForm, parse_node_identifier, parse_schema_nodeid};

use crate::context::ModuleContext;
use crate::ids::{ModuleId, NodeId};
use crate::module::Module;
use crate::node::{NodeData, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupError {
    NotFound,
    SyntaxError,
    InnerListForbidden,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AcceptedNodeKinds: u32 {
        const CONTAINER    = 1 << 0;
        const LEAF         = 1 << 1;
        const LEAF_LIST    = 1 << 2;
        const LIST         = 1 << 3;
        const CHOICE       = 1 << 4;
        const CASE         = 1 << 5;
        const ANYDATA      = 1 << 6;
        const ANYXML       = 1 << 7;
        const USES         = 1 << 8;
        const AUGMENT      = 1 << 9;
        const GROUPING     = 1 << 10;
        const RPC          = 1 << 11;
        const ACTION       = 1 << 12;
        const INPUT        = 1 << 13;
        const OUTPUT       = 1 << 14;
        const NOTIFICATION = 1 << 15;
    }
}

impl AcceptedNodeKinds {
    pub const DATA_DEFINITION: Self = Self::CONTAINER
        .union(Self::LEAF)
        .union(Self::LEAF_LIST)
        .union(Self::LIST)
        .union(Self::CHOICE)
        .union(Self::ANYDATA)
        .union(Self::ANYXML)
        .union(Self::USES);

    pub const fn from_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Container => Self::CONTAINER,
            NodeKind::Leaf => Self::LEAF,
            NodeKind::LeafList => Self::LEAF_LIST,
            NodeKind::List => Self::LIST,
            NodeKind::Choice => Self::CHOICE,
            NodeKind::Case => Self::CASE,
            NodeKind::Anydata => Self::ANYDATA,
            NodeKind::Anyxml => Self::ANYXML,
            NodeKind::Uses => Self::USES,
            NodeKind::Augment => Self::AUGMENT,
            NodeKind::Grouping => Self::GROUPING,
            NodeKind::Rpc => Self::RPC,
            NodeKind::Action => Self::ACTION,
            NodeKind::Input => Self::INPUT,
            NodeKind::Output => Self::OUTPUT,
            NodeKind::Notification => Self::NOTIFICATION,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DescendantOptions {
    /// Used by `resolve-unique`: rejects a path that descends through a
    /// `list` node before reaching its final segment.
    pub forbid_inner_list: bool,
}

/// Finds the child of `parent` (or a top-level node, if `parent` is
/// `None`) matching `name`, honoring the shorthand-case rule: a `choice`
/// child given directly (no explicit `case` wrapper) is matched by the
/// name of the *wrapped data node*, transparently, while an explicit case
/// is matched by its own name.
pub fn find_child_by_atom(module: &Module, parent: Option<NodeId>, name: yang_common::Atom) -> Option<NodeId> {
    for &child in module.children_of(parent) {
        let node = module.node(child);
        if node.kind() == NodeKind::Case {
            if let NodeData::Case { synthetic } = node.data {
                if synthetic {
                    for &grandchild in &node.children {
                        if module.node(grandchild).name == name {
                            return Some(grandchild);
                        }
                    }
                    continue;
                }
            }
        }
        if node.name == name {
            return Some(child);
        }
    }
    None
}

/// Resolves an absolute `schema-nodeid` (`/mod:a/b/c`) starting from
/// `start_module`.
pub fn resolve_absolute_nodeid(
    ctx: &dyn ModuleContext,
    start_module: ModuleId,
    text: &str,
    accepted: AcceptedNodeKinds,
) -> Result<NodeId, LookupError> {
    let (consumed, parsed) =
        parse_schema_nodeid(text).map_err(|_| LookupError::SyntaxError)?;
    if consumed as usize != text.len() {
        return Err(LookupError::SyntaxError);
    }
    if parsed.form != SchemaNodeIdForm::Slash {
        return Err(LookupError::SyntaxError);
    }
    walk_segments(
        ctx,
        start_module,
        None,
        &parsed.segments,
        accepted,
        DescendantOptions::default(),
    )
}

/// Resolves a descendant `schema-nodeid` (`a/b/c` or `./a/b/c`) starting
/// from `start` within `start_module`.
pub fn resolve_descendant_nodeid(
    ctx: &dyn ModuleContext,
    start_module: ModuleId,
    start: NodeId,
    text: &str,
    accepted: AcceptedNodeKinds,
    options: DescendantOptions,
) -> Result<NodeId, LookupError> {
    let (consumed, parsed) =
        parse_schema_nodeid(text).map_err(|_| LookupError::SyntaxError)?;
    if consumed as usize != text.len() {
        return Err(LookupError::SyntaxError);
    }
    walk_segments(ctx, start_module, Some(start), &parsed.segments, accepted, options)
}

fn walk_segments(
    ctx: &dyn ModuleContext,
    start_module: ModuleId,
    start_parent: Option<NodeId>,
    segments: &[yang_path::NodeIdentifier<'_>],
    accepted: AcceptedNodeKinds,
    options: DescendantOptions,
) -> Result<NodeId, LookupError> {
    let mut current_module = start_module;
    let mut parent = start_parent;
    let mut last = None;

    for (i, seg) in segments.iter().enumerate() {
        let seg_module = match seg.prefix {
            Some(prefix) => ctx
                .resolve_prefix(current_module, prefix)
                .ok_or(LookupError::NotFound)?,
            None => current_module,
        };
        // A module switch mid-path re-roots the walk at that module's
        // top level: a `NodeId` is only ever valid within the arena of
        // the module that produced it.
        if seg_module != current_module {
            parent = None;
        }
        current_module = seg_module;

        let module = ctx.module(current_module);
        let name_atom = ctx.interner().find(seg.name).ok_or(LookupError::NotFound)?;
        let child = find_child_by_atom(module, parent, name_atom).ok_or(LookupError::NotFound)?;

        let is_last = i + 1 == segments.len();
        if options.forbid_inner_list && !is_last && module.node(child).kind() == NodeKind::List {
            return Err(LookupError::InnerListForbidden);
        }

        parent = Some(child);
        last = Some(child);
    }

    let result = last.ok_or(LookupError::SyntaxError)?;
    let node = ctx.module(current_module).node(result);
    if !accepted.contains(AcceptedNodeKinds::from_kind(node.kind())) {
        return Err(LookupError::NotFound);
    }
    Ok(result)
}

/// Where an augment's target-resolution walk begins: module top level for
/// a top-level augment, or a `uses` site's expanded children for a
/// uses-augment.
#[derive(Clone, Copy, Debug)]
pub enum AugmentStart {
    TopLevel(ModuleId),
    UsesSite(ModuleId, NodeId),
}

pub fn resolve_augment_nodeid(
    ctx: &dyn ModuleContext,
    text: &str,
    start: AugmentStart,
) -> Result<NodeId, LookupError> {
    match start {
        AugmentStart::TopLevel(module) => {
            resolve_absolute_nodeid(ctx, module, text, AcceptedNodeKinds::all())
        }
        AugmentStart::UsesSite(module, node) => resolve_descendant_nodeid(
            ctx,
            module,
            node,
            text,
            AcceptedNodeKinds::all(),
            DescendantOptions::default(),
        ),
    }
}

/// Resolves a `uses` target grouping by lexical scoping: walk outward
/// through enclosing scopes (the statement containing the `uses`, then
/// its parent, and so on up to the module top level), returning the
/// first matching `grouping` found at any level. An explicit module
/// prefix skips the lexical walk and looks only at that module's top
/// level.
pub fn resolve_uses_grouping(
    ctx: &dyn ModuleContext,
    module_id: ModuleId,
    enclosing: Option<NodeId>,
    text: &str,
) -> Result<NodeId, LookupError> {
    let (consumed, ident) = parse_node_identifier(text).map_err(|_| LookupError::SyntaxError)?;
    if consumed as usize != text.len() {
        return Err(LookupError::SyntaxError);
    }

    if let Some(prefix) = ident.prefix {
        let target_module = ctx
            .resolve_prefix(module_id, prefix)
            .ok_or(LookupError::NotFound)?;
        let module = ctx.module(target_module);
        let name_atom = ctx.interner().find(ident.name).ok_or(LookupError::NotFound)?;
        return find_grouping_at(module, None, name_atom).ok_or(LookupError::NotFound);
    }

    let module = ctx.module(module_id);
    let name_atom = ctx.interner().find(ident.name).ok_or(LookupError::NotFound)?;

    let mut scope = enclosing;
    loop {
        if let Some(found) = find_grouping_at(module, scope, name_atom) {
            return Ok(found);
        }
        match scope {
            Some(node) => scope = module.node(node).parent,
            None => return Err(LookupError::NotFound),
        }
    }
}

fn find_grouping_at(module: &Module, scope: Option<NodeId>, name: yang_common::Atom) -> Option<NodeId> {
    module
        .children_of(scope)
        .iter()
        .copied()
        .find(|&id| module.node(id).kind() == NodeKind::Grouping && module.node(id).name == name)
}

/// JSON-encoded schema node-id resolution (module names instead of
/// prefixes at every segment, per RFC 7951's instance-identifier
/// encoding extended to schema nodeids for NMDA/YANG-library use).
pub fn resolve_json_schema_nodeid(
    ctx: &dyn ModuleContext,
    start_module: ModuleId,
    start: Option<NodeId>,
    text: &str,
    accepted: AcceptedNodeKinds,
) -> Result<NodeId, LookupError> {
    let (consumed, parsed) =
        parse_schema_nodeid(text).map_err(|_| LookupError::SyntaxError)?;
    if consumed as usize != text.len() {
        return Err(LookupError::SyntaxError);
    }
    walk_segments(
        ctx,
        start_module,
        start,
        &parsed.segments,
        accepted,
        DescendantOptions::default(),
    )
}

/// Resolves a `choice`'s default case by name, accepting either the
/// case's own name or (for a shorthand case) the name of the data node it
/// wraps.
pub fn resolve_choice_default(
    module: &Module,
    interner: &yang_common::Interner,
    choice: NodeId,
    text: &str,
) -> Result<NodeId, LookupError> {
    let name_atom = interner.find(text).ok_or(LookupError::NotFound)?;
    find_child_by_atom(module, Some(choice), name_atom).ok_or(LookupError::NotFound)
}

#[cfg(test)]
#[path = "tests/lookup.rs"]
mod tests;
