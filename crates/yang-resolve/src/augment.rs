//! Augment splicing (§4.6). Target resolution (absolute for a top-level
//! augment, descendant for a uses-augment) is handled by
//! `yang_schema::resolve_augment_nodeid`; this module only performs the
//! splice once a target `NodeId` is known.
//!
//! `AugmentRecord::children` are `NodeId`s already constructed in the
//! *target* module's own arena — the schema-construction phase that
//! precedes resolution places an augment's child nodes directly in the
//! module that owns the eventual target, the same way it places any
//! other node. This resolver only re-parents pointers; it never copies a
//! node across module arenas (a `TypeId` is only valid within the arena
//! that produced it, so a cross-arena copy would silently corrupt leaf
//! types — see `uses`'s doc comment for the same constraint).

use yang_schema::{Module, NodeData, NodeId, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AugmentError {
    TargetKindMismatch { target: NodeKind },
    ChildKindMismatch { target: NodeKind, child: NodeKind },
    MandatoryAcrossModules,
    DuplicateIdentifier,
}

/// Splices `children` onto `target` within `module`, per the compatibility
/// matrix: a `choice` target accepts only `case`-kind children; a
/// container/list/notification/input/output/case target accepts ordinary
/// data-definition children. `augmenting_module` is the module that owns
/// the augment statement, used only to detect (and reject) a
/// cross-module mandatory addition.
pub fn apply_augment(
    module: &mut Module,
    target: NodeId,
    augmenting_module: yang_schema::ModuleId,
    children: &[NodeId],
) -> Result<(), AugmentError> {
    let target_kind = module.node(target).kind();
    let accepts_case_only = target_kind == NodeKind::Choice;
    let accepts_data = matches!(
        target_kind,
        NodeKind::Container
            | NodeKind::List
            | NodeKind::Notification
            | NodeKind::Input
            | NodeKind::Output
            | NodeKind::Case
    );
    if !accepts_case_only && !accepts_data {
        return Err(AugmentError::TargetKindMismatch { target: target_kind });
    }

    for &child in children {
        let child_kind = module.node(child).kind();
        let ok = if accepts_case_only {
            child_kind == NodeKind::Case
        } else {
            child_kind.is_data_definition()
        };
        if !ok {
            return Err(AugmentError::ChildKindMismatch { target: target_kind, child: child_kind });
        }
    }

    if augmenting_module != module.id
        && children.iter().any(|&c| subtree_adds_mandatory(module, c))
    {
        return Err(AugmentError::MandatoryAcrossModules);
    }

    let existing: Vec<yang_common::Atom> =
        module.children_of(Some(target)).iter().map(|&c| module.node(c).name).collect();
    let mut seen = existing;
    for &child in children {
        let name = module.node(child).name;
        if seen.contains(&name) {
            return Err(AugmentError::DuplicateIdentifier);
        }
        seen.push(name);
    }

    for &child in children {
        module.node_mut(child).parent = Some(target);
        module.node_mut(target).children.push(child);
    }

    Ok(())
}

/// Whether splicing `node` in would add a node a remote implementation
/// must instantiate: `node` itself is mandatory, or (for a non-presence
/// container) one of its descendants is.
fn subtree_adds_mandatory(module: &Module, node: NodeId) -> bool {
    let n = module.node(node);
    if n.mandatory {
        return true;
    }
    match &n.data {
        NodeData::Container { presence: None } => {
            n.children.iter().any(|&c| subtree_adds_mandatory(module, c))
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/augment.rs"]
mod tests;
