//! Deviation application (§4.6). Deviates within one `DeviationRecord`
//! apply in declaration order against the same target; `not-supported`
//! must be the only deviate on that target.
//!
//! `units` is accepted syntactically (`DeviateRecord::units`) but has
//! nowhere to land: like `RefineRecord::description`/`reference` (see
//! `uses.rs`), `SchemaNode` carries no `units` field, since nothing in
//! forward-reference resolution reads it back.

use yang_schema::{ConfigFlag, DeviateMode, DeviateRecord, Module, NodeData, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviationError {
    /// A deviate followed a `not-supported` deviate on the same target.
    TargetAlreadyRemoved,
    /// `add` tried to set an attribute that was already present.
    AlreadySet { field: &'static str },
    /// `delete` named a `must`/`unique`/`default` value not present on
    /// the target, or not matching exactly.
    NotPresent { field: &'static str },
    /// `replace` named an attribute the target does not currently carry.
    NothingToReplace { field: &'static str },
    /// A deviate field does not apply to the target's node kind.
    Inapplicable { field: &'static str },
}

/// Applies every deviate in `record` to `target` in order. Returns
/// whether the target's type or default changed, in which case the
/// caller should re-enqueue a `TYPE_DEFAULT_CHECK` item for `target` (the
/// default must be re-validated against the possibly-replaced type).
pub fn apply_deviation(
    module: &mut Module,
    target: NodeId,
    record: &[DeviateRecord],
) -> Result<bool, DeviationError> {
    module.deviated = true;
    module.implemented = true;

    let mut removed = false;
    let mut default_or_type_changed = false;

    for deviate in record {
        if removed {
            return Err(DeviationError::TargetAlreadyRemoved);
        }
        match deviate.mode {
            DeviateMode::NotSupported => {
                detach(module, target);
                removed = true;
            }
            DeviateMode::Add => {
                apply_add(module, target, deviate)?;
                default_or_type_changed |= !deviate.default.is_empty();
            }
            DeviateMode::Delete => {
                apply_delete(module, target, deviate)?;
                default_or_type_changed |= !deviate.default.is_empty();
            }
            DeviateMode::Replace => {
                apply_replace(module, target, deviate)?;
                default_or_type_changed |= deviate.ty.is_some() || !deviate.default.is_empty();
            }
        }
    }

    Ok(default_or_type_changed && !removed)
}

fn detach(module: &mut Module, node: NodeId) {
    let parent = module.node(node).parent;
    match parent {
        Some(p) => module.node_mut(p).children.retain(|&c| c != node),
        None => module.top_level.retain(|&c| c != node),
    }
}

fn apply_add(module: &mut Module, target: NodeId, deviate: &DeviateRecord) -> Result<(), DeviationError> {
    let node = module.node_mut(target);
    node.must.extend(deviate.must.iter().cloned());

    if let Some(config) = deviate.config {
        if node.config.is_explicit() {
            return Err(DeviationError::AlreadySet { field: "config" });
        }
        node.config = ConfigFlag::Explicit(config);
    }
    if let Some(mandatory) = deviate.mandatory {
        if node.mandatory {
            return Err(DeviationError::AlreadySet { field: "mandatory" });
        }
        node.mandatory = mandatory;
    }

    match &mut node.data {
        NodeData::List { min_elements, max_elements, .. } => {
            if !deviate.unique.is_empty() {
                // A `unique` path needs the same name-to-`NodeId` walk
                // `ListUnique` schema items already perform; this
                // function, grounded purely on `Module`, has no path
                // resolution available. Deviating `unique` is
                // unimplemented (see `apply_delete`'s matching gap).
                return Err(DeviationError::Inapplicable { field: "unique" });
            }
            apply_add_min_max(min_elements, max_elements, deviate)?;
        }
        NodeData::LeafList { defaults, min_elements, max_elements, .. } => {
            if !deviate.default.is_empty() {
                if !defaults.is_empty() {
                    return Err(DeviationError::AlreadySet { field: "default" });
                }
                defaults.extend(deviate.default.iter().copied());
            }
            apply_add_min_max(min_elements, max_elements, deviate)?;
        }
        NodeData::Leaf { default, .. } => {
            if let Some(&d) = deviate.default.first() {
                if default.is_some() {
                    return Err(DeviationError::AlreadySet { field: "default" });
                }
                *default = Some(d);
            }
        }
        _ => {
            if !deviate.default.is_empty() {
                return Err(DeviationError::Inapplicable { field: "default" });
            }
        }
    }

    Ok(())
}

fn apply_add_min_max(
    min_elements: &mut u32,
    max_elements: &mut Option<u32>,
    deviate: &DeviateRecord,
) -> Result<(), DeviationError> {
    if let Some(min) = deviate.min_elements {
        if *min_elements != 0 {
            return Err(DeviationError::AlreadySet { field: "min-elements" });
        }
        *min_elements = min;
    }
    if let Some(max) = deviate.max_elements {
        if max_elements.is_some() {
            return Err(DeviationError::AlreadySet { field: "max-elements" });
        }
        *max_elements = Some(max);
    }
    Ok(())
}

fn apply_delete(module: &mut Module, target: NodeId, deviate: &DeviateRecord) -> Result<(), DeviationError> {
    let node = module.node_mut(target);
    for must in &deviate.must {
        let before = node.must.len();
        node.must.retain(|m| m != must);
        if node.must.len() == before {
            return Err(DeviationError::NotPresent { field: "must" });
        }
    }

    match &mut node.data {
        NodeData::List { .. } => {
            if !deviate.unique.is_empty() {
                return Err(DeviationError::Inapplicable { field: "unique" });
            }
        }
        NodeData::LeafList { defaults, .. } => {
            for &d in &deviate.default {
                let before = defaults.len();
                defaults.retain(|&x| x != d);
                if defaults.len() == before {
                    return Err(DeviationError::NotPresent { field: "default" });
                }
            }
        }
        NodeData::Leaf { default, .. } => {
            if let Some(&d) = deviate.default.first() {
                if *default != Some(d) {
                    return Err(DeviationError::NotPresent { field: "default" });
                }
                *default = None;
            }
        }
        _ => {}
    }

    Ok(())
}

fn apply_replace(module: &mut Module, target: NodeId, deviate: &DeviateRecord) -> Result<(), DeviationError> {
    let node = module.node_mut(target);

    if let Some(config) = deviate.config {
        node.config = ConfigFlag::Explicit(config);
    }
    if let Some(mandatory) = deviate.mandatory {
        node.mandatory = mandatory;
    }

    if let Some(ty) = deviate.ty {
        match &mut node.data {
            NodeData::Leaf { ty: slot, .. } | NodeData::LeafList { ty: slot, .. } => *slot = ty,
            _ => return Err(DeviationError::Inapplicable { field: "type" }),
        }
    }

    match &mut node.data {
        NodeData::List { min_elements, max_elements, .. } | NodeData::LeafList { min_elements, max_elements, .. } => {
            if let Some(min) = deviate.min_elements {
                *min_elements = min;
            }
            if let Some(max) = deviate.max_elements {
                *max_elements = Some(max);
            }
        }
        _ => {}
    }

    match &mut node.data {
        NodeData::Leaf { default, .. } => {
            if let Some(&d) = deviate.default.first() {
                if default.is_none() {
                    return Err(DeviationError::NothingToReplace { field: "default" });
                }
                *default = Some(d);
            }
        }
        NodeData::LeafList { defaults, .. } => {
            if !deviate.default.is_empty() {
                if defaults.is_empty() {
                    return Err(DeviationError::NothingToReplace { field: "default" });
                }
                defaults.clear();
                defaults.extend(deviate.default.iter().copied());
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/deviation.rs"]
mod tests;
