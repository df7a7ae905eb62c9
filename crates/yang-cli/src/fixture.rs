//! The stand-in "parser collaborator": deserializes a small JSON fixture
//! format into a populated [`ModuleRegistry`] plus the [`SchemaItem`]
//! worklist a real YANG lexer/parser would have produced as it built the
//! schema tree. Real module parsing is out of scope (spec.md §1); this
//! format only needs to be rich enough to exercise every unresolved-item
//! kind the fixpoint driver handles.

use std::collections::HashMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use yang_constraints::{IntervalSet, NumericKind, parse_intervals};
use yang_resolve::{SchemaItem, SchemaItemKind, Worklist};
use yang_schema::{
    AugmentRecord, Builtin, ConfigFlag, Derived, EnumDef, EnumValue, Feature, Identity, ModuleId,
    ModuleRegistry, MustConstraint, NodeData, NodeId, RefineRecord, SchemaNode, Status, StringDef,
    Type, TypeId,
};

#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    pub modules: Vec<FixtureModule>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureModule {
    pub name: String,
    pub namespace: String,
    pub prefix: String,
    #[serde(default)]
    pub imports: HashMap<String, String>,
    #[serde(default)]
    pub identities: Vec<FixtureIdentity>,
    #[serde(default)]
    pub features: Vec<FixtureFeature>,
    #[serde(default)]
    pub typedefs: Vec<FixtureTypedef>,
    #[serde(default)]
    pub nodes: Vec<FixtureNode>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureIdentity {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureFeature {
    pub name: String,
    #[serde(default)]
    pub if_features: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureTypedef {
    pub name: String,
    #[serde(flatten)]
    pub spec: TypeSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TypeSpec {
    Int8 { range: Option<String> },
    Int16 { range: Option<String> },
    Int32 { range: Option<String> },
    Int64 { range: Option<String> },
    Uint8 { range: Option<String> },
    Uint16 { range: Option<String> },
    Uint32 { range: Option<String> },
    Uint64 { range: Option<String> },
    Decimal64 { fraction_digits: u8, range: Option<String> },
    String { length: Option<String> },
    Boolean,
    Empty,
    Enumeration { values: Vec<String> },
    Leafref { path: String, #[serde(default)] require_instance: bool },
    Identityref { base: String },
    InstanceIdentifier { #[serde(default)] require_instance: bool },
    Typedef { name: String },
}

#[derive(Debug, Deserialize)]
pub struct FixtureMust {
    pub xpath: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_app_tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureRefine {
    pub target: String,
    #[serde(default)]
    pub config: Option<bool>,
    #[serde(default)]
    pub mandatory: Option<bool>,
    #[serde(default)]
    pub presence: Option<String>,
    #[serde(default)]
    pub min_elements: Option<u32>,
    #[serde(default)]
    pub max_elements: Option<u32>,
    #[serde(default)]
    pub must: Vec<FixtureMust>,
    #[serde(default)]
    pub default: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureAugmentRecord {
    pub target: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureNode {
    pub name: String,
    #[serde(default)]
    pub config: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub must: Vec<FixtureMust>,
    #[serde(default)]
    pub if_features: Vec<String>,
    #[serde(flatten)]
    pub kind: FixtureNodeKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FixtureNodeKind {
    Container {
        #[serde(default)]
        presence: Option<String>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Leaf {
        #[serde(rename = "type")]
        ty: TypeSpec,
        #[serde(default)]
        default: Option<String>,
    },
    LeafList {
        #[serde(rename = "type")]
        ty: TypeSpec,
        #[serde(default)]
        min_elements: u32,
        #[serde(default)]
        max_elements: Option<u32>,
    },
    List {
        #[serde(default)]
        keys: Option<String>,
        #[serde(default)]
        unique: Vec<String>,
        #[serde(default)]
        min_elements: u32,
        #[serde(default)]
        max_elements: Option<u32>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Choice {
        #[serde(default)]
        default_case: Option<String>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Case {
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Anydata,
    Anyxml,
    Grouping {
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Uses {
        grouping: String,
        #[serde(default)]
        refines: Vec<FixtureRefine>,
        #[serde(default)]
        augments: Vec<FixtureAugmentRecord>,
    },
    Augment {
        target: String,
        #[serde(default)]
        when: Option<String>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
}

/// Builds a [`ModuleRegistry`] and the schema-time [`Worklist`] from a
/// parsed fixture, mirroring what a real lexer/parser + binder front end
/// would hand to `yang-resolve`: a fully-shaped (but unresolved) tree plus
/// one [`SchemaItem`] per textual reference it couldn't settle on its own.
pub struct Built {
    pub registry: ModuleRegistry,
    pub worklist: Worklist<SchemaItem>,
}

pub fn build(fixture: FixtureFile) -> anyhow::Result<Built> {
    let mut registry = ModuleRegistry::new();
    let mut worklist = Worklist::new();
    let mut module_ids: FxHashMap<String, ModuleId> = FxHashMap::default();

    for fm in &fixture.modules {
        let name = registry.interner.intern(&fm.name);
        let namespace = registry.interner.intern(&fm.namespace);
        let prefix = registry.interner.intern(&fm.prefix);
        let module = yang_schema::Module::new(ModuleId(0), name, namespace, prefix);
        let id = registry.insert(module);
        module_ids.insert(fm.name.clone(), id);
    }

    for fm in &fixture.modules {
        let module_id = module_ids[&fm.name];
        for (prefix, target_name) in &fm.imports {
            let prefix_atom = registry.interner.intern(prefix);
            let target = *module_ids
                .get(target_name)
                .ok_or_else(|| anyhow::anyhow!("module '{}' imports unknown module '{target_name}'", fm.name))?;
            registry.modules[module_id.index()].imports.insert(prefix_atom, target);
        }
    }

    for fm in &fixture.modules {
        let module_id = module_ids[&fm.name];
        build_identities(&mut registry, &mut worklist, module_id, fm)?;
        build_features(&mut registry, module_id, fm);
        build_typedefs(&mut registry, module_id, fm)?;
        for node in &fm.nodes {
            build_node(&mut registry, &mut worklist, module_id, None, node)?;
        }
    }

    Ok(Built { registry, worklist })
}

/// Identities are inserted before anything else so a sibling module's
/// `IdentBase`/`TypeIdentrefBase` items (which only check for the name's
/// *existence*, per `resolve_ident_base`/`resolve_identref_base`) can
/// resolve as soon as the worklist starts running, instead of pending
/// through a spurious extra round.
fn build_identities(
    registry: &mut ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    module_id: ModuleId,
    fm: &FixtureModule,
) -> anyhow::Result<()> {
    if fm.identities.is_empty() {
        return Ok(());
    }
    // Identity statements have no schema node of their own (§4.4's
    // `IdentBase` doc comment); a single hidden container anchors every
    // identity-base item in this module for diagnostic-path purposes.
    let anchor = insert_bare_node(
        registry,
        module_id,
        None,
        "$identities",
        NodeData::Container { presence: None },
        false,
    );
    registry.modules[module_id.index()].top_level.push(anchor);

    for identity in &fm.identities {
        let atom = registry.interner.intern(&identity.name);
        let m = &mut registry.modules[module_id.index()];
        let id = m.identities.insert(Identity::new(atom, module_id));
        m.identities_by_name.insert(atom, id);
    }
    for identity in &fm.identities {
        for base in &identity.bases {
            worklist.push(SchemaItem::new(
                SchemaItemKind::IdentBase,
                module_id,
                anchor,
                format!("{} {base}", identity.name),
            ));
        }
    }
    Ok(())
}

fn build_features(registry: &mut ModuleRegistry, module_id: ModuleId, fm: &FixtureModule) {
    for feature in &fm.features {
        let atom = registry.interner.intern(&feature.name);
        let m = &mut registry.modules[module_id.index()];
        let id = m.features.insert(Feature { name: atom, module: module_id, if_features: feature.if_features.clone() });
        m.features_by_name.insert(atom, id);
    }
}

/// Typedefs are resolved against each other immediately, in file order
/// (no unresolved-item kind covers "does typedef X exist" — only its
/// range/length *narrowing*, which is `TYPE_DERIVATION`'s job once the
/// chain is built). A typedef referencing a not-yet-declared typedef is
/// a fixture authoring error, not a forward reference.
fn build_typedefs(registry: &mut ModuleRegistry, module_id: ModuleId, fm: &FixtureModule) -> anyhow::Result<()> {
    let mut numeric_kind: FxHashMap<TypeId, NumericKind> = FxHashMap::default();
    for typedef in &fm.typedefs {
        let (ty, kind) = build_type_spec(registry, module_id, &typedef.spec, &mut numeric_kind)?;
        let (base, own_range, own_length) = match ty {
            Type::Builtin(_) => {
                let base_id = registry.modules[module_id.index()].types.insert(ty);
                (base_id, None, None)
            }
            Type::Derived(d) => {
                let range = d.range.clone();
                let length = d.length.clone();
                let base_id = registry.modules[module_id.index()].types.insert(Type::Derived(d));
                (base_id, range, length)
            }
        };
        let name_atom = registry.interner.intern(&typedef.name);
        let derived = Type::Derived(Derived {
            name: name_atom,
            module: module_id,
            base,
            length: own_length,
            range: own_range,
            patterns: Vec::new(),
            enum_set: None,
            bit_set: None,
            fraction_digits: None,
            require_instance: None,
            identity_base: None,
            leafref_path: None,
        });
        if let Some(kind) = kind {
            let m = &mut registry.modules[module_id.index()];
            let new_id = m.types.insert(derived);
            numeric_kind.insert(new_id, kind);
            m.typedefs_by_name.insert(name_atom, new_id);
        } else {
            let m = &mut registry.modules[module_id.index()];
            let new_id = m.types.insert(derived);
            m.typedefs_by_name.insert(name_atom, new_id);
        }
    }
    Ok(())
}

/// Resolves a `TypeSpec` into a concrete [`Type`], returning the numeric
/// kind (if any) so a later typedef built on top of this one can parse
/// its own `range` text against the right domain.
fn build_type_spec(
    registry: &mut ModuleRegistry,
    module_id: ModuleId,
    spec: &TypeSpec,
    numeric_kind: &mut FxHashMap<TypeId, NumericKind>,
) -> anyhow::Result<(Type, Option<NumericKind>)> {
    let parse_range = |text: &Option<String>, kind: NumericKind| -> anyhow::Result<Option<IntervalSet>> {
        match text {
            None => Ok(None),
            Some(text) => {
                let raw = parse_intervals(text, kind)?;
                let intervals = raw
                    .iter()
                    .map(|r| (resolve_bound(r.lower, i128::MIN), resolve_bound(r.upper, i128::MAX)))
                    .collect();
                Ok(Some(IntervalSet { kind, intervals }))
            }
        }
    };

    Ok(match spec {
        TypeSpec::Int8 { range } => {
            let kind = NumericKind::Signed;
            (Type::Builtin(Builtin::Int8 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Int16 { range } => {
            let kind = NumericKind::Signed;
            (Type::Builtin(Builtin::Int16 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Int32 { range } => {
            let kind = NumericKind::Signed;
            (Type::Builtin(Builtin::Int32 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Int64 { range } => {
            let kind = NumericKind::Signed;
            (Type::Builtin(Builtin::Int64 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Uint8 { range } => {
            let kind = NumericKind::Unsigned;
            (Type::Builtin(Builtin::Uint8 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Uint16 { range } => {
            let kind = NumericKind::Unsigned;
            (Type::Builtin(Builtin::Uint16 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Uint32 { range } => {
            let kind = NumericKind::Unsigned;
            (Type::Builtin(Builtin::Uint32 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Uint64 { range } => {
            let kind = NumericKind::Unsigned;
            (Type::Builtin(Builtin::Uint64 { range: parse_range(range, kind)? }), Some(kind))
        }
        TypeSpec::Decimal64 { fraction_digits, range } => {
            let kind = NumericKind::Decimal { fraction_digits: *fraction_digits };
            (
                Type::Builtin(Builtin::Decimal64 { fraction_digits: *fraction_digits, range: parse_range(range, kind)? }),
                Some(kind),
            )
        }
        TypeSpec::String { length } => {
            let kind = NumericKind::Unsigned;
            let length = parse_range(length, kind)?;
            (Type::Builtin(Builtin::StringT(StringDef { length, patterns: Vec::new() })), None)
        }
        TypeSpec::Boolean => (Type::Builtin(Builtin::Boolean), None),
        TypeSpec::Empty => (Type::Builtin(Builtin::Empty), None),
        TypeSpec::Enumeration { values } => {
            let values = values
                .iter()
                .enumerate()
                .map(|(i, name)| EnumValue { name: registry.interner.intern(name), value: i as i64 })
                .collect();
            (Type::Builtin(Builtin::Enumeration(EnumDef { values })), None)
        }
        TypeSpec::Leafref { path, require_instance } => (
            Type::Builtin(Builtin::Leafref(yang_schema::LeafrefDef {
                path: path.clone(),
                require_instance: *require_instance,
                target: None,
            })),
            None,
        ),
        TypeSpec::Identityref { base: _ } => {
            (Type::Builtin(Builtin::Identityref { base: smallvec::SmallVec::new() }), None)
        }
        TypeSpec::InstanceIdentifier { require_instance } => {
            (Type::Builtin(Builtin::InstanceIdentifier { require_instance: *require_instance }), None)
        }
        TypeSpec::Typedef { name } => {
            let atom = registry.interner.find(name).ok_or_else(|| anyhow::anyhow!("unknown typedef '{name}'"))?;
            let base_id = *registry.modules[module_id.index()]
                .typedefs_by_name
                .get(&atom)
                .ok_or_else(|| anyhow::anyhow!("unknown typedef '{name}'"))?;
            let kind = numeric_kind.get(&base_id).copied();
            (
                Type::Derived(Derived {
                    name: atom,
                    module: module_id,
                    base: base_id,
                    length: None,
                    range: None,
                    patterns: Vec::new(),
                    enum_set: None,
                    bit_set: None,
                    fraction_digits: None,
                    require_instance: None,
                    identity_base: None,
                    leafref_path: None,
                }),
                kind,
            )
        }
    })
}

fn resolve_bound(bound: yang_constraints::RawBound, default: i128) -> i128 {
    match bound {
        yang_constraints::RawBound::Min | yang_constraints::RawBound::Max => default,
        yang_constraints::RawBound::Value(v) => v,
    }
}

fn parse_status(text: &Option<String>) -> Status {
    match text.as_deref() {
        Some("deprecated") => Status::Deprecated,
        Some("obsolete") => Status::Obsolete,
        _ => Status::Current,
    }
}

fn build_must(registry: &mut ModuleRegistry, musts: &[FixtureMust]) -> Vec<MustConstraint> {
    let _ = registry;
    musts
        .iter()
        .map(|m| MustConstraint {
            xpath: m.xpath.clone(),
            error_message: m.error_message.clone(),
            error_app_tag: m.error_app_tag.clone(),
        })
        .collect()
}

/// Inserts a node's common fields without attaching it under `parent`'s
/// `children` or the module's `top_level` — used for the free-floating
/// children of a `uses`-augment, which only get a real parent once
/// `apply_augment` splices them in (see `augment.rs`'s doc comment).
fn insert_bare_node(
    registry: &mut ModuleRegistry,
    module_id: ModuleId,
    parent: Option<NodeId>,
    name: &str,
    data: NodeData,
    mandatory: bool,
) -> NodeId {
    let name_atom = registry.interner.intern(name);
    let m = &mut registry.modules[module_id.index()];
    let id = NodeId(m.nodes.len() as u32);
    let node = SchemaNode {
        id,
        name: name_atom,
        module: module_id,
        parent,
        children: Vec::new(),
        config: ConfigFlag::Inherited,
        status: Status::Current,
        mandatory,
        when: None,
        must: Vec::new(),
        if_features: Vec::new(),
        extensions: Vec::new(),
        data,
    };
    let inserted = m.nodes.insert(node);
    debug_assert_eq!(inserted, id);
    id
}

fn build_node(
    registry: &mut ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    module_id: ModuleId,
    parent: Option<NodeId>,
    fixture: &FixtureNode,
) -> anyhow::Result<NodeId> {
    let placeholder = NodeData::Anydata;
    let id = insert_bare_node(registry, module_id, parent, &fixture.name, placeholder, fixture.mandatory);
    {
        let m = &mut registry.modules[module_id.index()];
        let node = m.node_mut(id);
        node.config = fixture.config.map(ConfigFlag::Explicit).unwrap_or(ConfigFlag::Inherited);
        node.status = parse_status(&fixture.status);
        node.when = fixture.when.clone();
        node.must = build_must(registry, &fixture.must);
    }
    match parent {
        Some(p) => registry.modules[module_id.index()].node_mut(p).children.push(id),
        None => registry.modules[module_id.index()].top_level.push(id),
    }

    for text in &fixture.if_features {
        worklist.push(SchemaItem::new(SchemaItemKind::IfFeature, module_id, id, text.clone()));
    }

    let data = match &fixture.kind {
        FixtureNodeKind::Container { presence, children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            NodeData::Container { presence: presence.clone() }
        }
        FixtureNodeKind::Leaf { ty, default } => {
            let mut numeric_kind = FxHashMap::default();
            let (built, _) = build_type_spec(registry, module_id, ty, &mut numeric_kind)?;
            let ty_id = registry.modules[module_id.index()].types.insert(built);
            register_type_items(registry, worklist, module_id, id, ty, ty_id);
            let default = default.as_deref().map(|d| registry.interner.intern(d));
            NodeData::Leaf { ty: ty_id, default }
        }
        FixtureNodeKind::LeafList { ty, min_elements, max_elements } => {
            let mut numeric_kind = FxHashMap::default();
            let (built, _) = build_type_spec(registry, module_id, ty, &mut numeric_kind)?;
            let ty_id = registry.modules[module_id.index()].types.insert(built);
            register_type_items(registry, worklist, module_id, id, ty, ty_id);
            NodeData::LeafList {
                ty: ty_id,
                defaults: smallvec::SmallVec::new(),
                min_elements: *min_elements,
                max_elements: *max_elements,
            }
        }
        FixtureNodeKind::List { keys, unique, min_elements, max_elements, children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            if let Some(keys) = keys {
                worklist.push(SchemaItem::new(SchemaItemKind::ListKeys, module_id, id, keys.clone()));
            }
            for one_unique in unique {
                worklist.push(SchemaItem::new(SchemaItemKind::ListUnique, module_id, id, one_unique.clone()));
            }
            NodeData::List { keys: Vec::new(), unique: Vec::new(), min_elements: *min_elements, max_elements: *max_elements }
        }
        FixtureNodeKind::Choice { default_case, children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            if let Some(case_name) = default_case {
                worklist.push(SchemaItem::new(SchemaItemKind::ChoiceDefault, module_id, id, case_name.clone()));
            }
            NodeData::Choice { default_case: None }
        }
        FixtureNodeKind::Case { children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            NodeData::Case { synthetic: false }
        }
        FixtureNodeKind::Anydata => NodeData::Anydata,
        FixtureNodeKind::Anyxml => NodeData::Anyxml,
        FixtureNodeKind::Grouping { children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            NodeData::Grouping { pending_uses: 0 }
        }
        FixtureNodeKind::Uses { grouping, refines, augments } => {
            let grouping_atom = registry.interner.intern(grouping);
            let grouping_id = *registry.modules[module_id.index()]
                .groupings_by_name
                .get(&grouping_atom)
                .ok_or_else(|| anyhow::anyhow!("uses references unknown grouping '{grouping}'"))?;
            {
                let m = &mut registry.modules[module_id.index()];
                if let NodeData::Grouping { pending_uses } = &mut m.node_mut(grouping_id).data {
                    *pending_uses += 1;
                }
            }
            let refine_records = refines
                .iter()
                .map(|r| RefineRecord {
                    target: r.target.clone(),
                    description: None,
                    reference: None,
                    config: r.config,
                    mandatory: r.mandatory,
                    presence: r.presence.clone(),
                    min_elements: r.min_elements,
                    max_elements: r.max_elements,
                    must: build_must(registry, &r.must),
                    default: r.default.iter().map(|d| registry.interner.intern(d)).collect(),
                })
                .collect();
            let mut augment_records = Vec::new();
            for augment in augments {
                let mut child_ids = Vec::new();
                for child in &augment.children {
                    child_ids.push(build_free_node(registry, worklist, module_id, child)?);
                }
                augment_records.push(AugmentRecord { target: augment.target.clone(), when: augment.when.clone(), children: child_ids });
            }
            worklist.push(SchemaItem::new(SchemaItemKind::UsesExpand, module_id, id, ""));
            NodeData::Uses { grouping: grouping_id, refines: refine_records, augments: augment_records }
        }
        FixtureNodeKind::Augment { target, when, children } => {
            for child in children {
                build_node(registry, worklist, module_id, Some(id), child)?;
            }
            worklist.push(SchemaItem::new(SchemaItemKind::AugmentTarget, module_id, id, target.clone()));
            NodeData::Augment { target: target.clone(), when: when.clone() }
        }
    };
    registry.modules[module_id.index()].node_mut(id).data = data;

    if matches!(registry.modules[module_id.index()].node(id).data, NodeData::Grouping { .. }) {
        registry.modules[module_id.index()].groupings_by_name.insert(
            registry.modules[module_id.index()].node(id).name,
            id,
        );
    }
    Ok(id)
}

/// Builds a `uses`-augment child without attaching it as anyone's child —
/// `apply_augment` re-parents it once the augment resolves (see
/// `augment.rs`'s doc comment on `AugmentRecord::children`).
fn build_free_node(
    registry: &mut ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    module_id: ModuleId,
    fixture: &FixtureNode,
) -> anyhow::Result<NodeId> {
    let id = build_node(registry, worklist, module_id, None, fixture)?;
    // `build_node` pushed `id` onto `top_level` since `parent` is `None`;
    // pull it back off so it stays unreachable until the augment splices
    // it under its real target.
    let m = &mut registry.modules[module_id.index()];
    m.top_level.retain(|&n| n != id);
    Ok(id)
}

fn register_type_items(
    registry: &ModuleRegistry,
    worklist: &mut Worklist<SchemaItem>,
    module_id: ModuleId,
    node: NodeId,
    spec: &TypeSpec,
    ty_id: TypeId,
) {
    let _ = registry;
    match spec {
        TypeSpec::Leafref { path, .. } => {
            worklist.push(SchemaItem::new(SchemaItemKind::TypeLeafref, module_id, node, path.clone()));
        }
        TypeSpec::Identityref { base } => {
            worklist.push(SchemaItem::new(SchemaItemKind::TypeIdentrefBase, module_id, node, base.clone()));
        }
        TypeSpec::Typedef { .. } => {
            worklist.push(SchemaItem::new(SchemaItemKind::TypeDerivation, module_id, node, ""));
        }
        _ => {}
    }
    let _ = ty_id;
}
