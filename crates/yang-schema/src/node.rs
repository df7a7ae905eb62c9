//! Schema nodes: the tagged variants forming the schema tree.

use smallvec::SmallVec;
use yang_common::Atom;

use crate::config::ConfigFlag;
use crate::extension::UnknownStatement;
use crate::ids::{ModuleId, NodeId, TypeId};
use crate::status::Status;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Leaf,
    LeafList,
    List,
    Choice,
    Case,
    Anydata,
    Anyxml,
    Uses,
    Augment,
    Grouping,
    Rpc,
    Action,
    Input,
    Output,
    Notification,
}

impl NodeKind {
    /// Whether this kind counts as an ordinary data-definition node for
    /// the purposes of augment/`uses` child-type compatibility (excludes
    /// `case`, which is only reachable by explicit name or shorthand).
    pub const fn is_data_definition(self) -> bool {
        matches!(
            self,
            NodeKind::Container
                | NodeKind::Leaf
                | NodeKind::LeafList
                | NodeKind::List
                | NodeKind::Choice
                | NodeKind::Anydata
                | NodeKind::Anyxml
                | NodeKind::Uses
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MustConstraint {
    pub xpath: String,
    pub error_message: Option<String>,
    pub error_app_tag: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfFeatureExpr {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefineRecord {
    pub target: String,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub config: Option<bool>,
    pub mandatory: Option<bool>,
    pub presence: Option<String>,
    pub min_elements: Option<u32>,
    pub max_elements: Option<u32>,
    pub must: Vec<MustConstraint>,
    pub default: Vec<Atom>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentRecord {
    pub target: String,
    pub when: Option<String>,
    pub children: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviateMode {
    NotSupported,
    Add,
    Delete,
    Replace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviateRecord {
    pub mode: DeviateMode,
    pub ty: Option<TypeId>,
    pub units: Option<String>,
    pub default: Vec<Atom>,
    pub config: Option<bool>,
    pub mandatory: Option<bool>,
    pub min_elements: Option<u32>,
    pub max_elements: Option<u32>,
    pub must: Vec<MustConstraint>,
    pub unique: Vec<Vec<Atom>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviationRecord {
    pub target: String,
    pub deviates: Vec<DeviateRecord>,
}

/// Variant-specific payload. Every variant's common attributes (name,
/// config, status, mandatory, ...) live directly on [`SchemaNode`]; this
/// enum only carries what differs by node kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Container {
        presence: Option<String>,
    },
    Leaf {
        ty: TypeId,
        default: Option<Atom>,
    },
    LeafList {
        ty: TypeId,
        defaults: SmallVec<[Atom; 2]>,
        min_elements: u32,
        max_elements: Option<u32>,
    },
    List {
        keys: Vec<NodeId>,
        unique: Vec<Vec<NodeId>>,
        min_elements: u32,
        max_elements: Option<u32>,
    },
    Choice {
        default_case: Option<NodeId>,
    },
    Case {
        /// Set when this case was synthesized to wrap a data node given
        /// directly under a `choice` (the YANG "shorthand case" rule);
        /// such a case has exactly one child and is never addressed by
        /// name in a path.
        synthetic: bool,
    },
    Anydata,
    Anyxml,
    Uses {
        grouping: NodeId,
        refines: Vec<RefineRecord>,
        augments: Vec<AugmentRecord>,
    },
    Augment {
        target: String,
        when: Option<String>,
    },
    Grouping {
        pending_uses: u32,
    },
    Rpc,
    Action,
    Input,
    Output,
    Notification,
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeData::Container { .. } => NodeKind::Container,
            NodeData::Leaf { .. } => NodeKind::Leaf,
            NodeData::LeafList { .. } => NodeKind::LeafList,
            NodeData::List { .. } => NodeKind::List,
            NodeData::Choice { .. } => NodeKind::Choice,
            NodeData::Case { .. } => NodeKind::Case,
            NodeData::Anydata => NodeKind::Anydata,
            NodeData::Anyxml => NodeKind::Anyxml,
            NodeData::Uses { .. } => NodeKind::Uses,
            NodeData::Augment { .. } => NodeKind::Augment,
            NodeData::Grouping { .. } => NodeKind::Grouping,
            NodeData::Rpc => NodeKind::Rpc,
            NodeData::Action => NodeKind::Action,
            NodeData::Input => NodeKind::Input,
            NodeData::Output => NodeKind::Output,
            NodeData::Notification => NodeKind::Notification,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaNode {
    pub id: NodeId,
    pub name: Atom,
    pub module: ModuleId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub config: ConfigFlag,
    pub status: Status,
    pub mandatory: bool,
    pub when: Option<String>,
    pub must: Vec<MustConstraint>,
    pub if_features: Vec<IfFeatureExpr>,
    pub extensions: Vec<UnknownStatement>,
    pub data: NodeData,
}

impl SchemaNode {
    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}
