//! Forward-reference resolution over the schema and instance-data
//! structures defined by `yang-schema`: `uses`/grouping expansion,
//! augment and deviation splicing, leafref and instance-identifier
//! binding, and the two fixpoint drivers that sequence all of it to a
//! settled tree.
//!
//! `yang-schema` owns the arena-indexed data; this crate only ever
//! mutates it in place, driven by a [`Worklist`] of unresolved items
//! collected while the schema/instance tree was built.

pub mod augment;
pub mod data_driver;
pub mod deviation;
pub mod error;
pub mod instance;
pub mod item;
pub mod leafref;
pub mod report;
pub mod schema_driver;
pub mod uses;
pub mod worklist;
pub mod xpath;

pub use augment::{AugmentError, apply_augment};
pub use data_driver::resolve_unres_data;
pub use deviation::{DeviationError, apply_deviation};
pub use error::ResolveError;
pub use instance::{InstanceId, InstanceNode, InstanceTree};
pub use item::{DataItem, DataItemKind, SchemaItem, SchemaItemKind, WhenState};
pub use leafref::{LeafrefError, resolve_data_leafref, resolve_instance_identifier, resolve_schema_leafref};
pub use report::ResolveReport;
pub use schema_driver::resolve_unres_schema;
pub use uses::{UsesError, apply_refine, expand_uses};
pub use worklist::{ItemStatus, Worklist};
pub use xpath::{StubXPathScheduler, XPathKind, XPathScheduler};
