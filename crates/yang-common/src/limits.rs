//! Centralized limits and thresholds.
//!
//! Keeping these as named constants in one place (rather than scattered
//! magic numbers) mirrors `tsz_common::limits`; it also gives the fixpoint
//! driver and the recursive schema-tree walkers a single place to tune
//! pathological-input guards without hunting through the crate.

/// Round cap for the fixpoint driver. This is an emergency backstop, not
/// the expected iteration count: in practice rounds are bounded by the
/// deepest grouping/typedef derivation chain, typically under ten. A
/// schema that needs more rounds than this is almost certainly cyclic and
/// should have failed earlier via the grouping pending-uses counter or the
/// type-derivation chain check.
pub const MAX_FIXPOINT_ROUNDS: usize = 256;

/// Maximum typedef-derivation chain length walked by the interval-constraint
/// engine before treating further recursion as a cycle rather than a
/// legitimate long chain.
pub const MAX_DERIVATION_DEPTH: usize = 128;

/// Maximum `uses`/grouping nesting depth walked when checking the
/// `pending-uses` gate for cycles.
pub const MAX_GROUPING_RECURSION: usize = 128;

/// Maximum number of path segments accepted by the leafref/instance-identifier
/// walkers — guards against pathological input exhausting the stack during
/// recursive-descent re-parsing of very long paths.
pub const MAX_PATH_SEGMENTS: usize = 1024;

/// Maximum scope-walk iterations when resolving a prefix to a module via the
/// module-lookup collaborator, guarding against a corrupt import graph
/// causing an infinite walk.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;
