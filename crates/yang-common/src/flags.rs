//! Data-time resolution configuration.

use bitflags::bitflags;

bitflags! {
    /// Flags controlling data-time unresolved-item resolution.
    ///
    /// Mirrors the bitflags-over-FFI-constant pattern used for libyang's own
    /// parser/validation option sets (see e.g. `DataParserFlags` in the
    /// `yang2-rs` bindings this core replaces), but these bits are native:
    /// no FFI constant backs them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResolveFlags: u32 {
        /// Suppress the auto-prune of non-presence containers emptied by a
        /// false `when`.
        const KEEP_EMPTY_CONTAINERS = 1 << 0;
        /// Steer instance-identifier resolution to an rpc/action's `input`.
        const RPC_INPUT = 1 << 1;
        /// Steer instance-identifier resolution to an rpc/action's `output`.
        const RPC_OUTPUT = 1 << 2;
        /// A false `when` is a hard error instead of triggering
        /// auto-deletion (validators that must not mutate the tree).
        const NO_AUTO_DEL = 1 << 3;
    }
}

impl ResolveFlags {
    /// `RPC_INPUT` and `RPC_OUTPUT` are mutually exclusive; a caller setting
    /// both has a bug, not a schema error, so this is an assertion-style
    /// helper rather than a `Diagnostic`.
    pub const fn is_valid(self) -> bool {
        !(self.contains(Self::RPC_INPUT) && self.contains(Self::RPC_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_input_and_output_are_mutually_exclusive() {
        let flags = ResolveFlags::RPC_INPUT | ResolveFlags::RPC_OUTPUT;
        assert!(!flags.is_valid());
        assert!(ResolveFlags::RPC_INPUT.is_valid());
    }

    #[test]
    fn default_flags_permit_auto_delete() {
        let flags = ResolveFlags::default();
        assert!(!flags.contains(ResolveFlags::NO_AUTO_DEL));
    }
}
