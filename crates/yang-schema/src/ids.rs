//! Typed arena indices.
//!
//! A raw `usize`/`u32` index lets a `NodeId` be handed to the wrong arena
//! without the compiler noticing; each of these newtypes is only ever
//! produced by its own arena's `insert`, so mixing them up is a type error
//! instead of a silent out-of-bounds lookup.

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

arena_id!(ModuleId);
arena_id!(NodeId);
arena_id!(TypeId);
arena_id!(IdentityId);
arena_id!(FeatureId);
