//! String interning.
//!
//! The string dictionary is treated as an external collaborator
//! (`(bytes, len) -> interned-id`, compared by pointer equality after
//! insertion). This module is the default implementation of that
//! interface: tests and the CLI driver both use it directly, while the
//! resolver crates only ever depend on the `Atom`/`Interner` *types*, never
//! on how they're populated, so a host embedding this crate in a larger
//! toolchain can swap in its own interner without touching the resolver.

use rustc_hash::FxHashMap;

/// An interned string id. Cheap to copy, compared by value (the underlying
/// index), never by re-comparing bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl Atom {
    /// The empty string is always interned at index 0 by a fresh `Interner`.
    pub const EMPTY: Atom = Atom(0);

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A single-threaded string interner.
///
/// Not `Sync`; the resolver is single-owner/single-threaded, so no
/// sharded or lock-based interner is needed here (contrast `tsz`'s
/// `ShardedInterner`, which exists for its multi-threaded checker).
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Atom>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Interner {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Atom::EMPTY);
        interner
    }

    /// Intern a string, returning an existing `Atom` if already interned.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.lookup.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, atom);
        atom
    }

    /// Resolve an `Atom` back to its text. Panics if the atom was not
    /// produced by this interner (an arena-mismatch bug, never a user error).
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    /// Look up an already-interned string without inserting it.
    pub fn find(&self, text: &str) -> Option<Atom> {
        self.lookup.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/interner.rs"]
mod tests;
