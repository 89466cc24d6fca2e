//! Identifier newtypes for the hypergraph data model (spec.md §3).
//!
//! Kept as distinct types (rather than bare `usize`) so that vertex ids,
//! hyperedge ids, pin-list positions and block ids can never be silently
//! swapped at a call site.

use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn new(index: usize) -> Self {
                $name(index as u32)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                $name::new(value)
            }
        }

        impl From<$name> for usize {
            fn from(value: $name) -> Self {
                value.index()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(VertexId);
define_id!(HyperedgeId);
define_id!(PinIndex);

/// A block identifier in `0..k`, or the `INVALID` sentinel for an
/// as-yet-unassigned vertex (spec.md §3).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl BlockId {
    pub const INVALID: BlockId = BlockId(u32::MAX);

    #[inline]
    pub fn new(index: usize) -> Self {
        BlockId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid(), "index() called on INVALID_BLOCK");
        self.0 as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "BlockId({})", self.0)
        } else {
            write!(f, "BlockId(INVALID)")
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "-")
        }
    }
}

/// Integer type shared by vertex weights, hyperedge weights and gains
/// (spec.md §3: "Gains are bounded in magnitude by Σ w(e), and fit the same
/// integer type as hyperedge weights").
pub type Weight = i64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_block_is_distinct_from_any_valid_block() {
        for i in 0..1000usize {
            assert_ne!(BlockId::new(i), BlockId::INVALID);
        }
        assert!(!BlockId::INVALID.is_valid());
        assert!(BlockId::new(0).is_valid());
    }

    #[test]
    fn id_roundtrips_through_usize() {
        let v = VertexId::new(42);
        let back: usize = v.into();
        assert_eq!(back, 42);
    }
}
