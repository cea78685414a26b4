//! Identifiers for symbols within one file's table.

use std::fmt;

/// A file-local symbol identifier.
///
/// These are assigned sequentially as the builder creates symbols, so they
/// follow pre-order source order. They are stable across rebuilds of the same
/// tree, but only meaningful together with the [`SymbolTable`](super::SymbolTable)
/// that produced them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// The root scope of every table.
    pub const ROOT: SymbolId = SymbolId(0);

    /// Create a new SymbolId.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl From<u32> for SymbolId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
