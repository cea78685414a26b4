//! Include and inherit targets collected during the symbol walk.

use smol_str::SmolStr;

use super::SymbolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Include,
    Inherit,
}

/// One `#include` or `inherit`, target text as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportEntry {
    pub kind: ImportKind,
    pub target: SmolStr,
    /// The IncludeSymbol/InheritSymbol created for the same directive.
    pub symbol: SymbolId,
}

/// Ordered import targets of one file.
///
/// Appended to strictly in source order; nothing is deduplicated. The combined
/// list is what the module resolver reads, the filtered views give the
/// "includes" and "inherits" lists separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Imports {
    entries: Vec<ImportEntry>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: ImportKind, target: SmolStr, symbol: SymbolId) {
        self.entries.push(ImportEntry {
            kind,
            target,
            symbol,
        });
    }

    pub fn entries(&self) -> &[ImportEntry] {
        &self.entries
    }

    /// All targets, includes and inherits interleaved in source order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.target.as_str())
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ImportKind::Include)
    }

    pub fn inherits(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ImportKind::Inherit)
    }

    fn of_kind(&self, kind: ImportKind) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == kind)
            .map(|entry| entry.target.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
