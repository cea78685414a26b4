//! Folding ranges: collapsible code regions.
//!
//! Functions, closures and `if` branches carry a folding range computed
//! during the walk. They are reported as computed; ranges that cannot
//! collapse anything are not filtered out here.

use crate::hir::{FileSymbols, FoldingRange};

/// Get folding ranges for a file, sorted by start position.
pub fn folding_ranges(symbols: &FileSymbols) -> Vec<FoldingRange> {
    let mut ranges: Vec<FoldingRange> = symbols
        .table()
        .iter()
        .filter_map(|symbol| symbol.folding_range())
        .collect();

    ranges.sort_by_key(|r| (r.start_line, r.start_col));

    ranges
}
