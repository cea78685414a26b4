//! Selection ranges: expanding selection regions.
//!
//! Starts at the innermost symbol covering a position and walks its parent
//! chain outward.

use super::line_cols;
use crate::base::LineCol;
use crate::hir::FileSymbols;

/// A selection range in 0-based lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// Get selection ranges at a position.
///
/// Returns spans from innermost to outermost that contain the position.
/// Used for "Expand Selection" feature. Positions outside the file give an
/// empty list.
pub fn selection_ranges(symbols: &FileSymbols, line: u32, col: u32) -> Vec<SelectionRange> {
    let Some(offset) = symbols.line_index().offset(LineCol::new(line, col)) else {
        return Vec::new();
    };
    let table = symbols.table();
    let innermost = table.symbol_at(offset);

    let mut ranges: Vec<SelectionRange> = std::iter::once(&table[innermost])
        .chain(table.ancestors(innermost))
        .map(|symbol| {
            let (start, end) = line_cols(symbols.line_index(), symbol.text_range());
            SelectionRange {
                start_line: start.line,
                start_col: start.col,
                end_line: end.line,
                end_col: end.col,
            }
        })
        .collect();

    // Wrapper scopes often share their child's bounds
    ranges.dedup();

    ranges
}
