//! Folding-range computation for scope-like symbols.

use crate::base::SourceSpan;

/// An editor folding range in 0-based lines.
///
/// Computed with a fixed convention: `start_line = first_line - 1` and
/// `end_line = last_line - 2`, so the closing line of the construct stays
/// visible. Columns are copied from the span unchanged. Constructs spanning
/// one line produce an `end_line` below `start_line`, and a one-line construct
/// on the first line produces `-1`; the lines are signed so this is kept as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FoldingRange {
    pub start_line: i32,
    pub start_col: u32,
    pub end_line: i32,
    pub end_col: u32,
}

impl FoldingRange {
    pub fn from_span(span: &SourceSpan) -> Self {
        Self {
            start_line: span.start.line as i32 - 1,
            start_col: span.start.column,
            end_line: span.stop.line as i32 - 2,
            end_col: span.stop.column,
        }
    }

    /// Whether an editor can collapse anything.
    pub fn is_collapsible(&self) -> bool {
        self.end_line > self.start_line
    }
}
