//! IDE features over a built symbol table.
//!
//! Each function corresponds to an editor request and reads one
//! [`FileSymbols`](crate::hir::FileSymbols).
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Read-only**: Tables are never modified after the walk

mod document_links;
mod folding;
mod selection;
mod semantic_tokens;
mod symbols;

pub use document_links::{DocumentLink, document_links};
pub use folding::folding_ranges;
pub use selection::{SelectionRange, selection_ranges};
pub use semantic_tokens::{SemanticToken, TokenType, semantic_tokens};
pub use symbols::{DocumentSymbol, document_symbols};

use crate::base::{LineCol, LineIndex, TextRange};

/// Start and end of `range` as 0-based line/column pairs.
fn line_cols(index: &LineIndex, range: TextRange) -> (LineCol, LineCol) {
    (index.line_col(range.start()), index.line_col(range.end()))
}
