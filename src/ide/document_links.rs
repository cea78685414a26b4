//! Document links: clickable include and inherit targets.

use smol_str::SmolStr;

use super::line_cols;
use crate::hir::{FileSymbols, ImportKind};

/// A link from an import target to the file it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    /// The span of the target text in the source file.
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub kind: ImportKind,
    /// The target as written, delimiters included.
    pub target: SmolStr,
}

impl DocumentLink {
    /// The target with its `"..."` or `<...>` delimiters removed.
    pub fn path(&self) -> &str {
        let target = self.target.as_str();
        target
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .or_else(|| target.strip_prefix('<').and_then(|t| t.strip_suffix('>')))
            .unwrap_or(target)
    }

    /// Whether the target uses the `<...>` system-include form.
    pub fn is_system(&self) -> bool {
        self.target.starts_with('<')
    }
}

/// Get document links for a file, one per include or inherit, in source order.
pub fn document_links(symbols: &FileSymbols) -> Vec<DocumentLink> {
    let table = symbols.table();

    symbols
        .imports()
        .entries()
        .iter()
        .filter_map(|entry| {
            let symbol = table.get(entry.symbol)?;
            let range = symbol.name_range.unwrap_or_else(|| symbol.text_range());
            let (start, end) = line_cols(symbols.line_index(), range);
            Some(DocumentLink {
                start_line: start.line,
                start_col: start.col,
                end_line: end.line,
                end_col: end.col,
                kind: entry.kind,
                target: entry.target.clone(),
            })
        })
        .collect()
}
