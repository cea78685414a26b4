//! Document symbols: the outline of one file.

use smol_str::SmolStr;

use super::line_cols;
use crate::hir::{FileSymbols, Symbol, SymbolData, SymbolId, SymbolKind};

/// One outline entry with its nested entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Type, macro body or similar short description.
    pub detail: Option<String>,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub children: Vec<DocumentSymbol>,
}

/// Get the outline of a file.
///
/// Functions, closures, variables, parameters, macros and imports are listed.
/// `if` statements, their branches, expression wrappers and preprocessor
/// regions do not appear themselves; their contents are lifted into the
/// enclosing entry. Identifier references are left out.
pub fn document_symbols(symbols: &FileSymbols) -> Vec<DocumentSymbol> {
    let mut out = Vec::new();
    collect(symbols, symbols.table().root(), &mut out);
    out
}

fn collect(symbols: &FileSymbols, scope: SymbolId, out: &mut Vec<DocumentSymbol>) {
    let table = symbols.table();
    for &child in table.children(scope) {
        let symbol = &table[child];
        match symbol.kind() {
            SymbolKind::If
            | SymbolKind::Selection
            | SymbolKind::Expression
            | SymbolKind::Preprocessor => collect(symbols, child, out),
            SymbolKind::IdentifierReference | SymbolKind::File => {}
            _ => {
                let mut entry = entry(symbols, symbol);
                collect(symbols, child, &mut entry.children);
                out.push(entry);
            }
        }
    }
}

fn entry(symbols: &FileSymbols, symbol: &Symbol) -> DocumentSymbol {
    let (start, end) = line_cols(symbols.line_index(), symbol.text_range());
    let (name, detail) = match &symbol.data {
        SymbolData::Define { body } => (macro_name(body), Some(body.to_string())),
        SymbolData::Variable { ty } | SymbolData::Parameter { ty } => {
            (symbol.name.clone(), Some(ty.to_string()))
        }
        SymbolData::InlineClosure { display_name, .. } => (
            display_name.clone().unwrap_or_else(|| symbol.name.clone()),
            Some(symbol.name.to_string()),
        ),
        _ => (symbol.name.clone(), None),
    };

    DocumentSymbol {
        name,
        kind: symbol.kind(),
        detail,
        start_line: start.line,
        start_col: start.col,
        end_line: end.line,
        end_col: end.col,
        children: Vec::new(),
    }
}

/// `MAX` out of `MAX(a, b) ...`.
fn macro_name(body: &str) -> SmolStr {
    let end = body
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(body.len());
    SmolStr::new(&body[..end])
}
