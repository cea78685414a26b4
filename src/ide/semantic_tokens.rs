//! Semantic tokens: syntax highlighting based on semantic analysis.
//!
//! Tokens come from the name ranges recorded on symbols, so only constructs
//! with a name in the source (functions, variables, parameters, macros,
//! import targets and identifier references) are classified.

use crate::hir::{FileSymbols, ReferenceKind, Symbol, SymbolData};

/// Token type for semantic highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Namespace,
    Function,
    Variable,
    Parameter,
    Macro,
}

impl TokenType {
    /// Convert to LSP token type index.
    pub fn to_lsp_index(self) -> u32 {
        match self {
            TokenType::Namespace => 0,
            TokenType::Function => 1,
            TokenType::Variable => 2,
            TokenType::Parameter => 3,
            TokenType::Macro => 4,
        }
    }

    pub fn for_symbol(symbol: &Symbol) -> Option<Self> {
        let token_type = match &symbol.data {
            SymbolData::Method { .. } => TokenType::Function,
            SymbolData::Variable { .. } => TokenType::Variable,
            SymbolData::Parameter { .. } => TokenType::Parameter,
            SymbolData::Define { .. } => TokenType::Macro,
            SymbolData::Include { .. } | SymbolData::Inherit { .. } => TokenType::Namespace,
            SymbolData::IdentifierReference { kind } => match kind {
                ReferenceKind::Function => TokenType::Function,
                ReferenceKind::Variable => TokenType::Variable,
            },
            _ => return None,
        };
        Some(token_type)
    }
}

/// A semantic token for syntax highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticToken {
    /// Line number (0-indexed)
    pub line: u32,
    /// Column number (0-indexed)
    pub col: u32,
    /// Length of the token in bytes
    pub length: u32,
    pub token_type: TokenType,
}

/// Get semantic tokens for a file, sorted by position.
pub fn semantic_tokens(symbols: &FileSymbols) -> Vec<SemanticToken> {
    let mut tokens: Vec<SemanticToken> = symbols
        .table()
        .iter()
        .filter_map(|symbol| {
            let range = symbol.name_range?;
            let token_type = TokenType::for_symbol(symbol)?;
            let start = symbols.line_index().line_col(range.start());
            Some(SemanticToken {
                line: start.line,
                col: start.col,
                length: range.len().into(),
                token_type,
            })
        })
        .collect();

    tokens.sort_by_key(|t| (t.line, t.col));

    tokens
}
