//! # lpc-analysis-base
//!
//! Semantic model for LPC source files, covering both the LDMud and the
//! FluffOS dialects. Given a parse tree for one file, the builder produces a
//! nested symbol table used by editor tooling (hover, outline, navigation,
//! folding, diagnostics).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → IDE features (folding, outline, links, selection, semantic tokens)
//!   ↓
//! hir     → Symbol table, type resolver, folding computer, tree-walking builder
//!   ↓
//! syntax  → rowan syntax tree produced by the parser, typed AST wrappers
//!   ↓
//! base    → Primitives (FileId, LineIndex, token positions)
//! ```
//!
//! The parser itself lives outside this crate. It drives
//! [`syntax::SyntaxTreeBuilder`] and hands the resulting [`syntax::Parse`] to
//! [`hir::build_symbols`].

/// Foundation types: FileId, line/column conversion, token positions
pub mod base;

/// Parse-tree interface: syntax kinds, typed wrappers, tree sink
pub mod syntax;

/// Semantic model: symbols, scopes, types and the symbol builder
pub mod hir;

/// IDE features: folding, outline, document links, selection, semantic tokens
pub mod ide;

// Re-export the types most callers need
pub use base::{FileId, LineCol, LineIndex, SourceSpan, TextRange, TextSize, TokenPos};
pub use hir::{FileSymbols, SymbolId, SymbolKind, SymbolTable, build_all, build_symbols};
pub use syntax::{DialectPredicates, Parse, SyntaxTreeBuilder};
