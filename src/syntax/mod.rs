//! Parse-tree interface for LPC.
//!
//! The parser is an external collaborator: it resolves the dialect
//! predicates, drives [`SyntaxTreeBuilder`], and hands back a [`Parse`]. This
//! module only defines the tree vocabulary ([`SyntaxKind`]), the rowan
//! binding, and the typed accessors in [`ast`].

pub mod ast;
mod dialect;
pub mod fixture;
mod kind;
mod parse;

pub use dialect::DialectPredicates;
pub use kind::{LpcLanguage, SyntaxKind};
pub use parse::{Parse, SyntaxTreeBuilder};

pub type SyntaxNode = rowan::SyntaxNode<LpcLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<LpcLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<LpcLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<LpcLanguage>;
