//! Symbol data model.
//!
//! Every symbol lives in a [`SymbolTable`](super::SymbolTable) arena and is
//! addressed by [`SymbolId`]. Kind-specific data is a tagged union,
//! [`SymbolData`]; [`SymbolKind`] is its fieldless discriminant.

use smol_str::SmolStr;

use super::{FoldingRange, ScriptType, SymbolId};
use crate::base::{SourceSpan, TextRange};
use crate::syntax::ast::{ClauseKind, ClosureShape};
use crate::syntax::{SyntaxNode, SyntaxNodePtr};

/// How an identifier expression is used, decided from the shape of its
/// enclosing primary expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Variable,
    Function,
}

/// Which branch of an `if` statement a selection symbol stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchKind {
    If,
    ElseIf,
    Else,
}

impl BranchKind {
    /// Label prefix, e.g. `elseif` in `elseif_42_1`.
    pub fn label(self) -> &'static str {
        match self {
            BranchKind::If => "if",
            BranchKind::ElseIf => "elseif",
            BranchKind::Else => "else",
        }
    }
}

impl From<ClauseKind> for BranchKind {
    fn from(kind: ClauseKind) -> Self {
        match kind {
            ClauseKind::If => BranchKind::If,
            ClauseKind::ElseIf => BranchKind::ElseIf,
            ClauseKind::Else => BranchKind::Else,
        }
    }
}

/// The branches of one `if` statement, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IfBranches {
    pub if_branch: Option<SymbolId>,
    pub else_ifs: Vec<SymbolId>,
    pub else_branch: Option<SymbolId>,
}

impl IfBranches {
    /// All branches in source order.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.if_branch
            .iter()
            .chain(self.else_ifs.iter())
            .chain(self.else_branch.iter())
            .copied()
    }
}

/// Kind-specific payload of a symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolData {
    /// Root scope of a file.
    File,
    /// `#define`; the macro body is stored unparsed.
    Define { body: SmolStr },
    Include { target: SmolStr },
    Inherit { target: SmolStr },
    Variable { ty: ScriptType },
    Parameter { ty: ScriptType },
    Method { folding: FoldingRange },
    If(IfBranches),
    /// One `if` / `else if` / `else` branch.
    Selection {
        branch: BranchKind,
        folding: FoldingRange,
    },
    InlineClosure {
        display_name: Option<SmolStr>,
        /// `None` when the parser left out the opening token.
        shape: Option<ClosureShape>,
        folding: FoldingRange,
    },
    IdentifierReference { kind: ReferenceKind },
    /// A conditional-compilation region.
    Preprocessor { keyword: SmolStr },
    /// Wrapper scope opened for each primary expression.
    Expression,
}

/// Fieldless discriminant of [`SymbolData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    File,
    Define,
    Include,
    Inherit,
    Variable,
    Parameter,
    Method,
    If,
    Selection,
    InlineClosure,
    IdentifierReference,
    Preprocessor,
    Expression,
}

impl SymbolKind {
    /// Whether symbols of this kind own children.
    pub fn is_scope(self) -> bool {
        matches!(
            self,
            SymbolKind::File
                | SymbolKind::Method
                | SymbolKind::If
                | SymbolKind::Selection
                | SymbolKind::InlineClosure
                | SymbolKind::Preprocessor
                | SymbolKind::Expression
        )
    }
}

impl SymbolData {
    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolData::File => SymbolKind::File,
            SymbolData::Define { .. } => SymbolKind::Define,
            SymbolData::Include { .. } => SymbolKind::Include,
            SymbolData::Inherit { .. } => SymbolKind::Inherit,
            SymbolData::Variable { .. } => SymbolKind::Variable,
            SymbolData::Parameter { .. } => SymbolKind::Parameter,
            SymbolData::Method { .. } => SymbolKind::Method,
            SymbolData::If(_) => SymbolKind::If,
            SymbolData::Selection { .. } => SymbolKind::Selection,
            SymbolData::InlineClosure { .. } => SymbolKind::InlineClosure,
            SymbolData::IdentifierReference { .. } => SymbolKind::IdentifierReference,
            SymbolData::Preprocessor { .. } => SymbolKind::Preprocessor,
            SymbolData::Expression => SymbolKind::Expression,
        }
    }
}

/// A symbol recorded by the builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub id: SymbolId,
    /// Name or generated label.
    pub name: SmolStr,
    pub data: SymbolData,
    /// Scope that was current when this symbol was created. `None` only for
    /// the root.
    pub parent: Option<SymbolId>,
    pub(crate) children: Vec<SymbolId>,
    /// Back-reference to the node that produced this symbol.
    pub ptr: SyntaxNodePtr,
    /// Range of the name token, when the construct has one.
    pub name_range: Option<TextRange>,
    pub span: SourceSpan,
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        self.data.kind()
    }

    pub fn is_scope(&self) -> bool {
        self.kind().is_scope()
    }

    /// Child symbols in creation order.
    pub fn children(&self) -> &[SymbolId] {
        &self.children
    }

    pub fn ty(&self) -> Option<&ScriptType> {
        match &self.data {
            SymbolData::Variable { ty } | SymbolData::Parameter { ty } => Some(ty),
            _ => None,
        }
    }

    pub fn folding_range(&self) -> Option<FoldingRange> {
        match &self.data {
            SymbolData::Method { folding }
            | SymbolData::Selection { folding, .. }
            | SymbolData::InlineClosure { folding, .. } => Some(*folding),
            _ => None,
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.ptr.text_range()
    }

    /// Resolve the producing node against the tree root.
    ///
    /// # Panics
    /// Panics if `root` is not the root of the tree this symbol was built from.
    pub fn node(&self, root: &SyntaxNode) -> SyntaxNode {
        self.ptr.to_node(root)
    }
}
