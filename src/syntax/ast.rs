//! Typed wrappers over the untyped syntax tree.
//!
//! Each wrapper exposes the grammar fields of one construct. Accessors return
//! `Option` because the parser recovers from errors by leaving parts out; the
//! caller decides what a missing part means.

use rowan::ast::AstNode;
use smol_str::SmolStr;

use super::{LpcLanguage, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = LpcLanguage;

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode<Language = LpcLanguage>>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode<Language = LpcLanguage>>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

/// Concatenated text of the non-trivia tokens under `node`.
pub fn significant_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .map(|token| token.text().to_string())
        .collect()
}

ast_node!(
    /// `#define NAME body`
    DefineDirective => DEFINE_DIRECTIVE
);

impl DefineDirective {
    pub fn line(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::DEFINE_LINE)
    }

    /// Directive text up to the first space.
    pub fn head(&self) -> Option<SmolStr> {
        let line = self.line()?;
        let text = line.text();
        Some(SmolStr::new(text.split_once(' ').map_or(text, |(head, _)| head)))
    }

    /// Everything after the first space, unparsed.
    pub fn body(&self) -> SmolStr {
        self.line()
            .and_then(|line| line.text().split_once(' ').map(|(_, body)| SmolStr::new(body)))
            .unwrap_or_default()
    }
}

ast_node!(
    /// `#include "file.h"` or `#include <file.h>`
    IncludeDirective => INCLUDE_DIRECTIVE
);

impl IncludeDirective {
    /// The target as written, delimiters included.
    pub fn target(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| matches!(token.kind(), SyntaxKind::STRING_LIT | SyntaxKind::HEADER_NAME))
    }
}

ast_node!(
    /// A conditional-compilation directive together with the region the
    /// parser nested under it.
    SelectionDirective => SELECTION_DIRECTIVE
);

impl SelectionDirective {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::PP_KEYWORD)
    }
}

ast_node!(InheritStatement => INHERIT_STATEMENT);

impl InheritStatement {
    pub fn target(&self) -> Option<InheritTarget> {
        child(&self.0)
    }
}

ast_node!(InheritTarget => INHERIT_TARGET);

impl InheritTarget {
    pub fn text(&self) -> Option<SmolStr> {
        let text = significant_text(&self.0);
        (!text.is_empty()).then(|| SmolStr::new(text))
    }
}

ast_node!(FunctionDecl => FUNCTION_DECL);

impl FunctionDecl {
    pub fn header(&self) -> Option<FunctionHeader> {
        child(&self.0)
    }
}

ast_node!(FunctionHeader => FUNCTION_HEADER);

impl FunctionHeader {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }
}

ast_node!(Name => NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident().map(|ident| SmolStr::new(ident.text()))
    }
}

ast_node!(Param => PARAM);

impl Param {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn ty(&self) -> Option<PrimitiveType> {
        child(&self.0)
    }
}

ast_node!(
    /// A primitive type keyword with an optional trailing `*` array marker.
    PrimitiveType => PRIMITIVE_TYPE
);

impl PrimitiveType {
    /// The type as written, without trivia (`int`, `string*`).
    pub fn spelling(&self) -> String {
        significant_text(&self.0)
    }
}

ast_node!(
    /// A primitive-typed declaration statement: `int a, *b = 1;`
    VariableDecl => VARIABLE_DECL
);

impl VariableDecl {
    pub fn ty(&self) -> Option<PrimitiveType> {
        child(&self.0)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> {
        children(&self.0)
    }
}

ast_node!(VariableDeclarator => VARIABLE_DECLARATOR);

impl VariableDeclarator {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }
}

/// The arm of an `if` chain a clause node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    If,
    ElseIf,
    Else,
}

impl ClauseKind {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::IF_CLAUSE => Some(ClauseKind::If),
            SyntaxKind::ELSE_IF_CLAUSE => Some(ClauseKind::ElseIf),
            SyntaxKind::ELSE_CLAUSE => Some(ClauseKind::Else),
            _ => None,
        }
    }
}

ast_node!(IfStatement => IF_STATEMENT);

impl IfStatement {
    /// Child nodes in source order, each tagged with its clause kind when it
    /// is an `if` / `else if` / `else` clause.
    pub fn parts(&self) -> impl Iterator<Item = (Option<ClauseKind>, SyntaxNode)> {
        self.0
            .children()
            .map(|child| (ClauseKind::from_kind(child.kind()), child))
    }
}

ast_node!(AssignExpr => ASSIGN_EXPR);

impl AssignExpr {
    /// Name of a plain `name = ...` target.
    pub fn target_name(&self) -> Option<SmolStr> {
        let lhs = self.0.first_child().and_then(PrimaryExpr::cast)?;
        lhs.operand_ident().map(|ident| SmolStr::new(ident.text()))
    }
}

ast_node!(
    /// An operand followed by its postfix parts (calls, indexing).
    PrimaryExpr => PRIMARY_EXPR
);

impl PrimaryExpr {
    pub fn method_invocations(&self) -> impl Iterator<Item = MethodInvocation> {
        children(&self.0)
    }

    pub fn has_invocation(&self) -> bool {
        self.method_invocations().next().is_some()
    }

    /// The identifier when the operand is a bare name.
    pub fn operand_ident(&self) -> Option<SyntaxToken> {
        child::<IdentExpr>(&self.0)?.ident()
    }
}

ast_node!(IdentExpr => IDENT_EXPR);

impl IdentExpr {
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }

    /// The nearest primary expression around this identifier.
    pub fn enclosing_primary(&self) -> Option<PrimaryExpr> {
        self.0.ancestors().skip(1).find_map(PrimaryExpr::cast)
    }
}

ast_node!(MethodInvocation => METHOD_INVOCATION);

/// The two inline closure syntaxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClosureShape {
    /// FluffOS `(: expr :)`
    Expression,
    /// LDMud `function int (int a) { ... }`
    Function,
}

ast_node!(InlineClosure => INLINE_CLOSURE);

impl InlineClosure {
    /// Which closure syntax the parser matched, read from the opening token.
    pub fn shape(&self) -> Option<ClosureShape> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find_map(|token| match token.kind() {
                SyntaxKind::CLOSURE_OPEN => Some(ClosureShape::Expression),
                SyntaxKind::FUNCTION_KW => Some(ClosureShape::Function),
                _ => None,
            })
    }
}
