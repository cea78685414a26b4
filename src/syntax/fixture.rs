//! Helpers for assembling green trees by hand.
//!
//! Used by tests in place of the real parser. Trivia must be added explicitly
//! with [`ws`] and [`nl`]; line numbers and token indices come out exactly as
//! the text reads.

use rowan::{GreenNode, GreenToken, Language, NodeOrToken};

use super::{DialectPredicates, LpcLanguage, Parse, SyntaxKind};
use crate::base::FileId;

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenElement {
    NodeOrToken::Node(GreenNode::new(LpcLanguage::kind_to_raw(kind), children))
}

pub fn tok(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(LpcLanguage::kind_to_raw(kind), text))
}

pub fn ws() -> GreenElement {
    tok(SyntaxKind::WHITESPACE, " ")
}

pub fn nl() -> GreenElement {
    tok(SyntaxKind::WHITESPACE, "\n")
}

/// Wrap top-level items in a `SOURCE_FILE` for file 0 with no dialect set.
pub fn source_file(children: Vec<GreenElement>) -> Parse {
    source_file_for(FileId::new(0), DialectPredicates::default(), children)
}

pub fn source_file_for(file: FileId, dialect: DialectPredicates, children: Vec<GreenElement>) -> Parse {
    let green = GreenNode::new(LpcLanguage::kind_to_raw(SyntaxKind::SOURCE_FILE), children);
    Parse::new(file, green, dialect)
}

/// `NAME` node holding one identifier.
pub fn name(text: &str) -> GreenElement {
    node(SyntaxKind::NAME, vec![tok(SyntaxKind::IDENT, text)])
}

/// `PRIMITIVE_TYPE` node, with a trailing `*` when `array` is set.
pub fn primitive_type(keyword: &str, array: bool) -> GreenElement {
    let mut children = vec![tok(SyntaxKind::TYPE_KW, keyword)];
    if array {
        children.push(tok(SyntaxKind::STAR, "*"));
    }
    node(SyntaxKind::PRIMITIVE_TYPE, children)
}

/// A bare identifier operand: `PRIMARY_EXPR(IDENT_EXPR(name))`.
pub fn ident_expr(text: &str) -> GreenElement {
    node(
        SyntaxKind::PRIMARY_EXPR,
        vec![node(SyntaxKind::IDENT_EXPR, vec![tok(SyntaxKind::IDENT, text)])],
    )
}

/// A call `callee(args...)` as one primary expression.
pub fn call(callee: &str, args: Vec<GreenElement>) -> GreenElement {
    let mut list = vec![tok(SyntaxKind::L_PAREN, "(")];
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            list.push(tok(SyntaxKind::COMMA, ","));
            list.push(ws());
        }
        list.push(arg);
    }
    list.push(tok(SyntaxKind::R_PAREN, ")"));

    node(
        SyntaxKind::PRIMARY_EXPR,
        vec![
            node(SyntaxKind::IDENT_EXPR, vec![tok(SyntaxKind::IDENT, callee)]),
            node(
                SyntaxKind::METHOD_INVOCATION,
                vec![node(SyntaxKind::ARGUMENT_LIST, list)],
            ),
        ],
    )
}

/// `expr;`
pub fn expr_statement(expr: GreenElement) -> GreenElement {
    node(
        SyntaxKind::EXPR_STATEMENT,
        vec![expr, tok(SyntaxKind::SEMICOLON, ";")],
    )
}

/// `{ items }` with no line breaks added.
pub fn block(items: Vec<GreenElement>) -> GreenElement {
    let mut children = vec![tok(SyntaxKind::L_CURLY, "{")];
    for item in items {
        children.push(ws());
        children.push(item);
    }
    children.push(ws());
    children.push(tok(SyntaxKind::R_CURLY, "}"));
    node(SyntaxKind::BLOCK, children)
}

/// `( expr )` condition of an `if` or `else if` clause.
pub fn condition(expr: GreenElement) -> GreenElement {
    node(
        SyntaxKind::CONDITION,
        vec![tok(SyntaxKind::L_PAREN, "("), expr, tok(SyntaxKind::R_PAREN, ")")],
    )
}
