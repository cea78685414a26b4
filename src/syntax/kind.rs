//! Syntax kinds for LPC trees and the rowan language binding.

macro_rules! syntax_kinds {
    ($($(#[$meta:meta])* $kind:ident),* $(,)?) => {
        /// Every token and node kind the parser can emit.
        ///
        /// Both dialects share one kind set. Dialect differences show up as
        /// different tree shapes (e.g. the two closure syntaxes), never as
        /// different kinds for the same construct.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($(#[$meta])* $kind),*
        }

        impl SyntaxKind {
            const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind),*];
        }
    };
}

syntax_kinds! {
    // Trivia
    WHITESPACE,
    COMMENT,

    // Literals and names
    IDENT,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING_LIT,
    CHAR_LIT,
    /// `<file.h>` in an include directive
    HEADER_NAME,

    // Punctuation
    L_PAREN,
    R_PAREN,
    L_CURLY,
    R_CURLY,
    L_BRACK,
    R_BRACK,
    SEMICOLON,
    COMMA,
    COLON,
    DOT,
    STAR,
    EQ,
    ARROW,
    PLUS,
    MINUS,
    SLASH,
    PERCENT,
    BANG,
    LT,
    GT,
    EQ2,
    NEQ,
    AMP2,
    PIPE2,
    /// `(:` opening a FluffOS inline closure
    CLOSURE_OPEN,
    /// `:)` closing a FluffOS inline closure
    CLOSURE_CLOSE,

    // Keywords
    IF_KW,
    ELSE_KW,
    RETURN_KW,
    WHILE_KW,
    FOR_KW,
    FOREACH_KW,
    INHERIT_KW,
    /// `function` opening an LDMud inline closure
    FUNCTION_KW,
    /// Primitive type keyword (`int`, `string`, `mapping`, ...)
    TYPE_KW,
    /// Function/variable modifier (`static`, `private`, `nomask`, ...)
    MODIFIER_KW,

    // Preprocessor
    /// A whole `#define` line; the body is kept verbatim
    DEFINE_LINE,
    INCLUDE_KW,
    /// `#if`, `#ifdef`, `#ifndef`, `#elif`, `#else`, `#endif`
    PP_KEYWORD,
    /// Unparsed remainder of a conditional directive line
    PP_TEXT,

    // Nodes
    SOURCE_FILE,
    ERROR,
    DEFINE_DIRECTIVE,
    INCLUDE_DIRECTIVE,
    SELECTION_DIRECTIVE,
    INHERIT_STATEMENT,
    INHERIT_TARGET,
    FUNCTION_DECL,
    FUNCTION_HEADER,
    MODIFIER_LIST,
    NAME,
    PARAM_LIST,
    PARAM,
    PRIMITIVE_TYPE,
    VARIABLE_DECL,
    VARIABLE_DECLARATOR,
    BLOCK,
    EXPR_STATEMENT,
    RETURN_STATEMENT,
    WHILE_STATEMENT,
    FOR_STATEMENT,
    FOREACH_STATEMENT,
    IF_STATEMENT,
    IF_CLAUSE,
    ELSE_IF_CLAUSE,
    ELSE_CLAUSE,
    CONDITION,
    ASSIGN_EXPR,
    BINARY_EXPR,
    PREFIX_EXPR,
    PAREN_EXPR,
    PRIMARY_EXPR,
    IDENT_EXPR,
    LITERAL,
    METHOD_INVOCATION,
    ARGUMENT_LIST,
    INDEX_EXPR,
    INLINE_CLOSURE,
}

impl SyntaxKind {
    /// Convert from the raw rowan kind. Unknown values map to [`SyntaxKind::ERROR`].
    pub fn from_raw(raw: u16) -> SyntaxKind {
        Self::ALL.get(raw as usize).copied().unwrap_or(SyntaxKind::ERROR)
    }

    /// Whitespace and comments.
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    /// Statement-level nodes. Heuristic walks up the tree stop here.
    pub fn is_statement_boundary(self) -> bool {
        matches!(
            self,
            SyntaxKind::SOURCE_FILE
                | SyntaxKind::BLOCK
                | SyntaxKind::FUNCTION_DECL
                | SyntaxKind::EXPR_STATEMENT
                | SyntaxKind::RETURN_STATEMENT
                | SyntaxKind::VARIABLE_DECL
                | SyntaxKind::IF_STATEMENT
                | SyntaxKind::WHILE_STATEMENT
                | SyntaxKind::FOR_STATEMENT
                | SyntaxKind::FOREACH_STATEMENT
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The rowan language tag for LPC trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LpcLanguage {}

impl rowan::Language for LpcLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}
