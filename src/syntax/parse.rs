//! Parse results and the tree sink the parser drives.

use rowan::{GreenNode, GreenNodeBuilder, Language};

use super::{DialectPredicates, LpcLanguage, SyntaxKind, SyntaxNode};
use crate::base::FileId;

/// The result of parsing one file.
///
/// Holds the immutable green tree, so it is `Send + Sync` and can be handed to
/// worker threads; [`Parse::syntax_node`] creates a cursor on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    file: FileId,
    green: GreenNode,
    dialect: DialectPredicates,
}

impl Parse {
    pub fn new(file: FileId, green: GreenNode, dialect: DialectPredicates) -> Self {
        Self {
            file,
            green,
            dialect,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn dialect(&self) -> DialectPredicates {
        self.dialect
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Create the root cursor for this tree.
    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Full source text, reassembled from the tree.
    pub fn text(&self) -> String {
        self.syntax_node().text().to_string()
    }
}

/// Tree sink for the external parser.
///
/// The parser reports nodes and tokens in source order; trivia must be
/// emitted as tokens too so that offsets, lines and token indices line up
/// with the original text.
pub struct SyntaxTreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl SyntaxTreeBuilder {
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
        }
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.inner.start_node(LpcLanguage::kind_to_raw(kind));
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.inner.token(LpcLanguage::kind_to_raw(kind), text);
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    /// Finish the tree. Every `start_node` must have been matched by a
    /// `finish_node` and the outermost node should be `SOURCE_FILE`.
    pub fn finish(self, file: FileId, dialect: DialectPredicates) -> Parse {
        Parse::new(file, self.inner.finish(), dialect)
    }
}

impl Default for SyntaxTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
