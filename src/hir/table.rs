//! Hierarchical symbol table for one file.

use std::ops::Index;

use smol_str::SmolStr;

use super::{Symbol, SymbolData, SymbolId};
use crate::base::{SourceSpan, TextRange, TextSize};
use crate::syntax::{SyntaxNode, SyntaxNodePtr};

/// Arena of all symbols created for one file.
///
/// Symbol 0 is the root scope. Every other symbol has exactly one parent and
/// appears in that parent's child list in creation order. Names are not
/// unique: redeclarations and shadowing produce separate symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a table holding only the root scope for `node`.
    pub fn new(name: impl Into<SmolStr>, node: &SyntaxNode, span: SourceSpan) -> Self {
        let root = Symbol {
            id: SymbolId::ROOT,
            name: name.into(),
            data: SymbolData::File,
            parent: None,
            children: Vec::new(),
            ptr: SyntaxNodePtr::new(node),
            name_range: None,
            span,
        };
        Self {
            symbols: vec![root],
        }
    }

    pub fn root(&self) -> SymbolId {
        SymbolId::ROOT
    }

    /// Create a symbol, append it to `parent`'s children, and return its id.
    ///
    /// No duplicate checking is done.
    pub fn create_symbol(
        &mut self,
        data: SymbolData,
        name: impl Into<SmolStr>,
        parent: SymbolId,
        node: &SyntaxNode,
        span: SourceSpan,
    ) -> SymbolId {
        debug_assert!(self[parent].is_scope(), "parent {parent:?} is not a scope");

        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: name.into(),
            data,
            parent: Some(parent),
            children: Vec::new(),
            ptr: SyntaxNodePtr::new(node),
            name_range: None,
            span,
        });
        self.symbols[parent.index()].children.push(id);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    pub(crate) fn set_name_range(&mut self, id: SymbolId, range: TextRange) {
        if let Some(symbol) = self.get_mut(id) {
            symbol.name_range = Some(range);
        }
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        self.get(id).and_then(|symbol| symbol.parent)
    }

    pub fn children(&self, id: SymbolId) -> &[SymbolId] {
        self.get(id).map(|symbol| symbol.children()).unwrap_or_default()
    }

    /// Parent chain of `id`, nearest first, root last. Does not include `id`.
    pub fn ancestors(&self, id: SymbolId) -> impl Iterator<Item = &Symbol> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
            .filter_map(move |current| self.get(current))
    }

    /// Children of `scope` named `name`, in creation order. A linear scan.
    pub fn find_children_named<'a>(
        &'a self,
        scope: SymbolId,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.children(scope)
            .iter()
            .filter_map(move |&child| self.get(child))
            .filter(move |symbol| symbol.name == name)
    }

    /// `id` and everything below it, in pre-order.
    pub fn descendants(&self, id: SymbolId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Innermost symbol whose node covers `offset`.
    pub fn symbol_at(&self, offset: TextSize) -> SymbolId {
        self.innermost(offset, |_| true)
    }

    /// Innermost scope whose node covers `offset`.
    pub fn scope_at(&self, offset: TextSize) -> SymbolId {
        self.innermost(offset, Symbol::is_scope)
    }

    fn innermost(&self, offset: TextSize, accept: impl Fn(&Symbol) -> bool) -> SymbolId {
        let mut current = self.root();
        loop {
            let next = self.children(current).iter().copied().find(|&child| {
                self.get(child).is_some_and(|symbol| {
                    accept(symbol) && symbol.text_range().contains_inclusive(offset)
                })
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Number of symbols, root included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}
