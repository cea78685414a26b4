//! Tree-walking symbol builder.
//!
//! One depth-first, pre-order pass over a file's syntax tree. Each construct
//! the builder cares about has one handler; everything else is walked
//! through. Handlers either add a leaf symbol to the current scope or open a
//! new scope for the construct's subtree.
//!
//! The current scope is an explicit stack. Scopes are pushed through
//! [`SymbolBuilder::enter`], which returns a guard that pops on drop, so the
//! stack is restored on every exit path, unwinding included.

use std::iter::successors;
use std::ops::{Deref, DerefMut};

use rayon::prelude::*;
use rowan::ast::AstNode;
use smol_str::SmolStr;

use super::{
    BranchKind, BuildError, FoldingRange, IfBranches, ImportKind, Imports, ReferenceKind,
    ScriptType, Symbol, SymbolData, SymbolId, SymbolTable, resolve_primitive_type,
};
use crate::base::{FileId, LineIndex, SourceSpan, TextRange, TextSize, TokenIndex, TokenPos};
use crate::syntax::ast::{
    AssignExpr, DefineDirective, FunctionDecl, IdentExpr, IfStatement, IncludeDirective,
    InheritStatement, InlineClosure, Param, PrimaryExpr, SelectionDirective, VariableDecl,
    VariableDeclarator,
};
use crate::syntax::{DialectPredicates, LpcLanguage, Parse, SyntaxKind, SyntaxNode, SyntaxToken};

/// Counters collected during one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub scopes_opened: u32,
    pub scopes_closed: u32,
    /// Deepest scope stack seen, root scope included.
    pub max_depth: u32,
    /// Symbols or declarators left out because part of the construct was missing.
    pub skipped: u32,
}

impl BuildStats {
    /// Whether every pushed scope was popped.
    pub fn is_balanced(&self) -> bool {
        self.scopes_opened == self.scopes_closed
    }
}

/// Everything one walk produces for one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSymbols {
    file: FileId,
    dialect: DialectPredicates,
    table: SymbolTable,
    imports: Imports,
    stats: BuildStats,
    line_index: LineIndex,
}

impl FileSymbols {
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Dialect predicates copied from the parse.
    pub fn dialect(&self) -> DialectPredicates {
        self.dialect
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn root(&self) -> &Symbol {
        &self.table[self.table.root()]
    }

    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Line index of the source text the table was built from.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }
}

/// Build the symbol table for one parsed file.
#[tracing::instrument(skip_all, fields(file = %parse.file()))]
pub fn build_symbols(parse: &Parse) -> FileSymbols {
    SymbolBuilder::new(parse).build()
}

/// Build symbol tables for many files in parallel. Results are in input order.
pub fn build_all(parses: &[Parse]) -> Vec<FileSymbols> {
    parses.par_iter().map(build_symbols).collect()
}

/// Walks one syntax tree and records its symbols.
pub struct SymbolBuilder {
    file: FileId,
    dialect: DialectPredicates,
    root: SyntaxNode,
    line_index: LineIndex,
    token_index: TokenIndex,
    table: SymbolTable,
    imports: Imports,
    stack: Vec<SymbolId>,
    stats: BuildStats,
}

impl SymbolBuilder {
    pub fn new(parse: &Parse) -> Self {
        let root = parse.syntax_node();
        let line_index = LineIndex::new(&root.text().to_string());
        let token_index = TokenIndex::from_starts(
            root.descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .map(|token| token.text_range().start()),
        );
        let span = node_span(&line_index, &token_index, &root).unwrap_or_default();
        let table = SymbolTable::new(parse.file().to_string(), &root, span);

        Self {
            file: parse.file(),
            dialect: parse.dialect(),
            root,
            line_index,
            token_index,
            table,
            imports: Imports::new(),
            stack: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    /// Run the walk and hand back the finished table.
    pub fn build(mut self) -> FileSymbols {
        let root = self.root.clone();
        {
            let mut scope = self.enter(SymbolId::ROOT);
            scope.visit_children(&root);
        }
        debug_assert!(self.stack.is_empty());

        tracing::debug!(
            symbols = self.table.len(),
            imports = self.imports.len(),
            skipped = self.stats.skipped,
            max_depth = self.stats.max_depth,
            "built symbol table"
        );

        FileSymbols {
            file: self.file,
            dialect: self.dialect,
            table: self.table,
            imports: self.imports,
            stats: self.stats,
            line_index: self.line_index,
        }
    }

    /// Push `scope`; it is popped when the returned guard drops.
    fn enter(&mut self, scope: SymbolId) -> ScopeGuard<'_> {
        self.stack.push(scope);
        self.stats.scopes_opened += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.stack.len() as u32);
        tracing::trace!(?scope, depth = self.stack.len(), "enter scope");
        ScopeGuard { builder: self }
    }

    fn leave(&mut self) {
        let scope = self.stack.pop();
        self.stats.scopes_closed += 1;
        tracing::trace!(?scope, depth = self.stack.len(), "leave scope");
    }

    fn current(&self) -> SymbolId {
        self.stack.last().copied().unwrap_or(SymbolId::ROOT)
    }

    fn create(
        &mut self,
        data: SymbolData,
        name: impl Into<SmolStr>,
        node: &SyntaxNode,
        span: SourceSpan,
    ) -> SymbolId {
        let parent = self.current();
        self.table.create_symbol(data, name, parent, node, span)
    }

    fn span_of(&self, node: &SyntaxNode) -> Result<SourceSpan, BuildError> {
        node_span(&self.line_index, &self.token_index, node)
    }

    fn skip(&mut self, node: &SyntaxNode, err: BuildError) {
        tracing::debug!(kind = ?err.construct(), range = ?node.text_range(), error = %err, "skipped symbol");
        self.stats.skipped += 1;
    }

    fn visit_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.visit(&child);
        }
    }

    fn visit(&mut self, node: &SyntaxNode) {
        let outcome = match node.kind() {
            SyntaxKind::DEFINE_DIRECTIVE => self.dispatch(node, Self::define),
            SyntaxKind::SELECTION_DIRECTIVE => self.dispatch(node, Self::selection_directive),
            SyntaxKind::INCLUDE_DIRECTIVE => self.dispatch(node, Self::include),
            SyntaxKind::INHERIT_STATEMENT => self.dispatch(node, Self::inherit),
            SyntaxKind::FUNCTION_DECL => self.dispatch(node, Self::function_decl),
            SyntaxKind::PARAM => self.dispatch(node, Self::param),
            SyntaxKind::VARIABLE_DECL => self.dispatch(node, Self::variable_decl),
            SyntaxKind::IF_STATEMENT => self.dispatch(node, Self::if_statement),
            SyntaxKind::INLINE_CLOSURE => self.dispatch(node, Self::inline_closure),
            SyntaxKind::PRIMARY_EXPR => self.dispatch(node, Self::primary_expr),
            SyntaxKind::IDENT_EXPR => self.dispatch(node, Self::ident_expr),
            _ => {
                self.visit_children(node);
                Ok(())
            }
        };

        // Handlers fail before descending, so the subtree still gets walked
        // in the enclosing scope.
        if let Err(err) = outcome {
            self.skip(node, err);
            self.visit_children(node);
        }
    }

    fn dispatch<N: AstNode<Language = LpcLanguage>>(
        &mut self,
        node: &SyntaxNode,
        handler: fn(&mut Self, &N) -> Result<(), BuildError>,
    ) -> Result<(), BuildError> {
        let typed = N::cast(node.clone()).ok_or(BuildError::missing(node.kind(), "node"))?;
        handler(self, &typed)
    }

    fn define(&mut self, define: &DefineDirective) -> Result<(), BuildError> {
        let node = define.syntax();
        let head = define.head().ok_or(BuildError::missing(node.kind(), "text"))?;
        let span = self.span_of(node)?;

        let label = format!("{head}_{}", span.start.index);
        let id = self.create(SymbolData::Define { body: define.body() }, label, node, span);
        if let Some(range) = define.line().as_ref().and_then(macro_name_range) {
            self.table.set_name_range(id, range);
        }
        Ok(())
    }

    fn selection_directive(&mut self, directive: &SelectionDirective) -> Result<(), BuildError> {
        let node = directive.syntax();
        let keyword = directive
            .keyword()
            .ok_or(BuildError::missing(node.kind(), "keyword"))?;
        let span = self.span_of(node)?;

        let keyword = SmolStr::new(keyword.text());
        let label = format!("{keyword}_{}", span.start.index);
        let id = self.create(SymbolData::Preprocessor { keyword }, label, node, span);
        let mut scope = self.enter(id);
        scope.visit_children(node);
        Ok(())
    }

    fn include(&mut self, include: &IncludeDirective) -> Result<(), BuildError> {
        let node = include.syntax();
        let target = include
            .target()
            .ok_or(BuildError::missing(node.kind(), "target"))?;
        let span = self.span_of(node)?;

        let text = SmolStr::new(target.text());
        let id = self.create(
            SymbolData::Include {
                target: text.clone(),
            },
            text.clone(),
            node,
            span,
        );
        self.table.set_name_range(id, target.text_range());
        self.imports.push(ImportKind::Include, text, id);
        self.visit_children(node);
        Ok(())
    }

    fn inherit(&mut self, inherit: &InheritStatement) -> Result<(), BuildError> {
        let node = inherit.syntax();
        let target = inherit
            .target()
            .ok_or(BuildError::missing(node.kind(), "target"))?;
        let text = target
            .text()
            .ok_or(BuildError::missing(node.kind(), "target"))?;
        let span = self.span_of(node)?;

        let id = self.create(
            SymbolData::Inherit {
                target: text.clone(),
            },
            text.clone(),
            node,
            span,
        );
        self.table.set_name_range(id, target.syntax().text_range());
        self.imports.push(ImportKind::Inherit, text, id);
        self.visit_children(node);
        Ok(())
    }

    fn function_decl(&mut self, decl: &FunctionDecl) -> Result<(), BuildError> {
        let node = decl.syntax();
        let ident = decl
            .header()
            .and_then(|header| header.name())
            .and_then(|name| name.ident())
            .ok_or(BuildError::missing(node.kind(), "name"))?;
        let span = self.span_of(node)?;

        let folding = FoldingRange::from_span(&span);
        let id = self.create(SymbolData::Method { folding }, ident.text(), node, span);
        self.table.set_name_range(id, ident.text_range());
        let mut scope = self.enter(id);
        scope.visit_children(node);
        Ok(())
    }

    fn param(&mut self, param: &Param) -> Result<(), BuildError> {
        let node = param.syntax();
        let ident = param
            .name()
            .and_then(|name| name.ident())
            .ok_or(BuildError::missing(node.kind(), "name"))?;
        let span = self.span_of(node)?;

        let ty = param
            .ty()
            .map(|ty| resolve_primitive_type(&ty.spelling()))
            .unwrap_or_else(ScriptType::untyped);
        let id = self.create(SymbolData::Parameter { ty }, ident.text(), node, span);
        self.table.set_name_range(id, ident.text_range());
        self.visit_children(node);
        Ok(())
    }

    fn variable_decl(&mut self, decl: &VariableDecl) -> Result<(), BuildError> {
        let node = decl.syntax();
        let ty = decl.ty().ok_or(BuildError::missing(node.kind(), "type"))?;
        let ty = resolve_primitive_type(&ty.spelling());

        for child in node
            .children()
            .filter(|child| !VariableDeclarator::can_cast(child.kind()))
        {
            self.visit(&child);
        }
        for declarator in decl.declarators() {
            if let Err(err) = self.declarator(&declarator, &ty) {
                self.skip(declarator.syntax(), err);
            }
            self.visit_children(declarator.syntax());
        }
        Ok(())
    }

    fn declarator(
        &mut self,
        declarator: &VariableDeclarator,
        ty: &ScriptType,
    ) -> Result<(), BuildError> {
        let node = declarator.syntax();
        let ident = declarator
            .name()
            .and_then(|name| name.ident())
            .ok_or(BuildError::missing(node.kind(), "name"))?;
        let span = self.span_of(node)?;

        let id = self.create(SymbolData::Variable { ty: ty.clone() }, ident.text(), node, span);
        self.table.set_name_range(id, ident.text_range());
        Ok(())
    }

    fn if_statement(&mut self, stmt: &IfStatement) -> Result<(), BuildError> {
        let node = stmt.syntax();
        let span = self.span_of(node)?;

        let index = span.start.index;
        let id = self.create(
            SymbolData::If(IfBranches::default()),
            format!("if_{index}"),
            node,
            span,
        );
        let mut scope = self.enter(id);
        let mut counter = 0u32;
        for (clause, child) in stmt.parts() {
            let Some(clause) = clause else {
                scope.visit(&child);
                continue;
            };
            let branch = BranchKind::from(clause);
            let label = format!("{}_{index}_{counter}", branch.label());
            counter += 1;
            if let Err(err) = scope.branch(id, branch, label, &child) {
                scope.skip(&child, err);
                scope.visit_children(&child);
            }
        }
        Ok(())
    }

    fn branch(
        &mut self,
        if_id: SymbolId,
        branch: BranchKind,
        label: String,
        clause: &SyntaxNode,
    ) -> Result<(), BuildError> {
        let span = self.span_of(clause)?;

        let folding = FoldingRange::from_span(&span);
        let id = self.create(SymbolData::Selection { branch, folding }, label, clause, span);
        if let Some(Symbol {
            data: SymbolData::If(branches),
            ..
        }) = self.table.get_mut(if_id)
        {
            match branch {
                BranchKind::If => {
                    branches.if_branch.get_or_insert(id);
                }
                BranchKind::ElseIf => branches.else_ifs.push(id),
                BranchKind::Else => {
                    branches.else_branch.get_or_insert(id);
                }
            }
        }
        let mut scope = self.enter(id);
        scope.visit_children(clause);
        Ok(())
    }

    fn inline_closure(&mut self, closure: &InlineClosure) -> Result<(), BuildError> {
        let node = closure.syntax();
        let span = self.span_of(node)?;

        let data = SymbolData::InlineClosure {
            display_name: closure_display_name(node),
            shape: closure.shape(),
            folding: FoldingRange::from_span(&span),
        };
        let id = self.create(data, format!("closure_{}", span.start.index), node, span);
        let mut scope = self.enter(id);
        scope.visit_children(node);
        Ok(())
    }

    fn primary_expr(&mut self, expr: &PrimaryExpr) -> Result<(), BuildError> {
        let node = expr.syntax();
        let span = self.span_of(node)?;

        let id = self.create(SymbolData::Expression, format!("expr_{}", span.start.index), node, span);
        let mut scope = self.enter(id);
        scope.visit_children(node);
        Ok(())
    }

    fn ident_expr(&mut self, expr: &IdentExpr) -> Result<(), BuildError> {
        let node = expr.syntax();
        let ident = expr
            .ident()
            .ok_or(BuildError::missing(node.kind(), "identifier"))?;
        let span = self.span_of(node)?;

        let kind = if expr
            .enclosing_primary()
            .is_some_and(|primary| primary.has_invocation())
        {
            ReferenceKind::Function
        } else {
            ReferenceKind::Variable
        };
        let id = self.create(SymbolData::IdentifierReference { kind }, ident.text(), node, span);
        self.table.set_name_range(id, ident.text_range());
        self.visit_children(node);
        Ok(())
    }
}

/// Pops the scope it was created for when dropped.
struct ScopeGuard<'b> {
    builder: &'b mut SymbolBuilder,
}

impl Deref for ScopeGuard<'_> {
    type Target = SymbolBuilder;

    fn deref(&self) -> &SymbolBuilder {
        self.builder
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut SymbolBuilder {
        self.builder
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.builder.leave();
    }
}

fn node_span(
    lines: &LineIndex,
    tokens: &TokenIndex,
    node: &SyntaxNode,
) -> Result<SourceSpan, BuildError> {
    let range = node.text_range();
    let inside = |token: &SyntaxToken| range.contains_range(token.text_range());
    let significant = |token: &SyntaxToken| !token.kind().is_trivia();

    let first = successors(node.first_token(), SyntaxToken::next_token)
        .take_while(inside)
        .find(significant);
    let last = successors(node.last_token(), SyntaxToken::prev_token)
        .take_while(inside)
        .find(significant);
    let (Some(first), Some(last)) = (first, last) else {
        return Err(BuildError::EmptySpan {
            construct: node.kind(),
        });
    };

    Ok(SourceSpan::new(
        token_pos(lines, tokens, &first),
        token_pos(lines, tokens, &last),
    ))
}

fn token_pos(lines: &LineIndex, tokens: &TokenIndex, token: &SyntaxToken) -> TokenPos {
    let offset = token.text_range().start();
    let line_col = lines.line_col(offset);
    TokenPos::new(line_col.line_one_indexed(), line_col.col, tokens.index_of(offset))
}

/// Range of the macro name inside a `#define` line.
fn macro_name_range(line: &SyntaxToken) -> Option<TextRange> {
    let (head, rest) = line.text().split_once(' ')?;
    let len = rest
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(rest.len());
    if len == 0 {
        return None;
    }
    let start = line.text_range().start() + TextSize::of(head) + TextSize::of(' ');
    Some(TextRange::at(start, TextSize::from(len as u32)))
}

/// Best-effort name for an inline closure, taken from the nearest enclosing
/// construct that names it: the variable it initializes, the target it is
/// assigned to, or the function it is passed to. The search stops at the
/// enclosing statement.
///
/// Only those three constructs count as a name. Other ancestors with text of
/// their own (operators, literals, index expressions) are passed over rather
/// than used as the closure's name.
fn closure_display_name(node: &SyntaxNode) -> Option<SmolStr> {
    node.ancestors()
        .skip(1)
        .take_while(|ancestor| !ancestor.kind().is_statement_boundary())
        .find_map(|ancestor| match ancestor.kind() {
            SyntaxKind::VARIABLE_DECLARATOR => VariableDeclarator::cast(ancestor)?.name()?.text(),
            SyntaxKind::ASSIGN_EXPR => AssignExpr::cast(ancestor)?.target_name(),
            SyntaxKind::PRIMARY_EXPR => {
                let primary = PrimaryExpr::cast(ancestor)?;
                if !primary.has_invocation() {
                    return None;
                }
                primary.operand_ident().map(|ident| SmolStr::new(ident.text()))
            }
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;
    use crate::hir::{PrimitiveKind, SymbolKind};
    use crate::syntax::ast::ClosureShape;
    use crate::syntax::SyntaxKind::*;
    use crate::syntax::fixture::*;
    use rstest::rstest;

    fn build(children: Vec<GreenElement>) -> FileSymbols {
        build_symbols(&source_file(children))
    }

    fn of_kind(symbols: &FileSymbols, kind: SymbolKind) -> Vec<&Symbol> {
        symbols.table().iter().filter(|s| s.kind() == kind).collect()
    }

    fn names(symbols: &FileSymbols, ids: &[SymbolId]) -> Vec<String> {
        ids.iter().map(|&id| symbols.table()[id].name.to_string()).collect()
    }

    fn int_decl(names: &[&str]) -> GreenElement {
        let mut children = vec![primitive_type("int", false), ws()];
        for (i, n) in names.iter().enumerate() {
            if i > 0 {
                children.push(tok(COMMA, ","));
                children.push(ws());
            }
            children.push(node(VARIABLE_DECLARATOR, vec![name(n)]));
        }
        children.push(tok(SEMICOLON, ";"));
        node(VARIABLE_DECL, children)
    }

    fn if_clause(cond: &str, body: GreenElement) -> GreenElement {
        node(
            IF_CLAUSE,
            vec![tok(IF_KW, "if"), ws(), condition(ident_expr(cond)), ws(), body],
        )
    }

    fn closure(children: Vec<GreenElement>) -> GreenElement {
        let mut all = vec![tok(CLOSURE_OPEN, "(:"), ws()];
        all.extend(children);
        all.push(ws());
        all.push(tok(CLOSURE_CLOSE, ":)"));
        node(PRIMARY_EXPR, vec![node(INLINE_CLOSURE, all)])
    }

    fn closure_name(symbols: &FileSymbols) -> Option<SmolStr> {
        match &of_kind(symbols, SymbolKind::InlineClosure)[0].data {
            SymbolData::InlineClosure { display_name, .. } => display_name.clone(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_define_label_uses_token_index() {
        let mut children = Vec::new();
        for _ in 0..5 {
            children.push(tok(COMMENT, "// header"));
            children.push(nl());
        }
        children.push(node(DEFINE_DIRECTIVE, vec![tok(DEFINE_LINE, "#define FOO_BAR 1")]));

        let symbols = build(children);
        let defines = of_kind(&symbols, SymbolKind::Define);

        assert_eq!(defines.len(), 1);
        assert_eq!(defines[0].name, "#define_10");
        assert_eq!(defines[0].parent, Some(SymbolId::ROOT));
        assert_eq!(defines[0].data, SymbolData::Define { body: "FOO_BAR 1".into() });
        assert_eq!(defines[0].span.start.line, 6);
    }

    #[test]
    fn test_repeated_defines_get_distinct_labels() {
        let define = || node(DEFINE_DIRECTIVE, vec![tok(DEFINE_LINE, "#define DEBUG")]);
        let symbols = build(vec![define(), nl(), define()]);

        let labels: Vec<&str> = of_kind(&symbols, SymbolKind::Define)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(labels, ["#define_0", "#define_2"]);
    }

    #[test]
    fn test_define_name_range_covers_macro_name() {
        let parse = source_file(vec![node(
            DEFINE_DIRECTIVE,
            vec![tok(DEFINE_LINE, "#define MAX(a, b) a")],
        )]);
        let symbols = build_symbols(&parse);
        let define = of_kind(&symbols, SymbolKind::Define)[0];

        let range = define.name_range.unwrap();
        assert_eq!(&parse.text()[range], "MAX");
    }

    #[test]
    fn test_one_variable_per_declarator() {
        let symbols = build(vec![int_decl(&["a", "b"])]);
        let vars = of_kind(&symbols, SymbolKind::Variable);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name, "a");
        assert_eq!(vars[1].name, "b");
        assert_eq!(vars[0].ty(), Some(&ScriptType::Primitive(PrimitiveKind::Int)));
        assert_eq!(vars[0].ty(), vars[1].ty());
        assert_eq!(vars[0].parent, vars[1].parent);
    }

    #[rstest]
    #[case("int", true, ScriptType::Array(PrimitiveKind::Int))]
    #[case("string", false, ScriptType::Primitive(PrimitiveKind::String))]
    #[case("mapping", true, ScriptType::Array(PrimitiveKind::Unresolved("mapping".into())))]
    fn test_declared_type_is_resolved(
        #[case] keyword: &str,
        #[case] array: bool,
        #[case] expected: ScriptType,
    ) {
        let symbols = build(vec![node(
            VARIABLE_DECL,
            vec![
                primitive_type(keyword, array),
                ws(),
                node(VARIABLE_DECLARATOR, vec![name("arr")]),
                tok(SEMICOLON, ";"),
            ],
        )]);
        let vars = of_kind(&symbols, SymbolKind::Variable);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].ty(), Some(&expected));
    }

    #[test]
    fn test_declarator_without_name_is_skipped_alone() {
        let symbols = build(vec![node(
            VARIABLE_DECL,
            vec![
                primitive_type("int", false),
                ws(),
                node(VARIABLE_DECLARATOR, vec![name("a")]),
                tok(COMMA, ","),
                ws(),
                node(VARIABLE_DECLARATOR, vec![tok(INT_NUMBER, "1")]),
                tok(COMMA, ","),
                ws(),
                node(VARIABLE_DECLARATOR, vec![name("c")]),
                tok(SEMICOLON, ";"),
            ],
        )]);
        let vars: Vec<&str> = of_kind(&symbols, SymbolKind::Variable)
            .iter()
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(vars, ["a", "c"]);
        assert_eq!(symbols.stats().skipped, 1);
    }

    #[test]
    fn test_include_collects_import() {
        let symbols = build(vec![node(
            INCLUDE_DIRECTIVE,
            vec![tok(INCLUDE_KW, "#include"), ws(), tok(STRING_LIT, "\"foo.h\"")],
        )]);

        assert_eq!(symbols.imports().targets().collect::<Vec<_>>(), ["\"foo.h\""]);
        assert_eq!(symbols.imports().includes().count(), 1);
        let includes = of_kind(&symbols, SymbolKind::Include);
        assert_eq!(includes.len(), 1);
        assert_eq!(symbols.imports().entries()[0].symbol, includes[0].id);
    }

    #[test]
    fn test_inherit_reads_target_field() {
        let symbols = build(vec![
            node(
                INHERIT_STATEMENT,
                vec![
                    tok(INHERIT_KW, "inherit"),
                    ws(),
                    node(INHERIT_TARGET, vec![tok(STRING_LIT, "\"/std/room\"")]),
                    tok(SEMICOLON, ";"),
                ],
            ),
            nl(),
            node(
                INCLUDE_DIRECTIVE,
                vec![tok(INCLUDE_KW, "#include"), ws(), tok(HEADER_NAME, "<daemons.h>")],
            ),
        ]);

        assert_eq!(
            symbols.imports().targets().collect::<Vec<_>>(),
            ["\"/std/room\"", "<daemons.h>"]
        );
        assert_eq!(symbols.imports().inherits().collect::<Vec<_>>(), ["\"/std/room\""]);
        assert_eq!(of_kind(&symbols, SymbolKind::Inherit)[0].name, "\"/std/room\"");
    }

    #[rstest]
    #[case::include_without_target(
        node(INCLUDE_DIRECTIVE, vec![tok(INCLUDE_KW, "#include")]),
        1
    )]
    #[case::inherit_without_target(
        node(INHERIT_STATEMENT, vec![tok(INHERIT_KW, "inherit"), tok(SEMICOLON, ";")]),
        1
    )]
    #[case::inherit_target_only_trivia(
        node(
            INHERIT_STATEMENT,
            vec![
                tok(INHERIT_KW, "inherit"),
                ws(),
                node(INHERIT_TARGET, vec![tok(COMMENT, "/* none */")]),
                tok(SEMICOLON, ";"),
            ],
        ),
        1
    )]
    #[case::selection_without_keyword(
        node(SELECTION_DIRECTIVE, vec![tok(PP_TEXT, "DEBUG"), nl(), int_decl(&["trace"])]),
        2
    )]
    fn test_incomplete_construct_is_skipped(#[case] item: GreenElement, #[case] symbols_built: usize) {
        let symbols = build(vec![item]);

        assert!(symbols.imports().is_empty());
        assert_eq!(symbols.table().len(), symbols_built);
        assert_eq!(symbols.stats().skipped, 1);
        assert!(symbols.stats().is_balanced());
        assert!(symbols.table().iter().skip(1).all(|s| s.parent == Some(SymbolId::ROOT)));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn test_declarators_share_declared_type(#[case] count: usize) {
        let owned: Vec<String> = (0..count).map(|i| format!("v{i}")).collect();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        let symbols = build(vec![int_decl(&refs)]);
        let vars = of_kind(&symbols, SymbolKind::Variable);

        assert_eq!(vars.len(), count);
        assert!(vars.iter().all(|v| v.ty() == Some(&ScriptType::Primitive(PrimitiveKind::Int))));
        assert_eq!(vars.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(), refs);
    }

    #[test]
    fn test_function_scope_holds_parameters() {
        // int add(int a, string *b) { return a; }
        let header = node(
            FUNCTION_HEADER,
            vec![
                primitive_type("int", false),
                ws(),
                name("add"),
                node(
                    PARAM_LIST,
                    vec![
                        tok(L_PAREN, "("),
                        node(PARAM, vec![primitive_type("int", false), ws(), name("a")]),
                        tok(COMMA, ","),
                        ws(),
                        node(PARAM, vec![primitive_type("string", true), ws(), name("b")]),
                        tok(R_PAREN, ")"),
                    ],
                ),
            ],
        );
        let body = block(vec![node(
            RETURN_STATEMENT,
            vec![tok(RETURN_KW, "return"), ws(), ident_expr("a"), tok(SEMICOLON, ";")],
        )]);
        let symbols = build(vec![node(FUNCTION_DECL, vec![header, ws(), body])]);

        let method = of_kind(&symbols, SymbolKind::Method)[0];
        assert_eq!(method.name, "add");
        assert_eq!(method.parent, Some(SymbolId::ROOT));

        let params = of_kind(&symbols, SymbolKind::Parameter);
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|p| p.parent == Some(method.id)));
        assert_eq!(params[0].ty(), Some(&ScriptType::Primitive(PrimitiveKind::Int)));
        assert_eq!(params[1].ty(), Some(&ScriptType::Array(PrimitiveKind::String)));

        let children = names(&symbols, method.children());
        assert_eq!(children[..2], ["a", "b"]);
        assert!(children[2].starts_with("expr_"));
    }

    #[test]
    fn test_function_without_name_is_skipped() {
        let header = node(
            FUNCTION_HEADER,
            vec![
                primitive_type("void", false),
                node(
                    PARAM_LIST,
                    vec![tok(L_PAREN, "("), node(PARAM, vec![name("x")]), tok(R_PAREN, ")")],
                ),
            ],
        );
        let symbols = build(vec![node(FUNCTION_DECL, vec![header, ws(), block(vec![])])]);

        assert!(of_kind(&symbols, SymbolKind::Method).is_empty());
        let params = of_kind(&symbols, SymbolKind::Parameter);
        assert_eq!(params[0].parent, Some(SymbolId::ROOT));
        assert_eq!(params[0].ty(), Some(&ScriptType::untyped()));
        assert_eq!(symbols.stats().skipped, 1);
        assert!(symbols.stats().is_balanced());
    }

    #[test]
    fn test_nested_if_is_reached_through_if_branch() {
        // if (a) { if (b) foo(); }
        let inner = node(
            IF_STATEMENT,
            vec![if_clause("b", expr_statement(call("foo", vec![])))],
        );
        let symbols = build(vec![node(IF_STATEMENT, vec![if_clause("a", block(vec![inner]))])]);

        let ifs = of_kind(&symbols, SymbolKind::If);
        assert_eq!(ifs.len(), 2);
        let (outer, inner) = (ifs[0], ifs[1]);

        let SymbolData::If(branches) = &outer.data else {
            panic!("expected if data");
        };
        let if_branch = branches.if_branch.unwrap();
        assert!(symbols.table().ancestors(inner.id).any(|s| s.id == if_branch));
        assert!(symbols.table().descendants(if_branch).contains(&inner.id));
    }

    #[test]
    fn test_if_branch_labels_share_one_counter() {
        let branch_body = || block(vec![expr_statement(call("f", vec![]))]);
        let stmt = node(
            IF_STATEMENT,
            vec![
                if_clause("a", branch_body()),
                ws(),
                node(
                    ELSE_IF_CLAUSE,
                    vec![
                        tok(ELSE_KW, "else"),
                        ws(),
                        tok(IF_KW, "if"),
                        ws(),
                        condition(ident_expr("b")),
                        ws(),
                        branch_body(),
                    ],
                ),
                ws(),
                node(
                    ELSE_IF_CLAUSE,
                    vec![
                        tok(ELSE_KW, "else"),
                        ws(),
                        tok(IF_KW, "if"),
                        ws(),
                        condition(ident_expr("c")),
                        ws(),
                        branch_body(),
                    ],
                ),
                ws(),
                node(ELSE_CLAUSE, vec![tok(ELSE_KW, "else"), ws(), branch_body()]),
            ],
        );
        let symbols = build(vec![stmt]);

        let if_symbol = of_kind(&symbols, SymbolKind::If)[0];
        assert_eq!(if_symbol.name, "if_0");
        let SymbolData::If(branches) = &if_symbol.data else {
            panic!("expected if data");
        };
        assert!(branches.if_branch.is_some());
        assert_eq!(branches.else_ifs.len(), 2);
        assert!(branches.else_branch.is_some());

        let labels = names(&symbols, &branches.iter().collect::<Vec<_>>());
        assert_eq!(labels, ["if_0_0", "elseif_0_1", "elseif_0_2", "else_0_3"]);
        assert_eq!(if_symbol.children(), branches.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_clause_is_skipped_but_counted() {
        let stmt = node(
            IF_STATEMENT,
            vec![
                if_clause("a", block(vec![])),
                ws(),
                node(ELSE_IF_CLAUSE, vec![tok(COMMENT, "// lost")]),
                ws(),
                node(ELSE_CLAUSE, vec![tok(ELSE_KW, "else"), ws(), block(vec![])]),
            ],
        );
        let symbols = build(vec![stmt]);

        let if_symbol = of_kind(&symbols, SymbolKind::If)[0];
        let SymbolData::If(branches) = &if_symbol.data else {
            panic!("expected if data");
        };
        assert!(branches.else_ifs.is_empty());
        assert_eq!(
            names(&symbols, &branches.iter().collect::<Vec<_>>()),
            ["if_0_0", "else_0_2"]
        );
        assert_eq!(symbols.stats().skipped, 1);
        assert!(symbols.stats().is_balanced());
    }

    #[test]
    fn test_duplicate_if_clause_keeps_first() {
        let stmt = node(
            IF_STATEMENT,
            vec![if_clause("a", block(vec![])), ws(), if_clause("b", block(vec![]))],
        );
        let symbols = build(vec![stmt]);

        let if_symbol = of_kind(&symbols, SymbolKind::If)[0];
        let SymbolData::If(branches) = &if_symbol.data else {
            panic!("expected if data");
        };
        let first = branches.if_branch.unwrap();
        assert_eq!(symbols.table()[first].name, "if_0_0");
        assert_eq!(names(&symbols, if_symbol.children()), ["if_0_0", "if_0_1"]);
        assert_eq!(branches.iter().count(), 1);
    }

    #[test]
    fn test_if_without_else_has_no_else_branch() {
        let symbols = build(vec![node(IF_STATEMENT, vec![if_clause("a", block(vec![]))])]);
        let if_symbol = of_kind(&symbols, SymbolKind::If)[0];
        let SymbolData::If(branches) = &if_symbol.data else {
            panic!("expected if data");
        };

        assert!(branches.else_ifs.is_empty());
        assert_eq!(branches.else_branch, None);
    }

    #[test]
    fn test_identifier_classified_by_primary_shape() {
        let symbols = build(vec![expr_statement(call("foo", vec![ident_expr("bar")]))]);
        let refs = of_kind(&symbols, SymbolKind::IdentifierReference);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "foo");
        assert_eq!(refs[0].data, SymbolData::IdentifierReference { kind: ReferenceKind::Function });
        assert_eq!(refs[1].name, "bar");
        assert_eq!(refs[1].data, SymbolData::IdentifierReference { kind: ReferenceKind::Variable });

        let exprs = of_kind(&symbols, SymbolKind::Expression);
        assert_eq!(exprs.len(), 2);
        assert_eq!(refs[0].parent, Some(exprs[0].id));
        assert_eq!(exprs[1].parent, Some(exprs[0].id));
    }

    #[test]
    fn test_two_line_closure_folding_underflows() {
        // line 3: "(: x"
        // line 4: ":)"
        let body = node(
            PRIMARY_EXPR,
            vec![node(
                INLINE_CLOSURE,
                vec![tok(CLOSURE_OPEN, "(:"), ws(), ident_expr("x"), nl(), tok(CLOSURE_CLOSE, ":)")],
            )],
        );
        let symbols = build(vec![nl(), nl(), expr_statement(body)]);
        let closure = of_kind(&symbols, SymbolKind::InlineClosure)[0];

        assert_eq!(
            closure.folding_range(),
            Some(FoldingRange {
                start_line: 2,
                start_col: 0,
                end_line: 2,
                end_col: 0,
            })
        );
    }

    #[test]
    fn test_one_line_closure_on_first_line() {
        let symbols = build(vec![expr_statement(closure(vec![ident_expr("x")]))]);
        let folding = of_kind(&symbols, SymbolKind::InlineClosure)[0].folding_range().unwrap();

        assert_eq!(folding.start_line, 0);
        assert_eq!(folding.end_line, -1);
    }

    #[test]
    fn test_closure_named_from_declarator() {
        let symbols = build(vec![node(
            VARIABLE_DECL,
            vec![
                primitive_type("mixed", false),
                ws(),
                node(
                    VARIABLE_DECLARATOR,
                    vec![name("f"), ws(), tok(EQ, "="), ws(), closure(vec![ident_expr("x")])],
                ),
                tok(SEMICOLON, ";"),
            ],
        )]);

        assert_eq!(closure_name(&symbols).as_deref(), Some("f"));
    }

    #[test]
    fn test_closure_named_from_call() {
        let symbols = build(vec![expr_statement(call(
            "filter",
            vec![ident_expr("arr"), closure(vec![ident_expr("x")])],
        ))]);

        assert_eq!(closure_name(&symbols).as_deref(), Some("filter"));
    }

    #[test]
    fn test_closure_named_from_assignment() {
        let symbols = build(vec![expr_statement(node(
            ASSIGN_EXPR,
            vec![ident_expr("cb"), ws(), tok(EQ, "="), ws(), closure(vec![ident_expr("x")])],
        ))]);

        assert_eq!(closure_name(&symbols).as_deref(), Some("cb"));
    }

    #[test]
    fn test_bare_closure_stays_unnamed() {
        let symbols = build(vec![expr_statement(closure(vec![ident_expr("x")]))]);
        let closure = of_kind(&symbols, SymbolKind::InlineClosure)[0];

        assert_eq!(closure_name(&symbols), None);
        assert_eq!(closure.name, "closure_0");
    }

    #[test]
    fn test_function_closure_scope_holds_its_parameters() {
        let fun = node(
            PRIMARY_EXPR,
            vec![node(
                INLINE_CLOSURE,
                vec![
                    tok(FUNCTION_KW, "function"),
                    ws(),
                    primitive_type("int", false),
                    node(
                        PARAM_LIST,
                        vec![
                            tok(L_PAREN, "("),
                            node(PARAM, vec![primitive_type("int", false), ws(), name("n")]),
                            tok(R_PAREN, ")"),
                        ],
                    ),
                    ws(),
                    block(vec![]),
                ],
            )],
        );
        let parse = source_file_for(FileId::new(2), DialectPredicates::LDMUD, vec![expr_statement(fun)]);
        let symbols = build_symbols(&parse);

        let closure = of_kind(&symbols, SymbolKind::InlineClosure)[0];
        let params = of_kind(&symbols, SymbolKind::Parameter);
        assert_eq!(params[0].parent, Some(closure.id));
        assert!(matches!(
            closure.data,
            SymbolData::InlineClosure {
                shape: Some(ClosureShape::Function),
                ..
            }
        ));
        assert_eq!(symbols.dialect(), DialectPredicates::LDMUD);
        assert_eq!(symbols.file(), FileId::new(2));
    }

    #[test]
    fn test_preprocessor_region_opens_scope() {
        let symbols = build(vec![node(
            SELECTION_DIRECTIVE,
            vec![
                tok(PP_KEYWORD, "#ifdef"),
                ws(),
                tok(PP_TEXT, "DEBUG"),
                nl(),
                int_decl(&["trace"]),
            ],
        )]);
        let region = of_kind(&symbols, SymbolKind::Preprocessor)[0];

        assert_eq!(region.name, "#ifdef_0");
        assert_eq!(of_kind(&symbols, SymbolKind::Variable)[0].parent, Some(region.id));
    }

    #[test]
    fn test_scopes_are_balanced() {
        let symbols = build(vec![
            int_decl(&["x"]),
            nl(),
            node(
                IF_STATEMENT,
                vec![if_clause("x", block(vec![expr_statement(closure(vec![ident_expr("x")]))]))],
            ),
        ]);
        let stats = symbols.stats();

        assert!(stats.is_balanced());
        // root, if, branch, expr, closure, expr
        assert_eq!(stats.max_depth, 6);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let parse = source_file(vec![
            node(DEFINE_DIRECTIVE, vec![tok(DEFINE_LINE, "#define X 1")]),
            nl(),
            int_decl(&["a", "b"]),
            nl(),
            expr_statement(call("foo", vec![closure(vec![ident_expr("a")])])),
        ]);

        assert_eq!(build_symbols(&parse), build_symbols(&parse));
    }

    #[test]
    fn test_child_spans_lie_within_parent() {
        let symbols = build(vec![
            int_decl(&["a"]),
            nl(),
            node(
                IF_STATEMENT,
                vec![if_clause("a", block(vec![expr_statement(call("f", vec![ident_expr("a")]))]))],
            ),
        ]);
        let table = symbols.table();

        for symbol in table.iter() {
            if let Some(parent) = symbol.parent {
                assert!(
                    table[parent].span.contains(&symbol.span),
                    "{} not inside {}",
                    symbol.name,
                    table[parent].name
                );
            }
        }
    }

    #[test]
    fn test_span_steps_over_edge_trivia() {
        // " // a\nx; // b"
        let parse = source_file(vec![node(
            EXPR_STATEMENT,
            vec![
                ws(),
                tok(COMMENT, "// a"),
                nl(),
                ident_expr("x"),
                tok(SEMICOLON, ";"),
                ws(),
                tok(COMMENT, "// b"),
            ],
        )]);
        let builder = SymbolBuilder::new(&parse);
        let stmt = parse.syntax_node().first_child().unwrap();

        let span = builder.span_of(&stmt).unwrap();
        assert_eq!(span.start, TokenPos::new(2, 0, 3));
        assert_eq!(span.stop, TokenPos::new(2, 1, 4));

        let comment_only = source_file(vec![node(BLOCK, vec![tok(COMMENT, "// c")])]);
        let builder = SymbolBuilder::new(&comment_only);
        let block = comment_only.syntax_node().first_child().unwrap();
        assert_eq!(
            builder.span_of(&block),
            Err(BuildError::EmptySpan { construct: BLOCK })
        );
    }

    #[test]
    fn test_scope_popped_when_walk_panics() {
        let parse = source_file(vec![name("x")]);
        let root = parse.syntax_node();
        let mut builder = SymbolBuilder::new(&parse);
        let inner = builder.table.create_symbol(
            SymbolData::Expression,
            "expr_0",
            SymbolId::ROOT,
            &root,
            SourceSpan::default(),
        );

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut scope = builder.enter(SymbolId::ROOT);
            let inner_scope = scope.enter(inner);
            if inner_scope.stack.len() == 2 {
                panic!("walk aborted");
            }
        }));

        assert!(result.is_err());
        assert!(builder.stack.is_empty());
        assert_eq!(builder.stats.scopes_opened, 2);
        assert!(builder.stats.is_balanced());
    }

    #[test]
    fn test_empty_file() {
        let symbols = build(vec![]);

        assert_eq!(symbols.table().len(), 1);
        assert_eq!(symbols.root().name, "file#0");
        assert!(symbols.imports().is_empty());
        assert_eq!(symbols.stats().scopes_opened, 1);
    }

    #[test]
    fn test_build_all_keeps_input_order() {
        let parses: Vec<Parse> = (0..4)
            .map(|i| {
                source_file_for(
                    FileId::new(i),
                    DialectPredicates::FLUFFOS,
                    vec![int_decl(&["v"])],
                )
            })
            .collect();

        let built = build_all(&parses);

        assert_eq!(built.iter().map(|f| f.file().index()).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert!(built.iter().all(|f| of_kind(f, SymbolKind::Variable).len() == 1));
    }
}
