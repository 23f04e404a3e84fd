//! Already-analyzed semantic tree handed to the syntax tree builder.
//!
//! The tree is plain data: declarations, statements, expressions, type
//! locations and name qualifiers live in arenas and refer to each other by
//! index. Locations are byte offsets of the first character of a token, and a
//! [`SourceRange`] names its first and last token.

mod decl;
mod expr;
mod stmt;
mod ty;

pub use decl::{
    Decl, DeclData, DeclFamily, DeclKind, DeclaratorDecl, Instantiation, TagDecl, TemplateParams,
};
pub use expr::{Expr, ExprData, ExprKind, IdExpr, LiteralOperatorKind, OverloadedOperator};
pub use stmt::{Stmt, StmtData, StmtKind};
pub use ty::{
    PointerKind, Qualifier, QualifierData, QualifierKind, TypeLoc, TypeLocData, TypeLocKind,
};

use std::ops::Index;

use la_arena::Arena;
use text_size::TextSize;

/// Location of a token's first character.
pub type Loc = TextSize;

/// Inclusive token range: `begin` and `end` are the locations of the first and
/// the last token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub begin: Loc,
    pub end: Loc,
}

impl SourceRange {
    pub const fn new(begin: Loc, end: Loc) -> Self {
        Self { begin, end }
    }

    /// Range made of a single token.
    pub const fn point(loc: Loc) -> Self {
        Self { begin: loc, end: loc }
    }
}

/// Identity of a semantic node that can own a syntax node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SemaNode {
    Decl(Decl),
    Stmt(Stmt),
    Expr(Expr),
    Qualifier(Qualifier),
}

impl From<Decl> for SemaNode {
    fn from(decl: Decl) -> Self {
        Self::Decl(decl)
    }
}

impl From<Stmt> for SemaNode {
    fn from(stmt: Stmt) -> Self {
        Self::Stmt(stmt)
    }
}

impl From<Expr> for SemaNode {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<Qualifier> for SemaNode {
    fn from(qualifier: Qualifier) -> Self {
        Self::Qualifier(qualifier)
    }
}

#[derive(Debug, Default)]
pub struct SemaTree {
    pub decls: Arena<DeclData>,
    pub stmts: Arena<StmtData>,
    pub exprs: Arena<ExprData>,
    pub type_locs: Arena<TypeLocData>,
    pub qualifiers: Arena<QualifierData>,
}

impl SemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_decl(&mut self, kind: DeclKind, range: SourceRange) -> Decl {
        self.decls.alloc(DeclData { kind, range })
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, range: SourceRange) -> Stmt {
        self.stmts.alloc(StmtData { kind, range })
    }

    /// Wraps an expression in statement position, reusing its range.
    ///
    /// Returns `None` if the expression is not spelled in the source.
    pub fn alloc_expr_stmt(&mut self, expr: Expr) -> Option<Stmt> {
        let range = self.exprs[expr].range?;
        Some(self.alloc_stmt(StmtKind::Expr(expr), range))
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, range: SourceRange) -> Expr {
        self.exprs.alloc(ExprData { kind, range: Some(range) })
    }

    /// Expression with no spelling in the source, such as the extra operand
    /// of a postfix `operator++`.
    pub fn alloc_phantom_expr(&mut self, kind: ExprKind) -> Expr {
        self.exprs.alloc(ExprData { kind, range: None })
    }

    pub fn alloc_type_loc(&mut self, kind: TypeLocKind, range: SourceRange) -> TypeLoc {
        self.type_locs.alloc(TypeLocData { kind, range })
    }

    pub fn alloc_qualifier(&mut self, data: QualifierData) -> Qualifier {
        self.qualifiers.alloc(data)
    }
}

impl Index<Decl> for SemaTree {
    type Output = DeclData;

    fn index(&self, index: Decl) -> &DeclData {
        &self.decls[index]
    }
}

impl Index<Stmt> for SemaTree {
    type Output = StmtData;

    fn index(&self, index: Stmt) -> &StmtData {
        &self.stmts[index]
    }
}

impl Index<Expr> for SemaTree {
    type Output = ExprData;

    fn index(&self, index: Expr) -> &ExprData {
        &self.exprs[index]
    }
}

impl Index<TypeLoc> for SemaTree {
    type Output = TypeLocData;

    fn index(&self, index: TypeLoc) -> &TypeLocData {
        &self.type_locs[index]
    }
}

impl Index<Qualifier> for SemaTree {
    type Output = QualifierData;

    fn index(&self, index: Qualifier) -> &QualifierData {
        &self.qualifiers[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_statements_need_a_spelling() {
        let mut sema = SemaTree::new();
        let range = SourceRange::new(TextSize::new(0), TextSize::new(2));
        let spelled = sema.alloc_expr(ExprKind::IntegerLiteral, range);
        let phantom = sema.alloc_phantom_expr(ExprKind::IntegerLiteral);

        let stmt = sema.alloc_expr_stmt(spelled).unwrap();
        assert_eq!(sema[stmt].range, range);
        assert!(sema.alloc_expr_stmt(phantom).is_none());
        assert_eq!(sema.stmts.len(), 1);
    }
}
