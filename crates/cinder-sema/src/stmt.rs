use crate::{Decl, Expr, Loc, SourceRange};

pub type Stmt = la_arena::Idx<StmtData>;

#[derive(Debug, Clone)]
pub struct StmtData {
    pub kind: StmtKind,
    /// Trailing `;` is usually not part of the range.
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Compound { lbrace: Loc, body: Vec<Stmt>, rbrace: Loc },
    Decl { decls: Vec<Decl> },
    Null,
    Switch { switch_loc: Loc, init: Option<Stmt>, condition: Expr, body: Stmt },
    Case { keyword: Loc, value: Expr, sub: Stmt },
    Default { keyword: Loc, sub: Stmt },
    If {
        if_loc: Loc,
        init: Option<Stmt>,
        condition: Expr,
        then: Stmt,
        else_loc: Option<Loc>,
        else_: Option<Stmt>,
    },
    For {
        for_loc: Loc,
        init: Option<Stmt>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Stmt,
    },
    While { while_loc: Loc, condition: Expr, body: Stmt },
    Continue { loc: Loc },
    Break { loc: Loc },
    Return { return_loc: Loc, value: Option<Expr> },
    ForRange { for_loc: Loc, init: Option<Stmt>, loop_var: Decl, range_init: Expr, body: Stmt },
    /// An expression in statement position.
    Expr(Expr),
    Unknown { children: Vec<Stmt> },
}
