use crate::{Expr, Loc, Qualifier, SourceRange, Stmt, TypeLoc};

pub type Decl = la_arena::Idx<DeclData>;

#[derive(Debug, Clone)]
pub struct DeclData {
    pub kind: DeclKind,
    /// For tags the range starts at the class key, after any template header.
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub enum DeclKind {
    TranslationUnit { decls: Vec<Decl> },
    Var(DeclaratorDecl),
    Field(DeclaratorDecl),
    Param(DeclaratorDecl),
    Function { declarator: DeclaratorDecl, body: Option<Stmt> },
    Typedef { type_loc: TypeLoc, name: Option<Loc> },
    TypeAlias { type_loc: TypeLoc },
    Tag(TagDecl),
    Template { template_loc: Loc, params: Vec<Decl>, templated: Decl },
    Namespace { decls: Vec<Decl> },
    NamespaceAlias { qualifier: Option<Qualifier> },
    UsingDirective { qualifier: Option<Qualifier> },
    Using { qualifier: Option<Qualifier> },
    Empty,
    StaticAssert { condition: Expr, message: Option<Expr> },
    LinkageSpec { decls: Vec<Decl>, braced: bool },
    /// Declarations without a dedicated syntax, e.g. template type parameters.
    Unknown { exprs: Vec<Expr> },
}

impl DeclKind {
    /// Declarations sharing a family and a begin location belong to one
    /// declaration statement, as in `int a, *b;`.
    pub fn family(&self) -> Option<DeclFamily> {
        match self {
            Self::Var(_) | Self::Field(_) | Self::Param(_) | Self::Function { .. } => {
                Some(DeclFamily::Declarator)
            }
            Self::Typedef { .. } => Some(DeclFamily::Typedef),
            _ => None,
        }
    }

    pub fn is_function_definition(&self) -> bool {
        matches!(self, Self::Function { body: Some(_), .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclFamily {
    Declarator,
    Typedef,
}

#[derive(Debug, Clone)]
pub struct DeclaratorDecl {
    pub type_loc: TypeLoc,
    /// `None` for unnamed entities such as `int (int)` parameters.
    pub name: Option<Loc>,
    pub qualifier: Option<Qualifier>,
    pub init: Option<Expr>,
    /// Loop variable of a range-based `for`; its initializer is not spelled.
    pub for_range: bool,
}

impl DeclaratorDecl {
    pub fn new(type_loc: TypeLoc, name: Option<Loc>) -> Self {
        Self { type_loc, name, qualifier: None, init: None, for_range: false }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagDecl {
    /// The tag is declared on its own, unlike the `struct S {}` inside
    /// `struct S {} s;`.
    pub free_standing: bool,
    pub qualifier: Option<Qualifier>,
    pub members: Vec<Decl>,
    /// Template headers of a partial specialization.
    pub partial_params: Option<TemplateParams>,
    /// Out-of-line template headers, outermost first.
    pub template_params: Vec<TemplateParams>,
    pub instantiation: Option<Instantiation>,
}

#[derive(Debug, Clone)]
pub struct TemplateParams {
    pub template_loc: Loc,
    pub params: Vec<Decl>,
}

/// `extern template struct X<int>;`
#[derive(Debug, Clone, Copy)]
pub struct Instantiation {
    pub extern_loc: Option<Loc>,
    pub template_loc: Loc,
    /// From `extern` (or `template`) up to the end of the declaration.
    pub range: SourceRange,
}
