use crate::{Loc, Qualifier, SourceRange};

pub type Expr = la_arena::Idx<ExprData>;

#[derive(Debug, Clone)]
pub struct ExprData {
    pub kind: ExprKind,
    /// `None` for expressions that are not spelled in the source.
    pub range: Option<SourceRange>,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntegerLiteral,
    CharacterLiteral,
    FloatingLiteral,
    StringLiteral,
    BoolLiteral,
    NullPtrLiteral,
    UserDefinedLiteral(LiteralOperatorKind),
    DeclRef(IdExpr),
    DependentScopeDeclRef(IdExpr),
    Member { base: Expr, operator_loc: Loc, id: IdExpr, implicit: bool },
    This { implicit: bool },
    Paren { lparen: Loc, sub: Expr, rparen: Loc },
    Unary { operator_loc: Loc, postfix: bool, operand: Expr },
    Binary { lhs: Expr, operator_loc: Loc, rhs: Expr },
    /// Call to an overloaded operator; postfix `++`/`--` carry a phantom
    /// second argument.
    OperatorCall { operator: OverloadedOperator, operator_loc: Loc, args: Vec<Expr> },
    /// Conversions and other nodes the source does not spell.
    Implicit { sub: Expr },
    Unknown { children: Vec<Expr> },
}

/// Possibly qualified name, as in `ns::template f<int>`.
#[derive(Debug, Clone, Copy)]
pub struct IdExpr {
    pub qualifier: Option<Qualifier>,
    pub template_kw: Option<Loc>,
    pub name: SourceRange,
}

impl IdExpr {
    pub fn new(name: SourceRange) -> Self {
        Self { qualifier: None, template_kw: None, name }
    }
}

/// Which literal operator a user-defined literal resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralOperatorKind {
    Integer,
    Floating,
    Character,
    String,
    /// `operator""_x(const char*)`: the spelling decides integer or floating.
    Raw,
    /// `template <char...> operator""_x()`: same as `Raw`.
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadedOperator {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    LessLess,
    GreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    ExclaimEqual,
    LessEqual,
    GreaterEqual,
    Spaceship,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
    New,
    Delete,
    ArrayNew,
    ArrayDelete,
    Coawait,
}
