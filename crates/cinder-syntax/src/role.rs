use crate::SyntaxKind;

/// Position a child occupies inside its parent.
///
/// Freshly created nodes are `Detached`; folding a node into a parent without
/// an explicit role turns it into `Unknown`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeRole {
    Detached,
    Unknown,
    OpenParen,
    CloseParen,
    IntroducerKeyword,
    LiteralToken,
    ArrowToken,
    ExternKeyword,
    TemplateKeyword,
    BodyStatement,
    ListElement,
    ListDelimiter,
    OperatorToken,
    Operand,
    LeftHandSide,
    RightHandSide,
    ReturnValue,
    CaseValue,
    ThenStatement,
    ElseKeyword,
    ElseStatement,
    Expression,
    Statement,
    Condition,
    Message,
    Declarator,
    Declaration,
    SizeExpression,
    Parameter,
    TrailingReturn,
    SubExpression,
    Object,
    AccessToken,
    Member,
    Qualifier,
    UnqualifiedId,
}

impl NodeRole {
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Self::Detached)
    }

    /// Whether a node of `kind` may be placed in this role.
    ///
    /// Token roles (`OpenParen`, `LiteralToken`, ...) accept anything.
    pub const fn admits(self, kind: SyntaxKind) -> bool {
        match self {
            Self::Statement | Self::BodyStatement | Self::ThenStatement | Self::ElseStatement => {
                kind.is_statement()
            }
            Self::Expression
            | Self::SubExpression
            | Self::Operand
            | Self::LeftHandSide
            | Self::RightHandSide
            | Self::ReturnValue
            | Self::CaseValue
            | Self::Object
            | Self::Member
            | Self::SizeExpression
            | Self::Condition
            | Self::Message => kind.is_expression(),
            Self::Declaration | Self::Parameter => kind.is_declaration(),
            Self::Declarator => matches!(kind, SyntaxKind::SIMPLE_DECLARATOR),
            Self::TrailingReturn => matches!(kind, SyntaxKind::TRAILING_RETURN_TYPE),
            Self::Qualifier => matches!(kind, SyntaxKind::NESTED_NAME_SPECIFIER),
            Self::UnqualifiedId => matches!(kind, SyntaxKind::UNQUALIFIED_ID),
            _ => true,
        }
    }
}
