use crate::SyntaxSet;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_CURLY,
    R_CURLY,
    SEMICOLON,
    COMMA,
    COLON,
    COLON2,
    DOT,
    DOT_STAR,
    ARROW,
    ARROW_STAR,
    ELLIPSIS,
    QUESTION,
    HASH,
    HASH2,
    EQ,
    EQ2,
    BANG,
    NEQ,
    LT,
    GT,
    LTEQ,
    GTEQ,
    SPACESHIP,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    TILDE,
    AMP2,
    PIPE2,
    PLUS2,
    MINUS2,
    SHL,
    SHR,
    PLUSEQ,
    MINUSEQ,
    STAREQ,
    SLASHEQ,
    PERCENTEQ,
    AMPEQ,
    PIPEEQ,
    CARETEQ,
    SHLEQ,
    SHREQ,

    INT_NUMBER,
    FLOAT_NUMBER,
    CHAR_LITERAL,
    STRING_LITERAL,
    IDENT,

    ALIGNAS_KW,
    ALIGNOF_KW,
    ASM_KW,
    AUTO_KW,
    BOOL_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CHAR8_T_KW,
    CHAR16_T_KW,
    CHAR32_T_KW,
    CLASS_KW,
    CONCEPT_KW,
    CONST_KW,
    CONSTEVAL_KW,
    CONSTEXPR_KW,
    CONSTINIT_KW,
    CONST_CAST_KW,
    CONTINUE_KW,
    CO_AWAIT_KW,
    CO_RETURN_KW,
    CO_YIELD_KW,
    DECLTYPE_KW,
    DEFAULT_KW,
    DELETE_KW,
    DO_KW,
    DOUBLE_KW,
    DYNAMIC_CAST_KW,
    ELSE_KW,
    ENUM_KW,
    EXPLICIT_KW,
    EXPORT_KW,
    EXTERN_KW,
    FALSE_KW,
    FLOAT_KW,
    FOR_KW,
    FRIEND_KW,
    GOTO_KW,
    IF_KW,
    INLINE_KW,
    INT_KW,
    LONG_KW,
    MUTABLE_KW,
    NAMESPACE_KW,
    NEW_KW,
    NOEXCEPT_KW,
    NULLPTR_KW,
    OPERATOR_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    REGISTER_KW,
    REINTERPRET_CAST_KW,
    REQUIRES_KW,
    RETURN_KW,
    SHORT_KW,
    SIGNED_KW,
    SIZEOF_KW,
    STATIC_KW,
    STATIC_ASSERT_KW,
    STATIC_CAST_KW,
    STRUCT_KW,
    SWITCH_KW,
    TEMPLATE_KW,
    THIS_KW,
    THREAD_LOCAL_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEDEF_KW,
    TYPEID_KW,
    TYPENAME_KW,
    UNION_KW,
    UNSIGNED_KW,
    USING_KW,
    VIRTUAL_KW,
    VOID_KW,
    VOLATILE_KW,
    WCHAR_T_KW,
    WHILE_KW,

    UNKNOWN,
    EOF,

    TRANSLATION_UNIT,

    UNKNOWN_EXPRESSION,
    PAREN_EXPRESSION,
    THIS_EXPRESSION,
    INTEGER_LITERAL_EXPRESSION,
    CHARACTER_LITERAL_EXPRESSION,
    FLOATING_LITERAL_EXPRESSION,
    STRING_LITERAL_EXPRESSION,
    BOOL_LITERAL_EXPRESSION,
    CXX_NULL_PTR_EXPRESSION,
    INTEGER_USER_DEFINED_LITERAL_EXPRESSION,
    FLOAT_USER_DEFINED_LITERAL_EXPRESSION,
    CHAR_USER_DEFINED_LITERAL_EXPRESSION,
    STRING_USER_DEFINED_LITERAL_EXPRESSION,
    PREFIX_UNARY_OPERATOR_EXPRESSION,
    POSTFIX_UNARY_OPERATOR_EXPRESSION,
    BINARY_OPERATOR_EXPRESSION,
    ID_EXPRESSION,
    MEMBER_EXPRESSION,

    UNKNOWN_STATEMENT,
    DECLARATION_STATEMENT,
    EMPTY_STATEMENT,
    SWITCH_STATEMENT,
    CASE_STATEMENT,
    DEFAULT_STATEMENT,
    IF_STATEMENT,
    FOR_STATEMENT,
    WHILE_STATEMENT,
    CONTINUE_STATEMENT,
    BREAK_STATEMENT,
    RETURN_STATEMENT,
    RANGE_BASED_FOR_STATEMENT,
    EXPRESSION_STATEMENT,
    COMPOUND_STATEMENT,

    UNKNOWN_DECLARATION,
    EMPTY_DECLARATION,
    STATIC_ASSERT_DECLARATION,
    LINKAGE_SPECIFICATION_DECLARATION,
    SIMPLE_DECLARATION,
    TEMPLATE_DECLARATION,
    EXPLICIT_TEMPLATE_INSTANTIATION,
    NAMESPACE_DEFINITION,
    NAMESPACE_ALIAS_DEFINITION,
    USING_NAMESPACE_DIRECTIVE,
    USING_DECLARATION,
    TYPE_ALIAS_DECLARATION,

    SIMPLE_DECLARATOR,
    PAREN_DECLARATOR,
    ARRAY_SUBSCRIPT,
    TRAILING_RETURN_TYPE,
    PARAMETERS_AND_QUALIFIERS,
    MEMBER_POINTER,
    UNQUALIFIED_ID,
    NESTED_NAME_SPECIFIER,
    IDENTIFIER_NAME_SPECIFIER,
    SIMPLE_TEMPLATE_NAME_SPECIFIER,
    DECLTYPE_NAME_SPECIFIER,
}

const EXPRESSIONS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::UNKNOWN_EXPRESSION,
    SyntaxKind::PAREN_EXPRESSION,
    SyntaxKind::THIS_EXPRESSION,
    SyntaxKind::INTEGER_LITERAL_EXPRESSION,
    SyntaxKind::CHARACTER_LITERAL_EXPRESSION,
    SyntaxKind::FLOATING_LITERAL_EXPRESSION,
    SyntaxKind::STRING_LITERAL_EXPRESSION,
    SyntaxKind::BOOL_LITERAL_EXPRESSION,
    SyntaxKind::CXX_NULL_PTR_EXPRESSION,
    SyntaxKind::INTEGER_USER_DEFINED_LITERAL_EXPRESSION,
    SyntaxKind::FLOAT_USER_DEFINED_LITERAL_EXPRESSION,
    SyntaxKind::CHAR_USER_DEFINED_LITERAL_EXPRESSION,
    SyntaxKind::STRING_USER_DEFINED_LITERAL_EXPRESSION,
    SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION,
    SyntaxKind::POSTFIX_UNARY_OPERATOR_EXPRESSION,
    SyntaxKind::BINARY_OPERATOR_EXPRESSION,
    SyntaxKind::ID_EXPRESSION,
    SyntaxKind::MEMBER_EXPRESSION,
]);

const STATEMENTS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::UNKNOWN_STATEMENT,
    SyntaxKind::DECLARATION_STATEMENT,
    SyntaxKind::EMPTY_STATEMENT,
    SyntaxKind::SWITCH_STATEMENT,
    SyntaxKind::CASE_STATEMENT,
    SyntaxKind::DEFAULT_STATEMENT,
    SyntaxKind::IF_STATEMENT,
    SyntaxKind::FOR_STATEMENT,
    SyntaxKind::WHILE_STATEMENT,
    SyntaxKind::CONTINUE_STATEMENT,
    SyntaxKind::BREAK_STATEMENT,
    SyntaxKind::RETURN_STATEMENT,
    SyntaxKind::RANGE_BASED_FOR_STATEMENT,
    SyntaxKind::EXPRESSION_STATEMENT,
    SyntaxKind::COMPOUND_STATEMENT,
]);

const DECLARATIONS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::UNKNOWN_DECLARATION,
    SyntaxKind::EMPTY_DECLARATION,
    SyntaxKind::STATIC_ASSERT_DECLARATION,
    SyntaxKind::LINKAGE_SPECIFICATION_DECLARATION,
    SyntaxKind::SIMPLE_DECLARATION,
    SyntaxKind::TEMPLATE_DECLARATION,
    SyntaxKind::EXPLICIT_TEMPLATE_INSTANTIATION,
    SyntaxKind::NAMESPACE_DEFINITION,
    SyntaxKind::NAMESPACE_ALIAS_DEFINITION,
    SyntaxKind::USING_NAMESPACE_DIRECTIVE,
    SyntaxKind::USING_DECLARATION,
    SyntaxKind::TYPE_ALIAS_DECLARATION,
]);

impl SyntaxKind {
    /// Token kinds sit before `TRANSLATION_UNIT` in declaration order.
    pub const fn is_token(self) -> bool {
        (self as u16) < (Self::TRANSLATION_UNIT as u16)
    }

    pub const fn is_keyword(self) -> bool {
        let kind = self as u16;
        kind >= Self::ALIGNAS_KW as u16 && kind <= Self::WHILE_KW as u16
    }

    pub const fn is_expression(self) -> bool {
        EXPRESSIONS.contains(self)
    }

    pub const fn is_statement(self) -> bool {
        STATEMENTS.contains(self)
    }

    pub const fn is_declaration(self) -> bool {
        DECLARATIONS.contains(self)
    }

    pub fn from_keyword(ident: &str) -> Option<Self> {
        let kind = match ident {
            "alignas" => Self::ALIGNAS_KW,
            "alignof" => Self::ALIGNOF_KW,
            "asm" => Self::ASM_KW,
            "auto" => Self::AUTO_KW,
            "bool" => Self::BOOL_KW,
            "break" => Self::BREAK_KW,
            "case" => Self::CASE_KW,
            "catch" => Self::CATCH_KW,
            "char" => Self::CHAR_KW,
            "char8_t" => Self::CHAR8_T_KW,
            "char16_t" => Self::CHAR16_T_KW,
            "char32_t" => Self::CHAR32_T_KW,
            "class" => Self::CLASS_KW,
            "concept" => Self::CONCEPT_KW,
            "const" => Self::CONST_KW,
            "consteval" => Self::CONSTEVAL_KW,
            "constexpr" => Self::CONSTEXPR_KW,
            "constinit" => Self::CONSTINIT_KW,
            "const_cast" => Self::CONST_CAST_KW,
            "continue" => Self::CONTINUE_KW,
            "co_await" => Self::CO_AWAIT_KW,
            "co_return" => Self::CO_RETURN_KW,
            "co_yield" => Self::CO_YIELD_KW,
            "decltype" => Self::DECLTYPE_KW,
            "default" => Self::DEFAULT_KW,
            "delete" => Self::DELETE_KW,
            "do" => Self::DO_KW,
            "double" => Self::DOUBLE_KW,
            "dynamic_cast" => Self::DYNAMIC_CAST_KW,
            "else" => Self::ELSE_KW,
            "enum" => Self::ENUM_KW,
            "explicit" => Self::EXPLICIT_KW,
            "export" => Self::EXPORT_KW,
            "extern" => Self::EXTERN_KW,
            "false" => Self::FALSE_KW,
            "float" => Self::FLOAT_KW,
            "for" => Self::FOR_KW,
            "friend" => Self::FRIEND_KW,
            "goto" => Self::GOTO_KW,
            "if" => Self::IF_KW,
            "inline" => Self::INLINE_KW,
            "int" => Self::INT_KW,
            "long" => Self::LONG_KW,
            "mutable" => Self::MUTABLE_KW,
            "namespace" => Self::NAMESPACE_KW,
            "new" => Self::NEW_KW,
            "noexcept" => Self::NOEXCEPT_KW,
            "nullptr" => Self::NULLPTR_KW,
            "operator" => Self::OPERATOR_KW,
            "private" => Self::PRIVATE_KW,
            "protected" => Self::PROTECTED_KW,
            "public" => Self::PUBLIC_KW,
            "register" => Self::REGISTER_KW,
            "reinterpret_cast" => Self::REINTERPRET_CAST_KW,
            "requires" => Self::REQUIRES_KW,
            "return" => Self::RETURN_KW,
            "short" => Self::SHORT_KW,
            "signed" => Self::SIGNED_KW,
            "sizeof" => Self::SIZEOF_KW,
            "static" => Self::STATIC_KW,
            "static_assert" => Self::STATIC_ASSERT_KW,
            "static_cast" => Self::STATIC_CAST_KW,
            "struct" => Self::STRUCT_KW,
            "switch" => Self::SWITCH_KW,
            "template" => Self::TEMPLATE_KW,
            "this" => Self::THIS_KW,
            "thread_local" => Self::THREAD_LOCAL_KW,
            "throw" => Self::THROW_KW,
            "true" => Self::TRUE_KW,
            "try" => Self::TRY_KW,
            "typedef" => Self::TYPEDEF_KW,
            "typeid" => Self::TYPEID_KW,
            "typename" => Self::TYPENAME_KW,
            "union" => Self::UNION_KW,
            "unsigned" => Self::UNSIGNED_KW,
            "using" => Self::USING_KW,
            "virtual" => Self::VIRTUAL_KW,
            "void" => Self::VOID_KW,
            "volatile" => Self::VOLATILE_KW,
            "wchar_t" => Self::WCHAR_T_KW,
            "while" => Self::WHILE_KW,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn categories_are_disjoint() {
        let kinds = [
            SyntaxKind::IF_STATEMENT,
            SyntaxKind::ID_EXPRESSION,
            SyntaxKind::SIMPLE_DECLARATION,
            SyntaxKind::SIMPLE_DECLARATOR,
        ];
        let flags = kinds
            .map(|kind| (kind.is_statement(), kind.is_expression(), kind.is_declaration()));

        assert_eq!(
            flags,
            [
                (true, false, false),
                (false, true, false),
                (false, false, true),
                (false, false, false),
            ]
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(SyntaxKind::from_keyword("template"), Some(SyntaxKind::TEMPLATE_KW));
        assert_eq!(SyntaxKind::from_keyword("templates"), None);
        assert!(SyntaxKind::WHILE_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(SyntaxKind::EOF.is_token());
        assert!(!SyntaxKind::TRANSLATION_UNIT.is_token());
    }
}
