use crate::{Decl, Expr, Loc, SourceRange};

pub type TypeLoc = la_arena::Idx<TypeLocData>;

/// Spelled type, linked from the outermost type constructor inward.
///
/// The outermost location is the declarator chunk that binds tightest to the
/// declared name: `int *a[10]` is an array location whose element is a
/// pointer location.
#[derive(Debug, Clone)]
pub struct TypeLocData {
    pub kind: TypeLocKind,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub enum TypeLocKind {
    /// Builtin, class, typedef or placeholder name.
    Named { qualifier: Option<Qualifier> },
    /// cv-qualified type.
    Qualified { inner: TypeLoc },
    Pointer { kind: PointerKind, sigil: Loc, pointee: TypeLoc },
    /// `Y::*`; `local` covers the class qualifier and the `*`.
    MemberPointer { local: SourceRange, pointee: TypeLoc },
    Paren { lparen: Loc, rparen: Loc, inner: TypeLoc },
    Array { lbracket: Loc, size: Option<Expr>, rbracket: Loc, element: TypeLoc },
    /// `end` is the last token of the chunk itself: the `)`, a trailing
    /// qualifier, or the last token of a trailing return type.
    Function {
        lparen: Loc,
        rparen: Loc,
        end: Loc,
        params: Vec<Decl>,
        return_type: TypeLoc,
        trailing_return: bool,
    },
    Decltype { expr: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Pointer,
    LValueReference,
    RValueReference,
    BlockPointer,
    ObjCObjectPointer,
}

pub type Qualifier = la_arena::Idx<QualifierData>;

/// One `::`-terminated segment of a nested name specifier.
#[derive(Debug, Clone)]
pub struct QualifierData {
    pub kind: QualifierKind,
    /// The whole chain up to and including this segment's `::`.
    pub range: SourceRange,
    /// This segment and its `::`, as reported by the front end.
    pub local: SourceRange,
    pub prefix: Option<Qualifier>,
}

#[derive(Debug, Clone, Copy)]
pub enum QualifierKind {
    /// The leading `::`.
    Global,
    Identifier,
    Namespace,
    TypeSpec,
    TemplateSpec,
    /// `T::template X<U>::`; the reported local range also covers the
    /// previous segment.
    DependentTemplate { template_kw: Loc },
    Decltype { expr: Expr },
}
