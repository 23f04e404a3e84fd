use cinder_sema::{
    Decl, DeclKind, Expr, Loc, Qualifier, QualifierKind, SemaTree, SourceRange, Stmt, StmtKind,
    TypeLoc, TypeLocKind,
};
use cinder_syntax::{SyntaxKind, TokenBuffer, TokenId, TokenRange};
use rustc_hash::FxHashSet;

use crate::locator::Locator;
use crate::{BuildError, Result};

/// Computes the tokens a semantic construct occupies in the syntax tree.
///
/// Front ends report ranges that are convenient for diagnostics, not for a
/// token-exact tree: statements and declarations usually stop short of their
/// `;`, and a declarator is scattered around the name.
#[derive(Clone, Copy)]
pub(crate) struct RangeResolver<'a> {
    sema: &'a SemaTree,
    tokens: &'a TokenBuffer,
    locator: &'a Locator,
}

impl<'a> RangeResolver<'a> {
    pub(crate) fn new(sema: &'a SemaTree, tokens: &'a TokenBuffer, locator: &'a Locator) -> Self {
        Self { sema, tokens, locator }
    }

    pub(crate) fn range(&self, range: SourceRange) -> Result<TokenRange> {
        self.locator.range(range)
    }

    pub(crate) fn expr_range(&self, expr: Expr) -> Result<TokenRange> {
        let range = self.sema[expr].range.ok_or(BuildError::MissingRange(expr.into()))?;
        self.range(range)
    }

    /// Swallows the `;` right after `range` unless `range` already ends with
    /// one.
    pub(crate) fn with_trailing_semicolon(&self, range: TokenRange) -> Result<TokenRange> {
        let last = range.last().ok_or(BuildError::EmptyRange(range))?;
        // `range.end` may be EOF, which is never a `;`.
        if self.tokens.kind(last) != SyntaxKind::SEMICOLON
            && self.tokens.kind(range.end) == SyntaxKind::SEMICOLON
        {
            return Ok(TokenRange::new(range.start, range.end.next()));
        }
        Ok(range)
    }

    pub(crate) fn stmt_range(&self, stmt: Stmt) -> Result<TokenRange> {
        let data = &self.sema[stmt];
        let range = self.range(data.range)?;
        match data.kind {
            StmtKind::Compound { .. } => Ok(range),
            _ => self.with_trailing_semicolon(range),
        }
    }

    pub(crate) fn decl_range(
        &self,
        decl: Decl,
        without_semicolon: &FxHashSet<Decl>,
    ) -> Result<TokenRange> {
        let range = self.range(self.sema[decl].range)?;
        if without_semicolon.contains(&decl) || !self.owns_semicolon(decl) {
            return Ok(range);
        }
        self.with_trailing_semicolon(range)
    }

    /// Declarations ending in a `}` that closes their own body never take the
    /// `;` after it: that token is an empty declaration of its own.
    fn owns_semicolon(&self, decl: Decl) -> bool {
        match &self.sema[decl].kind {
            DeclKind::Namespace { .. } => false,
            DeclKind::LinkageSpec { braced, .. } => !braced,
            DeclKind::Template { templated, .. } => self.owns_semicolon(*templated),
            kind => !kind.is_function_definition(),
        }
    }

    /// Where the declarator starts inside `type_loc`, if anywhere.
    ///
    /// Pointer-like chunks contribute their sigil and parentheses their `(`,
    /// unless something further in starts earlier.
    pub(crate) fn declarator_start(&self, type_loc: TypeLoc) -> Option<Loc> {
        match self.sema[type_loc].kind {
            TypeLocKind::Paren { lparen, inner, .. } => {
                Some(self.declarator_start(inner).unwrap_or(lparen))
            }
            TypeLocKind::Pointer { sigil, pointee, .. } => {
                Some(self.declarator_start(pointee).unwrap_or(sigil))
            }
            TypeLocKind::MemberPointer { local, pointee } => {
                Some(self.declarator_start(pointee).unwrap_or(local.begin))
            }
            // The return type follows the arrow and belongs to a separate
            // declarator.
            TypeLocKind::Function { trailing_return: true, .. } => None,
            TypeLocKind::Function { return_type, .. } => self.declarator_start(return_type),
            TypeLocKind::Array { element, .. } => self.declarator_start(element),
            TypeLocKind::Qualified { inner } => self.declarator_start(inner),
            TypeLocKind::Named { .. } | TypeLocKind::Decltype { .. } => None,
        }
    }

    /// Tokens of the declarator built from `type_loc` around a name.
    ///
    /// `name` is the start of the possibly qualified name together with the
    /// location of the unqualified one. `init_end` is the last token of the
    /// initializer, which must not come before the rest of the declarator.
    pub(crate) fn declarator_range(
        &self,
        type_loc: TypeLoc,
        name: Option<(Loc, Loc)>,
        init_end: Option<Loc>,
    ) -> Result<Option<TokenRange>> {
        let mut start = self.declarator_start(type_loc);
        let mut end = self.sema[type_loc].range.end;
        if let Some((name_start, name_loc)) = name {
            start = start.or(Some(name_start));
            end = end.max(name_loc);
        }
        if let Some(init_end) = init_end {
            if init_end < end {
                return Err(BuildError::InitializerBeforeDeclarator { end, init: init_end });
            }
            end = init_end;
        }

        start.map(|start| self.locator.span(start, end)).transpose()
    }

    /// The `->` and the tokens of a trailing return type, arrow included.
    pub(crate) fn trailing_return(&self, return_type: TypeLoc) -> Result<(TokenId, TokenRange)> {
        let range = self.range(self.sema[return_type].range)?;
        let arrow = match range.start.prev() {
            Some(arrow) if self.tokens.kind(arrow) == SyntaxKind::ARROW => arrow,
            prev => {
                let token = prev.unwrap_or(range.start);
                return Err(BuildError::UnexpectedToken {
                    token,
                    expected: SyntaxKind::ARROW,
                    found: self.tokens.kind(token),
                });
            }
        };
        Ok((arrow, TokenRange::new(arrow, range.end)))
    }

    /// Tokens of one name specifier segment and the `::` closing it.
    pub(crate) fn name_specifier(&self, qualifier: Qualifier) -> Result<(TokenRange, TokenId)> {
        let data = &self.sema[qualifier];
        let mut local = self.range(data.local)?;
        // The front end reports the whole chain for dependent template
        // segments.
        if let QualifierKind::DependentTemplate { template_kw } = data.kind {
            local.start = self.locator.find(template_kw)?;
        }

        let delimiter = local.last().ok_or(BuildError::EmptyRange(local))?;
        let found = self.tokens.kind(delimiter);
        if found != SyntaxKind::COLON2 {
            return Err(BuildError::UnexpectedToken {
                token: delimiter,
                expected: SyntaxKind::COLON2,
                found,
            });
        }

        Ok((TokenRange::new(local.start, delimiter), delimiter))
    }
}
