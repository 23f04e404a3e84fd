use cinder_sema::{
    Decl, Expr, ExprKind, Loc, Qualifier, SemaNode, SemaTree, SourceRange, Stmt, StmtKind, TypeLoc,
};
use cinder_syntax::{NodeId, NodeRole, SyntaxArena, SyntaxKind, TokenBuffer, TokenId, TokenRange};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::forest::Forest;
use crate::locator::Locator;
use crate::mapping::Mapping;
use crate::range::RangeResolver;
use crate::{BuildOptions, Result};

/// Folds pending subtrees into new nodes on behalf of the traversal.
///
/// Every node is built the same way: give roles to the pending children that
/// need one, then fold the node's tokens into a new tree. Children left
/// without a role end up as `Unknown`.
pub(crate) struct TreeBuilder<'a, 't> {
    arena: &'a mut SyntaxArena<'t>,
    sema: &'a SemaTree,
    tokens: &'t TokenBuffer,
    locator: Locator,
    forest: Forest,
    mapping: Mapping,
    without_semicolon: FxHashSet<Decl>,
    options: BuildOptions,
    folds: usize,
}

impl<'a, 't> TreeBuilder<'a, 't> {
    pub(crate) fn new(
        arena: &'a mut SyntaxArena<'t>,
        sema: &'a SemaTree,
        options: BuildOptions,
    ) -> Result<Self> {
        let tokens = arena.tokens();
        let locator = Locator::new(tokens)?;
        let forest = Forest::new(arena);
        debug!(tokens = forest.len(), "building syntax tree");

        Ok(Self {
            arena,
            sema,
            tokens,
            locator,
            forest,
            mapping: Mapping::default(),
            without_semicolon: FxHashSet::default(),
            options,
            folds: 0,
        })
    }

    pub(crate) fn tokens(&self) -> &'t TokenBuffer {
        self.tokens
    }

    fn resolver(&self) -> RangeResolver<'_> {
        RangeResolver::new(self.sema, self.tokens, &self.locator)
    }

    pub(crate) fn find_token(&self, loc: Loc) -> Result<TokenId> {
        self.locator.find(loc)
    }

    pub(crate) fn range(&self, range: SourceRange) -> Result<TokenRange> {
        self.locator.range(range)
    }

    pub(crate) fn span(&self, first: Loc, last: Loc) -> Result<TokenRange> {
        self.locator.span(first, last)
    }

    pub(crate) fn expr_range(&self, expr: Expr) -> Result<TokenRange> {
        self.resolver().expr_range(expr)
    }

    pub(crate) fn stmt_range(&self, stmt: Stmt) -> Result<TokenRange> {
        self.resolver().stmt_range(stmt)
    }

    pub(crate) fn decl_range(&self, decl: Decl) -> Result<TokenRange> {
        self.resolver().decl_range(decl, &self.without_semicolon)
    }

    pub(crate) fn with_trailing_semicolon(&self, range: TokenRange) -> Result<TokenRange> {
        self.resolver().with_trailing_semicolon(range)
    }

    pub(crate) fn declarator_range(
        &self,
        type_loc: TypeLoc,
        name: Option<(Loc, Loc)>,
        init_end: Option<Loc>,
    ) -> Result<Option<TokenRange>> {
        self.resolver().declarator_range(type_loc, name, init_end)
    }

    pub(crate) fn trailing_return(&self, return_type: TypeLoc) -> Result<(TokenId, TokenRange)> {
        self.resolver().trailing_return(return_type)
    }

    pub(crate) fn name_specifier(&self, qualifier: Qualifier) -> Result<(TokenRange, TokenId)> {
        self.resolver().name_specifier(qualifier)
    }

    /// Folds `range` into a new `kind` node, owned by `owner` if given.
    pub(crate) fn fold_node(
        &mut self,
        range: TokenRange,
        kind: SyntaxKind,
        owner: Option<SemaNode>,
    ) -> Result<NodeId> {
        let node = match self.forest.fold(self.arena, range, kind) {
            Ok(node) => node,
            Err(error) => {
                debug!(%error, pending = %self.forest.dump(self.arena), "fold failed");
                return Err(error);
            }
        };
        self.folds += 1;
        if let Some(owner) = owner {
            self.mapping.add(owner, node)?;
        }
        Ok(node)
    }

    /// Gives `role` to the token at `loc`; absent tokens are skipped.
    pub(crate) fn mark_child_token(&mut self, loc: Option<Loc>, role: NodeRole) -> Result<()> {
        match loc {
            Some(loc) => self.mark_token(self.find_token(loc)?, role),
            None => Ok(()),
        }
    }

    pub(crate) fn mark_token(&mut self, token: TokenId, role: NodeRole) -> Result<()> {
        self.forest.assign_role(self.arena, TokenRange::new(token, token.next()), role)?;
        Ok(())
    }

    /// Gives `role` to the pending tree covering exactly `range`.
    pub(crate) fn mark_range(&mut self, range: TokenRange, role: NodeRole) -> Result<()> {
        self.forest.assign_role(self.arena, range, role)?;
        Ok(())
    }

    pub(crate) fn mark_child(&mut self, node: NodeId, role: NodeRole) -> Result<()> {
        self.forest.assign_role_to(self.arena, node, role)
    }

    /// Gives `role` to the node built for `owner`.
    pub(crate) fn mark_sema_child(
        &mut self,
        owner: impl Into<SemaNode>,
        role: NodeRole,
    ) -> Result<()> {
        let node = self.mapping.find(owner.into())?;
        self.mark_child(node, role)
    }

    /// Marks a statement child, wrapping expressions into an expression
    /// statement first.
    pub(crate) fn mark_stmt_child(&mut self, stmt: Option<Stmt>, role: NodeRole) -> Result<()> {
        let Some(stmt) = stmt else {
            return Ok(());
        };

        let node = match self.sema[stmt].kind {
            StmtKind::Expr(expr) => {
                self.mark_expr_child(Some(expr), NodeRole::Expression)?;
                let range = self.stmt_range(stmt)?;
                self.fold_node(range, SyntaxKind::EXPRESSION_STATEMENT, None)?
            }
            _ => self.mapping.find(stmt.into())?,
        };
        self.mark_child(node, role)
    }

    /// Marks an expression child, looking through implicit wrappers.
    pub(crate) fn mark_expr_child(&mut self, expr: Option<Expr>, role: NodeRole) -> Result<()> {
        let Some(mut expr) = expr else {
            return Ok(());
        };
        while let ExprKind::Implicit { sub } = self.sema[expr].kind {
            expr = sub;
        }
        self.mark_sema_child(expr, role)
    }

    /// Keeps the `;` after `decl` out of its range; the enclosing declaration
    /// statement claims it instead.
    pub(crate) fn notice_decl_without_semicolon(&mut self, decl: Decl) {
        self.without_semicolon.insert(decl);
    }

    /// Folds what is left into the translation unit and returns its root.
    pub(crate) fn finalize(mut self) -> Result<NodeId> {
        let spelled = self.tokens.spelled();
        if spelled.is_empty() {
            debug!("empty translation unit");
            return Ok(self.arena.alloc_tree(SyntaxKind::TRANSLATION_UNIT, spelled, Vec::new()));
        }

        self.fold_node(spelled, SyntaxKind::TRANSLATION_UNIT, None)?;

        let folds = self.folds;
        let root = self.forest.finalize()?;
        if self.options.verify {
            self.arena.check_invariants(root)?;
        }

        debug!(tokens = spelled.len(), folds, nodes = self.arena.len(), "syntax tree finalized");
        Ok(root)
    }
}
