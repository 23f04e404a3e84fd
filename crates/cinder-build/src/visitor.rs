use cinder_sema::{
    Decl, DeclKind, DeclaratorDecl, Expr, ExprKind, IdExpr, Loc, LiteralOperatorKind,
    OverloadedOperator, Qualifier, QualifierKind, SemaNode, SemaTree, SourceRange, Stmt, StmtKind,
    TagDecl, TypeLoc, TypeLocKind,
};
use cinder_syntax::{NodeId, NodeRole, SyntaxKind, TokenId, TokenRange};

use crate::builder::TreeBuilder;
use crate::{BuildError, Result};

/// Walks the semantic tree children first and folds a node for every
/// construct on the way back up.
pub(crate) struct Visitor<'a, 't> {
    sema: &'a SemaTree,
    builder: TreeBuilder<'a, 't>,
}

impl<'a, 't> Visitor<'a, 't> {
    pub(crate) fn new(sema: &'a SemaTree, builder: TreeBuilder<'a, 't>) -> Self {
        Self { sema, builder }
    }

    pub(crate) fn finish(self) -> Result<NodeId> {
        self.builder.finalize()
    }

    /// Declarations of one context, each aware of its next sibling.
    fn traverse_decls(&mut self, decls: &[Decl]) -> Result<()> {
        for (index, &decl) in decls.iter().enumerate() {
            self.traverse_decl(decl, decls.get(index + 1).copied())?;
        }
        Ok(())
    }

    pub(crate) fn traverse_decl(&mut self, decl: Decl, next: Option<Decl>) -> Result<()> {
        let sema = self.sema;
        match &sema[decl].kind {
            DeclKind::TranslationUnit { decls } => self.traverse_decls(decls),
            DeclKind::Var(declarator)
            | DeclKind::Field(declarator)
            | DeclKind::Param(declarator) => {
                self.traverse_declarator_decl(declarator)?;
                self.build_declarator_decl(decl, declarator, next)
            }
            DeclKind::Function { declarator, body } => {
                self.traverse_declarator_decl(declarator)?;
                if let Some(body) = body {
                    self.traverse_stmt(*body)?;
                }
                self.build_declarator_decl(decl, declarator, next)
            }
            DeclKind::Typedef { type_loc, name } => {
                self.traverse_type_loc(*type_loc)?;
                let name = name.map(|name| (name, name));
                self.build_simple_declaration(decl, *type_loc, name, None, next)
            }
            DeclKind::TypeAlias { type_loc } => {
                self.traverse_type_loc(*type_loc)?;
                self.fold_decl(decl, SyntaxKind::TYPE_ALIAS_DECLARATION)
            }
            DeclKind::Tag(tag) => self.traverse_tag(decl, tag),
            DeclKind::Template { template_loc, params, templated } => {
                self.traverse_decls(params)?;
                self.traverse_decl(*templated, None)?;

                let range = self.builder.decl_range(decl)?;
                let inner = self.builder.decl_range(*templated)?;
                let keyword = self.builder.find_token(*template_loc)?;
                self.fold_template_declaration(range, keyword, inner, Some(decl.into()))?;
                Ok(())
            }
            DeclKind::Namespace { decls } => {
                self.traverse_decls(decls)?;

                let range = self.builder.decl_range(decl)?;
                // `b` in `namespace a::b {}` starts at the `::` and is covered
                // by the node for `a`.
                if self.builder.tokens().kind(range.start) == SyntaxKind::COLON2 {
                    return Ok(());
                }
                self.builder.fold_node(range, SyntaxKind::NAMESPACE_DEFINITION, Some(decl.into()))?;
                Ok(())
            }
            DeclKind::NamespaceAlias { qualifier } => {
                self.traverse_qualifier(*qualifier)?;
                self.fold_decl(decl, SyntaxKind::NAMESPACE_ALIAS_DEFINITION)
            }
            DeclKind::UsingDirective { qualifier } => {
                self.traverse_qualifier(*qualifier)?;
                self.fold_decl(decl, SyntaxKind::USING_NAMESPACE_DIRECTIVE)
            }
            DeclKind::Using { qualifier } => {
                self.traverse_qualifier(*qualifier)?;
                self.fold_decl(decl, SyntaxKind::USING_DECLARATION)
            }
            DeclKind::Empty => self.fold_decl(decl, SyntaxKind::EMPTY_DECLARATION),
            DeclKind::StaticAssert { condition, message } => {
                self.traverse_expr(*condition)?;
                if let Some(message) = message {
                    self.traverse_expr(*message)?;
                }

                self.builder.mark_expr_child(Some(*condition), NodeRole::Condition)?;
                self.builder.mark_expr_child(*message, NodeRole::Message)?;
                self.fold_decl(decl, SyntaxKind::STATIC_ASSERT_DECLARATION)
            }
            DeclKind::LinkageSpec { decls, .. } => {
                self.traverse_decls(decls)?;
                self.fold_decl(decl, SyntaxKind::LINKAGE_SPECIFICATION_DECLARATION)
            }
            DeclKind::Unknown { exprs } => {
                for &expr in exprs {
                    self.traverse_expr(expr)?;
                }
                self.fold_decl(decl, SyntaxKind::UNKNOWN_DECLARATION)
            }
        }
    }

    fn fold_decl(&mut self, decl: Decl, kind: SyntaxKind) -> Result<()> {
        let range = self.builder.decl_range(decl)?;
        self.builder.fold_node(range, kind, Some(decl.into()))?;
        Ok(())
    }

    fn traverse_declarator_decl(&mut self, declarator: &DeclaratorDecl) -> Result<()> {
        self.traverse_qualifier(declarator.qualifier)?;
        self.traverse_type_loc(declarator.type_loc)?;
        match declarator.init {
            Some(init) if !declarator.for_range => self.traverse_expr(init),
            _ => Ok(()),
        }
    }

    fn build_declarator_decl(
        &mut self,
        decl: Decl,
        declarator: &DeclaratorDecl,
        next: Option<Decl>,
    ) -> Result<()> {
        let sema = self.sema;
        let name = declarator.name.map(|name| {
            let start = declarator.qualifier.map_or(name, |qualifier| sema[qualifier].range.begin);
            (start, name)
        });
        // The loop variable of a range-based `for` is initialized from the
        // range, which is not part of its declarator.
        let init_end = match declarator.init {
            Some(init) if !declarator.for_range => self.spelled_range(init).map(|range| range.end),
            _ => None,
        };
        self.build_simple_declaration(decl, declarator.type_loc, name, init_end, next)
    }

    fn build_simple_declaration(
        &mut self,
        decl: Decl,
        type_loc: TypeLoc,
        name: Option<(Loc, Loc)>,
        init_end: Option<Loc>,
        next: Option<Decl>,
    ) -> Result<()> {
        // `void f(int)` has a declaration but no declarator for its parameter.
        if let Some(range) = self.builder.declarator_range(type_loc, name, init_end)? {
            let declarator = self.builder.fold_node(range, SyntaxKind::SIMPLE_DECLARATOR, None)?;
            self.builder.mark_child(declarator, NodeRole::Declarator)?;
        }

        if self.is_responsible(decl, next) {
            self.fold_decl(decl, SyntaxKind::SIMPLE_DECLARATION)?;
        }
        Ok(())
    }

    /// Only the last declarator of `int a, *b;` folds the declaration.
    fn is_responsible(&self, decl: Decl, next: Option<Decl>) -> bool {
        let Some(next) = next else {
            return true;
        };
        let (this, next) = (&self.sema[decl], &self.sema[next]);
        let family = this.kind.family();
        family.is_none() || family != next.kind.family() || this.range.begin != next.range.begin
    }

    fn traverse_tag(&mut self, decl: Decl, tag: &TagDecl) -> Result<()> {
        if let Some(partial) = &tag.partial_params {
            self.traverse_decls(&partial.params)?;
        }
        for header in &tag.template_params {
            self.traverse_decls(&header.params)?;
        }
        self.traverse_qualifier(tag.qualifier)?;
        self.traverse_decls(&tag.members)?;

        if !tag.free_standing {
            return Ok(());
        }

        let declaration = self.build_free_standing_tag(decl, tag)?;
        let Some(instantiation) = tag.instantiation else {
            return Ok(());
        };

        if let Some(extern_loc) = instantiation.extern_loc {
            let keyword = self.builder.find_token(extern_loc)?;
            self.expect_token(keyword, SyntaxKind::EXTERN_KW)?;
            self.builder.mark_token(keyword, NodeRole::ExternKeyword)?;
        }
        let keyword = self.builder.find_token(instantiation.template_loc)?;
        self.expect_token(keyword, SyntaxKind::TEMPLATE_KW)?;
        self.builder.mark_token(keyword, NodeRole::IntroducerKeyword)?;
        self.builder.mark_child(declaration, NodeRole::Declaration)?;

        let range = self.builder.range(instantiation.range)?;
        let range = self.builder.with_trailing_semicolon(range)?;
        let kind = SyntaxKind::EXPLICIT_TEMPLATE_INSTANTIATION;
        self.builder.fold_node(range, kind, Some(decl.into()))?;
        Ok(())
    }

    /// A tag declared on its own gets a declaration node, wrapped in one
    /// template declaration per template header in front of it.
    fn build_free_standing_tag(&mut self, decl: Decl, tag: &TagDecl) -> Result<NodeId> {
        let mut range = self.builder.decl_range(decl)?;
        let mut declaration = self.builder.fold_node(range, SyntaxKind::SIMPLE_DECLARATION, None)?;

        let headers = tag.partial_params.iter().chain(tag.template_params.iter().rev());
        for header in headers {
            let keyword = self.builder.find_token(header.template_loc)?;
            let outer = TokenRange::new(keyword, range.end);
            declaration = self.fold_template_declaration(outer, keyword, range, None)?;
            range = outer;
        }
        Ok(declaration)
    }

    fn fold_template_declaration(
        &mut self,
        range: TokenRange,
        keyword: TokenId,
        templated: TokenRange,
        owner: Option<SemaNode>,
    ) -> Result<NodeId> {
        self.expect_token(keyword, SyntaxKind::TEMPLATE_KW)?;
        self.builder.mark_token(keyword, NodeRole::IntroducerKeyword)?;
        self.builder.mark_range(templated, NodeRole::Declaration)?;
        self.builder.fold_node(range, SyntaxKind::TEMPLATE_DECLARATION, owner)
    }

    fn expect_token(&self, token: TokenId, expected: SyntaxKind) -> Result<()> {
        let found = self.builder.tokens().kind(token);
        if found != expected {
            return Err(BuildError::UnexpectedToken { token, expected, found });
        }
        Ok(())
    }

    fn traverse_stmt(&mut self, stmt: Stmt) -> Result<()> {
        let sema = self.sema;
        match &sema[stmt].kind {
            StmtKind::Compound { lbrace, body, rbrace } => {
                for &child in body {
                    self.traverse_stmt(child)?;
                }

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*lbrace), NodeRole::OpenParen)?;
                for &child in body {
                    builder.mark_stmt_child(Some(child), NodeRole::Statement)?;
                }
                builder.mark_child_token(Some(*rbrace), NodeRole::CloseParen)?;
                self.fold_stmt(stmt, SyntaxKind::COMPOUND_STATEMENT)
            }
            StmtKind::Decl { decls } => {
                for &decl in decls {
                    self.builder.notice_decl_without_semicolon(decl);
                }
                self.traverse_decls(decls)?;
                self.fold_stmt(stmt, SyntaxKind::DECLARATION_STATEMENT)
            }
            StmtKind::Null => self.fold_stmt(stmt, SyntaxKind::EMPTY_STATEMENT),
            StmtKind::Switch { switch_loc, init, condition, body } => {
                if let Some(init) = init {
                    self.traverse_stmt(*init)?;
                }
                self.traverse_expr(*condition)?;
                self.traverse_stmt(*body)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*switch_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*body), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::SWITCH_STATEMENT)
            }
            StmtKind::Case { keyword, value, sub } => {
                self.traverse_expr(*value)?;
                self.traverse_stmt(*sub)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*keyword), NodeRole::IntroducerKeyword)?;
                builder.mark_expr_child(Some(*value), NodeRole::CaseValue)?;
                builder.mark_stmt_child(Some(*sub), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::CASE_STATEMENT)
            }
            StmtKind::Default { keyword, sub } => {
                self.traverse_stmt(*sub)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*keyword), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*sub), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::DEFAULT_STATEMENT)
            }
            StmtKind::If { if_loc, init, condition, then, else_loc, else_ } => {
                if let Some(init) = init {
                    self.traverse_stmt(*init)?;
                }
                self.traverse_expr(*condition)?;
                self.traverse_stmt(*then)?;
                if let Some(else_) = else_ {
                    self.traverse_stmt(*else_)?;
                }

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*if_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*then), NodeRole::ThenStatement)?;
                builder.mark_child_token(*else_loc, NodeRole::ElseKeyword)?;
                builder.mark_stmt_child(*else_, NodeRole::ElseStatement)?;
                self.fold_stmt(stmt, SyntaxKind::IF_STATEMENT)
            }
            StmtKind::For { for_loc, init, condition, increment, body } => {
                if let Some(init) = init {
                    self.traverse_stmt(*init)?;
                }
                for expr in [condition, increment].into_iter().flatten() {
                    self.traverse_expr(*expr)?;
                }
                self.traverse_stmt(*body)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*for_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*body), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::FOR_STATEMENT)
            }
            StmtKind::While { while_loc, condition, body } => {
                self.traverse_expr(*condition)?;
                self.traverse_stmt(*body)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*while_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*body), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::WHILE_STATEMENT)
            }
            StmtKind::Continue { loc } => {
                self.builder.mark_child_token(Some(*loc), NodeRole::IntroducerKeyword)?;
                self.fold_stmt(stmt, SyntaxKind::CONTINUE_STATEMENT)
            }
            StmtKind::Break { loc } => {
                self.builder.mark_child_token(Some(*loc), NodeRole::IntroducerKeyword)?;
                self.fold_stmt(stmt, SyntaxKind::BREAK_STATEMENT)
            }
            StmtKind::Return { return_loc, value } => {
                if let Some(value) = value {
                    self.traverse_expr(*value)?;
                }

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*return_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_expr_child(*value, NodeRole::ReturnValue)?;
                self.fold_stmt(stmt, SyntaxKind::RETURN_STATEMENT)
            }
            StmtKind::ForRange { for_loc, init, loop_var, range_init, body } => {
                if let Some(init) = init {
                    self.traverse_stmt(*init)?;
                }
                self.traverse_decl(*loop_var, None)?;
                self.traverse_expr(*range_init)?;
                self.traverse_stmt(*body)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*for_loc), NodeRole::IntroducerKeyword)?;
                builder.mark_stmt_child(Some(*body), NodeRole::BodyStatement)?;
                self.fold_stmt(stmt, SyntaxKind::RANGE_BASED_FOR_STATEMENT)
            }
            // The expression statement itself is folded by whoever marks it.
            StmtKind::Expr(expr) => self.traverse_expr(*expr),
            StmtKind::Unknown { children } => {
                for &child in children {
                    self.traverse_stmt(child)?;
                }
                self.fold_stmt(stmt, SyntaxKind::UNKNOWN_STATEMENT)
            }
        }
    }

    fn fold_stmt(&mut self, stmt: Stmt, kind: SyntaxKind) -> Result<()> {
        let range = self.builder.stmt_range(stmt)?;
        self.builder.fold_node(range, kind, Some(stmt.into()))?;
        Ok(())
    }

    /// Range of the first spelled expression at or under `expr`.
    fn spelled_range(&self, mut expr: Expr) -> Option<SourceRange> {
        loop {
            let data = &self.sema[expr];
            match (data.range, &data.kind) {
                (Some(range), _) => return Some(range),
                (None, ExprKind::Implicit { sub }) => expr = *sub,
                (None, _) => return None,
            }
        }
    }

    fn traverse_expr(&mut self, expr: Expr) -> Result<()> {
        let sema = self.sema;
        match &sema[expr].kind {
            ExprKind::IntegerLiteral => {
                self.build_literal(expr, SyntaxKind::INTEGER_LITERAL_EXPRESSION)
            }
            ExprKind::CharacterLiteral => {
                self.build_literal(expr, SyntaxKind::CHARACTER_LITERAL_EXPRESSION)
            }
            ExprKind::FloatingLiteral => {
                self.build_literal(expr, SyntaxKind::FLOATING_LITERAL_EXPRESSION)
            }
            ExprKind::StringLiteral => {
                self.build_literal(expr, SyntaxKind::STRING_LITERAL_EXPRESSION)
            }
            ExprKind::BoolLiteral => self.build_literal(expr, SyntaxKind::BOOL_LITERAL_EXPRESSION),
            ExprKind::NullPtrLiteral => {
                self.build_literal(expr, SyntaxKind::CXX_NULL_PTR_EXPRESSION)
            }
            ExprKind::UserDefinedLiteral(operator) => {
                let kind = self.user_defined_literal_kind(expr, *operator)?;
                self.build_literal(expr, kind)
            }
            ExprKind::DeclRef(id) | ExprKind::DependentScopeDeclRef(id) => {
                self.traverse_qualifier(id.qualifier)?;
                self.build_id_expression(id, Some(expr.into()))?;
                Ok(())
            }
            ExprKind::Member { base, operator_loc, id, implicit } => {
                self.traverse_expr(*base)?;
                self.traverse_qualifier(id.qualifier)?;

                // `x` meaning `this->x` is an id-expression like any other.
                if *implicit {
                    self.build_id_expression(id, Some(expr.into()))?;
                    return Ok(());
                }

                let member = self.build_id_expression(id, None)?;
                let builder = &mut self.builder;
                builder.mark_child(member, NodeRole::Member)?;
                builder.mark_expr_child(Some(*base), NodeRole::Object)?;
                builder.mark_child_token(Some(*operator_loc), NodeRole::AccessToken)?;
                self.fold_expr(expr, SyntaxKind::MEMBER_EXPRESSION)
            }
            ExprKind::This { implicit: true } => Ok(()),
            ExprKind::This { implicit: false } => {
                let range = self.builder.expr_range(expr)?;
                self.builder.mark_token(range.start, NodeRole::IntroducerKeyword)?;
                self.fold_expr(expr, SyntaxKind::THIS_EXPRESSION)
            }
            ExprKind::Paren { lparen, sub, rparen } => {
                self.traverse_expr(*sub)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*lparen), NodeRole::OpenParen)?;
                builder.mark_expr_child(Some(*sub), NodeRole::SubExpression)?;
                builder.mark_child_token(Some(*rparen), NodeRole::CloseParen)?;
                self.fold_expr(expr, SyntaxKind::PAREN_EXPRESSION)
            }
            ExprKind::Unary { operator_loc, postfix, operand } => {
                self.traverse_expr(*operand)?;

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*operator_loc), NodeRole::OperatorToken)?;
                builder.mark_expr_child(Some(*operand), NodeRole::Operand)?;
                let kind = if *postfix {
                    SyntaxKind::POSTFIX_UNARY_OPERATOR_EXPRESSION
                } else {
                    SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION
                };
                self.fold_expr(expr, kind)
            }
            ExprKind::Binary { lhs, operator_loc, rhs } => {
                self.traverse_expr(*lhs)?;
                self.traverse_expr(*rhs)?;

                let builder = &mut self.builder;
                builder.mark_expr_child(Some(*lhs), NodeRole::LeftHandSide)?;
                builder.mark_child_token(Some(*operator_loc), NodeRole::OperatorToken)?;
                builder.mark_expr_child(Some(*rhs), NodeRole::RightHandSide)?;
                self.fold_expr(expr, SyntaxKind::BINARY_OPERATOR_EXPRESSION)
            }
            ExprKind::OperatorCall { operator, operator_loc, args } => {
                self.traverse_operator_call(expr, *operator, *operator_loc, args)
            }
            ExprKind::Implicit { sub } => self.traverse_expr(*sub),
            ExprKind::Unknown { children } => {
                for &child in children {
                    self.traverse_expr(child)?;
                }
                self.fold_expr(expr, SyntaxKind::UNKNOWN_EXPRESSION)
            }
        }
    }

    fn fold_expr(&mut self, expr: Expr, kind: SyntaxKind) -> Result<()> {
        let range = self.builder.expr_range(expr)?;
        self.builder.fold_node(range, kind, Some(expr.into()))?;
        Ok(())
    }

    fn build_literal(&mut self, expr: Expr, kind: SyntaxKind) -> Result<()> {
        let range = self.builder.expr_range(expr)?;
        self.builder.mark_token(range.start, NodeRole::LiteralToken)?;
        self.builder.fold_node(range, kind, Some(expr.into()))?;
        Ok(())
    }

    fn user_defined_literal_kind(
        &self,
        expr: Expr,
        operator: LiteralOperatorKind,
    ) -> Result<SyntaxKind> {
        let kind = match operator {
            LiteralOperatorKind::Integer => SyntaxKind::INTEGER_USER_DEFINED_LITERAL_EXPRESSION,
            LiteralOperatorKind::Floating => SyntaxKind::FLOAT_USER_DEFINED_LITERAL_EXPRESSION,
            LiteralOperatorKind::Character => SyntaxKind::CHAR_USER_DEFINED_LITERAL_EXPRESSION,
            LiteralOperatorKind::String => SyntaxKind::STRING_USER_DEFINED_LITERAL_EXPRESSION,
            // The operator receives the spelling, so only the spelling tells
            // integers and floats apart.
            LiteralOperatorKind::Raw | LiteralOperatorKind::Template => {
                let token = self.builder.expr_range(expr)?.start;
                if is_floating_spelling(self.builder.tokens().token_text(token)) {
                    SyntaxKind::FLOAT_USER_DEFINED_LITERAL_EXPRESSION
                } else {
                    SyntaxKind::INTEGER_USER_DEFINED_LITERAL_EXPRESSION
                }
            }
        };
        Ok(kind)
    }

    /// Builds `qualifier template name` as an id-expression.
    fn build_id_expression(&mut self, id: &IdExpr, owner: Option<SemaNode>) -> Result<NodeId> {
        let builder = &mut self.builder;
        if let Some(qualifier) = id.qualifier {
            builder.mark_sema_child(qualifier, NodeRole::Qualifier)?;
            builder.mark_child_token(id.template_kw, NodeRole::TemplateKeyword)?;
        }

        let name = builder.range(id.name)?;
        let unqualified = builder.fold_node(name, SyntaxKind::UNQUALIFIED_ID, None)?;
        builder.mark_child(unqualified, NodeRole::UnqualifiedId)?;

        let sema = self.sema;
        let begin = id.qualifier.map_or(id.name.begin, |qualifier| sema[qualifier].range.begin);
        let range = builder.span(begin, id.name.end)?;
        builder.fold_node(range, SyntaxKind::ID_EXPRESSION, owner)
    }

    /// Calls to overloaded operators get the shape of the built-in operator;
    /// the callee itself is just the operator token.
    fn traverse_operator_call(
        &mut self,
        expr: Expr,
        operator: OverloadedOperator,
        operator_loc: Loc,
        args: &[Expr],
    ) -> Result<()> {
        for &arg in args {
            // Postfix `++`/`--` carry an extra operand that is not spelled.
            if self.spelled_range(arg).is_none() {
                continue;
            }
            self.traverse_expr(arg)?;
        }

        let kind = operator_call_kind(operator, args.len());
        let builder = &mut self.builder;
        match kind {
            SyntaxKind::BINARY_OPERATOR_EXPRESSION => {
                builder.mark_expr_child(args.first().copied(), NodeRole::LeftHandSide)?;
                builder.mark_child_token(Some(operator_loc), NodeRole::OperatorToken)?;
                builder.mark_expr_child(args.get(1).copied(), NodeRole::RightHandSide)?;
            }
            SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION
            | SyntaxKind::POSTFIX_UNARY_OPERATOR_EXPRESSION => {
                builder.mark_child_token(Some(operator_loc), NodeRole::OperatorToken)?;
                builder.mark_expr_child(args.first().copied(), NodeRole::Operand)?;
            }
            _ => {}
        }
        self.fold_expr(expr, kind)
    }

    /// Folds declarator chunks from the one closest to the name inward, so
    /// that a chunk is built before any chunk it encloses.
    fn traverse_type_loc(&mut self, type_loc: TypeLoc) -> Result<()> {
        let sema = self.sema;
        match &sema[type_loc].kind {
            TypeLocKind::Named { qualifier } => self.traverse_qualifier(*qualifier),
            TypeLocKind::Qualified { inner } => self.traverse_type_loc(*inner),
            TypeLocKind::Pointer { pointee, .. } => self.traverse_type_loc(*pointee),
            TypeLocKind::MemberPointer { local, pointee } => {
                let range = self.builder.range(*local)?;
                self.builder.fold_node(range, SyntaxKind::MEMBER_POINTER, None)?;
                self.traverse_type_loc(*pointee)
            }
            TypeLocKind::Paren { lparen, rparen, inner } => {
                let builder = &mut self.builder;
                builder.mark_child_token(Some(*lparen), NodeRole::OpenParen)?;
                builder.mark_child_token(Some(*rparen), NodeRole::CloseParen)?;
                let range = builder.span(*lparen, *rparen)?;
                builder.fold_node(range, SyntaxKind::PAREN_DECLARATOR, None)?;
                self.traverse_type_loc(*inner)
            }
            TypeLocKind::Array { lbracket, size, rbracket, element } => {
                if let Some(size) = size {
                    self.traverse_expr(*size)?;
                }

                let builder = &mut self.builder;
                builder.mark_child_token(Some(*lbracket), NodeRole::OpenParen)?;
                builder.mark_expr_child(*size, NodeRole::SizeExpression)?;
                builder.mark_child_token(Some(*rbracket), NodeRole::CloseParen)?;
                let range = builder.span(*lbracket, *rbracket)?;
                builder.fold_node(range, SyntaxKind::ARRAY_SUBSCRIPT, None)?;
                self.traverse_type_loc(*element)
            }
            TypeLocKind::Function { lparen, rparen, end, params, return_type, trailing_return } => {
                self.traverse_decls(params)?;

                // The return type of `int (*f(int))[3]` surrounds the
                // parameters, so it is built after them.
                let chunk = (*lparen, *rparen, *end);
                if !*trailing_return {
                    self.build_parameters_and_qualifiers(chunk, params, None)?;
                    return self.traverse_type_loc(*return_type);
                }

                self.traverse_type_loc(*return_type)?;
                let trailing = self.build_trailing_return(*return_type)?;
                self.build_parameters_and_qualifiers(chunk, params, Some(trailing))
            }
            TypeLocKind::Decltype { expr } => self.traverse_expr(*expr),
        }
    }

    /// `( params ) qualifiers`, up to the end of the function chunk.
    fn build_parameters_and_qualifiers(
        &mut self,
        (lparen, rparen, end): (Loc, Loc, Loc),
        params: &[Decl],
        trailing: Option<NodeId>,
    ) -> Result<()> {
        let builder = &mut self.builder;
        builder.mark_child_token(Some(lparen), NodeRole::OpenParen)?;
        for &param in params {
            builder.mark_sema_child(param, NodeRole::Parameter)?;
        }
        builder.mark_child_token(Some(rparen), NodeRole::CloseParen)?;
        if let Some(trailing) = trailing {
            builder.mark_child(trailing, NodeRole::TrailingReturn)?;
        }

        let range = builder.span(lparen, end)?;
        builder.fold_node(range, SyntaxKind::PARAMETERS_AND_QUALIFIERS, None)?;
        Ok(())
    }

    /// `-> T` with `T`'s own declarator, if it has one.
    fn build_trailing_return(&mut self, return_type: TypeLoc) -> Result<NodeId> {
        let builder = &mut self.builder;
        let declarator = match builder.declarator_range(return_type, None, None)? {
            Some(range) => Some(builder.fold_node(range, SyntaxKind::SIMPLE_DECLARATOR, None)?),
            None => None,
        };

        let (arrow, range) = builder.trailing_return(return_type)?;
        builder.mark_token(arrow, NodeRole::ArrowToken)?;
        if let Some(declarator) = declarator {
            builder.mark_child(declarator, NodeRole::Declarator)?;
        }
        builder.fold_node(range, SyntaxKind::TRAILING_RETURN_TYPE, None)
    }

    /// Builds the segments of a qualifier chain as a list, last segment
    /// first, then the whole chain.
    fn traverse_qualifier(&mut self, qualifier: Option<Qualifier>) -> Result<()> {
        let Some(qualifier) = qualifier else {
            return Ok(());
        };

        let sema = self.sema;
        let mut segment = Some(qualifier);
        while let Some(current) = segment {
            let data = &sema[current];
            let (tokens, delimiter) = self.builder.name_specifier(current)?;
            let specifier = match data.kind {
                QualifierKind::Global => None,
                QualifierKind::Identifier | QualifierKind::Namespace | QualifierKind::TypeSpec => {
                    if tokens.len() != 1 {
                        return Err(BuildError::SpecifierTokenCount {
                            range: tokens,
                            len: tokens.len(),
                        });
                    }
                    self.builder.mark_token(tokens.start, NodeRole::Unknown)?;
                    Some(self.builder.fold_node(
                        tokens,
                        SyntaxKind::IDENTIFIER_NAME_SPECIFIER,
                        None,
                    )?)
                }
                QualifierKind::TemplateSpec | QualifierKind::DependentTemplate { .. } => {
                    let kind = SyntaxKind::SIMPLE_TEMPLATE_NAME_SPECIFIER;
                    Some(self.builder.fold_node(tokens, kind, None)?)
                }
                QualifierKind::Decltype { expr } => {
                    self.traverse_expr(expr)?;
                    Some(self.builder.fold_node(tokens, SyntaxKind::DECLTYPE_NAME_SPECIFIER, None)?)
                }
            };

            if let Some(specifier) = specifier {
                self.builder.mark_child(specifier, NodeRole::ListElement)?;
            }
            self.builder.mark_token(delimiter, NodeRole::ListDelimiter)?;
            segment = data.prefix;
        }

        let range = self.builder.range(sema[qualifier].range)?;
        self.builder.fold_node(range, SyntaxKind::NESTED_NAME_SPECIFIER, Some(qualifier.into()))?;
        Ok(())
    }
}

/// Node kind for a call to an overloaded operator with `args` operands.
fn operator_call_kind(operator: OverloadedOperator, args: usize) -> SyntaxKind {
    use OverloadedOperator::*;

    match operator {
        Less | Greater | EqualEqual | ExclaimEqual | LessEqual | GreaterEqual | Spaceship
        | Equal | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual | CaretEqual
        | AmpEqual | PipeEqual | LessLessEqual | GreaterGreaterEqual | Slash | Percent | Caret
        | Pipe | LessLess | GreaterGreater | AmpAmp | PipePipe | ArrowStar | Comma => {
            SyntaxKind::BINARY_OPERATOR_EXPRESSION
        }
        Tilde | Exclaim => SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION,
        PlusPlus | MinusMinus => match args {
            1 => SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION,
            2 => SyntaxKind::POSTFIX_UNARY_OPERATOR_EXPRESSION,
            _ => SyntaxKind::UNKNOWN_EXPRESSION,
        },
        Plus | Minus | Star | Amp => match args {
            1 => SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION,
            2 => SyntaxKind::BINARY_OPERATOR_EXPRESSION,
            _ => SyntaxKind::UNKNOWN_EXPRESSION,
        },
        New | Delete | ArrayNew | ArrayDelete | Coawait | Call | Subscript | Arrow => {
            SyntaxKind::UNKNOWN_EXPRESSION
        }
    }
}

/// Whether a numeric literal spelling, ud-suffix included, is a floating
/// literal.
fn is_floating_spelling(spelling: &str) -> bool {
    let number = spelling.split('_').next().unwrap_or(spelling);
    let hex = number.starts_with("0x") || number.starts_with("0X");
    let exponent: &[char] = if hex { &['p', 'P'] } else { &['e', 'E'] };
    number.contains('.') || number.contains(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_spellings() {
        assert!(is_floating_spelling("1.5_km"));
        assert!(is_floating_spelling("1e3_km"));
        assert!(is_floating_spelling("0x1p4_w"));
        assert!(!is_floating_spelling("12_feet"));
        assert!(!is_floating_spelling("0xfe_w"));
        assert!(!is_floating_spelling("1'000_w"));
    }

    #[test]
    fn overloaded_operator_shapes() {
        use OverloadedOperator::*;

        assert_eq!(operator_call_kind(Plus, 2), SyntaxKind::BINARY_OPERATOR_EXPRESSION);
        assert_eq!(operator_call_kind(Minus, 1), SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION);
        assert_eq!(operator_call_kind(PlusPlus, 2), SyntaxKind::POSTFIX_UNARY_OPERATOR_EXPRESSION);
        assert_eq!(operator_call_kind(Exclaim, 1), SyntaxKind::PREFIX_UNARY_OPERATOR_EXPRESSION);
        assert_eq!(operator_call_kind(Subscript, 2), SyntaxKind::UNKNOWN_EXPRESSION);
    }
}
