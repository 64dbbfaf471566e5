use super::*;

// ============================================================================
// Type syntax
// ============================================================================

ast_node!(
    TypeSyntax,
    [
        IDENTIFIER_NAME,
        GENERIC_NAME,
        QUALIFIED_NAME,
        ALIAS_QUALIFIED_NAME,
        NULLABLE_TYPE,
        ARRAY_TYPE
    ]
);

impl TypeSyntax {
    /// The rightmost simple name: `Bar` in `Foo.Bar<T>`.
    pub fn simple_name(&self) -> Option<SmolStr> {
        match self.0.kind() {
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => {
                name_token(&self.0).map(|t| ident_text(&t))
            }
            SyntaxKind::QUALIFIED_NAME | SyntaxKind::ALIAS_QUALIFIED_NAME => self
                .0
                .children()
                .filter_map(TypeSyntax::cast)
                .last()?
                .simple_name(),
            _ => None,
        }
    }

    /// Type arguments of the rightmost generic name
    pub fn type_arguments(&self) -> Vec<TypeSyntax> {
        match self.0.kind() {
            SyntaxKind::GENERIC_NAME => self
                .0
                .children()
                .find(|n| n.kind() == SyntaxKind::TYPE_ARGUMENT_LIST)
                .map(|l| l.children().filter_map(TypeSyntax::cast).collect())
                .unwrap_or_default(),
            SyntaxKind::QUALIFIED_NAME => self
                .0
                .children()
                .filter_map(TypeSyntax::cast)
                .last()
                .map(|t| t.type_arguments())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Left and right parts of a qualified name
    pub fn qualifier(&self) -> Option<TypeSyntax> {
        match self.0.kind() {
            SyntaxKind::QUALIFIED_NAME => self.0.children().find_map(TypeSyntax::cast),
            _ => None,
        }
    }

    /// Element type of `T?` and `T[]`
    pub fn element(&self) -> Option<TypeSyntax> {
        match self.0.kind() {
            SyntaxKind::NULLABLE_TYPE | SyntaxKind::ARRAY_TYPE => {
                self.0.children().find_map(TypeSyntax::cast)
            }
            _ => None,
        }
    }

    /// Source text without trivia.
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }
}

/// Concatenated significant tokens of a node.
pub fn compact_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.text().to_string())
        .collect()
}

ast_node!(IdentifierName, IDENTIFIER_NAME);

impl IdentifierName {
    pub fn token(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }

    pub fn text(&self) -> SmolStr {
        self.token().map(|t| ident_text(&t)).unwrap_or_default()
    }
}

ast_node!(GenericName, GENERIC_NAME);

impl GenericName {
    pub fn token(&self) -> Option<SyntaxToken> {
        name_token(&self.0)
    }

    pub fn text(&self) -> SmolStr {
        self.token().map(|t| ident_text(&t)).unwrap_or_default()
    }

    pub fn type_arguments(&self) -> Vec<TypeSyntax> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_ARGUMENT_LIST)
            .map(|l| l.children().filter_map(TypeSyntax::cast).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(SyntaxNode);

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expr()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Expr {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Strip redundant parentheses
    pub fn unparenthesized(&self) -> Expr {
        let mut current = self.clone();
        while current.kind() == SyntaxKind::PAREN_EXPR {
            match current.0.children().find_map(Expr::cast) {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Simple identifier text when this is an `IdentifierName`
    pub fn as_identifier(&self) -> Option<SmolStr> {
        IdentifierName::cast(self.0.clone()).map(|n| n.text())
    }
}

ast_node!(LiteralExpr, LITERAL_EXPR);

impl LiteralExpr {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.first_token()
    }

    pub fn token_kind(&self) -> SyntaxKind {
        self.token().map(|t| t.kind()).unwrap_or(SyntaxKind::ERROR)
    }

    /// Value of a non-interpolated string literal
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        if token.kind() != SyntaxKind::STRING {
            return None;
        }
        unquote_string(token.text())
    }
}

ast_node!(MemberAccessExpr, MEMBER_ACCESS_EXPR);

impl MemberAccessExpr {
    /// The expression left of the dot
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The simple name right of the dot
    pub fn name(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_token(self.name()?.syntax())
    }

    pub fn name_text(&self) -> Option<SmolStr> {
        self.name_token().map(|t| ident_text(&t))
    }
}

ast_node!(MemberBindingExpr, MEMBER_BINDING_EXPR);

impl MemberBindingExpr {
    pub fn name(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_token(self.name()?.syntax())
    }

    pub fn name_text(&self) -> Option<SmolStr> {
        self.name_token().map(|t| ident_text(&t))
    }
}

ast_node!(ConditionalAccessExpr, CONDITIONAL_ACCESS_EXPR);

impl ConditionalAccessExpr {
    /// The receiver before `?`
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Everything after `?`, starting with a member binding
    pub fn when_not_null(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

/// The receiver a member binding `.Foo` refers to: the expression before the
/// nearest enclosing `?`.
pub fn conditional_receiver(binding: &MemberBindingExpr) -> Option<Expr> {
    let mut node = binding.syntax().clone();
    loop {
        let parent = node.parent()?;
        if let Some(access) = ConditionalAccessExpr::cast(parent.clone()) {
            if access.when_not_null().map(|w| w.syntax().clone()) == Some(node.clone()) {
                return access.expr();
            }
        }
        node = parent;
    }
}

ast_node!(InvocationExpr, INVOCATION_EXPR);

impl InvocationExpr {
    /// The invoked expression
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    first_child_method!(argument_list, ArgumentList);

    pub fn arguments(&self) -> Vec<Argument> {
        self.argument_list()
            .map(|l| l.arguments().collect())
            .unwrap_or_default()
    }

    /// Name of the invoked method: `Foo` in `a.Foo(..)`, `a?.Foo(..)` or `Foo(..)`
    pub fn method_name(&self) -> Option<SmolStr> {
        self.method_name_token().map(|t| ident_text(&t))
    }

    pub fn method_name_token(&self) -> Option<SyntaxToken> {
        let expr = self.expr()?;
        match expr.kind() {
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => name_token(expr.syntax()),
            SyntaxKind::MEMBER_ACCESS_EXPR => MemberAccessExpr::cast(expr.0)?.name_token(),
            SyntaxKind::MEMBER_BINDING_EXPR => MemberBindingExpr::cast(expr.0)?.name_token(),
            _ => None,
        }
    }

    /// Receiver expression: `a` in `a.Foo()` and `a?.Foo()`, `None` for `Foo()`.
    pub fn receiver(&self) -> Option<Expr> {
        let expr = self.expr()?;
        match expr.kind() {
            SyntaxKind::MEMBER_ACCESS_EXPR => MemberAccessExpr::cast(expr.0)?.expr(),
            SyntaxKind::MEMBER_BINDING_EXPR => {
                conditional_receiver(&MemberBindingExpr::cast(expr.0)?)
            }
            _ => None,
        }
    }

    /// `nameof(X)` or `nameof(A.B)` argument's rightmost identifier
    pub fn nameof_value(&self) -> Option<SmolStr> {
        let expr = self.expr()?;
        if expr.as_identifier().as_deref() != Some("nameof") {
            return None;
        }
        let [arg] = self.arguments().try_into().ok()?;
        let arg = arg.expr()?;
        match arg.kind() {
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::GENERIC_NAME => {
                name_token(arg.syntax()).map(|t| ident_text(&t))
            }
            SyntaxKind::MEMBER_ACCESS_EXPR => MemberAccessExpr::cast(arg.0)?.name_text(),
            _ => None,
        }
    }
}

ast_node!(ArgumentList, [ARGUMENT_LIST, BRACKETED_ARGUMENT_LIST]);

impl ArgumentList {
    children_method!(arguments, Argument);
}

ast_node!(Argument, ARGUMENT);

impl Argument {
    /// `name:` label
    pub fn name_colon(&self) -> Option<SmolStr> {
        label(&self.0, SyntaxKind::NAME_COLON)
    }

    first_child_method!(expr, Expr);

    /// `ref`, `out` or `in`
    pub fn ref_kind(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .find(|k| matches!(k, SyntaxKind::REF_KW | SyntaxKind::OUT_KW | SyntaxKind::IN_KW))
    }
}

ast_node!(ObjectCreationExpr, OBJECT_CREATION_EXPR);

impl ObjectCreationExpr {
    first_child_method!(ty, TypeSyntax);
    first_child_method!(argument_list, ArgumentList);

    pub fn arguments(&self) -> Vec<Argument> {
        self.argument_list()
            .map(|l| l.arguments().collect())
            .unwrap_or_default()
    }

    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::INITIALIZER_EXPR)
    }
}

ast_node!(AssignmentExpr, ASSIGNMENT_EXPR);

impl AssignmentExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .find(|k| k.is_assignment_op())
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .find(|k| !k.is_trivia())
    }
}

ast_node!(ConditionalExpr, CONDITIONAL_EXPR);

impl ConditionalExpr {
    pub fn branches(&self) -> (Option<Expr>, Option<Expr>) {
        let mut exprs = self.0.children().filter_map(Expr::cast).skip(1);
        (exprs.next(), exprs.next())
    }
}

ast_node!(TypeofExpr, TYPEOF_EXPR);

impl TypeofExpr {
    first_child_method!(ty, TypeSyntax);
}

ast_node!(DefaultExpr, DEFAULT_EXPR);

impl DefaultExpr {
    first_child_method!(ty, TypeSyntax);
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    first_child_method!(ty, TypeSyntax);

    /// The operand; the type node comes first and may itself look like an expression
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().skip(1).find_map(Expr::cast)
    }
}

ast_node!(AsExpr, AS_EXPR);

impl AsExpr {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn ty(&self) -> Option<TypeSyntax> {
        self.0.children().skip(1).find_map(TypeSyntax::cast)
    }
}

ast_node!(LambdaExpr, [SIMPLE_LAMBDA_EXPR, PAREN_LAMBDA_EXPR]);

impl LambdaExpr {
    pub fn parameters(&self) -> Vec<Parameter> {
        match self.0.kind() {
            SyntaxKind::SIMPLE_LAMBDA_EXPR => self.0.children().filter_map(Parameter::cast).collect(),
            _ => self
                .0
                .children()
                .find_map(ParameterList::cast)
                .map(|l| l.parameters().collect())
                .unwrap_or_default(),
        }
    }

    /// Block or expression body
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::BLOCK || n.kind().is_expr())
    }
}
