use super::*;

ast_node!(Block, BLOCK);

impl Block {
    /// Statement nodes in source order
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

ast_node!(
    Stmt,
    [
        BLOCK,
        LOCAL_DECL_STMT,
        EXPR_STMT,
        RETURN_STMT,
        IF_STMT,
        WHILE_STMT,
        DO_STMT,
        FOR_STMT,
        FOREACH_STMT,
        THROW_STMT,
        TRY_STMT,
        USING_STMT,
        LOCK_STMT,
        SWITCH_STMT,
        BREAK_STMT,
        CONTINUE_STMT,
        EMPTY_STMT
    ]
);

impl Stmt {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// The expression of `expr;`, `return expr;` and `throw expr;`
    pub fn expr(&self) -> Option<Expr> {
        match self.kind() {
            SyntaxKind::EXPR_STMT | SyntaxKind::RETURN_STMT | SyntaxKind::THROW_STMT => {
                self.0.children().find_map(Expr::cast)
            }
            _ => None,
        }
    }
}

ast_node!(LocalDeclStmt, LOCAL_DECL_STMT);

impl LocalDeclStmt {
    first_child_method!(declaration, VariableDeclaration);
}
