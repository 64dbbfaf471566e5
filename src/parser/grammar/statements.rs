use super::expressions::parse_expression;
use super::items::parse_variable_declarators;
use super::types::{TypeMode, parse_type};
use super::*;

/// Block = '{' Statement* '}'
pub(crate) fn parse_block(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BLOCK);
    if !p.expect(SyntaxKind::L_BRACE) {
        p.finish_node();
        return;
    }
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.progress();
        parse_statement(p);
        if p.progress() == before {
            p.error_bump("unexpected token in block");
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

pub(crate) fn parse_statement(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::L_BRACE => parse_block(p),
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::EMPTY_STMT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::RETURN_KW => parse_keyword_expr_stmt(p, SyntaxKind::RETURN_STMT),
        SyntaxKind::THROW_KW => parse_keyword_expr_stmt(p, SyntaxKind::THROW_STMT),
        SyntaxKind::BREAK_KW => parse_keyword_stmt(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CONTINUE_KW => parse_keyword_stmt(p, SyntaxKind::CONTINUE_STMT),
        SyntaxKind::IF_KW => parse_if(p),
        SyntaxKind::WHILE_KW => parse_while(p),
        SyntaxKind::DO_KW => parse_do(p),
        SyntaxKind::FOR_KW => parse_for(p),
        SyntaxKind::FOREACH_KW => parse_foreach(p),
        SyntaxKind::TRY_KW => parse_try(p),
        SyntaxKind::SWITCH_KW => parse_switch(p),
        SyntaxKind::LOCK_KW => parse_paren_stmt(p, SyntaxKind::LOCK_STMT),
        SyntaxKind::USING_KW if p.nth(1) == SyntaxKind::L_PAREN => parse_using_stmt(p),
        SyntaxKind::USING_KW | SyntaxKind::CONST_KW => parse_local_decl(p),
        _ if at_local_declaration(p) => parse_local_decl(p),
        _ => {
            p.start_node(SyntaxKind::EXPR_STMT);
            parse_expression(p);
            p.expect(SyntaxKind::SEMICOLON);
            p.finish_node();
        }
    }
}

/// `Type name =`, `Type name;` or `Type name,` starts a local declaration.
fn at_local_declaration(p: &Parser<'_>) -> bool {
    scan_type(p, 0).is_some_and(|n| {
        p.nth(n) == SyntaxKind::IDENT
            && matches!(
                p.nth(n + 1),
                SyntaxKind::EQ | SyntaxKind::SEMICOLON | SyntaxKind::COMMA | SyntaxKind::IN_KW
            )
    })
}

/// LocalDeclStmt = ('using' | 'const')? VariableDeclaration ';'
fn parse_local_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::LOCAL_DECL_STMT);
    p.eat(SyntaxKind::USING_KW);
    p.eat(SyntaxKind::CONST_KW);
    parse_variable_declaration(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// VariableDeclaration = Type VariableDeclarators
fn parse_variable_declaration(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::VARIABLE_DECLARATION);
    parse_type(p, TypeMode::Full);
    parse_variable_declarators(p);
    p.finish_node();
}

fn parse_keyword_stmt(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// ReturnStmt = 'return' Expr? ';'
fn parse_keyword_expr_stmt(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if !p.at(SyntaxKind::SEMICOLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// IfStmt = 'if' '(' Expr ')' Statement ElseClause?
fn parse_if(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    parse_condition(p);
    parse_statement(p);
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        parse_statement(p);
        p.finish_node();
    }
    p.finish_node();
}

fn parse_condition(p: &mut Parser<'_>) {
    p.expect(SyntaxKind::L_PAREN);
    parse_expression(p);
    p.expect(SyntaxKind::R_PAREN);
}

fn parse_while(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::WHILE_STMT);
    p.bump(); // while
    parse_condition(p);
    parse_statement(p);
    p.finish_node();
}

/// LockStmt = 'lock' '(' Expr ')' Statement
fn parse_paren_stmt(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    parse_condition(p);
    parse_statement(p);
    p.finish_node();
}

fn parse_do(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::DO_STMT);
    p.bump(); // do
    parse_statement(p);
    p.expect(SyntaxKind::WHILE_KW);
    parse_condition(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// ForStmt = 'for' '(' (VariableDeclaration | ExprList)? ';' Expr? ';' ExprList? ')' Statement
fn parse_for(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::FOR_STMT);
    p.bump(); // for
    p.expect(SyntaxKind::L_PAREN);
    if at_local_declaration(p) {
        parse_variable_declaration(p);
    } else {
        parse_expression_list(p, SyntaxKind::SEMICOLON);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::SEMICOLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    parse_expression_list(p, SyntaxKind::R_PAREN);
    p.expect(SyntaxKind::R_PAREN);
    parse_statement(p);
    p.finish_node();
}

fn parse_expression_list(p: &mut Parser<'_>, end: SyntaxKind) {
    if p.at(end) {
        return;
    }
    parse_expression(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_expression(p);
    }
}

/// ForeachStmt = 'foreach' '(' Type Ident 'in' Expr ')' Statement
fn parse_foreach(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::FOREACH_STMT);
    p.bump(); // foreach
    p.expect(SyntaxKind::L_PAREN);
    parse_type(p, TypeMode::Full);
    p.expect(SyntaxKind::IDENT);
    p.expect(SyntaxKind::IN_KW);
    parse_expression(p);
    p.expect(SyntaxKind::R_PAREN);
    parse_statement(p);
    p.finish_node();
}

/// TryStmt = 'try' Block CatchClause* FinallyClause?
fn parse_try(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TRY_STMT);
    p.bump(); // try
    parse_block(p);
    while p.at(SyntaxKind::CATCH_KW) {
        p.start_node(SyntaxKind::CATCH_CLAUSE);
        p.bump();
        if p.at(SyntaxKind::L_PAREN) {
            p.start_node(SyntaxKind::CATCH_DECL);
            p.bump();
            parse_type(p, TypeMode::Full);
            p.eat(SyntaxKind::IDENT);
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        if p.at_contextual("when") {
            p.bump();
            parse_condition(p);
        }
        parse_block(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::FINALLY_KW) {
        p.start_node(SyntaxKind::FINALLY_CLAUSE);
        p.bump();
        parse_block(p);
        p.finish_node();
    }
    p.finish_node();
}

/// UsingStmt = 'using' '(' (VariableDeclaration | Expr) ')' Statement
fn parse_using_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USING_STMT);
    p.bump(); // using
    p.bump(); // (
    if at_local_declaration(p) {
        parse_variable_declaration(p);
    } else {
        parse_expression(p);
    }
    p.expect(SyntaxKind::R_PAREN);
    parse_statement(p);
    p.finish_node();
}

/// SwitchStmt = 'switch' '(' Expr ')' '{' SwitchSection* '}'
fn parse_switch(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SWITCH_STMT);
    p.bump(); // switch
    parse_condition(p);
    if p.expect(SyntaxKind::L_BRACE) {
        while p.at(SyntaxKind::CASE_KW) || p.at(SyntaxKind::DEFAULT_KW) {
            parse_switch_section(p);
        }
        if !p.at(SyntaxKind::R_BRACE) {
            p.error_recover("expected case label", &[SyntaxKind::R_BRACE]);
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.finish_node();
}

/// SwitchSection = SwitchLabel+ Statement*
fn parse_switch_section(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SWITCH_SECTION);
    while p.at(SyntaxKind::CASE_KW) || (p.at(SyntaxKind::DEFAULT_KW) && p.nth(1) == SyntaxKind::COLON)
    {
        if p.at(SyntaxKind::CASE_KW) {
            p.start_node(SyntaxKind::CASE_LABEL);
            p.bump();
            parse_expression(p);
            p.expect(SyntaxKind::COLON);
        } else {
            p.start_node(SyntaxKind::DEFAULT_LABEL);
            p.bump();
            p.bump(); // :
        }
        p.finish_node();
    }
    while !p.at_eof()
        && !p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::R_BRACE])
        && !(p.at(SyntaxKind::DEFAULT_KW) && p.nth(1) == SyntaxKind::COLON)
    {
        let before = p.progress();
        parse_statement(p);
        if p.progress() == before {
            p.error_bump("unexpected token in switch section");
        }
    }
    p.finish_node();
}
