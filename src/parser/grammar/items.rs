use super::expressions::{parse_argument_list, parse_expression};
use super::statements::parse_block;
use super::types::{TypeMode, parse_identifier_name, parse_name, parse_simple_name, parse_type};
use super::*;
use rowan::Checkpoint;

/// NamespaceBody = (UsingDirective | AttributeList | NamespaceMember)*
///
/// Ends at EOF, or at `}` for block-scoped namespaces.
pub(crate) fn parse_namespace_body(p: &mut Parser<'_>, closing: Option<SyntaxKind>) {
    while !p.at_eof() {
        if closing.is_some_and(|k| p.at(k)) {
            break;
        }
        let before = p.progress();
        match p.current_kind() {
            SyntaxKind::USING_KW => parse_using_directive(p),
            SyntaxKind::NAMESPACE_KW => parse_namespace(p),
            SyntaxKind::L_BRACKET if at_global_attribute(p) => parse_attribute_list(p),
            _ => parse_member(p),
        }
        if p.progress() == before {
            p.error_bump("unexpected token in namespace");
        }
    }
}

fn at_global_attribute(p: &Parser<'_>) -> bool {
    matches!(p.nth_text(1), "assembly" | "module") && p.nth(2) == SyntaxKind::COLON
}

/// UsingDirective = 'using' 'static'? (Ident '=')? Name ';'
fn parse_using_directive(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USING_DIRECTIVE);
    p.bump(); // using
    p.eat(SyntaxKind::STATIC_KW);
    if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::EQ {
        p.start_node(SyntaxKind::NAME_EQUALS);
        parse_identifier_name(p);
        p.bump(); // =
        p.finish_node();
    }
    if p.at(SyntaxKind::IDENT) {
        parse_name(p);
    } else {
        p.error("expected namespace name");
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Namespace = 'namespace' Name ('{' NamespaceBody '}' ';'? | ';' NamespaceBody)
fn parse_namespace(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    p.bump(); // namespace
    if p.at(SyntaxKind::IDENT) {
        parse_name(p);
    } else {
        p.error("expected namespace name");
    }
    if p.at(SyntaxKind::SEMICOLON) {
        p.start_node_at(cp, SyntaxKind::FILE_SCOPED_NAMESPACE_DECL);
        p.bump();
        parse_namespace_body(p, None);
        p.finish_node();
        return;
    }
    p.start_node_at(cp, SyntaxKind::NAMESPACE_DECL);
    if p.expect(SyntaxKind::L_BRACE) {
        parse_namespace_body(p, Some(SyntaxKind::R_BRACE));
        p.expect(SyntaxKind::R_BRACE);
        p.eat(SyntaxKind::SEMICOLON);
    }
    p.finish_node();
}

// =============================================================================
// MEMBERS
// =============================================================================

/// Member = AttributeList* Modifier* (TypeDecl | Field | Property | Method | Event | Constructor)
pub(crate) fn parse_member(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    while p.at(SyntaxKind::L_BRACKET) {
        parse_attribute_list(p);
    }
    parse_modifiers(p);

    match p.current_kind() {
        SyntaxKind::CLASS_KW => parse_type_decl(p, cp, SyntaxKind::CLASS_DECL),
        SyntaxKind::STRUCT_KW => parse_type_decl(p, cp, SyntaxKind::STRUCT_DECL),
        SyntaxKind::INTERFACE_KW => parse_type_decl(p, cp, SyntaxKind::INTERFACE_DECL),
        SyntaxKind::ENUM_KW => parse_enum(p, cp),
        SyntaxKind::DELEGATE_KW => parse_delegate(p, cp),
        SyntaxKind::EVENT_KW => parse_event(p, cp),
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => parse_constructor(p, cp),
        SyntaxKind::IDENT => parse_typed_member(p, cp),
        SyntaxKind::R_BRACE | SyntaxKind::EOF => {
            // Dangling attributes or modifiers
            p.start_node_at(cp, SyntaxKind::ERROR);
            p.error("expected member declaration");
            p.finish_node();
        }
        _ => skip_member(p, cp, "unsupported member declaration"),
    }
}

/// Modifier = 'public' | 'static' | ... | 'partial' | 'async'
fn parse_modifiers(p: &mut Parser<'_>) {
    loop {
        if p.current_kind().is_modifier() {
            p.bump();
        } else if (p.at_contextual("partial") || p.at_contextual("async"))
            && (p.nth(1) == SyntaxKind::IDENT || p.nth(1).is_keyword())
        {
            p.bump();
        } else {
            break;
        }
    }
}

/// Wrap everything from `cp` up to the end of the member in an ERROR node.
fn skip_member(p: &mut Parser<'_>, cp: Checkpoint, message: &str) {
    p.start_node_at(cp, SyntaxKind::ERROR);
    p.error(message);
    let mut depth = 0usize;
    loop {
        match p.current_kind() {
            SyntaxKind::EOF => break,
            SyntaxKind::L_BRACE => {
                depth += 1;
                p.bump();
            }
            SyntaxKind::R_BRACE => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                p.bump();
                if depth == 0 && !p.at_any(&[SyntaxKind::EQ, SyntaxKind::SEMICOLON]) {
                    break;
                }
            }
            SyntaxKind::SEMICOLON if depth == 0 => {
                p.bump();
                break;
            }
            _ => p.bump(),
        }
    }
    p.finish_node();
}

/// TypeDecl = ('class' | 'struct' | 'interface') Ident TypeParameterList? BaseList?
///            ConstraintClause* '{' Member* '}' ';'?
fn parse_type_decl(p: &mut Parser<'_>, cp: Checkpoint, kind: SyntaxKind) {
    p.start_node_at(cp, kind);
    p.bump(); // class / struct / interface
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::LT) {
        parse_type_parameter_list(p);
    }
    if p.at(SyntaxKind::COLON) {
        parse_base_list(p);
    }
    parse_constraint_clauses(p);
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let before = p.progress();
            parse_member(p);
            if p.progress() == before {
                p.error_bump("unexpected token in type body");
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.eat(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Enum = 'enum' Ident BaseList? '{' (EnumMember (',' EnumMember)* ','?)? '}'
fn parse_enum(p: &mut Parser<'_>, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::ENUM_DECL);
    p.bump(); // enum
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::COLON) {
        parse_base_list(p);
    }
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            if !p.at(SyntaxKind::IDENT) && !p.at(SyntaxKind::L_BRACKET) {
                p.error_recover("expected enum member", &[SyntaxKind::COMMA, SyntaxKind::R_BRACE]);
                p.eat(SyntaxKind::COMMA);
                continue;
            }
            p.start_node(SyntaxKind::ENUM_MEMBER);
            while p.at(SyntaxKind::L_BRACKET) {
                parse_attribute_list(p);
            }
            p.expect(SyntaxKind::IDENT);
            if p.at(SyntaxKind::EQ) {
                parse_equals_value_clause(p);
            }
            p.finish_node();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    }
    p.eat(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Delegate = 'delegate' Type Ident TypeParameterList? ParameterList ';'
fn parse_delegate(p: &mut Parser<'_>, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::DELEGATE_DECL);
    p.bump(); // delegate
    parse_type(p, TypeMode::Full);
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::LT) {
        parse_type_parameter_list(p);
    }
    parse_parameter_list(p, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
    parse_constraint_clauses(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Event = 'event' Type (Ident AccessorList | VariableDeclarators ';')
fn parse_event(p: &mut Parser<'_>, cp: Checkpoint) {
    p.bump(); // event
    let type_cp = p.checkpoint();
    parse_type(p, TypeMode::Full);
    let has_accessors = at_explicit_interface(p) || p.nth(1) == SyntaxKind::L_BRACE;
    if has_accessors {
        p.start_node_at(cp, SyntaxKind::EVENT_DECL);
        if at_explicit_interface(p) {
            parse_explicit_interface_specifier(p);
        }
        p.expect(SyntaxKind::IDENT);
        parse_accessor_list(p);
        p.finish_node();
    } else {
        p.start_node_at(cp, SyntaxKind::EVENT_FIELD_DECL);
        p.start_node_at(type_cp, SyntaxKind::VARIABLE_DECLARATION);
        parse_variable_declarators(p);
        p.finish_node();
        p.expect(SyntaxKind::SEMICOLON);
        p.finish_node();
    }
}

/// Constructor = Ident ParameterList ConstructorInitializer? (Block | ArrowExprClause ';' | ';')
fn parse_constructor(p: &mut Parser<'_>, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::CONSTRUCTOR_DECL);
    p.bump(); // name
    parse_parameter_list(p, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
    if p.at(SyntaxKind::COLON) {
        p.start_node(SyntaxKind::CONSTRUCTOR_INITIALIZER);
        p.bump(); // :
        if !p.eat(SyntaxKind::BASE_KW) {
            p.expect(SyntaxKind::THIS_KW);
        }
        parse_argument_list(p);
        p.finish_node();
    }
    parse_body(p);
    p.finish_node();
}

/// Members that start with a type: fields, properties, methods, indexers.
fn parse_typed_member(p: &mut Parser<'_>, cp: Checkpoint) {
    let type_cp = p.checkpoint();
    parse_type(p, TypeMode::Full);

    match p.current_kind() {
        SyntaxKind::THIS_KW => parse_indexer(p, cp),
        SyntaxKind::IDENT => {
            if at_explicit_interface(p) {
                // Only methods, properties and events carry explicit interface names
                let kind = if at_method_after_specifier(p) {
                    SyntaxKind::METHOD_DECL
                } else {
                    SyntaxKind::PROPERTY_DECL
                };
                p.start_node_at(cp, kind);
                parse_explicit_interface_specifier(p);
                if p.at(SyntaxKind::THIS_KW) {
                    p.bump();
                    parse_parameter_list(p, SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
                    parse_property_rest(p);
                } else {
                    p.expect(SyntaxKind::IDENT);
                    if kind == SyntaxKind::METHOD_DECL {
                        parse_method_rest(p);
                    } else {
                        parse_property_rest(p);
                    }
                }
                p.finish_node();
                return;
            }
            match p.nth(1) {
                SyntaxKind::L_PAREN | SyntaxKind::LT => {
                    p.start_node_at(cp, SyntaxKind::METHOD_DECL);
                    p.bump(); // name
                    parse_method_rest(p);
                    p.finish_node();
                }
                SyntaxKind::L_BRACE | SyntaxKind::FAT_ARROW => {
                    p.start_node_at(cp, SyntaxKind::PROPERTY_DECL);
                    p.bump(); // name
                    parse_property_rest(p);
                    p.finish_node();
                }
                _ => {
                    p.start_node_at(cp, SyntaxKind::FIELD_DECL);
                    p.start_node_at(type_cp, SyntaxKind::VARIABLE_DECLARATION);
                    parse_variable_declarators(p);
                    p.finish_node();
                    p.expect(SyntaxKind::SEMICOLON);
                    p.finish_node();
                }
            }
        }
        _ => skip_member(p, cp, "expected member name"),
    }
}

fn at_explicit_interface(p: &Parser<'_>) -> bool {
    if !p.at(SyntaxKind::IDENT) {
        return false;
    }
    match p.nth(1) {
        SyntaxKind::DOT => true,
        SyntaxKind::LT => scan_type_args(p, 1).is_some_and(|n| p.nth(n) == SyntaxKind::DOT),
        _ => false,
    }
}

/// Lookahead past `IFoo.Bar` to see whether a parameter list follows.
fn at_method_after_specifier(p: &Parser<'_>) -> bool {
    let mut n = 0;
    loop {
        match p.nth(n) {
            SyntaxKind::L_PAREN => return true,
            SyntaxKind::L_BRACE
            | SyntaxKind::FAT_ARROW
            | SyntaxKind::SEMICOLON
            | SyntaxKind::L_BRACKET
            | SyntaxKind::EOF => return false,
            _ => n += 1,
        }
    }
}

/// ExplicitInterfaceSpecifier = Name '.'
fn parse_explicit_interface_specifier(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EXPLICIT_INTERFACE_SPECIFIER);
    let cp = p.checkpoint();
    parse_simple_name(p);
    while p.at(SyntaxKind::DOT) {
        let last = p.nth(1) == SyntaxKind::THIS_KW
            || (p.nth(1) == SyntaxKind::IDENT
                && matches!(
                    p.nth(2),
                    SyntaxKind::L_PAREN
                        | SyntaxKind::L_BRACE
                        | SyntaxKind::FAT_ARROW
                        | SyntaxKind::LT
                        | SyntaxKind::EQ
                        | SyntaxKind::SEMICOLON
                ));
        if last {
            p.bump(); // .
            break;
        }
        p.start_node_at(cp, SyntaxKind::QUALIFIED_NAME);
        p.bump(); // .
        parse_simple_name(p);
        p.finish_node();
    }
    p.finish_node();
}

/// MethodRest = TypeParameterList? ParameterList ConstraintClause* Body
fn parse_method_rest(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::LT) {
        parse_type_parameter_list(p);
    }
    parse_parameter_list(p, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
    parse_constraint_clauses(p);
    parse_body(p);
}

/// Body = Block | ArrowExprClause ';' | ';'
fn parse_body(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::L_BRACE => parse_block(p),
        SyntaxKind::FAT_ARROW => {
            parse_arrow_expr_clause(p);
            p.expect(SyntaxKind::SEMICOLON);
        }
        _ => {
            p.expect(SyntaxKind::SEMICOLON);
        }
    }
}

/// PropertyRest = AccessorList ('=' Expr ';')? | ArrowExprClause ';'
fn parse_property_rest(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::FAT_ARROW) {
        parse_arrow_expr_clause(p);
        p.expect(SyntaxKind::SEMICOLON);
        return;
    }
    parse_accessor_list(p);
    if p.at(SyntaxKind::EQ) {
        parse_equals_value_clause(p);
        p.expect(SyntaxKind::SEMICOLON);
    }
}

/// Indexer = 'this' '[' Parameter* ']' PropertyRest
fn parse_indexer(p: &mut Parser<'_>, cp: Checkpoint) {
    p.start_node_at(cp, SyntaxKind::INDEXER_DECL);
    p.bump(); // this
    parse_parameter_list(p, SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET);
    parse_property_rest(p);
    p.finish_node();
}

/// AccessorList = '{' Accessor* '}'
fn parse_accessor_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ACCESSOR_LIST);
    if !p.expect(SyntaxKind::L_BRACE) {
        p.finish_node();
        return;
    }
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        parse_accessor(p);
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// Accessor = AttributeList* Modifier* ('get' | 'set' | 'init' | 'add' | 'remove') Body
fn parse_accessor(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    while p.at(SyntaxKind::L_BRACKET) {
        parse_attribute_list(p);
    }
    parse_modifiers(p);
    if !p.at(SyntaxKind::IDENT) {
        p.start_node_at(cp, SyntaxKind::ERROR);
        p.error("expected accessor");
        if !p.at(SyntaxKind::R_BRACE) {
            p.bump();
        }
        p.finish_node();
        return;
    }
    p.start_node_at(cp, SyntaxKind::ACCESSOR_DECL);
    p.bump(); // get / set / add / remove / init
    parse_body(p);
    p.finish_node();
}

/// ArrowExprClause = '=>' Expr
pub(crate) fn parse_arrow_expr_clause(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ARROW_EXPR_CLAUSE);
    p.bump(); // =>
    parse_expression(p);
    p.finish_node();
}

/// VariableDeclarators = VariableDeclarator (',' VariableDeclarator)*
/// VariableDeclarator = Ident EqualsValueClause?
pub(crate) fn parse_variable_declarators(p: &mut Parser<'_>) {
    loop {
        p.start_node(SyntaxKind::VARIABLE_DECLARATOR);
        p.expect(SyntaxKind::IDENT);
        if p.at(SyntaxKind::EQ) {
            parse_equals_value_clause(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// EqualsValueClause = '=' Expr
pub(crate) fn parse_equals_value_clause(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EQUALS_VALUE_CLAUSE);
    p.bump(); // =
    parse_expression(p);
    p.finish_node();
}

/// BaseList = ':' Type (',' Type)*
fn parse_base_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BASE_LIST);
    p.bump(); // :
    parse_type(p, TypeMode::Full);
    while p.eat(SyntaxKind::COMMA) {
        parse_type(p, TypeMode::Full);
    }
    p.finish_node();
}

/// TypeParameterList = '<' TypeParameter (',' TypeParameter)* '>'
fn parse_type_parameter_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TYPE_PARAMETER_LIST);
    p.bump(); // <
    loop {
        p.start_node(SyntaxKind::TYPE_PARAMETER);
        while p.at(SyntaxKind::L_BRACKET) {
            parse_attribute_list(p);
        }
        if p.at(SyntaxKind::IN_KW) || p.at(SyntaxKind::OUT_KW) {
            p.bump();
        }
        p.expect(SyntaxKind::IDENT);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT);
    p.finish_node();
}

/// ConstraintClause = 'where' Ident ':' Constraint (',' Constraint)*
fn parse_constraint_clauses(p: &mut Parser<'_>) {
    while p.at_contextual("where") {
        p.start_node(SyntaxKind::TYPE_CONSTRAINT_CLAUSE);
        p.bump(); // where
        while !p.at_eof()
            && !p.at_any(&[
                SyntaxKind::L_BRACE,
                SyntaxKind::SEMICOLON,
                SyntaxKind::FAT_ARROW,
            ])
            && !(p.at_contextual("where") && p.nth(2) == SyntaxKind::COLON)
        {
            p.bump();
        }
        p.finish_node();
    }
}

/// ParameterList = Open (Parameter (',' Parameter)*)? Close
pub(crate) fn parse_parameter_list(p: &mut Parser<'_>, open: SyntaxKind, close: SyntaxKind) {
    p.start_node(SyntaxKind::PARAMETER_LIST);
    if !p.expect(open) {
        p.finish_node();
        return;
    }
    if !p.at(close) {
        loop {
            parse_parameter(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(close);
    p.finish_node();
}

/// Parameter = AttributeList* ('ref' | 'out' | 'in' | 'params' | 'this')* Type Ident EqualsValueClause?
fn parse_parameter(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PARAMETER);
    while p.at(SyntaxKind::L_BRACKET) {
        parse_attribute_list(p);
    }
    while p.at_any(&[
        SyntaxKind::REF_KW,
        SyntaxKind::OUT_KW,
        SyntaxKind::IN_KW,
        SyntaxKind::PARAMS_KW,
        SyntaxKind::THIS_KW,
    ]) {
        p.bump();
    }
    parse_type(p, TypeMode::Full);
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::EQ) {
        parse_equals_value_clause(p);
    }
    p.finish_node();
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// AttributeList = '[' (Target ':')? Attribute (',' Attribute)* ','? ']'
pub(crate) fn parse_attribute_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ATTRIBUTE_LIST);
    p.bump(); // [
    if (p.at(SyntaxKind::IDENT) || p.current_kind().is_keyword()) && p.nth(1) == SyntaxKind::COLON
    {
        p.start_node(SyntaxKind::ATTRIBUTE_TARGET);
        p.bump();
        p.bump(); // :
        p.finish_node();
    }
    while p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::ATTRIBUTE);
        parse_name(p);
        if p.at(SyntaxKind::L_PAREN) {
            parse_attribute_argument_list(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(SyntaxKind::R_BRACKET) {
        p.error_recover(
            "expected ]",
            &[SyntaxKind::R_BRACKET, SyntaxKind::R_BRACE, SyntaxKind::SEMICOLON],
        );
        p.eat(SyntaxKind::R_BRACKET);
    }
    p.finish_node();
}

/// AttributeArgumentList = '(' (AttributeArgument (',' AttributeArgument)*)? ')'
fn parse_attribute_argument_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ATTRIBUTE_ARGUMENT_LIST);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            p.start_node(SyntaxKind::ATTRIBUTE_ARGUMENT);
            if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::EQ {
                p.start_node(SyntaxKind::NAME_EQUALS);
                parse_identifier_name(p);
                p.bump(); // =
                p.finish_node();
            } else if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::COLON {
                p.start_node(SyntaxKind::NAME_COLON);
                parse_identifier_name(p);
                p.bump(); // :
                p.finish_node();
            }
            parse_expression(p);
            p.finish_node();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}
