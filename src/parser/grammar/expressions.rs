use super::statements::parse_block;
use super::types::{TypeMode, parse_identifier_name, parse_type, parse_type_argument_list};
use super::*;

/// Expression = Assignment | Conditional | Binary | Unary
pub(crate) fn parse_expression(p: &mut Parser<'_>) {
    parse_expr_bp(p, 0);
}

const ASSIGNMENT_BP: u8 = 1;
const CONDITIONAL_BP: u8 = 2;
const RELATIONAL_BP: u8 = 10;

/// Binding power of binary operators: (left, right). Left-associative
/// operators bind their right operand one level tighter.
fn infix_bp(kind: SyntaxKind) -> Option<(u8, u8)> {
    let bp = match kind {
        SyntaxKind::QUESTION_QUESTION => return Some((3, 3)),
        SyntaxKind::PIPE_PIPE => 4,
        SyntaxKind::AMP_AMP => 5,
        SyntaxKind::PIPE => 6,
        SyntaxKind::CARET => 7,
        SyntaxKind::AMP => 8,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 9,
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => RELATIONAL_BP,
        SyntaxKind::LT_LT => 11,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 12,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 13,
        _ => return None,
    };
    Some((bp, bp + 1))
}

fn parse_expr_bp(p: &mut Parser<'_>, min_bp: u8) {
    if p.at(SyntaxKind::THROW_KW) {
        p.start_node(SyntaxKind::THROW_EXPR);
        p.bump();
        parse_expression(p);
        p.finish_node();
        return;
    }

    let cp = p.checkpoint();
    parse_unary(p);

    loop {
        let kind = p.current_kind();
        if kind.is_assignment_op() {
            if min_bp > ASSIGNMENT_BP {
                break;
            }
            p.start_node_at(cp, SyntaxKind::ASSIGNMENT_EXPR);
            p.bump();
            parse_expr_bp(p, ASSIGNMENT_BP);
            p.finish_node();
            break;
        }

        match kind {
            SyntaxKind::QUESTION => {
                if min_bp > CONDITIONAL_BP {
                    break;
                }
                p.start_node_at(cp, SyntaxKind::CONDITIONAL_EXPR);
                p.bump(); // ?
                parse_expression(p);
                p.expect(SyntaxKind::COLON);
                parse_expr_bp(p, CONDITIONAL_BP);
                p.finish_node();
            }
            SyntaxKind::IS_KW => {
                if min_bp > RELATIONAL_BP {
                    break;
                }
                p.start_node_at(cp, SyntaxKind::IS_EXPR);
                p.bump();
                parse_pattern(p);
                p.finish_node();
            }
            SyntaxKind::AS_KW => {
                if min_bp > RELATIONAL_BP {
                    break;
                }
                p.start_node_at(cp, SyntaxKind::AS_EXPR);
                p.bump();
                parse_type(p, TypeMode::NoNullable);
                p.finish_node();
            }
            _ => {
                let Some((l_bp, r_bp)) = infix_bp(kind) else {
                    break;
                };
                if l_bp < min_bp {
                    break;
                }
                p.start_node_at(cp, SyntaxKind::BINARY_EXPR);
                p.bump();
                parse_expr_bp(p, r_bp);
                p.finish_node();
            }
        }
    }
}

/// Pattern = 'not'? (ConstantExpr | Type Ident?)
fn parse_pattern(p: &mut Parser<'_>) {
    if p.at_contextual("not") && p.nth(1) != SyntaxKind::EOF {
        p.bump();
    }
    if p.at(SyntaxKind::IDENT) && scan_type(p, 0).is_some() {
        parse_type(p, TypeMode::NoNullable);
        if p.at(SyntaxKind::IDENT) && !p.at_contextual("and") && !p.at_contextual("or") {
            p.bump(); // designation
        }
    } else {
        parse_expr_bp(p, RELATIONAL_BP + 1);
    }
}

/// Unary = PrefixOp Unary | Cast | Postfix
fn parse_unary(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::BANG
        | SyntaxKind::MINUS
        | SyntaxKind::PLUS
        | SyntaxKind::TILDE
        | SyntaxKind::PLUS_PLUS
        | SyntaxKind::MINUS_MINUS => {
            p.start_node(SyntaxKind::PREFIX_UNARY_EXPR);
            p.bump();
            parse_unary(p);
            p.finish_node();
        }
        SyntaxKind::L_PAREN if !at_paren_lambda(p) && at_cast(p) => {
            p.start_node(SyntaxKind::CAST_EXPR);
            p.bump(); // (
            parse_type(p, TypeMode::Full);
            p.expect(SyntaxKind::R_PAREN);
            parse_unary(p);
            p.finish_node();
        }
        _ => parse_postfix_expr(p),
    }
}

fn at_paren_lambda(p: &Parser<'_>) -> bool {
    matching_paren(p, 0).is_some_and(|close| p.nth(close + 1) == SyntaxKind::FAT_ARROW)
}

/// `(T)x`: a parenthesized type followed by something that starts an operand.
fn at_cast(p: &Parser<'_>) -> bool {
    let Some(n) = scan_type(p, 1) else {
        return false;
    };
    if p.nth(n) != SyntaxKind::R_PAREN {
        return false;
    }
    let next = p.nth(n + 1);
    let starts_operand = matches!(
        next,
        SyntaxKind::IDENT
            | SyntaxKind::INT_NUMBER
            | SyntaxKind::REAL_NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::CHAR
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::THIS_KW
            | SyntaxKind::BASE_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::TYPEOF_KW
            | SyntaxKind::DEFAULT_KW
            | SyntaxKind::L_PAREN
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
    );
    starts_operand
        || (n == 2
            && is_predefined_type(p.nth_text(1))
            && matches!(next, SyntaxKind::MINUS | SyntaxKind::PLUS))
}

/// Postfix = Primary ('.' Name | '?.' Name | Arguments | '[' Arguments ']' | '++' | '--' | '!')*
fn parse_postfix_expr(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    parse_primary(p);
    parse_postfix_ops(p, cp);
}

fn parse_postfix_ops(p: &mut Parser<'_>, cp: rowan::Checkpoint) {
    loop {
        match p.current_kind() {
            SyntaxKind::DOT => {
                p.start_node_at(cp, SyntaxKind::MEMBER_ACCESS_EXPR);
                p.bump();
                parse_simple_name_expr(p);
                p.finish_node();
            }
            SyntaxKind::L_PAREN => {
                p.start_node_at(cp, SyntaxKind::INVOCATION_EXPR);
                parse_argument_list(p);
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(cp, SyntaxKind::ELEMENT_ACCESS_EXPR);
                parse_bracketed_argument_list(p);
                p.finish_node();
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS | SyntaxKind::BANG => {
                p.start_node_at(cp, SyntaxKind::POSTFIX_UNARY_EXPR);
                p.bump();
                p.finish_node();
            }
            SyntaxKind::QUESTION if p.nth(1) == SyntaxKind::DOT && p.adjacent(0) => {
                // a?.b.c() => ConditionalAccess(a, Invocation(MemberAccess(MemberBinding(.b), c)))
                p.start_node_at(cp, SyntaxKind::CONDITIONAL_ACCESS_EXPR);
                p.bump(); // ?
                let inner = p.checkpoint();
                p.start_node(SyntaxKind::MEMBER_BINDING_EXPR);
                p.bump(); // .
                parse_simple_name_expr(p);
                p.finish_node();
                parse_postfix_ops(p, inner);
                p.finish_node();
                break;
            }
            _ => break,
        }
    }
}

/// SimpleName in expression position; `<` is only a type argument list when
/// the token after the closing `>` cannot continue a comparison.
fn parse_simple_name_expr(p: &mut Parser<'_>) {
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected identifier");
        return;
    }
    let generic = p.nth(1) == SyntaxKind::LT
        && scan_type_args(p, 1).is_some_and(|n| {
            matches!(
                p.nth(n),
                SyntaxKind::L_PAREN
                    | SyntaxKind::R_PAREN
                    | SyntaxKind::R_BRACKET
                    | SyntaxKind::R_BRACE
                    | SyntaxKind::COLON
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::COMMA
                    | SyntaxKind::DOT
                    | SyntaxKind::QUESTION
                    | SyntaxKind::EQ_EQ
                    | SyntaxKind::BANG_EQ
                    | SyntaxKind::PIPE
                    | SyntaxKind::CARET
                    | SyntaxKind::AMP_AMP
                    | SyntaxKind::PIPE_PIPE
                    | SyntaxKind::EOF
            )
        });
    if generic {
        p.start_node(SyntaxKind::GENERIC_NAME);
        p.bump();
        parse_type_argument_list(p);
        p.finish_node();
    } else {
        parse_identifier_name(p);
    }
}

fn parse_primary(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::INT_NUMBER
        | SyntaxKind::REAL_NUMBER
        | SyntaxKind::STRING
        | SyntaxKind::CHAR
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW => {
            p.start_node(SyntaxKind::LITERAL_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::THIS_KW => {
            p.start_node(SyntaxKind::THIS_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::BASE_KW => {
            p.start_node(SyntaxKind::BASE_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::FAT_ARROW => parse_simple_lambda(p),
        SyntaxKind::IDENT => parse_simple_name_expr(p),
        SyntaxKind::L_PAREN if at_paren_lambda(p) => parse_paren_lambda(p),
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            parse_expression(p);
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        SyntaxKind::NEW_KW => parse_new(p),
        SyntaxKind::TYPEOF_KW => {
            p.start_node(SyntaxKind::TYPEOF_EXPR);
            p.bump();
            p.expect(SyntaxKind::L_PAREN);
            parse_type(p, TypeMode::Full);
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        SyntaxKind::DEFAULT_KW if p.nth(1) == SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::DEFAULT_EXPR);
            p.bump();
            p.bump(); // (
            parse_type(p, TypeMode::Full);
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        SyntaxKind::DEFAULT_KW => {
            p.start_node(SyntaxKind::LITERAL_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::L_BRACE => parse_initializer(p),
        SyntaxKind::R_PAREN
        | SyntaxKind::R_BRACKET
        | SyntaxKind::R_BRACE
        | SyntaxKind::SEMICOLON
        | SyntaxKind::COMMA
        | SyntaxKind::EOF => p.error("expected expression"),
        _ => p.error_bump("expected expression"),
    }
}

/// SimpleLambda = Parameter '=>' LambdaBody
fn parse_simple_lambda(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SIMPLE_LAMBDA_EXPR);
    p.start_node(SyntaxKind::PARAMETER);
    p.bump(); // name
    p.finish_node();
    p.bump(); // =>
    parse_lambda_body(p);
    p.finish_node();
}

/// ParenLambda = '(' (LambdaParameter (',' LambdaParameter)*)? ')' '=>' LambdaBody
fn parse_paren_lambda(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PAREN_LAMBDA_EXPR);
    p.start_node(SyntaxKind::PARAMETER_LIST);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            p.start_node(SyntaxKind::PARAMETER);
            while p.at_any(&[SyntaxKind::REF_KW, SyntaxKind::OUT_KW, SyntaxKind::IN_KW]) {
                p.bump();
            }
            if !matches!(p.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN) {
                parse_type(p, TypeMode::Full);
            }
            p.expect(SyntaxKind::IDENT);
            p.finish_node();
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
    p.expect(SyntaxKind::FAT_ARROW);
    parse_lambda_body(p);
    p.finish_node();
}

fn parse_lambda_body(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
    } else {
        parse_expression(p);
    }
}

/// New = 'new' (Type (Arguments? Initializer? | ArrayRanks Initializer?) | Arguments | '[' ']' Initializer)
fn parse_new(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    p.bump(); // new
    match p.current_kind() {
        SyntaxKind::L_BRACKET => {
            p.start_node_at(cp, SyntaxKind::ARRAY_CREATION_EXPR);
            parse_array_ranks(p);
            if p.at(SyntaxKind::L_BRACE) {
                parse_initializer(p);
            }
            p.finish_node();
        }
        SyntaxKind::IDENT => {
            parse_type(p, TypeMode::NoArray);
            if p.at(SyntaxKind::L_BRACKET) {
                p.start_node_at(cp, SyntaxKind::ARRAY_CREATION_EXPR);
                parse_array_ranks(p);
            } else {
                p.start_node_at(cp, SyntaxKind::OBJECT_CREATION_EXPR);
                if p.at(SyntaxKind::L_PAREN) {
                    parse_argument_list(p);
                }
            }
            if p.at(SyntaxKind::L_BRACE) {
                parse_initializer(p);
            }
            p.finish_node();
        }
        _ => {
            // Target-typed `new()` and anonymous objects
            p.start_node_at(cp, SyntaxKind::OBJECT_CREATION_EXPR);
            if p.at(SyntaxKind::L_PAREN) {
                parse_argument_list(p);
            }
            if p.at(SyntaxKind::L_BRACE) {
                parse_initializer(p);
            }
            p.finish_node();
        }
    }
}

/// `[n]`, `[]` or `[,]` suffixes of an array creation
fn parse_array_ranks(p: &mut Parser<'_>) {
    while p.at(SyntaxKind::L_BRACKET) {
        if matches!(p.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA) {
            p.start_node(SyntaxKind::ARRAY_RANK_SPECIFIER);
            p.bump();
            while p.eat(SyntaxKind::COMMA) {}
            p.expect(SyntaxKind::R_BRACKET);
            p.finish_node();
        } else {
            parse_bracketed_argument_list(p);
        }
    }
}

/// Initializer = '{' (Element (',' Element)* ','?)? '}'
fn parse_initializer(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::INITIALIZER_EXPR);
    p.bump(); // {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        if p.at(SyntaxKind::L_BRACE) {
            parse_initializer(p);
        } else {
            let before = p.progress();
            parse_expression(p);
            if p.progress() == before {
                p.error_bump("unexpected token in initializer");
            }
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// ArgumentList = '(' (Argument (',' Argument)*)? ')'
pub(crate) fn parse_argument_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ARGUMENT_LIST);
    if !p.expect(SyntaxKind::L_PAREN) {
        p.finish_node();
        return;
    }
    parse_arguments(p, SyntaxKind::R_PAREN);
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

fn parse_bracketed_argument_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BRACKETED_ARGUMENT_LIST);
    p.bump(); // [
    parse_arguments(p, SyntaxKind::R_BRACKET);
    p.expect(SyntaxKind::R_BRACKET);
    p.finish_node();
}

/// Argument = (Ident ':')? ('ref' | 'out' | 'in')? (Expr | Type Ident)
fn parse_arguments(p: &mut Parser<'_>, close: SyntaxKind) {
    if p.at(close) {
        return;
    }
    loop {
        p.start_node(SyntaxKind::ARGUMENT);
        if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::COLON {
            p.start_node(SyntaxKind::NAME_COLON);
            parse_identifier_name(p);
            p.bump(); // :
            p.finish_node();
        }
        if p.at_any(&[SyntaxKind::REF_KW, SyntaxKind::OUT_KW, SyntaxKind::IN_KW]) {
            let is_out = p.at(SyntaxKind::OUT_KW);
            p.bump();
            if is_out
                && scan_type(p, 0).is_some_and(|n| {
                    p.nth(n) == SyntaxKind::IDENT
                        && matches!(p.nth(n + 1), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
                })
            {
                // out var x
                parse_type(p, TypeMode::Full);
                p.bump();
                p.finish_node();
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
                continue;
            }
        }
        parse_expression(p);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, SyntaxNode, parse};

    fn expr(text: &str) -> SyntaxNode {
        let source = format!("class C {{ object x = {text}; }}");
        let parse = parse(&source);
        assert!(parse.ok(), "unexpected errors for `{text}`: {:?}", parse.errors);
        parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EQUALS_VALUE_CLAUSE)
            .and_then(|n| n.children().next())
            .unwrap()
    }

    #[test]
    fn test_precedence() {
        let e = expr("a + b * c");
        assert_eq!(e.kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(e.children().nth(1).unwrap().kind(), SyntaxKind::BINARY_EXPR);
    }

    #[test]
    fn test_conditional_access_shape() {
        let e = expr("a?.SetValue(P, 1)");
        assert_eq!(e.kind(), SyntaxKind::CONDITIONAL_ACCESS_EXPR);
        let when_not_null = e.children().nth(1).unwrap();
        assert_eq!(when_not_null.kind(), SyntaxKind::INVOCATION_EXPR);
        assert_eq!(
            when_not_null.children().next().unwrap().kind(),
            SyntaxKind::MEMBER_BINDING_EXPR
        );
    }

    #[test]
    fn test_cast_vs_parenthesized() {
        assert_eq!(expr("(int)this.GetValue(P)").kind(), SyntaxKind::CAST_EXPR);
        assert_eq!(expr("(double)-1").kind(), SyntaxKind::CAST_EXPR);
        assert_eq!(expr("(a) + b").kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(expr("(a as B)?.C").kind(), SyntaxKind::CONDITIONAL_ACCESS_EXPR);
    }

    #[test]
    fn test_generic_name_vs_comparison() {
        let e = expr("Foo<int>.BarProperty");
        assert_eq!(e.kind(), SyntaxKind::MEMBER_ACCESS_EXPR);
        assert_eq!(e.children().next().unwrap().kind(), SyntaxKind::GENERIC_NAME);
        assert_eq!(expr("a < b").kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(expr("a < b && c > d").kind(), SyntaxKind::BINARY_EXPR);
    }

    #[test]
    fn test_lambdas() {
        assert_eq!(expr("x => x + 1").kind(), SyntaxKind::SIMPLE_LAMBDA_EXPR);
        assert_eq!(expr("(d, e) => Foo(d)").kind(), SyntaxKind::PAREN_LAMBDA_EXPR);
        assert_eq!(expr("(object o) => { return o; }").kind(), SyntaxKind::PAREN_LAMBDA_EXPR);
    }

    #[test]
    fn test_creation_and_literals() {
        assert_eq!(expr("new PropertyMetadata(default(int))").kind(), SyntaxKind::OBJECT_CREATION_EXPR);
        assert_eq!(expr("new int[] { 1, 2 }").kind(), SyntaxKind::ARRAY_CREATION_EXPR);
        assert_eq!(expr("new Foo { Bar = 1 }").kind(), SyntaxKind::OBJECT_CREATION_EXPR);
        assert_eq!(expr("typeof(List<int>)").kind(), SyntaxKind::TYPEOF_EXPR);
        assert_eq!(expr("nameof(Bar)").kind(), SyntaxKind::INVOCATION_EXPR);
    }

    #[test]
    fn test_is_as_and_conditional() {
        assert_eq!(expr("a is Foo f ? f : null").kind(), SyntaxKind::CONDITIONAL_EXPR);
        assert_eq!(expr("a as Foo ?? b").kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(expr("a is null").kind(), SyntaxKind::IS_EXPR);
        assert_eq!(expr("a ?? throw new X()").kind(), SyntaxKind::BINARY_EXPR);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let source = "class C { void M() { a = b = 1; } }";
        let root = parse(source).syntax();
        let assignment = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ASSIGNMENT_EXPR)
            .unwrap();
        assert_eq!(
            assignment.children().nth(1).unwrap().kind(),
            SyntaxKind::ASSIGNMENT_EXPR
        );
    }
}
