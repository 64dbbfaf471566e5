use super::*;

/// How much of a type the caller wants consumed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeMode {
    /// Declarations: nullable and array suffixes allowed
    Full,
    /// `is`/`as` operands: `?` is left for a following conditional
    NoNullable,
    /// `new T[n]`: the rank is part of the creation expression
    NoArray,
}

/// Type = Name ('?')? ArrayRank*
pub(crate) fn parse_type(p: &mut Parser<'_>, mode: TypeMode) {
    if !p.at(SyntaxKind::IDENT) {
        p.error_bump("expected type");
        return;
    }
    let cp = p.checkpoint();
    parse_name(p);

    if mode != TypeMode::NoNullable && p.at(SyntaxKind::QUESTION) && !nullable_is_conditional(p) {
        p.start_node_at(cp, SyntaxKind::NULLABLE_TYPE);
        p.bump();
        p.finish_node();
    }

    if mode != TypeMode::NoArray {
        while p.at(SyntaxKind::L_BRACKET)
            && matches!(p.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA)
        {
            p.start_node_at(cp, SyntaxKind::ARRAY_TYPE);
            parse_array_rank(p);
            p.finish_node();
        }
    }
}

/// `x is T ? a : b` style lookahead: a `?` followed by an expression start
/// and later a `:` is a conditional operator, not a nullable suffix.
fn nullable_is_conditional(p: &Parser<'_>) -> bool {
    matches!(
        p.nth(1),
        SyntaxKind::INT_NUMBER
            | SyntaxKind::REAL_NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::NULL_KW
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::THIS_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::L_PAREN
    ) || p.nth(1) == SyntaxKind::DOT
}

/// ArrayRank = '[' ','* ']'
fn parse_array_rank(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ARRAY_RANK_SPECIFIER);
    p.bump(); // [
    while p.eat(SyntaxKind::COMMA) {}
    p.expect(SyntaxKind::R_BRACKET);
    p.finish_node();
}

/// Name = (Ident '::')? SimpleName ('.' SimpleName)*
pub(crate) fn parse_name(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    if p.nth(1) == SyntaxKind::COLON_COLON {
        p.start_node(SyntaxKind::ALIAS_QUALIFIED_NAME);
        parse_identifier_name(p);
        p.bump(); // ::
        parse_simple_name(p);
        p.finish_node();
    } else {
        parse_simple_name(p);
    }
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.start_node_at(cp, SyntaxKind::QUALIFIED_NAME);
        p.bump(); // .
        parse_simple_name(p);
        p.finish_node();
    }
}

/// SimpleName = Ident TypeArgumentList?
///
/// Type arguments are only taken when the lookahead proves a closed `<...>`.
pub(crate) fn parse_simple_name(p: &mut Parser<'_>) {
    if p.nth(1) == SyntaxKind::LT && scan_type_args(p, 1).is_some() {
        p.start_node(SyntaxKind::GENERIC_NAME);
        p.bump(); // ident
        parse_type_argument_list(p);
        p.finish_node();
    } else {
        parse_identifier_name(p);
    }
}

/// IdentifierName = Ident
pub(crate) fn parse_identifier_name(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IDENTIFIER_NAME);
    p.expect(SyntaxKind::IDENT);
    p.finish_node();
}

/// TypeArgumentList = '<' Type (',' Type)* '>'
pub(crate) fn parse_type_argument_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TYPE_ARGUMENT_LIST);
    p.bump(); // <
    parse_type(p, TypeMode::Full);
    while p.eat(SyntaxKind::COMMA) {
        parse_type(p, TypeMode::Full);
    }
    p.expect(SyntaxKind::GT);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    fn kinds_of(source: &str) -> Vec<SyntaxKind> {
        parse(source).syntax().descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_generic_field_type() {
        let kinds = kinds_of("class C { List<int> x; }");
        assert!(kinds.contains(&SyntaxKind::GENERIC_NAME));
        assert!(kinds.contains(&SyntaxKind::TYPE_ARGUMENT_LIST));
    }

    #[test]
    fn test_qualified_nullable_array_type() {
        let kinds = kinds_of("class C { System.Int32?[] x; }");
        assert!(kinds.contains(&SyntaxKind::QUALIFIED_NAME));
        assert!(kinds.contains(&SyntaxKind::NULLABLE_TYPE));
        assert!(kinds.contains(&SyntaxKind::ARRAY_TYPE));
    }

    #[test]
    fn test_global_alias_type() {
        let parse = parse("class C { global::System.String x; }");
        assert!(parse.ok(), "{:?}", parse.errors);
        let kinds: Vec<_> = parse.syntax().descendants().map(|n| n.kind()).collect();
        assert!(kinds.contains(&SyntaxKind::ALIAS_QUALIFIED_NAME));
    }
}
