//! Attribute and argument queries.

use tokio_util::sync::CancellationToken;

use crate::hir::{Binding, SemanticModel, SymbolKind, TypeRef};
use crate::parser::{
    AstNode, Attribute, AttributeArgument, AttributeList, Expr, InvocationExpr, LiteralExpr,
    SyntaxKind, SyntaxNode, TypeofExpr, VariableDeclarator,
};

/// Const fields are followed at most this deep when reading string values.
const MAX_CONST_DEPTH: usize = 4;

/// True when `attribute` denotes the attribute class `attribute_type`
/// (metadata name), however it is spelled.
pub fn is_attribute(attribute: &Attribute, attribute_type: &str, model: &SemanticModel<'_>) -> bool {
    model
        .attribute_type(attribute)
        .is_some_and(|ty| model.is_type(&ty, attribute_type))
}

/// The attribute of type `attribute_type` applied directly to the
/// declaration `node`.
pub fn try_get_attribute(
    node: &SyntaxNode,
    attribute_type: &str,
    model: &SemanticModel<'_>,
) -> Option<Attribute> {
    node.children()
        .filter_map(AttributeList::cast)
        .flat_map(|list| list.attributes().collect::<Vec<_>>())
        .find(|a| is_attribute(a, attribute_type, model))
}

/// Every usage of `attribute_type` under `root`, in source order.
///
/// Returns nothing when `token` is cancelled.
pub fn find_attributes(
    root: &SyntaxNode,
    attribute_type: &str,
    model: &SemanticModel<'_>,
    token: &CancellationToken,
) -> Vec<Attribute> {
    let mut found = Vec::new();
    for attribute in root.descendants().filter_map(Attribute::cast) {
        if token.is_cancelled() {
            return Vec::new();
        }
        if is_attribute(&attribute, attribute_type, model) {
            found.push(attribute);
        }
    }
    found
}

/// An attribute argument by constructor position, or by `name:` / `Name =`.
///
/// Named arguments win; positional arguments are counted without the named
/// property assignments that may follow them.
pub fn try_get_argument(
    attribute: &Attribute,
    position: usize,
    name: &str,
) -> Option<AttributeArgument> {
    let arguments = attribute.arguments();
    if let Some(named) = arguments.iter().find(|a| {
        a.name_colon().as_deref() == Some(name)
            || a.name_equals()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }) {
        return Some(named.clone());
    }
    arguments
        .into_iter()
        .filter(|a| a.name_equals().is_none() && a.name_colon().is_none())
        .nth(position)
}

/// Argument and its string value, accepting `"X"`, `nameof(X)` and const
/// string fields.
pub fn try_get_argument_string_value(
    attribute: &Attribute,
    position: usize,
    name: &str,
    model: &SemanticModel<'_>,
) -> Option<(AttributeArgument, String)> {
    let argument = try_get_argument(attribute, position, name)?;
    let value = try_get_string_value(&argument.expr()?, model)?;
    Some((argument, value))
}

/// Argument and the type of its `typeof(T)` expression.
pub fn try_get_argument_type(
    attribute: &Attribute,
    position: usize,
    name: &str,
    model: &SemanticModel<'_>,
) -> Option<(AttributeArgument, TypeRef)> {
    let argument = try_get_argument(attribute, position, name)?;
    let expr = argument.expr()?.unparenthesized();
    let typeof_expr = TypeofExpr::cast(expr.syntax().clone())?;
    let ty = model.resolve_type_syntax(&typeof_expr.ty()?)?;
    Some((argument, ty))
}

/// String value of a literal, `nameof` or const field expression.
pub fn try_get_string_value(expr: &Expr, model: &SemanticModel<'_>) -> Option<String> {
    string_value(expr, model, 0)
}

fn string_value(expr: &Expr, model: &SemanticModel<'_>, depth: usize) -> Option<String> {
    let expr = expr.unparenthesized();
    match expr.kind() {
        SyntaxKind::LITERAL_EXPR => LiteralExpr::cast(expr.syntax().clone())?.string_value(),
        SyntaxKind::INVOCATION_EXPR => InvocationExpr::cast(expr.syntax().clone())?
            .nameof_value()
            .map(|v| v.to_string()),
        SyntaxKind::IDENTIFIER_NAME | SyntaxKind::MEMBER_ACCESS_EXPR if depth < MAX_CONST_DEPTH => {
            let Binding::Member { symbol, .. } = model.bind(expr.syntax())? else {
                return None;
            };
            let field = model.symbols().get(symbol);
            if field.kind != SymbolKind::Field || !field.is_readonly || !field.is_static {
                return None;
            }
            let declarator = model
                .declarations(symbol)
                .into_iter()
                .find_map(VariableDeclarator::cast)?;
            string_value(&declarator.initializer()?, model, depth + 1)
        }
        _ => None,
    }
}
