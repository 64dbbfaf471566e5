//! Casts of `GetTemplateChild` results against `[TemplatePart]`.

use super::descriptors::WPF0131;
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::{SemanticModel, SymbolId, TypeRef};
use crate::parser::{
    AsExpr, AstNode, Attribute, AttributeList, CastExpr, Expr, InvocationExpr, SyntaxKind,
    SyntaxNode, TypeSyntax,
};
use crate::syntax::{
    is_attribute, try_get_argument_string_value, try_get_argument_type, try_get_string_value,
};
use crate::wpf::known;

pub struct TemplatePartAnalyzer;

impl Analyzer for TemplatePartAnalyzer {
    fn name(&self) -> &'static str {
        "TemplatePartAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0131]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::CAST_EXPR, SyntaxKind::AS_EXPR, SyntaxKind::IS_EXPR]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let node = ctx.node().clone();
        let Some((operand, type_syntax)) = operand_and_type(&node) else {
            return;
        };
        let Some(part_name) = template_child_name(&operand, model) else {
            return;
        };
        let Some(class) = model.containing_type(&node) else {
            return;
        };
        let Some(part_type) = declared_part_type(model, class, &part_name) else {
            return;
        };
        let Some(cast_type) = model.resolve_type_syntax(&type_syntax) else {
            return;
        };
        let cast_type = model.nullable_underlying(&cast_type).unwrap_or(cast_type);
        if !model.is_assignable(&part_type, &cast_type) && !model.is_assignable(&cast_type, &part_type)
        {
            ctx.report(&WPF0131, type_syntax.syntax().text_range(), &[]);
        }
    }
}

fn operand_and_type(node: &SyntaxNode) -> Option<(Expr, TypeSyntax)> {
    match node.kind() {
        SyntaxKind::CAST_EXPR => {
            let cast = CastExpr::cast(node.clone())?;
            Some((cast.expr()?, cast.ty()?))
        }
        SyntaxKind::AS_EXPR => {
            let expr = AsExpr::cast(node.clone())?;
            Some((expr.expr()?, expr.ty()?))
        }
        SyntaxKind::IS_EXPR => {
            let mut children = node.children();
            let operand = children.next().and_then(Expr::cast)?;
            Some((operand, children.next().and_then(TypeSyntax::cast)?))
        }
        _ => None,
    }
}

/// `"PART_Bar"` in `GetTemplateChild("PART_Bar")` on a `Control`
fn template_child_name(operand: &Expr, model: &SemanticModel<'_>) -> Option<String> {
    let invocation = InvocationExpr::cast(operand.unparenthesized().syntax().clone())?;
    if invocation.method_name()?.as_str() != "GetTemplateChild" {
        return None;
    }
    let symbols = model.symbols();
    let method = model.symbol(invocation.syntax())?;
    let control = symbols.type_by_name("System.Windows.Controls.Control")?;
    if symbols.containing_type(method) != Some(control) {
        return None;
    }
    let argument = invocation.arguments().into_iter().next()?;
    try_get_string_value(&argument.expr()?, model)
}

/// `Type` of the `[TemplatePart(Name = name)]` on `class`
fn declared_part_type(model: &SemanticModel<'_>, class: SymbolId, name: &str) -> Option<TypeRef> {
    model
        .declarations(class)
        .iter()
        .flat_map(|declaration| declaration.children().filter_map(AttributeList::cast))
        .flat_map(|list| list.attributes().collect::<Vec<Attribute>>())
        .filter(|a| is_attribute(a, known::TEMPLATE_PART_ATTRIBUTE, model))
        .filter(|a| {
            try_get_argument_string_value(a, usize::MAX, "Name", model)
                .is_some_and(|(_, value)| value == name)
        })
        .find_map(|a| try_get_argument_type(&a, usize::MAX, "Type", model))
        .map(|(_, ty)| ty)
}
