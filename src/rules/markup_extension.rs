//! `MarkupExtension` subclasses.

use smol_str::SmolStr;

use super::converter::returned_type;
use super::descriptors::{WPF0080, WPF0081, WPF0083};
use crate::diagnostics::{ARGUMENT_NAME, Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::{SemanticModel, SymbolId, SymbolKind};
use crate::parser::{
    AssignmentExpr, AstNode, ConstructorDecl, PropertyDecl, SyntaxKind, SyntaxNode, TypeDecl,
};
use crate::syntax::{try_get_argument_type, try_get_attribute};
use crate::wpf::known;

pub struct MarkupExtensionAnalyzer;

impl Analyzer for MarkupExtensionAnalyzer {
    fn name(&self) -> &'static str {
        "MarkupExtensionAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0080, &WPF0081, &WPF0083]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::CLASS_DECL]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(class) = TypeDecl::cast(ctx.node().clone()) else {
            return;
        };
        let Some(symbol) = model.declared_symbol(class.syntax()) else {
            return;
        };
        if class.is_abstract()
            || !model.inherits_from(&model.symbols().self_type(symbol), known::MARKUP_EXTENSION)
        {
            return;
        }
        check_return_type(ctx, &class);
        for constructor in class.constructors().filter(|c| !c.is_static()) {
            check_constructor_arguments(ctx, symbol, &constructor);
        }
    }
}

fn check_return_type(ctx: &mut NodeContext<'_, '_>, class: &TypeDecl) {
    let model = ctx.model();
    let Some(provide_value) = class
        .methods()
        .find(|m| m.name().as_deref() == Some("ProvideValue"))
    else {
        return;
    };
    let Some(returned) = returned_type(&provide_value, model) else {
        return;
    };
    let attribute = try_get_attribute(
        class.syntax(),
        known::MARKUP_EXTENSION_RETURN_TYPE_ATTRIBUTE,
        model,
    );
    match attribute {
        None => {
            if let Some(identifier) = class.name_token() {
                ctx.report(&WPF0080, identifier.text_range(), &[]);
            }
        }
        Some(attribute) => {
            let Some((argument, declared)) =
                try_get_argument_type(&attribute, 0, "returnType", model)
            else {
                return;
            };
            if declared != returned {
                ctx.report(
                    &WPF0081,
                    argument.syntax().text_range(),
                    &[model.display(&returned).as_str()],
                );
            }
        }
    }
}

/// `this.Member = member;` in a constructor makes `member` the XAML
/// constructor argument of `Member`.
fn check_constructor_arguments(
    ctx: &mut NodeContext<'_, '_>,
    class: SymbolId,
    constructor: &ConstructorDecl,
) {
    let model = ctx.model();
    let Some(body) = constructor.body() else {
        return;
    };
    let parameters: Vec<_> = constructor
        .parameter_list()
        .map(|l| l.parameters().filter_map(|p| p.name()).collect())
        .unwrap_or_default();
    for assignment in body.syntax().descendants().filter_map(AssignmentExpr::cast) {
        if assignment.op_kind() != Some(SyntaxKind::EQ) {
            continue;
        }
        let (Some(lhs), Some(rhs)) = (assignment.lhs(), assignment.rhs()) else {
            continue;
        };
        let Some(parameter) = rhs
            .unparenthesized()
            .as_identifier()
            .filter(|name| parameters.contains(name))
        else {
            continue;
        };
        let Some(property) = own_property(model, class, lhs.syntax()) else {
            continue;
        };
        let Some(declaration) = model
            .declarations(property)
            .into_iter()
            .find_map(PropertyDecl::cast)
        else {
            continue;
        };
        if try_get_attribute(
            declaration.syntax(),
            known::CONSTRUCTOR_ARGUMENT_ATTRIBUTE,
            model,
        )
        .is_some()
        {
            continue;
        }
        if let Some(identifier) = declaration.name_token() {
            ctx.report_with(
                &WPF0083,
                identifier.text_range(),
                &[parameter.as_str()],
                vec![(SmolStr::new(ARGUMENT_NAME), parameter.to_string())],
            );
        }
    }
}

fn own_property(
    model: &SemanticModel<'_>,
    class: SymbolId,
    node: &SyntaxNode,
) -> Option<SymbolId> {
    let symbols = model.symbols();
    let property = model.symbol(node)?;
    let symbol = symbols.get(property);
    (symbol.kind == SymbolKind::Property && symbol.container == Some(class)).then_some(property)
}
