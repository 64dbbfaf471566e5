//! `[XamlSetTypeConverter]` handler targets.

use super::descriptors::WPF0085;
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::{SemanticModel, SymbolId, SymbolKind, TypeRef};
use crate::parser::{AstNode, Attribute, SyntaxKind};
use crate::syntax::{is_attribute, try_get_argument_string_value};
use crate::wpf::known;

pub struct XamlSetTypeConverterAnalyzer;

impl Analyzer for XamlSetTypeConverterAnalyzer {
    fn name(&self) -> &'static str {
        "XamlSetTypeConverterAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0085]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ATTRIBUTE]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(attribute) = Attribute::cast(ctx.node().clone()) else {
            return;
        };
        if !is_attribute(&attribute, known::XAML_SET_TYPE_CONVERTER_ATTRIBUTE, model) {
            return;
        }
        let Some((argument, handler)) =
            try_get_argument_string_value(&attribute, 0, "xamlSetTypeConverterHandler", model)
        else {
            return;
        };
        let Some(class) = model.containing_type(attribute.syntax()) else {
            return;
        };
        let symbols = model.symbols();
        let found = symbols
            .base_chain(&symbols.self_type(class))
            .iter()
            .filter_map(TypeRef::def)
            .flat_map(|ty| symbols.children_named(ty, &handler).iter().copied())
            .any(|method| is_handler(model, method));
        if !found {
            ctx.report(&WPF0085, argument.syntax().text_range(), &[handler.as_str()]);
        }
    }
}

/// `void M(object, XamlSetTypeConverterEventArgs)`
fn is_handler(model: &SemanticModel<'_>, method: SymbolId) -> bool {
    let symbol = model.symbols().get(method);
    let [target, args] = symbol.parameters.as_slice() else {
        return false;
    };
    let is = |ty: &Option<TypeRef>, name: &str| ty.as_ref().is_some_and(|t| model.is_type(t, name));
    symbol.kind == SymbolKind::Method
        && is(&symbol.ty, known::VOID)
        && is(&target.ty, known::OBJECT)
        && is(&args.ty, known::XAML_SET_TYPE_CONVERTER_EVENT_ARGS)
}
