//! `[assembly: XmlnsDefinition]` and `[assembly: XmlnsPrefix]`.

use super::descriptors::{WPF0050, WPF0051};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::SemanticModel;
use crate::parser::{AstNode, Attribute, SyntaxKind};
use crate::syntax::{find_attributes, is_attribute, try_get_argument_string_value};
use crate::wpf::known;

pub struct XmlnsAnalyzer;

impl Analyzer for XmlnsAnalyzer {
    fn name(&self) -> &'static str {
        "XmlnsAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0050, &WPF0051]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ATTRIBUTE]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(attribute) = Attribute::cast(ctx.node().clone()) else {
            return;
        };
        let (counterpart, counterpart_name) =
            if is_attribute(&attribute, known::XMLNS_DEFINITION_ATTRIBUTE, model) {
                check_clr_namespace(ctx, &attribute);
                (known::XMLNS_PREFIX_ATTRIBUTE, "XmlnsPrefix")
            } else if is_attribute(&attribute, known::XMLNS_PREFIX_ATTRIBUTE, model) {
                (known::XMLNS_DEFINITION_ATTRIBUTE, "XmlnsDefinition")
            } else {
                return;
            };

        let Some((argument, xml_namespace)) =
            try_get_argument_string_value(&attribute, 0, "xmlNamespace", model)
        else {
            return;
        };
        if !is_mapped(model, counterpart, &xml_namespace, ctx) {
            ctx.report(
                &WPF0050,
                argument.syntax().text_range(),
                &[counterpart_name, xml_namespace.as_str()],
            );
        }
    }
}

/// `clrNamespace` must name a namespace of the compilation
fn check_clr_namespace(ctx: &mut NodeContext<'_, '_>, attribute: &Attribute) {
    let model = ctx.model();
    let Some((argument, clr_namespace)) =
        try_get_argument_string_value(attribute, 1, "clrNamespace", model)
    else {
        return;
    };
    if model.symbols().namespace_by_path(&clr_namespace).is_none() {
        ctx.report(&WPF0051, argument.syntax().text_range(), &[clr_namespace.as_str()]);
    }
}

/// Any `attribute_type` usage in the compilation for `xml_namespace`
fn is_mapped(
    model: &SemanticModel<'_>,
    attribute_type: &str,
    xml_namespace: &str,
    ctx: &NodeContext<'_, '_>,
) -> bool {
    let compilation = model.compilation();
    compilation.documents().any(|document| {
        let Some(other) = compilation.semantic_model(document.id) else {
            return false;
        };
        find_attributes(other.root(), attribute_type, &other, ctx.token())
            .iter()
            .filter_map(|a| try_get_argument_string_value(a, 0, "xmlNamespace", &other))
            .any(|(_, value)| value == xml_namespace)
    })
}
