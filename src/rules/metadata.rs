//! Default values passed to property metadata.

use super::descriptors::WPF0010;
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, NodeContext};
use crate::hir::{SemanticModel, TypeRef};
use crate::parser::{AstNode, CastExpr, Expr, ObjectCreationExpr, SyntaxKind};
use crate::wpf::{PropertyMetadataCall, known};

pub struct PropertyMetadataAnalyzer;

impl Analyzer for PropertyMetadataAnalyzer {
    fn name(&self) -> &'static str {
        "PropertyMetadataAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0010]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::OBJECT_CREATION_EXPR]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(creation) = ObjectCreationExpr::cast(ctx.node().clone()) else {
            return;
        };
        let Some(metadata) = PropertyMetadataCall::try_create(&creation, model) else {
            return;
        };
        let Some(value) = metadata.default_value_argument(model).and_then(|a| a.expr()) else {
            return;
        };
        let Some(call) = metadata.registration(model) else {
            return;
        };
        let (Some(registered), Some(name)) = (call.registered_type(model), call.property_name(model))
        else {
            return;
        };
        let value = strip_object_casts(value, model);
        if !is_valid_default(&value, &registered, model) {
            ctx.report(
                &WPF0010,
                value.syntax().text_range(),
                &[name.as_str(), model.display(&registered).as_str()],
            );
        }
    }
}

/// `(object)1` is still an `int`
fn strip_object_casts(mut expr: Expr, model: &SemanticModel<'_>) -> Expr {
    loop {
        expr = expr.unparenthesized();
        let Some(cast) = CastExpr::cast(expr.syntax().clone()) else {
            return expr;
        };
        let is_object = cast
            .ty()
            .and_then(|t| model.resolve_type_syntax(&t))
            .is_some_and(|t| model.is_type(&t, known::OBJECT));
        match cast.expr() {
            Some(inner) if is_object => expr = inner,
            _ => return expr,
        }
    }
}

fn is_valid_default(value: &Expr, registered: &TypeRef, model: &SemanticModel<'_>) -> bool {
    let Some(ty) = model.type_of(value.syntax()) else {
        return true;
    };
    if model.is_type(&ty, known::OBJECT) {
        return true;
    }
    if let TypeRef::TypeParam { .. } = registered {
        return ty == *registered;
    }
    model.is_assignable(&ty, registered)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::rules::tests::{analyze, messages};

    fn control(property_type: &str, metadata: &str) -> String {
        format!(
            r#"
namespace N
{{
    using System.Collections.Generic;
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {{
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof({property_type}), typeof(FooControl), {metadata});

        public {property_type} Bar
        {{
            get => ({property_type})this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }}
    }}
}}"#
        )
    }

    #[rstest]
    #[case::double_for_int("int", "new PropertyMetadata(1.0)", "1.0", "Default value for 'Bar' must be of type int")]
    #[case::boxed("int", "new PropertyMetadata((object)1.0)", "1.0", "Default value for 'Bar' must be of type int")]
    #[case::int_for_double("double", "new FrameworkPropertyMetadata(1)", "1", "Default value for 'Bar' must be of type double")]
    #[case::null_for_value("int", "new PropertyMetadata(null)", "null", "Default value for 'Bar' must be of type int")]
    #[case::string_for_list("List<int>", "new PropertyMetadata(\"abc\")", "\"abc\"", "Default value for 'Bar' must be of type List<int>")]
    fn test_wrong_default_values(
        #[case] property_type: &str,
        #[case] metadata: &str,
        #[case] span: &str,
        #[case] message: &str,
    ) {
        let source = control(property_type, metadata);
        let diagnostics = analyze(&PropertyMetadataAnalyzer, &source);
        assert_eq!(messages(&diagnostics), [message]);
        assert_eq!(&source[diagnostics[0].range], span);
    }

    #[rstest]
    #[case("int", "new PropertyMetadata(default(int))")]
    #[case("int", "new PropertyMetadata(1)")]
    #[case("int?", "new PropertyMetadata(null)")]
    #[case("int?", "new PropertyMetadata(2)")]
    #[case("double", "new PropertyMetadata(1.0, null)")]
    #[case("string", "new PropertyMetadata(null)")]
    #[case("object", "new PropertyMetadata(1)")]
    #[case("IEnumerable<int>", "new PropertyMetadata(new List<int>())")]
    #[case("int", "new PropertyMetadata(Unknown.Value)")]
    fn test_valid_default_values(#[case] property_type: &str, #[case] metadata: &str) {
        let source = control(property_type, metadata);
        assert!(analyze(&PropertyMetadataAnalyzer, &source).is_empty());
    }

    #[test]
    fn test_generic_registration_requires_type_parameter() {
        let source = r#"
namespace N
{
    using System.Windows;

    public class Foo<T> : FrameworkElement
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(T), typeof(Foo<T>), new PropertyMetadata(default(T)));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(T), typeof(Foo<T>), new PropertyMetadata(1));
    }
}"#;
        let diagnostics = analyze(&PropertyMetadataAnalyzer, source);
        assert_eq!(messages(&diagnostics), ["Default value for 'Baz' must be of type T"]);
    }
}
