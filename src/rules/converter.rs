//! `IValueConverter` and `IMultiValueConverter` implementations.

use smol_str::SmolStr;

use super::descriptors::{WPF0070, WPF0071, WPF0072};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_TYPE, NodeContext};
use crate::hir::{Accessibility, SemanticModel, SymbolId, SymbolKind, TypeRef};
use crate::parser::{
    AsExpr, AstNode, CastExpr, Expr, MemberAccessExpr, MethodDecl, SyntaxKind, SyntaxNode,
    TypeDecl, TypeSyntax,
};
use crate::syntax::{try_get_argument_type, try_get_attribute};
use crate::wpf::known;

pub struct ValueConverterAnalyzer;

impl Analyzer for ValueConverterAnalyzer {
    fn name(&self) -> &'static str {
        "ValueConverterAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0070, &WPF0071, &WPF0072]
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
        let ty = model.symbols().self_type(symbol);
        let is_converter = model.inherits_from(&ty, known::VALUE_CONVERTER);
        if !is_converter && !model.inherits_from(&ty, known::MULTI_VALUE_CONVERTER) {
            return;
        }
        let Some(identifier) = class.name_token() else {
            return;
        };

        if needs_default_field(&class, symbol, model) {
            ctx.report(&WPF0070, identifier.text_range(), &[]);
        }
        if !is_converter {
            return;
        }
        let Some((source, target)) = infer_conversion_types(&class, model) else {
            return;
        };
        match try_get_attribute(class.syntax(), known::VALUE_CONVERSION_ATTRIBUTE, model) {
            None => ctx.report(&WPF0071, identifier.text_range(), &[]),
            Some(attribute) => {
                for (position, name, expected) in
                    [(0, "sourceType", &source), (1, "targetType", &target)]
                {
                    let Some((argument, actual)) =
                        try_get_argument_type(&attribute, position, name, model)
                    else {
                        continue;
                    };
                    if actual != *expected {
                        let expected = model.display(expected);
                        ctx.report_with(
                            &WPF0072,
                            argument.syntax().text_range(),
                            &[expected.as_str()],
                            vec![(SmolStr::new(EXPECTED_TYPE), expected.clone())],
                        );
                    }
                }
            }
        }
    }
}

/// A stateless converter without a shared instance
fn needs_default_field(class: &TypeDecl, symbol: SymbolId, model: &SemanticModel<'_>) -> bool {
    if class.is_abstract() || class.is_static() || !class.type_parameters().is_empty() {
        return false;
    }
    let symbols = model.symbols();
    let own = symbols.self_type(symbol);
    let converter = symbols.get(symbol);
    let mut has_default = false;
    for &member in &converter.members {
        let member = symbols.get(member);
        match member.kind {
            SymbolKind::Field | SymbolKind::Property if member.is_static => {
                let visible = matches!(
                    member.accessibility,
                    Accessibility::Public | Accessibility::Internal
                );
                has_default |= visible && member.ty.as_ref() == Some(&own);
            }
            SymbolKind::Field if !member.is_readonly => return false,
            SymbolKind::Constructor if !member.is_static && !member.parameters.is_empty() => {
                return false;
            }
            _ => {}
        }
    }
    let has_settable_property = class
        .properties()
        .any(|p| !p.is_static() && p.setter().is_some());
    !has_default && !has_settable_property
}

/// Source and target types of an `IValueConverter`, read from how
/// `Convert` treats `value` and what it returns.
pub(crate) fn infer_conversion_types(
    class: &TypeDecl,
    model: &SemanticModel<'_>,
) -> Option<(TypeRef, TypeRef)> {
    let convert = class
        .methods()
        .find(|m| m.name().as_deref() == Some("Convert") && m.parameters().len() == 4)?;
    let value = convert.parameters().first()?.name()?;
    let body = method_body(&convert)?;
    let source = agreeing(source_types(&body, &value, model))?;
    let target = returned_type(&convert, model)?;
    Some((source, target))
}

/// The single type `method` returns, when more specific than `object`
pub(super) fn returned_type(method: &MethodDecl, model: &SemanticModel<'_>) -> Option<TypeRef> {
    let body = method_body(method)?;
    let ty = agreeing(return_types(method, &body, model)?)?;
    (!model.is_type(&ty, known::OBJECT)).then_some(ty)
}

fn method_body(method: &MethodDecl) -> Option<SyntaxNode> {
    method
        .expression_body()
        .map(|e| e.syntax().clone())
        .or_else(|| method.body().map(|b| b.syntax().clone()))
}

/// The one type every item agrees on
fn agreeing(types: Vec<TypeRef>) -> Option<TypeRef> {
    let first = types.first()?.clone();
    types.iter().all(|t| *t == first).then_some(first)
}

/// Types `value` is cast to, `as`-converted to or tested against
fn source_types(body: &SyntaxNode, value: &str, model: &SemanticModel<'_>) -> Vec<TypeRef> {
    let is_value = |expr: Option<Expr>| {
        expr.and_then(|e| e.unparenthesized().as_identifier())
            .is_some_and(|name| name.as_str() == value)
    };
    let mut found = Vec::new();
    for node in body.descendants() {
        let ty = match node.kind() {
            SyntaxKind::CAST_EXPR => CastExpr::cast(node)
                .filter(|c| is_value(c.expr()))
                .and_then(|c| c.ty()),
            SyntaxKind::AS_EXPR => AsExpr::cast(node)
                .filter(|a| is_value(a.expr()))
                .and_then(|a| a.ty()),
            SyntaxKind::IS_EXPR => {
                let mut children = node.children();
                let operand = children.next().and_then(Expr::cast);
                let ty = children.next().and_then(TypeSyntax::cast);
                if is_value(operand) { ty } else { None }
            }
            _ => None,
        };
        if let Some(ty) = ty.and_then(|t| model.resolve_type_syntax(&t)) {
            found.push(model.nullable_underlying(&ty).unwrap_or(ty));
        }
    }
    found
}

/// Types of every returned value besides `null` and the binding sentinels;
/// `None` when one of them is unknown.
fn return_types(
    convert: &MethodDecl,
    body: &SyntaxNode,
    model: &SemanticModel<'_>,
) -> Option<Vec<TypeRef>> {
    let returned: Vec<Expr> = match convert.expression_body() {
        Some(expr) => vec![expr],
        None => body
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::RETURN_STMT)
            .filter(|n| !is_in_lambda(n, body))
            .filter_map(|n| n.children().find_map(Expr::cast))
            .collect(),
    };
    let mut types = Vec::new();
    for expr in returned {
        let expr = expr.unparenthesized();
        if is_sentinel(&expr) {
            continue;
        }
        match model.type_of(expr.syntax())? {
            TypeRef::Null => {}
            ty => types.push(ty),
        }
    }
    Some(types)
}

fn is_in_lambda(node: &SyntaxNode, body: &SyntaxNode) -> bool {
    node.ancestors()
        .take_while(|a| a != body)
        .any(|a| {
            matches!(
                a.kind(),
                SyntaxKind::SIMPLE_LAMBDA_EXPR | SyntaxKind::PAREN_LAMBDA_EXPR
            )
        })
}

/// `Binding.DoNothing` and `DependencyProperty.UnsetValue`
fn is_sentinel(expr: &Expr) -> bool {
    MemberAccessExpr::cast(expr.syntax().clone())
        .and_then(|a| a.name_text())
        .is_some_and(|name| name == "DoNothing" || name == "UnsetValue")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::hir::Compilation;
    use crate::rules::tests::{analyze, messages};

    const BOOL_TO_VISIBILITY: &str = r#"
namespace N
{
    using System;
    using System.Globalization;
    using System.Windows;
    using System.Windows.Data;

    public class BoolToVisibilityConverter : IValueConverter
    {
        public object Convert(object value, Type targetType, object parameter, CultureInfo culture)
        {
            if (value is bool b && b)
            {
                return Visibility.Visible;
            }

            return Visibility.Collapsed;
        }

        public object ConvertBack(object value, Type targetType, object parameter, CultureInfo culture)
        {
            throw new NotSupportedException();
        }
    }
}"#;

    #[test]
    fn test_missing_default_field_and_attribute() {
        let diagnostics = analyze(&ValueConverterAnalyzer, BOOL_TO_VISIBILITY);
        let ids: Vec<&str> = diagnostics.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["WPF0070", "WPF0071"]);
        assert_eq!(&BOOL_TO_VISIBILITY[diagnostics[0].range], "BoolToVisibilityConverter");
    }

    #[test]
    fn test_inferred_types() {
        let compilation = Compilation::from_text(BOOL_TO_VISIBILITY);
        let document = compilation.documents().next().map(|d| d.id).unwrap();
        let model = compilation.semantic_model(document).unwrap();
        let class = model.root().descendants().find_map(TypeDecl::cast).unwrap();
        let (source, target) = infer_conversion_types(&class, &model).unwrap();
        assert_eq!(model.display(&source), "bool");
        assert_eq!(model.display(&target), "Visibility");
    }

    #[rstest]
    #[case::wrong_source("[ValueConversion(typeof(int), typeof(string))]", "typeof(int)", "ValueConversion must use correct types. Expected: double")]
    #[case::wrong_target("[ValueConversion(typeof(double), typeof(object))]", "typeof(object)", "ValueConversion must use correct types. Expected: string")]
    fn test_value_conversion_types(#[case] attribute: &str, #[case] span: &str, #[case] message: &str) {
        let source = format!(
            r#"
namespace N
{{
    using System;
    using System.Globalization;
    using System.Windows.Data;

    {attribute}
    public sealed class DoubleToStringConverter : IValueConverter
    {{
        public static readonly DoubleToStringConverter Default = new DoubleToStringConverter();

        public object Convert(object value, Type targetType, object parameter, CultureInfo culture)
        {{
            return ((double)value).ToString();
        }}

        public object ConvertBack(object value, Type targetType, object parameter, CultureInfo culture)
        {{
            throw new NotSupportedException();
        }}
    }}
}}"#
        );
        let diagnostics = analyze(&ValueConverterAnalyzer, &source);
        assert_eq!(messages(&diagnostics), [message]);
        assert_eq!(&source[diagnostics[0].range], span);
    }

    #[rstest]
    #[case::stateful("private int count;")]
    #[case::settable("public string Format { get; set; }")]
    #[case::configured("public FooConverter(int offset) { }")]
    fn test_stateful_converters_need_no_default(#[case] member: &str) {
        let source = format!(
            r#"
namespace N
{{
    using System;
    using System.Globalization;
    using System.Windows.Data;

    public class FooConverter : IMultiValueConverter
    {{
        {member}

        public object Convert(object[] values, Type targetType, object parameter, CultureInfo culture) => null;

        public object[] ConvertBack(object value, Type[] targetTypes, object parameter, CultureInfo culture) => null;
    }}
}}"#
        );
        assert!(analyze(&ValueConverterAnalyzer, &source).is_empty());
    }
}
