//! `GetBar` / `SetBar` accessors of attached properties.

use smol_str::SmolStr;

use super::descriptors::WPF0004;
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_NAME, NodeContext};
use crate::parser::{AstNode, MethodDecl, SyntaxKind};
use crate::wpf::{ClrMethod, try_get_registration};

pub struct ClrMethodAnalyzer;

impl Analyzer for ClrMethodAnalyzer {
    fn name(&self) -> &'static str {
        "ClrMethodAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0004]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::METHOD_DECL]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let model = ctx.model();
        let Some(method) = MethodDecl::cast(ctx.node().clone()) else {
            return;
        };
        let Some(clr) = ClrMethod::try_create(&method, model) else {
            return;
        };
        let Some(backing) = clr.backing(model) else {
            return;
        };
        let Some((registration_model, call)) = try_get_registration(backing, model) else {
            return;
        };
        if !call.kind().is_attached() {
            return;
        }
        let Some(registered) = call.registered_name(&registration_model) else {
            return;
        };
        let expected = if clr.is_getter() {
            format!("Get{registered}")
        } else {
            format!("Set{registered}")
        };
        let (Some(name), Some(identifier)) = (method.name(), method.name_token()) else {
            return;
        };
        if name.as_str() != expected {
            ctx.report_with(
                &WPF0004,
                identifier.text_range(),
                &[name.as_str(), expected.as_str()],
                vec![(SmolStr::new(EXPECTED_NAME), expected.clone())],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{analyze, messages};

    #[test]
    fn test_attached_accessors() {
        let source = r#"
namespace N
{
    using System.Windows;

    public static class Foo
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.RegisterAttached(
            "Bar", typeof(int), typeof(Foo), new PropertyMetadata(default(int)));

        public static void SetError(DependencyObject element, int value) => element.SetValue(BarProperty, value);

        public static int GetBar(DependencyObject element)
        {
            return (int)element.GetValue(BarProperty);
        }
    }
}"#;
        let diagnostics = analyze(&ClrMethodAnalyzer, source);
        assert_eq!(messages(&diagnostics), ["Method 'SetError' must be named 'SetBar'"]);
        assert_eq!(&source[diagnostics[0].range], "SetError");
    }

    #[test]
    fn test_helpers_for_instance_properties_are_ignored() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Bar", typeof(int), typeof(FooControl));

        public static void Update(FooControl control, int value) => control.SetValue(BarProperty, value);
    }
}"#;
        assert!(analyze(&ClrMethodAnalyzer, source).is_empty());
    }
}
