//! Static members holding a dependency property, key or routed event.

use smol_str::SmolStr;

use super::descriptors::{WPF0001, WPF0002, WPF0031, WPF0100};
use crate::diagnostics::{Analyzer, DiagnosticDescriptor, EXPECTED_NAME, NodeContext};
use crate::parser::{AstNode, FieldDecl, MemberAccessExpr, SyntaxKind, SyntaxNode, SyntaxToken};
use crate::wpf::{BackingFieldOrProperty, try_get_registered_name, try_get_registration};

pub struct BackingMemberAnalyzer;

impl Analyzer for BackingMemberAnalyzer {
    fn name(&self) -> &'static str {
        "BackingMemberAnalyzer"
    }

    fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
        &[&WPF0001, &WPF0002, &WPF0031, &WPF0100]
    }

    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::FIELD_DECL, SyntaxKind::PROPERTY_DECL]
    }

    fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
        let member = ctx.node().clone();
        let declarations: Vec<SyntaxNode> = match FieldDecl::cast(member.clone()) {
            Some(field) => field
                .declarators()
                .into_iter()
                .map(|d| d.syntax().clone())
                .collect(),
            None => vec![member.clone()],
        };
        for declaration in &declarations {
            if ctx.is_cancelled() {
                return;
            }
            check_declaration(ctx, &member, declaration);
        }
    }
}

fn check_declaration(ctx: &mut NodeContext<'_, '_>, member: &SyntaxNode, declaration: &SyntaxNode) {
    let model = ctx.model();
    let symbols = model.symbols();
    let Some(symbol) = model.declared_symbol(declaration) else {
        return;
    };
    let Some(identifier) = BackingFieldOrProperty::identifier(declaration) else {
        return;
    };
    if let Some(backing) = BackingFieldOrProperty::try_create_for_dependency_property(symbols, symbol)
    {
        check_dependency_property(ctx, backing, &identifier);
        check_key_order(ctx, backing, member, declaration);
    } else if let Some(backing) = BackingFieldOrProperty::try_create_for_routed_event(symbols, symbol)
    {
        check_routed_event(ctx, backing, &identifier);
    }
}

/// `BarProperty` / `BarPropertyKey` for a property registered as `Bar`
fn check_dependency_property(
    ctx: &mut NodeContext<'_, '_>,
    backing: BackingFieldOrProperty,
    identifier: &SyntaxToken,
) {
    let model = ctx.model();
    let symbols = model.symbols();
    let Some(registered) = try_get_registered_name(backing, model) else {
        return;
    };
    let (descriptor, expected) = if backing.is_key(symbols) {
        (&WPF0002, format!("{registered}PropertyKey"))
    } else {
        (&WPF0001, format!("{registered}Property"))
    };
    let name = backing.name(symbols);
    if name.as_str() != expected {
        ctx.report_with(
            descriptor,
            identifier.text_range(),
            &[name.as_str(), registered.as_str()],
            vec![(SmolStr::new(EXPECTED_NAME), expected)],
        );
    }
}

/// `BarProperty = BarPropertyKey.DependencyProperty` reads the key before
/// it is initialized when the key is declared further down.
fn check_key_order(
    ctx: &mut NodeContext<'_, '_>,
    backing: BackingFieldOrProperty,
    member: &SyntaxNode,
    declaration: &SyntaxNode,
) {
    let model = ctx.model();
    let symbols = model.symbols();
    let Some(value) = BackingFieldOrProperty::value_of(declaration) else {
        return;
    };
    let Some(access) = MemberAccessExpr::cast(value.unparenthesized().syntax().clone()) else {
        return;
    };
    if access.name_text().as_deref() != Some("DependencyProperty") {
        return;
    }
    let Some(key) = access
        .expr()
        .and_then(|e| model.symbol(e.syntax()))
        .and_then(|s| BackingFieldOrProperty::try_create_for_dependency_property(symbols, s))
    else {
        return;
    };
    if !key.is_key(symbols) || key.containing_type(symbols) != backing.containing_type(symbols) {
        return;
    }
    let Some(key_decl) = symbols.get(key.symbol()).declarations.first() else {
        return;
    };
    if key_decl.file != model.file() {
        return;
    }
    if key_decl.ptr.text_range().start() > declaration.text_range().start() {
        ctx.report(
            &WPF0031,
            member.text_range(),
            &[key.name(symbols).as_str(), backing.name(symbols).as_str()],
        );
    }
}

/// `BarEvent` for an event registered as `Bar`
fn check_routed_event(
    ctx: &mut NodeContext<'_, '_>,
    backing: BackingFieldOrProperty,
    identifier: &SyntaxToken,
) {
    let model = ctx.model();
    let Some((registration_model, call)) = try_get_registration(backing, model) else {
        return;
    };
    let Some(registered) = call.registered_name(&registration_model) else {
        return;
    };
    let expected = format!("{registered}Event");
    let name = backing.name(model.symbols());
    if name.as_str() != expected {
        ctx.report_with(
            &WPF0100,
            identifier.text_range(),
            &[name.as_str(), registered.as_str()],
            vec![(SmolStr::new(EXPECTED_NAME), expected)],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{analyze, messages};

    #[test]
    fn test_field_must_match_registered_name() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty ErrorProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl));

        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl));

        public int Bar
        {
            get => (int)this.GetValue(ErrorProperty);
            set => this.SetValue(ErrorProperty, value);
        }
    }
}"#;
        let diagnostics = analyze(&BackingMemberAnalyzer, source);
        assert_eq!(
            messages(&diagnostics),
            ["Field 'ErrorProperty' that is backing field for the DependencyProperty registered as 'Bar' must be named 'BarProperty'"]
        );
        assert_eq!(diagnostics[0].property(EXPECTED_NAME), Some("BarProperty"));
        assert_eq!(&source[diagnostics[0].range], "ErrorProperty");
    }

    #[test]
    fn test_key_field_and_order() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        // reads the key before it is assigned
        public static readonly DependencyProperty BarProperty = BarKey.DependencyProperty;

        private static readonly DependencyPropertyKey BarKey = DependencyProperty.RegisterReadOnly(
            "Bar", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));
    }
}"#;
        let diagnostics = analyze(&BackingMemberAnalyzer, source);
        let ids: Vec<&str> = diagnostics.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["WPF0031", "WPF0002"]);
        assert!(source[diagnostics[0].range].starts_with("public static readonly DependencyProperty BarProperty"));
        assert_eq!(
            diagnostics[0].message,
            "DependencyPropertyKey member 'BarKey' must be declared before 'BarProperty'"
        );
        assert_eq!(diagnostics[1].property(EXPECTED_NAME), Some("BarPropertyKey"));
    }

    #[test]
    fn test_routed_event_field() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly RoutedEvent WrongName = EventManager.RegisterRoutedEvent(
            "ValueChanged", RoutingStrategy.Direct, typeof(RoutedEventHandler), typeof(FooControl));

        public static readonly RoutedEvent ClickedEvent = EventManager.RegisterRoutedEvent(
            "Clicked", RoutingStrategy.Bubble, typeof(RoutedEventHandler), typeof(FooControl));
    }
}"#;
        let diagnostics = analyze(&BackingMemberAnalyzer, source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id.as_str(), "WPF0100");
        assert_eq!(diagnostics[0].property(EXPECTED_NAME), Some("ValueChangedEvent"));
    }

    #[test]
    fn test_add_owner_and_valid_code() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;
    using System.Windows.Documents;

    public class FooControl : FrameworkElement
    {
        public static readonly DependencyProperty FontSizeProperty = TextElement.FontSizeProperty.AddOwner(typeof(FooControl));

        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;

        public static DependencyProperty OtherProperty { get; } = DependencyProperty.Register(
            "Other", typeof(string), typeof(FooControl));

        public int Bar => (int)this.GetValue(BarProperty);
    }
}"#;
        assert!(analyze(&BackingMemberAnalyzer, source).is_empty());
    }
}
