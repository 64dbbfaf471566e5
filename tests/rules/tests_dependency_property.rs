//! Dependency property rules end to end.

use rstest::rstest;
use wpf_analyzers::diagnostics::EXPECTED_NAME;

use crate::helpers::analysis_helpers::*;
use crate::helpers::fixtures::*;

// =============================================================================
// CLR PROPERTY NAME
// =============================================================================

#[test]
fn test_property_registered_under_another_name() {
    let marked = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            "Baz", typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int ↓Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }
    }
}"#;
    let found = assert_diagnostics(marked, "WPF0003");
    assert_eq!(found.len(), 1);
    let diagnostic = &found[0];
    assert!(diagnostic.message.contains("Bar"));
    assert!(diagnostic.message.contains("Baz"));
    assert_eq!(diagnostic.message, "Property 'Bar' must be named 'Baz'");
    let (source, _) = strip_markers(marked);
    assert_eq!(&source[diagnostic.range], "Bar");
    assert_eq!(diagnostic.property(EXPECTED_NAME), Some("Baz"));
}

// =============================================================================
// REGISTERED NAME FORMS
// =============================================================================

#[rstest]
#[case::literal("\"Bar\"")]
#[case::name_of("nameof(Bar)")]
#[case::qualified_name_of("nameof(FooControl.Bar)")]
fn test_registered_name_forms_are_valid(#[case] name: &str) {
    let source = VALID_CONTROL.replace("nameof(Bar),", &format!("{name},"));
    assert_valid(&source);
}

#[rstest]
#[case::literal("\"Bar\"")]
#[case::name_of("nameof(Bar)")]
#[case::qualified_name_of("nameof(FooControl.Bar)")]
fn test_registered_name_forms_agree(#[case] name: &str) {
    let source = VALID_CONTROL
        .replace("nameof(Bar),", &format!("{name},"))
        .replace("BarProperty", "Error");
    let found: Vec<_> = analyze(&source)
        .into_iter()
        .filter(|d| d.id == "WPF0001")
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].message,
        "Field 'Error' that is backing field for the DependencyProperty registered as 'Bar' must be named 'BarProperty'"
    );
}

// =============================================================================
// READ-ONLY DEPENDENCY PROPERTIES
// =============================================================================

fn read_only(backing: &str, members: &str) -> String {
    format!(
        r#"
namespace N
{{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {{
        private static readonly DependencyPropertyKey BarPropertyKey = DependencyProperty.RegisterReadOnly(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        {backing}

        public int Bar
        {{
            get => (int)this.GetValue(BarProperty);
            private set => this.SetValue(BarPropertyKey, value);
        }}
{members}
    }}
}}"#
    )
}

const BACKING_FIELD: &str =
    "public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;";
const BACKING_PROPERTY: &str =
    "public static DependencyProperty BarProperty { get; } = BarPropertyKey.DependencyProperty;";

#[rstest]
#[case::field(BACKING_FIELD)]
#[case::property(BACKING_PROPERTY)]
fn test_read_only_backing_forms_are_valid(#[case] backing: &str) {
    assert_valid(&read_only(backing, ""));
}

#[rstest]
#[case::field(BACKING_FIELD)]
#[case::property(BACKING_PROPERTY)]
fn test_read_only_backing_forms_agree_on_type(#[case] backing: &str) {
    let source = read_only(
        backing,
        "\n        public void M() { this.SetValue(BarPropertyKey, \"text\"); }",
    );
    let found: Vec<_> = analyze(&source)
        .into_iter()
        .filter(|d| d.id == "WPF0014")
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "SetValue must use registered type int");
    assert_eq!(&source[found[0].range], "\"text\"");
}

#[test]
fn test_read_only_set_value_is_not_set_current_value() {
    let source = read_only(BACKING_FIELD, "\n        public void M() { this.Bar = 1; }");
    assert!(!ids(&analyze(&source)).contains(&"WPF0041"));
}

// =============================================================================
// SET VALUE
// =============================================================================

#[rstest]
#[case::invocation("public void M() { ↓this.SetValue(BarProperty, 1); }")]
#[case::conditional("public static void M(FooControl c) { c?↓.SetValue(BarProperty, 1); }")]
#[case::assignment("public void M() { ↓this.Bar = 1; }")]
fn test_prefer_set_current_value(#[case] member: &str) {
    let marked = control(&format!("\n        {member}"));
    assert_diagnostics(&marked, "WPF0041");
}

#[test]
fn test_callback_names() {
    let marked = control(
        r#"
        public static readonly DependencyProperty BazProperty = DependencyProperty.Register(
            nameof(Baz), typeof(int), typeof(FooControl), new PropertyMetadata(default(int), ↓OnChanged));

        public int Baz
        {
            get => (int)this.GetValue(BazProperty);
            set => this.SetValue(BazProperty, value);
        }

        private static void OnChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
            ((FooControl)d).InvalidateVisual();
        }"#,
    );
    let found = assert_diagnostics(&marked, "WPF0005");
    assert_eq!(found[0].message, "Method 'OnChanged' should be named 'OnBazChanged'");
}
