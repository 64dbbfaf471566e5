//! Code fixes end to end.

use rstest::rstest;
use tokio_util::sync::CancellationToken;
use wpf_analyzers::{AnalyzerConfig, Compilation, FixEngine};

use crate::helpers::analysis_helpers::*;
use crate::helpers::fixtures::*;

// =============================================================================
// SINGLE FIXES
// =============================================================================

#[rstest]
#[case::invocation(
    "public void M() { ↓this.SetValue(BarProperty, 1); }",
    "public void M() { this.SetCurrentValue(BarProperty, 1); }"
)]
#[case::conditional(
    "public static void M(FooControl c) { c?↓.SetValue(BarProperty, 1); }",
    "public static void M(FooControl c) { c?.SetCurrentValue(BarProperty, 1); }"
)]
#[case::assignment(
    "public void M() { ↓this.Bar = 1; }",
    "public void M() { this.SetCurrentValue(BarProperty, 1); }"
)]
fn test_use_set_current_value(#[case] before: &str, #[case] after: &str) {
    let marked = control(&format!("\n        {before}"));
    let fixed = fix(&marked, "WPF0041");
    assert_eq!(fixed, control(&format!("\n        {after}")));
    assert!(!ids(&analyze(&fixed)).contains(&"WPF0041"));
}

#[test]
fn test_rename_property_to_registered_name() {
    let marked = VALID_CONTROL
        .replace("nameof(Bar),", "\"Baz\",")
        .replace("public int Bar", "public int ↓Bar");
    let fixed = fix(&marked, "WPF0003");
    assert!(fixed.contains("public int Baz"), "{fixed}");
    assert!(!ids(&analyze(&fixed)).contains(&"WPF0003"));
}

#[test]
fn test_fix_keeps_comments() {
    let marked = control(
        "\n        public void M()\n        {\n            // keep\n            ↓this.SetValue(BarProperty, /* one */ 1); // trailing\n        }",
    );
    let fixed = fix(&marked, "WPF0041");
    assert!(fixed.contains(
        "            // keep\n            this.SetCurrentValue(BarProperty, /* one */ 1); // trailing\n"
    ));
}

// =============================================================================
// FIX ALL
// =============================================================================

#[test]
fn test_fix_all_set_value() {
    let source = control(
        r#"
        public void A() { this.SetValue(BarProperty, 1); }

        public void B() { this.SetValue(BarProperty, 2); }

        public void C() { this.Bar = 3; }"#,
    );
    assert_eq!(ids(&analyze(&source)), ["WPF0041", "WPF0041", "WPF0041"]);

    let fixed = fix_all(&source, "WPF0041");
    assert_eq!(fixed.matches("SetCurrentValue(BarProperty, ").count(), 3);
    assert!(analyze(&fixed).is_empty(), "{fixed}");
}

#[test]
fn test_fix_all_without_diagnostics_is_empty() {
    let compilation = Compilation::from_text(VALID_CONTROL);
    let found = analyze_compilation(&compilation, &AnalyzerConfig::default());
    let change =
        FixEngine::new().fix_all(&compilation, "WPF0041", &found, &CancellationToken::new());
    assert!(change.is_empty());
}

// =============================================================================
// SEVERAL DOCUMENTS
// =============================================================================

#[test]
fn test_rename_reaches_other_documents() {
    let control = VALID_CONTROL.replace("BarProperty", "Error");
    let user = r#"
namespace N
{
    using System.Windows;

    public static class User
    {
        public static DependencyProperty Get()
        {
            return FooControl.Error;
        }
    }
}"#;
    let compilation =
        Compilation::from_sources([("FooControl.cs", control.as_str()), ("User.cs", user)]);
    let found: Vec<_> = analyze_compilation(&compilation, &AnalyzerConfig::default())
        .into_iter()
        .filter(|d| d.id == "WPF0001")
        .collect();
    assert_eq!(found.len(), 1);

    let actions = FixEngine::new().code_actions(&compilation, &found[0], &CancellationToken::new());
    let action = &actions[0];
    assert_eq!(action.title, "Rename to: 'BarProperty'.");
    assert_eq!(action.change.documents().count(), 2);

    let (texts, updated) = action.change.apply(&compilation).unwrap();
    let user_id = compilation.document_by_path("User.cs").unwrap().id;
    assert!(texts[&user_id].contains("return FooControl.BarProperty;"));
    assert!(analyze_compilation(&updated, &AnalyzerConfig::default()).is_empty());
}
