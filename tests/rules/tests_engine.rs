//! Engine behavior across the whole catalogue.

use rstest::rstest;
use tokio_util::sync::CancellationToken;
use wpf_analyzers::diagnostics::help_link;
use wpf_analyzers::{AnalyzerConfig, Compilation, registry};

use crate::helpers::analysis_helpers::*;
use crate::helpers::fixtures::*;

// =============================================================================
// NEGATIVE CONTROLS
// =============================================================================

#[rstest]
#[case::plain_class(PLAIN_CLASS)]
#[case::valid_control(VALID_CONTROL)]
#[case::empty("")]
#[case::broken("namespace N { public class { int }")]
fn test_irrelevant_input_has_no_diagnostics(#[case] source: &str) {
    assert_valid(source);
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_analysis_is_idempotent() {
    let source = control(
        r#"
        public void A() { this.SetValue(BarProperty, 1); }

        public void B() { this.SetValue(BarProperty, 1.0); }"#,
    );
    let compilation = Compilation::from_text(&source);
    let first = analyze_compilation(&compilation, &AnalyzerConfig::default());
    let second = analyze_compilation(&compilation, &AnalyzerConfig::default());
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(analyze(&source), first);
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let source = control(
        r#"
        public void A() { this.SetValue(BarProperty, 1); }

        public void B() { this.SetValue(BarProperty, 2); }

        public void C() { this.SetValue(BarProperty, 3); }"#,
    );
    let found = analyze(&source);
    let starts: Vec<_> = found.iter().map(|d| d.range.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(found.len(), 3);
    assert_eq!(starts, sorted);
}

// =============================================================================
// SEVERAL DOCUMENTS
// =============================================================================

#[test]
fn test_usage_in_another_document() {
    let user = r#"
namespace N
{
    public class User
    {
        public void M(FooControl control)
        {
            control.Bar = 1;
        }
    }
}"#;
    let compilation =
        Compilation::from_sources([("FooControl.cs", VALID_CONTROL), ("User.cs", user)]);
    let found = analyze_compilation(&compilation, &AnalyzerConfig::default());
    assert_eq!(ids(&found), ["WPF0041"]);
    assert_eq!(found[0].file, compilation.document_by_path("User.cs").unwrap().id);
    assert_eq!(found[0].message, "Use SetCurrentValue(FooControl.BarProperty, 1)");
}

// =============================================================================
// SUPPRESSION AND CONFIGURATION
// =============================================================================

#[test]
fn test_pragma_suppression() {
    let source = control(
        r#"
#pragma warning disable WPF0041
        public void A() { this.SetValue(BarProperty, 1); }
#pragma warning restore WPF0041

        public void B() { this.SetValue(BarProperty, 2); }"#,
    );
    let found = analyze(&source);
    assert_eq!(ids(&found), ["WPF0041"]);
    assert!(source[found[0].range].contains(", 2)"));
}

#[test]
fn test_disabled_rule_is_not_reported() {
    let source = control("\n        public void A() { this.SetValue(BarProperty, 1); }");
    let config = AnalyzerConfig::default().with_rule("WPF0041", false);
    assert!(analyze_with(&source, &config).is_empty());
}

#[test]
fn test_cancelled_analysis_is_empty() {
    let source = control("\n        public void A() { this.SetValue(BarProperty, 1); }");
    let token = CancellationToken::new();
    token.cancel();
    let result = registry().analyze_compilation(
        &Compilation::from_text(&source),
        &AnalyzerConfig::default(),
        &token,
    );
    assert!(result.diagnostics.is_empty());
}

#[rstest]
#[case::generated_name("FooControl.g.cs", "")]
#[case::generated_header("FooControl.cs", "// <auto-generated>\n// </auto-generated>\n")]
fn test_generated_code_is_not_analyzed(#[case] path: &str, #[case] header: &str) {
    let source = format!(
        "{header}{}",
        control("\n        public void A() { this.SetValue(BarProperty, 1); }")
    );
    let compilation = Compilation::from_sources([(path, source.as_str())]);
    assert!(analyze_compilation(&compilation, &AnalyzerConfig::default()).is_empty());
}

// =============================================================================
// DESCRIPTORS
// =============================================================================

#[test]
fn test_descriptors_are_unique_and_documented() {
    let descriptors: Vec<_> = registry().descriptors().collect();
    assert_eq!(descriptors.len(), 31);
    for pair in descriptors.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
    for descriptor in descriptors {
        assert!(descriptor.id.starts_with("WPF"));
        assert!(!descriptor.title.is_empty());
        assert_eq!(descriptor.help_link(), help_link(descriptor.id));
    }
    assert_eq!(
        help_link("WPF0041"),
        "https://github.com/DotNetAnalyzers/WpfAnalyzers/tree/master/documentation/WPF0041.md"
    );
}
