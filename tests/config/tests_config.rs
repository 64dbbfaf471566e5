//! Rule configuration applied to real analysis.

use std::io::Write;

use rstest::rstest;
use tempfile::NamedTempFile;
use wpf_analyzers::diagnostics::ConfigError;
use wpf_analyzers::{AnalyzerConfig, Severity, registry};

use crate::helpers::analysis_helpers::*;
use crate::helpers::fixtures::*;

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn set_value_source() -> String {
    control("\n        public void M() { this.SetValue(BarProperty, 1); }")
}

#[rstest]
#[case::nested_bool(r#"{ "rules": { "WPF0041": false } }"#)]
#[case::flat_bool(r#"{ "WPF0041": false }"#)]
#[case::none(r#"{ "rules": { "WPF0041": "none" } }"#)]
fn test_disabled_from_file(#[case] json: &str) {
    let file = config_file(json);
    let config = AnalyzerConfig::from_path(file.path()).unwrap();
    assert!(analyze_with(&set_value_source(), &config).is_empty());
}

#[test]
fn test_severity_from_file() {
    let file = config_file(r#"{ "rules": { "WPF0041": "error" } }"#);
    let config = AnalyzerConfig::from_path(file.path()).unwrap();
    let found = analyze_with(&set_value_source(), &config);
    assert_eq!(ids(&found), ["WPF0041"]);
    assert_eq!(found[0].severity, Severity::Error);
}

#[test]
fn test_default_severity() {
    let found = analyze(&set_value_source());
    let descriptor = registry().descriptor("WPF0041").unwrap();
    assert_eq!(found[0].severity, descriptor.default_severity);
}

#[test]
fn test_unknown_rule_is_reported_but_harmless() {
    let config = AnalyzerConfig::from_json_str(r#"{ "WPF9999": false }"#).unwrap();
    assert_eq!(registry().unknown_rules(&config), ["WPF9999"]);
    assert_eq!(ids(&analyze_with(&set_value_source(), &config)), ["WPF0041"]);
}

#[rstest]
#[case::malformed("{ \"rules\": ")]
#[case::bad_severity(r#"{ "WPF0041": "loud" }"#)]
fn test_invalid_file(#[case] json: &str) {
    let file = config_file(json);
    let error = AnalyzerConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Json(_) | ConfigError::InvalidSetting { .. }
    ));
    assert!(!error.to_string().is_empty());
}
