//! Analysis and fix helpers for integration tests.
//!
//! Fixtures mark the expected diagnostic position with `↓`. The marker is
//! stripped before analysis and the reported span must start there.

use tokio_util::sync::CancellationToken;
use wpf_analyzers::{AnalyzerConfig, Compilation, Diagnostic, FileId, FixEngine, TextSize, registry};

pub const MARKER: char = '↓';

/// Source without markers, plus the offset of each marker
pub fn strip_markers(marked: &str) -> (String, Vec<TextSize>) {
    let mut source = String::with_capacity(marked.len());
    let mut offsets = Vec::new();
    for ch in marked.chars() {
        if ch == MARKER {
            offsets.push(TextSize::of(source.as_str()));
        } else {
            source.push(ch);
        }
    }
    (source, offsets)
}

pub fn analyze_compilation(compilation: &Compilation, config: &AnalyzerConfig) -> Vec<Diagnostic> {
    let result = registry().analyze_compilation(compilation, config, &CancellationToken::new());
    assert!(result.failures.is_empty(), "handler failures: {:?}", result.failures);
    result.diagnostics
}

pub fn analyze(source: &str) -> Vec<Diagnostic> {
    analyze_compilation(&Compilation::from_text(source), &AnalyzerConfig::default())
}

pub fn analyze_with(source: &str, config: &AnalyzerConfig) -> Vec<Diagnostic> {
    analyze_compilation(&Compilation::from_text(source), config)
}

pub fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.id.as_str()).collect()
}

/// Assert exactly one `id` diagnostic per marker, each starting at its
/// marker, and return them.
pub fn assert_diagnostics(marked: &str, id: &str) -> Vec<Diagnostic> {
    let (source, markers) = strip_markers(marked);
    let found: Vec<Diagnostic> = analyze(&source).into_iter().filter(|d| d.id == id).collect();
    let starts: Vec<TextSize> = found.iter().map(|d| d.range.start()).collect();
    assert_eq!(starts, markers, "{id} positions in:\n{source}\nfound: {found:#?}");
    found
}

/// Assert the marked source produces no diagnostics at all.
pub fn assert_valid(source: &str) {
    let found = analyze(source);
    assert!(found.is_empty(), "expected no diagnostics, found: {found:#?}");
}

/// Apply the first action for the single `id` diagnostic of `marked`.
pub fn fix(marked: &str, id: &str) -> String {
    let (source, _) = strip_markers(marked);
    let found = assert_diagnostics(marked, id);
    let compilation = Compilation::from_text(&source);
    let actions = FixEngine::new().code_actions(&compilation, &found[0], &CancellationToken::new());
    let action = actions.first().unwrap_or_else(|| panic!("no code action for {id}"));
    let (texts, _) = action.change.apply(&compilation).expect("fix applies");
    texts.get(&FileId::new(0)).cloned().unwrap_or(source)
}

/// Fix every `id` diagnostic at once.
pub fn fix_all(source: &str, id: &str) -> String {
    let compilation = Compilation::from_text(source);
    let found = analyze_compilation(&compilation, &AnalyzerConfig::default());
    let change = FixEngine::new().fix_all(&compilation, id, &found, &CancellationToken::new());
    let (texts, _) = change.apply(&compilation).expect("fix all applies");
    texts
        .get(&FileId::new(0))
        .cloned()
        .unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markers() {
        let (source, markers) = strip_markers("a↓bc↓d");
        assert_eq!(source, "abcd");
        assert_eq!(markers, [TextSize::new(1), TextSize::new(3)]);
    }
}
