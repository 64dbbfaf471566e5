//! `#pragma warning disable` / `restore` regions.

use smol_str::SmolStr;

use crate::parser::{SyntaxKind, SyntaxNode, TextSize};

#[derive(Debug, Clone)]
struct Pragma {
    offset: TextSize,
    disable: bool,
    /// Empty for a bare `disable` / `restore`
    ids: Vec<SmolStr>,
}

/// Pragma directives of one document, in source order.
#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    pragmas: Vec<Pragma>,
}

impl Suppressions {
    pub fn from_root(root: &SyntaxNode) -> Self {
        let pragmas = root
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::PREPROCESSOR)
            .filter_map(|t| parse_pragma(t.text(), t.text_range().end()))
            .collect();
        Self { pragmas }
    }

    /// `id` is disabled at `offset`
    pub fn is_suppressed(&self, id: &str, offset: TextSize) -> bool {
        let mut suppressed = false;
        for pragma in self.pragmas.iter().take_while(|p| p.offset <= offset) {
            if pragma.ids.is_empty() || pragma.ids.iter().any(|i| i == id) {
                suppressed = pragma.disable;
            }
        }
        suppressed
    }
}

fn parse_pragma(text: &str, offset: TextSize) -> Option<Pragma> {
    let text = text.trim_start().strip_prefix('#')?;
    let text = text.split("//").next().unwrap_or_default();
    let mut words = text.split_whitespace();
    if words.next()? != "pragma" || words.next()? != "warning" {
        return None;
    }
    let disable = match words.next()? {
        "disable" => true,
        "restore" => false,
        _ => return None,
    };
    let ids = words
        .flat_map(|w| w.split(','))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(SmolStr::new)
        .collect();
    Some(Pragma {
        offset,
        disable,
        ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn offset_of(text: &str, needle: &str) -> TextSize {
        TextSize::from(text.find(needle).unwrap() as u32)
    }

    #[test]
    fn test_disable_restore_regions() {
        let text = r#"
class C
{
    void A() { }
#pragma warning disable WPF0041, WPF0014 // reason
    void B() { }
#pragma warning restore WPF0041
    void D() { }
}"#;
        let suppressions = Suppressions::from_root(&parse(text).syntax());
        assert!(!suppressions.is_suppressed("WPF0041", offset_of(text, "void A")));
        assert!(suppressions.is_suppressed("WPF0041", offset_of(text, "void B")));
        assert!(!suppressions.is_suppressed("WPF0003", offset_of(text, "void B")));
        assert!(!suppressions.is_suppressed("WPF0041", offset_of(text, "void D")));
        // Never restored
        assert!(suppressions.is_suppressed("WPF0014", offset_of(text, "void D")));
    }

    #[test]
    fn test_bare_disable_covers_everything() {
        let text = "#pragma warning disable\nclass C { }";
        let suppressions = Suppressions::from_root(&parse(text).syntax());
        assert!(suppressions.is_suppressed("WPF0001", offset_of(text, "class")));
    }
}
