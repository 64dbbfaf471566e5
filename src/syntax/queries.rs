//! Generic tree queries.

use crate::parser::{AstNode, Block, Stmt, SyntaxNode, TextRange};

/// The only item matching `predicate`; `None` when there are zero or several.
pub fn try_single<T>(
    items: impl IntoIterator<Item = T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> Option<T> {
    let mut matches = items.into_iter().filter(|item| predicate(item));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

/// The first item matching `predicate`
pub fn try_first<T>(
    items: impl IntoIterator<Item = T>,
    predicate: impl FnMut(&T) -> bool,
) -> Option<T> {
    items.into_iter().find(predicate)
}

/// The only statement of a block
pub fn try_single_statement(block: &Block) -> Option<Stmt> {
    try_single(block.statements(), |_| true)
}

/// Nearest ancestor (including `node` itself) of type `T`
pub fn ancestor<T: AstNode>(node: &SyntaxNode) -> Option<T> {
    node.ancestors().find_map(T::cast)
}

/// Member declarations of the type declaration containing `node`,
/// `node`'s own declaration included.
pub fn member_declarations(node: &SyntaxNode) -> Vec<SyntaxNode> {
    let Some(type_decl) = node.ancestors().skip(1).find(|n| n.kind().is_type_decl()) else {
        return Vec::new();
    };
    type_decl
        .children()
        .filter(|n| n.kind().is_member_decl())
        .collect()
}

/// The outermost node whose range is exactly `range`, falling back to the
/// innermost node covering it.
///
/// Diagnostics carry spans rather than nodes, so fixes use this to find the
/// flagged node again in a fresh tree.
pub fn node_at_range(root: &SyntaxNode, range: TextRange) -> Option<SyntaxNode> {
    if !contains_range(root.text_range(), range) {
        return None;
    }
    let element = root.covering_element(range);
    let mut node = match element {
        rowan::NodeOrToken::Node(node) => node,
        rowan::NodeOrToken::Token(token) => token.parent()?,
    };
    while let Some(parent) = node.parent() {
        if parent.text_range() != range {
            break;
        }
        node = parent;
    }
    Some(node)
}

pub fn contains_range(outer: TextRange, inner: TextRange) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SyntaxKind, TextSize, parse};

    #[test]
    fn test_try_single() {
        assert_eq!(try_single([1, 2, 3], |x| *x == 2), Some(2));
        assert_eq!(try_single([1, 2, 2], |x| *x == 2), None);
        assert_eq!(try_single(Vec::<i32>::new(), |_| true), None);
        assert_eq!(try_first([1, 2, 2], |x| *x == 2), Some(2));
    }

    #[test]
    fn test_node_at_range_finds_outermost_exact_match() {
        let text = "class C { void M() { Foo(1); } }";
        let root = parse(text).syntax();
        let start = text.find("Foo").unwrap() as u32;
        let range = TextRange::new(TextSize::from(start), TextSize::from(start + 6));
        let node = node_at_range(&root, range).unwrap();
        assert_eq!(node.kind(), SyntaxKind::INVOCATION_EXPR);

        let name = TextRange::new(TextSize::from(start), TextSize::from(start + 3));
        // Identifier name node, not the invocation
        assert_eq!(node_at_range(&root, name).unwrap().kind(), SyntaxKind::IDENTIFIER_NAME);
    }

    #[test]
    fn test_member_declarations() {
        let root = parse("class C { int a; void M() { } int P { get; } }").syntax();
        let method = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::METHOD_DECL)
            .unwrap();
        assert_eq!(member_declarations(&method).len(), 3);
    }
}
