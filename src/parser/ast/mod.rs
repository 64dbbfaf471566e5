//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for C# syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Wrappers are free to construct and never own more than the node handle.

mod expressions;
mod items;
mod statements;

pub use expressions::*;
pub use items::*;
pub use statements::*;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper utilities
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
pub(crate) fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// The declared name of a node: its last direct identifier token.
///
/// Contextual modifiers (`partial`, `async`) are identifiers too but always
/// precede the name, and every other piece of a declaration is a child node.
#[inline]
pub(crate) fn name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::IDENT)
        .last()
}

/// Identifier text without the verbatim `@` prefix.
pub fn ident_text(token: &SyntaxToken) -> SmolStr {
    let text = token.text();
    SmolStr::new(text.strip_prefix('@').unwrap_or(text))
}

/// Value of a string literal token, or `None` for interpolated strings.
pub fn unquote_string(text: &str) -> Option<String> {
    if let Some(rest) = text.strip_prefix("@\"") {
        let body = rest.strip_suffix('"')?;
        return Some(body.replace("\"\"", "\""));
    }
    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }
    Some(out)
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        ast_node!($name, [$kind]);
    };
    ($name:ident, [$($kind:ident),+ $(,)?]) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate the name accessors of a declaration.
macro_rules! name_methods {
    () => {
        /// The identifier token that names this declaration.
        pub fn name_token(&self) -> Option<SyntaxToken> {
            name_token(&self.0)
        }

        /// The declared name, without a verbatim `@`.
        pub fn name(&self) -> Option<SmolStr> {
            self.name_token().map(|t| ident_text(&t))
        }
    };
}

/// Macro to generate boolean modifier checks.
macro_rules! modifier_methods {
    () => {
        pub fn has_modifier(&self, kind: SyntaxKind) -> bool {
            has_token(&self.0, kind)
        }

        pub fn is_static(&self) -> bool {
            self.has_modifier(SyntaxKind::STATIC_KW)
        }

        pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
            self.0.children().filter_map(AttributeList::cast)
        }
    };
}

pub(crate) use {ast_node, children_method, first_child_method, modifier_methods, name_methods};

#[cfg(test)]
mod tests;
