//! Grammar rules for the C# subset
//!
//! Parsing functions are free functions over [`Parser`], organized by
//! construct:
//! - `items` - namespaces, type declarations, members, attributes
//! - `types` - type syntax (names, generics, nullable, arrays)
//! - `statements` - blocks and statements
//! - `expressions` - precedence-climbing expression parser
//!
//! The lookahead helpers below scan significant tokens without consuming
//! anything, which is how ambiguous prefixes (casts, generic arguments,
//! local declarations, lambdas) get decided.

mod expressions;
mod items;
mod statements;
mod types;

pub(crate) use items::parse_namespace_body;

use super::parser::Parser;
use super::syntax_kind::SyntaxKind;

/// Scan a type starting `n` significant tokens ahead.
///
/// Returns the lookahead index just past the type, or `None` when the tokens
/// cannot form a type.
pub(crate) fn scan_type(p: &Parser<'_>, mut n: usize) -> Option<usize> {
    if p.nth(n) == SyntaxKind::IDENT && p.nth(n + 1) == SyntaxKind::COLON_COLON {
        n += 2;
    }
    loop {
        if p.nth(n) != SyntaxKind::IDENT {
            return None;
        }
        n += 1;
        if p.nth(n) == SyntaxKind::LT {
            n = scan_type_args(p, n)?;
        }
        if p.nth(n) == SyntaxKind::DOT && p.nth(n + 1) == SyntaxKind::IDENT {
            n += 1;
            continue;
        }
        break;
    }
    if p.nth(n) == SyntaxKind::QUESTION {
        n += 1;
    }
    while p.nth(n) == SyntaxKind::L_BRACKET {
        n += 1;
        while p.nth(n) == SyntaxKind::COMMA {
            n += 1;
        }
        if p.nth(n) != SyntaxKind::R_BRACKET {
            return None;
        }
        n += 1;
    }
    Some(n)
}

/// Scan `<T, U>` with `n` at the `<`.
pub(crate) fn scan_type_args(p: &Parser<'_>, mut n: usize) -> Option<usize> {
    n += 1;
    loop {
        n = scan_type(p, n)?;
        match p.nth(n) {
            SyntaxKind::COMMA => n += 1,
            SyntaxKind::GT => return Some(n + 1),
            _ => return None,
        }
    }
}

/// Index of the `)` matching the `(` at lookahead `n`.
pub(crate) fn matching_paren(p: &Parser<'_>, n: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = n;
    loop {
        match p.nth(i) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            SyntaxKind::EOF => return None,
            _ => {}
        }
        i += 1;
    }
}

/// Predefined type keywords of C#, lexed as identifiers.
pub(crate) fn is_predefined_type(text: &str) -> bool {
    matches!(
        text,
        "bool"
            | "byte"
            | "sbyte"
            | "char"
            | "decimal"
            | "double"
            | "float"
            | "int"
            | "uint"
            | "long"
            | "ulong"
            | "short"
            | "ushort"
            | "object"
            | "string"
            | "void"
            | "nint"
            | "nuint"
    )
}
