//! Recursive descent parser for the C# subset
//!
//! Every input byte ends up in the green tree, including unparsable
//! regions, which are wrapped in `ERROR` nodes.
//!
//! Trivia never starts or ends a node: `start_node` and `checkpoint` flush
//! pending trivia into the enclosing node first, and `bump` flushes trivia
//! only in front of a significant token. Replacing a node's text range
//! therefore leaves surrounding comments and whitespace untouched.

use super::grammar;
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Green tree of one document plus its syntax errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Red root over the green tree
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// No syntax errors were recorded
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Recoverable syntax error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse C# source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_compilation_unit();
    parser.finish()
}

/// Token cursor plus the green tree under construction
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    /// Indices into `tokens` of every non-trivia token.
    significant: Vec<usize>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i)
            .collect();
        Self {
            tokens,
            significant,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index into `significant` of the next significant token.
    fn sig_pos(&self) -> usize {
        self.significant.partition_point(|&i| i < self.pos)
    }

    fn sig_token(&self, n: usize) -> Option<&Token<'a>> {
        let idx = *self.significant.get(self.sig_pos() + n)?;
        self.tokens.get(idx)
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn current_text(&self) -> &str {
        self.nth_text(0)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Look ahead `n` significant tokens, skipping trivia
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.sig_token(n).map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &str {
        self.sig_token(n).map(|t| t.text).unwrap_or("")
    }

    /// Current token is the identifier `text` (contextual keywords)
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    /// Number of significant tokens consumed so far, for loop progress checks
    pub(crate) fn progress(&self) -> usize {
        self.sig_pos()
    }

    /// True when the tokens `n` and `n + 1` touch (e.g. `?` `.` forming `?.`)
    pub(crate) fn adjacent(&self, n: usize) -> bool {
        match (self.sig_token(n), self.sig_token(n + 1)) {
            (Some(a), Some(b)) => a.offset + TextSize::of(a.text) == b.offset,
            _ => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    pub(crate) fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self
            .sig_token(0)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    pub(crate) fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        if self.at_eof() {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        // at least one token, or the caller loops forever
        self.bump();
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
        }
        self.finish_node();
    }

    /// Wrap exactly one token in an ERROR node.
    pub(crate) fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        if self.at_eof() {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Root
    // =========================================================================

    /// CompilationUnit = UsingDirective* AttributeList* NamespaceMember*
    fn parse_compilation_unit(&mut self) {
        self.builder.start_node(SyntaxKind::COMPILATION_UNIT.into());
        grammar::parse_namespace_body(self, None);
        // Trailing trivia belongs to the root
        self.skip_trivia();
        self.builder.finish_node();
    }
}
