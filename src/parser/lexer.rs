//! Logos-based lexer for the C# subset
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token so the tree built on top is lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f\u{FEFF}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"#[^\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*([uU][lL]?|[lL][uU]?)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+([uU][lL]?|[lL][uU]?)?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9][0-9_]*[fFdDmM]")]
    Real,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    #[regex(r#"(@|\$@|@\$)"([^"]|"")*""#)]
    Str,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("::")]
    ColonColon,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    LtLt,

    #[token("=>")]
    FatArrow,

    #[token("->")]
    Arrow,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token("??")]
    QuestionQuestion,

    #[token("!")]
    Bang,

    #[token("&")]
    Amp,

    #[token("&&")]
    AmpAmp,

    #[token("|")]
    Pipe,

    #[token("||")]
    PipePipe,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("??=")]
    QuestionQuestionEq,
    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("abstract")]
    AbstractKw,

    #[token("as")]
    AsKw,

    #[token("base")]
    BaseKw,

    #[token("break")]
    BreakKw,

    #[token("case")]
    CaseKw,

    #[token("catch")]
    CatchKw,

    #[token("checked")]
    CheckedKw,

    #[token("class")]
    ClassKw,

    #[token("const")]
    ConstKw,

    #[token("continue")]
    ContinueKw,

    #[token("default")]
    DefaultKw,

    #[token("delegate")]
    DelegateKw,

    #[token("do")]
    DoKw,

    #[token("else")]
    ElseKw,

    #[token("enum")]
    EnumKw,

    #[token("event")]
    EventKw,

    #[token("explicit")]
    ExplicitKw,

    #[token("extern")]
    ExternKw,

    #[token("false")]
    FalseKw,

    #[token("finally")]
    FinallyKw,

    #[token("fixed")]
    FixedKw,

    #[token("for")]
    ForKw,

    #[token("foreach")]
    ForeachKw,

    #[token("goto")]
    GotoKw,

    #[token("if")]
    IfKw,

    #[token("implicit")]
    ImplicitKw,

    #[token("in")]
    InKw,

    #[token("interface")]
    InterfaceKw,

    #[token("internal")]
    InternalKw,

    #[token("is")]
    IsKw,

    #[token("lock")]
    LockKw,

    #[token("namespace")]
    NamespaceKw,

    #[token("new")]
    NewKw,

    #[token("null")]
    NullKw,

    #[token("operator")]
    OperatorKw,

    #[token("out")]
    OutKw,

    #[token("override")]
    OverrideKw,

    #[token("params")]
    ParamsKw,

    #[token("private")]
    PrivateKw,

    #[token("protected")]
    ProtectedKw,

    #[token("public")]
    PublicKw,

    #[token("readonly")]
    ReadonlyKw,

    #[token("ref")]
    RefKw,

    #[token("return")]
    ReturnKw,

    #[token("sealed")]
    SealedKw,

    #[token("sizeof")]
    SizeofKw,

    #[token("static")]
    StaticKw,

    #[token("struct")]
    StructKw,

    #[token("switch")]
    SwitchKw,

    #[token("this")]
    ThisKw,

    #[token("throw")]
    ThrowKw,

    #[token("true")]
    TrueKw,

    #[token("try")]
    TryKw,

    #[token("typeof")]
    TypeofKw,

    #[token("unchecked")]
    UncheckedKw,

    #[token("unsafe")]
    UnsafeKw,

    #[token("using")]
    UsingKw,

    #[token("virtual")]
    VirtualKw,

    #[token("volatile")]
    VolatileKw,

    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Preprocessor => SyntaxKind::PREPROCESSOR,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INT_NUMBER,
            Real => SyntaxKind::REAL_NUMBER,
            Str => SyntaxKind::STRING,
            Char => SyntaxKind::CHAR,

            // Punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            ColonColon => SyntaxKind::COLON_COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            LtLt => SyntaxKind::LT_LT,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            Bang => SyntaxKind::BANG,
            Amp => SyntaxKind::AMP,
            AmpAmp => SyntaxKind::AMP_AMP,
            Pipe => SyntaxKind::PIPE,
            PipePipe => SyntaxKind::PIPE_PIPE,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            QuestionQuestionEq => SyntaxKind::QUESTION_QUESTION_EQ,

            // Keywords
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            AsKw => SyntaxKind::AS_KW,
            BaseKw => SyntaxKind::BASE_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            CheckedKw => SyntaxKind::CHECKED_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            EventKw => SyntaxKind::EVENT_KW,
            ExplicitKw => SyntaxKind::EXPLICIT_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            FixedKw => SyntaxKind::FIXED_KW,
            ForKw => SyntaxKind::FOR_KW,
            ForeachKw => SyntaxKind::FOREACH_KW,
            GotoKw => SyntaxKind::GOTO_KW,
            IfKw => SyntaxKind::IF_KW,
            ImplicitKw => SyntaxKind::IMPLICIT_KW,
            InKw => SyntaxKind::IN_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            IsKw => SyntaxKind::IS_KW,
            LockKw => SyntaxKind::LOCK_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            NewKw => SyntaxKind::NEW_KW,
            NullKw => SyntaxKind::NULL_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            OutKw => SyntaxKind::OUT_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            ParamsKw => SyntaxKind::PARAMS_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            RefKw => SyntaxKind::REF_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            SizeofKw => SyntaxKind::SIZEOF_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            ThisKw => SyntaxKind::THIS_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TryKw => SyntaxKind::TRY_KW,
            TypeofKw => SyntaxKind::TYPEOF_KW,
            UncheckedKw => SyntaxKind::UNCHECKED_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
            UsingKw => SyntaxKind::USING_KW,
            VirtualKw => SyntaxKind::VIRTUAL_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input)
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_field_declaration() {
        let tokens: Vec<_> = Lexer::new("public static int x;").collect();
        assert_eq!(tokens.len(), 8); // public, ws, static, ws, int, ws, x, ;
        assert_eq!(tokens[0].kind, SyntaxKind::PUBLIC_KW);
        assert_eq!(tokens[2].kind, SyntaxKind::STATIC_KW);
        assert_eq!(tokens[4].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[7].kind, SyntaxKind::SEMICOLON);
    }

    #[test]
    fn test_lex_keyword_prefix_is_identifier() {
        assert_eq!(kinds("classes"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("@class"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("nameof"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(kinds("1"), vec![SyntaxKind::INT_NUMBER]);
        assert_eq!(kinds("1.0"), vec![SyntaxKind::REAL_NUMBER]);
        assert_eq!(kinds("1d"), vec![SyntaxKind::REAL_NUMBER]);
        assert_eq!(kinds("2.5f"), vec![SyntaxKind::REAL_NUMBER]);
        assert_eq!(
            kinds("1.ToString"),
            vec![SyntaxKind::INT_NUMBER, SyntaxKind::DOT, SyntaxKind::IDENT]
        );
    }

    #[test]
    fn test_lex_strings() {
        assert_eq!(kinds(r#""a\"b""#), vec![SyntaxKind::STRING]);
        assert_eq!(kinds(r#"@"a""b""#), vec![SyntaxKind::STRING]);
        assert_eq!(kinds(r#"$"{x}""#), vec![SyntaxKind::STRING]);
        assert_eq!(kinds("'c'"), vec![SyntaxKind::CHAR]);
    }

    #[test]
    fn test_lex_conditional_access() {
        assert_eq!(
            kinds("a?.b"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::QUESTION,
                SyntaxKind::DOT,
                SyntaxKind::IDENT
            ]
        );
        assert_eq!(
            kinds("a ?? b"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::QUESTION_QUESTION,
                SyntaxKind::IDENT
            ]
        );
    }

    #[test]
    fn test_lex_comment_and_pragma() {
        let tokens: Vec<_> = Lexer::new("// comment\n#pragma warning disable WPF0041\nx").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::PREPROCESSOR);
        assert_eq!(tokens[2].text, "#pragma warning disable WPF0041");
        assert_eq!(tokens[4].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_block_comment() {
        assert_eq!(
            kinds("/* a * b **/ x"),
            vec![SyntaxKind::IDENT]
        );
    }

    #[test]
    fn test_lex_offsets_are_contiguous() {
        let input = "this.SetValue(BarProperty, 1);";
        let mut expected = 0u32;
        for token in Lexer::new(input) {
            assert_eq!(u32::from(token.offset), expected);
            expected += token.text.len() as u32;
        }
        assert_eq!(expected as usize, input.len());
    }
}
