//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all node and token kinds of the C# subset the analyzers
//! consume. Node kinds mirror the shapes of the C# syntax model closely enough
//! that rule code reads like the declarations it inspects.

/// All syntax kinds (tokens and nodes).
///
/// Tokens are leaves (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    PREPROCESSOR, // #pragma, #region, ...

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,       // identifier, predefined type name or contextual keyword
    INT_NUMBER,  // 42, 0x2A, 42L
    REAL_NUMBER, // 1.0, 1d, 1.5f, 2m
    STRING,      // "text", @"text", $"text"
    CHAR,        // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,              // {
    R_BRACE,              // }
    L_BRACKET,            // [
    R_BRACKET,            // ]
    L_PAREN,              // (
    R_PAREN,              // )
    SEMICOLON,            // ;
    COLON,                // :
    COLON_COLON,          // ::
    DOT,                  // .
    COMMA,                // ,
    EQ,                   // =
    EQ_EQ,                // ==
    BANG_EQ,              // !=
    LT,                   // <
    GT,                   // >
    LT_EQ,                // <=
    GT_EQ,                // >=
    LT_LT,                // <<
    FAT_ARROW,            // =>
    ARROW,                // ->
    PLUS,                 // +
    MINUS,                // -
    STAR,                 // *
    SLASH,                // /
    PERCENT,              // %
    CARET,                // ^
    TILDE,                // ~
    QUESTION,             // ?
    QUESTION_QUESTION,    // ??
    BANG,                 // !
    AMP,                  // &
    AMP_AMP,              // &&
    PIPE,                 // |
    PIPE_PIPE,            // ||
    PLUS_PLUS,            // ++
    MINUS_MINUS,          // --
    PLUS_EQ,              // +=
    MINUS_EQ,             // -=
    STAR_EQ,              // *=
    SLASH_EQ,             // /=
    PERCENT_EQ,           // %=
    AMP_EQ,               // &=
    PIPE_EQ,              // |=
    CARET_EQ,             // ^=
    QUESTION_QUESTION_EQ, // ??=

    // =========================================================================
    // KEYWORDS (reserved)
    // =========================================================================
    ABSTRACT_KW,
    AS_KW,
    BASE_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CHECKED_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DELEGATE_KW,
    DO_KW,
    ELSE_KW,
    ENUM_KW,
    EVENT_KW,
    EXPLICIT_KW,
    EXTERN_KW,
    FALSE_KW,
    FINALLY_KW,
    FIXED_KW,
    FOR_KW,
    FOREACH_KW,
    GOTO_KW,
    IF_KW,
    IMPLICIT_KW,
    IN_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    IS_KW,
    LOCK_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OPERATOR_KW,
    OUT_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    REF_KW,
    RETURN_KW,
    SEALED_KW,
    SIZEOF_KW,
    STATIC_KW,
    STRUCT_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    UNCHECKED_KW,
    UNSAFE_KW,
    USING_KW,
    VIRTUAL_KW,
    VOLATILE_KW,
    WHILE_KW,

    // =========================================================================
    // NODES - Compilation unit and declarations
    // =========================================================================
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    FILE_SCOPED_NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    ENUM_MEMBER,
    DELEGATE_DECL,
    BASE_LIST,
    TYPE_PARAMETER_LIST,
    TYPE_PARAMETER,
    TYPE_CONSTRAINT_CLAUSE,
    FIELD_DECL,
    EVENT_FIELD_DECL,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    EQUALS_VALUE_CLAUSE,
    PROPERTY_DECL,
    INDEXER_DECL,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    CONSTRUCTOR_INITIALIZER,
    EVENT_DECL,
    EXPLICIT_INTERFACE_SPECIFIER,
    PARAMETER_LIST,
    PARAMETER,
    ARROW_EXPR_CLAUSE,

    // Attributes
    ATTRIBUTE_LIST,
    ATTRIBUTE_TARGET,
    ATTRIBUTE,
    ATTRIBUTE_ARGUMENT_LIST,
    ATTRIBUTE_ARGUMENT,
    NAME_EQUALS,
    NAME_COLON,

    // Types and names
    IDENTIFIER_NAME,
    GENERIC_NAME,
    TYPE_ARGUMENT_LIST,
    QUALIFIED_NAME,
    ALIAS_QUALIFIED_NAME,
    NULLABLE_TYPE,
    ARRAY_TYPE,
    ARRAY_RANK_SPECIFIER,

    // =========================================================================
    // NODES - Statements
    // =========================================================================
    BLOCK,
    LOCAL_DECL_STMT,
    EXPR_STMT,
    RETURN_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    WHILE_STMT,
    DO_STMT,
    FOR_STMT,
    FOREACH_STMT,
    THROW_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    CATCH_DECL,
    FINALLY_CLAUSE,
    USING_STMT,
    LOCK_STMT,
    SWITCH_STMT,
    SWITCH_SECTION,
    CASE_LABEL,
    DEFAULT_LABEL,
    BREAK_STMT,
    CONTINUE_STMT,
    EMPTY_STMT,

    // =========================================================================
    // NODES - Expressions
    // =========================================================================
    LITERAL_EXPR,
    THIS_EXPR,
    BASE_EXPR,
    PAREN_EXPR,
    MEMBER_ACCESS_EXPR,
    CONDITIONAL_ACCESS_EXPR,
    MEMBER_BINDING_EXPR,
    INVOCATION_EXPR,
    ARGUMENT_LIST,
    ARGUMENT,
    ELEMENT_ACCESS_EXPR,
    BRACKETED_ARGUMENT_LIST,
    OBJECT_CREATION_EXPR,
    ARRAY_CREATION_EXPR,
    INITIALIZER_EXPR,
    ASSIGNMENT_EXPR,
    BINARY_EXPR,
    PREFIX_UNARY_EXPR,
    POSTFIX_UNARY_EXPR,
    CAST_EXPR,
    IS_EXPR,
    AS_EXPR,
    CONDITIONAL_EXPR,
    TYPEOF_EXPR,
    DEFAULT_EXPR,
    THROW_EXPR,
    SIMPLE_LAMBDA_EXPR,
    PAREN_LAMBDA_EXPR,

    // Error recovery
    ERROR,

    // End of input marker returned by lookahead (never in a tree)
    EOF,

    // Must be last
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment or directive)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::PREPROCESSOR
        )
    }

    /// Check if this is a reserved keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16)
            && (self as u16) <= (Self::QUESTION_QUESTION_EQ as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::REAL_NUMBER
                | Self::STRING
                | Self::CHAR
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this keyword is a declaration modifier
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::INTERNAL_KW
                | Self::STATIC_KW
                | Self::READONLY_KW
                | Self::CONST_KW
                | Self::ABSTRACT_KW
                | Self::SEALED_KW
                | Self::VIRTUAL_KW
                | Self::OVERRIDE_KW
                | Self::EXTERN_KW
                | Self::NEW_KW
                | Self::UNSAFE_KW
                | Self::VOLATILE_KW
        )
    }

    /// Compound assignment and simple assignment operators
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
                | Self::QUESTION_QUESTION_EQ
        )
    }

    /// Expression nodes, including simple names in expression position
    pub fn is_expr(self) -> bool {
        let raw = self as u16;
        (raw >= Self::LITERAL_EXPR as u16 && raw <= Self::PAREN_LAMBDA_EXPR as u16
            && !matches!(
                self,
                Self::ARGUMENT_LIST | Self::ARGUMENT | Self::BRACKETED_ARGUMENT_LIST
            ))
            || matches!(self, Self::IDENTIFIER_NAME | Self::GENERIC_NAME)
    }

    /// Nodes that may appear as a type reference
    pub fn is_type_syntax(self) -> bool {
        matches!(
            self,
            Self::IDENTIFIER_NAME
                | Self::GENERIC_NAME
                | Self::QUALIFIED_NAME
                | Self::ALIAS_QUALIFIED_NAME
                | Self::NULLABLE_TYPE
                | Self::ARRAY_TYPE
        )
    }

    /// Member declarations inside a type body
    pub fn is_member_decl(self) -> bool {
        self.is_type_decl()
            || matches!(
                self,
                Self::FIELD_DECL
                    | Self::EVENT_FIELD_DECL
                    | Self::PROPERTY_DECL
                    | Self::INDEXER_DECL
                    | Self::METHOD_DECL
                    | Self::CONSTRUCTOR_DECL
                    | Self::EVENT_DECL
            )
    }

    /// Type declaration node kinds
    pub fn is_type_decl(self) -> bool {
        matches!(
            self,
            Self::CLASS_DECL
                | Self::STRUCT_DECL
                | Self::INTERFACE_DECL
                | Self::ENUM_DECL
                | Self::DELEGATE_DECL
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CsLanguage {}

impl rowan::Language for CsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CsLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CsLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CsLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<CsLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<CsLanguage>;
