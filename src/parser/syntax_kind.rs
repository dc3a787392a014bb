//! Token kinds for the Lua lexer
//!
//! This enum defines every token kind the parser consumes, following the
//! lexical conventions of the Lua 5.3 reference manual.

/// All token kinds in Lua source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - skipped by the parser)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    NAME,   // identifier
    NUMBER, // 42, 3.14, 0xff
    STRING, // "hello", 'hello', [[hello]]

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    PLUS,          // +
    MINUS,         // -
    STAR,          // *
    SLASH,         // /
    SLASH_SLASH,   // //
    PERCENT,       // %
    CARET,         // ^
    HASH,          // #
    AMP,           // &
    TILDE,         // ~
    PIPE,          // |
    LT_LT,         // <<
    GT_GT,         // >>
    EQ_EQ,         // ==
    TILDE_EQ,      // ~=
    LT_EQ,         // <=
    GT_EQ,         // >=
    LT,            // <
    GT,            // >
    EQ,            // =
    L_PAREN,       // (
    R_PAREN,       // )
    L_BRACE,       // {
    R_BRACE,       // }
    L_BRACKET,     // [
    R_BRACKET,     // ]
    COLON_COLON,   // ::
    SEMICOLON,     // ;
    COLON,         // :
    COMMA,         // ,
    DOT,           // .
    DOT_DOT,       // ..
    DOT_DOT_DOT,   // ...

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    AND_KW,
    BREAK_KW,
    DO_KW,
    ELSE_KW,
    ELSEIF_KW,
    END_KW,
    FALSE_KW,
    FOR_KW,
    FUNCTION_KW,
    GOTO_KW,
    IF_KW,
    IN_KW,
    LOCAL_KW,
    NIL_KW,
    NOT_KW,
    OR_KW,
    REPEAT_KW,
    RETURN_KW,
    THEN_KW,
    TRUE_KW,
    UNTIL_KW,
    WHILE_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Whitespace and comments
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Reserved words of the language
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Tokens that close a block
    pub fn is_block_end(self) -> bool {
        matches!(
            self,
            Self::END_KW | Self::ELSE_KW | Self::ELSEIF_KW | Self::UNTIL_KW | Self::EOF
        )
    }

    /// Human-readable rendering used in syntax error messages
    pub fn display(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::COMMENT => "comment",
            Self::NAME => "<name>",
            Self::NUMBER => "<number>",
            Self::STRING => "<string>",
            Self::PLUS => "'+'",
            Self::MINUS => "'-'",
            Self::STAR => "'*'",
            Self::SLASH => "'/'",
            Self::SLASH_SLASH => "'//'",
            Self::PERCENT => "'%'",
            Self::CARET => "'^'",
            Self::HASH => "'#'",
            Self::AMP => "'&'",
            Self::TILDE => "'~'",
            Self::PIPE => "'|'",
            Self::LT_LT => "'<<'",
            Self::GT_GT => "'>>'",
            Self::EQ_EQ => "'=='",
            Self::TILDE_EQ => "'~='",
            Self::LT_EQ => "'<='",
            Self::GT_EQ => "'>='",
            Self::LT => "'<'",
            Self::GT => "'>'",
            Self::EQ => "'='",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::L_BRACE => "'{'",
            Self::R_BRACE => "'}'",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::COLON_COLON => "'::'",
            Self::SEMICOLON => "';'",
            Self::COLON => "':'",
            Self::COMMA => "','",
            Self::DOT => "'.'",
            Self::DOT_DOT => "'..'",
            Self::DOT_DOT_DOT => "'...'",
            Self::AND_KW => "'and'",
            Self::BREAK_KW => "'break'",
            Self::DO_KW => "'do'",
            Self::ELSE_KW => "'else'",
            Self::ELSEIF_KW => "'elseif'",
            Self::END_KW => "'end'",
            Self::FALSE_KW => "'false'",
            Self::FOR_KW => "'for'",
            Self::FUNCTION_KW => "'function'",
            Self::GOTO_KW => "'goto'",
            Self::IF_KW => "'if'",
            Self::IN_KW => "'in'",
            Self::LOCAL_KW => "'local'",
            Self::NIL_KW => "'nil'",
            Self::NOT_KW => "'not'",
            Self::OR_KW => "'or'",
            Self::REPEAT_KW => "'repeat'",
            Self::RETURN_KW => "'return'",
            Self::THEN_KW => "'then'",
            Self::TRUE_KW => "'true'",
            Self::UNTIL_KW => "'until'",
            Self::WHILE_KW => "'while'",
            Self::ERROR => "<error>",
            Self::EOF => "<eof>",
        }
    }
}
