//! Logos-based lexer for Lua
//!
//! Fast tokenization using the logos crate. Trivia tokens are kept so callers
//! that rewrite source text can work at token granularity.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte range covered by this token
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
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

/// Length of a long-bracket opener (`[`, `[=`, `[==`, ... followed by `[`) at the
/// start of `text`, together with its level.
fn long_bracket_open(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let level = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(level + 1) == Some(&b'[')).then_some((level + 2, level))
}

/// Byte length up to and including the closing `]=*]` of the given level.
fn long_bracket_close(text: &str, level: usize) -> Option<usize> {
    let closer = format!("]{}]", "=".repeat(level));
    text.find(&closer).map(|idx| idx + closer.len())
}

/// Consume the body of a long string after its `[=*[` opener.
fn long_string(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let level = lex.slice().len() - 2;
    match long_bracket_close(lex.remainder(), level) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

/// Consume a comment after its `--` introducer, long or short.
fn comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let remainder = lex.remainder();
    if let Some((open, level)) = long_bracket_open(remainder) {
        return match long_bracket_close(&remainder[open..], level) {
            Some(len) => {
                lex.bump(open + len);
                true
            }
            None => false,
        };
    }
    let len = remainder.find('\n').unwrap_or(remainder.len());
    lex.bump(len);
    true
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[token("--", comment)]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+(\.[0-9a-fA-F]*)?([pP][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\\n]|\\(.|\n))*'"#)]
    String,

    #[regex(r"\[=*\[", long_string)]
    LongString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    DotDotDot,
    #[token("..")]
    DotDot,
    #[token("::")]
    ColonColon,
    #[token("//")]
    SlashSlash,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("==")]
    EqEq,
    #[token("~=")]
    TildeEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
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
    #[token("#")]
    Hash,
    #[token("&")]
    Amp,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("and")]
    AndKw,
    #[token("break")]
    BreakKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("elseif")]
    ElseifKw,
    #[token("end")]
    EndKw,
    #[token("false")]
    FalseKw,
    #[token("for")]
    ForKw,
    #[token("function")]
    FunctionKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("in")]
    InKw,
    #[token("local")]
    LocalKw,
    #[token("nil")]
    NilKw,
    #[token("not")]
    NotKw,
    #[token("or")]
    OrKw,
    #[token("repeat")]
    RepeatKw,
    #[token("return")]
    ReturnKw,
    #[token("then")]
    ThenKw,
    #[token("true")]
    TrueKw,
    #[token("until")]
    UntilKw,
    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Comment => SyntaxKind::COMMENT,

            // Literals
            Name => SyntaxKind::NAME,
            Number => SyntaxKind::NUMBER,
            String | LongString => SyntaxKind::STRING,

            // Multi-char punctuation
            DotDotDot => SyntaxKind::DOT_DOT_DOT,
            DotDot => SyntaxKind::DOT_DOT,
            ColonColon => SyntaxKind::COLON_COLON,
            SlashSlash => SyntaxKind::SLASH_SLASH,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            EqEq => SyntaxKind::EQ_EQ,
            TildeEq => SyntaxKind::TILDE_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,

            // Single-char punctuation
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Hash => SyntaxKind::HASH,
            Amp => SyntaxKind::AMP,
            Tilde => SyntaxKind::TILDE,
            Pipe => SyntaxKind::PIPE,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Eq => SyntaxKind::EQ,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,

            // Keywords
            AndKw => SyntaxKind::AND_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElseifKw => SyntaxKind::ELSEIF_KW,
            EndKw => SyntaxKind::END_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            ForKw => SyntaxKind::FOR_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            GotoKw => SyntaxKind::GOTO_KW,
            IfKw => SyntaxKind::IF_KW,
            InKw => SyntaxKind::IN_KW,
            LocalKw => SyntaxKind::LOCAL_KW,
            NilKw => SyntaxKind::NIL_KW,
            NotKw => SyntaxKind::NOT_KW,
            OrKw => SyntaxKind::OR_KW,
            RepeatKw => SyntaxKind::REPEAT_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            ThenKw => SyntaxKind::THEN_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}
