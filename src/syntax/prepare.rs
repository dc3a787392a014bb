//! Source repair run before parsing.
//!
//! Editors query while the user is still typing, so the buffer is usually
//! not valid Lua. Two repairs make the common cases parseable:
//!
//! - a trailing member access (`app:` or `hs.`) has its operator blanked
//! - Lua 5.4 attributes (`<const>`, `<close>`) are blanked
//!
//! Blanked characters become spaces, so every line/column stays where it was.

use crate::parser::{SyntaxKind, Token, tokenize};

const ATTRIBUTES: [&str; 2] = ["const", "close"];

/// Repair `text` so the parser accepts it, keeping positions intact
pub fn prepare_source(text: &str) -> String {
    let tokens = tokenize(text);
    let mut bytes = text.as_bytes().to_vec();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            SyntaxKind::DOT | SyntaxKind::COLON if !followed_by_word(text, token) => {
                blank(&mut bytes, token);
            }
            SyntaxKind::LT if is_attribute(&tokens[i..]) => {
                for token in &tokens[i..i + 3] {
                    blank(&mut bytes, token);
                }
                i += 3;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    // Only ASCII punctuation and names were replaced by ASCII spaces
    String::from_utf8(bytes).unwrap_or_else(|_| text.to_string())
}

fn followed_by_word(text: &str, token: &Token<'_>) -> bool {
    let end = usize::from(token.range().end());
    text[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// `<const>` or `<close>` written without inner whitespace
fn is_attribute(tokens: &[Token<'_>]) -> bool {
    matches!(
        tokens,
        [lt, name, gt, ..]
            if lt.kind == SyntaxKind::LT
                && name.kind == SyntaxKind::NAME
                && ATTRIBUTES.contains(&name.text)
                && gt.kind == SyntaxKind::GT
    )
}

fn blank(bytes: &mut [u8], token: &Token<'_>) {
    let range = token.range();
    for byte in &mut bytes[usize::from(range.start())..usize::from(range.end())] {
        *byte = b' ';
    }
}
