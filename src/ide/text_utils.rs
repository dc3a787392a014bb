//! Text helpers shared by the line-pattern adapters.
//!
//! Columns are character offsets into a single line, the way editors report
//! cursor positions.

use std::sync::LazyLock;

use regex::Regex;

use crate::base::constants::MODULE_SEPARATOR;

static CALL_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("call parens pattern is valid"));

static TABLE_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("table index pattern is valid"));

/// Check if a character is part of a Lua word.
#[inline]
pub fn is_word_character(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Character range `(start, end)` of the word under the cursor.
///
/// A cursor placed right after the last character of a word still selects
/// that word.
pub fn word_range_at(line: &str, column: usize) -> Option<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();

    let anchor = if chars.get(column).is_some_and(|&c| is_word_character(c)) {
        column
    } else if column > 0 && chars.get(column - 1).is_some_and(|&c| is_word_character(c)) {
        column - 1
    } else {
        return None;
    };

    let mut start = anchor;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    let mut end = anchor;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// The word under the cursor.
pub fn word_at(line: &str, column: usize) -> Option<String> {
    let (start, end) = word_range_at(line, column)?;
    Some(line.chars().skip(start).take(end - start).collect())
}

/// Text of `line` before `column`, clamped to the line length.
pub fn line_prefix(line: &str, column: usize) -> &str {
    match line.char_indices().nth(column) {
        Some((offset, _)) => &line[..offset],
        None => line,
    }
}

/// Remove every parenthesised argument list: `app:get('x'):focus()` → `app:get:focus`
pub fn strip_call_parens(text: &str) -> String {
    CALL_PARENS.replace_all(text, "").into_owned()
}

/// Table nesting level named by the middle part of a key chain.
///
/// For `tab.foo.bar:` the middle part is `foo.`, which sits one table below
/// `tab`, so the key `bar` is looked up at depth 2. No middle part means 0,
/// which a declaration treats as the outermost table.
pub fn table_depth_level(expression: Option<&str>) -> usize {
    match expression {
        None | Some("") => 0,
        Some(expression) => {
            expression
                .strip_suffix(MODULE_SEPARATOR)
                .unwrap_or(expression)
                .split(MODULE_SEPARATOR)
                .count()
                + 1
        }
    }
}

/// Positional indices of an index suffix: `[1][2]` → `[1, 2]`
pub fn table_indices(suffix: &str) -> Vec<usize> {
    TABLE_INDEX
        .captures_iter(suffix)
        .filter_map(|captures| captures[1].parse().ok())
        .collect()
}

/// Wrap text in a markdown code block.
pub fn code_block(text: &str) -> String {
    format!("```\n{text}\n```")
}
