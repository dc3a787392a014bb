//! Hover information implementation.
//!
//! Hovering a member shows its documentation. Hovering the variable on the
//! left side of an initialization analyses the right side instead and shows
//! the module it constructs:
//!
//! ```lua
//! local window = app:mainWindow()   -- hover `window` → hs.window
//! ```

use super::Analysis;
use super::text_utils::{
    code_block, line_prefix, strip_call_parens, table_depth_level, table_indices, word_range_at,
};
use crate::resolve::Declaration;

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// For code-block results, the module path or return type shown.
    pub resolved: Option<String>,
}

impl HoverResult {
    fn documentation(doc: String) -> Self {
        Self {
            contents: doc,
            resolved: None,
        }
    }

    fn code_block(text: String) -> Self {
        Self {
            contents: code_block(&text),
            resolved: Some(text),
        }
    }
}

line_pattern!(INITIALIZATION, r"^(?:local )?(\w+)$");
line_pattern!(HS_MEMBER, r"(\bhs(?:.+)?[:.])(\w+)$");
line_pattern!(METHOD_CHAIN, r"(?:^|[^.\w])(\w+):(\w+):(\w+)");
line_pattern!(METHOD, r"(?:^|[^.\w])(\w+):(\w+)$");
line_pattern!(INDEXED_METHOD, r"(\w+)((?:\[\d+\])+):(\w+)");
line_pattern!(KEYED_METHOD, r"(\w+)\.(.+?\b)?(\w+):(\w+)");
line_pattern!(KEYED_VALUE, r"(\w+)\.([^(]+\b)?(\w+)$");

/// What to show for a resolved `module.member` pair
#[derive(Clone, Copy)]
enum Show {
    /// Member documentation
    Docs,
    /// The module the member constructs
    Constructor,
}

struct HoverQuery<'a> {
    analysis: &'a Analysis,
    line: usize,
    show: Show,
}

impl HoverQuery<'_> {
    fn declaration(&self, declaration: Declaration) -> Option<String> {
        self.analysis.find_declaration(&declaration)
    }

    fn member(&self, module: &str, member: &str) -> Option<HoverResult> {
        let store = self.analysis.store();
        match self.show {
            Show::Docs => store
                .documentation(module, member)
                .map(HoverResult::documentation),
            Show::Constructor => store
                .resolve_constructor(module, member)
                .map(HoverResult::code_block),
        }
    }

    fn resolve(&self, prefix: &str, word: &str) -> Option<HoverResult> {
        if let Some(captures) = HS_MEMBER.captures(prefix) {
            let base = captures[1].trim_end_matches([':', '.']);
            if base.contains(':') {
                return None;
            }
            return self.member(base, &captures[2]);
        }

        if let Some(captures) = METHOD_CHAIN.captures(prefix) {
            let receiver = self.declaration(Declaration::new(&captures[1], self.line))?;
            let module = self
                .analysis
                .store()
                .resolve_constructor(&receiver, &captures[2])?;
            return self.member(&module, &captures[3]);
        }

        if let Some(captures) = METHOD.captures(prefix) {
            let receiver = self.declaration(Declaration::new(&captures[1], self.line))?;
            return self.member(&receiver, &captures[2]);
        }

        if let Some(captures) = INDEXED_METHOD.captures(prefix) {
            let indices = table_indices(&captures[2]);
            let receiver = self.declaration(
                Declaration::new(&captures[1], self.line)
                    .with_table_index(indices.last().copied().unwrap_or(1))
                    .with_depth(indices.len()),
            )?;
            return self
                .analysis
                .store()
                .documentation(&receiver, &captures[3])
                .map(HoverResult::documentation);
        }

        if let Some(captures) = KEYED_METHOD.captures(prefix) {
            let receiver = self.declaration(
                Declaration::new(&captures[1], self.line)
                    .with_table_key(&captures[3])
                    .with_depth(table_depth_level(captures.get(2).map(|m| m.as_str()))),
            )?;
            return self.member(&receiver, &captures[4]);
        }

        if let Some(captures) = KEYED_VALUE.captures(prefix) {
            return self
                .declaration(
                    Declaration::new(&captures[1], self.line)
                        .with_table_key(&captures[3])
                        .with_depth(table_depth_level(captures.get(2).map(|m| m.as_str()))),
                )
                .map(HoverResult::code_block);
        }

        self.declaration(Declaration::new(word, self.line))
            .map(HoverResult::code_block)
    }
}

/// Get hover information for the word at `column` of `line_text`.
pub fn hover(
    analysis: &Analysis,
    line_text: &str,
    line: usize,
    column: usize,
) -> Option<HoverResult> {
    let (start, end) = word_range_at(line_text, column)?;
    let mut word: String = line_text.chars().skip(start).take(end - start).collect();
    if analysis.keywords().contains(&word) {
        return None;
    }

    let mut prefix = strip_call_parens(line_prefix(line_text, end));
    let mut show = Show::Docs;

    if INITIALIZATION.is_match(prefix.trim()) {
        if let Some((_, value)) = line_text.split_once("= ") {
            if !value.is_empty() {
                show = Show::Constructor;
                prefix = strip_call_parens(value);
                word = prefix.clone();
            }
        }
    }
    tracing::trace!(%prefix, %word, line, "hover");

    HoverQuery {
        analysis,
        line,
        show,
    }
    .resolve(&prefix, &word)
}
