//! Completion suggestions implementation.
//!
//! The text before the cursor is matched against a fixed list of patterns,
//! first match wins:
//!
//! | Prefix                     | Suggests                                 |
//! |----------------------------|------------------------------------------|
//! | `hs.application.`          | non-method members of the module         |
//! | `hs.application('x'):`     | methods of the constructed module        |
//! | `tab[1][2]:`               | methods of the value at that index       |
//! | `tab.foo.bar:`             | methods of the value under that key      |
//! | `app:mainWindow():`        | methods of the value the call returns    |
//! | `app:`                     | methods of the variable                  |

use std::sync::Arc;

use super::Analysis;
use super::text_utils::{line_prefix, table_depth_level, table_indices};
use crate::base::constants::MODULE_SEPARATOR;
use crate::docs::{MemberKind, MemberSummary};
use crate::resolve::Declaration;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Variable,
    Function,
    Method,
    Module,
    Field,
    Constant,
    Constructor,
    Value,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Variable => 6,
            CompletionKind::Function => 3,
            CompletionKind::Method => 2,
            CompletionKind::Module => 9,
            CompletionKind::Field => 5,
            CompletionKind::Constant => 21,
            CompletionKind::Constructor => 4,
            CompletionKind::Value => 12,
        }
    }
}

impl From<MemberKind> for CompletionKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Variable => CompletionKind::Variable,
            MemberKind::Function => CompletionKind::Function,
            MemberKind::Method => CompletionKind::Method,
            MemberKind::Module => CompletionKind::Module,
            MemberKind::Field => CompletionKind::Field,
            MemberKind::Constant => CompletionKind::Constant,
            MemberKind::Constructor => CompletionKind::Constructor,
            MemberKind::Other => CompletionKind::Value,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
}

impl From<MemberSummary> for CompletionItem {
    fn from(member: MemberSummary) -> Self {
        Self {
            label: member.name.into(),
            kind: member.kind.into(),
            documentation: (!member.doc.is_empty()).then(|| member.doc.into()),
        }
    }
}

line_pattern!(MODULE_PATH, r"\bhs\.(?:\w+\.?)*$");
line_pattern!(MODULE_CALL, r"(\bhs.+?)(\w+)\(");
line_pattern!(INDEXED_TABLE, r"(\w+)((?:\[\d+\])+):$");
line_pattern!(KEYED_TABLE, r"(\w+)\.(.+?\b)?(\w+):$");
line_pattern!(CHAINED_METHOD, r"(\w+):(\w+)[^:]+:$");
line_pattern!(VARIABLE_METHOD, r"(\w+):\w*$");

/// Get completion suggestions for the cursor at `column` of `line_text`.
///
/// An unrecognized prefix or an unresolvable receiver yields no items.
pub fn completions(
    analysis: &Analysis,
    line_text: &str,
    line: usize,
    column: usize,
) -> Vec<CompletionItem> {
    let prefix = line_prefix(line_text, column);
    tracing::trace!(prefix, line, "completion");

    suggest(analysis, prefix, line)
        .map(|members| members.into_iter().map(CompletionItem::from).collect())
        .unwrap_or_default()
}

fn suggest(analysis: &Analysis, prefix: &str, line: usize) -> Option<Vec<MemberSummary>> {
    if let Some(found) = MODULE_PATH.find(prefix) {
        return module_members(analysis, found.as_str());
    }

    if let Some(captures) = MODULE_CALL.captures(prefix) {
        let module = analysis
            .store()
            .resolve_constructor(&captures[1], &captures[2])?;
        return analysis.store().lookup_members(&module, true);
    }

    let declaration = if let Some(captures) = INDEXED_TABLE.captures(prefix) {
        let indices = table_indices(&captures[2]);
        let index = indices.last().copied().unwrap_or(1);
        analysis.find_declaration(
            &Declaration::new(&captures[1], line)
                .with_table_index(index)
                .with_depth(indices.len()),
        )?
    } else if let Some(captures) = KEYED_TABLE.captures(prefix) {
        let depth = table_depth_level(captures.get(2).map(|m| m.as_str()));
        analysis.find_declaration(
            &Declaration::new(&captures[1], line)
                .with_table_key(&captures[3])
                .with_depth(depth),
        )?
    } else if let Some(captures) = CHAINED_METHOD.captures(prefix) {
        let receiver = analysis.find_declaration(&Declaration::new(&captures[1], line))?;
        analysis
            .store()
            .resolve_constructor(&receiver, &captures[2])?
    } else if let Some(captures) = VARIABLE_METHOD.captures(prefix) {
        analysis.find_declaration(&Declaration::new(&captures[1], line))?
    } else {
        return None;
    };

    analysis.store().lookup_members(&declaration, true)
}

/// Members for a module path being typed.
///
/// `hs.application.` lists the module itself; `hs.applic` lists the module
/// before the word being typed. Only paths with a schema document qualify.
fn module_members(analysis: &Analysis, statement: &str) -> Option<Vec<MemberSummary>> {
    let module = match statement.strip_suffix(MODULE_SEPARATOR) {
        Some(module) => module,
        None => statement.rsplit_once(MODULE_SEPARATOR)?.0,
    };
    let store = analysis.store();
    if !store.list_modules().iter().any(|known| known == module) {
        tracing::trace!(module, "not a documented module");
        return None;
    }
    store.lookup_members(module, false)
}
