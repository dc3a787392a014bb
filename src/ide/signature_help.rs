//! Signature help for the call being typed.

use super::Analysis;
use super::text_utils::{line_prefix, table_depth_level, table_indices};
use crate::resolve::Declaration;

/// One documented parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterInfo {
    pub label: String,
    pub documentation: String,
}

/// Signature of a member function or method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHelp {
    /// Parenthesised tail of the definition: `(rect[, duration]) -> hs.window object`
    pub label: String,
    pub documentation: String,
    pub parameters: Vec<ParameterInfo>,
    /// Index of the argument under the cursor, when inside an argument list
    pub active_parameter: Option<usize>,
}

line_pattern!(HS_MEMBER, r"(\bhs(?:.+)?[:.])(\w+)");
line_pattern!(CALL_SEPARATOR, r"\(.*?\):");
line_pattern!(METHOD_CHAIN, r"(?:^|[^.\w])(\w+):(\w+)[^:]+:(\w+)[^)]+$");
line_pattern!(METHOD_CALL, r"(?:^|[^.\w])(\w+):(\w+)\(");
line_pattern!(INDEXED_METHOD, r"(\w+)((?:\[\d+\])+):(\w+)\(");
line_pattern!(KEYED_METHOD, r"(\w+)\.(.+?\b)?(\w+):(\w+)");
line_pattern!(SIGNATURE_TAIL, r"\((.*)\).*");
line_pattern!(PARAMETER_NAME, r"\*\s`?(\w+)");
line_pattern!(PARAMETER_DOC, r"\*\s.+?-\s(.+)");

/// Get signature help for the cursor at `column` of `line_text`.
pub fn signature_help(
    analysis: &Analysis,
    line_text: &str,
    line: usize,
    column: usize,
) -> Option<SignatureHelp> {
    let prefix = line_prefix(line_text, column);
    tracing::trace!(prefix, line, "signature help");

    let (module, member) = callee(analysis, prefix, line)?;
    let info = analysis.store().signature_info(&module, &member)?;

    let label = SIGNATURE_TAIL
        .find(&info.def)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let parameters = info
        .parameters
        .iter()
        .filter_map(|parameter| {
            let name = PARAMETER_NAME.captures(parameter)?;
            let doc = PARAMETER_DOC.captures(parameter)?;
            Some(ParameterInfo {
                label: name[1].to_string(),
                documentation: doc[1].to_string(),
            })
        })
        .collect();

    Some(SignatureHelp {
        label,
        documentation: info.doc,
        parameters,
        active_parameter: active_parameter(prefix),
    })
}

/// Module and member of the function being called.
fn callee(analysis: &Analysis, prefix: &str, line: usize) -> Option<(String, String)> {
    if let Some(captures) = HS_MEMBER.captures(prefix) {
        let base = CALL_SEPARATOR.replace_all(&captures[1], "");
        let base = base.trim_end_matches([':', '.']);
        if base.contains(':') {
            return None;
        }
        return Some((base.to_string(), captures[2].to_string()));
    }

    if let Some(captures) = METHOD_CHAIN.captures(prefix) {
        let receiver = analysis.find_declaration(&Declaration::new(&captures[1], line))?;
        let module = analysis
            .store()
            .resolve_constructor(&receiver, &captures[2])?;
        return Some((module, captures[3].to_string()));
    }

    if let Some(captures) = METHOD_CALL.captures(prefix) {
        let receiver = analysis.find_declaration(&Declaration::new(&captures[1], line))?;
        return Some((receiver, captures[2].to_string()));
    }

    if let Some(captures) = INDEXED_METHOD.captures(prefix) {
        let indices = table_indices(&captures[2]);
        let receiver = analysis.find_declaration(
            &Declaration::new(&captures[1], line)
                .with_table_index(indices.last().copied().unwrap_or(1))
                .with_depth(indices.len()),
        )?;
        return Some((receiver, captures[3].to_string()));
    }

    if let Some(captures) = KEYED_METHOD.captures(prefix) {
        let receiver = analysis.find_declaration(
            &Declaration::new(&captures[1], line)
                .with_table_key(&captures[3])
                .with_depth(table_depth_level(captures.get(2).map(|m| m.as_str()))),
        )?;
        return Some((receiver, captures[4].to_string()));
    }

    None
}

/// Number of commas after the last `(` of the prefix.
///
/// A `(` in the first column does not open an argument list.
fn active_parameter(prefix: &str) -> Option<usize> {
    match prefix.rfind('(') {
        Some(0) | None => None,
        Some(open) => Some(prefix[open + 1..].matches(',').count()),
    }
}
