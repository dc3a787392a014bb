//! Hover over the fixture docs.

use rstest::rstest;

use crate::helpers::analysis_helpers::{analysis_for, doc};

const APP: &str = "local app = hs.application()";
const KEYED: &str = "local tab = { app = hs.application() }";
const INDEXED: &str = "local tab = { hs.application() }";

/// Hover `column` of line 1, with `first` as line 0
fn hover_second_line(first: &str, line: &str, column: usize) -> Option<hsls::ide::HoverResult> {
    let source = format!("{first}\n{line}");
    analysis_for(&source).hover(line, 1, column)
}

#[rstest]
#[case::whitespace("     ", 5)]
#[case::keyword("local", 3)]
#[case::member_without_return("local alert = hs.alert.closeAll()", 7)]
#[case::chained_hs_receiver("hs.application():mainWindow():focus", 33)]
#[case::undeclared("local x = y", 10)]
fn test_no_hover(#[case] line: &str, #[case] column: usize) {
    let analysis = analysis_for("");
    assert!(analysis.hover(line, 0, column).is_none());
}

#[test]
fn test_module_documentation() {
    let result = analysis_for("").hover("hs.application", 0, 5).unwrap();
    assert_eq!(result.contents, doc("hs", "application"));
    assert_eq!(result.resolved, None);
}

#[test]
fn test_member_of_constructor_call() {
    let result = analysis_for("")
        .hover("hs.application():mainWindow", 0, 24)
        .unwrap();
    assert_eq!(result.contents, doc("hs.application", "mainWindow"));
}

#[test]
fn test_hover_at_word_end() {
    let result = analysis_for("").hover("hs.application", 0, 14).unwrap();
    assert_eq!(result.contents, doc("hs", "application"));
}

#[rstest]
#[case::method_of_variable(APP, "local window = app:mainWindow()", 25, "hs.application", "mainWindow")]
#[case::method_chain(APP, "local window = app:mainWindow():setSize({})", 35, "hs.window", "setSize")]
#[case::keyed_receiver(KEYED, "local window = tab.app:mainWindow()", 27, "hs.application", "mainWindow")]
#[case::indexed_receiver(INDEXED, "local window = tab[1]:getWindow('x')", 26, "hs.application", "getWindow")]
fn test_member_documentation(
    #[case] first: &str,
    #[case] line: &str,
    #[case] column: usize,
    #[case] module: &str,
    #[case] member: &str,
) {
    let result = hover_second_line(first, line, column).unwrap();
    assert_eq!(result.contents, doc(module, member));
    assert_eq!(result.resolved, None);
}

#[rstest]
#[case::constructor_call("local app = hs.application()", 6, "hs.application")]
#[case::explicit_constructor("local watcher = hs.application.watcher.new(fn)", 7, "hs.application.watcher")]
#[case::opaque_return("local path = hs.application.pathForBundleID('x')", 7, "string or nil")]
fn test_initialization_on_first_line(
    #[case] line: &str,
    #[case] column: usize,
    #[case] expected: &str,
) {
    let result = analysis_for(line).hover(line, 0, column).unwrap();
    assert_eq!(result.resolved.as_deref(), Some(expected));
    assert_eq!(result.contents, format!("```\n{expected}\n```"));
}

#[rstest]
#[case::method_call(APP, "local window = app:mainWindow()", 8, "hs.window")]
#[case::keyed_method(KEYED, "local window = tab.app:getWindow('x')", 11, "hs.window")]
#[case::method_chain(APP, "local window = app:getWindow('x'):centerOnScreen()", 11, "hs.window")]
#[case::keyed_value(KEYED, "local window = tab.app", 22, "hs.application")]
#[case::alias(APP, "local window = app", 17, "hs.application")]
fn test_resolved_type(
    #[case] first: &str,
    #[case] line: &str,
    #[case] column: usize,
    #[case] expected: &str,
) {
    let result = hover_second_line(first, line, column).unwrap();
    assert_eq!(result.resolved.as_deref(), Some(expected));
}
