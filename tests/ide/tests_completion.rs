//! Completion over the fixture docs.

use hsls::ide::CompletionKind;
use rstest::rstest;

use crate::helpers::analysis_helpers::{
    analysis_for, fixture_store, labels, line_of, lua, member_names,
};
use crate::helpers::source_fixtures::{
    APP_THEN_ACCESS, HOTKEY_CALLBACK, MULTI_LEVEL_NESTED, NESTED_LIST_EXPRESSION,
    NESTED_LIST_IDENTIFIER, NESTED_TABLE_EXPRESSION, NESTED_TABLE_IDENTIFIER, SHADOWED_IN_IF,
    SHADOWED_INSIDE_IF,
};

/// Complete at the end of `line` of `source`
fn complete_line_end(source: &str, line: usize) -> Vec<String> {
    let text = line_of(source, line);
    let analysis = analysis_for(source);
    labels(&analysis.completions(text, line, text.chars().count()))
}

#[test]
fn test_non_hs_path() {
    let analysis = analysis_for("");
    assert!(analysis.completions("fs.", 0, 3).is_empty());
}

#[test]
fn test_root_namespace() {
    let analysis = analysis_for("");
    let items = analysis.completions("hs.", 0, 3);
    assert_eq!(labels(&items), member_names("hs", false));
    assert_eq!(items[0].kind, CompletionKind::Module);
    assert_eq!(items[0].kind.to_lsp(), 9);
}

#[test]
fn test_partially_typed_member() {
    let analysis = analysis_for("");
    assert_eq!(
        labels(&analysis.completions("hs.applc", 0, 9)),
        member_names("hs", false)
    );
}

#[test]
fn test_nested_module_path() {
    let analysis = analysis_for("");
    let items = analysis.completions("local w = hs.application.watcher.", 0, 33);
    assert_eq!(labels(&items), vec!["activated", "launched", "new"]);
    assert_eq!(items[2].kind, CompletionKind::Constructor);
}

#[test]
fn test_constructor_call_methods() {
    let analysis = analysis_for("");
    let line = "hs.application('Code'):";
    assert_eq!(
        labels(&analysis.completions(line, 0, line.len())),
        member_names("hs.application", true)
    );
}

#[test]
fn test_method_items_carry_documentation() {
    let source = lua(APP_THEN_ACCESS);
    let analysis = analysis_for(&source);
    let items = analysis.completions("local window = app:", 1, 19);
    let main_window = items
        .iter()
        .find(|item| item.label.as_ref() == "mainWindow")
        .unwrap();
    assert_eq!(main_window.kind, CompletionKind::Method);
    assert!(main_window.documentation.is_some());
}

#[rstest]
#[case::from_constructor("local app = hs.application()\nlocal window = app:", 1)]
#[case::from_module_function("local app = hs.application.get('Safari')\nlocal window = app:", 1)]
#[case::through_alias("local app = hs.application()\nlocal myapp = app\nlocal window = myapp:", 2)]
#[case::positional_table("local app = { hs.application() }\nlocal window = app[1]:", 1)]
#[case::keyed_table("local app = { foo = hs.application() }\nlocal window = app.foo:", 1)]
#[case::shadowed_in_if(SHADOWED_IN_IF, 2)]
#[case::nested_table_expression(NESTED_TABLE_EXPRESSION, 5)]
#[case::nested_table_identifier(NESTED_TABLE_IDENTIFIER, 2)]
#[case::nested_list_expression(NESTED_LIST_EXPRESSION, 5)]
#[case::nested_list_identifier(NESTED_LIST_IDENTIFIER, 2)]
fn test_application_methods(#[case] fixture: &str, #[case] line: usize) {
    let source = lua(fixture);
    assert_eq!(
        complete_line_end(&source, line),
        member_names("hs.application", true)
    );
}

#[rstest]
#[case::shadowed_inside_if(SHADOWED_INSIDE_IF, 3)]
#[case::multi_level_nested(MULTI_LEVEL_NESTED, 6)]
fn test_chooser_methods(#[case] fixture: &str, #[case] line: usize) {
    let source = lua(fixture);
    assert_eq!(complete_line_end(&source, line), member_names("hs.chooser", true));
}

#[rstest]
#[case::chained_call("local app = hs.application()\nlocal window = app:mainWindow():", 1)]
#[case::callback_body(HOTKEY_CALLBACK, 4)]
fn test_window_methods(#[case] fixture: &str, #[case] line: usize) {
    let source = lua(fixture);
    assert_eq!(complete_line_end(&source, line), member_names("hs.window", true));
}

#[rstest]
#[case::unknown_variable("local window = app:", 0)]
#[case::literal_value("local app = 1\nlocal window = app:", 1)]
#[case::opaque_return("local app = hs.application()\nlocal n = app:name():", 1)]
#[case::plain_text("local x = 1", 0)]
fn test_no_completions(#[case] source: &str, #[case] line: usize) {
    assert!(complete_line_end(source, line).is_empty());
}

#[test]
fn test_completion_ignores_text_after_cursor() {
    let source = "local app = hs.application()\nlocal window = app:mainWindow()";
    let analysis = analysis_for(source);
    let items = analysis.completions("local window = app:mainWindow()", 1, 19);
    assert_eq!(labels(&items), member_names("hs.application", true));
}

#[test]
fn test_every_documented_module_completes() {
    let analysis = analysis_for("");
    for module in fixture_store().list_modules() {
        let line = format!("{module}.");
        assert_eq!(
            labels(&analysis.completions(&line, 0, line.len())),
            member_names(&module, false),
            "{module}"
        );
    }
}

#[rstest]
#[case::undocumented_module("hs.nope.")]
#[case::partial_word_in_undocumented_module("hs.nope.fo")]
#[case::trailing_double_separator("hs.application..")]
fn test_undocumented_module_path(#[case] line: &str) {
    let analysis = analysis_for("");
    assert!(analysis.completions(line, 0, line.len()).is_empty());
}
