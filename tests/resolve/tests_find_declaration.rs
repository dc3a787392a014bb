//! Declaration queries over the fixture docs.

use hsls::{Declaration, ResolveLimits, find_declaration};
use rstest::rstest;

use crate::helpers::analysis_helpers::{analysis_for, fixture_store, lua};

#[rstest]
#[case::constructor_call("local app = hs.application()", "app", 0, Some("hs.application"))]
#[case::module_function("local app = hs.application.get('Safari')", "app", 0, Some("hs.application"))]
#[case::explicit_constructor("local w = hs.application.watcher.new(f)", "w", 0, Some("hs.application.watcher"))]
#[case::chained_call("local win = hs.application():mainWindow()", "win", 0, Some("hs.window"))]
#[case::long_arrow("local win = hs.window.focusedWindow():centerOnScreen()", "win", 0, Some("hs.window"))]
#[case::opaque_return("local path = hs.application.pathForBundleID('x')", "path", 0, Some("string or nil"))]
#[case::no_return_type("local a = hs.alert.closeAll()", "a", 0, None)]
#[case::unknown_member("local a = hs.application.nope()", "a", 0, None)]
#[case::unknown_module("local a = hs.nope.new()", "a", 0, None)]
#[case::plain_function("local a = print('x')", "a", 0, None)]
#[case::literal("local a = 42", "a", 0, None)]
#[case::undeclared("local a = 42", "b", 0, None)]
fn test_single_line(
    #[case] source: &str,
    #[case] name: &str,
    #[case] line: usize,
    #[case] expected: Option<&str>,
) {
    let analysis = analysis_for(source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new(name, line)).as_deref(),
        expected
    );
}

#[test]
fn test_method_chain_through_variable() {
    let source = lua(r#"
        local app = hs.application()
        local window = app:getWindow('Inbox'):centerOnScreen()
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("window", 1)).as_deref(),
        Some("hs.window")
    );
}

#[test]
fn test_alias_is_followed() {
    let source = lua(r#"
        local app = hs.application()
        local myapp = app
        local other = myapp
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("other", 2)).as_deref(),
        Some("hs.application")
    );
}

#[test]
fn test_reassignment_wins_over_local() {
    let source = lua(r#"
        local app = hs.application()
        app = hs.chooser.new(function() end)
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("app", 0)).as_deref(),
        Some("hs.application")
    );
    assert_eq!(
        analysis.find_declaration(&Declaration::new("app", 1)).as_deref(),
        Some("hs.chooser")
    );
}

#[test]
fn test_multiple_assignment_by_position() {
    let source = "local app, chooser = hs.application(), hs.chooser()";
    let analysis = analysis_for(source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("chooser", 0)).as_deref(),
        Some("hs.chooser")
    );
}

#[test]
fn test_short_destructure_is_unknown() {
    let source = lua(r#"
        local app = hs.application()
        local app, window = hs.application()
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(analysis.find_declaration(&Declaration::new("window", 1)), None);
}

#[test]
fn test_reserved_words_are_never_resolved() {
    let analysis = analysis_for("local app = hs.application()");
    assert_eq!(analysis.find_declaration(&Declaration::new("local", 0)), None);
    assert_eq!(analysis.find_declaration(&Declaration::new("end", 0)), None);
}

#[test]
fn test_repeated_queries_are_idempotent() {
    let source = lua(r#"
        local app = hs.application()
        local window = app:mainWindow()
    "#);
    let analysis = analysis_for(&source);
    let query = Declaration::new("window", 1);
    let first = analysis.find_declaration(&query);
    let second = analysis.find_declaration(&query);
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("hs.window"));
}

#[test]
fn test_depth_limit_degrades_to_unknown() {
    let source = lua(r#"
        local a = hs.application()
        local b = a:mainWindow()
        local c = b:focus()
        local d = c:focus()
    "#);
    let analysis = analysis_for(&source);
    let store = fixture_store();
    let keywords = analysis.keywords();

    let shallow = ResolveLimits { max_depth: 2 };
    assert_eq!(
        find_declaration(analysis.snapshot(), &store, keywords, &Declaration::new("d", 3), shallow),
        None
    );
    assert_eq!(
        find_declaration(
            analysis.snapshot(),
            &store,
            keywords,
            &Declaration::new("d", 3),
            ResolveLimits::default()
        )
        .as_deref(),
        Some("hs.window")
    );
}
