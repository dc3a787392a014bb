//! Signature help over the fixture docs.

use rstest::rstest;

use crate::helpers::analysis_helpers::{analysis_for, doc};

const APP: &str = "local app = hs.application()";

/// Signature help at the end of line 1, with `first` as line 0.
///
/// The installed document has the call closed so it parses.
fn help_at_end(first: &str, line: &str) -> Option<hsls::ide::SignatureHelp> {
    let source = format!("{first}\n{line})");
    analysis_for(&source).signature_help(line, 1, line.chars().count())
}

#[test]
fn test_blank_line() {
    assert!(analysis_for("").signature_help(" ", 0, 1).is_none());
}

#[test]
fn test_hs_path_with_active_parameter() {
    let line = "local app = hs.window():setFrame({},)";
    let help = analysis_for("").signature_help(line, 0, 36).unwrap();

    assert_eq!(help.label, "(rect[, duration]) -> hs.window object");
    assert_eq!(help.documentation, doc("hs.window", "setFrame"));
    assert_eq!(help.active_parameter, Some(1));
    let names: Vec<&str> = help.parameters.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(names, vec!["rect", "duration"]);
}

#[test]
fn test_hs_path_empty_arguments() {
    let line = "hs.application():activate()";
    let help = analysis_for("").signature_help(line, 0, 26).unwrap();
    assert_eq!(help.label, "([allWindows]) -> bool");
    assert_eq!(help.active_parameter, Some(0));
}

#[test]
fn test_member_without_definition_arguments() {
    let help = analysis_for("")
        .signature_help("hs.alert.closeAll(", 0, 18)
        .unwrap();
    assert_eq!(help.label, "([fadeOutDuration])");
    assert_eq!(help.parameters.len(), 1);
    assert_eq!(help.parameters[0].label, "fadeOutDuration");
}

#[rstest]
#[case::method_chain(APP, "local window = app:mainWindow():setSize(", "(size) -> window")]
#[case::method_call(APP, "local running = app:isRunning(", "() -> boolean")]
#[case::keyed_receiver(
    "local tab = { app = hs.application() }",
    "local window = tab.app:getWindow(",
    "(title) -> hs.window object"
)]
#[case::indexed_receiver(
    "local tab = { hs.application() }",
    "local window = tab[1]:getWindow(",
    "(title) -> hs.window object"
)]
fn test_signature_label(#[case] first: &str, #[case] line: &str, #[case] label: &str) {
    let help = help_at_end(first, line).unwrap();
    assert_eq!(help.label, label);
    assert_eq!(help.active_parameter, Some(0));
}

#[test]
fn test_parameter_documentation() {
    let help = help_at_end(APP, "local window = app:mainWindow():setSize(").unwrap();
    assert_eq!(help.parameters.len(), 1);
    assert_eq!(help.parameters[0].label, "size");
    assert_eq!(
        help.parameters[0].documentation,
        "A size-table containing the width and height the window should be resized to"
    );

    let help = help_at_end(
        "local tab = { app = hs.application() }",
        "local window = tab.app:getWindow(",
    )
    .unwrap();
    assert_eq!(help.parameters[0].label, "title");
    assert_eq!(
        help.parameters[0].documentation,
        "the desired window's title string as per `hs.window:title()`"
    );
}

#[rstest]
#[case::unknown_receiver("local x = 1", "local running = nope:isRunning(")]
#[case::unknown_member(APP, "local running = app:nope(")]
fn test_no_signature(#[case] first: &str, #[case] line: &str) {
    assert!(help_at_end(first, line).is_none());
}
