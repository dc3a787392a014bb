//! Values reached through table literals.

use hsls::Declaration;
use rstest::rstest;

use crate::helpers::analysis_helpers::{analysis_for, lua};
use crate::helpers::source_fixtures::{
    NESTED_LIST_EXPRESSION, NESTED_LIST_IDENTIFIER, NESTED_TABLE_EXPRESSION,
    NESTED_TABLE_IDENTIFIER,
};

fn keyed(key: &str, line: usize, depth: usize) -> Declaration {
    Declaration::new("tab", line).with_table_key(key).with_depth(depth)
}

fn indexed(index: usize, line: usize, depth: usize) -> Declaration {
    Declaration::new("tab", line).with_table_index(index).with_depth(depth)
}

#[rstest]
#[case::nested_key_expression(NESTED_TABLE_EXPRESSION, keyed("bar", 5, 2))]
#[case::nested_key_identifier(NESTED_TABLE_IDENTIFIER, keyed("bar", 2, 2))]
#[case::nested_index_expression(NESTED_LIST_EXPRESSION, indexed(1, 5, 2))]
#[case::nested_index_identifier(NESTED_LIST_IDENTIFIER, indexed(1, 2, 2))]
fn test_nested_fields(#[case] fixture: &str, #[case] declaration: Declaration) {
    let source = lua(fixture);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&declaration).as_deref(),
        Some("hs.application")
    );
}

#[rstest]
#[case::first_key(keyed("app", 0, 1), Some("hs.application"))]
#[case::second_key(keyed("chooser", 0, 1), Some("hs.chooser"))]
#[case::missing_key(keyed("nope", 0, 1), None)]
#[case::first_position(indexed(1, 0, 1), Some("hs.window"))]
#[case::positions_skip_named_fields(indexed(2, 0, 1), Some("hs.alert"))]
#[case::position_out_of_range(indexed(3, 0, 1), None)]
#[case::depth_deeper_than_table(keyed("app", 0, 2), None)]
fn test_flat_table(#[case] declaration: Declaration, #[case] expected: Option<&str>) {
    let source = "local tab = { app = hs.application(), hs.window(), chooser = hs.chooser(), hs.alert() }";
    let analysis = analysis_for(source);
    assert_eq!(analysis.find_declaration(&declaration).as_deref(), expected);
}

#[test]
fn test_key_only_matches_at_requested_depth() {
    let analysis = analysis_for("local tab = { foo = { bar = hs.application() }, bar = hs.chooser() }");
    assert_eq!(
        analysis.find_declaration(&keyed("bar", 0, 1)).as_deref(),
        Some("hs.chooser")
    );
    assert_eq!(
        analysis.find_declaration(&keyed("bar", 0, 2)).as_deref(),
        Some("hs.application")
    );
}

#[test]
fn test_table_without_field_keeps_scanning() {
    let source = lua(r#"
        local tab = { app = hs.application() }
        tab = { other = 1 }
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&keyed("app", 1, 1)).as_deref(),
        Some("hs.application")
    );
}

#[test]
fn test_table_field_as_receiver() {
    let source = lua(r#"
        local tab = { app = hs.application(), { hs.application() } }
        local title = tab.app:mainWindow()
        local other = tab[1][1]:mainWindow()
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("title", 1)).as_deref(),
        Some("hs.window")
    );
    assert_eq!(
        analysis.find_declaration(&Declaration::new("other", 2)).as_deref(),
        Some("hs.window")
    );
}

#[test]
fn test_string_index_selects_key() {
    let source = lua(r#"
        local tab = { app = hs.application() }
        local window = tab["app"]:mainWindow()
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("window", 1)).as_deref(),
        Some("hs.window")
    );
}

#[test]
fn test_outer_indices_descend_through_first_nested_table() {
    let analysis = analysis_for("local tab = { { hs.application() }, { hs.chooser() } }");
    assert_eq!(
        analysis.find_declaration(&indexed(1, 0, 2)).as_deref(),
        Some("hs.application")
    );

    // Only the last index is carried by the query
    let source = lua(r#"
        local tab = { { hs.application() }, { hs.chooser() } }
        local window = tab[2][1]:mainWindow()
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("window", 1)).as_deref(),
        Some("hs.window")
    );
}

#[test]
fn test_plain_query_skips_table_initializer() {
    let source = lua(r#"
        local tab = hs.application()
        tab = { app = hs.chooser() }
    "#);
    let analysis = analysis_for(&source);
    assert_eq!(
        analysis.find_declaration(&Declaration::new("tab", 1)).as_deref(),
        Some("hs.application")
    );
}
