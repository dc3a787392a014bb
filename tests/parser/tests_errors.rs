//! Syntax error tests: first error wins, with a 0-indexed position.

use hsls::Position;
use hsls::parser::parse;
use rstest::rstest;

#[rstest]
#[case::dangling_colon("local window = app:", 0, 19, "<name> expected")]
#[case::dangling_dot("local x = hs.", 0, 13, "<name> expected")]
#[case::bare_name("app", 0, 3, "syntax error")]
#[case::missing_then("if x y() end", 0, 5, "'then' expected")]
#[case::unclosed_paren("f(1, 2", 0, 6, "')' expected")]
#[case::return_not_last("return 1\nx = 2", 1, 0, "'<eof>' expected")]
fn test_syntax_error(
    #[case] source: &str,
    #[case] line: usize,
    #[case] column: usize,
    #[case] message: &str,
) {
    let error = parse(source).unwrap_err();
    assert_eq!(error.position, Position::new(line, column), "{error}");
    assert!(error.message.contains(message), "{}", error.message);
}

#[test]
fn test_unclosed_function_names_opening_line() {
    let error = parse("hs.hotkey.bind({}, 'a', function()\n  x()\n").unwrap_err();
    assert!(error.message.contains("'end' expected"), "{}", error.message);
    assert!(error.message.contains("line 1"), "{}", error.message);
}

#[test]
fn test_error_display_is_one_indexed() {
    let error = parse("local = 1").unwrap_err();
    assert!(error.to_string().starts_with("1:7:"), "{error}");
}

fn nested_parens(levels: usize) -> String {
    format!("local x = {}1{}", "(".repeat(levels), ")".repeat(levels))
}

#[rstest]
#[case::parentheses(nested_parens(1000))]
#[case::tables(format!("local t = {}{}", "{".repeat(1000), "}".repeat(1000)))]
#[case::unary_operators(format!("local n = {}x", "not ".repeat(1000)))]
#[case::do_blocks(format!("{}{}", "do ".repeat(500), "end ".repeat(500)))]
fn test_deep_nesting_is_rejected(#[case] source: String) {
    let error = parse(&source).unwrap_err();
    assert!(error.message.contains("too many syntax levels"), "{}", error.message);
    assert_eq!(error.position.line, 0);
}

#[test]
fn test_moderate_nesting_parses() {
    assert!(parse(&nested_parens(50)).is_ok());
    assert!(parse(&format!("local t = {}{}", "{".repeat(30), "}".repeat(30))).is_ok());
}
