//! Statement-level parser tests over realistic Hammerspoon configs.

use hsls::parser::{ClauseKind, ExpressionKind, StatementKind, TableFieldKind, parse};
use rstest::rstest;

use crate::helpers::analysis_helpers::lua;

#[rstest]
#[case::local_call("local app = hs.application()")]
#[case::method_chain("local window = hs.application.frontmostApplication():mainWindow()")]
#[case::string_call("local app = hs.application.get 'Safari'")]
#[case::table_call("hs.alert.show{ text = 'hi' }")]
#[case::numeric_for("for i = 1, 10, 2 do print(i) end")]
#[case::generic_for("for _, win in ipairs(hs.window.allWindows()) do win:focus() end")]
#[case::while_loop("while hs.application.get('x') do break end")]
#[case::repeat_loop("repeat local x = 1 until x > 0")]
#[case::goto_label("goto done ::done::")]
#[case::local_function("local function focus(app) return app:mainWindow() end")]
#[case::method_function("function obj:init() self.app = hs.application() end")]
#[case::long_string("local s = [==[\nhs.application]==]")]
#[case::varargs("local function f(...) local a, b = ... end")]
#[case::operators("local n = #t + 2 ^ -3 // 4 .. 'x' << 1 ~= 5 and not nil or ~0")]
#[case::semicolons(";;local a = 1;")]
fn test_accepts(#[case] source: &str) {
    if let Err(error) = parse(source) {
        panic!("{source:?} should parse: {error}");
    }
}

#[test]
fn test_hotkey_callback_is_a_call_statement() {
    let source = lua(r#"
        hs.hotkey.bind({"cmd", "alt"}, "W", function()
            local app = hs.application.frontmostApplication()
        end)
    "#);
    let chunk = parse(&source).unwrap();
    assert_eq!(chunk.body.len(), 1);

    let StatementKind::Call(call) = &chunk.body[0].kind else {
        panic!("expected call statement");
    };
    let ExpressionKind::Call { arguments, .. } = &call.kind else {
        panic!("expected call expression");
    };
    let callback = arguments[2].as_function().expect("third argument is a function");
    assert_eq!(callback.body.len(), 1);
    assert_eq!(callback.span.start.line, 0);
    assert_eq!(callback.span.end.line, 2);
}

#[test]
fn test_if_clause_spans_cover_their_lines() {
    let source = lua(r#"
        if a then
            x = 1
        elseif b then
            x = 2
        else
            x = 3
        end
    "#);
    let chunk = parse(&source).unwrap();
    let StatementKind::If(if_statement) = &chunk.body[0].kind else {
        panic!("expected if");
    };

    let kinds: Vec<_> = if_statement.clauses.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ClauseKind::If, ClauseKind::ElseIf, ClauseKind::Else]);

    let lines: Vec<_> = if_statement
        .clauses
        .iter()
        .map(|c| (c.span.start.line, c.span.end.line))
        .collect();
    assert_eq!(lines, vec![(0, 2), (2, 4), (4, 6)]);
    assert!(chunk.body[0].span.contains_line(6));
}

#[test]
fn test_table_constructor_field_kinds() {
    let chunk = parse("local t = { app = a, [1] = b, c; d }").unwrap();
    let StatementKind::Local(local) = &chunk.body[0].kind else {
        panic!("expected local");
    };
    let ExpressionKind::Table(fields) = &local.init[0].kind else {
        panic!("expected table");
    };

    assert!(matches!(&fields[0].kind, TableFieldKind::Named { key, .. } if key.name == "app"));
    assert!(matches!(fields[1].kind, TableFieldKind::Keyed { .. }));
    assert!(matches!(fields[2].kind, TableFieldKind::Positional { .. }));
    assert!(matches!(fields[3].kind, TableFieldKind::Positional { .. }));
}

#[test]
fn test_attribs_are_parsed_after_repair() {
    let chunk = hsls::build_snapshot("local app <const> = hs.application()", 1).unwrap();
    let StatementKind::Local(local) = &chunk.chunk().body[0].kind else {
        panic!("expected local");
    };
    assert_eq!(local.variables[0].name, "app");
}
