use crate::SemanticAnalyzer;
use npc_lex::{Lexer, Token, TokenKind};
use npc_par::Parser;
use npc_util::{DiagnosticKind, Handler, Level};

fn analyze(source: &str) -> Handler {
    let mut lex_handler = Handler::new();
    let mut lexer = Lexer::new(source, &mut lex_handler);
    let tokens: Vec<Token> = std::iter::from_fn(|| Some(lexer.next_token()))
        .take_while(|t| !matches!(t.kind, TokenKind::Eof))
        .chain(std::iter::once(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: 0,
            column: 0,
        }))
        .collect();

    let mut par_handler = Handler::new();
    let mut parser = Parser::new(tokens, &mut par_handler);
    let program = parser.parse();
    assert!(!par_handler.has_errors(), "source failed to parse: {source}");

    let mut handler = Handler::new();
    SemanticAnalyzer::analyze(&program, &mut handler);
    handler
}

#[test]
fn well_typed_program_has_no_diagnostics() {
    let handler = analyze("fn add(a: i32, b: i32) -> i32 { return a + b }");
    assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
}

#[test]
fn mutual_forward_reference_between_functions_resolves() {
    let source = "fn a() -> i32 { return b() } fn b() -> i32 { return 0 }";
    let handler = analyze(source);
    assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
}

#[test]
fn undefined_variable_is_reported() {
    let handler = analyze("fn f() -> i32 { return missing }");
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::UndefinedVariable));
}

#[test]
fn undefined_function_call_is_reported() {
    let handler = analyze("fn f() { missing_fn() }");
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::UndefinedFunction));
}

#[test]
fn redeclaration_in_the_same_scope_is_reported() {
    let handler = analyze("fn f() { let x: i32 = 1 let x: i32 = 2 }");
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::Redefinition));
}

#[test]
fn shadowing_in_a_nested_scope_is_not_a_redeclaration() {
    let handler = analyze("fn f() { let x: i32 = 1 if true { let x: bool = true } }");
    assert!(!handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::Redefinition));
}

#[test]
fn unused_variable_is_reported_as_a_demoted_warning() {
    let handler = analyze("fn f() { let unused_x: i32 = 1 }");
    let warning = handler
        .diagnostics()
        .iter()
        .find(|d| d.message.contains("unused_x"))
        .expect("expected an unused-variable diagnostic");
    assert_eq!(warning.level, Level::Warning);
}

#[test]
fn using_a_variable_suppresses_the_unused_warning() {
    let handler = analyze("fn f() -> i32 { let x: i32 = 1 return x }");
    assert!(!handler.diagnostics().iter().any(|d| d.message.contains("unused")));
}

#[test]
fn mismatched_arithmetic_operands_yield_type_error_but_still_type_as_the_left_operand() {
    let handler = analyze(r#"fn f() { let x = 1 + "oops" }"#);
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::TypeError));
}

#[test]
fn comparison_mismatch_still_produces_bool_result_without_cascading() {
    // A type mismatch in the comparison should raise exactly one
    // TypeError; the outer `if` must not also fail on the (still-bool)
    // comparison result.
    let handler = analyze(r#"fn f() { if 1 == "x" { } }"#);
    let type_errors = handler
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagnosticKind::TypeError)
        .count();
    assert_eq!(type_errors, 1);
}

#[test]
fn return_outside_a_function_is_a_semantic_error() {
    let handler = analyze("return 1");
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::SemanticError));
}

#[test]
fn struct_field_access_type_checks() {
    let source = "struct Point { x: i32, y: i32 } fn f(p: Point) -> i32 { return p.x }";
    let handler = analyze(source);
    assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
}

#[test]
fn unknown_field_access_is_reported() {
    let source = "struct Point { x: i32 } fn f(p: Point) -> i32 { return p.z }";
    let handler = analyze(source);
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::TypeError));
}

#[test]
fn analysis_is_idempotent_across_repeated_runs() {
    let source = "fn f() -> i32 { let x: i32 = 1 return missing }";
    let first = analyze(source);
    let second = analyze(source);
    assert_eq!(first.diagnostics().len(), second.diagnostics().len());
    for (a, b) in first.diagnostics().iter().zip(second.diagnostics().iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.message, b.message);
    }
}

#[test]
fn builtin_print_and_len_are_callable_without_declaration() {
    let handler = analyze(r#"fn f() { print("hello") }"#);
    assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
}
