use inkwell::context::Context;
use npc_lex::{Lexer, Token, TokenKind};
use npc_par::Parser;
use npc_sem::SemanticAnalyzer;
use npc_util::Handler;

use crate::IrBuilder;

fn build_ir(source: &str) -> String {
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

    let mut sem_handler = Handler::new();
    SemanticAnalyzer::analyze(&program, &mut sem_handler);
    assert!(!sem_handler.has_errors(), "source failed to typecheck: {:?}", sem_handler.diagnostics());

    let context = Context::create();
    let module = IrBuilder::new(&context, "test").build(&program);
    module.print_to_string().to_string()
}

#[test]
fn function_with_return_lowers_to_a_single_ret() {
    let ir = build_ir("fn add(a: i32, b: i32) -> i32 { return a + b }");
    assert!(ir.contains("define i32 @add(i32"), "{ir}");
    assert!(ir.contains("ret i32"), "{ir}");
}

#[test]
fn missing_trailing_return_gets_an_implicit_zero() {
    let ir = build_ir("fn f() -> i32 { let x: i32 = 1 }");
    assert!(ir.contains("ret i32 0"), "{ir}");
}

#[test]
fn void_function_gets_an_implicit_ret_void() {
    let ir = build_ir("fn f() { let x: i32 = 1 }");
    assert!(ir.contains("ret void"), "{ir}");
}

#[test]
fn legacy_print_statement_interns_its_text_and_calls_printf() {
    let ir = build_ir("fn main() { print [ \"hello\" ] }");
    assert!(ir.contains("declare i32 @printf"), "{ir}");
    assert!(ir.contains("hello"), "{ir}");
    assert!(ir.contains("call i32 (i8*, ...) @printf") || ir.contains("call i32 (ptr, ...) @printf"), "{ir}");
}

#[test]
fn two_identical_string_literals_share_one_global() {
    let ir = build_ir(
        "fn main() { print [ \"same\" ] if (true) { print [ \"same\" ] } }",
    );
    assert_eq!(ir.matches("c\"same\\00\"").count(), 1, "{ir}");
}

#[test]
fn struct_member_access_emits_a_gep() {
    let ir = build_ir(
        "struct Point { x: i32, y: i32 } fn getx(p: Point) -> i32 { return p.x }",
    );
    assert!(ir.contains("%Point = type"), "{ir}");
    assert!(ir.to_lowercase().contains("getelementptr"), "{ir}");
}

#[test]
fn if_else_produces_then_else_and_merge_blocks() {
    let ir = build_ir(
        "fn pick(a: bool) -> i32 { if (a) { return 1 } else { return 0 } }",
    );
    assert!(ir.contains("if.then"), "{ir}");
    assert!(ir.contains("if.else"), "{ir}");
    assert!(ir.contains("if.merge"), "{ir}");
}

#[test]
fn while_loop_produces_header_body_and_exit_blocks() {
    let ir = build_ir("fn f() { while (true) { print [ \"x\" ] } }");
    assert!(ir.contains("while.header"), "{ir}");
    assert!(ir.contains("while.body"), "{ir}");
    assert!(ir.contains("while.exit"), "{ir}");
}

#[test]
fn legacy_assign_literal_is_parsed_as_base_twelve() {
    // "10" in base 12 is 12 in base 10.
    let ir = build_ir("fn f() -> i32 { let x: i32 = 0 x = 10 return x }");
    assert!(ir.contains("store i32 12"), "{ir}");
}

#[test]
fn mutual_function_recursion_resolves_forward_references() {
    let ir = build_ir("fn a() -> i32 { return b() } fn b() -> i32 { return 0 }");
    assert!(ir.contains("call i32 @b"), "{ir}");
}
