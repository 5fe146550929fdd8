use crate::{ExprKind, Literal, Parser, Program, StmtKind};
use npc_lex::{Lexer, Token, TokenKind};
use npc_util::Handler;

fn parse_source(source: &str) -> (Program, Handler) {
    let mut handler = Handler::new();
    let mut lexer = Lexer::new(source, &mut handler);
    let tokens: Vec<Token> = std::iter::from_fn(|| Some(lexer.next_token()))
        .take_while(|t| !matches!(t.kind, TokenKind::Eof))
        .chain(std::iter::once(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: 0,
            column: 0,
        }))
        .collect();
    let mut parser = Parser::new(tokens, &mut handler);
    let program = parser.parse();
    (program, handler)
}

#[test]
fn empty_source_parses_to_empty_program() {
    let (program, handler) = parse_source("");
    assert!(program.is_empty());
    assert!(!handler.has_errors());
}

#[test]
fn modern_let_statement() {
    let (program, handler) = parse_source("let x: i32 = 1");
    assert!(!handler.has_errors());
    assert_eq!(program.len(), 1);
    match &program[0].kind {
        StmtKind::Let { ty, value, .. } => {
            assert!(ty.is_some());
            assert!(matches!(
                value.as_ref().map(|v| &v.kind),
                Some(ExprKind::Literal(Literal::Int(s))) if s == "1"
            ));
        }
        other => panic!("expected Let, got {other:?}"),
    }
}

#[test]
fn modern_fn_def_with_params_and_return_type() {
    let source = "fn add(a: i32, b: i32) -> i32 { return a + b }";
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    assert_eq!(program.len(), 1);
    match &program[0].kind {
        StmtKind::FnDef { params, return_type, body, .. } => {
            assert_eq!(params.len(), 2);
            assert!(return_type.is_some());
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("expected FnDef, got {other:?}"),
    }
}

#[test]
fn expression_precedence_is_left_associative_and_respects_ladder() {
    // `1 + 2 * 3` must parse as `1 + (2 * 3)`, not `(1 + 2) * 3`.
    let (program, handler) = parse_source("let x = 1 + 2 * 3");
    assert!(!handler.has_errors());
    let StmtKind::Let { value: Some(expr), .. } = &program[0].kind else {
        panic!("expected Let with value");
    };
    match &expr.kind {
        ExprKind::Binary { op, left, right } => {
            assert_eq!(*op, crate::BinOp::Add);
            assert!(matches!(left.kind, ExprKind::Literal(Literal::Int(_))));
            assert!(matches!(right.kind, ExprKind::Binary { op: crate::BinOp::Mul, .. }));
        }
        other => panic!("expected top-level Binary(Add), got {other:?}"),
    }
}

#[test]
fn call_and_member_chain_left_to_right() {
    let (program, handler) = parse_source("let x = a.b.c(1, 2)");
    assert!(!handler.has_errors());
    let StmtKind::Let { value: Some(expr), .. } = &program[0].kind else {
        panic!("expected Let with value");
    };
    match &expr.kind {
        ExprKind::Call { callee, args } => {
            assert_eq!(args.len(), 2);
            assert!(matches!(callee.kind, ExprKind::Member { .. }));
        }
        other => panic!("expected Call, got {other:?}"),
    }
}

#[test]
fn if_else_and_while_parse() {
    let (program, handler) = parse_source("if x { let y = 1 } else { let y = 2 } while x { let z = 1 }");
    assert!(!handler.has_errors());
    assert_eq!(program.len(), 2);
    assert!(matches!(program[0].kind, StmtKind::If { else_branch: Some(_), .. }));
    assert!(matches!(program[1].kind, StmtKind::While { .. }));
}

#[test]
fn struct_def_with_fields() {
    let (program, handler) = parse_source("struct Point { x: i32, y: i32 }");
    assert!(!handler.has_errors());
    match &program[0].kind {
        StmtKind::StructDef { fields, .. } => assert_eq!(fields.len(), 2),
        other => panic!("expected StructDef, got {other:?}"),
    }
}

#[test]
fn legacy_src_run_desugars_to_main_fn() {
    let source = r#"src () "stdout" { print ["Hello NeoPaquet"] } run"#;
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    assert_eq!(program.len(), 1);
    match &program[0].kind {
        StmtKind::FnDef { name, params, body, .. } => {
            assert_eq!(name.as_str(), "main");
            assert!(params.is_empty());
            assert_eq!(body.statements.len(), 1);
            assert!(matches!(body.statements[0].kind, StmtKind::Print(_)));
        }
        other => panic!("expected implicit main FnDef, got {other:?}"),
    }
}

#[test]
fn legacy_func_desugars_to_fn_with_i32_param() {
    let source = r#"@func ("id") [x] go { print ["ok"] }"#;
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    match &program[0].kind {
        StmtKind::FnDef { name, params, return_type, .. } => {
            assert_eq!(name.as_str(), "id");
            assert_eq!(params.len(), 1);
            assert_eq!(params[0].ty.as_str(), "i32");
            assert_eq!(return_type.map(|t| t.as_str().to_string()), Some("i32".to_string()));
        }
        other => panic!("expected FnDef, got {other:?}"),
    }
}

#[test]
fn legacy_loop_desugars_to_unconditional_while() {
    let source = r#"loop "forever" { print ["spin"] }"#;
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    match &program[0].kind {
        StmtKind::While { cond, body } => {
            assert!(matches!(cond.kind, ExprKind::Literal(Literal::Bool(true))));
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("expected While, got {other:?}"),
    }
}

#[test]
fn legacy_try_catch_desugars_to_sentinel_guarded_blocks() {
    let source = "try { let x = 1 } catch { let y = 2 }";
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    match &program[0].kind {
        StmtKind::Block(block) => {
            assert_eq!(block.statements.len(), 3);
            assert!(matches!(block.statements[0].kind, StmtKind::Let { .. }));
            assert!(matches!(block.statements[1].kind, StmtKind::Block(_)));
            assert!(matches!(block.statements[2].kind, StmtKind::If { else_branch: None, .. }));
        }
        other => panic!("expected desugared Block, got {other:?}"),
    }
}

#[test]
fn unexpected_token_aborts_after_exactly_one_error() {
    let (program, handler) = parse_source("let = 1");
    assert!(handler.has_errors());
    assert_eq!(handler.diagnostics().len(), 1);
    assert!(program.is_empty());
}

#[test]
fn parser_never_recovers_past_first_error() {
    // Two independent malformed statements; only the first is ever seen.
    let (_program, handler) = parse_source("let = 1\nlet = 2");
    assert_eq!(handler.diagnostics().len(), 1);
}

#[test]
fn package_decl_with_dependencies_and_exports() {
    let source = r#"package demo version "1.0.0" {
        dependencies { http: "^2.0" }
        exports { start }
    }"#;
    let (program, handler) = parse_source(source);
    assert!(!handler.has_errors());
    match &program[0].kind {
        StmtKind::PackageDecl { deps, exports, .. } => {
            assert_eq!(deps.len(), 1);
            assert_eq!(exports.len(), 1);
        }
        other => panic!("expected PackageDecl, got {other:?}"),
    }
}
