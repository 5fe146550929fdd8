//! Legacy-dialect desugaring.
//!
//! The legacy "expression" dialect has no direct AST representation of its
//! own; each construct is parsed and immediately rewritten into the same
//! `StmtKind` variants the modern dialect produces, so every downstream
//! phase (semantic analysis, IR building) sees one unified tree.

use npc_lex::{Keyword, TokenKind};
use npc_util::Symbol;

use crate::ast::*;
use crate::Parser;

impl Parser<'_> {
    /// `print '[' string ']'` sugar, found inside legacy function bodies.
    pub(crate) fn parse_legacy_print(&mut self) -> Option<Stmt> {
        let start = self.span_here();
        self.advance(); // `print`
        self.expect(&TokenKind::LBracket, "'['")?;
        let text = self.parse_string_literal()?;
        self.expect(&TokenKind::RBracket, "']'")?;
        Some(Stmt {
            kind: StmtKind::Print(text),
            span: start,
        })
    }

    /// `src '(' ')' string '{' block '}' 'run'` becomes an implicit
    /// `FnDef("main", [], i32, body)`.
    pub(crate) fn parse_legacy_src_run(&mut self) -> Option<Stmt> {
        let start = self.span_here();
        self.advance(); // `src`
        self.expect(&TokenKind::LParen, "'('")?;
        self.expect(&TokenKind::RParen, "')'")?;
        // The destination string (historically "stdout") carries no
        // semantic weight in this implementation; it is parsed and
        // discarded.
        let _destination = self.parse_string_literal()?;
        let body = self.parse_block()?;
        self.expect_keyword(Keyword::Run, "'run'")?;

        Some(Stmt {
            kind: StmtKind::FnDef {
                name: Symbol::intern("main"),
                params: Vec::new(),
                return_type: Some(Symbol::intern("i32")),
                body,
            },
            span: start,
        })
    }

    /// `@func '(' string ')' '[' ident ']' 'go' block` becomes
    /// `FnDef(name, [ident: i32], i32, body)`.
    pub(crate) fn parse_legacy_func(&mut self) -> Option<Stmt> {
        let start = self.span_here();
        self.advance(); // `@func`
        self.expect(&TokenKind::LParen, "'('")?;
        let name_text = self.parse_string_literal()?;
        self.expect(&TokenKind::RParen, "')'")?;
        self.expect(&TokenKind::LBracket, "'['")?;
        let param_name = self.parse_ident()?;
        self.expect(&TokenKind::RBracket, "']'")?;
        self.expect_keyword(Keyword::Go, "'go'")?;
        let body = self.parse_block()?;

        Some(Stmt {
            kind: StmtKind::FnDef {
                name: Symbol::intern(&name_text),
                params: vec![Param {
                    name: param_name,
                    ty: Symbol::intern("i32"),
                }],
                return_type: Some(Symbol::intern("i32")),
                body,
            },
            span: start,
        })
    }

    /// `loop string block` maps to `While(true, body)`; the label
    /// string is parsed and discarded, matching the original
    /// implementation's unconditional loop body.
    pub(crate) fn parse_legacy_loop(&mut self) -> Option<Stmt> {
        let start = self.span_here();
        self.advance(); // `loop`
        let _label = self.parse_string_literal()?;
        let body = self.parse_block()?;

        Some(Stmt {
            kind: StmtKind::While {
                cond: Expr {
                    kind: ExprKind::Literal(Literal::Bool(true)),
                    span: start,
                },
                body,
            },
            span: start,
        })
    }

    /// `try block catch block` maps to a pair of `Block`s threaded through
    /// an `errored` sentinel variable. The language has no instruction
    /// that ever sets `errored` true, so the catch branch is unreachable
    /// at run time; this is the most literal reading of the mapping,
    /// not a reintroduction of exceptions.
    pub(crate) fn parse_legacy_try_catch(&mut self) -> Option<Stmt> {
        let start = self.span_here();
        self.advance(); // `try`
        let try_block = self.parse_block()?;
        self.expect_keyword(Keyword::Catch, "'catch'")?;
        let catch_block = self.parse_block()?;

        let errored = Symbol::intern("errored");
        let sentinel = Stmt {
            kind: StmtKind::Let {
                name: errored,
                ty: Some(Symbol::intern("bool")),
                value: Some(Expr {
                    kind: ExprKind::Literal(Literal::Bool(false)),
                    span: start,
                }),
            },
            span: start,
        };
        let guarded_try = Stmt {
            kind: StmtKind::Block(try_block),
            span: start,
        };
        let guarded_catch = Stmt {
            kind: StmtKind::If {
                cond: Expr {
                    kind: ExprKind::Ident(errored),
                    span: start,
                },
                then_branch: catch_block,
                else_branch: None,
            },
            span: start,
        };

        Some(Stmt {
            kind: StmtKind::Block(Block {
                statements: vec![sentinel, guarded_try, guarded_catch],
                span: start,
            }),
            span: start,
        })
    }
}
