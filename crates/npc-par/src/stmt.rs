use npc_lex::{Keyword, TokenKind};
use npc_util::{Span, Symbol};

use crate::ast::*;
use crate::Parser;

impl Parser<'_> {
    /// Dispatches on the first token to disambiguate declaration vs.
    /// statement.
    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        let stmt = match self.peek_kind().clone() {
            TokenKind::Keyword(Keyword::Let) => self.parse_let(),
            TokenKind::Keyword(Keyword::Fn) => self.parse_fn_def(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Struct) => self.parse_struct_def(),
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            TokenKind::Keyword(Keyword::Package) => self.parse_package(),
            TokenKind::Keyword(Keyword::Print) => self.parse_legacy_print(),
            TokenKind::Keyword(Keyword::Src) => self.parse_legacy_src_run(),
            TokenKind::Keyword(Keyword::AtFunc) => self.parse_legacy_func(),
            TokenKind::Keyword(Keyword::Loop) => self.parse_legacy_loop(),
            TokenKind::Keyword(Keyword::Try) => self.parse_legacy_try_catch(),
            TokenKind::LBrace => self.parse_block_stmt(),
            _ => self.parse_expr_or_assign_stmt(),
        }?;

        self.match_token(&TokenKind::Semicolon);
        Some(stmt)
    }

    fn parse_let(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `let`
        let name = self.parse_ident()?;

        let ty = if self.match_token(&TokenKind::Colon) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };

        let value = if self.match_token(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Some(Stmt {
            kind: StmtKind::Let { name, ty, value },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    pub(crate) fn parse_fn_def(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `fn`
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LParen, "'('")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let pname = self.parse_ident()?;
                self.expect(&TokenKind::Colon, "':'")?;
                let pty = self.parse_type_ref()?;
                params.push(Param { name: pname, ty: pty });
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        let return_type = if self.match_token(&TokenKind::Arrow) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Some(Stmt {
            kind: StmtKind::FnDef {
                name,
                params,
                return_type,
                body,
            },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `return`
        let value = if self.at_stmt_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Some(Stmt {
            kind: StmtKind::Return(value),
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `if`
        let cond = self.parse_expr()?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.match_keyword(Keyword::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Some(Stmt {
            kind: StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `while`
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Some(Stmt {
            kind: StmtKind::While { cond, body },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_for(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `for`
        let var = self.parse_ident()?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Some(Stmt {
            kind: StmtKind::For { var, iterable, body },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_struct_def(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `struct`
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let fname = self.parse_ident()?;
            self.expect(&TokenKind::Colon, "':'")?;
            let fty = self.parse_type_ref()?;
            fields.push(StructField { name: fname, ty: fty });
            if !self.match_token(&TokenKind::Comma) {
                continue;
            }
        }
        self.expect(&TokenKind::RBrace, "'}'")?;

        Some(Stmt {
            kind: StmtKind::StructDef { name, fields },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_import(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `import`
        let module = self.parse_ident()?;

        let from = if self.match_keyword(Keyword::From) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        let version = if self.match_keyword(Keyword::Version) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };

        Some(Stmt {
            kind: StmtKind::Import {
                module,
                from,
                version,
                alias: None,
            },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_package(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();
        self.advance(); // `package`
        let name = self.parse_ident()?;
        self.expect_keyword(Keyword::Version, "'version'")?;
        let version = self.parse_string_literal()?;
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut deps = Vec::new();
        let mut exports = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            if self.match_keyword(Keyword::Dependencies) {
                self.expect(&TokenKind::LBrace, "'{'")?;
                while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                    let package = self.parse_ident()?;
                    self.expect(&TokenKind::Colon, "':'")?;
                    let version_constraint = self.parse_string_literal()?;
                    deps.push(Dependency {
                        package,
                        version_constraint,
                    });
                    if !self.match_token(&TokenKind::Comma) {
                        continue;
                    }
                }
                self.expect(&TokenKind::RBrace, "'}'")?;
            } else if self.match_keyword(Keyword::Exports) {
                self.expect(&TokenKind::LBrace, "'{'")?;
                while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                    exports.push(self.parse_ident()?);
                    if !self.match_token(&TokenKind::Comma) {
                        continue;
                    }
                }
                self.expect(&TokenKind::RBrace, "'}'")?;
            } else {
                self.error_here("'dependencies' or 'exports'");
                return None;
            }
        }
        self.expect(&TokenKind::RBrace, "'}'")?;

        Some(Stmt {
            kind: StmtKind::PackageDecl {
                name,
                version,
                deps,
                exports,
            },
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    fn parse_block_stmt(&mut self) -> Option<Stmt> {
        let block = self.parse_block()?;
        let span = block.span;
        Some(Stmt {
            kind: StmtKind::Block(block),
            span,
        })
    }

    fn parse_expr_or_assign_stmt(&mut self) -> Option<Stmt> {
        let start = self.peek().clone();

        // `ident = expr` is an assignment; anything else is an expression
        // statement. Disambiguate by a one-token lookahead.
        if let TokenKind::Identifier(name) = self.peek_kind().clone() {
            if matches!(self.tokens.get(self.position + 1).map(|t| &t.kind), Some(TokenKind::Eq)) {
                self.advance(); // ident
                self.advance(); // '='
                let value = self.parse_expr()?;
                return Some(Stmt {
                    kind: StmtKind::Assign { name, value },
                    span: Span::new(0, 0, start.line, start.column),
                });
            }
        }

        let expr = self.parse_expr()?;
        Some(Stmt {
            kind: StmtKind::ExprStmt(expr),
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    /// A statement block: `'{' statement* '}'`. Every `Block` introduces
    /// a new lexical scope.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.expect(&TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() && !self.aborted {
            statements.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        Some(Block {
            statements,
            span: Span::new(0, 0, start.line, start.column),
        })
    }

    pub(crate) fn parse_ident(&mut self) -> Option<Symbol> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(sym)
            }
            _ => {
                self.error_here("an identifier");
                None
            }
        }
    }

    pub(crate) fn parse_type_ref(&mut self) -> Option<Symbol> {
        self.parse_ident()
    }

    pub(crate) fn parse_string_literal(&mut self) -> Option<String> {
        match self.peek_kind().clone() {
            TokenKind::String(s) => {
                self.advance();
                Some(s)
            }
            _ => {
                self.error_here("a string literal");
                None
            }
        }
    }

    /// True if the current token cannot start an expression, used to
    /// detect a bare `return` with no value.
    fn at_stmt_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof
        )
    }
}
