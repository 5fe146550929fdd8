use npc_lex::TokenKind;
use npc_util::Span;

use crate::ast::*;
use crate::Parser;

/// Precedence-climbing expression parser, low to high: `||` < `&&` <
/// `==,!=` < `<,<=,>,>=` < `+,-` < `*,/,%` < unary `!,-` < postfix
/// call/member < primary. All binary levels are left-associative; unary
/// is right-associative.
impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_and()?;
        while self.match_token(&TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right);
        }
        Some(left)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_equality()?;
        while self.match_token(&TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = binary(BinOp::And, left, right);
        }
        Some(left)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = if self.match_token(&TokenKind::EqEq) {
                BinOp::Eq
            } else if self.match_token(&TokenKind::NotEq) {
                BinOp::Ne
            } else {
                break;
            };
            let right = self.parse_comparison()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = if self.match_token(&TokenKind::Lt) {
                BinOp::Lt
            } else if self.match_token(&TokenKind::LtEq) {
                BinOp::Le
            } else if self.match_token(&TokenKind::Gt) {
                BinOp::Gt
            } else if self.match_token(&TokenKind::GtEq) {
                BinOp::Ge
            } else {
                break;
            };
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = if self.match_token(&TokenKind::Plus) {
                BinOp::Add
            } else if self.match_token(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };
            let right = self.parse_factor()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_factor(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.match_token(&TokenKind::Star) {
                BinOp::Mul
            } else if self.match_token(&TokenKind::Slash) {
                BinOp::Div
            } else if self.match_token(&TokenKind::Percent) {
                BinOp::Rem
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.span_here();
        if self.match_token(&TokenKind::Not) {
            let operand = self.parse_unary()?;
            return Some(Expr {
                kind: ExprKind::Unary {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                },
                span: start,
            });
        }
        if self.match_token(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            return Some(Expr {
                kind: ExprKind::Unary {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                },
                span: start,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.match_token(&TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if !self.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RParen, "')'")?;
                let span = expr.span;
                expr = Expr {
                    kind: ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                };
            } else if self.match_token(&TokenKind::Dot) {
                let field = self.parse_ident()?;
                let span = expr.span;
                expr = Expr {
                    kind: ExprKind::Member {
                        object: Box::new(expr),
                        field,
                    },
                    span,
                };
            } else {
                break;
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let token = self.peek().clone();
        let span = Span::new(0, 0, token.line, token.column);

        match token.kind {
            TokenKind::Integer => {
                self.advance();
                Some(Expr {
                    kind: ExprKind::Literal(Literal::Int(token.lexeme)),
                    span,
                })
            }
            TokenKind::Float => {
                self.advance();
                let value: f64 = token.lexeme.parse().unwrap_or(0.0);
                Some(Expr {
                    kind: ExprKind::Literal(Literal::Float(value)),
                    span,
                })
            }
            TokenKind::String(s) => {
                self.advance();
                Some(Expr {
                    kind: ExprKind::Literal(Literal::Str(s)),
                    span,
                })
            }
            TokenKind::Boolean(b) => {
                self.advance();
                Some(Expr {
                    kind: ExprKind::Literal(Literal::Bool(b)),
                    span,
                })
            }
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(Expr {
                    kind: ExprKind::Ident(sym),
                    span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Some(inner)
            }
            _ => {
                self.error_here("an expression");
                None
            }
        }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span;
    Expr {
        kind: ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    }
}
