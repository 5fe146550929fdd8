//! npc-par - recursive-descent parser with precedence climbing.
//!
//! Takes a trivia-filtered token sequence and produces a [`Program`] AST,
//! or emits exactly one `ParseError` at the first unrecoverable token and
//! stops — the parser performs no error recovery.

pub mod ast;
mod expr;
mod items;
mod stmt;
#[cfg(test)]
mod tests;

pub use ast::*;

use npc_lex::{Keyword, Token, TokenKind};
use npc_util::{DiagnosticBuilder, DiagnosticKind, Handler, Span};

/// Filters `Newline`/`Comment` trivia out of a raw token stream, as spec
/// §4.3 requires of the parser's input.
pub fn filter_trivia(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Comment))
        .collect()
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a mut Handler,
    /// Set once an unrecoverable parse error has been reported; `parse()`
    /// stops adding further top-level statements once this is true.
    aborted: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a mut Handler) -> Self {
        Self {
            tokens: filter_trivia(tokens),
            position: 0,
            handler,
            aborted: false,
        }
    }

    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.is_at_end() && !self.aborted {
            match self.parse_stmt() {
                Some(stmt) => statements.push(stmt),
                None => break,
            }
        }
        statements
    }

    // -- token stream helpers -------------------------------------------------

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek_kind(), TokenKind::Keyword(k) if *k == kw)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_here(expected);
            None
        }
    }

    pub(crate) fn expect_keyword(&mut self, kw: Keyword, expected: &str) -> Option<Token> {
        if self.check_keyword(kw) {
            Some(self.advance())
        } else {
            self.error_here(expected);
            None
        }
    }

    pub(crate) fn span_here(&self) -> Span {
        Span::new(0, 0, self.peek().line, self.peek().column)
    }

    /// Reports one `ParseError` citing what was expected vs. the actual
    /// token, then marks the parser aborted. The parser never attempts
    /// error recovery.
    pub(crate) fn error_here(&mut self, expected: &str) {
        if self.aborted {
            return;
        }
        let found = self.peek().clone();
        let message = format!("expected {expected}, found {:?} ('{}')", found.kind, found.lexeme);
        DiagnosticBuilder::new(DiagnosticKind::ParseError, message)
            .span(Span::new(0, 0, found.line, found.column))
            .emit(self.handler);
        self.aborted = true;
    }
}
