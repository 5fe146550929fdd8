use npc_util::{DiagnosticBuilder, DiagnosticKind, Handler};

use crate::cursor::Cursor;
use crate::{Token, TokenKind};

/// Lexer for the unified grammar.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a mut Handler,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token, always ending the stream in exactly one
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        let c = self.cursor.current_char();
        let kind = match c {
            '\n' => {
                self.cursor.advance();
                TokenKind::Newline
            }
            _ if self.at_comment_start() => self.lex_comment(),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '.' => self.single(TokenKind::Dot),
            '+' | '-' | '*' | '/' | '%' | '=' | '!' | '<' | '>' | '&' | '|' | ':' => {
                self.lex_operator(c)
            }
            '"' | '\'' => self.lex_string(c),
            '@' => self.lex_identifier(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("unexpected character '{c}'"));
                self.cursor.advance();
                TokenKind::Invalid
            }
        };

        self.make(kind)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token {
            lexeme: self
                .cursor
                .slice(self.token_start, self.cursor.position())
                .to_string(),
            kind,
            line: self.token_start_line,
            column: self.token_start_column,
        }
    }

    pub(crate) fn report_error(&mut self, message: String) {
        let span = npc_util::Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::new(DiagnosticKind::LexError, message)
            .span(span)
            .emit(self.handler);
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '-' || c.is_ascii_alphanumeric()
}
