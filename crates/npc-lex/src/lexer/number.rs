use super::core::Lexer;
use crate::TokenKind;

impl Lexer<'_> {
    /// Lexes an integer or float literal. Consumes digits and at most one
    /// `.`; the legacy dialect's base-12 "dodecagram" literals use `a`/`b`
    /// as extra digits, so both dialects accept `[0-9a-b]` here — the
    /// actual base (10 vs. 12) is resolved later, during IR construction,
    /// not during lexing.
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        let mut saw_dot = false;

        while is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            saw_dot = true;
            self.cursor.advance();
            while is_digit(self.cursor.current_char()) {
                self.cursor.advance();
            }
        }

        if saw_dot {
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c == 'a' || c == 'b'
}
