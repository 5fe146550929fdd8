use super::core::Lexer;
use crate::TokenKind;

impl Lexer<'_> {
    /// Lexes an operator or single-character punctuation starting with
    /// `c`. Two-character operators (`== != <= >= -> && ||`) are tried
    /// first, so they always win over their one-character prefix (spec
    /// §4.2 steps 6-7, tie-break rule).
    pub(crate) fn lex_operator(&mut self, c: char) -> TokenKind {
        let next = self.cursor.peek_char(1);
        let two_char = match (c, next) {
            ('=', '=') => Some(TokenKind::EqEq),
            ('!', '=') => Some(TokenKind::NotEq),
            ('<', '=') => Some(TokenKind::LtEq),
            ('>', '=') => Some(TokenKind::GtEq),
            ('-', '>') => Some(TokenKind::Arrow),
            ('&', '&') => Some(TokenKind::AndAnd),
            ('|', '|') => Some(TokenKind::OrOr),
            _ => None,
        };

        if let Some(kind) = two_char {
            self.cursor.advance();
            self.cursor.advance();
            return kind;
        }

        let one_char = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            '!' => TokenKind::Not,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '|' => TokenKind::Pipe,
            ':' => TokenKind::Colon,
            other => {
                self.report_error(format!("unexpected character '{other}'"));
                self.cursor.advance();
                return TokenKind::Invalid;
            }
        };
        self.cursor.advance();
        one_char
    }
}
