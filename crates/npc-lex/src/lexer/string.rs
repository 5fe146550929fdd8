use super::core::Lexer;
use crate::TokenKind;

impl Lexer<'_> {
    /// Lexes a string literal delimited by `"` or `'`, resolving
    /// `\n \t \r \\ \"` escapes as it goes. An unterminated
    /// string (end-of-file before the closing quote) reports one
    /// `LexError` and returns the text accumulated so far.
    pub(crate) fn lex_string(&mut self, quote: char) -> TokenKind {
        self.cursor.advance(); // opening quote
        let mut value = String::new();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                break;
            }

            let c = self.cursor.current_char();
            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                let escaped = self.cursor.current_char();
                let resolved = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    '\'' => '\'',
                    other => other,
                };
                value.push(resolved);
                self.cursor.advance();
            } else {
                value.push(c);
                self.cursor.advance();
            }
        }

        TokenKind::String(value)
    }
}
