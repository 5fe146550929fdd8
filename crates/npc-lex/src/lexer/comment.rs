use super::core::Lexer;

impl Lexer<'_> {
    /// Skips ASCII horizontal whitespace only. `\n` is left in place — it
    /// is emitted as its own `Newline` token by `next_token` — and
    /// comments are left in place too, since they are retained as
    /// `Comment` tokens rather than silently dropped; `next_token`
    /// dispatches to [`Lexer::lex_comment`] for those.
    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r') {
            self.cursor.advance();
        }
    }

    /// True if the cursor sits on the start of a `//` or `--` end-of-line
    /// comment, or a legacy `; … ;` block comment. `;` doubles as the
    /// modern dialect's statement terminator, so a bare `;` only starts a
    /// comment when its matching close is found before end-of-line; a
    /// `;` with no closer on the same line is left for `next_token` to
    /// emit as `Semicolon`.
    pub(crate) fn at_comment_start(&self) -> bool {
        let c = self.cursor.current_char();
        let n = self.cursor.peek_char(1);
        (c == '/' && n == '/') || (c == '-' && n == '-') || (c == ';' && self.semicolon_comment_closes_on_line())
    }

    fn semicolon_comment_closes_on_line(&self) -> bool {
        let mut n = 1;
        loop {
            match self.cursor.peek_char(n) {
                ';' => return true,
                '\n' | '\0' => return false,
                _ => n += 1,
            }
        }
    }

    /// Consumes a comment and returns it as a `Comment` token (never
    /// skipped by the lexer itself: the parser's caller filters
    /// `Newline`/`Comment` tokens out of the stream before parsing). A
    /// `//`/`--` comment runs to end-of-line; a `; … ;` comment runs to
    /// its closing `;`, which [`Lexer::at_comment_start`] has already
    /// confirmed is present on the same line.
    pub(crate) fn lex_comment(&mut self) -> super::super::TokenKind {
        if self.cursor.current_char() == ';' {
            self.cursor.advance();
            while !self.cursor.is_at_end() && self.cursor.current_char() != ';' {
                self.cursor.advance();
            }
            if !self.cursor.is_at_end() {
                self.cursor.advance();
            }
            return super::super::TokenKind::Comment;
        }

        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        super::super::TokenKind::Comment
    }
}
