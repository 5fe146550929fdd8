use npc_util::Symbol;

use super::core::{is_ident_continue, Lexer};
use crate::{Keyword, TokenKind};

impl Lexer<'_> {
    /// Lexes an identifier, keyword, or the legacy `@func` keyword (spec
    /// §4.2 step 5). `@` only ever starts the fixed spelling `@func`; any
    /// other identifier-continue run after `@` is still classified through
    /// the same keyword table, so `@func2` lexes as the identifier
    /// `@func2` (not found in the table) rather than an error.
    pub(crate) fn lex_identifier(&mut self) -> TokenKind {
        let start = self.cursor.position();
        self.cursor.advance(); // first char: alphabetic, '_', or '@'
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice(start, self.cursor.position());

        match Keyword::from_str(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => match text {
                "true" => TokenKind::Boolean(true),
                "false" => TokenKind::Boolean(false),
                _ => TokenKind::Identifier(Symbol::intern(text)),
            },
        }
    }
}
