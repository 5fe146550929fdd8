use npc_util::Handler;
use proptest::prelude::*;

use crate::{Keyword, Lexer, TokenKind};

fn lex_all(source: &str) -> (Vec<crate::Token>, Handler) {
    let mut handler = Handler::new();
    let tokens = {
        let mut lexer = Lexer::new(source, &mut handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    };
    (tokens, handler)
}

#[test]
fn ends_in_exactly_one_eof() {
    let (tokens, _) = lex_all("let x = 1;");
    let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn keywords_and_identifiers() {
    let (tokens, _) = lex_all("let fn_name");
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Let));
    assert!(matches!(tokens[1].kind, TokenKind::Identifier(_)));
}

#[test]
fn legacy_atfunc_keyword() {
    let (tokens, _) = lex_all("@func (\"id\") [x] go { print [\"ok\"] }");
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::AtFunc));
}

#[test]
fn two_char_operators_win_over_prefix() {
    let (tokens, _) = lex_all("a <= b -> c && d");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert!(kinds.contains(&TokenKind::LtEq));
    assert!(kinds.contains(&TokenKind::Arrow));
    assert!(kinds.contains(&TokenKind::AndAnd));
}

#[test]
fn string_escapes_resolved() {
    let (tokens, _) = lex_all(r#""a\nb""#);
    assert_eq!(tokens[0].kind, TokenKind::String("a\nb".to_string()));
}

#[test]
fn line_comments_are_kept_as_tokens() {
    let (tokens, _) = lex_all("let x = 1; // trailing\nlet y = 2; -- also trailing");
    let comments: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Comment).collect();
    assert_eq!(comments.len(), 2);
}

#[test]
fn legacy_semicolon_block_comment_is_one_token() {
    let (tokens, _) = lex_all("let x = 1; ; this is a note ; let y = 2;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Comment).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Semicolon).count(), 2);
}

#[test]
fn lone_semicolon_with_no_closer_on_line_is_a_terminator() {
    let (tokens, _) = lex_all("let x = 1;\nlet y = 2;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert!(!kinds.contains(&TokenKind::Comment));
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Semicolon).count(), 2);
}

#[test]
fn unterminated_string_reports_lex_error() {
    let (_, handler) = lex_all("\"unterminated");
    assert!(handler.has_errors());
}

#[test]
fn unknown_byte_reports_lex_error() {
    let (_, handler) = lex_all("let x = `");
    assert!(handler.has_errors());
}

proptest! {
    /// As long as the input is built from bytes the lexer recognizes,
    /// lexing terminates and ends in one `Eof`.
    #[test]
    fn lexing_is_total_and_monotonic(src in "[a-zA-Z0-9_ \t\n+\\-*/=(){};,:.]{0,200}") {
        let (tokens, _) = lex_all(&src);
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);

        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!((a.line, a.column) <= (b.line, b.column));
        }
    }
}
