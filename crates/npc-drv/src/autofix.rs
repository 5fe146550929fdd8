//! `npc auto-fix`: a strict, no-op-by-default trailing-semicolon inserter.
//! The grammar never requires a `;` — `parse_stmt` only `match_token`s one
//! optionally — so this never changes parse results; it exists purely to
//! normalize source that crams two statements onto one line. It never runs
//! implicitly, only via this explicit subcommand, and it never invents
//! type annotations.

use std::collections::BTreeMap;

use npc_lex::{Keyword, Lexer, Token, TokenKind};
use npc_util::Handler;

/// Returns the fixed source, and whether anything was changed.
pub fn auto_fix(source: &str) -> (String, bool) {
    let mut handler = Handler::new();
    let mut lexer = Lexer::new(source, &mut handler);
    let mut tokens: Vec<Token> = Vec::new();
    loop {
        let token = lexer.next_token();
        let is_eof = matches!(token.kind, TokenKind::Eof);
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    let mut insertions_by_line: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for pair in tokens.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.line != next.line {
            continue;
        }
        if matches!(prev.kind, TokenKind::Semicolon | TokenKind::LBrace) {
            continue;
        }
        if starts_statement_unambiguously(&next.kind) {
            insertions_by_line.entry(next.line).or_default().push(next.column);
        }
    }

    if insertions_by_line.is_empty() {
        return (source.to_string(), false);
    }

    let mut lines: Vec<String> = source.lines().map(str::to_string).collect();
    for (line, mut columns) in insertions_by_line {
        columns.sort_unstable();
        columns.reverse(); // insert back-to-front so earlier columns stay valid
        let Some(text) = lines.get_mut(line.saturating_sub(1) as usize) else {
            continue;
        };
        for column in columns {
            let byte_index = column_to_byte_index(text, column);
            text.insert_str(byte_index, "; ");
        }
    }

    (lines.join("\n"), true)
}

/// A statement-starting keyword can never appear mid-expression in this
/// grammar, so seeing one immediately after another statement's last token
/// (same line, no `;`) unambiguously marks a missing separator.
fn starts_statement_unambiguously(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(
            Keyword::Let
                | Keyword::Fn
                | Keyword::Return
                | Keyword::If
                | Keyword::While
                | Keyword::For
                | Keyword::Struct
                | Keyword::Import
                | Keyword::Package
                | Keyword::Print
                | Keyword::Src
                | Keyword::AtFunc
                | Keyword::Loop
                | Keyword::Try
        )
    )
}

fn column_to_byte_index(line: &str, column: u32) -> usize {
    line.char_indices()
        .nth(column.saturating_sub(1) as usize)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_semicolon_between_two_statements_on_one_line() {
        let (fixed, changed) = auto_fix("let x: i32 = 1 let y: i32 = 2");
        assert!(changed);
        assert!(fixed.contains("1 ; let y"), "{fixed}");
    }

    #[test]
    fn leaves_already_separated_statements_untouched() {
        let source = "let x: i32 = 1\nlet y: i32 = 2";
        let (fixed, changed) = auto_fix(source);
        assert!(!changed);
        assert_eq!(fixed, source);
    }

    #[test]
    fn does_not_touch_expressions_that_merely_continue() {
        let (_, changed) = auto_fix("let x: i32 = 1 + 2");
        assert!(!changed);
    }
}
