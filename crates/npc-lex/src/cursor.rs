//! A character cursor over the source string, tracking byte position and
//! 1-based line/column as it advances.

pub struct Cursor<'a> {
    source: &'a str,
    chars: std::str::Chars<'a>,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn current_char(&self) -> char {
        self.chars.clone().next().unwrap_or('\0')
    }

    pub fn peek_char(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or('\0')
    }

    /// Consume and return the current character, advancing line/column
    /// bookkeeping (a `\n` resets column to 1 and bumps the line).
    pub fn advance(&mut self) -> char {
        match self.chars.next() {
            Some(c) => {
                self.position += c.len_utf8();
                if c == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                c
            }
            None => '\0',
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}
