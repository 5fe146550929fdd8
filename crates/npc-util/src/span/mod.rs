//! Source locations.
//!
//! Every token and AST node carries a `Span`: a byte range plus the
//! 1-based line/column of its start. Spans are immutable and are copied
//! by value (they are two `u32` pairs, 16 bytes).

use std::fmt;

/// A source location: a half-open byte range `[start, end)` plus the
/// 1-based line/column of `start`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// A placeholder span used for synthesized nodes (e.g. desugared
    /// legacy-dialect constructs) that have no single source origin.
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start: start as u32,
            end: end as u32,
            line,
            column,
        }
    }

    /// Merge two spans into one covering both; the line/column of `self`
    /// wins (used when combining a statement's keyword span with its body).
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_dummy(self) -> bool {
        self == Span::DUMMY
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
