//! `Symbol` - an interned string identifier.
//!
//! A `Symbol` is a 4-byte handle into a global string table, making
//! identifier comparison an `O(1)` integer comparison instead of a byte
//! scan, and keeping `Token`/AST nodes cheap to clone.

mod interner;

use std::fmt;

/// An interned string. Two symbols are equal iff their underlying strings
/// are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `string`, returning the symbol for it (creating a fresh
    /// table entry the first time a given string is seen).
    pub fn intern(string: &str) -> Self {
        interner::intern(string)
    }

    /// The original string this symbol was interned from.
    pub fn as_str(self) -> &'static str {
        interner::resolve(self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keywords of the unified grammar, pre-interned so that
/// `Symbol::intern("fn")` always returns the same id run to run, which
/// keeps golden-output tests (e.g. `--emit ast`) deterministic.
pub const KEYWORDS: &[&str] = &[
    "let", "fn", "struct", "enum", "match", "if", "else", "for", "while", "return", "import",
    "from", "package", "version", "dependencies", "exports", "src", "run", "Task", "complete",
    "Start", "setup", "done", "go", "loop", "try", "catch", "print",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let a = Symbol::intern("hello");
        let b = Symbol::intern("hello");
        let c = Symbol::intern("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "hello");
    }

    #[test]
    fn keywords_are_preinterned() {
        let fn_sym = Symbol::intern("fn");
        assert_eq!(fn_sym.as_str(), "fn");
    }
}
