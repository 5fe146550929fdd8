//! The global string table backing `Symbol`.
//!
//! The compiler is single-threaded, so the table lives behind a
//! single `RefCell` in thread-local storage rather than the `Arc<RwLock<_>>`
//! a multi-threaded frontend would need. Interned strings are leaked to get
//! a `'static` lifetime: the table only ever grows for the lifetime of one
//! `npc` invocation, so reclaiming memory is not worth the bookkeeping.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

use super::Symbol;

pub(super) struct StringTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl StringTable {
    fn new() -> Self {
        let mut table = Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        for kw in super::KEYWORDS {
            table.intern(kw);
        }
        table
    }

    fn intern(&mut self, string: &str) -> Symbol {
        if let Some(&index) = self.map.get(string) {
            return Symbol(index);
        }

        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.strings.len() as u32;
        self.strings.push(interned);
        self.map.insert(interned, index);
        Symbol(index)
    }

    fn get(&self, symbol: Symbol) -> &'static str {
        self.strings[symbol.0 as usize]
    }
}

thread_local! {
    pub(super) static TABLE: RefCell<StringTable> = RefCell::new(StringTable::new());
}

pub(super) fn intern(string: &str) -> Symbol {
    TABLE.with(|t| t.borrow_mut().intern(string))
}

pub(super) fn resolve(symbol: Symbol) -> &'static str {
    TABLE.with(|t| t.borrow().get(symbol))
}
