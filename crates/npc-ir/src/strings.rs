//! Content-addressed string-literal interning for IR globals:
//! deduplication is permitted but not required, and this implementation
//! does it.

use rustc_hash::FxHashMap;

use inkwell::builder::Builder;
use inkwell::values::PointerValue;

#[derive(Default)]
pub struct StringTable<'ctx> {
    globals: FxHashMap<String, PointerValue<'ctx>>,
    next_id: u32,
}

impl<'ctx> StringTable<'ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a pointer to `text`'s interned, null-terminated global,
    /// creating one the first time this exact body is seen.
    pub fn intern(&mut self, builder: &Builder<'ctx>, text: &str) -> PointerValue<'ctx> {
        if let Some(ptr) = self.globals.get(text) {
            return *ptr;
        }
        let name = format!(".str.{}", self.next_id);
        self.next_id += 1;
        let ptr = builder
            .build_global_string_ptr(text, &name)
            .expect("internal compiler error: failed to build string global")
            .as_pointer_value();
        self.globals.insert(text.to_string(), ptr);
        ptr
    }
}
