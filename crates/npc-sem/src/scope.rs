//! Scope resolution as an arena of ribs: an index-based scope tree
//! rather than `Rc`/`Weak` nodes, since the analyzer's lifetime is a
//! single pass over one `Program`.

use indexmap::IndexMap;
use npc_util::{define_idx, IndexVec, Symbol};
use std::cell::Cell;

use crate::types::Type;

define_idx!(RibId);

/// What a variable, function, or struct name resolved to.
#[derive(Clone, Debug)]
pub enum BindingKind {
    Variable(Type),
    Function { params: Vec<Type>, ret: Type },
    Struct,
}

#[derive(Debug)]
pub struct Binding {
    pub kind: BindingKind,
    /// Flipped by `ScopeTree::resolve` the first time the name is looked
    /// up; read back by the unused-symbol pass on scope exit.
    pub used: Cell<bool>,
}

/// A single lexical scope. `bindings` is an `IndexMap` so the
/// unused-variable pass can walk declarations in the order they were
/// introduced, not hash order.
#[derive(Debug)]
pub struct Rib {
    pub bindings: IndexMap<Symbol, Binding>,
    pub parent: Option<RibId>,
}

pub struct ScopeTree {
    pub ribs: IndexVec<RibId, Rib>,
    pub current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            bindings: IndexMap::new(),
            parent: None,
        });
        Self { ribs, current: root }
    }

    pub fn enter_scope(&mut self) -> RibId {
        let rib = self.ribs.push(Rib {
            bindings: IndexMap::new(),
            parent: Some(self.current),
        });
        self.current = rib;
        rib
    }

    /// Leaves the current scope, returning its id so the caller can run
    /// the unused-symbol pass over it before it becomes unreachable.
    pub fn exit_scope(&mut self) -> RibId {
        let exited = self.current;
        if let Some(parent) = self.ribs[exited].parent {
            self.current = parent;
        }
        exited
    }

    /// True if `name` is already bound in the *current* scope (used for
    /// same-scope redeclaration checks; shadowing an outer scope is fine).
    pub fn is_bound_locally(&self, name: Symbol) -> bool {
        self.ribs[self.current].bindings.contains_key(&name)
    }

    pub fn bind(&mut self, name: Symbol, kind: BindingKind) {
        self.ribs[self.current].bindings.insert(
            name,
            Binding {
                kind,
                used: Cell::new(false),
            },
        );
    }

    /// Walks outward from the current scope, marking the binding used if
    /// found.
    pub fn resolve(&self, name: Symbol) -> Option<&BindingKind> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(binding) = rib.bindings.get(&name) {
                binding.used.set(true);
                return Some(&binding.kind);
            }
            match rib.parent {
                Some(parent) => rib_id = parent,
                None => return None,
            }
        }
    }

    /// Bindings declared directly in `rib`, in declaration order, that
    /// were never looked up.
    pub fn unused_in(&self, rib: RibId) -> Vec<Symbol> {
        self.ribs[rib]
            .bindings
            .iter()
            .filter(|(_, b)| !b.used.get() && matches!(b.kind, BindingKind::Variable(_)))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_walks_up_to_parent_scopes() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("x");
        tree.bind(x, BindingKind::Variable(Type::I32));
        tree.enter_scope();
        assert!(tree.resolve(x).is_some());
    }

    #[test]
    fn shadowing_in_a_child_scope_does_not_count_as_local_redeclaration() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("shadow_me");
        tree.bind(x, BindingKind::Variable(Type::I32));
        tree.enter_scope();
        assert!(!tree.is_bound_locally(x));
        tree.bind(x, BindingKind::Variable(Type::Bool));
        assert!(tree.is_bound_locally(x));
    }

    #[test]
    fn unused_tracks_declaration_order_and_skips_looked_up_names() {
        let mut tree = ScopeTree::new();
        let rib = tree.enter_scope();
        let a = Symbol::intern("a_unused");
        let b = Symbol::intern("b_unused");
        tree.bind(a, BindingKind::Variable(Type::I32));
        tree.bind(b, BindingKind::Variable(Type::I32));
        tree.resolve(a);
        let unused = tree.unused_in(rib);
        assert_eq!(unused, vec![b]);
    }
}
