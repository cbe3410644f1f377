//! Lexical scope tables.
//!
//! Scopes live in an arena owned by the `Program` and refer to their parent
//! through `next`. Name resolution walks that chain, except that a function
//! scope stops at itself: a function body only sees its own parameters, its
//! own name, and the built-in library seeded into its table.

use std::collections::HashMap;

use super::definitions::{DefId, FunctionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Outermost program scope
    Root,
    /// Any nested block (`if`, `while`, `for` bodies)
    Block,
    Function(FunctionId),
}

#[derive(Debug, Clone)]
pub struct Scope {
    table: HashMap<String, DefId>,
    pub next: Option<ScopeId>,
    pub kind: ScopeKind,
}

impl Scope {
    pub fn new(kind: ScopeKind, next: Option<ScopeId>) -> Self {
        Scope {
            table: HashMap::new(),
            next,
            kind,
        }
    }

    /// Looks the name up in this table only.
    pub fn get(&self, name: &str) -> Option<DefId> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub(super) fn insert(&mut self, name: String, definition: DefId) {
        self.table.insert(name, definition);
    }

    /// Whether a lookup miss continues in the parent scope.
    pub fn searches_parent(&self) -> bool {
        !matches!(self.kind, ScopeKind::Function(_))
    }
}
