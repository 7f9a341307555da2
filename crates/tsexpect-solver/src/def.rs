//! Named type definitions.
//!
//! Self-referential types cannot be built bottom-up by the interner alone:
//!
//! ```typescript
//! interface X { x: X }
//! ```
//!
//! A definition is declared first (yielding a [`DefId`] and a `Lazy` type
//! that refers to it), used freely inside other types, and given its body
//! afterwards. Relations and the prop printer resolve `Lazy` types through
//! the [`DefinitionStore`] on demand.

use crate::types::TypeId;
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Identifier of a named definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

#[derive(Clone, Debug)]
struct DefinitionEntry {
    name: Arc<str>,
    body: Option<TypeId>,
}

#[derive(Default)]
struct DefinitionTable {
    entries: Vec<DefinitionEntry>,
    by_name: FxHashMap<Arc<str>, DefId>,
}

/// Storage for named definitions and their bodies.
#[derive(Default)]
pub struct DefinitionStore {
    table: RwLock<DefinitionTable>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name`, returning the existing id if it was declared before.
    pub fn declare(&self, name: &str) -> DefId {
        let mut table = self.table.write().expect("definition table lock poisoned");
        if let Some(&def_id) = table.by_name.get(name) {
            return def_id;
        }
        let def_id = DefId(table.entries.len() as u32);
        let name: Arc<str> = Arc::from(name);
        table.entries.push(DefinitionEntry {
            name: name.clone(),
            body: None,
        });
        table.by_name.insert(name, def_id);
        def_id
    }

    /// Set (or replace) the body of a declared definition.
    pub fn define(&self, def_id: DefId, body: TypeId) {
        let mut table = self.table.write().expect("definition table lock poisoned");
        if let Some(entry) = table.entries.get_mut(def_id.0 as usize) {
            entry.body = Some(body);
        }
    }

    /// The body of `def_id`, or `None` if it was declared but never defined.
    pub fn body(&self, def_id: DefId) -> Option<TypeId> {
        let table = self.table.read().expect("definition table lock poisoned");
        table.entries.get(def_id.0 as usize).and_then(|entry| entry.body)
    }

    pub fn name(&self, def_id: DefId) -> Option<Arc<str>> {
        let table = self.table.read().expect("definition table lock poisoned");
        table
            .entries
            .get(def_id.0 as usize)
            .map(|entry| entry.name.clone())
    }

    pub fn lookup(&self, name: &str) -> Option<DefId> {
        let table = self.table.read().expect("definition table lock poisoned");
        table.by_name.get(name).copied()
    }

    /// Declared names that never received a body.
    pub fn undefined_names(&self) -> Vec<Arc<str>> {
        let table = self.table.read().expect("definition table lock poisoned");
        table
            .entries
            .iter()
            .filter(|entry| entry.body.is_none())
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        let table = self.table.read().expect("definition table lock poisoned");
        table.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_is_idempotent() {
        let store = DefinitionStore::new();
        let a = store.declare("A");
        let b = store.declare("B");
        assert_ne!(a, b);
        assert_eq!(store.declare("A"), a);
        assert_eq!(store.lookup("B"), Some(b));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_define_and_report_missing_bodies() {
        let store = DefinitionStore::new();
        let a = store.declare("A");
        let _b = store.declare("B");
        assert_eq!(store.body(a), None);
        store.define(a, TypeId::NUMBER);
        assert_eq!(store.body(a), Some(TypeId::NUMBER));
        assert_eq!(store.name(a).as_deref(), Some("A"));
        let missing = store.undefined_names();
        assert_eq!(missing.len(), 1);
        assert_eq!(&*missing[0], "B");
    }
}
