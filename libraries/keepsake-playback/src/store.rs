//! Key-value storage abstraction
//!
//! The browser provides durable (`localStorage`) and tab-scoped
//! (`sessionStorage`) string stores. Both are modelled by [`StateStore`].

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Synchronous string key-value store
pub trait StateStore {
    /// Read a value, `Ok(None)` when the key is absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and non-browser hosts
///
/// Keeps a log of every write so callers can inspect what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (not counted as a write)
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Every write in order
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Writes to one key in order
    pub fn writes_to<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.writes
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Shared store, so one backing map can outlive a session (page reloads in tests)
impl<T: StateStore> StateStore for Rc<RefCell<T>> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.borrow().read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.borrow_mut().write(key, value)
    }
}
