//! # Session Store
//!
//! The ephemeral string key-value channel shared with the external
//! analysis tool.
//!
//! - Volatile: lives for the process session only, never serialized
//! - Single writer: enforced by `&mut` ownership, no locking
//! - Overwrite semantics: every new intake replaces the previous values
//! - Write-only contract: nothing in this codebase reads the intake keys
//!   back except diagnostics; the consumer is an external tool
//!
//! Uses `BTreeMap` so iteration order is deterministic.

use std::collections::BTreeMap;

/// Ephemeral session-scoped string store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, returning the previous value if one existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove a key, returning its value if it existed.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut store = SessionStore::new();

        assert_eq!(store.set("uploadedFileName", "first.csv"), None);
        assert_eq!(
            store.set("uploadedFileName", "second.csv"),
            Some("first.csv".to_string())
        );
        assert_eq!(store.get("uploadedFileName"), Some("second.csv"));
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = SessionStore::new();
        store.set("a", "1");
        store.set("b", "2");
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut store = SessionStore::new();
        store.set("c", "3");
        store.set("a", "1");
        store.set("b", "2");

        let keys: Vec<_> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_reports_absence() {
        let mut store = SessionStore::new();
        store.set("a", "1");

        assert_eq!(store.remove("a"), Some("1".to_string()));
        assert_eq!(store.remove("a"), None);
        assert!(!store.contains("a"));
    }
}
