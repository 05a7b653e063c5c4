//! Injected key-value storage for image-load bookkeeping.
//!
//! The engine never touches browser or disk storage; hosts hand it a
//! [`KeyValueStore`] created at startup and persist it however they like.

use std::collections::BTreeMap;

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Value for `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: String);
    /// Whether `key` is present.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store, ordered for deterministic snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Remembers which image urls have finished loading at least once, so hosts
/// can skip fade-in effects for cached images.
#[derive(Clone, Debug, Default)]
pub struct ImageLoadTracker<S> {
    store: S,
}

impl<S: KeyValueStore> ImageLoadTracker<S> {
    const PREFIX: &'static str = "image-loaded:";

    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record that `url` finished loading.
    pub fn mark_loaded(&mut self, url: &str) {
        self.store.set(&Self::key(url), "1".to_string());
    }

    /// Whether `url` loaded before.
    pub fn was_loaded(&self, url: &str) -> bool {
        self.store.has(&Self::key(url))
    }

    /// Underlying store, for persistence by the host.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn key(url: &str) -> String {
        format!("{}{url}", Self::PREFIX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/kv.rs"]
mod tests;
