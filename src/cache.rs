//! Unbounded memo tables.
//!
//! Every memoized function in the crate (factorials, binomials, subsets,
//! branch enumeration and both way counters) is backed by a [`MemoCache`].
//! Entries are never evicted: a key always maps to the same value, and keys
//! are drawn from the inputs of a single bounded game.
//!
//! The table is guarded by a [`Mutex`] so it can be shared between the worker
//! threads of a prediction. The lock is never held while a value is being
//! computed, which allows memoized functions to recurse into themselves.
//! Two threads racing on the same missing key both compute it and the second
//! insert overwrites the first with an identical value.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

pub struct MemoCache<K, V> {
    map: Mutex<HashMap<K, V>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoCache<K, V> {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every mutation is a single insert, so a poisoned map is still whole.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Looks up a key in the cache.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.lock().get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Inserts a key-value pair into the cache.
    pub fn insert(&self, key: K, value: V) {
        self.lock().insert(key, value);
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    /// Fallible variant of [`get_or_insert_with`][Self::get_or_insert_with].
    ///
    /// Errors are returned to the caller and not cached.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }
}
