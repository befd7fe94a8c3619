//! Bounded FIFO cache of per-source results.
//!
//! Entries are evicted strictly in insertion order: reading an entry never
//! refreshes it, and overwriting an existing key keeps its original slot.
//! An empty string is a valid entry meaning "this source has nothing".
//!
//! The cache is owned by one [`crate::Collector`] and shared by all of its
//! in-flight fetchers. A single mutex guards the map and the eviction
//! queue together; no I/O happens while it is held.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::source::SourceKind;

/// Cache key: the source kind and the lowercased query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: SourceKind,
    query: String,
}

impl CacheKey {
    /// Build a key, normalising `query` by lowercasing it.
    pub fn new(kind: SourceKind, query: &str) -> Self {
        Self {
            kind,
            query: query.to_lowercase(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<CacheKey, String>,
    order: VecDeque<CacheKey>,
}

/// Thread-safe FIFO cache with a fixed capacity.
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl ResultCache {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Maximum number of entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a copy of the cached text for `key`, if present.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Insert or overwrite `key`.
    ///
    /// Inserting a new key into a full cache first evicts the oldest key.
    pub fn put(&self, key: CacheKey, text: String) {
        let mut inner = self.lock();
        if let Some(existing) = inner.entries.get_mut(&key) {
            *existing = text;
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                tracing::trace!(kind = %oldest.kind, "evicted oldest cache entry");
            }
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(key, text);
    }

    // Poison is ignored: no operation leaves the map and queue out of step.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
