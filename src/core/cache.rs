// src/core/cache.rs — Bounded LRU memoization of capital lookups
//
// Keys are the trimmed country string with case preserved, so "Kenya" and
// " Kenya " share an entry but "kenya" does not. Failed lookups are never
// stored. Concurrent misses on the same key each run their compute future;
// the first value stored wins.

use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default maximum number of resident entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Normalize a raw country string into a cache key.
pub fn normalize_key(country: &str) -> String {
    country.trim().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
struct Entry {
    capital: String,
    /// Recency stamp from `LruState::tick`; larger is more recent.
    last_used: u64,
}

#[derive(Debug, Default)]
struct LruState {
    entries: HashMap<String, Entry>,
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl LruState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_lru(&mut self) -> Option<String> {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone())?;
        self.entries.remove(&lru_key);
        self.evictions += 1;
        tracing::debug!(country = %lru_key, "Evicting LRU cache entry");
        Some(lru_key)
    }
}

/// Process-local cache shared by every request handler.
#[derive(Debug)]
pub struct LookupCache {
    state: Mutex<LruState>,
    capacity: usize,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LookupCache {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(LruState::default()),
            capacity: capacity.max(1),
        }
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, LruState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a capital, marking the entry as most recently used on a hit.
    pub fn get(&self, country: &str) -> Option<String> {
        let key = normalize_key(country);
        let mut state = self.lock();
        let tick = state.next_tick();
        let capital = match state.entries.get_mut(&key) {
            Some(entry) => {
                entry.last_used = tick;
                Some(entry.capital.clone())
            }
            None => None,
        };
        if capital.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        capital
    }

    /// Store a capital. Returns the key evicted to make room, if any.
    ///
    /// An existing entry keeps its original value; only its recency is refreshed.
    pub fn insert(&self, country: &str, capital: String) -> Option<String> {
        let key = normalize_key(country);
        let mut state = self.lock();
        let tick = state.next_tick();

        if let Some(entry) = state.entries.get_mut(&key) {
            entry.last_used = tick;
            return None;
        }

        let evicted = if state.entries.len() >= self.capacity {
            state.evict_lru()
        } else {
            None
        };
        state.entries.insert(
            key,
            Entry {
                capital,
                last_used: tick,
            },
        );
        evicted
    }

    /// Return the cached capital for `country`, running `compute` on a miss.
    ///
    /// The lock is released while `compute` runs. Errors are returned as-is
    /// and leave the cache untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, country: &str, compute: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(capital) = self.get(country) {
            tracing::debug!(country = %country.trim(), "cache hit");
            return Ok(capital);
        }

        let capital = compute().await?;
        self.insert(country, capital.clone());
        Ok(capital)
    }

    /// Drop every entry. Safe to call on an empty cache.
    pub fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        tracing::debug!(dropped, "cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, country: &str) -> bool {
        self.lock().entries.contains_key(&normalize_key(country))
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            capacity: self.capacity,
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
        }
    }
}
