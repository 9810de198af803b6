//! Bounded In-Memory Cache Module
//!
//! Thread-safe cache with a fixed capacity and FIFO eviction.
//! Used by the translation wrapper, usable for any keyed lookup.
//!
//! Eviction policy:
//! - When full, inserting a new key evicts the oldest inserted key
//! - Overwriting an existing key keeps its original position
//! - Reads never change eviction order

use dashmap::DashMap;
use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Fixed-capacity FIFO cache
#[derive(Clone)]
pub struct BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    store: Arc<DashMap<K, V>>,
    /// Keys in insertion order, front is evicted first
    order: Arc<Mutex<VecDeque<K>>>,
    capacity: usize,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Capacity is clamped to at least one entry
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            order: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        match self.store.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());

        if self.store.contains_key(&key) {
            self.store.insert(key, value);
            return;
        }

        while order.len() >= self.capacity {
            match order.pop_front() {
                Some(oldest) => {
                    self.store.remove(&oldest);
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!("🗑️ CACHE EVICT (fifo)");
                }
                None => break,
            }
        }

        order.push_back(key.clone());
        self.store.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        order.clear();
        self.store.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.store.len(),
            capacity: self.capacity,
            hits,
            misses,
            evictions: self.evictions.load(Ordering::Relaxed),
            hit_rate,
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}
