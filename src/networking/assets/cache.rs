//! Sprite asset cache with FIFO eviction
//!
//! Keeps the raw bytes of recently downloaded avatar sprites so repeated
//! renders do not hit the asset server for every layer. Entries are evicted
//! strictly in insertion order; reads never change the eviction order.

use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Default number of sprites kept in memory
pub const DEFAULT_CACHE_SIZE: usize = 32;

/// Cache performance statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate cache hit ratio as percentage
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Bytes>,
    order: VecDeque<String>,
}

/// Counters live outside the lock so lookups only need read access
#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
}

/// Bounded FIFO store of sprite bytes keyed by asset name.
///
/// Cloning is cheap and every clone shares the same storage, so one cache can
/// back any number of concurrent renders.
#[derive(Debug, Clone)]
pub struct AssetCache {
    inner: Arc<RwLock<CacheInner>>,
    counters: Arc<CacheCounters>,
    capacity: usize,
}

impl AssetCache {
    /// Create a cache holding at most `capacity` sprites. A capacity of zero
    /// disables caching.
    pub fn new(capacity: usize) -> Self {
        debug!("🗄️ Initializing sprite cache with capacity {}", capacity);

        Self {
            inner: Arc::new(RwLock::new(CacheInner::default())),
            counters: Arc::new(CacheCounters::default()),
            capacity,
        }
    }

    /// Maximum number of entries kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up a sprite without touching the eviction order
    pub async fn get(&self, asset: &str) -> Option<Bytes> {
        let found = self.inner.read().await.entries.get(asset).cloned();
        match found {
            Some(data) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!("📋 Cache HIT for sprite {}", asset);
                Some(data)
            }
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                debug!("📋 Cache MISS for sprite {}", asset);
                None
            }
        }
    }

    /// Store a sprite, evicting the oldest insertion when over capacity
    pub async fn put(&self, asset: impl Into<String>, data: Bytes) {
        if self.capacity == 0 {
            return;
        }

        let asset = asset.into();
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.entries.get_mut(&asset) {
            // Same name means same content; keep its original queue position.
            *existing = data;
            return;
        }

        let size = data.len();
        inner.entries.insert(asset.clone(), data);
        inner.order.push_back(asset.clone());
        self.counters.insertions.fetch_add(1, Ordering::Relaxed);
        debug!("📋 Cached sprite {} ({} bytes)", asset, size);

        if inner.entries.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("📋 Evicted sprite {}", oldest);
            }
        }
    }

    /// Check if a sprite is cached
    pub async fn contains(&self, asset: &str) -> bool {
        self.inner.read().await.entries.contains_key(asset)
    }

    /// Number of cached sprites
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Drop every cached sprite. Statistics are kept.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        debug!("📋 Cleared {} sprites from cache", count);
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            insertions: self.counters.insertions.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}
