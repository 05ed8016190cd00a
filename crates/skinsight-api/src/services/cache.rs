//! Content-addressed result cache.
//!
//! Bounded in-memory map keyed by the SHA-256 of the uploaded bytes. Entries
//! never expire; once capacity is exceeded the oldest inserted entry is
//! evicted synchronously during `insert`.

use std::collections::{HashMap, VecDeque};

use sha2::{Digest, Sha256};
use skinsight_models::AnalysisResult;
use tokio::sync::RwLock;
use tracing::debug;

/// Default number of cached results.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Cache of analysis results served to repeated uploads.
pub type ReportCache = BoundedCache<AnalysisResult>;

/// Hex SHA-256 of an upload.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

struct CacheInner<V> {
    entries: HashMap<String, V>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<String>,
}

/// FIFO-evicting map safe for concurrent use.
pub struct BoundedCache<V> {
    inner: RwLock<CacheInner<V>>,
    capacity: usize,
}

impl<V: Clone> BoundedCache<V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.read().await.entries.get(key).cloned()
    }

    /// Insert a value, returning the keys evicted to stay within capacity.
    ///
    /// Replacing an existing key keeps its original insertion position.
    pub async fn insert(&self, key: String, value: V) -> Vec<String> {
        let mut inner = self.inner.write().await;

        if inner.entries.insert(key.clone(), value).is_none() {
            inner.order.push_back(key);
        }

        let mut evicted = Vec::new();
        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            evicted.push(oldest);
        }

        if !evicted.is_empty() {
            debug!(count = evicted.len(), "Evicted oldest cache entries");
        }

        evicted
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove every entry, returning how many were dropped.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let cleared = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        cleared
    }
}
