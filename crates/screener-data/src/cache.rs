//! Response caching.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A keyed cache of collaborator responses.
///
/// Injected into the cached source wrappers so callers choose the
/// implementation and control invalidation.
#[async_trait]
pub trait ResponseCache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Get a live entry.
    async fn get(&self, key: &str) -> Option<V>;

    /// Store a value under `key`.
    async fn put(&self, key: String, value: V);

    /// Drop the entry for `key`, returning whether one existed.
    async fn invalidate(&self, key: &str) -> bool;

    /// Drop every entry.
    async fn clear(&self);
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner<V> {
    map: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

/// Thread-safe in-memory cache whose entries expire after a fixed TTL.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    inner: Arc<RwLock<CacheInner<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Remove expired entries.
    pub async fn clear_expired(&self) {
        let now = Instant::now();
        let mut store = self.inner.write().await;
        store.map.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.map.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<V> ResponseCache<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let store = self.inner.read().await;
        store.map.get(key).and_then(|entry| {
            if Instant::now() < entry.expires_at {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    async fn put(&self, key: String, value: V) {
        let mut store = self.inner.write().await;

        // Disabled cache
        if store.ttl == Duration::ZERO {
            return;
        }

        let expires_at = Instant::now() + store.ttl;
        store.map.insert(key, CacheEntry { value, expires_at });
    }

    async fn invalidate(&self, key: &str) -> bool {
        self.inner.write().await.map.remove(key).is_some()
    }

    async fn clear(&self) {
        self.inner.write().await.map.clear();
    }
}
