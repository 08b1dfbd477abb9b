//! In-memory response cache.
//!
//! Each [`crate::WebResearcher`] owns two of these: one for search result
//! lists keyed by `"{engine}:{query}"`, one for page snapshots keyed by the
//! raw URL. Entries are bounded by capacity with least-recently-used
//! eviction; an optional TTL expires them, but the default keeps them until
//! evicted. Nothing survives a process restart.

use std::hash::Hash;
use std::time::Duration;

use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::types::SearchEngine;

/// Bounded memoisation table.
///
/// Values are handed out as clones; mutating a returned value never
/// affects the cached copy.
#[derive(Clone)]
pub struct ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// `ttl` of `None` disables time-based expiry.
    pub fn new(capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru());
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner: builder.build(),
        }
    }

    /// Look up a cached value.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Insert or replace a value.
    pub async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Drop a single entry.
    pub async fn remove(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate entry count after pending maintenance has run.
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> std::fmt::Debug for ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

/// Key for a search result list: `"{engine}:{query_text}"`.
///
/// The query text is used verbatim, so `"Rust"` and `"rust"` are distinct.
pub fn search_key(engine: SearchEngine, query: &str) -> String {
    format!("{}:{query}", engine.name())
}
