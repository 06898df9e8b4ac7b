use accounts::ports::CacheStore;
use async_trait::async_trait;
use bytes::Bytes;
use moka::Expiry;
use moka::future::Cache;
use shared::CacheError;
use std::fmt::Debug;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CachedEntry {
    payload: Bytes,
    ttl: Duration,
}

/// Expires each entry `ttl` after its latest write; reads never extend it.
struct PerEntryTtl;

impl Expiry<String, CachedEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based cache implementation with per-entry TTL support
/// Provides lock-free, concurrent cache with optional size bounds
pub struct MokaCache {
    cache: Cache<String, CachedEntry>,
}

impl MokaCache {
    /// Create a new unbounded Moka cache
    pub fn new_unbounded() -> Self {
        Self::new("accounts".to_string(), None)
    }

    /// Create a new bounded Moka cache holding at most `max_entries`
    pub fn new_bounded(max_entries: u64) -> Self {
        Self::new("accounts".to_string(), Some(max_entries))
    }

    /// Create a Moka cache from name and optional capacity
    pub fn new(name: String, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(&name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl CacheStore for MokaCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        // Either doesn't exist or TTL expired
        Ok(self.cache.get(key).await.map(|entry| entry.payload))
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        self.cache
            .insert(key.to_string(), CachedEntry { payload: value, ttl })
            .await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.cache.invalidate(key).await;
        Ok(())
    }
}

impl Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_moka_cache_set_and_get() {
        let cache = MokaCache::new_unbounded();

        cache
            .set("account:1", Bytes::from_static(b"payload"), HOUR)
            .await
            .unwrap();

        let value = cache.get("account:1").await.unwrap();
        assert_eq!(value, Some(Bytes::from_static(b"payload")));
    }

    #[tokio::test]
    async fn test_moka_cache_get_nonexistent() {
        let cache = MokaCache::new_unbounded();

        let value = cache.get("account:missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_moka_cache_remove() {
        let cache = MokaCache::new_unbounded();

        cache.set("key", Bytes::from_static(b"v"), HOUR).await.unwrap();
        cache.remove("key").await.unwrap();

        assert!(cache.get("key").await.unwrap().is_none());

        // Removing an absent key is a no-op
        cache.remove("key").await.unwrap();
    }

    #[tokio::test]
    async fn test_moka_cache_overwrite() {
        let cache = MokaCache::new_unbounded();

        cache.set("key", Bytes::from_static(b"value1"), HOUR).await.unwrap();
        cache.set("key", Bytes::from_static(b"value2"), HOUR).await.unwrap();

        let value = cache.get("key").await.unwrap();
        assert_eq!(value, Some(Bytes::from_static(b"value2")));
    }

    #[tokio::test]
    async fn test_moka_cache_per_entry_ttl() {
        let cache = MokaCache::new_unbounded();

        cache
            .set("short", Bytes::from_static(b"s"), Duration::from_millis(100))
            .await
            .unwrap();
        cache.set("long", Bytes::from_static(b"l"), HOUR).await.unwrap();

        // Should be available immediately
        assert!(cache.get("short").await.unwrap().is_some());

        // Wait for expiration
        sleep(Duration::from_millis(250)).await;

        assert!(cache.get("short").await.unwrap().is_none());
        assert!(cache.get("long").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_moka_cache_overwrite_resets_ttl() {
        let cache = MokaCache::new_unbounded();

        cache
            .set("key", Bytes::from_static(b"old"), Duration::from_millis(100))
            .await
            .unwrap();
        cache.set("key", Bytes::from_static(b"new"), HOUR).await.unwrap();

        sleep(Duration::from_millis(250)).await;

        let value = cache.get("key").await.unwrap();
        assert_eq!(value, Some(Bytes::from_static(b"new")));
    }

    #[tokio::test]
    async fn test_moka_cache_bounded() {
        let cache = MokaCache::new_bounded(2); // Max 2 entries

        for key in ["key1", "key2", "key3", "key4"] {
            cache.set(key, Bytes::from_static(b"v"), HOUR).await.unwrap();
        }

        // Let pending eviction work run
        cache.cache.run_pending_tasks().await;

        let entry_count = cache.cache.entry_count();
        assert!(entry_count <= 2, "Cache should have at most 2 entries");
    }
}
