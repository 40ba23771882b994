//! Cached wrapper for the zKillboard API client

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheStore, STATS_TTL, cache_key};
use crate::client::{RawStats, ZkillApi};
use crate::error::Result;
use crate::stats::EntityRef;

/// Wraps any [`ZkillApi`] with a TTL cache.
///
/// A hit within the TTL skips the network entirely. Only successful
/// fetches are stored, so a flaky upstream gets retried on the next
/// render instead of having its failure pinned for an hour.
pub struct CachedZkillClient<C: ZkillApi> {
    inner: C,
    store: Option<Box<dyn CacheStore>>,
    ttl: Duration,
}

impl<C: ZkillApi> CachedZkillClient<C> {
    /// Wrap `inner` with the given store. `None` disables caching
    /// (for `--no-cache`).
    pub fn new(inner: C, store: Option<Box<dyn CacheStore>>) -> Self {
        Self {
            inner,
            store,
            ttl: STATS_TTL,
        }
    }

    /// Override the TTL (the config's `cache_ttl_secs`)
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Get the inner client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn get_cached(&self, key: &str) -> Option<RawStats> {
        let store = self.store.as_ref()?;
        let data = store.get(key).ok().flatten()?;
        serde_json::from_slice(&data).ok()
    }

    fn set_cached(&self, key: &str, stats: &RawStats) {
        if let Some(ref store) = self.store
            && let Ok(json) = serde_json::to_vec(stats)
            && let Err(err) = store.put(key, &json, self.ttl)
        {
            log::warn!("Failed to cache stats payload: {}", err);
        }
    }
}

#[async_trait]
impl<C: ZkillApi + 'static> ZkillApi for CachedZkillClient<C> {
    async fn stats(&self, entity: &EntityRef) -> Result<RawStats> {
        let key = cache_key(entity);

        if let Some(cached) = self.get_cached(&key) {
            log::debug!(
                "Cache hit: {} {}",
                entity.entity_type.type_key(),
                entity.id
            );
            return Ok(cached);
        }

        let result = self.inner.stats(entity).await?;
        self.set_cached(&key, &result);
        Ok(result)
    }
}
