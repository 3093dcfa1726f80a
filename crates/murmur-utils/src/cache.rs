//! A small TTL map cache on top of [`moka`].

use moka::future::Cache;
use std::hash::Hash;
use std::time::Duration;

/// Async key-value cache with optional time-to-live and capacity bounds.
pub struct MapCache<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> MapCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn builder() -> MapCacheBuilder {
        MapCacheBuilder::default()
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key).await
    }

    /// Drops every entry. Readers observe the cache as empty from the
    /// moment this returns.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}

impl<K, V> Clone for MapCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> std::fmt::Debug for MapCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapCache")
            .field("entries", &self.inner.entry_count())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct MapCacheBuilder {
    time_to_live: Option<Duration>,
    max_capacity: Option<u64>,
}

impl MapCacheBuilder {
    #[must_use]
    pub fn time_to_live(mut self, time_to_live: Duration) -> Self {
        self.time_to_live = Some(time_to_live);
        self
    }

    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    #[must_use]
    pub fn build<K, V>(self) -> MapCache<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let mut builder = Cache::<K, V>::builder();
        if let Some(time_to_live) = self.time_to_live {
            builder = builder.time_to_live(time_to_live);
        }
        if let Some(max_capacity) = self.max_capacity {
            builder = builder.max_capacity(max_capacity);
        }
        MapCache {
            inner: builder.build(),
        }
    }
}
