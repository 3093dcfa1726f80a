use bytes::Bytes;
use murmur_utils::cache::MapCache;
use std::time::Duration;

/// Whole-page cache for the home feed.
///
/// Keys are the request path including the query string, so every page
/// of the feed caches separately; the stored value is the rendered
/// response body, shared by all visitors. Entries expire after the
/// configured time-to-live and can be dropped early with
/// [`clear`](PageCache::clear). There is no per-entity invalidation: a
/// post created or deleted inside the window stays invisible until the
/// entry expires.
#[derive(Debug, Clone)]
pub struct PageCache {
    inner: MapCache<String, CachedPage>,
}

#[derive(Debug, Clone)]
pub struct CachedPage {
    pub body: Bytes,
}

impl PageCache {
    #[must_use]
    pub fn new(time_to_live: Duration) -> Self {
        Self {
            inner: MapCache::<String, CachedPage>::builder().time_to_live(time_to_live).build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<CachedPage> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, body: Bytes) {
        self.inner.insert(key, CachedPage { body }).await;
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}
